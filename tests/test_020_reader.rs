mod test_utils;

use hdbwire::{
    CancellationToken, FunctionCode, HdbError, HdbValue, Part, PartKind, Reader, ResultSet,
    ResultSetMetadata, Severity,
};
use std::io::Cursor;
use std::sync::Arc;

const PK_RESULT_SET: i8 = 5;
const PK_ERROR: i8 = 6;
const PK_RESULT_SET_METADATA: i8 = 48;
const FC_SELECT: i16 = 5;

// A simple query reply: result-set metadata (one INT column "N") followed by
// three rows. The handler materializes both parts.
#[test]
fn test_simple_query_reply() {
    test_utils::init_logger();
    let ctx = CancellationToken::new();

    let frame = test_utils::ReplyBuilder::new(17, FC_SELECT)
        .push_part(
            PK_RESULT_SET_METADATA,
            1,
            test_utils::int_column_metadata_payload("N", false),
        )
        .push_part(PK_RESULT_SET, 3, test_utils::int_rows_payload(&[1, 2, 3]))
        .build();

    let mut reader = Reader::new_db(Cursor::new(frame), true);
    let mut o_metadata: Option<Arc<ResultSetMetadata>> = None;
    let mut o_result_set: Option<ResultSet> = None;

    reader
        .iterate_parts(&ctx, |kind, _attrs, part_read| {
            match kind {
                PartKind::ResultSetMetadata => {
                    let mut part = Part::ResultSetMetadata(ResultSetMetadata::default());
                    part_read.read(&mut part)?;
                    if let Part::ResultSetMetadata(md) = part {
                        o_metadata = Some(Arc::new(md));
                    }
                }
                PartKind::ResultSet => {
                    let metadata = Arc::clone(o_metadata.as_ref().expect("metadata part first"));
                    let mut part = Part::ResultSet(ResultSet::for_metadata(metadata));
                    part_read.read(&mut part)?;
                    if let Part::ResultSet(rs) = part {
                        o_result_set = Some(rs);
                    }
                }
                _ => {}
            }
            Ok(())
        })
        .unwrap();

    assert_eq!(reader.session_id(), 17);
    assert_eq!(reader.function_code(), FunctionCode::Select);

    let metadata = o_metadata.unwrap();
    assert_eq!(metadata.len(), 1);
    assert_eq!(metadata[0].columnname(), "N");

    let result_set = o_result_set.unwrap();
    assert_eq!(
        result_set.rows(),
        &[
            vec![HdbValue::INT(1)],
            vec![HdbValue::INT(2)],
            vec![HdbValue::INT(3)]
        ]
    );
}

// A reply whose error list contains solely warnings is treated as success;
// the function code survives.
#[test]
fn test_warning_only_reply() {
    test_utils::init_logger();
    let ctx = CancellationToken::new();

    let frame = test_utils::ReplyBuilder::new(17, FC_SELECT)
        .push_part(
            PK_ERROR,
            2,
            test_utils::error_part_payload(&[
                (1347, 0, 0, b"01000", "statement is deprecated"),
                (1348, 0, 0, b"01000", "and noisy, too"),
            ]),
        )
        .build();

    let mut reader = Reader::new_db(Cursor::new(frame), false);
    reader.skip_parts(&ctx).unwrap();
    assert_eq!(reader.function_code(), FunctionCode::Select);
}

// A fatal server error surfaces as HdbError::DbError.
#[test]
fn test_error_reply() {
    test_utils::init_logger();
    let ctx = CancellationToken::new();

    let frame = test_utils::ReplyBuilder::new(17, 0)
        .push_part(
            PK_ERROR,
            1,
            test_utils::error_part_payload(&[(
                257,
                31,
                1,
                b"HY000",
                "sql syntax error: incorrect syntax",
            )]),
        )
        .build();

    let mut reader = Reader::new_db(Cursor::new(frame), false);
    let err = reader.skip_parts(&ctx).unwrap_err();
    let server_errors = err.server_errors().expect("expected a DbError");
    assert_eq!(server_errors.len(), 1);
    let server_error = server_errors.iter().next().unwrap();
    assert_eq!(server_error.code(), 257);
    assert_eq!(server_error.position(), 31);
    assert_eq!(*server_error.severity(), Severity::Error);
    assert_eq!(server_error.sqlstate(), b"HY000");
}

// A 13-byte command payload is padded with 3 zero bytes; a subsequent part
// decodes only when exactly those 3 bytes are skipped. A tampered frame with
// a 2-byte pad must be rejected.
#[test]
fn test_padding_boundary() {
    test_utils::init_logger();
    let ctx = CancellationToken::new();

    let command = b"select 1 ab x"; // 13 bytes
    assert_eq!(command.len(), 13);

    let frame = test_utils::ReplyBuilder::new(4711, 0)
        .push_part(3, 1, command.to_vec()) // Command
        .push_part(PK_ERROR, 0, Vec::new())
        .build();

    let mut reader = Reader::new_db(Cursor::new(frame.clone()), false);
    let mut kinds = Vec::new();
    reader
        .iterate_parts(&ctx, |kind, _attrs, _part_read| {
            kinds.push(kind);
            Ok(())
        })
        .unwrap();
    assert_eq!(kinds, vec![PartKind::Command, PartKind::Error]);

    // tamper: remove one of the three pad bytes after the command payload
    let command_payload_end = 32 + 24 + 16 + 13;
    let mut tampered = frame;
    tampered.remove(command_payload_end); // drop one pad byte
    let mut reader = Reader::new_db(Cursor::new(tampered), false);
    assert!(reader.skip_parts(&ctx).is_err());
}

// Unknown part kinds are skipped silently (forward compatibility), the rest
// of the message stays intact.
#[test]
fn test_unknown_part_kind_is_skipped() {
    test_utils::init_logger();
    let ctx = CancellationToken::new();

    let frame = test_utils::ReplyBuilder::new(3, FC_SELECT)
        .push_part(99, 1, vec![0xAB; 11]) // a kind this crate does not know
        .push_part(3, 1, b"select 1 from dummy".to_vec()) // Command
        .build();

    let mut reader = Reader::new_db(Cursor::new(frame), false);
    let mut kinds = Vec::new();
    reader
        .iterate_parts(&ctx, |kind, _attrs, _part_read| {
            kinds.push(kind);
            Ok(())
        })
        .unwrap();
    assert_eq!(kinds, vec![PartKind::__Unexpected__(99), PartKind::Command]);
    assert_eq!(reader.function_code(), FunctionCode::Select);
}

// Cancellation is consulted before the message header is decoded.
#[test]
fn test_cancellation() {
    test_utils::init_logger();
    let ctx = CancellationToken::new();
    ctx.cancel();

    let frame = test_utils::ReplyBuilder::new(1, 0).build();
    let mut reader = Reader::new_db(Cursor::new(frame), false);
    assert!(matches!(
        reader.skip_parts(&ctx),
        Err(HdbError::Cancelled)
    ));
}
