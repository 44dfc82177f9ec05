mod test_utils;

use hdbwire::{CancellationToken, Reader, RowsAffected, RA_EXECUTION_FAILED};
use std::io::Cursor;

const PK_ERROR: i8 = 6;
const PK_ROWS_AFFECTED: i8 = 12;

// A batch reply: [RowsAffected(rows = [1, failed, 2]), one error]. Fusion
// must attach statement index 1 to the error and fail the call with it.
#[test]
fn test_batch_with_per_statement_failure() {
    test_utils::init_logger();
    let ctx = CancellationToken::new();

    let frame = test_utils::ReplyBuilder::new(99, 0)
        .push_part(
            PK_ROWS_AFFECTED,
            3,
            test_utils::rows_affected_payload(&[1, RA_EXECUTION_FAILED, 2]),
        )
        .push_part(
            PK_ERROR,
            1,
            test_utils::error_part_payload(&[(
                301,
                0,
                1,
                b"23000",
                "unique constraint violated",
            )]),
        )
        .build();

    let mut reader = Reader::new_db(Cursor::new(frame), false);
    let err = reader.skip_parts(&ctx).unwrap_err();

    let server_errors = err.server_errors().expect("expected a DbError");
    assert_eq!(server_errors.len(), 1);
    let server_error = server_errors.iter().next().unwrap();
    assert_eq!(server_error.code(), 301);
    assert_eq!(server_error.stmt_no(), Some(1));
}

// Rows-affected without any error part fuses to Ok; the part itself can be
// materialized by the handler.
#[test]
fn test_rows_affected_only() {
    test_utils::init_logger();
    let ctx = CancellationToken::new();

    let frame = test_utils::ReplyBuilder::new(99, 0)
        .push_part(
            PK_ROWS_AFFECTED,
            3,
            test_utils::rows_affected_payload(&[5, 0, 7]),
        )
        .build();

    let mut reader = Reader::new_db(Cursor::new(frame), false);
    let mut o_rows_affected: Option<RowsAffected> = None;
    reader
        .iterate_parts(&ctx, |kind, _attrs, part_read| {
            if kind == hdbwire::PartKind::RowsAffected {
                let mut part = hdbwire::Part::RowsAffected(RowsAffected::default());
                part_read.read(&mut part)?;
                if let hdbwire::Part::RowsAffected(ra) = part {
                    o_rows_affected = Some(ra);
                }
            }
            Ok(())
        })
        .unwrap();

    let rows_affected = o_rows_affected.unwrap();
    assert_eq!(rows_affected.rows(), &[5, 0, 7]);
    assert_eq!(rows_affected.total(), 12);
}

// The reader must be reusable after a failed message: fusion state is reset.
#[test]
fn test_reader_reuse_after_error() {
    test_utils::init_logger();
    let ctx = CancellationToken::new();

    let mut bytes = test_utils::ReplyBuilder::new(1, 0)
        .push_part(
            PK_ERROR,
            1,
            test_utils::error_part_payload(&[(10, 0, 1, b"HY000", "boom")]),
        )
        .build();
    bytes.extend(test_utils::ReplyBuilder::new(1, 5).build());

    let mut reader = Reader::new_db(Cursor::new(bytes), false);
    assert!(reader.skip_parts(&ctx).is_err());
    // the next message on the same stream parses cleanly
    reader.skip_parts(&ctx).unwrap();
}
