mod test_utils;

use hdbwire::protocol::parts::{OptionValue, StatementContext, StatementContextId};
use hdbwire::{
    CancellationToken, HdbValue, MessageType, ParameterDescriptor, ParameterDescriptors,
    ParameterRows, Part, PartKind, Reader, TypeId, Writer,
};
use std::collections::HashMap;
use std::io::Cursor;
use std::sync::Arc;

const MESSAGE_HEADER_SIZE: usize = 32;
const SEGMENT_HEADER_SIZE: usize = 24;
const PART_HEADER_SIZE: usize = 16;

fn le_u32(bytes: &[u8], ofs: usize) -> u32 {
    u32::from_le_bytes(bytes[ofs..ofs + 4].try_into().unwrap())
}
fn le_i32(bytes: &[u8], ofs: usize) -> i32 {
    i32::from_le_bytes(bytes[ofs..ofs + 4].try_into().unwrap())
}
fn le_i16(bytes: &[u8], ofs: usize) -> i16 {
    i16::from_le_bytes(bytes[ofs..ofs + 2].try_into().unwrap())
}

// An input-parameters part with 70 000 rows must use the big argument-count
// form (16-bit slot = -1, 32-bit slot = 70 000) and round-trip.
#[test]
fn test_big_num_arg_parameter_rows() {
    test_utils::init_logger();
    let ctx = CancellationToken::new();

    let descriptors = Arc::new(ParameterDescriptors::from_descriptors(vec![
        ParameterDescriptor::new_in(TypeId::INT, false),
    ]));

    const NUM_ROWS: usize = 70_000;
    let mut rows = ParameterRows::new(Arc::clone(&descriptors));
    for i in 0..NUM_ROWS {
        rows.push(vec![HdbValue::INT(i as i32)]).unwrap();
    }

    let mut writer = Writer::new(Vec::<u8>::new(), false);
    writer
        .write(&ctx, 1, MessageType::Execute, false, &[Part::ParameterRows(rows)])
        .unwrap();
    let bytes = writer.into_inner();

    // part header of the first (only) part
    let ph_ofs = MESSAGE_HEADER_SIZE + SEGMENT_HEADER_SIZE;
    assert_eq!(bytes[ph_ofs] as i8, 32); // PartKind::Parameters
    assert_eq!(le_i16(&bytes, ph_ofs + 2), -1); // argument count: big form
    assert_eq!(le_i32(&bytes, ph_ofs + 4), NUM_ROWS as i32); // big argument count

    // round-trip decode yields the same rows
    let mut reader = Reader::new_client(Cursor::new(bytes), false);
    let mut o_rows: Option<ParameterRows> = None;
    reader
        .iterate_parts(&ctx, |kind, _attrs, part_read| {
            if kind == PartKind::Parameters {
                let mut part =
                    Part::ParameterRows(ParameterRows::new(Arc::clone(&descriptors)));
                part_read.read(&mut part)?;
                if let Part::ParameterRows(pr) = part {
                    o_rows = Some(pr);
                }
            }
            Ok(())
        })
        .unwrap();

    let decoded = o_rows.unwrap();
    assert_eq!(decoded.count(), NUM_ROWS);
    assert_eq!(decoded.rows()[0], vec![HdbValue::INT(0)]);
    assert_eq!(decoded.rows()[69_999], vec![HdbValue::INT(69_999)]);
}

// Framing conservation: the message-header var-part length equals the sum of
// all part headers, payloads and paddings plus the segment header; padding
// bytes are zero.
#[test]
fn test_framing_conservation_and_zero_padding() {
    test_utils::init_logger();
    let ctx = CancellationToken::new();

    let command = "select 1 ab x"; // 13 bytes, forces a 3-byte pad
    let mut statement_context = StatementContext::default();
    statement_context.set_statement_sequence_info(42);

    let mut writer = Writer::new(Vec::<u8>::new(), false);
    writer
        .write(
            &ctx,
            7,
            MessageType::ExecuteDirect,
            true,
            &[
                Part::Command(command.into()),
                Part::StatementContext(statement_context),
                Part::FetchSize(32),
            ],
        )
        .unwrap();
    let bytes = writer.into_inner();

    let var_part_length = le_u32(&bytes, 16) as usize;
    assert_eq!(bytes.len(), MESSAGE_HEADER_SIZE + var_part_length);

    // walk the parts and re-derive the length
    let mut expected = SEGMENT_HEADER_SIZE;
    let mut ofs = MESSAGE_HEADER_SIZE + SEGMENT_HEADER_SIZE;
    let no_of_parts = le_i16(&bytes, MESSAGE_HEADER_SIZE + 8);
    for _ in 0..no_of_parts {
        let buffer_length = le_i32(&bytes, ofs + 8) as usize;
        let padded = buffer_length + (8 - buffer_length % 8) % 8;
        // padding bytes are zero
        for pad_byte in &bytes[ofs + PART_HEADER_SIZE + buffer_length..ofs + PART_HEADER_SIZE + padded]
        {
            assert_eq!(*pad_byte, 0);
        }
        expected += PART_HEADER_SIZE + padded;
        ofs += PART_HEADER_SIZE + padded;
    }
    assert_eq!(var_part_length, expected);
}

// Session variables are piggybacked exactly once, as a client-info part on
// the first message whose type supports client info.
#[test]
fn test_session_variables_are_sent_once() {
    test_utils::init_logger();
    let ctx = CancellationToken::new();

    let mut sv = HashMap::new();
    sv.insert("APPLICATION".to_string(), "hdbwire-tests".to_string());

    let mut writer = Writer::new(Vec::<u8>::new(), false).with_session_variables(sv);

    // Disconnect does not support client info: nothing is piggybacked
    writer
        .write(&ctx, 1, MessageType::Disconnect, false, &[])
        .unwrap();
    // the first supporting message carries the client-info part
    writer
        .write(
            &ctx,
            1,
            MessageType::ExecuteDirect,
            false,
            &[Part::Command("select 1 from dummy".into())],
        )
        .unwrap();
    // and the next one does not repeat it
    writer
        .write(
            &ctx,
            1,
            MessageType::ExecuteDirect,
            false,
            &[Part::Command("select 2 from dummy".into())],
        )
        .unwrap();

    let bytes = writer.into_inner();
    let mut reader = Reader::new_client(Cursor::new(bytes), false);
    let mut messages = Vec::new();
    for _ in 0..3 {
        let mut kinds = Vec::new();
        reader
            .iterate_parts(&ctx, |kind, _attrs, _part_read| {
                kinds.push(kind);
                Ok(())
            })
            .unwrap();
        messages.push(kinds);
    }
    assert_eq!(messages[0], vec![]);
    assert_eq!(messages[1], vec![PartKind::ClientInfo, PartKind::Command]);
    assert_eq!(messages[2], vec![PartKind::Command]);
}

// Round-trip through writer and reader for the client-encodable parts.
#[test]
fn test_encodable_parts_roundtrip() {
    test_utils::init_logger();
    let ctx = CancellationToken::new();

    let mut auth_fields = hdbwire::AuthFields::default();
    auth_fields.push_string("fake-user");
    auth_fields.push(vec![1, 2, 3]);

    let mut client_info = hdbwire::ClientInfo::default();
    client_info.set("APPLICATIONUSER", "tester");

    let mut statement_context = StatementContext::default();
    statement_context.insert(
        StatementContextId::StatementSequenceInfo,
        OptionValue::BIGINT(4711),
    );

    let parts = vec![
        Part::Auth(auth_fields),
        Part::ClientId("4711@localhost".into()),
        Part::ClientInfo(client_info),
        Part::Command("select * from grüße".into()),
        Part::FetchSize(1000),
        Part::StatementId(u64::MAX),
        Part::ResultSetId(12345),
        Part::ReadLobRequest(hdbwire::protocol::parts::ReadLobRequest::new(9, 1024, 4096)),
        Part::WriteLobRequest(hdbwire::protocol::parts::WriteLobRequest::new(
            9,
            0,
            vec![0xDE, 0xAD],
            true,
        )),
        Part::StatementContext(statement_context),
    ];

    let mut writer = Writer::new(Vec::<u8>::new(), true);
    writer
        .write(&ctx, 1, MessageType::Execute, false, &parts)
        .unwrap();
    let bytes = writer.into_inner();

    let mut reader = Reader::new_client(Cursor::new(bytes), true);
    let mut decoded = Vec::new();
    reader
        .iterate_parts(&ctx, |kind, _attrs, part_read| {
            let mut part = match kind {
                PartKind::Authentication => Part::Auth(hdbwire::AuthFields::default()),
                _ => kind
                    .try_default_part()
                    .unwrap_or_else(|| panic!("no generic decoder for {kind:?}")),
            };
            part_read.read(&mut part)?;
            decoded.push(part);
            Ok(())
        })
        .unwrap();

    assert_eq!(decoded.len(), parts.len());
    for (sent, received) in parts.iter().zip(decoded.iter()) {
        assert_eq!(sent.kind(), received.kind());
        match (sent, received) {
            (Part::Auth(a), Part::Auth(b)) => assert_eq!(a, b),
            (Part::ClientId(a), Part::ClientId(b)) => assert_eq!(a, b),
            (Part::ClientInfo(a), Part::ClientInfo(b)) => assert_eq!(a, b),
            (Part::Command(a), Part::Command(b)) => assert_eq!(a, b),
            (Part::FetchSize(a), Part::FetchSize(b)) => assert_eq!(a, b),
            (Part::StatementId(a), Part::StatementId(b)) => assert_eq!(a, b),
            (Part::ResultSetId(a), Part::ResultSetId(b)) => assert_eq!(a, b),
            (Part::ReadLobRequest(a), Part::ReadLobRequest(b)) => assert_eq!(a, b),
            (Part::WriteLobRequest(a), Part::WriteLobRequest(b)) => assert_eq!(a, b),
            (Part::StatementContext(a), Part::StatementContext(b)) => assert_eq!(a, b),
            (a, b) => panic!("unexpected part combination {a:?} / {b:?}"),
        }
    }
}
