mod test_utils;

use hdbwire::{CancellationToken, MessageType, Part, Reader, Writer};
use std::io::Cursor;

// The client opens with the 14-byte init request; the server echoes an init
// reply. Afterwards regular messages are permitted.
#[test]
fn test_prolog_roundtrip() {
    test_utils::init_logger();
    let ctx = CancellationToken::new();

    let mut writer = Writer::new(Vec::<u8>::new(), true);
    writer.write_prolog(&ctx).unwrap();

    // subsequent messages are permitted
    writer
        .write(
            &ctx,
            -1,
            MessageType::ExecuteDirect,
            false,
            &[Part::Command("select 1 from dummy".into())],
        )
        .unwrap();

    let bytes = writer.into_inner();
    assert_eq!(&bytes[0..4], &(-1_i32).to_be_bytes()); // init filler
    assert_eq!(bytes[4], 4); // product major
    assert_eq!(&bytes[5..7], &20_i16.to_be_bytes()); // product minor
    assert_eq!(bytes[7], 4); // protocol major
    assert_eq!(&bytes[8..10], &1_i16.to_be_bytes()); // protocol minor
    assert_eq!(bytes[13], 1); // endianness: little

    // the client-side reader accepts the prolog and then iterates the message
    let mut reader = Reader::new_client(Cursor::new(bytes), true);
    reader.read_prolog(&ctx).unwrap();
    let mut seen = Vec::new();
    reader
        .iterate_parts(&ctx, |kind, _attrs, _part_read| {
            seen.push(kind);
            Ok(())
        })
        .unwrap();
    assert_eq!(seen, vec![hdbwire::PartKind::Command]);
    assert_eq!(reader.session_id(), -1);
}

#[test]
fn test_cancelled_before_prolog() {
    test_utils::init_logger();
    let ctx = CancellationToken::new();
    ctx.cancel();

    let mut writer = Writer::new(Vec::<u8>::new(), false);
    assert!(matches!(
        writer.write_prolog(&ctx),
        Err(hdbwire::HdbError::Cancelled)
    ));
}
