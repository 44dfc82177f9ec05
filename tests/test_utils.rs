// Shared helpers for the integration tests.
#![allow(dead_code)]

use byteorder::{LittleEndian, WriteBytesExt};
use std::io::Write;

pub fn init_logger() {
    static START: std::sync::Once = std::sync::Once::new();
    START.call_once(|| {
        if let Ok(logger) = flexi_logger::Logger::try_with_env_or_str("info") {
            if let Ok(handle) = logger.start() {
                // keep the logger alive for the duration of the test process
                std::mem::forget(handle);
            }
        }
    });
}

const MESSAGE_HEADER_SIZE: usize = 32;
const SEGMENT_HEADER_SIZE: usize = 24;
const PART_HEADER_SIZE: usize = 16;

fn pad_to_8(n: usize) -> usize {
    (8 - n % 8) % 8
}

pub struct RawPart {
    pub kind: i8,
    pub attributes: u8,
    pub num_arg: i32,
    pub payload: Vec<u8>,
}

/// Builds the byte image of a server reply message (one segment), the way
/// the database emits it: little-endian headers, parts padded to 8-byte
/// boundaries.
pub struct ReplyBuilder {
    session_id: i64,
    function_code: i16,
    parts: Vec<RawPart>,
}

impl ReplyBuilder {
    pub fn new(session_id: i64, function_code: i16) -> Self {
        Self {
            session_id,
            function_code,
            parts: Vec::new(),
        }
    }

    pub fn push_part(mut self, kind: i8, num_arg: i32, payload: Vec<u8>) -> Self {
        self.parts.push(RawPart {
            kind,
            attributes: 0,
            num_arg,
            payload,
        });
        self
    }

    pub fn build(self) -> Vec<u8> {
        let var_part_length: usize = SEGMENT_HEADER_SIZE
            + self
                .parts
                .iter()
                .map(|p| PART_HEADER_SIZE + p.payload.len() + pad_to_8(p.payload.len()))
                .sum::<usize>();

        let mut w = Vec::new();

        // MESSAGE HEADER
        w.write_i64::<LittleEndian>(self.session_id).unwrap();
        w.write_i32::<LittleEndian>(0).unwrap(); // packet count
        w.write_u32::<LittleEndian>(var_part_length as u32).unwrap();
        w.write_u32::<LittleEndian>(var_part_length as u32).unwrap();
        w.write_i16::<LittleEndian>(1).unwrap(); // no_of_segm
        w.write_all(&[0_u8; 10]).unwrap();

        // SEGMENT HEADER (reply form)
        w.write_i32::<LittleEndian>(var_part_length as i32).unwrap();
        w.write_i32::<LittleEndian>(0).unwrap(); // segment offset
        w.write_i16::<LittleEndian>(self.parts.len() as i16).unwrap();
        w.write_i16::<LittleEndian>(1).unwrap(); // segment no
        w.write_i8(2).unwrap(); // segment kind reply
        w.write_u8(0).unwrap(); // reserved
        w.write_i16::<LittleEndian>(self.function_code).unwrap();
        w.write_all(&[0_u8; 8]).unwrap();

        let mut remaining =
            var_part_length - SEGMENT_HEADER_SIZE;
        for part in &self.parts {
            // PART HEADER
            w.write_i8(part.kind).unwrap();
            w.write_u8(part.attributes).unwrap();
            if part.num_arg < i32::from(i16::MAX) {
                w.write_i16::<LittleEndian>(part.num_arg as i16).unwrap();
                w.write_i32::<LittleEndian>(0).unwrap();
            } else {
                w.write_i16::<LittleEndian>(-1).unwrap();
                w.write_i32::<LittleEndian>(part.num_arg).unwrap();
            }
            w.write_i32::<LittleEndian>(part.payload.len() as i32).unwrap();
            w.write_i32::<LittleEndian>(remaining as i32).unwrap();

            w.write_all(&part.payload).unwrap();
            w.write_all(&vec![0_u8; pad_to_8(part.payload.len())]).unwrap();

            remaining -= PART_HEADER_SIZE + part.payload.len() + pad_to_8(part.payload.len());
        }

        w
    }
}

/// Payload image of an error part with the given records
/// `(code, position, severity, sqlstate, text)`.
pub fn error_part_payload(records: &[(i32, i32, i8, &[u8; 5], &str)]) -> Vec<u8> {
    let mut w = Vec::new();
    for (i, (code, position, severity, sqlstate, text)) in records.iter().enumerate() {
        w.write_i32::<LittleEndian>(*code).unwrap();
        w.write_i32::<LittleEndian>(*position).unwrap();
        w.write_i32::<LittleEndian>(text.len() as i32).unwrap();
        w.write_i8(*severity).unwrap();
        w.write_all(*sqlstate).unwrap();
        w.write_all(text.as_bytes()).unwrap();
        if i + 1 < records.len() {
            w.write_all(&vec![0_u8; pad_to_8(18 + text.len())]).unwrap();
        }
    }
    w
}

/// Payload image of a rows-affected part.
pub fn rows_affected_payload(rows: &[i32]) -> Vec<u8> {
    let mut w = Vec::new();
    for row in rows {
        w.write_i32::<LittleEndian>(*row).unwrap();
    }
    w
}

/// Payload image of a result-set-metadata part with one INT column named `name`.
pub fn int_column_metadata_payload(name: &str, nullable: bool) -> Vec<u8> {
    let mut w = Vec::new();
    w.write_u8(if nullable { 0b10 } else { 0 }).unwrap(); // column options
    w.write_u8(3).unwrap(); // type code INT
    w.write_i16::<LittleEndian>(0).unwrap(); // scale
    w.write_i16::<LittleEndian>(10).unwrap(); // precision
    w.write_i16::<LittleEndian>(0).unwrap(); // filler
    w.write_u32::<LittleEndian>(u32::MAX).unwrap(); // tablename offset
    w.write_u32::<LittleEndian>(u32::MAX).unwrap(); // schemaname offset
    w.write_u32::<LittleEndian>(0).unwrap(); // columnname offset
    w.write_u32::<LittleEndian>(0).unwrap(); // displayname offset
    w.write_u8(name.len() as u8).unwrap();
    w.write_all(name.as_bytes()).unwrap();
    w
}

/// Payload image of a result-set part with one INT column and the given rows.
pub fn int_rows_payload(values: &[i32]) -> Vec<u8> {
    let mut w = Vec::new();
    for v in values {
        w.write_u8(1).unwrap(); // null indicator: value present
        w.write_i32::<LittleEndian>(*v).unwrap();
    }
    w
}
