//! Variable-length counts with explicit tag bytes.
//!
//! Lengths up to 245 are encoded directly in one byte; the tags 246 and 247
//! announce a 16-bit resp. 32-bit little-endian length; 255 marks a NULL
//! value in value encodings.

use crate::protocol::encoding::{Decoder, Encoder};
use crate::{HdbError, HdbResult};

pub(crate) const MAX_1_BYTE_LENGTH: u8 = 245;
const LENGTH_INDICATOR_2BYTE: u8 = 246;
const LENGTH_INDICATOR_4BYTE: u8 = 247;
pub(crate) const LENGTH_INDICATOR_NULL: u8 = 255;

#[allow(clippy::cast_possible_truncation)]
pub(crate) fn emit<W: std::io::Write>(l: usize, enc: &mut Encoder<W>) -> HdbResult<()> {
    match l {
        l if l <= MAX_1_BYTE_LENGTH as usize => enc.u8(l as u8),
        l if l <= 0xFFFF => {
            enc.u8(LENGTH_INDICATOR_2BYTE);
            enc.u16(l as u16);
        }
        l if l <= 0xFFFF_FFFF => {
            enc.u8(LENGTH_INDICATOR_4BYTE);
            enc.u32(l as u32);
        }
        l => {
            return Err(HdbError::ImplDetailed(format!("value too big: {l}")));
        }
    }
    Ok(())
}

/// Interprets `l8` (the already-consumed first byte) and reads the extension
/// bytes if `l8` is one of the width tags.
pub(crate) fn parse<R: std::io::Read>(l8: u8, dec: &mut Decoder<R>) -> HdbResult<usize> {
    match l8 {
        0..=MAX_1_BYTE_LENGTH => Ok(l8 as usize),
        LENGTH_INDICATOR_2BYTE => Ok(dec.u16() as usize),
        LENGTH_INDICATOR_4BYTE => Ok(dec.u32() as usize),
        _ => Err(HdbError::ImplDetailed(format!(
            "invalid length indicator: {l8}",
        ))),
    }
}

/// Number of bytes needed to encode a length indicator plus `l` payload bytes.
pub(crate) fn binary_length(l: usize) -> usize {
    match l {
        l if l <= MAX_1_BYTE_LENGTH as usize => 1 + l,
        l if l <= 0xFFFF => 3 + l,
        l => 5 + l,
    }
}

#[cfg(test)]
mod test {
    use super::{binary_length, emit, parse};
    use crate::protocol::encoding::{Cesu8Transcoder, Decoder, Encoder};

    #[test]
    fn test_roundtrip_all_widths() {
        for len in [0_usize, 1, 245, 246, 0xFFFF, 0x10000, 0xAB_CDEF] {
            let mut enc = Encoder::new(Vec::new(), Box::new(Cesu8Transcoder));
            emit(len, &mut enc).unwrap();
            assert_eq!(enc.cnt(), binary_length(len) - len);

            let mut dec = Decoder::new(
                std::io::Cursor::new(enc.into_inner()),
                Box::new(Cesu8Transcoder),
            );
            let l8 = dec.u8();
            assert_eq!(parse(l8, &mut dec).unwrap(), len);
        }
    }
}
