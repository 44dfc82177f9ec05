use crate::{HdbError, HdbResult};

/// Converts text payloads between their wire representation and UTF-8.
///
/// HANA sends and expects CESU-8; [`Cesu8Transcoder`] is the implementation
/// used in production. The trait exists so that trace tooling and tests can
/// plug in a pass-through or fault-injecting variant.
pub trait Transcoder: std::fmt::Debug + Send {
    /// Wire bytes → UTF-8.
    fn decode(&self, bytes: Vec<u8>) -> HdbResult<String>;

    /// UTF-8 → wire bytes.
    fn encode(&self, s: &str) -> Vec<u8>;
}

/// The production transcoder: CESU-8 on the wire, UTF-8 in the API.
#[derive(Debug, Default)]
pub struct Cesu8Transcoder;

impl Transcoder for Cesu8Transcoder {
    fn decode(&self, bytes: Vec<u8>) -> HdbResult<String> {
        string_from_cesu8(bytes)
    }

    fn encode(&self, s: &str) -> Vec<u8> {
        cesu8::to_cesu8(s).into_owned()
    }
}

// Consumes the cesu8 bytes, returns a String with minimal allocation
pub(crate) fn string_from_cesu8(bytes: Vec<u8>) -> HdbResult<String> {
    match String::from_utf8(bytes) {
        Ok(s) => Ok(s),
        Err(e) => cesu8::from_cesu8(e.as_bytes())
            .map(|cow| cow.to_string())
            .map_err(|_| HdbError::Cesu8),
    }
}

/// cesu-8 is identical to utf-8, except for high code points
/// which consume 4 bytes in utf-8 and 6 in cesu-8;
/// the first byte of such a code point in utf8 has the bit pattern 11110xxx
/// (240 - 247)
pub(crate) fn cesu8_length(s: &str) -> usize {
    let mut len = s.len();
    for b in s.as_bytes() {
        if *b >= 240_u8 {
            len += 2;
        }
    }
    len
}

#[cfg(test)]
mod test {
    use super::{cesu8_length, string_from_cesu8, Cesu8Transcoder, Transcoder};

    #[test]
    fn test_cesu8_length_matches_encoding() {
        for s in ["", "hello", "grüße", "💩 in the wire", "a💩b💩"] {
            assert_eq!(cesu8_length(s), cesu8::to_cesu8(s).len());
        }
    }

    #[test]
    fn test_transcoder_roundtrip() {
        let transcoder = Cesu8Transcoder;
        let s = "emoji beyond the BMP: 💩, umlauts: äöü";
        let wire = transcoder.encode(s);
        assert_eq!(transcoder.decode(wire).unwrap(), s);
    }

    #[test]
    fn test_invalid_cesu8_is_an_error() {
        assert!(string_from_cesu8(vec![0xED, 0xA0, 0x80]).is_err());
    }
}
