use crate::protocol::encoding::{Decoder, Encoder};
use crate::protocol::parts::length_indicator;
use crate::HdbResult;

/// Authentication data as transported on the wire: a list of opaque byte
/// fields. Computing their content (SCRAM rounds etc.) is the business of
/// the authentication layer; the codec only frames them.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct AuthFields(Vec<Vec<u8>>);

impl AuthFields {
    pub fn with_capacity(count: usize) -> Self {
        Self(Vec::with_capacity(count))
    }

    pub fn push(&mut self, field: Vec<u8>) {
        self.0.push(field);
    }

    pub fn push_string(&mut self, s: &str) {
        self.0.push(s.as_bytes().to_vec());
    }

    pub fn pop(&mut self) -> Option<Vec<u8>> {
        self.0.pop()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub(crate) fn size(&self) -> usize {
        let mut size = 2;
        for field in &self.0 {
            size += length_indicator::binary_length(field.len());
        }
        size
    }

    #[allow(clippy::cast_possible_truncation)]
    #[allow(clippy::cast_possible_wrap)]
    pub(crate) fn emit<W: std::io::Write>(&self, enc: &mut Encoder<W>) -> HdbResult<()> {
        enc.i16(self.0.len() as i16); // I2
        for field in &self.0 {
            length_indicator::emit(field.len(), enc)?;
            enc.bytes(field); // B (varying)
        }
        Ok(())
    }

    pub(crate) fn decode<R: std::io::Read>(&mut self, dec: &mut Decoder<R>) -> HdbResult<()> {
        let field_count = dec.u16() as usize; // I2
        self.0.clear();
        self.0.reserve(field_count);
        for _ in 0..field_count {
            let l8 = dec.u8();
            let len = length_indicator::parse(l8, dec)?;
            self.0.push(dec.bytes(len));
        }
        dec.check()
    }
}

#[cfg(test)]
mod test {
    use super::AuthFields;
    use crate::protocol::encoding::{Cesu8Transcoder, Decoder, Encoder};

    #[test]
    fn test_roundtrip() {
        let mut fields = AuthFields::default();
        fields.push_string("SCRAMPBKDF2SHA256");
        fields.push(vec![0_u8; 300]); // forces the 2-byte length indicator

        let mut enc = Encoder::new(Vec::new(), Box::new(Cesu8Transcoder));
        fields.emit(&mut enc).unwrap();
        assert_eq!(enc.cnt(), fields.size());

        let mut dec = Decoder::new(
            std::io::Cursor::new(enc.into_inner()),
            Box::new(Cesu8Transcoder),
        );
        let mut parsed = AuthFields::default();
        parsed.decode(&mut dec).unwrap();
        assert_eq!(parsed, fields);
    }
}
