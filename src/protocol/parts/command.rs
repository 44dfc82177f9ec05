use crate::protocol::encoding::{cesu8_length, Decoder, Encoder};
use crate::HdbResult;

/// SQL command text; CESU-8 on the wire, delimited by the part's declared
/// buffer length.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Command(String);

impl Command {
    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub(crate) fn size(&self) -> usize {
        cesu8_length(&self.0)
    }

    pub(crate) fn emit<W: std::io::Write>(&self, enc: &mut Encoder<W>) -> HdbResult<()> {
        enc.string(&self.0);
        Ok(())
    }

    pub(crate) fn decode<R: std::io::Read>(
        &mut self,
        buf_len: usize,
        dec: &mut Decoder<R>,
    ) -> HdbResult<()> {
        self.0 = dec.string(buf_len);
        dec.check()
    }
}

impl From<&str> for Command {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl From<String> for Command {
    fn from(s: String) -> Self {
        Self(s)
    }
}
