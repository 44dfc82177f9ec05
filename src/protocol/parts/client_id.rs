use crate::protocol::encoding::{Decoder, Encoder};
use crate::HdbResult;

/// Identifies the client connection towards the server,
/// conventionally as `<pid>@<hostname>`.
///
/// The payload is raw bytes; its extent is given by the part's declared
/// buffer length.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ClientId(Vec<u8>);

impl ClientId {
    pub fn new(id: Vec<u8>) -> Self {
        Self(id)
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    pub(crate) fn size(&self) -> usize {
        self.0.len()
    }

    pub(crate) fn emit<W: std::io::Write>(&self, enc: &mut Encoder<W>) -> HdbResult<()> {
        enc.bytes(&self.0);
        Ok(())
    }

    pub(crate) fn decode<R: std::io::Read>(
        &mut self,
        buf_len: usize,
        dec: &mut Decoder<R>,
    ) -> HdbResult<()> {
        self.0 = dec.bytes(buf_len);
        dec.check()
    }
}

impl From<&str> for ClientId {
    fn from(s: &str) -> Self {
        Self(s.as_bytes().to_vec())
    }
}
