use crate::protocol::encoding::{Decoder, Encoder};
use crate::HdbResult;

/// Requests a chunk of LOB data from the server, addressed by locator.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ReadLobRequest {
    locator_id: u64,
    offset: u64,
    length: u32,
}

impl ReadLobRequest {
    pub fn new(locator_id: u64, offset: u64, length: u32) -> Self {
        trace!("ReadLobRequest::new() offset = {offset}, length = {length}");
        Self {
            locator_id,
            offset,
            length,
        }
    }

    pub fn locator_id(&self) -> u64 {
        self.locator_id
    }

    pub(crate) fn size() -> usize {
        24
    }

    pub(crate) fn emit<W: std::io::Write>(&self, enc: &mut Encoder<W>) -> HdbResult<()> {
        enc.u64(self.locator_id); // I8
        enc.u64(self.offset); // I8
        enc.u32(self.length); // I4
        enc.u32(0); // I4 filler
        Ok(())
    }

    pub(crate) fn decode<R: std::io::Read>(&mut self, dec: &mut Decoder<R>) -> HdbResult<()> {
        self.locator_id = dec.u64();
        self.offset = dec.u64();
        self.length = dec.u32();
        dec.skip(4); // filler
        dec.check()
    }
}

/// One chunk of LOB data, returned for a `ReadLobRequest`.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ReadLobReply {
    locator_id: u64,
    is_last_data: bool,
    data: Vec<u8>,
}

impl ReadLobReply {
    pub fn locator_id(&self) -> u64 {
        self.locator_id
    }

    pub fn is_last_data(&self) -> bool {
        self.is_last_data
    }

    pub fn data(&self) -> &[u8] {
        &self.data
    }

    pub fn into_data_and_last(self) -> (Vec<u8>, bool) {
        (self.data, self.is_last_data)
    }

    pub(crate) fn decode<R: std::io::Read>(&mut self, dec: &mut Decoder<R>) -> HdbResult<()> {
        self.locator_id = dec.u64(); // I8
        let options = dec.u8(); // I1
        self.is_last_data = (options & 0b100_u8) != 0;
        let chunk_length = usize::try_from(dec.i32()).unwrap_or(0); // I4
        dec.skip(3); // B3 filler
        self.data = dec.bytes(chunk_length); // B[chunk_length]
        dec.check()
    }
}
