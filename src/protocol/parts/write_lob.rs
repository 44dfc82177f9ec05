use crate::protocol::encoding::{Decoder, Encoder};
use crate::HdbResult;

/// Sends a chunk of LOB data to the server, addressed by locator.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct WriteLobRequest {
    locator_id: u64,
    offset: i64,
    data: Vec<u8>,
    last_data: bool,
}

impl WriteLobRequest {
    pub fn new(locator_id: u64, offset: i64, data: Vec<u8>, last_data: bool) -> Self {
        trace!(
            "WriteLobRequest::new() offset = {offset}, data length = {}, last_data = {last_data}",
            data.len()
        );
        Self {
            locator_id,
            offset,
            data,
            last_data,
        }
    }

    pub fn locator_id(&self) -> u64 {
        self.locator_id
    }

    pub fn data(&self) -> &[u8] {
        &self.data
    }

    pub(crate) fn size(&self) -> usize {
        21 + self.data.len()
    }

    #[allow(clippy::cast_possible_truncation)]
    pub(crate) fn emit<W: std::io::Write>(&self, enc: &mut Encoder<W>) -> HdbResult<()> {
        // 1: NULL (not used here), 2: DATA_INCLUDED, 4: LASTDATA
        let options = if self.last_data { 6 } else { 2 };
        enc.u64(self.locator_id); // I8
        enc.u8(options); // I1
        enc.i64(self.offset); // I8
        enc.u32(self.data.len() as u32); // I4
        enc.bytes(&self.data);
        Ok(())
    }

    pub(crate) fn decode<R: std::io::Read>(&mut self, dec: &mut Decoder<R>) -> HdbResult<()> {
        self.locator_id = dec.u64();
        let options = dec.u8();
        self.last_data = (options & 0b100) != 0;
        self.offset = dec.i64();
        let chunk_length = dec.u32();
        self.data = dec.bytes(chunk_length as usize);
        dec.check()
    }
}

/// The locators the server confirms after write-lob requests.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct WriteLobReply {
    locator_ids: Vec<u64>,
}

impl WriteLobReply {
    pub fn locator_ids(&self) -> &[u64] {
        &self.locator_ids
    }

    pub fn into_locator_ids(self) -> Vec<u64> {
        self.locator_ids
    }

    pub(crate) fn decode<R: std::io::Read>(
        &mut self,
        no_of_args: usize,
        dec: &mut Decoder<R>,
    ) -> HdbResult<()> {
        debug!("WriteLobReply::decode() with count = {no_of_args}");
        self.locator_ids.clear();
        for _ in 0..no_of_args {
            self.locator_ids.push(dec.u64()); // I8
        }
        dec.check()
    }
}
