use crate::protocol::encoding::{cesu8_length, Decoder, Encoder};
use crate::protocol::parts::length_indicator;
use crate::HdbResult;
use std::collections::HashMap;

/// Session variables, transported as key/value string pairs.
///
/// The part's argument count is twice the number of pairs, since keys and
/// values are counted individually on the wire.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ClientInfo(HashMap<String, String>);

impl ClientInfo {
    pub fn set<K: Into<String>, V: Into<String>>(&mut self, key: K, value: V) {
        self.0.insert(key.into(), value.into());
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.0.get(key).map(String::as_str)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub(crate) fn count(&self) -> usize {
        self.0.len() * 2
    }

    pub(crate) fn size(&self) -> usize {
        let mut len = 0;
        for (key, value) in &self.0 {
            len += length_indicator::binary_length(cesu8_length(key))
                + length_indicator::binary_length(cesu8_length(value));
        }
        len
    }

    pub(crate) fn emit<W: std::io::Write>(&self, enc: &mut Encoder<W>) -> HdbResult<()> {
        for (key, value) in &self.0 {
            length_indicator::emit(cesu8_length(key), enc)?;
            enc.string(key);
            length_indicator::emit(cesu8_length(value), enc)?;
            enc.string(value);
        }
        Ok(())
    }

    pub(crate) fn decode<R: std::io::Read>(
        &mut self,
        no_of_args: usize,
        dec: &mut Decoder<R>,
    ) -> HdbResult<()> {
        self.0.clear();
        for _ in 0..no_of_args / 2 {
            let l8 = dec.u8();
            let key_len = length_indicator::parse(l8, dec)?;
            let key = dec.string(key_len);
            let l8 = dec.u8();
            let value_len = length_indicator::parse(l8, dec)?;
            let value = dec.string(value_len);
            self.0.insert(key, value);
        }
        dec.check()
    }
}

impl From<&HashMap<String, String>> for ClientInfo {
    fn from(map: &HashMap<String, String>) -> Self {
        Self(map.clone())
    }
}

impl std::fmt::Display for ClientInfo {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> Result<(), std::fmt::Error> {
        for (k, v) in &self.0 {
            writeln!(f, "{k} = {v}")?;
        }
        Ok(())
    }
}
