use crate::protocol::encoding::Decoder;
use crate::protocol::parts::{HdbValue, ResultSetMetadata};
use crate::HdbResult;
use std::sync::Arc;

/// The rows of a result set, decoded against injected column metadata.
///
/// The result-set part cannot be decoded generically: the server sends the
/// metadata in a preceding part of the same message, and the caller has to
/// hand it in. The part's argument count is the number of rows in this
/// chunk; whether more chunks exist is visible in the part attributes of
/// the surrounding part header.
#[derive(Debug)]
pub struct ResultSet {
    metadata: Arc<ResultSetMetadata>,
    rows: Vec<Vec<HdbValue>>,
}

impl ResultSet {
    /// Prepares an empty result set that decodes against the given metadata.
    pub fn for_metadata(metadata: Arc<ResultSetMetadata>) -> Self {
        Self {
            metadata,
            rows: Vec::new(),
        }
    }

    pub fn metadata(&self) -> &ResultSetMetadata {
        &self.metadata
    }

    pub fn rows(&self) -> &[Vec<HdbValue>] {
        &self.rows
    }

    pub fn into_rows(self) -> Vec<Vec<HdbValue>> {
        self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub(crate) fn decode<R: std::io::Read>(
        &mut self,
        no_of_rows: usize,
        dec: &mut Decoder<R>,
    ) -> HdbResult<()> {
        debug!("ResultSet::decode() for {no_of_rows} rows");
        self.rows.reserve(no_of_rows);
        for _ in 0..no_of_rows {
            let mut row = Vec::with_capacity(self.metadata.len());
            for field in self.metadata.iter() {
                row.push(HdbValue::parse_result_value(
                    field.type_id(),
                    field.is_nullable(),
                    dec,
                )?);
            }
            self.rows.push(row);
        }
        dec.check()
    }
}
