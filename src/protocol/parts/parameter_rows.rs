use crate::protocol::encoding::{Decoder, Encoder};
use crate::protocol::parts::{HdbValue, ParameterDescriptors};
use crate::{HdbError, HdbResult};
use std::sync::Arc;

/// Implementation of the Parameters part: rows of input parameters.
///
/// The argument count of the part is the number of rows; each row carries one
/// value per IN/INOUT descriptor, in descriptor order. The descriptors are
/// attached at construction so that sizing and encoding need no further
/// context.
#[derive(Debug)]
pub struct ParameterRows {
    descriptors: Arc<ParameterDescriptors>,
    rows: Vec<Vec<HdbValue>>,
}

impl ParameterRows {
    pub fn new(descriptors: Arc<ParameterDescriptors>) -> Self {
        Self {
            descriptors,
            rows: Vec::new(),
        }
    }

    /// Appends one row of input values. The row must carry exactly one value
    /// per IN/INOUT parameter.
    pub fn push(&mut self, row: Vec<HdbValue>) -> HdbResult<()> {
        if row.len() != self.descriptors.iter_in().count() {
            return Err(HdbError::Usage(
                "parameter row does not match the input descriptors",
            ));
        }
        self.rows.push(row);
        Ok(())
    }

    pub fn count(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn rows(&self) -> &[Vec<HdbValue>] {
        &self.rows
    }

    pub(crate) fn size(&self) -> HdbResult<usize> {
        let mut size = 0;
        for row in &self.rows {
            for (value, descriptor) in row.iter().zip(self.descriptors.iter_in()) {
                size += value.size(descriptor.type_id())?;
            }
        }
        Ok(size)
    }

    pub(crate) fn emit<W: std::io::Write>(&self, enc: &mut Encoder<W>) -> HdbResult<()> {
        for row in &self.rows {
            for (value, descriptor) in row.iter().zip(self.descriptors.iter_in()) {
                value.emit_param_value(descriptor.type_id(), enc)?;
            }
        }
        Ok(())
    }

    pub(crate) fn decode<R: std::io::Read>(
        &mut self,
        no_of_rows: usize,
        dec: &mut Decoder<R>,
    ) -> HdbResult<()> {
        let row_width = self.descriptors.iter_in().count();
        self.rows.reserve(no_of_rows);
        for _ in 0..no_of_rows {
            let mut row = Vec::with_capacity(row_width);
            for _ in 0..row_width {
                row.push(HdbValue::parse_param_value(dec)?);
            }
            self.rows.push(row);
        }
        dec.check()
    }
}
