use crate::protocol::encoding::Decoder;
use crate::protocol::parts::{HdbValue, ParameterDescriptors};
use crate::HdbResult;
use std::sync::Arc;

/// The values of the INOUT and OUT parameters of a procedure call.
///
/// Like the result-set part, this part needs injected metadata (the
/// parameter descriptors of the prepared statement) and can therefore not be
/// decoded generically.
#[derive(Debug)]
pub struct OutputParameters {
    descriptors: Arc<ParameterDescriptors>,
    values: Vec<HdbValue>,
}

impl OutputParameters {
    pub fn for_descriptors(descriptors: Arc<ParameterDescriptors>) -> Self {
        Self {
            descriptors,
            values: Vec::new(),
        }
    }

    pub fn descriptors(&self) -> &ParameterDescriptors {
        &self.descriptors
    }

    pub fn values(&self) -> &[HdbValue] {
        &self.values
    }

    pub fn into_values(self) -> Vec<HdbValue> {
        self.values
    }

    pub(crate) fn decode<R: std::io::Read>(&mut self, dec: &mut Decoder<R>) -> HdbResult<()> {
        trace!("OutputParameters::decode()");
        let out_fields: Vec<_> = self.descriptors.iter_out().collect();
        self.values.reserve(out_fields.len());
        for descriptor in out_fields {
            self.values.push(HdbValue::parse_result_value(
                descriptor.type_id(),
                descriptor.is_nullable(),
                dec,
            )?);
        }
        dec.check()
    }
}
