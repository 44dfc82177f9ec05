use crate::protocol::encoding::Decoder;
use crate::protocol::parts::option_part::{OptionId, OptionPart};
use crate::HdbResult;
use std::{fmt::Debug, hash::Hash};

/// Option part with one option set per row; used for topology information,
/// where each row describes one server node.
#[derive(Debug, Default)]
pub struct MultilineOptionPart<T: OptionId<T> + Debug + Eq + PartialEq + Hash>(Vec<OptionPart<T>>);

impl<T: OptionId<T> + Debug + Eq + PartialEq + Hash> MultilineOptionPart<T> {
    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn lines(&self) -> &[OptionPart<T>] {
        &self.0
    }

    pub(crate) fn parse<R: std::io::Read>(
        no_of_lines: usize,
        dec: &mut Decoder<R>,
    ) -> HdbResult<Self> {
        let mut option_parts = Vec::<OptionPart<T>>::with_capacity(no_of_lines);
        for _ in 0..no_of_lines {
            let field_count = dec.u16() as usize;
            option_parts.push(OptionPart::<T>::parse(field_count, dec)?);
        }
        Ok(Self(option_parts))
    }
}
