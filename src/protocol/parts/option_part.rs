use crate::protocol::encoding::{Decoder, Encoder};
use crate::protocol::parts::option_value::OptionValue;
use crate::{HdbError, HdbResult};
use std::collections::hash_map::{IntoIter, Iter};
use std::collections::HashMap;
use std::fmt::Debug;
use std::hash::Hash;

/// The key space of a concrete option part.
pub trait OptionId<T: OptionId<T>> {
    fn from_u8(i: u8) -> T;
    fn to_u8(&self) -> u8;
    fn part_type(&self) -> &'static str;
}

/// Generic option part: a set of (one-byte id, typed value) entries.
///
/// Several part kinds share this shape and differ only in their id space
/// (connect options, client context, transaction flags, ...).
#[derive(Clone, Debug, PartialEq)]
pub struct OptionPart<T: OptionId<T> + Debug + Eq + PartialEq + Hash>(HashMap<T, OptionValue>);

impl<T: OptionId<T> + Debug + Eq + PartialEq + Hash> Default for OptionPart<T> {
    fn default() -> Self {
        Self(HashMap::new())
    }
}

impl<T: OptionId<T> + Debug + Eq + PartialEq + Hash> OptionPart<T> {
    pub fn insert(&mut self, id: T, value: OptionValue) -> Option<OptionValue> {
        self.0.insert(id, value)
    }

    pub fn get(&self, id: &T) -> HdbResult<&OptionValue> {
        self.0.get(id).ok_or_else(|| {
            HdbError::ImplDetailed(format!("{id:?} not provided in {}", id.part_type()))
        })
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> Iter<'_, T, OptionValue> {
        self.0.iter()
    }

    pub(crate) fn size(&self) -> usize {
        let mut res = 0;
        for value in self.0.values() {
            res += 1 + value.size();
        }
        res
    }

    pub(crate) fn emit<W: std::io::Write>(&self, enc: &mut Encoder<W>) -> HdbResult<()> {
        for (id, value) in &self.0 {
            enc.u8(id.to_u8());
            value.emit(enc)?;
        }
        Ok(())
    }

    pub(crate) fn parse<R: std::io::Read>(count: usize, dec: &mut Decoder<R>) -> HdbResult<Self> {
        let mut result = Self::default();
        for _ in 0..count {
            let id = T::from_u8(dec.u8());
            let value = OptionValue::parse(dec)?;
            trace!("parsed option id = {:?}, value = {}", id.to_u8(), value);
            result.0.insert(id, value);
        }
        Ok(result)
    }
}

impl<T> IntoIterator for OptionPart<T>
where
    T: OptionId<T> + Debug + Eq + PartialEq + Hash,
{
    type Item = (T, OptionValue);
    type IntoIter = IntoIter<T, OptionValue>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl<T> std::fmt::Display for OptionPart<T>
where
    T: OptionId<T> + Debug + Eq + PartialEq + Hash,
{
    fn fmt(&self, f: &mut std::fmt::Formatter) -> Result<(), std::fmt::Error> {
        for (k, v) in &self.0 {
            writeln!(f, "{k:?} = {v}")?;
        }
        Ok(())
    }
}
