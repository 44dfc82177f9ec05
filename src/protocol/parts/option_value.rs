use crate::protocol::encoding::{cesu8_length, Decoder, Encoder};
use crate::{HdbError, HdbResult};

/// Typed value of an option-part entry.
#[allow(clippy::upper_case_acronyms)]
#[derive(Clone, Debug, PartialEq)]
pub enum OptionValue {
    INT(i32),         // 3
    BIGINT(i64),      // 4
    DOUBLE(f64),      // 7
    BOOLEAN(bool),    // 28
    STRING(String),   // 29
    BSTRING(Vec<u8>), // 33
}

impl OptionValue {
    pub fn get_int(&self) -> HdbResult<i32> {
        if let Self::INT(i) = self {
            Ok(*i)
        } else {
            Err(HdbError::Usage("not an INT-typed OptionValue"))
        }
    }

    pub fn get_bigint(&self) -> HdbResult<i64> {
        if let Self::BIGINT(i) = self {
            Ok(*i)
        } else {
            Err(HdbError::Usage("not a BIGINT-typed OptionValue"))
        }
    }

    pub fn get_bool(&self) -> HdbResult<bool> {
        if let Self::BOOLEAN(b) = self {
            Ok(*b)
        } else {
            Err(HdbError::Usage("not a BOOLEAN-typed OptionValue"))
        }
    }

    pub fn get_string(&self) -> HdbResult<&str> {
        if let Self::STRING(s) = self {
            Ok(s)
        } else {
            Err(HdbError::Usage("not a STRING-typed OptionValue"))
        }
    }

    fn type_id(&self) -> u8 {
        match *self {
            Self::INT(_) => 3,
            Self::BIGINT(_) => 4,
            Self::DOUBLE(_) => 7,
            Self::BOOLEAN(_) => 28,
            Self::STRING(_) => 29,
            Self::BSTRING(_) => 33,
        }
    }

    pub(crate) fn size(&self) -> usize {
        1 + match *self {
            Self::INT(_) => 4,
            Self::BIGINT(_) | Self::DOUBLE(_) => 8,
            Self::BOOLEAN(_) => 1,
            Self::STRING(ref s) => cesu8_length(s) + 2,
            Self::BSTRING(ref v) => v.len() + 2,
        }
    }

    #[allow(clippy::cast_possible_truncation)]
    #[allow(clippy::cast_possible_wrap)]
    pub(crate) fn emit<W: std::io::Write>(&self, enc: &mut Encoder<W>) -> HdbResult<()> {
        enc.u8(self.type_id()); // I1
        match *self {
            Self::INT(i) => enc.i32(i),
            Self::BIGINT(i) => enc.i64(i),
            Self::DOUBLE(f) => enc.f64(f),
            Self::BOOLEAN(b) => enc.u8(u8::from(b)),
            Self::STRING(ref s) => {
                enc.i16(cesu8_length(s) as i16); // I2: length of value
                enc.string(s); // B (varying)
            }
            Self::BSTRING(ref v) => {
                enc.i16(v.len() as i16); // I2: length of value
                enc.bytes(v); // B (varying)
            }
        }
        Ok(())
    }

    #[allow(clippy::cast_sign_loss)]
    pub(crate) fn parse<R: std::io::Read>(dec: &mut Decoder<R>) -> HdbResult<Self> {
        let type_id = dec.u8(); // U1
        match type_id {
            3 => Ok(Self::INT(dec.i32())),
            4 => Ok(Self::BIGINT(dec.i64())),
            7 => Ok(Self::DOUBLE(dec.f64())),
            28 => Ok(Self::BOOLEAN(dec.u8() > 0)),
            29 => {
                let len = dec.i16() as usize;
                Ok(Self::STRING(dec.string(len)))
            }
            33 => {
                let len = dec.i16() as usize;
                Ok(Self::BSTRING(dec.bytes(len)))
            }
            _ => Err(HdbError::ImplDetailed(format!(
                "OptionValue::parse() not implemented for type code {type_id}",
            ))),
        }
    }
}

impl std::fmt::Display for OptionValue {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> Result<(), std::fmt::Error> {
        match self {
            Self::INT(v) => write!(f, "{v}"),
            Self::BIGINT(v) => write!(f, "{v}"),
            Self::DOUBLE(v) => write!(f, "{v}"),
            Self::BOOLEAN(v) => write!(f, "{v}"),
            Self::STRING(v) => write!(f, "{v}"),
            Self::BSTRING(v) => write!(f, "{v:?}"),
        }
    }
}
