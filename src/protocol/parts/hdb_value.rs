//! Owned representation of a single database value, with the wire codecs for
//! both directions: the result-set shape (values prefixed by null indicators
//! or length indicators, depending on the type) and the parameter-row shape
//! (values prefixed by a type-code byte whose high bit marks NULL).

use crate::protocol::encoding::{cesu8_length, Decoder, Encoder};
use crate::protocol::parts::length_indicator;
use crate::protocol::parts::TypeId;
use crate::{HdbError, HdbResult};

/// A single database value.
#[allow(clippy::upper_case_acronyms)]
#[derive(Clone, Debug, PartialEq)]
pub enum HdbValue {
    /// Representation of NULL, for all types.
    NULL,
    /// TINYINT (unsigned byte).
    TINYINT(u8),
    /// SMALLINT.
    SMALLINT(i16),
    /// INT.
    INT(i32),
    /// BIGINT.
    BIGINT(i64),
    /// REAL.
    REAL(f32),
    /// DOUBLE.
    DOUBLE(f64),
    /// BOOLEAN.
    BOOLEAN(bool),
    /// Text value of CHAR, VARCHAR, NCHAR, NVARCHAR, STRING, NSTRING.
    STRING(String),
    /// Binary value of BINARY, VARBINARY, BSTRING.
    BINARY(Vec<u8>),
    /// Locator-level representation of a BLOB/CLOB/NCLOB value.
    /// Streaming the remaining data is the driver's business
    /// (see `ReadLobRequest`).
    LOB(LobDescriptor),
}

/// Wire-level description of a LOB value inside a result set: the locator to
/// fetch the remainder with, plus the chunk of data that came inline.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LobDescriptor {
    pub is_last_data: bool,
    pub total_char_length: u64,
    pub total_byte_length: u64,
    pub locator_id: u64,
    pub data: Vec<u8>,
}

impl HdbValue {
    /// Returns true if the value is a NULL value.
    pub fn is_null(&self) -> bool {
        matches!(*self, HdbValue::NULL)
    }

    // ---- result-set shape ------------------------------------------------

    pub(crate) fn parse_result_value<R: std::io::Read>(
        type_id: TypeId,
        nullable: bool,
        dec: &mut Decoder<R>,
    ) -> HdbResult<Self> {
        match type_id {
            TypeId::TINYINT => Ok(if parse_null_indicator(nullable, dec)? {
                Self::NULL
            } else {
                Self::TINYINT(dec.u8())
            }),
            TypeId::SMALLINT => Ok(if parse_null_indicator(nullable, dec)? {
                Self::NULL
            } else {
                Self::SMALLINT(dec.i16())
            }),
            TypeId::INT => Ok(if parse_null_indicator(nullable, dec)? {
                Self::NULL
            } else {
                Self::INT(dec.i32())
            }),
            TypeId::BIGINT => Ok(if parse_null_indicator(nullable, dec)? {
                Self::NULL
            } else {
                Self::BIGINT(dec.i64())
            }),
            TypeId::REAL => {
                // NULL is transported as the all-ones bit pattern
                let bits = dec.u32();
                if bits == u32::MAX {
                    null_value(nullable)
                } else {
                    Ok(Self::REAL(f32::from_bits(bits)))
                }
            }
            TypeId::DOUBLE => {
                let bits = dec.u64();
                if bits == u64::MAX {
                    null_value(nullable)
                } else {
                    Ok(Self::DOUBLE(f64::from_bits(bits)))
                }
            }
            TypeId::BOOLEAN => match dec.u8() {
                // 0x00 = FALSE, 0x01 = NULL, 0x02 = TRUE
                0 => Ok(Self::BOOLEAN(false)),
                2 => Ok(Self::BOOLEAN(true)),
                1 => null_value(nullable),
                i => Err(HdbError::ImplDetailed(format!(
                    "parse_result_value: bad boolean value {i}"
                ))),
            },
            TypeId::CHAR
            | TypeId::VARCHAR
            | TypeId::NCHAR
            | TypeId::NVARCHAR
            | TypeId::STRING
            | TypeId::NSTRING => {
                let l8 = dec.u8(); // B1
                if l8 == length_indicator::LENGTH_INDICATOR_NULL {
                    null_value(nullable)
                } else {
                    let len = length_indicator::parse(l8, dec)?;
                    Ok(Self::STRING(dec.string(len)))
                }
            }
            TypeId::BINARY | TypeId::VARBINARY | TypeId::BSTRING => {
                let l8 = dec.u8(); // B1
                if l8 == length_indicator::LENGTH_INDICATOR_NULL {
                    null_value(nullable)
                } else {
                    let len = length_indicator::parse(l8, dec)?;
                    Ok(Self::BINARY(dec.bytes(len)))
                }
            }
            TypeId::BLOB | TypeId::CLOB | TypeId::NCLOB => parse_lob(nullable, dec),
        }
    }

    // ---- parameter-row shape ---------------------------------------------

    #[allow(clippy::cast_possible_truncation)]
    #[allow(clippy::cast_possible_wrap)]
    pub(crate) fn emit_param_value<W: std::io::Write>(
        &self,
        type_id: TypeId,
        enc: &mut Encoder<W>,
    ) -> HdbResult<()> {
        enc.u8(type_id.type_code(self.is_null())); // I1
        match *self {
            Self::NULL => {}
            Self::TINYINT(u) => enc.u8(u),
            Self::SMALLINT(i) => enc.i16(i),
            Self::INT(i) => enc.i32(i),
            Self::BIGINT(i) => enc.i64(i),
            Self::REAL(f) => enc.f32(f),
            Self::DOUBLE(f) => enc.f64(f),
            // as of dataformat_version2 = 8
            Self::BOOLEAN(b) => enc.u8(2 * u8::from(b)),
            Self::STRING(ref s) => {
                length_indicator::emit(cesu8_length(s), enc)?;
                enc.string(s);
            }
            Self::BINARY(ref v) => {
                length_indicator::emit(v.len(), enc)?;
                enc.bytes(v);
            }
            Self::LOB(_) => {
                return Err(HdbError::Usage(
                    "LOB values are sent through the write-lob parts, not inline",
                ));
            }
        }
        Ok(())
    }

    pub(crate) fn parse_param_value<R: std::io::Read>(dec: &mut Decoder<R>) -> HdbResult<Self> {
        let type_code = dec.u8(); // I1
        let is_null = type_code >= 128;
        let type_id = TypeId::try_new(type_code & 0b_0111_1111)?;
        if is_null {
            return Ok(Self::NULL);
        }
        Ok(match type_id {
            TypeId::TINYINT => Self::TINYINT(dec.u8()),
            TypeId::SMALLINT => Self::SMALLINT(dec.i16()),
            TypeId::INT => Self::INT(dec.i32()),
            TypeId::BIGINT => Self::BIGINT(dec.i64()),
            TypeId::REAL => Self::REAL(dec.f32()),
            TypeId::DOUBLE => Self::DOUBLE(dec.f64()),
            TypeId::BOOLEAN => Self::BOOLEAN(dec.u8() == 2),
            TypeId::CHAR
            | TypeId::VARCHAR
            | TypeId::NCHAR
            | TypeId::NVARCHAR
            | TypeId::STRING
            | TypeId::NSTRING => {
                let l8 = dec.u8();
                let len = length_indicator::parse(l8, dec)?;
                Self::STRING(dec.string(len))
            }
            TypeId::BINARY | TypeId::VARBINARY | TypeId::BSTRING => {
                let l8 = dec.u8();
                let len = length_indicator::parse(l8, dec)?;
                Self::BINARY(dec.bytes(len))
            }
            TypeId::BLOB | TypeId::CLOB | TypeId::NCLOB => {
                return Err(HdbError::Impl(
                    "LOB values cannot appear inline in parameter rows",
                ));
            }
        })
    }

    // used to calculate the part size before emitting
    pub(crate) fn size(&self, _type_id: TypeId) -> HdbResult<usize> {
        Ok(1 + match self {
            Self::NULL => 0,
            Self::BOOLEAN(_) | Self::TINYINT(_) => 1,
            Self::SMALLINT(_) => 2,
            Self::INT(_) | Self::REAL(_) => 4,
            Self::BIGINT(_) | Self::DOUBLE(_) => 8,
            Self::STRING(ref s) => length_indicator::binary_length(cesu8_length(s)),
            Self::BINARY(ref v) => length_indicator::binary_length(v.len()),
            Self::LOB(_) => {
                return Err(HdbError::UsageDetailed(format!(
                    "size(): can't send {self:?} directly to the database",
                )));
            }
        })
    }
}

fn null_value(nullable: bool) -> HdbResult<HdbValue> {
    if nullable {
        Ok(HdbValue::NULL)
    } else {
        Err(HdbError::Impl("found NULL value for NOT NULL column"))
    }
}

// Reads the NULL indicator byte of fixed-width integer values.
fn parse_null_indicator<R: std::io::Read>(
    nullable: bool,
    dec: &mut Decoder<R>,
) -> HdbResult<bool> {
    let is_null = dec.u8() == 0;
    if is_null && !nullable {
        Err(HdbError::Impl("found NULL value for NOT NULL column"))
    } else {
        Ok(is_null)
    }
}

fn parse_lob<R: std::io::Read>(nullable: bool, dec: &mut Decoder<R>) -> HdbResult<HdbValue> {
    let _data_type = dec.u8(); // I1
    let options = dec.u8(); // I1
    let is_null = (options & 0b1) != 0;
    let is_data_included = (options & 0b10) != 0;
    let is_last_data = (options & 0b100) != 0;
    if is_null {
        return null_value(nullable);
    }
    dec.skip(2); // U2 filler
    let total_char_length = dec.u64(); // I8
    let total_byte_length = dec.u64(); // I8
    let locator_id = dec.u64(); // I8
    let chunk_length = dec.u32(); // I4
    let data = if is_data_included {
        dec.bytes(chunk_length as usize)
    } else {
        Vec::new()
    };
    Ok(HdbValue::LOB(LobDescriptor {
        is_last_data,
        total_char_length,
        total_byte_length,
        locator_id,
        data,
    }))
}

impl std::fmt::Display for HdbValue {
    fn fmt(&self, fmt: &mut std::fmt::Formatter) -> std::fmt::Result {
        match *self {
            HdbValue::NULL => write!(fmt, "<NULL>"),
            HdbValue::TINYINT(value) => write!(fmt, "{value}"),
            HdbValue::SMALLINT(value) => write!(fmt, "{value}"),
            HdbValue::INT(value) => write!(fmt, "{value}"),
            HdbValue::BIGINT(value) => write!(fmt, "{value}"),
            HdbValue::REAL(value) => write!(fmt, "{value}"),
            HdbValue::DOUBLE(value) => write!(fmt, "{value}"),
            HdbValue::BOOLEAN(value) => write!(fmt, "{value}"),
            HdbValue::STRING(ref value) => write!(fmt, "{value}"),
            HdbValue::BINARY(ref vec) => write!(fmt, "<BINARY length = {}>", vec.len()),
            HdbValue::LOB(ref lob) => {
                write!(fmt, "<LOB locator = {}>", lob.locator_id)
            }
        }
    }
}

#[cfg(test)]
mod test {
    use super::HdbValue;
    use crate::protocol::encoding::{Cesu8Transcoder, Decoder, Encoder};
    use crate::protocol::parts::TypeId;

    fn roundtrip(value: &HdbValue, type_id: TypeId) -> HdbValue {
        let mut enc = Encoder::new(Vec::new(), Box::new(Cesu8Transcoder));
        value.emit_param_value(type_id, &mut enc).unwrap();
        assert_eq!(enc.cnt(), value.size(type_id).unwrap());
        let mut dec = Decoder::new(
            std::io::Cursor::new(enc.into_inner()),
            Box::new(Cesu8Transcoder),
        );
        HdbValue::parse_param_value(&mut dec).unwrap()
    }

    #[test]
    fn test_param_value_roundtrips() {
        for (value, type_id) in [
            (HdbValue::TINYINT(255), TypeId::TINYINT),
            (HdbValue::SMALLINT(-17), TypeId::SMALLINT),
            (HdbValue::INT(42), TypeId::INT),
            (HdbValue::BIGINT(-1), TypeId::BIGINT),
            (HdbValue::REAL(42.42), TypeId::REAL),
            (HdbValue::DOUBLE(-0.125), TypeId::DOUBLE),
            (HdbValue::BOOLEAN(true), TypeId::BOOLEAN),
            (HdbValue::STRING("grü💩e".to_string()), TypeId::NVARCHAR),
            (HdbValue::BINARY(vec![1, 2, 3]), TypeId::VARBINARY),
            (HdbValue::NULL, TypeId::INT),
        ] {
            assert_eq!(roundtrip(&value, type_id), value);
        }
    }
}
