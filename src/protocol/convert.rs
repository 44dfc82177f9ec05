//! Range-checked conversion of client-side values into the SQL number types.
//!
//! Accepts native integers and floats, references to them, and decimal
//! strings; rejects values outside the target type's range with
//! [`HdbError::IntegerOutOfRange`] resp. [`HdbError::FloatOutOfRange`].

use crate::protocol::parts::TypeId;
use crate::{HdbError, HdbResult};

/// A client-side value that can be offered for conversion.
#[derive(Debug, Clone, Copy)]
pub enum ConvertibleValue<'a> {
    Int(i64),
    UInt(u64),
    Double(f64),
    Str(&'a str),
}

macro_rules! from_int {
    ($($t:ty),*) => {
        $(
            impl From<$t> for ConvertibleValue<'_> {
                fn from(v: $t) -> Self {
                    Self::Int(i64::from(v))
                }
            }
            impl From<&$t> for ConvertibleValue<'_> {
                fn from(v: &$t) -> Self {
                    Self::Int(i64::from(*v))
                }
            }
        )*
    };
}
macro_rules! from_uint {
    ($($t:ty),*) => {
        $(
            impl From<$t> for ConvertibleValue<'_> {
                fn from(v: $t) -> Self {
                    Self::UInt(u64::from(v))
                }
            }
            impl From<&$t> for ConvertibleValue<'_> {
                fn from(v: &$t) -> Self {
                    Self::UInt(u64::from(*v))
                }
            }
        )*
    };
}

from_int!(i8, i16, i32, i64);
from_uint!(u8, u16, u32, u64);

impl From<f32> for ConvertibleValue<'_> {
    fn from(v: f32) -> Self {
        Self::Double(f64::from(v))
    }
}
impl From<&f32> for ConvertibleValue<'_> {
    fn from(v: &f32) -> Self {
        Self::Double(f64::from(*v))
    }
}
impl From<f64> for ConvertibleValue<'_> {
    fn from(v: f64) -> Self {
        Self::Double(v)
    }
}
impl From<&f64> for ConvertibleValue<'_> {
    fn from(v: &f64) -> Self {
        Self::Double(*v)
    }
}
impl<'a> From<&'a str> for ConvertibleValue<'a> {
    fn from(v: &'a str) -> Self {
        Self::Str(v)
    }
}
impl<'a> From<&'a String> for ConvertibleValue<'a> {
    fn from(v: &'a String) -> Self {
        Self::Str(v)
    }
}

fn integer_range(type_id: TypeId) -> HdbResult<(i64, i64)> {
    Ok(match type_id {
        TypeId::TINYINT => (0, i64::from(u8::MAX)),
        TypeId::SMALLINT => (i64::from(i16::MIN), i64::from(i16::MAX)),
        TypeId::INT => (i64::from(i32::MIN), i64::from(i32::MAX)),
        TypeId::BIGINT => (i64::MIN, i64::MAX),
        _ => {
            return Err(HdbError::UsageDetailed(format!(
                "{type_id:?} is not an integer type"
            )));
        }
    })
}

/// Converts a value into the range of the given SQL integer type.
#[allow(clippy::cast_sign_loss)]
#[allow(clippy::cast_possible_wrap)]
pub fn convert_integer<'a, V: Into<ConvertibleValue<'a>>>(
    type_id: TypeId,
    value: V,
) -> HdbResult<i64> {
    let (min, max) = integer_range(type_id)?;
    match value.into() {
        ConvertibleValue::Int(i) => {
            if (min..=max).contains(&i) {
                Ok(i)
            } else {
                Err(HdbError::IntegerOutOfRange)
            }
        }
        ConvertibleValue::UInt(u) => {
            if u > max as u64 {
                Err(HdbError::IntegerOutOfRange)
            } else {
                Ok(u as i64)
            }
        }
        ConvertibleValue::Str(s) => {
            let i = s
                .trim()
                .parse::<i64>()
                .map_err(|_| HdbError::UsageDetailed(format!("cannot parse {s:?} as integer")))?;
            if (min..=max).contains(&i) {
                Ok(i)
            } else {
                Err(HdbError::IntegerOutOfRange)
            }
        }
        ConvertibleValue::Double(_) => Err(HdbError::Usage(
            "float values are not converted into integer types implicitly",
        )),
    }
}

/// Converts a value into the range of the given SQL float type.
pub fn convert_float<'a, V: Into<ConvertibleValue<'a>>>(type_id: TypeId, value: V) -> HdbResult<f64> {
    let f = match value.into() {
        ConvertibleValue::Double(f) => f,
        ConvertibleValue::Str(s) => s
            .trim()
            .parse::<f64>()
            .map_err(|_| HdbError::UsageDetailed(format!("cannot parse {s:?} as float")))?,
        ConvertibleValue::Int(_) | ConvertibleValue::UInt(_) => {
            return Err(HdbError::Usage(
                "integer values are not converted into float types implicitly",
            ));
        }
    };
    match type_id {
        TypeId::REAL => {
            if f.is_finite() && f.abs() > f64::from(f32::MAX) {
                Err(HdbError::FloatOutOfRange)
            } else {
                Ok(f)
            }
        }
        TypeId::DOUBLE => Ok(f),
        _ => Err(HdbError::UsageDetailed(format!(
            "{type_id:?} is not a float type"
        ))),
    }
}

#[cfg(test)]
mod test {
    use super::{convert_float, convert_integer};
    use crate::protocol::parts::TypeId;
    use crate::HdbError;

    fn assert_int_out_of_range(res: crate::HdbResult<i64>) {
        assert!(matches!(res, Err(HdbError::IntegerOutOfRange)));
    }

    #[test]
    fn test_convert_integer() {
        assert_eq!(convert_integer(TypeId::TINYINT, 42_u8).unwrap(), 42);
        assert_eq!(convert_integer(TypeId::SMALLINT, 42_i16).unwrap(), 42);
        assert_eq!(convert_integer(TypeId::INT, 42_i32).unwrap(), 42);
        assert_eq!(convert_integer(TypeId::BIGINT, 42_i64).unwrap(), 42);

        // integer reference
        let i = 42_i32;
        assert_eq!(convert_integer(TypeId::BIGINT, &i).unwrap(), 42);

        // min and max values
        assert_int_out_of_range(convert_integer(TypeId::TINYINT, -1_i32));
        assert_int_out_of_range(convert_integer(TypeId::TINYINT, 256_i32));
        assert_int_out_of_range(convert_integer(
            TypeId::SMALLINT,
            i64::from(i16::MIN) - 1,
        ));
        assert_int_out_of_range(convert_integer(
            TypeId::SMALLINT,
            i64::from(i16::MAX) + 1,
        ));
        assert_int_out_of_range(convert_integer(TypeId::INT, i64::from(i32::MIN) - 1));
        assert_int_out_of_range(convert_integer(TypeId::INT, i64::from(i32::MAX) + 1));
        assert_int_out_of_range(convert_integer(TypeId::INT, u64::MAX));

        // integer as string
        assert_eq!(convert_integer(TypeId::INT, "42").unwrap(), 42);
        assert!(convert_integer(TypeId::INT, "fortytwo").is_err());
    }

    #[test]
    fn test_convert_float() {
        let real_value = 42.42_f32;
        let double_value = 42.42_f64;

        assert_eq!(
            convert_float(TypeId::REAL, real_value).unwrap(),
            f64::from(real_value)
        );
        assert_eq!(convert_float(TypeId::DOUBLE, double_value).unwrap(), 42.42);

        // float reference
        assert_eq!(
            convert_float(TypeId::REAL, &real_value).unwrap(),
            f64::from(real_value)
        );

        // the next representable value beyond the REAL range must be rejected
        let beyond_max_real = next_after(f64::from(f32::MAX));
        assert!(matches!(
            convert_float(TypeId::REAL, beyond_max_real),
            Err(HdbError::FloatOutOfRange)
        ));
        assert!(matches!(
            convert_float(TypeId::REAL, -beyond_max_real),
            Err(HdbError::FloatOutOfRange)
        ));
        assert!(convert_float(TypeId::DOUBLE, beyond_max_real).is_ok());

        // float as string
        assert_eq!(convert_float(TypeId::DOUBLE, "42.42").unwrap(), 42.42);
    }

    // smallest f64 greater than v
    fn next_after(v: f64) -> f64 {
        f64::from_bits(v.to_bits() + 1)
    }
}
