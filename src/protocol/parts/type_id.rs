use crate::{HdbError, HdbResult};

/// ID of the value type of a database column or a parameter.
#[allow(clippy::upper_case_acronyms)]
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum TypeId {
    /// For database type TINYINT.
    TINYINT, //  1
    /// For database type SMALLINT.
    SMALLINT, //  2
    /// For database type INT.
    INT, //  3
    /// For database type BIGINT.
    BIGINT, //  4
    /// For database type REAL.
    REAL, //  6
    /// For database type DOUBLE.
    DOUBLE, //  7
    /// For database type CHAR.
    CHAR, //  8
    /// For database type VARCHAR.
    VARCHAR, //  9
    /// For database type NCHAR.
    NCHAR, // 10
    /// For database type NVARCHAR.
    NVARCHAR, // 11
    /// For database type BINARY.
    BINARY, // 12
    /// For database type VARBINARY.
    VARBINARY, // 13
    /// For database type CLOB.
    CLOB, // 25
    /// For database type NCLOB.
    NCLOB, // 26
    /// For database type BLOB.
    BLOB, // 27
    /// For database type BOOLEAN.
    BOOLEAN, // 28
    /// For database type STRING.
    STRING, // 29
    /// For database type NSTRING.
    NSTRING, // 30
    /// Binary string.
    BSTRING, // 33
}

impl TypeId {
    pub(crate) fn try_new(id: u8) -> HdbResult<Self> {
        Ok(match id {
            1 => Self::TINYINT,
            2 => Self::SMALLINT,
            3 => Self::INT,
            4 => Self::BIGINT,
            6 => Self::REAL,
            7 => Self::DOUBLE,
            8 => Self::CHAR,
            9 => Self::VARCHAR,
            10 => Self::NCHAR,
            11 => Self::NVARCHAR,
            12 => Self::BINARY,
            13 => Self::VARBINARY,
            25 => Self::CLOB,
            26 => Self::NCLOB,
            27 => Self::BLOB,
            28 => Self::BOOLEAN,
            29 => Self::STRING,
            30 => Self::NSTRING,
            33 => Self::BSTRING,
            _ => return Err(HdbError::ImplDetailed(format!("unknown type code {id}"))),
        })
    }

    pub(crate) fn to_u8(self) -> u8 {
        match self {
            Self::TINYINT => 1,
            Self::SMALLINT => 2,
            Self::INT => 3,
            Self::BIGINT => 4,
            Self::REAL => 6,
            Self::DOUBLE => 7,
            Self::CHAR => 8,
            Self::VARCHAR => 9,
            Self::NCHAR => 10,
            Self::NVARCHAR => 11,
            Self::BINARY => 12,
            Self::VARBINARY => 13,
            Self::CLOB => 25,
            Self::NCLOB => 26,
            Self::BLOB => 27,
            Self::BOOLEAN => 28,
            Self::STRING => 29,
            Self::NSTRING => 30,
            Self::BSTRING => 33,
        }
    }

    // Values in parameter rows are prefixed with their type code;
    // the high bit marks a NULL value.
    pub(crate) fn type_code(self, is_null: bool) -> u8 {
        (if is_null { 128 } else { 0 }) + self.to_u8()
    }
}
