use crate::protocol::parts::option_part::{OptionId, OptionPart};
use crate::protocol::parts::option_value::OptionValue;

/// An options part with which the server reports transaction state changes.
pub type TransactionFlags = OptionPart<TaFlagId>;

impl TransactionFlags {
    pub fn is_committed(&self) -> bool {
        matches!(
            self.get(&TaFlagId::Committed),
            Ok(&OptionValue::BOOLEAN(true))
        )
    }

    pub fn is_rolled_back(&self) -> bool {
        matches!(
            self.get(&TaFlagId::RolledBack),
            Ok(&OptionValue::BOOLEAN(true))
        )
    }

    pub fn write_transaction_started(&self) -> bool {
        matches!(
            self.get(&TaFlagId::WriteTransactionStarted),
            Ok(&OptionValue::BOOLEAN(true))
        )
    }

    /// True if the server signals that the session has to be terminated.
    pub fn is_session_closing_transaction_error(&self) -> bool {
        matches!(
            self.get(&TaFlagId::SessionClosingTransactionError),
            Ok(&OptionValue::BOOLEAN(true))
        )
    }
}

#[derive(Clone, Debug, Eq, PartialEq, Hash)]
pub enum TaFlagId {
    RolledBack,                    // 0 // BOOL
    Committed,                     // 1 // BOOL
    NewIsolationlevel,             // 2 // INT
    DdlCommitmodeChanged,          // 3 // BOOL
    WriteTransactionStarted,       // 4 // BOOL
    NoWriteTransactionStarted,     // 5 // BOOL
    SessionClosingTransactionError, // 6 // BOOL
    __Unexpected__(u8),
}

impl OptionId<TaFlagId> for TaFlagId {
    fn to_u8(&self) -> u8 {
        match *self {
            Self::RolledBack => 0,
            Self::Committed => 1,
            Self::NewIsolationlevel => 2,
            Self::DdlCommitmodeChanged => 3,
            Self::WriteTransactionStarted => 4,
            Self::NoWriteTransactionStarted => 5,
            Self::SessionClosingTransactionError => 6,
            Self::__Unexpected__(val) => val,
        }
    }

    fn from_u8(val: u8) -> Self {
        match val {
            0 => Self::RolledBack,
            1 => Self::Committed,
            2 => Self::NewIsolationlevel,
            3 => Self::DdlCommitmodeChanged,
            4 => Self::WriteTransactionStarted,
            5 => Self::NoWriteTransactionStarted,
            6 => Self::SessionClosingTransactionError,
            val => {
                warn!("Unsupported value for TaFlagId received: {val}");
                Self::__Unexpected__(val)
            }
        }
    }

    fn part_type(&self) -> &'static str {
        "TransactionFlags"
    }
}
