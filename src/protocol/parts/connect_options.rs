use crate::protocol::parts::option_part::{OptionId, OptionPart};
use crate::protocol::parts::option_value::OptionValue;

/// An options part that describes the connection's capabilities.
/// It is exchanged during authentication, in both directions.
pub type ConnectOptions = OptionPart<ConnOptId>;

impl ConnectOptions {
    /// The set of options a client announces by default.
    pub fn for_client(locale: Option<&str>, os_user: &str) -> Self {
        let mut co = Self::default();
        co.insert(ConnOptId::CompleteArrayExecution, OptionValue::BOOLEAN(true));
        co.insert(ConnOptId::DataFormatVersion2, OptionValue::INT(8));
        co.insert(ConnOptId::ClientDistributionMode, OptionValue::INT(0));
        co.insert(ConnOptId::SelectForUpdateOK, OptionValue::BOOLEAN(true));
        co.insert(ConnOptId::RowSlotImageResultSet, OptionValue::BOOLEAN(true));
        co.insert(ConnOptId::OSUser, OptionValue::STRING(os_user.to_string()));
        if let Some(locale) = locale {
            co.insert(ConnOptId::ClientLocale, OptionValue::STRING(locale.to_string()));
        }
        co
    }

    pub fn connection_id(&self) -> Option<i32> {
        self.get(&ConnOptId::ConnectionID)
            .and_then(OptionValue::get_int)
            .ok()
    }

    pub fn database_name(&self) -> Option<&str> {
        self.get(&ConnOptId::DatabaseName)
            .and_then(OptionValue::get_string)
            .ok()
    }

    pub fn full_version_string(&self) -> Option<&str> {
        self.get(&ConnOptId::FullVersionString)
            .and_then(OptionValue::get_string)
            .ok()
    }
}

#[derive(Clone, Debug, Eq, PartialEq, Hash)]
pub enum ConnOptId {
    ConnectionID,            //  1
    CompleteArrayExecution,  //  2 // @deprecated Array execution semantics, always true
    ClientLocale,            //  3 // Is used within the calculation engine
    SystemID,                // 11 // SID of the database system (output only)
    DataFormatVersion,       // 12 // Version of data format used in communication
    AbapVarcharMode,         // 13 // ABAP varchar mode (trim trailing blanks)
    SelectForUpdateOK,       // 14 // SELECT FOR UPDATE function code understood
    ClientDistributionMode,  // 15
    SplitBatchCommands,      // 18 // permit splitting of batch commands
    DataFormatVersion2,      // 23 // Version of data format
    ClientInfoNullValueOK,   // 28 // can handle null values in client info
    OSUser,                  // 32 // client OS user name
    RowSlotImageResultSet,   // 33 // row-slot image result passing
    Endianness,              // 34
    ImplicitLobStreaming,    // 37
    FullVersionString,       // 44
    DatabaseName,            // 45
    BuildPlatform,           // 46
    ImplicitXASessionOK,     // 47
    CompressionLevelAndFlags, // 49 // Network compression level and flags
    __Unexpected__(u8),
}

impl OptionId<ConnOptId> for ConnOptId {
    fn to_u8(&self) -> u8 {
        match *self {
            Self::ConnectionID => 1,
            Self::CompleteArrayExecution => 2,
            Self::ClientLocale => 3,
            Self::SystemID => 11,
            Self::DataFormatVersion => 12,
            Self::AbapVarcharMode => 13,
            Self::SelectForUpdateOK => 14,
            Self::ClientDistributionMode => 15,
            Self::SplitBatchCommands => 18,
            Self::DataFormatVersion2 => 23,
            Self::ClientInfoNullValueOK => 28,
            Self::OSUser => 32,
            Self::RowSlotImageResultSet => 33,
            Self::Endianness => 34,
            Self::ImplicitLobStreaming => 37,
            Self::FullVersionString => 44,
            Self::DatabaseName => 45,
            Self::BuildPlatform => 46,
            Self::ImplicitXASessionOK => 47,
            Self::CompressionLevelAndFlags => 49,
            Self::__Unexpected__(val) => val,
        }
    }

    fn from_u8(val: u8) -> Self {
        match val {
            1 => Self::ConnectionID,
            2 => Self::CompleteArrayExecution,
            3 => Self::ClientLocale,
            11 => Self::SystemID,
            12 => Self::DataFormatVersion,
            13 => Self::AbapVarcharMode,
            14 => Self::SelectForUpdateOK,
            15 => Self::ClientDistributionMode,
            18 => Self::SplitBatchCommands,
            23 => Self::DataFormatVersion2,
            28 => Self::ClientInfoNullValueOK,
            32 => Self::OSUser,
            33 => Self::RowSlotImageResultSet,
            34 => Self::Endianness,
            37 => Self::ImplicitLobStreaming,
            44 => Self::FullVersionString,
            45 => Self::DatabaseName,
            46 => Self::BuildPlatform,
            47 => Self::ImplicitXASessionOK,
            49 => Self::CompressionLevelAndFlags,
            val => Self::__Unexpected__(val),
        }
    }

    fn part_type(&self) -> &'static str {
        "ConnectOptions"
    }
}
