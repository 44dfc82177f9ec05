use crate::protocol::parts::option_part::{OptionId, OptionPart};
use crate::protocol::parts::option_value::OptionValue;

/// An options part the client sends with the authentication request to
/// identify itself.
pub type ClientContext = OptionPart<ClientContextId>;

impl ClientContext {
    pub fn new(version: &str, client_type: &str, application_program: &str) -> Self {
        let mut cc = Self::default();
        cc.insert(
            ClientContextId::ClientVersion,
            OptionValue::STRING(version.to_string()),
        );
        cc.insert(
            ClientContextId::ClientType,
            OptionValue::STRING(client_type.to_string()),
        );
        cc.insert(
            ClientContextId::ClientApplicationProgram,
            OptionValue::STRING(application_program.to_string()),
        );
        cc
    }
}

#[derive(Clone, Debug, Eq, PartialEq, Hash)]
pub enum ClientContextId {
    ClientVersion,            // 1 // STRING
    ClientType,               // 2 // STRING
    ClientApplicationProgram, // 3 // STRING
    __Unexpected__(u8),
}

impl OptionId<ClientContextId> for ClientContextId {
    fn to_u8(&self) -> u8 {
        match *self {
            Self::ClientVersion => 1,
            Self::ClientType => 2,
            Self::ClientApplicationProgram => 3,
            Self::__Unexpected__(val) => val,
        }
    }

    fn from_u8(val: u8) -> Self {
        match val {
            1 => Self::ClientVersion,
            2 => Self::ClientType,
            3 => Self::ClientApplicationProgram,
            val => {
                warn!("Unsupported value for ClientContextId received: {val}");
                Self::__Unexpected__(val)
            }
        }
    }

    fn part_type(&self) -> &'static str {
        "ClientContext"
    }
}
