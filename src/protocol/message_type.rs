// Defines the action requested from the database server.
// Irrelevant types (abap related, "reserved" stuff) are omitted.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum MessageType {
    ExecuteDirect,   //  2 // Directly execute SQL statement
    Prepare,         //  3 // Prepare an SQL statement
    Execute,         // 13 // Execute a previously prepared SQL statement
    ReadLob,         // 16 // Reads large object data
    WriteLob,        // 17 // Writes large object data
    Authenticate,    // 65 // Sends authentication data
    Connect,         // 66 // Connects to the database
    Commit,          // 67 // Commits current transaction
    Rollback,        // 68 // Rolls back current transaction
    CloseResultSet,  // 69 // Closes resultset
    DropStatementId, // 70 // Drops prepared statement identifier
    FetchNext,       // 71 // Fetches next data from resultset
    Disconnect,      // 77 // Disconnects session
    DbConnectInfo,   // 82 // Request/receive database connect information
    __Unexpected__(i8),
}

impl MessageType {
    pub fn from_i8(val: i8) -> Self {
        match val {
            2 => Self::ExecuteDirect,
            3 => Self::Prepare,
            13 => Self::Execute,
            16 => Self::ReadLob,
            17 => Self::WriteLob,
            65 => Self::Authenticate,
            66 => Self::Connect,
            67 => Self::Commit,
            68 => Self::Rollback,
            69 => Self::CloseResultSet,
            70 => Self::DropStatementId,
            71 => Self::FetchNext,
            77 => Self::Disconnect,
            82 => Self::DbConnectInfo,
            val => Self::__Unexpected__(val),
        }
    }

    pub fn to_i8(self) -> i8 {
        match self {
            Self::ExecuteDirect => 2,
            Self::Prepare => 3,
            Self::Execute => 13,
            Self::ReadLob => 16,
            Self::WriteLob => 17,
            Self::Authenticate => 65,
            Self::Connect => 66,
            Self::Commit => 67,
            Self::Rollback => 68,
            Self::CloseResultSet => 69,
            Self::DropStatementId => 70,
            Self::FetchNext => 71,
            Self::Disconnect => 77,
            Self::DbConnectInfo => 82,
            Self::__Unexpected__(val) => val,
        }
    }

    // The server accepts client information only on these request types;
    // session variables are piggybacked on the first such message.
    pub fn client_info_supported(self) -> bool {
        matches!(
            self,
            Self::Connect | Self::Prepare | Self::ExecuteDirect | Self::Execute
        )
    }
}
