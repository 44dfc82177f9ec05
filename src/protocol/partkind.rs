// Tags that identify the payload schema of a protocol part.
// ABAP related kinds and "reserved" numbers are omitted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PartKind {
    Command,             //  3 // SQL command data
    ResultSet,           //  5 // Tabular resultset data
    Error,               //  6 // Error information
    StatementId,         // 10 // Prepared statement identifier
    RowsAffected,        // 12 // Number of affected rows of dml statement
    ResultSetId,         // 13 // Identifier of resultset
    TopologyInformation, // 15 // Topology information
    ReadLobRequest,      // 17 // Request data of READLOB message
    ReadLobReply,        // 18 // Reply data of READLOB message
    WriteLobRequest,     // 28 // Request data of WRITELOB message
    ClientContext,       // 29 // Client context
    WriteLobReply,       // 30 // Reply data of WRITELOB message
    Parameters,          // 32 // Parameter data
    Authentication,      // 33 // Authentication data
    ClientId,            // 35 // Identifier of the client connection
    StatementContext,    // 39 // Statement visibility context
    OutputParameters,    // 41 // Output parameter data
    ConnectOptions,      // 42 // Connect options
    FetchSize,           // 45 // Number of rows to fetch
    ParameterMetadata,   // 47 // Parameter metadata (type and length information)
    ResultSetMetadata,   // 48 // Result set metadata (type, name information)
    ClientInfo,          // 57 // Client information values
    TransactionFlags,    // 64 // Transaction handling flags
    DbConnectInfo,       // 67 // Part of redirect response

    // A kind this crate does not know. Carried along so that such parts can
    // be skipped instead of breaking the connection.
    __Unexpected__(i8),
}

impl PartKind {
    pub fn from_i8(val: i8) -> Self {
        match val {
            3 => Self::Command,
            5 => Self::ResultSet,
            6 => Self::Error,
            10 => Self::StatementId,
            12 => Self::RowsAffected,
            13 => Self::ResultSetId,
            15 => Self::TopologyInformation,
            17 => Self::ReadLobRequest,
            18 => Self::ReadLobReply,
            28 => Self::WriteLobRequest,
            29 => Self::ClientContext,
            30 => Self::WriteLobReply,
            32 => Self::Parameters,
            33 => Self::Authentication,
            35 => Self::ClientId,
            39 => Self::StatementContext,
            41 => Self::OutputParameters,
            42 => Self::ConnectOptions,
            45 => Self::FetchSize,
            47 => Self::ParameterMetadata,
            48 => Self::ResultSetMetadata,
            57 => Self::ClientInfo,
            64 => Self::TransactionFlags,
            67 => Self::DbConnectInfo,
            val => Self::__Unexpected__(val),
        }
    }

    pub fn to_i8(self) -> i8 {
        match self {
            Self::Command => 3,
            Self::ResultSet => 5,
            Self::Error => 6,
            Self::StatementId => 10,
            Self::RowsAffected => 12,
            Self::ResultSetId => 13,
            Self::TopologyInformation => 15,
            Self::ReadLobRequest => 17,
            Self::ReadLobReply => 18,
            Self::WriteLobRequest => 28,
            Self::ClientContext => 29,
            Self::WriteLobReply => 30,
            Self::Parameters => 32,
            Self::Authentication => 33,
            Self::ClientId => 35,
            Self::StatementContext => 39,
            Self::OutputParameters => 41,
            Self::ConnectOptions => 42,
            Self::FetchSize => 45,
            Self::ParameterMetadata => 47,
            Self::ResultSetMetadata => 48,
            Self::ClientInfo => 57,
            Self::TransactionFlags => 64,
            Self::DbConnectInfo => 67,
            Self::__Unexpected__(val) => val,
        }
    }
}

#[cfg(test)]
mod test {
    use super::PartKind;

    #[test]
    fn test_from_to_roundtrip() {
        for val in i8::MIN..i8::MAX {
            assert_eq!(PartKind::from_i8(val).to_i8(), val);
        }
    }

    #[test]
    fn test_unknown_kinds_are_preserved() {
        assert_eq!(PartKind::from_i8(99), PartKind::__Unexpected__(99));
    }
}
