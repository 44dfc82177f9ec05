// Identifies the nature of the statement or functionality that has been
// prepared or executed; sent in the segment header of reply messages.
// Irrelevant numbers (ABAP stuff, "reserved") are omitted.
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq)]
pub enum FunctionCode {
    #[default]
    Nil, //  0
    Ddl,                       //  1 // DDL statement
    Insert,                    //  2 // INSERT statement
    Update,                    //  3 // UPDATE statement
    Delete,                    //  4 // DELETE statement
    Select,                    //  5 // SELECT statement
    SelectForUpdate,           //  6 // SELECT … FOR UPDATE statement
    Explain,                   //  7 // EXPLAIN statement
    DbProcedureCall,           //  8 // CALL statement
    DbProcedureCallWithResult, //  9 // CALL statement returning one or more results
    Fetch,                     // 10 // FETCH message
    Commit,                    // 11 // COMMIT message or statement
    Rollback,                  // 12 // ROLLBACK message or statement
    Connect,                   // 14 // CONNECT or AUTHENTICATION message
    WriteLob,                  // 15 // WRITELOB message
    ReadLob,                   // 16 // READLOB message
    Disconnect,                // 18 // DISCONNECT message
    CloseCursor,               // 19 // CLOSECURSOR message
    FindLob,                   // 20 // FINDLOB message
    DbConnectInfo,             // 21 // DBCONNECTINFO message
    __Unexpected__(i16),
}

impl FunctionCode {
    pub fn from_i16(val: i16) -> Self {
        match val {
            0 => Self::Nil,
            1 => Self::Ddl,
            2 => Self::Insert,
            3 => Self::Update,
            4 => Self::Delete,
            5 => Self::Select,
            6 => Self::SelectForUpdate,
            7 => Self::Explain,
            8 => Self::DbProcedureCall,
            9 => Self::DbProcedureCallWithResult,
            10 => Self::Fetch,
            11 => Self::Commit,
            12 => Self::Rollback,
            14 => Self::Connect,
            15 => Self::WriteLob,
            16 => Self::ReadLob,
            18 => Self::Disconnect,
            19 => Self::CloseCursor,
            20 => Self::FindLob,
            21 => Self::DbConnectInfo,
            val => Self::__Unexpected__(val),
        }
    }

    pub fn to_i16(self) -> i16 {
        match self {
            Self::Nil => 0,
            Self::Ddl => 1,
            Self::Insert => 2,
            Self::Update => 3,
            Self::Delete => 4,
            Self::Select => 5,
            Self::SelectForUpdate => 6,
            Self::Explain => 7,
            Self::DbProcedureCall => 8,
            Self::DbProcedureCallWithResult => 9,
            Self::Fetch => 10,
            Self::Commit => 11,
            Self::Rollback => 12,
            Self::Connect => 14,
            Self::WriteLob => 15,
            Self::ReadLob => 16,
            Self::Disconnect => 18,
            Self::CloseCursor => 19,
            Self::FindLob => 20,
            Self::DbConnectInfo => 21,
            Self::__Unexpected__(val) => val,
        }
    }
}
