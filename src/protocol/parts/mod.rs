//! The typed payloads of the protocol parts.

mod authfields;
mod client_context;
mod client_id;
mod client_info;
mod command;
mod connect_options;
mod db_connect_info;
mod hdb_value;
pub(crate) mod length_indicator;
mod multiline_option_part;
mod option_part;
mod option_value;
mod output_parameters;
mod parameter_descriptor;
mod parameter_rows;
mod read_lob;
mod resultset;
mod resultset_metadata;
mod rows_affected;
mod server_error;
mod statement_context;
mod topology;
mod transaction_flags;
mod type_id;
mod write_lob;

pub use self::authfields::AuthFields;
pub use self::client_context::{ClientContext, ClientContextId};
pub use self::client_id::ClientId;
pub use self::client_info::ClientInfo;
pub use self::command::Command;
pub use self::connect_options::{ConnOptId, ConnectOptions};
pub use self::db_connect_info::{DbConnectInfo, DbConnectInfoId};
pub use self::hdb_value::{HdbValue, LobDescriptor};
pub use self::multiline_option_part::MultilineOptionPart;
pub use self::option_part::{OptionId, OptionPart};
pub use self::option_value::OptionValue;
pub use self::output_parameters::OutputParameters;
pub use self::parameter_descriptor::{
    ParameterDescriptor, ParameterDescriptors, ParameterDirection,
};
pub use self::parameter_rows::ParameterRows;
pub use self::read_lob::{ReadLobReply, ReadLobRequest};
pub use self::resultset::ResultSet;
pub use self::resultset_metadata::{FieldMetadata, ResultSetMetadata};
pub use self::rows_affected::{RowsAffected, RA_EXECUTION_FAILED, RA_SUCCESS_NO_INFO};
pub use self::server_error::{ServerError, ServerErrors, Severity};
pub use self::statement_context::{StatementContext, StatementContextId};
pub use self::topology::{Topology, TopologyAttrId};
pub use self::transaction_flags::{TaFlagId, TransactionFlags};
pub use self::type_id::TypeId;
pub use self::write_lob::{WriteLobReply, WriteLobRequest};
