use crate::protocol::encoding::{Decoder, Encoder};
use crate::protocol::parts::{
    AuthFields, ClientContext, ClientId, ClientInfo, Command, ConnectOptions, DbConnectInfo,
    OutputParameters, ParameterDescriptors, ParameterRows, ReadLobReply, ReadLobRequest, ResultSet,
    ResultSetMetadata, RowsAffected, ServerErrors, StatementContext, Topology, TransactionFlags,
    WriteLobReply, WriteLobRequest,
};
use crate::protocol::{PartAttributes, PartKind};
use crate::{HdbError, HdbResult};

/// One protocol part: the tag (`PartKind`) plus its typed payload.
///
/// Every variant implements the subset of `{encode, decode}` that its kind
/// supports on the wire; decoders come in three shapes (plain, driven by the
/// argument count, driven by the declared buffer length), plus the two
/// metadata-dependent kinds (result-set rows, output parameters) whose
/// instances must be created with their metadata before decoding.
#[derive(Debug)]
pub enum Part {
    Auth(AuthFields),
    ClientContext(ClientContext),
    ClientId(ClientId),
    ClientInfo(ClientInfo),
    Command(Command),
    ConnectOptions(ConnectOptions),
    DbConnectInfo(DbConnectInfo),
    Error(ServerErrors),
    FetchSize(u32),
    OutputParameters(OutputParameters),
    ParameterMetadata(ParameterDescriptors),
    ParameterRows(ParameterRows),
    ReadLobRequest(ReadLobRequest),
    ReadLobReply(ReadLobReply),
    ResultSet(ResultSet),
    ResultSetId(u64),
    ResultSetMetadata(ResultSetMetadata),
    RowsAffected(RowsAffected),
    StatementContext(StatementContext),
    StatementId(u64),
    TopologyInformation(Topology),
    TransactionFlags(TransactionFlags),
    WriteLobRequest(WriteLobRequest),
    WriteLobReply(WriteLobReply),
}

impl Part {
    pub fn kind(&self) -> PartKind {
        match &self {
            Self::Auth(_) => PartKind::Authentication,
            Self::ClientContext(_) => PartKind::ClientContext,
            Self::ClientId(_) => PartKind::ClientId,
            Self::ClientInfo(_) => PartKind::ClientInfo,
            Self::Command(_) => PartKind::Command,
            Self::ConnectOptions(_) => PartKind::ConnectOptions,
            Self::DbConnectInfo(_) => PartKind::DbConnectInfo,
            Self::Error(_) => PartKind::Error,
            Self::FetchSize(_) => PartKind::FetchSize,
            Self::OutputParameters(_) => PartKind::OutputParameters,
            Self::ParameterMetadata(_) => PartKind::ParameterMetadata,
            Self::ParameterRows(_) => PartKind::Parameters,
            Self::ReadLobRequest(_) => PartKind::ReadLobRequest,
            Self::ReadLobReply(_) => PartKind::ReadLobReply,
            Self::ResultSet(_) => PartKind::ResultSet,
            Self::ResultSetId(_) => PartKind::ResultSetId,
            Self::ResultSetMetadata(_) => PartKind::ResultSetMetadata,
            Self::RowsAffected(_) => PartKind::RowsAffected,
            Self::StatementContext(_) => PartKind::StatementContext,
            Self::StatementId(_) => PartKind::StatementId,
            Self::TopologyInformation(_) => PartKind::TopologyInformation,
            Self::TransactionFlags(_) => PartKind::TransactionFlags,
            Self::WriteLobRequest(_) => PartKind::WriteLobRequest,
            Self::WriteLobReply(_) => PartKind::WriteLobReply,
        }
    }

    // only called on output (emit)
    pub(crate) fn count(&self) -> HdbResult<usize> {
        Ok(match *self {
            Self::Auth(_)
            | Self::ClientId(_)
            | Self::Command(_)
            | Self::FetchSize(_)
            | Self::ResultSetId(_)
            | Self::StatementId(_)
            | Self::ReadLobRequest(_)
            | Self::WriteLobRequest(_) => 1,
            Self::ClientContext(ref opts) => opts.len(),
            Self::ClientInfo(ref client_info) => client_info.count(),
            Self::ConnectOptions(ref opts) => opts.len(),
            Self::DbConnectInfo(ref opts) => opts.len(),
            Self::ParameterRows(ref par_rows) => par_rows.count(),
            Self::StatementContext(ref sc) => sc.len(),
            ref a => {
                return Err(HdbError::ImplDetailed(format!("count() called on {a:?}")));
            }
        })
    }

    pub(crate) fn body_size(&self) -> HdbResult<usize> {
        Ok(match *self {
            Self::Auth(ref af) => af.size(),
            Self::ClientContext(ref opts) => opts.size(),
            Self::ClientId(ref client_id) => client_id.size(),
            Self::ClientInfo(ref client_info) => client_info.size(),
            Self::Command(ref command) => command.size(),
            Self::ConnectOptions(ref conn_opts) => conn_opts.size(),
            Self::DbConnectInfo(ref conn_info) => conn_info.size(),
            Self::FetchSize(_) => 4,
            Self::ParameterRows(ref par_rows) => par_rows.size()?,
            Self::ReadLobRequest(_) => ReadLobRequest::size(),
            Self::WriteLobRequest(ref r) => r.size(),
            Self::ResultSetId(_) | Self::StatementId(_) => 8,
            Self::StatementContext(ref sc) => sc.size(),
            ref a => {
                return Err(HdbError::ImplDetailed(format!(
                    "body_size() called on {a:?}"
                )));
            }
        })
    }

    // emits the part body; the part header is written by the Writer
    pub(crate) fn emit<W: std::io::Write>(&self, enc: &mut Encoder<W>) -> HdbResult<()> {
        match *self {
            Self::Auth(ref af) => af.emit(enc)?,
            Self::ClientContext(ref opts) => opts.emit(enc)?,
            Self::ClientId(ref client_id) => client_id.emit(enc)?,
            Self::ClientInfo(ref client_info) => client_info.emit(enc)?,
            Self::Command(ref command) => command.emit(enc)?,
            Self::ConnectOptions(ref conn_opts) => conn_opts.emit(enc)?,
            Self::DbConnectInfo(ref db_conn_info) => db_conn_info.emit(enc)?,
            Self::FetchSize(fs) => enc.u32(fs),
            Self::ParameterRows(ref par_rows) => par_rows.emit(enc)?,
            Self::ReadLobRequest(ref r) => r.emit(enc)?,
            Self::WriteLobRequest(ref r) => r.emit(enc)?,
            Self::ResultSetId(rs_id) => enc.u64(rs_id),
            Self::StatementId(stmt_id) => enc.u64(stmt_id),
            Self::StatementContext(ref sc) => sc.emit(enc)?,
            ref a => {
                return Err(HdbError::ImplDetailed(format!("emit() called on {a:?}")));
            }
        }
        Ok(())
    }

    // decodes the part body into this instance, dispatching on the variant's
    // decoder shape
    pub(crate) fn decode<R: std::io::Read>(
        &mut self,
        _attrs: PartAttributes,
        num_arg: usize,
        buf_len: usize,
        dec: &mut Decoder<R>,
    ) -> HdbResult<()> {
        match *self {
            Self::Auth(ref mut af) => af.decode(dec),
            Self::ClientContext(ref mut opts) => {
                *opts = ClientContext::parse(num_arg, dec)?;
                Ok(())
            }
            Self::ClientId(ref mut client_id) => client_id.decode(buf_len, dec),
            Self::ClientInfo(ref mut client_info) => client_info.decode(num_arg, dec),
            Self::Command(ref mut command) => command.decode(buf_len, dec),
            Self::ConnectOptions(ref mut opts) => {
                *opts = ConnectOptions::parse(num_arg, dec)?;
                Ok(())
            }
            Self::DbConnectInfo(ref mut opts) => {
                *opts = DbConnectInfo::parse(num_arg, dec)?;
                Ok(())
            }
            Self::Error(ref mut server_errors) => server_errors.decode(num_arg, dec),
            Self::FetchSize(ref mut fs) => {
                *fs = dec.u32();
                dec.check()
            }
            Self::OutputParameters(ref mut op) => op.decode(dec),
            Self::ParameterMetadata(ref mut pd) => {
                *pd = ParameterDescriptors::parse(num_arg, dec)?;
                Ok(())
            }
            Self::ParameterRows(ref mut par_rows) => par_rows.decode(num_arg, dec),
            Self::ReadLobRequest(ref mut r) => r.decode(dec),
            Self::ReadLobReply(ref mut r) => r.decode(dec),
            Self::ResultSet(ref mut rs) => rs.decode(num_arg, dec),
            Self::ResultSetId(ref mut id) => {
                *id = dec.u64();
                dec.check()
            }
            Self::ResultSetMetadata(ref mut rsmd) => {
                *rsmd = ResultSetMetadata::parse(num_arg, dec)?;
                Ok(())
            }
            Self::RowsAffected(ref mut ra) => ra.decode(num_arg, dec),
            Self::StatementContext(ref mut sc) => {
                *sc = StatementContext::parse(num_arg, dec)?;
                Ok(())
            }
            Self::StatementId(ref mut id) => {
                *id = dec.u64();
                dec.check()
            }
            Self::TopologyInformation(ref mut topology) => {
                *topology = Topology::parse(num_arg, dec)?;
                Ok(())
            }
            Self::TransactionFlags(ref mut taflags) => {
                *taflags = TransactionFlags::parse(num_arg, dec)?;
                Ok(())
            }
            Self::WriteLobRequest(ref mut r) => r.decode(dec),
            Self::WriteLobReply(ref mut r) => r.decode(num_arg, dec),
        }
    }
}

impl PartKind {
    /// Produces a default-initialized decodable part for this kind, for the
    /// generic skip-but-cache path of the `Reader`.
    ///
    /// Kinds that need external input for decoding (authentication, the
    /// metadata-dependent result-set and parameter kinds) and kinds unknown
    /// to this crate return `None`; the caller skips their bytes instead.
    pub fn try_default_part(self) -> Option<Part> {
        match self {
            Self::Error => Some(Part::Error(ServerErrors::default())),
            Self::ClientContext => Some(Part::ClientContext(ClientContext::default())),
            Self::ClientId => Some(Part::ClientId(ClientId::default())),
            Self::ClientInfo => Some(Part::ClientInfo(ClientInfo::default())),
            Self::Command => Some(Part::Command(Command::default())),
            Self::ConnectOptions => Some(Part::ConnectOptions(ConnectOptions::default())),
            Self::DbConnectInfo => Some(Part::DbConnectInfo(DbConnectInfo::default())),
            Self::FetchSize => Some(Part::FetchSize(0)),
            Self::ReadLobRequest => Some(Part::ReadLobRequest(ReadLobRequest::default())),
            Self::ReadLobReply => Some(Part::ReadLobReply(ReadLobReply::default())),
            Self::ResultSetId => Some(Part::ResultSetId(0)),
            Self::RowsAffected => Some(Part::RowsAffected(RowsAffected::default())),
            Self::StatementContext => Some(Part::StatementContext(StatementContext::default())),
            Self::StatementId => Some(Part::StatementId(0)),
            Self::TopologyInformation => Some(Part::TopologyInformation(Topology::default())),
            Self::TransactionFlags => Some(Part::TransactionFlags(TransactionFlags::default())),
            Self::WriteLobRequest => Some(Part::WriteLobRequest(WriteLobRequest::default())),
            Self::WriteLobReply => Some(Part::WriteLobReply(WriteLobReply::default())),
            _ => None,
        }
    }
}
