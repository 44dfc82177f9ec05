//! Wire-protocol codec for SAP HANA (TM).
//!
//! `hdbwire` implements the binary client/server protocol of SAP HANA at the
//! framing level: it assembles and parses the length-prefixed
//! message → segment → part structure, encodes and decodes the typed part
//! payloads, and surfaces server errors, warnings, row counts and result sets
//! to an enclosing driver layer.
//!
//! The crate deliberately stops below the driver façade: connection pooling,
//! TLS and TCP setup, authentication algorithms (authentication data is
//! transported as opaque byte fields), and LOB streaming policy are the
//! business of the caller. What the caller gets is
//!
//! * a [`Reader`](protocol::Reader) that iterates one reply message and
//!   dispatches each part to a handler,
//! * a [`Writer`](protocol::Writer) that assembles one request message from
//!   typed [`Part`](protocol::Part)s,
//! * the full set of part payload codecs in [`protocol::parts`],
//! * a metrics pipeline in [`metrics`] that keeps aggregation off the I/O path.
//!
//! All multi-byte integers on the wire are little-endian; text payloads are
//! CESU-8 and are transcoded to and from UTF-8 at the codec boundary.

#![deny(missing_debug_implementations)]
#![deny(clippy::all)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::must_use_candidate)]

#[macro_use]
extern crate log;

mod cancellation;
mod hdb_error;
pub mod metrics;
pub mod protocol;

pub use crate::cancellation::CancellationToken;
pub use crate::hdb_error::{HdbError, HdbResult};
pub use crate::protocol::parts::{
    AuthFields, ClientInfo, FieldMetadata, HdbValue, ParameterDescriptor, ParameterDescriptors,
    ParameterRows, ResultSet, ResultSetMetadata, RowsAffected, ServerError, ServerErrors, Severity,
    TypeId, RA_EXECUTION_FAILED, RA_SUCCESS_NO_INFO,
};
pub use crate::protocol::{
    FunctionCode, MessageType, Part, PartAttributes, PartKind, Reader, Writer,
};
