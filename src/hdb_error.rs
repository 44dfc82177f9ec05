use crate::protocol::parts::ServerErrors;
use thiserror::Error;

/// A list specifying categories of [`HdbError`](crate::HdbError).
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum HdbError {
    /// Some error occured while decoding CESU-8. This indicates a server issue!
    #[error("Some error occured while decoding CESU-8")]
    Cesu8,

    /// The byte stream contradicts its own length fields.
    /// The connection must be considered broken.
    #[error("Protocol framing error: {}", _0)]
    Framing(String),

    /// Database server responded with one or more errors.
    #[error("Database server responded with an error")]
    DbError {
        /// The server-reported errors.
        #[from]
        source: ServerErrors,
    },

    /// Error occured in communication with the database.
    #[error(transparent)]
    Io {
        /// The causing Error.
        #[from]
        source: std::io::Error,
    },

    /// The connection is broken and must be discarded by the enclosing pool.
    #[error("Connection is broken: {}", source)]
    ConnectionBroken {
        /// The causing Error.
        source: Box<HdbError>,
    },

    /// The operation was cancelled through its `CancellationToken`.
    #[error("Operation was cancelled")]
    Cancelled,

    /// A numeric input does not fit into the range of the target SQL integer type.
    #[error("Integer value is out of range for the target type")]
    IntegerOutOfRange,

    /// A numeric input does not fit into the range of the target SQL float type.
    #[error("Float value is out of range for the target type")]
    FloatOutOfRange,

    /// Implementation error.
    #[error("Implementation error: {}", _0)]
    Impl(&'static str),

    /// Implementation error.
    #[error("Implementation error: {}", _0)]
    ImplDetailed(String),

    /// Error caused by wrong usage.
    #[error("Wrong usage: {}", _0)]
    Usage(&'static str),

    /// Error caused by wrong usage.
    #[error("Wrong usage: {}", _0)]
    UsageDetailed(String),
}

/// Abbreviation of `Result<T, HdbError>`.
pub type HdbResult<T> = std::result::Result<T, HdbError>;

impl HdbError {
    /// Returns the contained `ServerErrors`, if any.
    ///
    /// This method helps in case you need programmatic access to e.g. the error codes.
    pub fn server_errors(&self) -> Option<&ServerErrors> {
        match self {
            Self::DbError { source } => Some(source),
            _ => None,
        }
    }

    /// True if the error signals that the connection is unusable
    /// and must be discarded.
    pub fn is_connection_broken(&self) -> bool {
        matches!(self, Self::ConnectionBroken { .. } | Self::Framing(_))
    }

    /// Wraps the error into the `ConnectionBroken` variant.
    pub(crate) fn break_connection(self) -> Self {
        Self::ConnectionBroken {
            source: Box::new(self),
        }
    }
}
