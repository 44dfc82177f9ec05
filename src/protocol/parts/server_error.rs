use crate::protocol::encoding::Decoder;
use crate::HdbResult;

/// Severity of a server message.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum Severity {
    /// An additional warning is sent from the server to the client,
    /// along with the regular response.
    Warning,
    /// The request sent to the server was not correct or could not be
    /// answered correctly.
    Error,
    /// A fatal, session-terminating error occured.
    Fatal,

    /// The request sent to the server could not be answered, for an unknown reason.
    __UNKNOWN__(i8),
}

impl Severity {
    pub(crate) fn from_i8(i: i8) -> Self {
        match i {
            0 => Self::Warning,
            1 => Self::Error,
            2 => Self::Fatal,
            i => Self::__UNKNOWN__(i),
        }
    }

    /// Returns the number encoding of the severity.
    pub fn to_i8(&self) -> i8 {
        match *self {
            Self::Warning => 0,
            Self::Error => 1,
            Self::Fatal => 2,
            Self::__UNKNOWN__(i) => i,
        }
    }
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match *self {
            Self::Warning => write!(f, "Warning"),
            Self::Error => write!(f, "Error"),
            Self::Fatal => write!(f, "Fatal error"),
            Self::__UNKNOWN__(i) => write!(f, "Message of unknown severity ({i})"),
        }
    }
}

/// An error that is reported from the database.
#[derive(Clone, PartialEq, Eq)]
pub struct ServerError {
    code: i32,
    position: i32,
    severity: Severity,
    sqlstate: Vec<u8>,
    text: String,
    // for batch execution: the index of the statement this error belongs to;
    // assigned during error fusion, not transported on the wire
    stmt_no: Option<usize>,
}

// fixed-width leader of each error record: code, position, text length,
// severity, sql state
const BASE_SIZE: usize = 4 + 4 + 4 + 1 + 5;

impl ServerError {
    /// Returns the error code.
    pub fn code(&self) -> i32 {
        self.code
    }
    /// Returns the position in the line where the error occured.
    pub fn position(&self) -> i32 {
        self.position
    }
    /// Returns the severity of the error.
    pub fn severity(&self) -> &Severity {
        &self.severity
    }
    /// Returns the SQL state of the error.
    pub fn sqlstate(&self) -> &[u8] {
        &self.sqlstate
    }
    /// Returns the description of the error.
    pub fn text(&self) -> &str {
        &self.text
    }
    /// For batch executions: the index of the statement that failed.
    pub fn stmt_no(&self) -> Option<usize> {
        self.stmt_no
    }

    pub(crate) fn new(
        code: i32,
        position: i32,
        severity: Severity,
        sqlstate: Vec<u8>,
        text: String,
    ) -> Self {
        Self {
            code,
            position,
            severity,
            sqlstate,
            text,
            stmt_no: None,
        }
    }
}

impl std::error::Error for ServerError {}

impl std::fmt::Display for ServerError {
    fn fmt(&self, fmt: &mut std::fmt::Formatter) -> std::fmt::Result {
        if let Some(stmt_no) = self.stmt_no {
            write!(fmt, "statement {stmt_no}: ")?;
        }
        write!(
            fmt,
            r#"{}[code: {}, sql state: {}] at position {}: "{}""#,
            self.severity,
            self.code,
            String::from_utf8_lossy(&self.sqlstate),
            self.position,
            self.text
        )
    }
}

impl std::fmt::Debug for ServerError {
    fn fmt(&self, fmt: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(fmt, "{self}")
    }
}

/// The ordered list of errors of one error part.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ServerErrors {
    errors: Vec<ServerError>,
    only_warnings: bool,
}

impl ServerErrors {
    pub fn len(&self) -> usize {
        self.errors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, ServerError> {
        self.errors.iter()
    }

    /// True if every entry has warning severity; such replies are treated as
    /// success after logging.
    pub fn only_warnings(&self) -> bool {
        self.only_warnings
    }

    pub fn into_vec(self) -> Vec<ServerError> {
        self.errors
    }

    pub(crate) fn set_stmt_no(&mut self, idx: usize, stmt_no: usize) {
        if let Some(e) = self.errors.get_mut(idx) {
            e.stmt_no = Some(stmt_no);
        }
    }

    #[allow(clippy::cast_sign_loss)]
    pub(crate) fn decode<R: std::io::Read>(
        &mut self,
        no_of_args: usize,
        dec: &mut Decoder<R>,
    ) -> HdbResult<()> {
        self.errors.clear();
        for i in 0..no_of_args {
            let code = dec.i32(); // I4
            let position = dec.i32(); // I4
            let text_length = usize::try_from(dec.i32()).unwrap_or(0); // I4
            let severity = Severity::from_i8(dec.i8()); // I1
            let sqlstate = dec.bytes(5); // B5
            // some errors come with invalid CESU-8, so decode leniently
            let text = String::from_utf8_lossy(&dec.bytes(text_length)).to_string(); // B[text_length]
            if i + 1 < no_of_args {
                // records are padded to 8-byte boundaries; the tail padding
                // of the last record is handled by the part-level skip
                dec.skip(pad_to_8(BASE_SIZE + text_length));
            }

            let server_error = ServerError::new(code, position, severity, sqlstate, text);
            debug!("ServerErrors::decode(): found server error {server_error}");
            self.errors.push(server_error);
        }
        self.only_warnings = self
            .errors
            .iter()
            .all(|e| *e.severity() == Severity::Warning);
        dec.check()
    }
}

fn pad_to_8(n: usize) -> usize {
    (8 - n % 8) % 8
}

impl std::error::Error for ServerErrors {}

impl std::fmt::Display for ServerErrors {
    fn fmt(&self, fmt: &mut std::fmt::Formatter) -> std::fmt::Result {
        for e in &self.errors {
            writeln!(fmt, "{e}")?;
        }
        Ok(())
    }
}
