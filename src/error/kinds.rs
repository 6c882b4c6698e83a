use std::{fmt, io};

/// Crate-wide `Result` type using [`MongoscriptError`] as the error.
pub type Result<T> = std::result::Result<T, MongoscriptError>;

/// Top-level error type for mongoscript operations.
///
/// This type wraps more specific error kinds and provides a single
/// error type that can be used throughout the crate.
#[derive(Debug)]
pub enum MongoscriptError {
    /// Connection-related errors.
    Connection(ConnectionError),

    /// Statement parsing errors.
    Parse(ParseError),

    /// Statement execution errors.
    Execution(ExecutionError),

    /// Configuration errors.
    Config(ConfigError),

    /// Script loading errors.
    Script(ScriptError),

    /// I/O errors.
    Io(io::Error),

    /// MongoDB driver errors.
    MongoDb(mongodb::error::Error),

    /// Generic error with a free-form message.
    Generic(String),
}

/// Connection-specific errors.
#[derive(Debug)]
pub enum ConnectionError {
    /// Failed to establish a connection.
    ConnectionFailed(String),

    /// Invalid connection URI.
    InvalidUri(String),

    /// Ping command failed.
    PingFailed(String),
}

/// Parsing-specific errors.
#[derive(Debug)]
pub enum ParseError {
    /// Syntax error in a document or value literal.
    SyntaxError(String),

    /// Statement shape is recognized but malformed.
    InvalidStatement(String),

    /// Document literal failed to parse.
    InvalidDocument(String),
}

/// Execution-specific errors.
#[derive(Debug)]
pub enum ExecutionError {
    /// Statement does not match any recognized command shape.
    UnsupportedCommand(String),

    /// Invalid operation parameters.
    InvalidParameters(String),
}

/// Configuration-specific errors.
#[derive(Debug)]
pub enum ConfigError {
    /// Config file not found.
    FileNotFound(String),

    /// Invalid config format.
    InvalidFormat(String),

    /// Invalid field value.
    InvalidValue { field: String, value: String },
}

/// Script loading errors.
#[derive(Debug)]
pub enum ScriptError {
    /// Script file not found.
    FileNotFound(String),

    /// Script file could not be read.
    ReadFailed(String),

    /// Script file exceeds the size limit.
    TooLarge { size: u64, max: u64 },
}

impl fmt::Display for MongoscriptError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MongoscriptError::Connection(e) => write!(f, "Connection error: {e}"),
            MongoscriptError::Parse(e) => write!(f, "{e}"),
            MongoscriptError::Execution(e) => write!(f, "{e}"),
            MongoscriptError::Config(e) => write!(f, "Configuration error: {e}"),
            MongoscriptError::Script(e) => write!(f, "Script error: {e}"),
            MongoscriptError::Io(e) => write!(f, "I/O error: {e}"),
            MongoscriptError::MongoDb(e) => write!(f, "MongoDB error: {e}"),
            MongoscriptError::Generic(msg) => write!(f, "{msg}"),
        }
    }
}

impl fmt::Display for ConnectionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConnectionError::ConnectionFailed(msg) => write!(f, "Failed to connect: {msg}"),
            ConnectionError::InvalidUri(uri) => write!(f, "Invalid connection URI: {uri}"),
            ConnectionError::PingFailed(msg) => write!(f, "Ping failed: {msg}"),
        }
    }
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParseError::SyntaxError(msg) => write!(f, "Syntax error: {msg}"),
            ParseError::InvalidStatement(stmt) => write!(f, "Invalid statement: {stmt}"),
            ParseError::InvalidDocument(msg) => write!(f, "Invalid document: {msg}"),
        }
    }
}

impl fmt::Display for ExecutionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExecutionError::UnsupportedCommand(cmd) => {
                write!(f, "Command not supported: {cmd}")
            }
            ExecutionError::InvalidParameters(msg) => write!(f, "Invalid parameters: {msg}"),
        }
    }
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::FileNotFound(path) => write!(f, "Config file not found: {path}"),
            ConfigError::InvalidFormat(msg) => write!(f, "Invalid config format: {msg}"),
            ConfigError::InvalidValue { field, value } => {
                write!(f, "Invalid value '{value}' for field '{field}'")
            }
        }
    }
}

impl fmt::Display for ScriptError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ScriptError::FileNotFound(path) => write!(f, "Script file not found: {path}"),
            ScriptError::ReadFailed(msg) => write!(f, "Failed to read script file: {msg}"),
            ScriptError::TooLarge { size, max } => {
                write!(f, "Script file too large: {size} bytes (max: {max} bytes)")
            }
        }
    }
}

impl std::error::Error for MongoscriptError {}
impl std::error::Error for ConnectionError {}
impl std::error::Error for ParseError {}
impl std::error::Error for ExecutionError {}
impl std::error::Error for ConfigError {}
impl std::error::Error for ScriptError {}

impl MongoscriptError {
    /// Full error detail for execution reports.
    ///
    /// Driver errors are expanded into the structured JSON produced by
    /// [`crate::error::mongo::extract_error_info`]; other kinds fall back
    /// to their debug representation.
    pub fn detail(&self) -> String {
        match self {
            MongoscriptError::MongoDb(e) => crate::error::mongo::extract_error_info(e)
                .to_json()
                .unwrap_or_else(|_| format!("{e:?}")),
            other => format!("{other:?}"),
        }
    }
}

impl From<io::Error> for MongoscriptError {
    fn from(err: io::Error) -> Self {
        MongoscriptError::Io(err)
    }
}

impl From<mongodb::error::Error> for MongoscriptError {
    fn from(err: mongodb::error::Error) -> Self {
        MongoscriptError::MongoDb(err)
    }
}

impl From<ConnectionError> for MongoscriptError {
    fn from(err: ConnectionError) -> Self {
        MongoscriptError::Connection(err)
    }
}

impl From<ParseError> for MongoscriptError {
    fn from(err: ParseError) -> Self {
        MongoscriptError::Parse(err)
    }
}

impl From<ExecutionError> for MongoscriptError {
    fn from(err: ExecutionError) -> Self {
        MongoscriptError::Execution(err)
    }
}

impl From<ConfigError> for MongoscriptError {
    fn from(err: ConfigError) -> Self {
        MongoscriptError::Config(err)
    }
}

impl From<ScriptError> for MongoscriptError {
    fn from(err: ScriptError) -> Self {
        MongoscriptError::Script(err)
    }
}

impl From<String> for MongoscriptError {
    fn from(msg: String) -> Self {
        MongoscriptError::Generic(msg)
    }
}

impl From<&str> for MongoscriptError {
    fn from(msg: &str) -> Self {
        MongoscriptError::Generic(msg.to_owned())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unsupported_command_display() {
        let err = MongoscriptError::from(ExecutionError::UnsupportedCommand(
            "db.users.frobnicate()".to_string(),
        ));
        assert_eq!(err.to_string(), "Command not supported: db.users.frobnicate()");
    }

    #[test]
    fn test_parse_error_display() {
        let err = MongoscriptError::from(ParseError::InvalidDocument("unexpected '}'".to_string()));
        assert_eq!(err.to_string(), "Invalid document: unexpected '}'");
    }

    #[test]
    fn test_detail_is_nonempty() {
        let err = MongoscriptError::from(ScriptError::FileNotFound("a.mongodb".to_string()));
        assert!(!err.detail().is_empty());
    }

    #[test]
    fn test_from_str() {
        let err: MongoscriptError = "something went wrong".into();
        assert_eq!(err.to_string(), "something went wrong");
    }
}
