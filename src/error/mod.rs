//! Error types for mongoscript.
//!
//! All fallible operations in this crate return [`Result`], whose error
//! type is the crate-wide [`MongoscriptError`]. Specific failure domains
//! (connection, parsing, execution, configuration, script loading) have
//! their own enums that convert into the top-level type via `From`.

mod kinds;
pub mod mongo;

pub use kinds::{
    ConfigError, ConnectionError, ExecutionError, MongoscriptError, ParseError, Result,
    ScriptError,
};
pub use mongo::{ErrorDetails, ErrorInfo, extract_error_info};
