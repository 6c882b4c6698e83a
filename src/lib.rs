//! mongoscript - run MongoDB shell-style scripts.
//!
//! Takes a semicolon-separated script of Mongo shell statements,
//! classifies each one, executes it against a live server, and reports
//! per-command results with timing and error detail.

pub mod cli;
pub mod config;
pub mod connection;
pub mod error;
pub mod executor;
pub mod parser;
pub mod report;
pub mod runner;
pub mod script;

pub use cli::{CliArgs, ScriptSource};
pub use config::Config;
pub use connection::Session;
pub use error::{MongoscriptError, Result};
pub use executor::{CommandExecutionResult, ScriptExecutionResult};
pub use parser::{AdminStatement, Statement};
pub use runner::ScriptRunner;

/// Crate version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
