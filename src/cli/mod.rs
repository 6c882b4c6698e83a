//! Command-line interface for mongoscript.
//!
//! This module handles:
//! - Command-line argument parsing using clap
//! - Resolving the connection URI and target database
//! - Mapping CLI flags onto the loaded configuration

use std::path::PathBuf;

use clap::Parser;

use crate::config::{Config, LogLevel, ReportFormat};
use crate::error::{MongoscriptError, Result};

/// Run MongoDB shell-style scripts and report per-command results.
#[derive(Parser, Debug)]
#[command(
    name = "mongoscript",
    version,
    about = "Run MongoDB shell-style scripts",
    long_about = "Executes a semicolon-separated MongoDB shell-style script against a live \
server and reports per-command results with timing and error detail."
)]
pub struct CliArgs {
    /// MongoDB connection URI
    ///
    /// Format: mongodb://[username:password@]host[:port][/database][?options]
    #[arg(value_name = "URI")]
    pub uri: Option<String>,

    /// Database name to run against
    #[arg(short = 'd', long, value_name = "NAME")]
    pub database: Option<String>,

    /// Script text to run
    #[arg(short = 's', long, value_name = "SCRIPT", conflicts_with = "file")]
    pub script: Option<String>,

    /// Script file to run
    #[arg(short = 'f', long, value_name = "FILE")]
    pub file: Option<PathBuf>,

    /// Skip the confirmation prompt
    #[arg(short = 'y', long)]
    pub yes: bool,

    /// Report format (console, json)
    #[arg(long, value_name = "FORMAT")]
    pub format: Option<String>,

    /// Disable colored output
    #[arg(long = "no-color")]
    pub no_color: bool,

    /// Quiet mode (errors only)
    #[arg(short = 'q', long)]
    pub quiet: bool,

    /// Verbose mode (detailed logging)
    #[arg(short = 'v', long)]
    pub verbose: bool,

    /// Very verbose mode (debug logging)
    #[arg(long = "vv")]
    pub very_verbose: bool,

    /// Configuration file path
    #[arg(short = 'c', long = "config", value_name = "FILE")]
    pub config_file: Option<PathBuf>,
}

impl CliArgs {
    /// The script to run, from `--script` or `--file`.
    pub fn script_source(&self) -> Result<ScriptSource> {
        match (&self.script, &self.file) {
            (Some(text), None) => Ok(ScriptSource::Inline(text.clone())),
            (None, Some(path)) => Ok(ScriptSource::File(path.clone())),
            _ => Err(MongoscriptError::Generic(
                "provide a script with --script or --file".to_string(),
            )),
        }
    }

    /// Resolve the connection URI: the positional argument wins, then the
    /// config file's default.
    pub fn resolve_uri(&self, config: &Config) -> String {
        self.uri
            .clone()
            .unwrap_or_else(|| config.connection.default_uri.clone())
    }

    /// Resolve the initial database: `--database`, then the URI path
    /// segment, then `test`.
    pub fn resolve_database(&self, uri: &str) -> String {
        self.database
            .clone()
            .or_else(|| extract_database_from_uri(uri))
            .unwrap_or_else(|| "test".to_string())
    }

    /// Log level from the verbosity flags. The most verbose flag wins.
    pub fn log_level(&self, config: &Config) -> LogLevel {
        if self.very_verbose {
            LogLevel::Debug
        } else if self.verbose {
            LogLevel::Info
        } else if self.quiet {
            LogLevel::Error
        } else {
            config.logging.level
        }
    }

    /// Report format: `--format` overrides the config file.
    pub fn report_format(&self, config: &Config) -> Result<ReportFormat> {
        match self.format.as_deref() {
            None => Ok(config.display.format),
            Some("console") => Ok(ReportFormat::Console),
            Some("json") => Ok(ReportFormat::Json),
            Some(other) => Err(MongoscriptError::Generic(format!(
                "unknown report format '{other}' (expected 'console' or 'json')"
            ))),
        }
    }
}

/// Where the script text comes from.
#[derive(Debug, Clone, PartialEq)]
pub enum ScriptSource {
    Inline(String),
    File(PathBuf),
}

/// Extract the database name from a MongoDB connection URI, if present.
///
/// Format: mongodb://[username:password@]host[:port][/database][?options]
fn extract_database_from_uri(uri: &str) -> Option<String> {
    let after_scheme = uri.split("://").nth(1)?;
    let path_part = after_scheme.split('/').nth(1)?;
    let db_name = path_part.split('?').next().unwrap_or("");
    if db_name.is_empty() {
        None
    } else {
        Some(db_name.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_inline_script() {
        let args =
            CliArgs::try_parse_from(["mongoscript", "-s", "db.users.find({})"]).unwrap();
        assert_eq!(
            args.script_source().unwrap(),
            ScriptSource::Inline("db.users.find({})".to_string())
        );
    }

    #[test]
    fn test_parse_file_script() {
        let args = CliArgs::try_parse_from(["mongoscript", "-f", "setup.mongodb"]).unwrap();
        assert_eq!(
            args.script_source().unwrap(),
            ScriptSource::File(PathBuf::from("setup.mongodb"))
        );
    }

    #[test]
    fn test_script_and_file_conflict() {
        let result = CliArgs::try_parse_from(["mongoscript", "-s", "x", "-f", "y"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_no_script_source_fails() {
        let args = CliArgs::try_parse_from(["mongoscript"]).unwrap();
        assert!(args.script_source().is_err());
    }

    #[test]
    fn test_database_resolution_priority() {
        let args = CliArgs::try_parse_from([
            "mongoscript",
            "mongodb://localhost:27017/uridb",
            "-d",
            "argdb",
            "-s",
            "db.stats()",
        ])
        .unwrap();
        assert_eq!(args.resolve_database("mongodb://localhost:27017/uridb"), "argdb");
    }

    #[test]
    fn test_database_from_uri() {
        let args = CliArgs::try_parse_from(["mongoscript", "-s", "db.stats()"]).unwrap();
        assert_eq!(
            args.resolve_database("mongodb://user:pw@host:27017/mydb?tls=true"),
            "mydb"
        );
        assert_eq!(args.resolve_database("mongodb://host:27017"), "test");
    }

    #[test]
    fn test_uri_falls_back_to_config() {
        let args = CliArgs::try_parse_from(["mongoscript", "-s", "db.stats()"]).unwrap();
        let config = Config::default();
        assert_eq!(args.resolve_uri(&config), "mongodb://localhost:27017");
    }

    #[test]
    fn test_verbosity_flags() {
        let config = Config::default();
        let args = CliArgs::try_parse_from(["mongoscript", "-s", "x", "--vv"]).unwrap();
        assert_eq!(args.log_level(&config), LogLevel::Debug);

        let args = CliArgs::try_parse_from(["mongoscript", "-s", "x", "-q"]).unwrap();
        assert_eq!(args.log_level(&config), LogLevel::Error);
    }

    #[test]
    fn test_report_format_parsing() {
        let config = Config::default();
        let args =
            CliArgs::try_parse_from(["mongoscript", "-s", "x", "--format", "json"]).unwrap();
        assert_eq!(args.report_format(&config).unwrap(), ReportFormat::Json);

        let args =
            CliArgs::try_parse_from(["mongoscript", "-s", "x", "--format", "xml"]).unwrap();
        assert!(args.report_format(&config).is_err());
    }
}
