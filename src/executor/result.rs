//! Execution result data model.

use serde::Serialize;

use crate::error::MongoscriptError;

/// Outcome of a single script statement.
#[derive(Debug, Clone, Serialize)]
pub struct CommandExecutionResult {
    /// The statement text as it appeared in the script.
    pub command: String,

    /// Whether the statement executed without error.
    pub success: bool,

    /// Human-readable result line, present on success.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub result: Option<String>,

    /// Short failure description, present on failure.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error_message: Option<String>,

    /// Full failure detail, present on failure.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error_detail: Option<String>,

    /// Wall-clock execution time in milliseconds.
    pub execution_time_ms: u64,
}

impl CommandExecutionResult {
    pub fn success(command: impl Into<String>, result: impl Into<String>, elapsed_ms: u64) -> Self {
        Self {
            command: command.into(),
            success: true,
            result: Some(result.into()),
            error_message: None,
            error_detail: None,
            execution_time_ms: elapsed_ms,
        }
    }

    pub fn failure(command: impl Into<String>, error: &MongoscriptError, elapsed_ms: u64) -> Self {
        Self {
            command: command.into(),
            success: false,
            result: None,
            error_message: Some(error.to_string()),
            error_detail: Some(error.detail()),
            execution_time_ms: elapsed_ms,
        }
    }
}

/// Aggregated outcome of a whole script run.
///
/// `success` says whether the run itself completed. Individual command
/// failures are isolated: they are recorded in `command_results` and do
/// not mark the script as failed. Only a failure outside the per-command
/// boundary (e.g. the connection could not be established) makes
/// `success` false.
#[derive(Debug, Clone, Serialize)]
pub struct ScriptExecutionResult {
    pub success: bool,

    /// Abort reason when the run never completed.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error_message: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub error_detail: Option<String>,

    /// Total wall-clock time for the run in milliseconds.
    pub execution_time_ms: u64,

    /// Number of statements executed.
    pub command_count: usize,

    pub command_results: Vec<CommandExecutionResult>,
}

impl ScriptExecutionResult {
    /// Aggregate per-command results into a script-level outcome.
    pub fn from_commands(command_results: Vec<CommandExecutionResult>, elapsed_ms: u64) -> Self {
        Self {
            success: true,
            error_message: None,
            error_detail: None,
            execution_time_ms: elapsed_ms,
            command_count: command_results.len(),
            command_results,
        }
    }

    /// Whether every executed command succeeded.
    pub fn all_commands_succeeded(&self) -> bool {
        self.command_results.iter().all(|r| r.success)
    }

    /// Number of failed commands.
    pub fn failed_count(&self) -> usize {
        self.command_results.iter().filter(|r| !r.success).count()
    }

    /// A run that failed before any statement could execute, e.g. the
    /// connection could not be established.
    pub fn aborted(error: &MongoscriptError, elapsed_ms: u64) -> Self {
        Self {
            success: false,
            error_message: Some(error.to_string()),
            error_detail: Some(error.detail()),
            execution_time_ms: elapsed_ms,
            command_count: 0,
            command_results: Vec::new(),
        }
    }
}
