//! Script interpretation loop.
//!
//! The runner tokenizes a script, classifies each statement, dispatches
//! it against the session, and aggregates per-command results. A failed
//! statement is recorded and the run continues; statements execute
//! strictly in order because `use` changes what later statements mean.

use std::time::Instant;

use tracing::{info, warn};

use crate::connection::Session;
use crate::error::Result;
use crate::executor::{
    CommandExecutionResult, ScriptExecutionResult, execute_admin, execute_collection, execute_raw,
};
use crate::parser::{Statement, split_statements};

/// Runs scripts against a [`Session`].
pub struct ScriptRunner {
    session: Session,
}

impl ScriptRunner {
    pub fn new(session: Session) -> Self {
        Self { session }
    }

    /// Execute every statement of a script and aggregate the outcomes.
    ///
    /// An empty or comment-only script yields a successful result with
    /// zero commands.
    pub async fn run(&mut self, script: &str) -> ScriptExecutionResult {
        let started = Instant::now();
        let statements = split_statements(script);
        info!(count = statements.len(), "running script");

        let mut results = Vec::with_capacity(statements.len());
        for statement in statements {
            results.push(self.run_statement(&statement).await);
        }

        let result = ScriptExecutionResult::from_commands(
            results,
            started.elapsed().as_millis() as u64,
        );
        info!(
            success = result.success,
            commands = result.command_count,
            elapsed_ms = result.execution_time_ms,
            "script finished"
        );
        result
    }

    async fn run_statement(&mut self, statement: &str) -> CommandExecutionResult {
        let started = Instant::now();

        match self.dispatch(statement).await {
            Ok(result) => CommandExecutionResult::success(
                statement,
                result,
                started.elapsed().as_millis() as u64,
            ),
            Err(error) => {
                warn!(statement, %error, "statement failed");
                CommandExecutionResult::failure(
                    statement,
                    &error,
                    started.elapsed().as_millis() as u64,
                )
            }
        }
    }

    async fn dispatch(&mut self, text: &str) -> Result<String> {
        match Statement::parse(text)? {
            Statement::Use(name) => {
                self.session.switch_database(&name);
                Ok(format!("Switched to database {name}"))
            }
            Statement::Collection {
                collection,
                method,
                args,
            } => {
                execute_collection(self.session.database(), &collection, &method, &args, text)
                    .await
            }
            Statement::Admin(admin) => execute_admin(self.session.database(), &admin).await,
            Statement::Raw(raw) => execute_raw(self.session.database(), &raw).await,
        }
    }

    /// Name of the session's current database.
    pub fn database_name(&self) -> &str {
        self.session.database_name()
    }
}
