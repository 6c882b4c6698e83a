//! Database-level operation execution.

use bson::doc;
use mongodb::Database;
use tracing::debug;

use crate::error::{ExecutionError, Result};
use crate::parser::{AdminStatement, parse_document};

/// Execute a database-level administrative operation.
pub async fn execute_admin(db: &Database, statement: &AdminStatement) -> Result<String> {
    debug!(database = db.name(), ?statement, "executing admin operation");

    match statement {
        AdminStatement::CreateCollection(name) => {
            db.create_collection(name).await?;
            Ok(format!("Collection '{name}' created"))
        }
        AdminStatement::DropDatabase => {
            let name = db.name().to_string();
            db.drop().await?;
            Ok(format!("Database '{name}' dropped"))
        }
        AdminStatement::ListCollections => {
            let names = db.list_collection_names().await?;
            Ok(names.join(", "))
        }
        AdminStatement::RunCommand(args) => {
            let command = parse_document(args)?;
            if command.is_empty() {
                return Err(ExecutionError::InvalidParameters(
                    "runCommand requires a command document".to_string(),
                )
                .into());
            }
            let result = db.run_command(command).await?;
            Ok(result.to_string())
        }
        AdminStatement::Stats => {
            let result = db.run_command(doc! { "dbStats": 1 }).await?;
            Ok(result.to_string())
        }
    }
}

/// Fallback for statements that match no recognized shape: if the whole
/// text parses as a command document, hand it to the server; otherwise
/// the statement is unsupported.
pub async fn execute_raw(db: &Database, text: &str) -> Result<String> {
    let Ok(command) = parse_document(text) else {
        return Err(ExecutionError::UnsupportedCommand(text.to_string()).into());
    };
    if command.is_empty() {
        return Err(ExecutionError::UnsupportedCommand(text.to_string()).into());
    }

    debug!(database = db.name(), "executing raw command document");
    let result = db.run_command(command).await?;
    Ok(result.to_string())
}
