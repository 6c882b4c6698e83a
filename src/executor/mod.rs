//! Statement execution against a live database.

pub mod collection;
pub mod confirmation;
pub mod database;
pub mod result;

pub use collection::execute_collection;
pub use confirmation::confirm_run;
pub use database::{execute_admin, execute_raw};
pub use result::{CommandExecutionResult, ScriptExecutionResult};
