//! Interactive confirmation before running a script.

use std::io::{self, Write};

use crate::error::Result;

/// Ask the user to confirm the run. Accepts `y` or `yes` (any case);
/// anything else declines.
pub fn confirm_run(script: &str, database: &str) -> Result<bool> {
    println!("About to run against database '{database}':");
    println!("{script}");
    print!("Run the script? [y/N] ");
    io::stdout().flush()?;

    let mut answer = String::new();
    io::stdin().read_line(&mut answer)?;

    let answer = answer.trim().to_lowercase();
    Ok(answer == "y" || answer == "yes")
}
