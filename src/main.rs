//! mongoscript - run MongoDB shell-style scripts.
//!
//! # Usage
//!
//! ```bash
//! # Inline script
//! mongoscript mongodb://localhost:27017 -d testdb -s "db.users.find({})"
//!
//! # Script file, no confirmation prompt
//! mongoscript -f seed.mongodb -y
//! ```

use std::process::ExitCode;
use std::time::Instant;

use mongoscript::cli::{CliArgs, ScriptSource};
use mongoscript::config::Config;
use mongoscript::connection::Session;
use mongoscript::error::Result;
use mongoscript::executor::{ScriptExecutionResult, confirm_run};
use mongoscript::report::{ReportOptions, render};
use mongoscript::runner::ScriptRunner;
use mongoscript::script::ScriptLoader;

use clap::Parser;

#[tokio::main]
async fn main() -> ExitCode {
    match run().await {
        Ok(success) => {
            if success {
                ExitCode::SUCCESS
            } else {
                ExitCode::FAILURE
            }
        }
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}

/// Main application logic. Returns whether the script run succeeded.
async fn run() -> Result<bool> {
    let args = CliArgs::parse();

    let config = match &args.config_file {
        Some(path) => Config::from_file(path)?,
        None => Config::load()?,
    };

    initialize_logging(&args, &config);

    let script = load_script(&args, &config)?;
    let uri = args.resolve_uri(&config);
    let database = args.resolve_database(&uri);

    if !args.yes && !confirm_run(&script, &database)? {
        println!("Aborted.");
        return Ok(false);
    }

    let options = ReportOptions {
        format: args.report_format(&config)?,
        color: config.display.color_output && !args.no_color,
        show_timing: config.display.show_timing,
    };

    let started = Instant::now();
    let result = match Session::connect(&uri, &database, &config).await {
        Ok(session) => ScriptRunner::new(session).run(&script).await,
        Err(error) => {
            ScriptExecutionResult::aborted(&error, started.elapsed().as_millis() as u64)
        }
    };

    print!("{}", render(&result, &options));
    Ok(result.success && result.all_commands_succeeded())
}

fn load_script(args: &CliArgs, config: &Config) -> Result<String> {
    match args.script_source()? {
        ScriptSource::Inline(text) => Ok(text),
        ScriptSource::File(path) => {
            ScriptLoader::new(config.script.max_size_bytes).load_file(path)
        }
    }
}

fn initialize_logging(args: &CliArgs, config: &Config) {
    let level = args.log_level(config).to_tracing_level();

    let subscriber = tracing_subscriber::fmt()
        .with_max_level(level)
        .with_target(false);

    if config.logging.timestamps {
        subscriber.init();
    } else {
        subscriber.without_time().init();
    }
}
