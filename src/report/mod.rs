//! Execution report rendering.
//!
//! Two formats: a colored console report with per-command detail and a
//! summary table, and the raw execution result as pretty-printed JSON.

use nu_ansi_term::Color;
use tabled::{builder::Builder, settings::Style};

use crate::config::ReportFormat;
use crate::executor::{CommandExecutionResult, ScriptExecutionResult};

/// Rendering options resolved from config and CLI flags.
#[derive(Debug, Clone, Copy)]
pub struct ReportOptions {
    pub format: ReportFormat,
    pub color: bool,
    pub show_timing: bool,
}

/// Render a script execution result to a printable string.
pub fn render(result: &ScriptExecutionResult, options: &ReportOptions) -> String {
    match options.format {
        ReportFormat::Console => render_console(result, options),
        ReportFormat::Json => serde_json::to_string_pretty(result)
            .unwrap_or_else(|e| format!("{{\"error\": \"failed to render report: {e}\"}}")),
    }
}

fn render_console(result: &ScriptExecutionResult, options: &ReportOptions) -> String {
    let mut out = String::new();

    for (i, command) in result.command_results.iter().enumerate() {
        render_command(&mut out, i + 1, command, options);
        out.push('\n');
    }

    if !result.command_results.is_empty() {
        out.push_str(&summary_table(result, options));
        out.push('\n');
    }

    let verdict = if !result.success {
        paint(options, Color::Red, "Script aborted")
    } else if result.all_commands_succeeded() {
        paint(options, Color::Green, "Script completed successfully")
    } else {
        paint(
            options,
            Color::Red,
            &format!("Script completed with {} failed command(s)", result.failed_count()),
        )
    };
    out.push_str(&format!(
        "{verdict} ({} command(s), {} ms)\n",
        result.command_count, result.execution_time_ms
    ));

    if result.command_results.is_empty() {
        if let Some(message) = &result.error_message {
            out.push_str(&format!("{}\n", paint(options, Color::Red, message)));
            if let Some(detail) = &result.error_detail {
                out.push_str(&format!("{detail}\n"));
            }
        }
    }

    out
}

fn render_command(
    out: &mut String,
    index: usize,
    command: &CommandExecutionResult,
    options: &ReportOptions,
) {
    let header = format!("[{index}] {}", command.command);
    out.push_str(&format!("{}\n", paint(options, Color::Cyan, &header)));

    if command.success {
        if let Some(result) = &command.result {
            out.push_str(&format!(
                "    {}\n",
                paint(options, Color::Green, result)
            ));
        }
    } else {
        if let Some(message) = &command.error_message {
            out.push_str(&format!("    {}\n", paint(options, Color::Red, message)));
        }
        if let Some(detail) = &command.error_detail {
            for line in detail.lines() {
                out.push_str(&format!("    {line}\n"));
            }
        }
    }

    if options.show_timing {
        out.push_str(&format!("    {} ms\n", command.execution_time_ms));
    }
}

fn summary_table(result: &ScriptExecutionResult, options: &ReportOptions) -> String {
    let mut builder = Builder::default();
    builder.push_record(["#", "Status", "Time (ms)", "Command"]);

    for (i, command) in result.command_results.iter().enumerate() {
        let status = if command.success {
            paint(options, Color::Green, "ok")
        } else {
            paint(options, Color::Red, "failed")
        };
        builder.push_record([
            (i + 1).to_string(),
            status,
            command.execution_time_ms.to_string(),
            truncate(&command.command, 60),
        ]);
    }

    let mut table = builder.build();
    table.with(Style::rounded());
    table.to_string()
}

fn paint(options: &ReportOptions, color: Color, text: &str) -> String {
    if options.color {
        color.paint(text).to_string()
    } else {
        text.to_string()
    }
}

fn truncate(text: &str, max_chars: usize) -> String {
    if text.chars().count() <= max_chars {
        text.to_string()
    } else {
        let cut: String = text.chars().take(max_chars - 3).collect();
        format!("{cut}...")
    }
}

#[cfg(test)]
mod tests {
    use crate::error::{ExecutionError, MongoscriptError};

    use super::*;

    fn plain_options(format: ReportFormat) -> ReportOptions {
        ReportOptions {
            format,
            color: false,
            show_timing: true,
        }
    }

    fn sample_result() -> ScriptExecutionResult {
        let err = MongoscriptError::from(ExecutionError::UnsupportedCommand(
            "db.a.bad()".to_string(),
        ));
        ScriptExecutionResult::from_commands(
            vec![
                CommandExecutionResult::success("db.a.find({})", "Found 0 documents", 2),
                CommandExecutionResult::failure("db.a.bad()", &err, 1),
            ],
            3,
        )
    }

    #[test]
    fn test_console_report_contains_results_and_verdict() {
        let rendered = render(&sample_result(), &plain_options(ReportFormat::Console));
        assert!(rendered.contains("[1] db.a.find({})"));
        assert!(rendered.contains("Found 0 documents"));
        assert!(rendered.contains("Command not supported: db.a.bad()"));
        assert!(rendered.contains("Script completed with 1 failed command(s)"));
    }

    #[test]
    fn test_json_report_is_valid_json() {
        let rendered = render(&sample_result(), &plain_options(ReportFormat::Json));
        let value: serde_json::Value = serde_json::from_str(&rendered).unwrap();
        assert_eq!(value["success"], serde_json::Value::Bool(true));
        assert_eq!(value["command_count"], 2);
        assert_eq!(
            value["command_results"][1]["success"],
            serde_json::Value::Bool(false)
        );
    }

    #[test]
    fn test_empty_script_report() {
        let result = ScriptExecutionResult::from_commands(Vec::new(), 0);
        let rendered = render(&result, &plain_options(ReportFormat::Console));
        assert!(rendered.contains("Script completed successfully"));
        assert!(rendered.contains("0 command(s)"));
    }

    #[test]
    fn test_truncate() {
        assert_eq!(truncate("short", 60), "short");
        let long = "x".repeat(100);
        let cut = truncate(&long, 60);
        assert_eq!(cut.chars().count(), 60);
        assert!(cut.ends_with("..."));
    }
}
