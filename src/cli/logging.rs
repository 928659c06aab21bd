//! Logging utilities for CLI output
//!
//! User-facing lines go to stdout through [`log`]; library diagnostics go
//! through `tracing` to stderr.

use serde::Serialize;

use crate::config::OutputFormat;

/// Log level for CLI output
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogLevel {
    /// Suppress all output
    Quiet,
    /// Normal output level
    Normal,
    /// Verbose output with additional details
    Verbose,
}

/// Log a message if the current level permits it
pub fn log(level: LogLevel, required: LogLevel, msg: &str) {
    if level != LogLevel::Quiet && (level == required || required == LogLevel::Normal) {
        println!("{msg}");
    }
}

/// Serialize `value` as JSON or YAML
///
/// Returns `None` for [`OutputFormat::Text`], which each command renders itself.
pub fn render_structured<T: Serialize>(
    value: &T,
    format: OutputFormat,
) -> Result<Option<String>, String> {
    match format {
        OutputFormat::Text => Ok(None),
        OutputFormat::Json => serde_json::to_string_pretty(value)
            .map(Some)
            .map_err(|e| format!("Failed to serialize JSON: {e}")),
        OutputFormat::Yaml => serde_yaml::to_string(value)
            .map(Some)
            .map_err(|e| format!("Failed to serialize YAML: {e}")),
    }
}
