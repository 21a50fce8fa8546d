//! Output formatting for CLI commands.

use serde::{Deserialize, Serialize};

use crate::checker::CheckerReport;
use crate::cli::args::{OutputFormat, ToponymArgs};
use crate::error::Result;
use crate::spelling::lookup::SuggestItem;
use crate::suggest::suggestor::Suggestion;

/// Result structure for spelling correction.
#[derive(Debug, Serialize, Deserialize)]
pub struct CorrectionResult {
    pub context: String,
    pub input: String,
    pub correction: String,
    pub changed: bool,
}

/// Result structure for suggestions.
#[derive(Debug, Serialize, Deserialize)]
pub struct SuggestionsResult {
    pub context: String,
    pub query: String,
    pub suggestions: Vec<Suggestion>,
}

/// Result structure for candidate lookup.
#[derive(Debug, Serialize, Deserialize)]
pub struct LookupResult {
    pub context: String,
    pub term: String,
    pub max_distance: usize,
    pub candidates: Vec<SuggestItem>,
}

/// Result structure for distance computation.
#[derive(Debug, Serialize, Deserialize)]
pub struct DistanceResult {
    pub a: String,
    pub b: String,
    pub distance: usize,
}

/// Training statistics.
#[derive(Debug, Serialize, Deserialize)]
pub struct StatsResult {
    pub spelling_contexts: Vec<String>,
    pub suggestion_contexts: usize,
    pub report: CheckerReport,
    pub duration_ms: u64,
}

/// Output a result in the specified format.
pub fn output_result<T: Serialize>(message: &str, result: &T, args: &ToponymArgs) -> Result<()> {
    match args.output_format {
        OutputFormat::Human => output_human(message, result, args),
        OutputFormat::Json => output_json(result, args),
    }
}

/// Output in human-readable format.
fn output_human<T: Serialize>(message: &str, result: &T, args: &ToponymArgs) -> Result<()> {
    if args.verbosity() > 0 {
        println!("{message}");
        println!();
    }

    let value = serde_json::to_value(result)?;
    for line in human_lines(&value) {
        println!("{line}");
    }
    Ok(())
}

/// Render a JSON value as indented `key: value` lines.
///
/// Arrays of objects become one line per element.
fn human_lines(value: &serde_json::Value) -> Vec<String> {
    let mut lines = Vec::new();
    match value {
        serde_json::Value::Object(obj) => {
            for (key, val) in obj {
                match val {
                    serde_json::Value::Array(items) => {
                        lines.push(format!("{key}: ({})", items.len()));
                        for item in items {
                            lines.push(format!("  - {}", format_value(item)));
                        }
                    }
                    serde_json::Value::Object(_) => {
                        lines.push(format!("{key}:"));
                        lines.extend(human_lines(val).into_iter().map(|line| format!("  {line}")));
                    }
                    _ => lines.push(format!("{key}: {}", format_value(val))),
                }
            }
        }
        _ => lines.push(format_value(value)),
    }
    lines
}

/// Output in JSON format.
fn output_json<T: Serialize>(result: &T, args: &ToponymArgs) -> Result<()> {
    let json = if args.pretty {
        serde_json::to_string_pretty(result)?
    } else {
        serde_json::to_string(result)?
    };

    println!("{json}");
    Ok(())
}

/// Format a JSON value for display.
fn format_value(value: &serde_json::Value) -> String {
    match value {
        serde_json::Value::String(s) => s.clone(),
        serde_json::Value::Number(n) => n.to_string(),
        serde_json::Value::Bool(b) => b.to_string(),
        serde_json::Value::Array(arr) => {
            let formatted_values = arr.iter().map(format_value).collect::<Vec<_>>().join(", ");
            format!("[{formatted_values}]")
        }
        serde_json::Value::Object(obj) => obj
            .iter()
            .map(|(key, val)| format!("{key}={}", format_value(val)))
            .collect::<Vec<_>>()
            .join(", "),
        serde_json::Value::Null => "null".to_string(),
    }
}
