mod json;
mod text;
mod yaml;

pub use json::JsonFormatter;
pub use text::{ColorMode, TextFormatter};
pub use yaml::YamlFormatter;

use serde::Serialize;

use crate::check::CheckExecution;
use crate::error::Result;
use crate::executor::ExecutionSummary;
use crate::result::DiagnosticResult;

/// Renders the executions of one run.
pub trait OutputFormatter {
    /// # Errors
    /// Returns an error if serialization fails.
    fn format(&self, executions: &[CheckExecution]) -> Result<String>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
    Yaml,
}

impl OutputFormat {
    #[must_use]
    pub fn formatter(self, color: ColorMode) -> Box<dyn OutputFormatter> {
        match self {
            Self::Text => Box::new(TextFormatter::new(color)),
            Self::Json => Box::new(JsonFormatter),
            Self::Yaml => Box::new(YamlFormatter),
        }
    }
}

impl std::str::FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "text" => Ok(Self::Text),
            "json" => Ok(Self::Json),
            "yaml" | "yml" => Ok(Self::Yaml),
            _ => Err(format!("Unknown output format: {s}")),
        }
    }
}

/// Document shape shared by the structured formatters.
#[derive(Serialize)]
struct Report<'a> {
    summary: ExecutionSummary,
    results: Vec<ReportEntry<'a>>,
}

#[derive(Serialize)]
struct ReportEntry<'a> {
    check: &'a str,
    #[serde(flatten)]
    result: &'a DiagnosticResult,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
}

impl<'a> Report<'a> {
    fn new(executions: &'a [CheckExecution]) -> Self {
        Self {
            summary: ExecutionSummary::from_executions(executions),
            results: executions
                .iter()
                .map(|exec| ReportEntry {
                    check: exec.check.id(),
                    result: &exec.result,
                    error: exec.error.as_ref().map(ToString::to_string),
                })
                .collect(),
        }
    }
}

#[cfg(test)]
#[path = "mod_tests.rs"]
mod tests;
