use std::io::Write;

use crate::check::CheckExecution;
use crate::error::Result;
use crate::executor::ExecutionSummary;
use crate::result::{Condition, Impact};

use super::OutputFormatter;

/// Color output mode for terminal display.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ColorMode {
    /// Use colors if stdout is a TTY and `NO_COLOR` is not set
    #[default]
    Auto,
    Always,
    Never,
}

mod ansi {
    pub const RED: &str = "\x1b[31m";
    pub const GREEN: &str = "\x1b[32m";
    pub const YELLOW: &str = "\x1b[33m";
    pub const CYAN: &str = "\x1b[36m";
    pub const RESET: &str = "\x1b[0m";
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Status {
    Passed,
    Advisory,
    Blocking,
    Error,
}

impl Status {
    fn of(exec: &CheckExecution) -> Self {
        if exec.is_error() {
            return Self::Error;
        }
        match exec.result.max_impact() {
            Impact::None => Self::Passed,
            Impact::Advisory => Self::Advisory,
            Impact::Blocking => Self::Blocking,
        }
    }

    const fn icon(self) -> &'static str {
        match self {
            Self::Passed => "✓",
            Self::Advisory => "⚠",
            Self::Blocking => "✗",
            Self::Error => "!",
        }
    }

    const fn label(self) -> &'static str {
        match self {
            Self::Passed => "PASSED",
            Self::Advisory => "ADVISORY",
            Self::Blocking => "BLOCKING",
            Self::Error => "ERROR",
        }
    }

    const fn color(self) -> &'static str {
        match self {
            Self::Passed => ansi::GREEN,
            Self::Advisory => ansi::YELLOW,
            Self::Blocking => ansi::RED,
            Self::Error => ansi::CYAN,
        }
    }
}

pub struct TextFormatter {
    use_colors: bool,
}

impl TextFormatter {
    #[must_use]
    pub fn new(mode: ColorMode) -> Self {
        Self {
            use_colors: Self::should_use_colors(mode),
        }
    }

    fn should_use_colors(mode: ColorMode) -> bool {
        match mode {
            ColorMode::Always => true,
            ColorMode::Never => false,
            ColorMode::Auto => {
                if std::env::var("NO_COLOR").is_ok() {
                    return false;
                }
                std::io::IsTerminal::is_terminal(&std::io::stdout())
            }
        }
    }

    fn colorize(&self, text: &str, color: &str) -> String {
        if !self.use_colors {
            return text.to_string();
        }
        format!("{color}{text}{}", ansi::RESET)
    }

    /// The condition shown on the headline: the first one with the highest impact.
    fn headline(exec: &CheckExecution) -> Option<&Condition> {
        let max = exec.result.max_impact();
        exec.result.conditions().iter().find(|c| c.impact == max)
    }

    fn format_execution(&self, exec: &CheckExecution, output: &mut Vec<u8>) {
        let status = Status::of(exec);
        let result = &exec.result;
        let label = self.colorize(status.label(), status.color());

        write!(
            output,
            "{} {label}: {}/{}/{}",
            status.icon(),
            result.group,
            result.kind,
            result.name
        )
        .ok();
        let headline = Self::headline(exec);
        if let Some(condition) = headline {
            write!(output, " [{}] {}", condition.reason, condition.message).ok();
        }
        writeln!(output).ok();

        for condition in result.conditions() {
            if headline.is_some_and(|h| std::ptr::eq(h, condition)) {
                continue;
            }
            writeln!(
                output,
                "   {}={} [{}] {}",
                condition.condition_type, condition.status, condition.reason, condition.message
            )
            .ok();
        }

        for remediation in result.conditions().iter().filter_map(|c| c.remediation.as_deref()) {
            writeln!(output, "   Remediation: {remediation}").ok();
        }

        if let Some(error) = &exec.error {
            writeln!(output, "   Error: {error}").ok();
        }

        if let Some(formatter) = exec.check.formatter() {
            for line in formatter.format_result(result) {
                writeln!(output, "   {line}").ok();
            }
        } else {
            for object in result.impacted() {
                let location = object
                    .namespace
                    .as_ref()
                    .map_or_else(|| object.name.clone(), |ns| format!("{ns}/{}", object.name));
                writeln!(output, "   - {} {location}", object.kind).ok();
            }
        }
    }

    fn format_summary(&self, summary: &ExecutionSummary) -> String {
        let passed = self.colorize(&summary.passed.to_string(), ansi::GREEN);
        let advisory = self.colorize(&summary.advisory.to_string(), ansi::YELLOW);
        let blocking = self.colorize(&summary.blocking.to_string(), ansi::RED);
        let errors = self.colorize(&summary.errors.to_string(), ansi::CYAN);
        format!(
            "Summary: {} checks run, {passed} passed, {advisory} advisory, {blocking} blocking, {errors} errors",
            summary.total
        )
    }
}

impl Default for TextFormatter {
    fn default() -> Self {
        Self::new(ColorMode::Auto)
    }
}

impl OutputFormatter for TextFormatter {
    fn format(&self, executions: &[CheckExecution]) -> Result<String> {
        let mut sorted: Vec<&CheckExecution> = executions.iter().collect();
        sorted.sort_by(|a, b| {
            (&a.result.group, &a.result.kind, &a.result.name).cmp(&(
                &b.result.group,
                &b.result.kind,
                &b.result.name,
            ))
        });

        let mut output = Vec::new();
        for exec in sorted {
            self.format_execution(exec, &mut output);
        }
        if !executions.is_empty() {
            writeln!(output).ok();
        }

        let summary = ExecutionSummary::from_executions(executions);
        writeln!(output, "{}", self.format_summary(&summary)).ok();

        Ok(String::from_utf8_lossy(&output).to_string())
    }
}

#[cfg(test)]
#[path = "text_tests.rs"]
mod tests;
