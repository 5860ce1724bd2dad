//! Runs a selected set of checks against one target.
//!
//! Checks run sequentially in the order given. Each check is isolated into its
//! own [`CheckExecution`]: an error from `validate` or a structurally invalid
//! result becomes a synthesized `Unknown` result with the original error kept
//! alongside. Applicability errors skip the check. Only cancellation of the
//! [`RunContext`] truncates a run.

use std::sync::Arc;
use std::time::Instant;

use serde::Serialize;

use crate::check::{Check, CheckExecution, CheckGroup, Target};
use crate::context::RunContext;
use crate::error::{LintError, Result};
use crate::reader::ErrorKind;
use crate::registry::CheckRegistry;
use crate::result::{Condition, ConditionStatus, DiagnosticResult, Impact, condition_type, reason};

pub struct Executor<'r> {
    registry: &'r CheckRegistry,
}

impl<'r> Executor<'r> {
    #[must_use]
    pub const fn new(registry: &'r CheckRegistry) -> Self {
        Self { registry }
    }

    /// Run every registered check.
    #[must_use]
    pub fn execute_all(&self, ctx: &RunContext, target: &Target) -> Vec<CheckExecution> {
        Self::execute_checks(ctx, target, &self.registry.list_all())
    }

    /// Run the checks selected by `patterns` and the optional group filter.
    ///
    /// # Errors
    /// Returns `InvalidPattern` before any check runs if a pattern does not parse.
    pub fn execute_selective<S: AsRef<str>>(
        &self,
        ctx: &RunContext,
        target: &Target,
        patterns: &[S],
        group: Option<CheckGroup>,
    ) -> Result<Vec<CheckExecution>> {
        let checks = self.registry.list_by_patterns(patterns, group)?;
        Ok(Self::execute_checks(ctx, target, &checks))
    }

    /// Run `checks` in order, stopping early once `ctx` is done.
    #[must_use]
    pub fn execute_checks(
        ctx: &RunContext,
        target: &Target,
        checks: &[Arc<dyn Check>],
    ) -> Vec<CheckExecution> {
        let mut executions = Vec::with_capacity(checks.len());

        for (idx, check) in checks.iter().enumerate() {
            if ctx.is_done() {
                tracing::info!(
                    completed = executions.len(),
                    remaining = checks.len() - idx,
                    "run cancelled, returning partial results"
                );
                break;
            }

            match check.can_apply(target) {
                Ok(true) => {}
                Ok(false) => {
                    tracing::debug!(check = %check.id(), "skipped: not applicable");
                    continue;
                }
                Err(e) => {
                    tracing::debug!(check = %check.id(), error = %e, "skipped: applicability error");
                    continue;
                }
            }

            executions.push(Self::execute_check(ctx, target, check));
        }

        executions
    }

    fn execute_check(ctx: &RunContext, target: &Target, check: &Arc<dyn Check>) -> CheckExecution {
        let started = Instant::now();
        let outcome = check.validate(ctx, target);
        tracing::debug!(
            check = %check.id(),
            elapsed_ms = started.elapsed().as_millis(),
            "check finished"
        );

        let (result, error) = match outcome {
            Err(error) => {
                tracing::warn!(check = %check.id(), %error, "check failed");
                (error_result(check.as_ref(), &error), Some(error))
            }
            Ok(result) => match result.validate() {
                Ok(()) => (result, None),
                Err(invalid) => {
                    tracing::warn!(check = %check.id(), error = %invalid, "check returned an invalid result");
                    let error = LintError::from(invalid);
                    (invalid_result(check.as_ref(), &error), Some(error))
                }
            },
        };

        CheckExecution {
            check: Arc::clone(check),
            result,
            error,
        }
    }
}

/// Reason and message for a validation failure.
#[must_use]
pub fn classify_error(error: &LintError) -> (&'static str, String) {
    match error.reader_kind() {
        Some(ErrorKind::Forbidden | ErrorKind::Unauthorized) => (
            reason::API_ACCESS_DENIED,
            format!("Insufficient permissions to access cluster resources: {error}"),
        ),
        Some(ErrorKind::Timeout) => (
            reason::API_TIMEOUT,
            format!("Timed out waiting for the cluster API: {error}"),
        ),
        Some(ErrorKind::Unavailable) => (
            reason::API_UNAVAILABLE,
            format!("Cluster API is unavailable: {error}"),
        ),
        _ => (
            reason::CHECK_EXECUTION_FAILED,
            format!("Check execution failed: {error}"),
        ),
    }
}

fn synthesized(check: &dyn Check, reason: &str, message: String) -> DiagnosticResult {
    let mut result = check.meta().new_result();
    if result.group.is_empty() {
        result.group = check.group().as_str().to_string();
    }
    if result.kind.is_empty() {
        result.kind = check.id().to_string();
    }
    if result.name.is_empty() {
        result.name = check.id().to_string();
    }
    result.set_condition(
        Condition::new(
            condition_type::VALIDATED,
            ConditionStatus::Unknown,
            reason,
            message,
        )
        .with_impact(Impact::Advisory),
    );
    result
}

fn error_result(check: &dyn Check, error: &LintError) -> DiagnosticResult {
    let (reason, message) = classify_error(error);
    synthesized(check, reason, message)
}

fn invalid_result(check: &dyn Check, error: &LintError) -> DiagnosticResult {
    synthesized(
        check,
        reason::INVALID_CHECK_RESULT,
        format!("Check returned an invalid result: {error}"),
    )
}

/// Counts over one run, used for the summary line and the exit code.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ExecutionSummary {
    pub total: usize,
    pub passed: usize,
    pub advisory: usize,
    pub blocking: usize,
    pub errors: usize,
}

impl ExecutionSummary {
    #[must_use]
    pub fn from_executions(executions: &[CheckExecution]) -> Self {
        executions.iter().fold(Self::default(), |mut summary, exec| {
            summary.total += 1;
            if exec.is_error() {
                summary.errors += 1;
            }
            match exec.result.max_impact() {
                Impact::Blocking => summary.blocking += 1,
                Impact::Advisory => summary.advisory += 1,
                Impact::None => summary.passed += 1,
            }
            summary
        })
    }

    #[must_use]
    pub const fn has_blocking(&self) -> bool {
        self.blocking > 0
    }

    #[must_use]
    pub const fn has_errors(&self) -> bool {
        self.errors > 0
    }
}

#[cfg(test)]
#[path = "executor_tests.rs"]
mod tests;
