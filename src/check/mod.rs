//! The pluggable unit of diagnosis.
//!
//! A [`Check`] is constructed once at startup, registered once, and then
//! evaluated against a fresh [`Target`] for every run. Checks hold no mutable
//! state beyond the configuration set at construction.

mod target;

pub use target::{Target, parse_version};

use std::fmt;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::context::RunContext;
use crate::error::{LintError, Result};
use crate::result::DiagnosticResult;

/// Coarse category a check belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CheckGroup {
    Component,
    Service,
    Workload,
    Dependency,
}

impl CheckGroup {
    pub const ALL: [Self; 4] = [
        Self::Component,
        Self::Service,
        Self::Workload,
        Self::Dependency,
    ];

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Component => "component",
            Self::Service => "service",
            Self::Workload => "workload",
            Self::Dependency => "dependency",
        }
    }

    /// Plural selection shortcut (`components`, `services`, ...).
    #[must_use]
    pub const fn shortcut(self) -> &'static str {
        match self {
            Self::Component => "components",
            Self::Service => "services",
            Self::Workload => "workloads",
            Self::Dependency => "dependencies",
        }
    }

    #[must_use]
    pub fn from_shortcut(pattern: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|g| g.shortcut() == pattern)
    }
}

impl fmt::Display for CheckGroup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for CheckGroup {
    type Err = LintError;

    /// Accepts both the singular name and the plural shortcut.
    fn from_str(s: &str) -> Result<Self> {
        let lower = s.to_lowercase();
        Self::ALL
            .into_iter()
            .find(|g| g.as_str() == lower || g.shortcut() == lower)
            .ok_or_else(|| LintError::Config(format!("Unknown check group: {s}")))
    }
}

/// Identity of a check and of the results it produces.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CheckMeta {
    /// Globally unique dotted ID, e.g. `components.kserve.serverless-removal`.
    pub id: String,
    pub name: String,
    pub description: String,
    pub group: CheckGroup,
    /// Subject of the check, e.g. `kserve`. Mirrored into `DiagnosticResult::kind`.
    pub kind: String,
    /// Short type of the check, e.g. `serverless-removal`. Mirrored into `DiagnosticResult::name`.
    pub check_type: String,
}

impl CheckMeta {
    #[must_use]
    pub fn new(
        group: CheckGroup,
        kind: impl Into<String>,
        check_type: impl Into<String>,
        name: impl Into<String>,
        description: impl Into<String>,
    ) -> Self {
        let kind = kind.into();
        let check_type = check_type.into();
        Self {
            id: format!("{}.{kind}.{check_type}", group.shortcut()),
            name: name.into(),
            description: description.into(),
            group,
            kind,
            check_type,
        }
    }

    /// Replace the derived `group.kind.type` ID.
    #[must_use]
    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = id.into();
        self
    }

    /// Empty result carrying this check's identity and description.
    #[must_use]
    pub fn new_result(&self) -> DiagnosticResult {
        DiagnosticResult::new(
            self.group.as_str(),
            &self.kind,
            &self.check_type,
            &self.description,
        )
    }
}

/// Optional capability: checks that want their results rendered differently
/// in text output implement this and return it from [`Check::formatter`].
pub trait ResultFormatter {
    /// Render the lines shown under the check's summary line.
    fn format_result(&self, result: &DiagnosticResult) -> Vec<String>;
}

/// One independently pluggable diagnostic rule.
pub trait Check: Send + Sync {
    fn meta(&self) -> &CheckMeta;

    fn id(&self) -> &str {
        &self.meta().id
    }

    fn name(&self) -> &str {
        &self.meta().name
    }

    fn description(&self) -> &str {
        &self.meta().description
    }

    fn group(&self) -> CheckGroup {
        self.meta().group
    }

    /// Whether the check is relevant for this target.
    ///
    /// # Errors
    /// An error is treated by the executor as "does not apply".
    fn can_apply(&self, target: &Target) -> Result<bool>;

    /// Evaluate the check.
    ///
    /// # Errors
    /// Infrastructure failures; the executor turns them into an `Unknown` result.
    fn validate(&self, ctx: &RunContext, target: &Target) -> Result<DiagnosticResult>;

    fn formatter(&self) -> Option<&dyn ResultFormatter> {
        None
    }
}

impl fmt::Debug for dyn Check {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Check")
            .field("id", &self.id())
            .field("group", &self.group())
            .finish_non_exhaustive()
    }
}

/// Outcome of running one check in one run.
///
/// A result is always present; `error` keeps the original failure when the
/// result was synthesized by the executor.
#[derive(Debug)]
pub struct CheckExecution {
    pub check: Arc<dyn Check>,
    pub result: DiagnosticResult,
    pub error: Option<LintError>,
}

impl CheckExecution {
    #[must_use]
    pub const fn is_error(&self) -> bool {
        self.error.is_some()
    }
}

#[cfg(test)]
#[path = "mod_tests.rs"]
mod tests;
