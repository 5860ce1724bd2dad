use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::check::{CheckGroup, parse_version};
use crate::error::Result;
use crate::executor::ExecutionSummary;
use crate::selector::WILDCARD;

/// Supported config version.
pub const CONFIG_VERSION: &str = "1";

/// Contents of `.odh-lint.toml`. Every field is optional.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct Config {
    #[serde(default)]
    pub version: Option<String>,

    #[serde(default)]
    pub run: RunConfig,

    #[serde(default)]
    pub versions: VersionsConfig,
}

/// When a run should exit non-zero because of what it found.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FailOn {
    /// Fail on blocking conditions only.
    #[default]
    Blocking,
    /// Fail on advisory or blocking conditions.
    Advisory,
    /// Never fail because of conditions. Execution errors still fail.
    Never,
}

impl FailOn {
    /// Whether a run with this summary should exit non-zero.
    #[must_use]
    pub const fn is_failure(self, summary: &ExecutionSummary) -> bool {
        if summary.has_errors() {
            return true;
        }
        match self {
            Self::Blocking => summary.blocking > 0,
            Self::Advisory => summary.blocking > 0 || summary.advisory > 0,
            Self::Never => false,
        }
    }
}

/// `[run]` table.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct RunConfig {
    /// Default selection patterns when none are given on the command line.
    #[serde(default = "default_checks")]
    pub checks: Vec<String>,

    /// Optional group filter, singular or plural (`component`, `components`).
    #[serde(default)]
    pub group: Option<String>,

    /// Run deadline in seconds. `0` disables it.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    #[serde(default)]
    pub fail_on: FailOn,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            checks: default_checks(),
            group: None,
            timeout_secs: default_timeout_secs(),
            fail_on: FailOn::default(),
        }
    }
}

impl RunConfig {
    /// # Errors
    /// Returns a `Config` error for an unknown group name.
    pub fn group(&self) -> Result<Option<CheckGroup>> {
        self.group.as_deref().map(str::parse).transpose()
    }

    #[must_use]
    pub const fn timeout(&self) -> Option<Duration> {
        if self.timeout_secs == 0 {
            None
        } else {
            Some(Duration::from_secs(self.timeout_secs))
        }
    }
}

/// `[versions]` table.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct VersionsConfig {
    /// Default target version.
    #[serde(default)]
    pub target: Option<String>,
}

impl VersionsConfig {
    /// # Errors
    /// Returns `InvalidVersion` if the configured target does not parse.
    pub fn target(&self) -> Result<Option<semver::Version>> {
        self.target.as_deref().map(parse_version).transpose()
    }
}

fn default_checks() -> Vec<String> {
    vec![WILDCARD.to_string()]
}

const fn default_timeout_secs() -> u64 {
    300
}

#[cfg(test)]
#[path = "model_tests.rs"]
mod tests;
