use std::fmt;
use std::sync::Arc;

use semver::Version;

use crate::error::{LintError, Result};
use crate::reader::{Object, Reader};

/// Read-only context every check is evaluated against.
///
/// One `Target` is built per run and shared by reference across all checks.
#[derive(Clone)]
pub struct Target {
    pub client: Arc<dyn Reader>,
    pub current_version: Option<Version>,
    pub target_version: Option<Version>,
    /// Single object the run is focused on, if any.
    pub resource: Option<Object>,
}

impl Target {
    #[must_use]
    pub fn new(client: Arc<dyn Reader>) -> Self {
        Self {
            client,
            current_version: None,
            target_version: None,
            resource: None,
        }
    }

    #[must_use]
    pub fn with_current_version(mut self, version: Option<Version>) -> Self {
        self.current_version = version;
        self
    }

    #[must_use]
    pub fn with_target_version(mut self, version: Option<Version>) -> Self {
        self.target_version = version;
        self
    }

    #[must_use]
    pub fn with_resource(mut self, resource: Object) -> Self {
        self.resource = Some(resource);
        self
    }

    #[must_use]
    pub fn reader(&self) -> &dyn Reader {
        self.client.as_ref()
    }

    /// True when a target version is set and its major version is at least `major`.
    #[must_use]
    pub fn targets_major_at_least(&self, major: u64) -> bool {
        self.target_version.as_ref().is_some_and(|v| v.major >= major)
    }

    /// True when the run crosses from below `major` to `major` or later.
    ///
    /// An unknown current version counts as "below".
    #[must_use]
    pub fn crosses_major(&self, major: u64) -> bool {
        let from_below = self.current_version.as_ref().is_none_or(|v| v.major < major);
        from_below && self.targets_major_at_least(major)
    }

    /// Target version rendered for annotations, empty when unset.
    #[must_use]
    pub fn target_version_string(&self) -> String {
        self.target_version
            .as_ref()
            .map(ToString::to_string)
            .unwrap_or_default()
    }
}

impl fmt::Debug for Target {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Target")
            .field("current_version", &self.current_version)
            .field("target_version", &self.target_version)
            .field("resource", &self.resource)
            .finish_non_exhaustive()
    }
}

/// Parse a platform version, tolerating a leading `v` and a missing patch
/// component (`3.0` reads as `3.0.0`).
///
/// # Errors
/// Returns `InvalidVersion` if the value is not a semantic version.
pub fn parse_version(value: &str) -> Result<Version> {
    let trimmed = value.trim();
    let trimmed = trimmed.strip_prefix('v').unwrap_or(trimmed);
    let normalized = if trimmed.split('.').count() == 2 && !trimmed.contains('-') {
        format!("{trimmed}.0")
    } else {
        trimmed.to_string()
    };
    Version::parse(&normalized).map_err(|source| LintError::InvalidVersion {
        value: value.to_string(),
        source,
    })
}
