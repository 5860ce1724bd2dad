//! Well-known annotation keys, condition types and reasons.

use std::sync::LazyLock;

use regex::Regex;

pub mod annotation {
    pub const MANAGEMENT_STATE: &str = "component.opendatahub.io/management-state";
    pub const TARGET_VERSION: &str = "check.opendatahub.io/target-version";
    pub const CURRENT_VERSION: &str = "check.opendatahub.io/current-version";
    pub const IMPACTED_COUNT: &str = "workload.opendatahub.io/impacted-count";
    pub const APPLICATIONS_NAMESPACE: &str = "platform.opendatahub.io/applications-namespace";
}

pub mod condition_type {
    pub const VALIDATED: &str = "Validated";
    pub const AVAILABLE: &str = "Available";
    pub const CONFIGURED: &str = "Configured";
    pub const COMPATIBLE: &str = "Compatible";
    pub const MIGRATION_REQUIRED: &str = "MigrationRequired";
}

pub mod reason {
    pub const RESOURCE_NOT_FOUND: &str = "ResourceNotFound";
    pub const COMPONENT_NOT_CONFIGURED: &str = "ComponentNotConfigured";
    pub const REQUIREMENTS_MET: &str = "RequirementsMet";
    pub const NO_IMPACTED_WORKLOADS: &str = "NoImpactedWorkloads";
    pub const WORKLOADS_IMPACTED: &str = "WorkloadsImpacted";
    pub const FEATURE_REMOVED: &str = "FeatureRemoved";
    pub const VERSION_INCOMPATIBLE: &str = "VersionIncompatible";
    pub const API_ACCESS_DENIED: &str = "APIAccessDenied";
    pub const API_TIMEOUT: &str = "APITimeout";
    pub const API_UNAVAILABLE: &str = "APIUnavailable";
    pub const CHECK_EXECUTION_FAILED: &str = "CheckExecutionFailed";
    pub const INVALID_CHECK_RESULT: &str = "InvalidCheckResult";
}

/// `domain/key`: a DNS-like domain containing at least one dot, then a non-empty key.
static ANNOTATION_KEY: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[a-z0-9]([-a-z0-9]*[a-z0-9])?(\.[a-z0-9]([-a-z0-9]*[a-z0-9])?)+/[A-Za-z0-9]([-A-Za-z0-9_.]*[A-Za-z0-9])?$")
        .expect("Invalid regex")
});

#[must_use]
pub fn is_valid_annotation_key(key: &str) -> bool {
    ANNOTATION_KEY.is_match(key)
}
