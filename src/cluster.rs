//! Platform-level lookups shared by checks and builders.

use semver::Version;

use crate::check::parse_version;
use crate::error::Result;
use crate::reader::{Object, Reader, ReaderError, ReaderResult, ResourceType, list_or_empty, resources};

pub const DEFAULT_APPLICATIONS_NAMESPACE: &str = "opendatahub";

/// Component management states.
pub mod state {
    pub const MANAGED: &str = "Managed";
    pub const UNMANAGED: &str = "Unmanaged";
    pub const REMOVED: &str = "Removed";
}

/// Fetch the single instance of a cluster-scoped singleton type.
///
/// Returns `None` when no instance exists or the type is not installed.
///
/// # Errors
/// Propagates every other reader failure.
pub fn get_singleton(reader: &dyn Reader, rt: &ResourceType) -> ReaderResult<Option<Object>> {
    let mut items = list_or_empty(reader, rt)?;
    if items.len() > 1 {
        tracing::warn!(kind = rt.kind, count = items.len(), "multiple singleton instances found, using the first");
    }
    Ok(if items.is_empty() {
        None
    } else {
        Some(items.swap_remove(0))
    })
}

/// # Errors
/// Propagates reader failures.
pub fn get_data_science_cluster(reader: &dyn Reader) -> ReaderResult<Option<Object>> {
    get_singleton(reader, &resources::DATA_SCIENCE_CLUSTER)
}

/// Management state of a component in a DataScienceCluster.
///
/// A component without a `managementState` counts as `Removed`.
///
/// # Errors
/// Returns an `Invalid` error when the field is not a string.
pub fn component_state<'a>(dsc: &'a Object, component: &str) -> ReaderResult<&'a str> {
    Ok(dsc
        .nested_str(&["spec", "components", component, "managementState"])?
        .unwrap_or(state::REMOVED))
}

/// Namespace the platform deploys its applications into, from the DSCInitialization.
///
/// # Errors
/// Returns a `NotFound` error when no DSCInitialization exists.
pub fn applications_namespace(reader: &dyn Reader) -> ReaderResult<String> {
    let rt = resources::DSC_INITIALIZATION;
    let dsci = get_singleton(reader, &rt)?
        .ok_or_else(|| ReaderError::not_found(&rt, "default-dsci", None))?;
    Ok(dsci
        .nested_str(&["spec", "applicationsNamespace"])?
        .filter(|ns| !ns.is_empty())
        .unwrap_or(DEFAULT_APPLICATIONS_NAMESPACE)
        .to_string())
}

/// Platform version reported in the DataScienceCluster status, if any.
///
/// # Errors
/// Returns an error on reader failures or an unparseable version.
pub fn detect_platform_version(reader: &dyn Reader) -> Result<Option<Version>> {
    let Some(dsc) = get_data_science_cluster(reader)? else {
        return Ok(None);
    };
    match dsc.nested_str(&["status", "release", "version"])? {
        Some(v) if !v.is_empty() => Ok(Some(parse_version(v)?)),
        _ => Ok(None),
    }
}

#[cfg(test)]
#[path = "cluster_tests.rs"]
mod tests;
