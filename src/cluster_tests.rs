use serde_json::json;

use super::*;
use crate::reader::{ErrorKind, MemoryReader};
use crate::test_support::{dsc, dsci};

#[test]
fn singleton_absent_or_unregistered_is_none() {
    let empty = MemoryReader::new().with_type(&resources::DATA_SCIENCE_CLUSTER);
    assert!(get_data_science_cluster(&empty).unwrap().is_none());
    assert!(get_data_science_cluster(&MemoryReader::new()).unwrap().is_none());
}

#[test]
fn singleton_takes_first_instance() {
    let second = Object::new(json!({
        "apiVersion": "datasciencecluster.opendatahub.io/v1",
        "kind": "DataScienceCluster",
        "metadata": { "name": "second" }
    }));
    let reader = MemoryReader::new()
        .with_object(dsc(&[]))
        .with_object(second);
    let found = get_data_science_cluster(&reader).unwrap().unwrap();
    assert_eq!(crate::reader::ObjectRef::name(&found), "default-dsc");
}

#[test]
fn singleton_propagates_other_failures() {
    let reader = MemoryReader::new().fail_with(
        &resources::DATA_SCIENCE_CLUSTER,
        ErrorKind::Unavailable.error("connection refused"),
    );
    assert_eq!(
        get_data_science_cluster(&reader).unwrap_err().kind,
        ErrorKind::Unavailable
    );
}

#[test]
fn component_state_reads_management_state() {
    let dsc = dsc(&[("kserve", "Managed"), ("ray", "Unmanaged")]);
    assert_eq!(component_state(&dsc, "kserve").unwrap(), state::MANAGED);
    assert_eq!(component_state(&dsc, "ray").unwrap(), state::UNMANAGED);
    assert_eq!(component_state(&dsc, "trustyai").unwrap(), state::REMOVED);
}

#[test]
fn component_state_rejects_non_string() {
    let dsc = Object::new(json!({
        "spec": { "components": { "kserve": { "managementState": 1 } } }
    }));
    assert_eq!(
        component_state(&dsc, "kserve").unwrap_err().kind,
        ErrorKind::Invalid
    );
}

#[test]
fn applications_namespace_from_dsci() {
    let reader = MemoryReader::new().with_object(dsci(Some("redhat-ods-applications")));
    assert_eq!(
        applications_namespace(&reader).unwrap(),
        "redhat-ods-applications"
    );
}

#[test]
fn applications_namespace_defaults_when_field_missing() {
    let reader = MemoryReader::new().with_object(dsci(None));
    assert_eq!(
        applications_namespace(&reader).unwrap(),
        DEFAULT_APPLICATIONS_NAMESPACE
    );
}

#[test]
fn applications_namespace_without_dsci_is_not_found() {
    let reader = MemoryReader::new().with_type(&resources::DSC_INITIALIZATION);
    assert!(applications_namespace(&reader).unwrap_err().is_not_found());
}

#[test]
fn detects_platform_version_from_dsc_status() {
    let reader = MemoryReader::new().with_object(dsc(&[]));
    assert_eq!(
        detect_platform_version(&reader).unwrap(),
        Some(Version::new(2, 16, 0))
    );
    assert_eq!(detect_platform_version(&MemoryReader::new()).unwrap(), None);
}

#[test]
fn unparseable_platform_version_is_an_error() {
    let reader = MemoryReader::new().with_object(json!({
        "apiVersion": "datasciencecluster.opendatahub.io/v1",
        "kind": "DataScienceCluster",
        "metadata": { "name": "default-dsc" },
        "status": { "release": { "version": "latest" } }
    }));
    assert!(matches!(
        detect_platform_version(&reader),
        Err(crate::error::LintError::InvalidVersion { .. })
    ));
}
