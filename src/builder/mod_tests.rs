use std::cell::Cell;
use std::sync::Arc;

use super::*;
use crate::check::CheckGroup;
use crate::error::LintError;
use crate::reader::{ErrorKind, MemoryReader, ObjectMeta, ObjectRef};
use crate::test_support::{dsc, dsci, inference_service, upgrade_target};

fn component_meta() -> CheckMeta {
    CheckMeta::new(CheckGroup::Component, "kserve", "removal", "KServe", "desc")
}

fn workload_meta() -> CheckMeta {
    CheckMeta::new(CheckGroup::Workload, "kserve", "isvc", "ISVC", "desc")
}

fn pass(result: &mut DiagnosticResult) {
    result.set_condition(Condition::new(
        condition_type::COMPATIBLE,
        ConditionStatus::True,
        reason::REQUIREMENTS_MET,
        "ok",
    ));
}

#[test]
fn seeded_result_annotates_versions_when_set() {
    let meta = component_meta();
    let target = upgrade_target(MemoryReader::new());
    let result = seeded_result(&meta, &target);
    assert_eq!(result.annotation(annotation::TARGET_VERSION), Some("3.0.0"));
    assert_eq!(result.annotation(annotation::CURRENT_VERSION), Some("2.16.0"));

    let bare = crate::check::Target::new(Arc::new(MemoryReader::new()));
    assert!(seeded_result(&meta, &bare).annotations.is_empty());
}

#[test]
fn component_short_circuits_without_dsc() {
    let meta = component_meta();
    let target = upgrade_target(MemoryReader::new());
    let called = Cell::new(false);

    let result = ComponentValidation::new(&meta, "kserve", &target)
        .run(|_, _| {
            called.set(true);
            Ok(())
        })
        .unwrap();

    assert!(!called.get());
    let conditions = result.conditions();
    assert_eq!(conditions.len(), 1);
    assert_eq!(conditions[0].condition_type, condition_type::AVAILABLE);
    assert_eq!(conditions[0].status, ConditionStatus::False);
    assert_eq!(conditions[0].reason, reason::RESOURCE_NOT_FOUND);
    assert_eq!(conditions[0].impact, Impact::None);
    assert_eq!(result.validate(), Ok(()));
}

#[test]
fn component_short_circuits_outside_required_states() {
    let meta = component_meta();
    let target = upgrade_target(MemoryReader::new().with_object(dsc(&[("kserve", "Removed")])));
    let called = Cell::new(false);

    let result = ComponentValidation::new(&meta, "kserve", &target)
        .with_required_states(&[state::MANAGED])
        .run(|_, _| {
            called.set(true);
            Ok(())
        })
        .unwrap();

    assert!(!called.get());
    assert_eq!(result.annotation(annotation::MANAGEMENT_STATE), Some("Removed"));
    let condition = &result.conditions()[0];
    assert_eq!(condition.condition_type, condition_type::CONFIGURED);
    assert_eq!(condition.reason, reason::COMPONENT_NOT_CONFIGURED);
    assert!(!result.is_blocking());
}

#[test]
fn component_runs_callback_with_annotated_result() {
    let meta = component_meta();
    let target = upgrade_target(MemoryReader::new().with_object(dsc(&[("kserve", "Managed")])));

    let result = ComponentValidation::new(&meta, "kserve", &target)
        .with_required_states(&[state::MANAGED, state::UNMANAGED])
        .run(|result, req| {
            assert_eq!(req.component, "kserve");
            assert_eq!(req.management_state, state::MANAGED);
            assert_eq!(ObjectRef::name(req.data_science_cluster), "default-dsc");
            assert_eq!(result.annotation(annotation::MANAGEMENT_STATE), Some("Managed"));
            pass(result);
            Ok(())
        })
        .unwrap();

    assert_eq!(result.annotation(annotation::TARGET_VERSION), Some("3.0.0"));
    assert_eq!(result.conditions().len(), 1);
}

#[test]
fn component_propagates_callback_errors() {
    let meta = component_meta();
    let target = upgrade_target(MemoryReader::new().with_object(dsc(&[("kserve", "Managed")])));

    let err = ComponentValidation::new(&meta, "kserve", &target)
        .run(|_, _| Err(LintError::Check("callback failed".to_string())))
        .unwrap_err();
    assert_eq!(err.to_string(), "callback failed");
}

#[test]
fn component_propagates_reader_failures() {
    let meta = component_meta();
    let target = upgrade_target(MemoryReader::new().fail_with(
        &resources::DATA_SCIENCE_CLUSTER,
        ErrorKind::Forbidden.error("denied"),
    ));
    let err = ComponentValidation::new(&meta, "kserve", &target)
        .run(|_, _| Ok(()))
        .unwrap_err();
    assert_eq!(err.reader_kind(), Some(ErrorKind::Forbidden));
}

#[test]
fn applications_namespace_is_resolved_once() {
    let meta = component_meta();
    let reader = Arc::new(
        MemoryReader::new()
            .with_object(dsc(&[("kserve", "Managed")]))
            .with_object(dsci(Some("odh-apps"))),
    );
    let target = crate::check::Target::new(reader.clone());

    ComponentValidation::new(&meta, "kserve", &target)
        .run(|result, req| {
            let before = reader.calls();
            assert_eq!(req.applications_namespace()?, "odh-apps");
            assert_eq!(req.applications_namespace()?, "odh-apps");
            assert_eq!(req.applications_namespace()?, "odh-apps");
            assert_eq!(reader.calls() - before, 1);
            pass(result);
            Ok(())
        })
        .unwrap();
}

#[test]
fn applications_namespace_failure_is_cached_too() {
    let meta = component_meta();
    let reader = Arc::new(
        MemoryReader::new()
            .with_object(dsc(&[("kserve", "Managed")]))
            .fail_with(&resources::DSC_INITIALIZATION, ErrorKind::Timeout.error("slow")),
    );
    let target = crate::check::Target::new(reader.clone());

    ComponentValidation::new(&meta, "kserve", &target)
        .run(|result, req| {
            let before = reader.calls();
            let first = req.applications_namespace().unwrap_err();
            let second = req.applications_namespace().unwrap_err();
            assert_eq!(first.reader_kind(), Some(ErrorKind::Timeout));
            assert_eq!(second.reader_kind(), Some(ErrorKind::Timeout));
            assert_eq!(reader.calls() - before, 1);
            pass(result);
            Ok(())
        })
        .unwrap();
}

#[test]
fn component_field_reads_under_component_spec() {
    let meta = component_meta();
    let object = Object::new(serde_json::json!({
        "apiVersion": "datasciencecluster.opendatahub.io/v1",
        "kind": "DataScienceCluster",
        "metadata": { "name": "default-dsc" },
        "spec": { "components": { "kserve": {
            "managementState": "Managed",
            "serving": { "managementState": "Managed" }
        } } }
    }));
    let target = upgrade_target(MemoryReader::new().with_object(object));

    ComponentValidation::new(&meta, "kserve", &target)
        .run(|result, req| {
            assert_eq!(req.component_field(&["serving", "managementState"])?, Some("Managed"));
            assert_eq!(req.component_field(&["missing"])?, None);
            pass(result);
            Ok(())
        })
        .unwrap();
}

#[test]
fn workload_auto_populates_impacted_objects() {
    let meta = workload_meta();
    let target = upgrade_target(
        MemoryReader::new()
            .with_object(inference_service("team-a", "first", None))
            .with_object(inference_service("team-b", "second", None)),
    );

    let result = WorkloadValidation::new_metadata(&meta, &target, resources::INFERENCE_SERVICE)
        .run(|result, req| {
            assert_eq!(req.items.len(), 2);
            pass(result);
            Ok(())
        })
        .unwrap();

    let impacted = result.impacted();
    assert_eq!(impacted.len(), 2);
    assert_eq!(impacted[0].name, "first");
    assert_eq!(impacted[0].namespace.as_deref(), Some("team-a"));
    assert_eq!(impacted[0].kind, "InferenceService");
    assert_eq!(impacted[0].api_version, "serving.kserve.io/v1beta1");
    assert_eq!(impacted[1].name, "second");
    assert_eq!(result.annotation(annotation::IMPACTED_COUNT), Some("2"));
}

#[test]
fn workload_keeps_explicit_impacted_objects() {
    let meta = workload_meta();
    let target = upgrade_target(
        MemoryReader::new().with_object(inference_service("team-a", "first", None)),
    );

    let result = WorkloadValidation::new(&meta, &target, resources::INFERENCE_SERVICE)
        .run(|result, _| {
            pass(result);
            result.set_impacted_objects(Vec::new());
            Ok(())
        })
        .unwrap();

    assert_eq!(result.impacted_objects, Some(Vec::new()));
}

#[test]
fn workload_filter_selects_items() {
    let meta = workload_meta();
    let target = upgrade_target(
        MemoryReader::new()
            .with_object(inference_service("team-a", "raw", Some("RawDeployment")))
            .with_object(inference_service("team-a", "serverless", Some("Serverless"))),
    );

    let result = WorkloadValidation::new_metadata(&meta, &target, resources::INFERENCE_SERVICE)
        .with_filter(|isvc: &ObjectMeta| {
            Ok(isvc.annotation("serving.kserve.io/deploymentMode") != Some("RawDeployment"))
        })
        .complete(|req| {
            Ok(vec![Condition::new(
                condition_type::MIGRATION_REQUIRED,
                ConditionStatus::False,
                reason::WORKLOADS_IMPACTED,
                format!("{} impacted", req.items.len()),
            )])
        })
        .unwrap();

    assert_eq!(result.impacted().len(), 1);
    assert_eq!(result.impacted()[0].name, "serverless");
    assert_eq!(result.conditions()[0].message, "1 impacted");
}

#[test]
fn workload_filter_error_aborts() {
    let meta = workload_meta();
    let target = upgrade_target(
        MemoryReader::new().with_object(inference_service("team-a", "first", None)),
    );

    let err = WorkloadValidation::new(&meta, &target, resources::INFERENCE_SERVICE)
        .with_filter(|_| Err(LintError::Check("bad item".to_string())))
        .run(|_, _| panic!("callback must not run"))
        .unwrap_err();
    assert_eq!(err.to_string(), "bad item");
}

#[test]
fn workload_unregistered_type_is_empty() {
    let meta = workload_meta();
    let target = upgrade_target(MemoryReader::new());

    let result = WorkloadValidation::new(&meta, &target, resources::NOTEBOOK)
        .complete(|req| {
            assert!(req.items.is_empty());
            Ok(vec![Condition::new(
                condition_type::MIGRATION_REQUIRED,
                ConditionStatus::True,
                reason::NO_IMPACTED_WORKLOADS,
                "none",
            )])
        })
        .unwrap();

    assert_eq!(result.impacted_objects, Some(Vec::new()));
    assert_eq!(result.annotation(annotation::IMPACTED_COUNT), Some("0"));
}

#[test]
fn workload_short_circuits_when_components_removed() {
    let meta = workload_meta();
    let target = upgrade_target(
        MemoryReader::new()
            .with_object(dsc(&[("kserve", "Removed")]))
            .with_object(inference_service("team-a", "first", None)),
    );

    let result = WorkloadValidation::new(&meta, &target, resources::INFERENCE_SERVICE)
        .with_required_components(&["kserve", "modelmeshserving"])
        .run(|_, _| panic!("callback must not run"))
        .unwrap();

    assert_eq!(result.conditions()[0].reason, reason::COMPONENT_NOT_CONFIGURED);
    assert!(result.impacted_objects.is_none());
}

#[test]
fn workload_runs_when_any_required_component_present() {
    let meta = workload_meta();
    let target = upgrade_target(
        MemoryReader::new()
            .with_object(dsc(&[("kserve", "Removed"), ("modelmeshserving", "Managed")]))
            .with_object(inference_service("team-a", "first", None)),
    );

    let result = WorkloadValidation::new(&meta, &target, resources::INFERENCE_SERVICE)
        .with_required_components(&["kserve", "modelmeshserving"])
        .run(|result, req| {
            assert!(req.data_science_cluster.is_some());
            pass(result);
            Ok(())
        })
        .unwrap();

    assert_eq!(result.impacted().len(), 1);
}

#[test]
fn workload_without_dsc_short_circuits_when_components_required() {
    let meta = workload_meta();
    let target = upgrade_target(MemoryReader::new());

    let result = WorkloadValidation::new(&meta, &target, resources::INFERENCE_SERVICE)
        .with_required_components(&["kserve"])
        .run(|_, _| panic!("callback must not run"))
        .unwrap();

    assert_eq!(result.conditions()[0].reason, reason::RESOURCE_NOT_FOUND);
}

#[test]
fn workload_propagates_list_failures() {
    let meta = workload_meta();
    let target = upgrade_target(MemoryReader::new().fail_with(
        &resources::INFERENCE_SERVICE,
        ErrorKind::Unauthorized.error("token expired"),
    ));

    let err = WorkloadValidation::new_metadata(&meta, &target, resources::INFERENCE_SERVICE)
        .run(|_, _| Ok(()))
        .unwrap_err();
    assert_eq!(err.reader_kind(), Some(ErrorKind::Unauthorized));
}
