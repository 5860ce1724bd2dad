//! Reusable validation pipelines layered on top of the [`Check`](crate::check::Check) contract.
//!
//! Most checks repeat the same steps: fetch the governing resource, verify a
//! precondition state, annotate the result, run the check's own logic, and list
//! the impacted objects. The builders here own those steps so a check body only
//! supplies the part that is specific to it.
//!
//! "Singleton resource not found" and "resource type not registered" are
//! ordinary diagnostic outcomes here, never errors. Only infrastructure failures
//! (connectivity, permissions, malformed fields) propagate.

mod component;
mod workload;

pub use component::{ComponentRequest, ComponentValidation};
pub use workload::{WorkloadRequest, WorkloadValidation};

use crate::check::{CheckMeta, Target};
use crate::cluster::{self, state};
use crate::error::Result;
use crate::reader::{Object, ResourceType, resources};
use crate::result::{
    Condition, ConditionStatus, DiagnosticResult, Impact, annotation, condition_type, reason,
};

/// Result returned when the governing resource does not exist.
#[must_use]
pub fn resource_not_found(meta: &CheckMeta, target: &Target, rt: &ResourceType) -> DiagnosticResult {
    let mut result = seeded_result(meta, target);
    result.set_condition(
        Condition::new(
            condition_type::AVAILABLE,
            ConditionStatus::False,
            reason::RESOURCE_NOT_FOUND,
            format!("No {} found in the cluster", rt.kind),
        )
        .with_impact(Impact::None),
    );
    result
}

/// Result returned when a component is not in a state the check cares about.
#[must_use]
pub fn component_not_configured(
    meta: &CheckMeta,
    target: &Target,
    component: &str,
    observed: &str,
) -> DiagnosticResult {
    let mut result = seeded_result(meta, target);
    result.annotate(annotation::MANAGEMENT_STATE, observed);
    result.set_condition(
        Condition::new(
            condition_type::CONFIGURED,
            ConditionStatus::False,
            reason::COMPONENT_NOT_CONFIGURED,
            format!("Component {component} is {observed}, nothing to check"),
        )
        .with_impact(Impact::None),
    );
    result
}

/// Fresh result for `meta` with the version annotations the target provides.
#[must_use]
pub fn seeded_result(meta: &CheckMeta, target: &Target) -> DiagnosticResult {
    let mut result = meta.new_result();
    if let Some(version) = &target.target_version {
        result.annotate(annotation::TARGET_VERSION, version.to_string());
    }
    if let Some(version) = &target.current_version {
        result.annotate(annotation::CURRENT_VERSION, version.to_string());
    }
    result
}

/// Outcome of resolving the DataScienceCluster for a builder.
enum Governing {
    Found(Object),
    ShortCircuit(DiagnosticResult),
}

fn resolve_data_science_cluster(meta: &CheckMeta, target: &Target) -> Result<Governing> {
    match cluster::get_data_science_cluster(target.reader())? {
        Some(dsc) => Ok(Governing::Found(dsc)),
        None => {
            tracing::debug!(check = %meta.id, "short-circuit: DataScienceCluster not found");
            Ok(Governing::ShortCircuit(resource_not_found(
                meta,
                target,
                &resources::DATA_SCIENCE_CLUSTER,
            )))
        }
    }
}

/// Resolve the DataScienceCluster and require that not every listed component is `Removed`.
fn resolve_components(meta: &CheckMeta, target: &Target, components: &[String]) -> Result<Governing> {
    let dsc = match resolve_data_science_cluster(meta, target)? {
        Governing::Found(dsc) => dsc,
        short_circuit @ Governing::ShortCircuit(_) => return Ok(short_circuit),
    };

    let mut states = Vec::with_capacity(components.len());
    for component in components {
        states.push(cluster::component_state(&dsc, component)?);
    }

    if !states.is_empty() && states.iter().all(|s| *s == state::REMOVED) {
        tracing::debug!(check = %meta.id, ?components, "short-circuit: all required components removed");
        return Ok(Governing::ShortCircuit(component_not_configured(
            meta,
            target,
            &components.join(", "),
            state::REMOVED,
        )));
    }

    Ok(Governing::Found(dsc))
}

#[cfg(test)]
#[path = "mod_tests.rs"]
mod tests;
