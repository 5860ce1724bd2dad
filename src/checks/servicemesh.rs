use crate::builder::WorkloadValidation;
use crate::check::{Check, CheckGroup, CheckMeta, ResultFormatter, Target};
use crate::context::RunContext;
use crate::error::Result;
use crate::reader::{Object, ObjectRef, resources};
use crate::result::{
    Condition, ConditionStatus, DiagnosticResult, Impact, condition_type, reason,
};

use super::NEXT_MAJOR;

/// The platform stops managing OpenShift Service Mesh v2 in the next major release.
pub struct ServiceMeshV2Check {
    meta: CheckMeta,
}

impl ServiceMeshV2Check {
    #[must_use]
    pub fn new() -> Self {
        Self {
            meta: CheckMeta::new(
                CheckGroup::Dependency,
                "servicemesh",
                "operator-v2",
                "Service Mesh v2 Control Planes",
                "Reports ServiceMeshControlPlanes that will no longer be managed by the platform",
            ),
        }
    }
}

impl Default for ServiceMeshV2Check {
    fn default() -> Self {
        Self::new()
    }
}

fn control_plane_version(smcp: &Object) -> Result<Option<&str>> {
    Ok(smcp.nested_str(&["spec", "version"])?)
}

impl Check for ServiceMeshV2Check {
    fn meta(&self) -> &CheckMeta {
        &self.meta
    }

    fn can_apply(&self, target: &Target) -> Result<bool> {
        Ok(target.targets_major_at_least(NEXT_MAJOR))
    }

    fn validate(&self, _ctx: &RunContext, target: &Target) -> Result<DiagnosticResult> {
        WorkloadValidation::new(&self.meta, target, resources::SERVICE_MESH_CONTROL_PLANE).run(
            |result, req| {
                let mut impacted = req.impacted_objects();
                for (object, item) in impacted.iter_mut().zip(&req.items) {
                    if let Some(version) = control_plane_version(item)? {
                        object
                            .annotations
                            .insert("maistra.io/version".to_string(), version.to_string());
                    }
                }

                let condition = if req.items.is_empty() {
                    Condition::new(
                        condition_type::COMPATIBLE,
                        ConditionStatus::True,
                        reason::REQUIREMENTS_MET,
                        "No ServiceMeshControlPlane found",
                    )
                } else {
                    let names: Vec<&str> = req.items.iter().map(ObjectRef::name).collect();
                    Condition::new(
                        condition_type::COMPATIBLE,
                        ConditionStatus::False,
                        reason::VERSION_INCOMPATIBLE,
                        format!(
                            "ServiceMeshControlPlane(s) {} will no longer be managed by the platform",
                            names.join(", ")
                        ),
                    )
                    .with_impact(Impact::Advisory)
                    .with_remediation("Plan the migration of these control planes to Service Mesh v3")
                };

                result.set_condition(condition);
                result.set_impacted_objects(impacted);
                Ok(())
            },
        )
    }

    fn formatter(&self) -> Option<&dyn ResultFormatter> {
        Some(self)
    }
}

impl ResultFormatter for ServiceMeshV2Check {
    fn format_result(&self, result: &DiagnosticResult) -> Vec<String> {
        result
            .impacted()
            .iter()
            .map(|object| {
                let version = object
                    .annotations
                    .get("maistra.io/version")
                    .map_or("unknown", String::as_str);
                format!(
                    "control plane {}/{} (version {version})",
                    object.namespace.as_deref().unwrap_or("-"),
                    object.name
                )
            })
            .collect()
    }
}
