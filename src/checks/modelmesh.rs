use crate::builder::ComponentValidation;
use crate::check::{Check, CheckGroup, CheckMeta, Target};
use crate::cluster::state;
use crate::context::RunContext;
use crate::error::Result;
use crate::result::{Condition, ConditionStatus, DiagnosticResult, condition_type, reason};

use super::NEXT_MAJOR;

const COMPONENT: &str = "modelmeshserving";

pub struct ModelMeshRemovalCheck {
    meta: CheckMeta,
}

impl ModelMeshRemovalCheck {
    #[must_use]
    pub fn new() -> Self {
        Self {
            meta: CheckMeta::new(
                CheckGroup::Component,
                COMPONENT,
                "removal",
                "ModelMesh Serving Removal",
                "Validates that ModelMesh serving is not managed before upgrading",
            ),
        }
    }
}

impl Default for ModelMeshRemovalCheck {
    fn default() -> Self {
        Self::new()
    }
}

impl Check for ModelMeshRemovalCheck {
    fn meta(&self) -> &CheckMeta {
        &self.meta
    }

    fn can_apply(&self, target: &Target) -> Result<bool> {
        Ok(target.crosses_major(NEXT_MAJOR))
    }

    fn validate(&self, _ctx: &RunContext, target: &Target) -> Result<DiagnosticResult> {
        ComponentValidation::new(&self.meta, COMPONENT, target).run(|result, req| {
            let condition = if req.management_state == state::MANAGED {
                let namespace = req.applications_namespace()?;
                Condition::new(
                    condition_type::COMPATIBLE,
                    ConditionStatus::False,
                    reason::FEATURE_REMOVED,
                    format!(
                        "ModelMesh serving is managed in {namespace} but is removed in {}",
                        target.target_version_string()
                    ),
                )
                .with_remediation(
                    "Move ModelMesh models to KServe and set \
                     spec.components.modelmeshserving.managementState to Removed",
                )
            } else {
                Condition::new(
                    condition_type::COMPATIBLE,
                    ConditionStatus::True,
                    reason::REQUIREMENTS_MET,
                    format!("ModelMesh serving is {}", req.management_state),
                )
            };
            result.set_condition(condition);
            Ok(())
        })
    }
}
