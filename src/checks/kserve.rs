use crate::builder::{ComponentValidation, WorkloadValidation};
use crate::check::{Check, CheckGroup, CheckMeta, Target};
use crate::cluster::state;
use crate::context::RunContext;
use crate::error::Result;
use crate::reader::{ObjectMeta, resources};
use crate::result::{Condition, ConditionStatus, DiagnosticResult, Impact, condition_type, reason};

use super::NEXT_MAJOR;

const COMPONENT: &str = "kserve";
const DEPLOYMENT_MODE_ANNOTATION: &str = "serving.kserve.io/deploymentMode";
const RAW_DEPLOYMENT: &str = "RawDeployment";

/// Serverless (Knative-based) KServe serving is removed in the next major release.
pub struct KserveServerlessRemovalCheck {
    meta: CheckMeta,
}

impl KserveServerlessRemovalCheck {
    #[must_use]
    pub fn new() -> Self {
        Self {
            meta: CheckMeta::new(
                CheckGroup::Component,
                COMPONENT,
                "serverless-removal",
                "KServe Serverless Removal",
                "Validates that KServe serverless mode is disabled before upgrading",
            ),
        }
    }
}

impl Default for KserveServerlessRemovalCheck {
    fn default() -> Self {
        Self::new()
    }
}

impl Check for KserveServerlessRemovalCheck {
    fn meta(&self) -> &CheckMeta {
        &self.meta
    }

    fn can_apply(&self, target: &Target) -> Result<bool> {
        Ok(target.crosses_major(NEXT_MAJOR))
    }

    fn validate(&self, _ctx: &RunContext, target: &Target) -> Result<DiagnosticResult> {
        ComponentValidation::new(&self.meta, COMPONENT, target)
            .with_required_states(&[state::MANAGED])
            .run(|result, req| {
                let serving = req.component_field(&["serving", "managementState"])?;
                let condition = if serving == Some(state::MANAGED) {
                    Condition::new(
                        condition_type::COMPATIBLE,
                        ConditionStatus::False,
                        reason::FEATURE_REMOVED,
                        format!(
                            "KServe serverless mode is enabled but is removed in {}",
                            target.target_version_string()
                        ),
                    )
                    .with_remediation(
                        "Migrate InferenceServices to RawDeployment and set \
                         spec.components.kserve.serving.managementState to Removed",
                    )
                } else {
                    Condition::new(
                        condition_type::COMPATIBLE,
                        ConditionStatus::True,
                        reason::REQUIREMENTS_MET,
                        "KServe serverless mode is disabled",
                    )
                };
                result.set_condition(condition);
                Ok(())
            })
    }
}

/// InferenceServices still deployed in serverless mode must be migrated.
pub struct ServerlessInferenceServicesCheck {
    meta: CheckMeta,
}

impl ServerlessInferenceServicesCheck {
    #[must_use]
    pub fn new() -> Self {
        Self {
            meta: CheckMeta::new(
                CheckGroup::Workload,
                COMPONENT,
                "serverless-inferenceservices",
                "Serverless InferenceServices",
                "Lists InferenceServices that still use serverless deployment mode",
            ),
        }
    }
}

impl Default for ServerlessInferenceServicesCheck {
    fn default() -> Self {
        Self::new()
    }
}

fn is_serverless(isvc: &ObjectMeta) -> Result<bool> {
    Ok(isvc.annotation(DEPLOYMENT_MODE_ANNOTATION) != Some(RAW_DEPLOYMENT))
}

impl Check for ServerlessInferenceServicesCheck {
    fn meta(&self) -> &CheckMeta {
        &self.meta
    }

    fn can_apply(&self, target: &Target) -> Result<bool> {
        Ok(target.crosses_major(NEXT_MAJOR))
    }

    fn validate(&self, _ctx: &RunContext, target: &Target) -> Result<DiagnosticResult> {
        WorkloadValidation::new_metadata(&self.meta, target, resources::INFERENCE_SERVICE)
            .with_required_components(&[COMPONENT])
            .with_filter(is_serverless)
            .complete(|req| {
                let count = req.items.len();
                let condition = if count == 0 {
                    Condition::new(
                        condition_type::MIGRATION_REQUIRED,
                        ConditionStatus::True,
                        reason::NO_IMPACTED_WORKLOADS,
                        "No serverless InferenceServices found",
                    )
                } else {
                    Condition::new(
                        condition_type::MIGRATION_REQUIRED,
                        ConditionStatus::False,
                        reason::WORKLOADS_IMPACTED,
                        format!("{count} InferenceService(s) use serverless deployment mode"),
                    )
                    .with_impact(Impact::Advisory)
                    .with_remediation(format!(
                        "Annotate each InferenceService with {DEPLOYMENT_MODE_ANNOTATION}: {RAW_DEPLOYMENT}"
                    ))
                };
                Ok(vec![condition])
            })
    }
}
