//! Fixtures shared by unit tests.

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use serde_json::{Value, json};

use crate::check::{Check, CheckGroup, CheckMeta, Target};
use crate::context::RunContext;
use crate::error::Result;
use crate::reader::{MemoryReader, Object};
use crate::result::{Condition, ConditionStatus, DiagnosticResult, condition_type, reason};

type ApplyFn = Box<dyn Fn(&Target) -> Result<bool> + Send + Sync>;
type ValidateFn = Box<dyn Fn(&RunContext, &Target) -> Result<DiagnosticResult> + Send + Sync>;

/// Configurable check for exercising the registry and executor.
pub struct StubCheck {
    meta: CheckMeta,
    apply: ApplyFn,
    validate: ValidateFn,
    pub runs: Arc<AtomicUsize>,
}

impl StubCheck {
    /// A check that applies and passes.
    pub fn new(group: CheckGroup, kind: &str, check_type: &str) -> Self {
        let meta = CheckMeta::new(group, kind, check_type, check_type, "stub check");
        let template = meta.clone();
        Self {
            meta,
            apply: Box::new(|_| Ok(true)),
            validate: Box::new(move |_, _| Ok(passing(&template))),
            runs: Arc::new(AtomicUsize::new(0)),
        }
    }

    pub fn applies(mut self, applies: bool) -> Self {
        self.apply = Box::new(move |_| Ok(applies));
        self
    }

    pub fn applies_with(mut self, f: impl Fn(&Target) -> Result<bool> + Send + Sync + 'static) -> Self {
        self.apply = Box::new(f);
        self
    }

    pub fn validates_with(
        mut self,
        f: impl Fn(&RunContext, &Target) -> Result<DiagnosticResult> + Send + Sync + 'static,
    ) -> Self {
        self.validate = Box::new(f);
        self
    }

    pub fn meta_clone(&self) -> CheckMeta {
        self.meta.clone()
    }
}

impl Check for StubCheck {
    fn meta(&self) -> &CheckMeta {
        &self.meta
    }

    fn can_apply(&self, target: &Target) -> Result<bool> {
        (self.apply)(target)
    }

    fn validate(&self, ctx: &RunContext, target: &Target) -> Result<DiagnosticResult> {
        self.runs.fetch_add(1, Ordering::SeqCst);
        (self.validate)(ctx, target)
    }
}

/// A result with one passing `Validated` condition.
pub fn passing(meta: &CheckMeta) -> DiagnosticResult {
    let mut result = meta.new_result();
    result.set_condition(Condition::new(
        condition_type::VALIDATED,
        ConditionStatus::True,
        reason::REQUIREMENTS_MET,
        "ok",
    ));
    result
}

/// A DataScienceCluster with the given `(component, managementState)` pairs.
pub fn dsc(components: &[(&str, &str)]) -> Object {
    let mut spec = serde_json::Map::new();
    for (name, state) in components {
        spec.insert((*name).to_string(), json!({ "managementState": state }));
    }
    Object::new(json!({
        "apiVersion": "datasciencecluster.opendatahub.io/v1",
        "kind": "DataScienceCluster",
        "metadata": { "name": "default-dsc" },
        "spec": { "components": Value::Object(spec) },
        "status": { "release": { "version": "2.16.0" } }
    }))
}

pub fn dsci(applications_namespace: Option<&str>) -> Object {
    let spec = applications_namespace.map_or_else(|| json!({}), |ns| json!({ "applicationsNamespace": ns }));
    Object::new(json!({
        "apiVersion": "dscinitialization.opendatahub.io/v1",
        "kind": "DSCInitialization",
        "metadata": { "name": "default-dsci" },
        "spec": spec
    }))
}

pub fn inference_service(namespace: &str, name: &str, deployment_mode: Option<&str>) -> Object {
    let mut annotations = serde_json::Map::new();
    if let Some(mode) = deployment_mode {
        annotations.insert("serving.kserve.io/deploymentMode".to_string(), json!(mode));
    }
    Object::new(json!({
        "apiVersion": "serving.kserve.io/v1beta1",
        "kind": "InferenceService",
        "metadata": {
            "name": name,
            "namespace": namespace,
            "annotations": Value::Object(annotations)
        }
    }))
}

/// A target upgrading from 2.16.0 to 3.0.0 over `reader`.
pub fn upgrade_target(reader: MemoryReader) -> Target {
    Target::new(Arc::new(reader))
        .with_current_version(Some(semver::Version::new(2, 16, 0)))
        .with_target_version(Some(semver::Version::new(3, 0, 0)))
}
