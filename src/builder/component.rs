use std::cell::OnceCell;

use crate::check::{CheckMeta, Target};
use crate::cluster;
use crate::error::Result;
use crate::reader::{Object, ReaderResult};
use crate::result::{DiagnosticResult, annotation};

use super::{Governing, component_not_configured, resolve_data_science_cluster, seeded_result};

/// Pipeline for checks that hinge on one component's management state in the
/// DataScienceCluster.
///
/// ```ignore
/// ComponentValidation::new(&self.meta, "kserve", target)
///     .with_required_states(&[state::MANAGED])
///     .run(|result, req| {
///         result.set_condition(/* ... */);
///         Ok(())
///     })
/// ```
pub struct ComponentValidation<'a> {
    meta: &'a CheckMeta,
    component: &'a str,
    target: &'a Target,
    required_states: Vec<String>,
}

impl<'a> ComponentValidation<'a> {
    #[must_use]
    pub const fn new(meta: &'a CheckMeta, component: &'a str, target: &'a Target) -> Self {
        Self {
            meta,
            component,
            target,
            required_states: Vec::new(),
        }
    }

    /// Only run the validation when the component is in one of `states`.
    #[must_use]
    pub fn with_required_states(mut self, states: &[&str]) -> Self {
        self.required_states = states.iter().map(|s| (*s).to_string()).collect();
        self
    }

    /// Resolve the component and hand the pre-annotated result to `validate`.
    ///
    /// `validate` is not called when the DataScienceCluster is missing or the
    /// component is outside the required states; a standard result is returned instead.
    ///
    /// # Errors
    /// Propagates reader failures and errors returned by `validate`.
    pub fn run<F>(self, validate: F) -> Result<DiagnosticResult>
    where
        F: FnOnce(&mut DiagnosticResult, &ComponentRequest<'_>) -> Result<()>,
    {
        let dsc = match resolve_data_science_cluster(self.meta, self.target)? {
            Governing::Found(dsc) => dsc,
            Governing::ShortCircuit(result) => return Ok(result),
        };

        let management_state = cluster::component_state(&dsc, self.component)?;
        if !self.required_states.is_empty()
            && !self.required_states.iter().any(|s| s == management_state)
        {
            tracing::debug!(
                check = %self.meta.id,
                component = self.component,
                state = management_state,
                "short-circuit: component not in a required state"
            );
            return Ok(component_not_configured(
                self.meta,
                self.target,
                self.component,
                management_state,
            ));
        }

        let mut result = seeded_result(self.meta, self.target);
        result.annotate(annotation::MANAGEMENT_STATE, management_state);

        let request = ComponentRequest {
            data_science_cluster: &dsc,
            component: self.component,
            management_state,
            target: self.target,
            applications_namespace: OnceCell::new(),
        };
        validate(&mut result, &request)?;

        Ok(result)
    }
}

/// What a component validation callback gets to work with.
pub struct ComponentRequest<'a> {
    pub data_science_cluster: &'a Object,
    pub component: &'a str,
    pub management_state: &'a str,
    pub target: &'a Target,
    applications_namespace: OnceCell<ReaderResult<String>>,
}

impl ComponentRequest<'_> {
    /// Applications namespace, fetched on first use and cached for the rest of the request.
    ///
    /// # Errors
    /// The first lookup's failure is returned to every caller.
    pub fn applications_namespace(&self) -> Result<&str> {
        let resolved = self
            .applications_namespace
            .get_or_init(|| cluster::applications_namespace(self.target.reader()));
        match resolved {
            Ok(ns) => Ok(ns.as_str()),
            Err(e) => Err(e.clone().into()),
        }
    }

    /// A field under `spec.components.<component>`.
    ///
    /// # Errors
    /// Returns an `Invalid` error when the field is not a string.
    pub fn component_field(&self, path: &[&str]) -> Result<Option<&str>> {
        let mut full = vec!["spec", "components", self.component];
        full.extend_from_slice(path);
        Ok(self.data_science_cluster.nested_str(&full)?)
    }
}
