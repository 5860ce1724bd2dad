//! Diagnostic result model.
//!
//! A [`DiagnosticResult`] is the structured outcome of one check: an identity
//! triple mirrored from the check, free-form annotations, an ordered list of
//! [`Condition`]s and the objects the check found to be affected.

mod condition;
pub mod keys;

pub use condition::{Condition, ConditionStatus, Impact};
pub use keys::{annotation, condition_type, is_valid_annotation_key, reason};

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::reader::ObjectRef;

/// Structural problems detected by [`DiagnosticResult::validate`].
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ResultError {
    #[error("group must not be empty")]
    EmptyGroup,

    #[error("kind must not be empty")]
    EmptyKind,

    #[error("name must not be empty")]
    EmptyName,

    #[error("status.conditions must contain at least one condition")]
    NoConditions,

    #[error("condition {index}: type must not be empty")]
    EmptyConditionType { index: usize },

    #[error("condition {index}: reason must not be empty")]
    EmptyConditionReason { index: usize },

    #[error("invalid annotation key '{key}': expected domain/key format")]
    InvalidAnnotationKey { key: String },
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiagnosticSpec {
    #[serde(default)]
    pub description: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiagnosticStatus {
    #[serde(default)]
    pub conditions: Vec<Condition>,
}

/// Lightweight reference to an object a check found to be affected.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImpactedObject {
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub api_version: String,
    pub kind: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub namespace: Option<String>,
    pub name: String,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub annotations: BTreeMap<String, String>,
}

impl ImpactedObject {
    #[must_use]
    pub fn new(kind: impl Into<String>, namespace: Option<&str>, name: impl Into<String>) -> Self {
        Self {
            api_version: String::new(),
            kind: kind.into(),
            namespace: namespace.map(String::from),
            name: name.into(),
            annotations: BTreeMap::new(),
        }
    }

    #[must_use]
    pub fn from_ref<T: ObjectRef + ?Sized>(object: &T) -> Self {
        Self::new(object.kind(), object.namespace(), object.name())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DiagnosticResult {
    pub group: String,
    pub kind: String,
    pub name: String,
    #[serde(default)]
    pub spec: DiagnosticSpec,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub annotations: BTreeMap<String, String>,
    #[serde(default)]
    pub status: DiagnosticStatus,
    /// `None` until a check (or builder) sets the list explicitly.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub impacted_objects: Option<Vec<ImpactedObject>>,
}

impl DiagnosticResult {
    #[must_use]
    pub fn new(
        group: impl Into<String>,
        kind: impl Into<String>,
        name: impl Into<String>,
        description: impl Into<String>,
    ) -> Self {
        Self {
            group: group.into(),
            kind: kind.into(),
            name: name.into(),
            spec: DiagnosticSpec {
                description: description.into(),
            },
            ..Self::default()
        }
    }

    /// Insert or replace a condition keyed by its type.
    ///
    /// An existing condition of the same type keeps its position.
    pub fn set_condition(&mut self, condition: Condition) {
        let conditions = &mut self.status.conditions;
        match conditions
            .iter_mut()
            .find(|c| c.condition_type == condition.condition_type)
        {
            Some(existing) => *existing = condition,
            None => conditions.push(condition),
        }
    }

    #[must_use]
    pub fn condition(&self, condition_type: &str) -> Option<&Condition> {
        self.status
            .conditions
            .iter()
            .find(|c| c.condition_type == condition_type)
    }

    #[must_use]
    pub fn conditions(&self) -> &[Condition] {
        &self.status.conditions
    }

    pub fn annotate(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.annotations.insert(key.into(), value.into());
    }

    #[must_use]
    pub fn annotation(&self, key: &str) -> Option<&str> {
        self.annotations.get(key).map(String::as_str)
    }

    pub fn set_impacted_objects(&mut self, objects: Vec<ImpactedObject>) {
        self.impacted_objects = Some(objects);
    }

    /// Impacted objects, empty when none were set.
    #[must_use]
    pub fn impacted(&self) -> &[ImpactedObject] {
        self.impacted_objects.as_deref().unwrap_or_default()
    }

    /// Highest impact across all conditions.
    #[must_use]
    pub fn max_impact(&self) -> Impact {
        self.status
            .conditions
            .iter()
            .map(|c| c.impact)
            .max()
            .unwrap_or_default()
    }

    #[must_use]
    pub fn is_blocking(&self) -> bool {
        self.max_impact() == Impact::Blocking
    }

    /// Check the structural invariants every result handed to the executor must hold.
    ///
    /// # Errors
    /// Returns the first violated invariant.
    pub fn validate(&self) -> Result<(), ResultError> {
        if self.group.is_empty() {
            return Err(ResultError::EmptyGroup);
        }
        if self.kind.is_empty() {
            return Err(ResultError::EmptyKind);
        }
        if self.name.is_empty() {
            return Err(ResultError::EmptyName);
        }
        if self.status.conditions.is_empty() {
            return Err(ResultError::NoConditions);
        }

        for (index, condition) in self.status.conditions.iter().enumerate() {
            if condition.condition_type.is_empty() {
                return Err(ResultError::EmptyConditionType { index });
            }
            if condition.reason.is_empty() {
                return Err(ResultError::EmptyConditionReason { index });
            }
        }

        if let Some(key) = self.annotations.keys().find(|k| !is_valid_annotation_key(k)) {
            return Err(ResultError::InvalidAnnotationKey { key: key.clone() });
        }

        Ok(())
    }
}

#[cfg(test)]
#[path = "mod_tests.rs"]
mod tests;
