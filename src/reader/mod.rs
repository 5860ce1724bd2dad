//! Read-only access to cluster resources.
//!
//! Checks never talk to a cluster directly. They receive a [`Reader`] through
//! the [`Target`](crate::check::Target) and every failure comes back as a
//! [`ReaderError`] carrying a closed [`ErrorKind`], so callers can tell
//! "this resource type is not installed" apart from "the API refused us"
//! with a plain `match`.

mod memory;
mod object;
pub mod snapshot;

pub use memory::MemoryReader;
pub use object::{Object, ObjectMeta, ObjectRef};

use std::fmt;

use thiserror::Error;

/// Identifies one kind of resource served by the cluster API.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ResourceType {
    pub group: &'static str,
    pub version: &'static str,
    pub kind: &'static str,
    pub plural: &'static str,
}

impl ResourceType {
    #[must_use]
    pub const fn new(
        group: &'static str,
        version: &'static str,
        kind: &'static str,
        plural: &'static str,
    ) -> Self {
        Self {
            group,
            version,
            kind,
            plural,
        }
    }

    /// `group/version`, or just `version` for the core group.
    #[must_use]
    pub fn api_version(&self) -> String {
        if self.group.is_empty() {
            self.version.to_string()
        } else {
            format!("{}/{}", self.group, self.version)
        }
    }
}

impl fmt::Display for ResourceType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.group.is_empty() {
            write!(f, "{}", self.plural)
        } else {
            write!(f, "{}.{}", self.plural, self.group)
        }
    }
}

pub mod resources {
    use super::ResourceType;

    pub const DATA_SCIENCE_CLUSTER: ResourceType = ResourceType::new(
        "datasciencecluster.opendatahub.io",
        "v1",
        "DataScienceCluster",
        "datascienceclusters",
    );

    pub const DSC_INITIALIZATION: ResourceType = ResourceType::new(
        "dscinitialization.opendatahub.io",
        "v1",
        "DSCInitialization",
        "dscinitializations",
    );

    pub const INFERENCE_SERVICE: ResourceType = ResourceType::new(
        "serving.kserve.io",
        "v1beta1",
        "InferenceService",
        "inferenceservices",
    );

    pub const SERVING_RUNTIME: ResourceType = ResourceType::new(
        "serving.kserve.io",
        "v1alpha1",
        "ServingRuntime",
        "servingruntimes",
    );

    pub const NOTEBOOK: ResourceType =
        ResourceType::new("kubeflow.org", "v1", "Notebook", "notebooks");

    pub const SERVICE_MESH_CONTROL_PLANE: ResourceType = ResourceType::new(
        "maistra.io",
        "v2",
        "ServiceMeshControlPlane",
        "servicemeshcontrolplanes",
    );

    pub const CONFIG_MAP: ResourceType = ResourceType::new("", "v1", "ConfigMap", "configmaps");

    /// Types a snapshot always knows about, even when it holds no objects of them.
    pub const WELL_KNOWN: &[ResourceType] = &[
        DATA_SCIENCE_CLUSTER,
        DSC_INITIALIZATION,
        INFERENCE_SERVICE,
        SERVING_RUNTIME,
        NOTEBOOK,
        SERVICE_MESH_CONTROL_PLANE,
        CONFIG_MAP,
    ];
}

/// Failure classes a [`Reader`] reports.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// The named object does not exist.
    NotFound,
    /// The resource type is not registered in the cluster (CRD not installed).
    UnknownResourceType,
    Forbidden,
    Unauthorized,
    Timeout,
    Unavailable,
    /// The object exists but a field has an unexpected shape.
    Invalid,
    Other,
}

impl ErrorKind {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::NotFound => "not found",
            Self::UnknownResourceType => "unknown resource type",
            Self::Forbidden => "forbidden",
            Self::Unauthorized => "unauthorized",
            Self::Timeout => "timeout",
            Self::Unavailable => "service unavailable",
            Self::Invalid => "invalid",
            Self::Other => "error",
        }
    }

    /// Builds an error of this kind.
    #[must_use]
    pub fn error(self, message: impl Into<String>) -> ReaderError {
        ReaderError::new(self, message)
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{}: {message}", kind.as_str())]
pub struct ReaderError {
    pub kind: ErrorKind,
    pub message: String,
}

impl ReaderError {
    #[must_use]
    pub fn new(kind: ErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }

    #[must_use]
    pub fn not_found(rt: &ResourceType, name: &str, namespace: Option<&str>) -> Self {
        let message = match namespace {
            Some(ns) => format!("{} \"{ns}/{name}\" not found", rt.kind),
            None => format!("{} \"{name}\" not found", rt.kind),
        };
        Self::new(ErrorKind::NotFound, message)
    }

    #[must_use]
    pub fn unknown_type(rt: &ResourceType) -> Self {
        Self::new(
            ErrorKind::UnknownResourceType,
            format!("no matches for kind \"{}\" in version \"{}\"", rt.kind, rt.api_version()),
        )
    }

    #[must_use]
    pub fn invalid_field(path: &str, expected: &str) -> Self {
        Self::new(
            ErrorKind::Invalid,
            format!("field {path} is not a {expected}"),
        )
    }

    #[must_use]
    pub fn is_not_found(&self) -> bool {
        self.kind == ErrorKind::NotFound
    }

    #[must_use]
    pub fn is_unknown_type(&self) -> bool {
        self.kind == ErrorKind::UnknownResourceType
    }
}

pub type ReaderResult<T> = std::result::Result<T, ReaderError>;

/// Resource-reading capability consumed by checks.
///
/// Implementations must report a missing resource type as
/// [`ErrorKind::UnknownResourceType`] so callers can treat it as "empty, not broken".
pub trait Reader: Send + Sync {
    /// List every object of the given type across all namespaces.
    ///
    /// # Errors
    /// Returns an error if the type is unknown or the API call fails.
    fn list(&self, rt: &ResourceType) -> ReaderResult<Vec<Object>>;

    /// List only the metadata of every object of the given type.
    ///
    /// # Errors
    /// Returns an error if the type is unknown or the API call fails.
    fn list_metadata(&self, rt: &ResourceType) -> ReaderResult<Vec<ObjectMeta>>;

    /// Fetch one object. `namespace` is `None` for cluster-scoped types.
    ///
    /// # Errors
    /// Returns a `NotFound` error if the object does not exist.
    fn get(&self, rt: &ResourceType, name: &str, namespace: Option<&str>) -> ReaderResult<Object>;
}

/// List objects, treating an unregistered resource type as an empty list.
///
/// # Errors
/// Propagates every other reader failure.
pub fn list_or_empty(reader: &dyn Reader, rt: &ResourceType) -> ReaderResult<Vec<Object>> {
    match reader.list(rt) {
        Err(e) if e.is_unknown_type() => Ok(Vec::new()),
        other => other,
    }
}

/// Metadata variant of [`list_or_empty`].
///
/// # Errors
/// Propagates every other reader failure.
pub fn list_metadata_or_empty(
    reader: &dyn Reader,
    rt: &ResourceType,
) -> ReaderResult<Vec<ObjectMeta>> {
    match reader.list_metadata(rt) {
        Err(e) if e.is_unknown_type() => Ok(Vec::new()),
        other => other,
    }
}

#[cfg(test)]
#[path = "mod_tests.rs"]
mod tests;
