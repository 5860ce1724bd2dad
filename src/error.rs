use std::path::PathBuf;

use thiserror::Error;

use crate::reader::ReaderError;
use crate::result::ResultError;

#[derive(Error, Debug)]
pub enum LintError {
    #[error("Check with ID '{id}' is already registered")]
    DuplicateCheck { id: String },

    #[error("Invalid check pattern: {pattern}")]
    InvalidPattern {
        pattern: String,
        #[source]
        source: globset::Error,
    },

    #[error(transparent)]
    Resource(#[from] ReaderError),

    #[error("Invalid diagnostic result: {0}")]
    InvalidResult(#[from] ResultError),

    #[error("Invalid version '{value}'")]
    InvalidVersion {
        value: String,
        #[source]
        source: semver::Error,
    },

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Failed to read file: {path}")]
    FileRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("TOML parse error: {0}")]
    TomlParse(#[from] toml::de::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("{0}")]
    Check(String),
}

impl LintError {
    /// Returns the reader error kind when this error came from the cluster.
    #[must_use]
    pub const fn reader_kind(&self) -> Option<crate::reader::ErrorKind> {
        match self {
            Self::Resource(e) => Some(e.kind),
            _ => None,
        }
    }
}

pub type Result<T> = std::result::Result<T, LintError>;

#[cfg(test)]
#[path = "error_tests.rs"]
mod tests;
