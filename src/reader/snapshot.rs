//! Load a [`MemoryReader`] from a cluster snapshot file.
//!
//! A snapshot is a `kind: List` document in JSON or YAML, the format
//! `kubectl get <types> -A -o json` writes. A bare array of objects is accepted too.

use std::path::Path;

use serde_json::Value;

use crate::error::{LintError, Result};

use super::{MemoryReader, Object, resources};

/// Read and parse a snapshot file. The format is chosen by extension
/// (`.yaml`/`.yml` for YAML, anything else JSON).
///
/// # Errors
/// Returns an error if the file cannot be read or is not a list of objects.
pub fn load(path: &Path) -> Result<MemoryReader> {
    let content = std::fs::read_to_string(path).map_err(|source| LintError::FileRead {
        path: path.to_path_buf(),
        source,
    })?;

    let is_yaml = path
        .extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("yaml") || ext.eq_ignore_ascii_case("yml"));

    if is_yaml {
        from_yaml_str(&content)
    } else {
        from_json_str(&content)
    }
}

/// # Errors
/// Returns an error if the content is not a JSON list of objects.
pub fn from_json_str(content: &str) -> Result<MemoryReader> {
    let value: Value = serde_json::from_str(content)?;
    from_value(value)
}

/// # Errors
/// Returns an error if the content is not a YAML list of objects.
pub fn from_yaml_str(content: &str) -> Result<MemoryReader> {
    let value: Value = serde_yaml::from_str(content)?;
    from_value(value)
}

fn from_value(value: Value) -> Result<MemoryReader> {
    let items = match value {
        Value::Array(items) => items,
        Value::Object(mut map) => match map.remove("items") {
            Some(Value::Array(items)) => items,
            Some(_) => {
                return Err(LintError::Config(
                    "snapshot 'items' must be a list".to_string(),
                ));
            }
            None => vec![Value::Object(map)],
        },
        _ => {
            return Err(LintError::Config(
                "snapshot must be a list of objects".to_string(),
            ));
        }
    };

    let mut reader = MemoryReader::new();
    for rt in resources::WELL_KNOWN {
        reader.register_type(rt);
    }

    let count = items.len();
    for (idx, item) in items.into_iter().enumerate() {
        let has_identity = item.get("apiVersion").is_some_and(Value::is_string)
            && item.get("kind").is_some_and(Value::is_string);
        if !has_identity {
            return Err(LintError::Config(format!(
                "snapshot item {idx} has no apiVersion/kind"
            )));
        }
        reader.insert(Object::new(item));
    }

    tracing::debug!(objects = count, "loaded cluster snapshot");
    Ok(reader)
}

#[cfg(test)]
#[path = "snapshot_tests.rs"]
mod tests;
