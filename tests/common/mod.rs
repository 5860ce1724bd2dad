#![allow(dead_code)]

use std::fs;
use std::path::{Path, PathBuf};

use serde_json::{Value, json};
use tempfile::TempDir;

/// Creates an `assert_cmd` Command for the odh-lint binary.
#[macro_export]
macro_rules! odh_lint {
    () => {
        assert_cmd::Command::new(assert_cmd::cargo::cargo_bin!("odh-lint"))
    };
}

/// Temporary directory holding a snapshot and optional config.
pub struct TestFixture {
    pub dir: TempDir,
}

impl TestFixture {
    pub fn new() -> Self {
        Self {
            dir: TempDir::new().expect("Failed to create temp directory"),
        }
    }

    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    /// Creates a file with the given content and returns its path.
    pub fn create_file(&self, relative_path: &str, content: &str) -> PathBuf {
        let path = self.dir.path().join(relative_path);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).expect("Failed to create parent directories");
        }
        fs::write(&path, content).expect("Failed to write file");
        path
    }

    /// Writes `items` as a `kind: List` JSON snapshot.
    pub fn create_snapshot(&self, items: &[Value]) -> PathBuf {
        let doc = json!({ "apiVersion": "v1", "kind": "List", "items": items });
        self.create_file(
            "snapshot.json",
            &serde_json::to_string_pretty(&doc).expect("Failed to serialize snapshot"),
        )
    }

    /// Creates a local `.odh-lint.toml`.
    pub fn create_config(&self, content: &str) -> PathBuf {
        self.create_file(".odh-lint.toml", content)
    }
}

/// DataScienceCluster at platform version 2.16.0 with the given component states.
pub fn dsc(components: &[(&str, &str)]) -> Value {
    let mut spec = serde_json::Map::new();
    for (name, state) in components {
        spec.insert((*name).to_string(), json!({ "managementState": state }));
    }
    json!({
        "apiVersion": "datasciencecluster.opendatahub.io/v1",
        "kind": "DataScienceCluster",
        "metadata": { "name": "default-dsc" },
        "spec": { "components": Value::Object(spec) },
        "status": { "release": { "version": "2.16.0" } }
    })
}

pub fn dsci(applications_namespace: &str) -> Value {
    json!({
        "apiVersion": "dscinitialization.opendatahub.io/v1",
        "kind": "DSCInitialization",
        "metadata": { "name": "default-dsci" },
        "spec": { "applicationsNamespace": applications_namespace }
    })
}

pub fn inference_service(namespace: &str, name: &str, deployment_mode: &str) -> Value {
    json!({
        "apiVersion": "serving.kserve.io/v1beta1",
        "kind": "InferenceService",
        "metadata": {
            "name": name,
            "namespace": namespace,
            "annotations": { "serving.kserve.io/deploymentMode": deployment_mode }
        }
    })
}

/// A cluster where nothing blocks the 3.0 upgrade.
pub fn clean_cluster() -> Vec<Value> {
    vec![
        dsc(&[("kserve", "Managed"), ("modelmeshserving", "Removed")]),
        dsci("opendatahub"),
        inference_service("team-a", "raw", "RawDeployment"),
    ]
}
