use std::io::Write;

use super::*;
use crate::reader::{ObjectRef, Reader};

const LIST_JSON: &str = r#"{
  "apiVersion": "v1",
  "kind": "List",
  "items": [
    {
      "apiVersion": "datasciencecluster.opendatahub.io/v1",
      "kind": "DataScienceCluster",
      "metadata": { "name": "default-dsc" }
    },
    {
      "apiVersion": "serving.kserve.io/v1beta1",
      "kind": "InferenceService",
      "metadata": { "name": "model", "namespace": "team-a" }
    }
  ]
}"#;

#[test]
fn loads_kind_list_json() {
    let reader = from_json_str(LIST_JSON).unwrap();
    let dscs = reader.list(&resources::DATA_SCIENCE_CLUSTER).unwrap();
    assert_eq!(dscs.len(), 1);
    assert_eq!(dscs[0].name(), "default-dsc");
    assert_eq!(reader.list(&resources::INFERENCE_SERVICE).unwrap().len(), 1);
}

#[test]
fn well_known_types_are_registered_even_when_empty() {
    let reader = from_json_str("[]").unwrap();
    assert!(reader.list(&resources::NOTEBOOK).unwrap().is_empty());
    assert!(
        reader
            .list(&resources::SERVICE_MESH_CONTROL_PLANE)
            .unwrap()
            .is_empty()
    );
}

#[test]
fn loads_yaml_and_single_object() {
    let reader = from_yaml_str(
        r"
apiVersion: dscinitialization.opendatahub.io/v1
kind: DSCInitialization
metadata:
  name: default-dsci
spec:
  applicationsNamespace: odh
",
    )
    .unwrap();
    let items = reader.list(&resources::DSC_INITIALIZATION).unwrap();
    assert_eq!(items.len(), 1);
    assert_eq!(
        items[0].nested_str(&["spec", "applicationsNamespace"]).unwrap(),
        Some("odh")
    );
}

#[test]
fn rejects_items_without_identity() {
    let err = from_json_str(r#"[{ "metadata": { "name": "x" } }]"#).unwrap_err();
    assert!(matches!(err, LintError::Config(_)));
    assert!(err.to_string().contains("item 0"));
}

#[test]
fn rejects_scalar_documents() {
    assert!(matches!(from_json_str("42"), Err(LintError::Config(_))));
    assert!(matches!(
        from_json_str(r#"{ "items": "nope" }"#),
        Err(LintError::Config(_))
    ));
    assert!(matches!(from_json_str("{"), Err(LintError::Json(_))));
}

#[test]
fn load_picks_format_by_extension() {
    let dir = tempfile::TempDir::new().unwrap();

    let json_path = dir.path().join("cluster.json");
    std::fs::write(&json_path, LIST_JSON).unwrap();
    assert_eq!(
        load(&json_path)
            .unwrap()
            .list(&resources::INFERENCE_SERVICE)
            .unwrap()
            .len(),
        1
    );

    let yaml_path = dir.path().join("cluster.yml");
    let mut file = std::fs::File::create(&yaml_path).unwrap();
    writeln!(file, "- apiVersion: kubeflow.org/v1").unwrap();
    writeln!(file, "  kind: Notebook").unwrap();
    writeln!(file, "  metadata: {{ name: wb, namespace: team-a }}").unwrap();
    drop(file);
    let notebooks = load(&yaml_path)
        .unwrap()
        .list(&resources::NOTEBOOK)
        .unwrap();
    assert_eq!(notebooks[0].namespace(), Some("team-a"));
}

#[test]
fn load_missing_file_is_file_read_error() {
    let err = load(std::path::Path::new("/definitely/not/here.json")).unwrap_err();
    assert!(matches!(err, LintError::FileRead { .. }));
}
