//! Loader tests against real files

use metaspec_core::{check, DocumentLoader, Issue, LoaderError, TreeValue};
use std::fs;
use tempfile::TempDir;

fn write(dir: &TempDir, name: &str, content: &str) -> std::path::PathBuf {
    let path = dir.path().join(name);
    fs::write(&path, content).unwrap();
    path
}

#[test]
fn test_check_yaml_files() {
    let dir = TempDir::new().unwrap();
    let data = write(&dir, "demo.yml", "name: demo\nversion: 2\n");
    let spec = write(
        &dir,
        "spec.yaml",
        "name:\n  doc: Demo name\n  constraints: [String, non-empty]\nlicense:\n  constraints: [String, non-empty]\n",
    );

    let loader = DocumentLoader::new();
    let report = check(&loader.load(&data).unwrap(), &loader.load(&spec).unwrap()).unwrap();

    assert_eq!(
        report.issues,
        vec![
            Issue::ExtraMetadata {
                paths: vec![".version".to_string()]
            },
            Issue::MissingRequired {
                paths: vec![".license".to_string()]
            },
        ]
    );
}

#[test]
fn test_json_and_yaml_load_to_the_same_tree() {
    let dir = TempDir::new().unwrap();
    let json = write(&dir, "demo.json", r#"{"name": "demo", "tags": ["a", "b"]}"#);
    let yaml = write(&dir, "demo.yaml", "name: demo\ntags:\n  - a\n  - b\n");

    let loader = DocumentLoader::new();
    assert_eq!(loader.load(&json).unwrap(), loader.load(&yaml).unwrap());
}

#[test]
fn test_unknown_extension_falls_back_to_content() {
    let dir = TempDir::new().unwrap();
    let path = write(&dir, "demo.meta", "name: demo\n");

    let tree = DocumentLoader::new().load(&path).unwrap();
    assert_eq!(tree.get("name"), Some(&TreeValue::string("demo")));
}

#[test]
fn test_missing_file() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("absent.yml");

    let err = DocumentLoader::new().load(&path).unwrap_err();
    assert!(matches!(err, LoaderError::IoError { .. }));
    assert_eq!(err.path(), &path);
}

#[test]
fn test_syntax_errors() {
    let dir = TempDir::new().unwrap();
    let yaml = write(&dir, "bad.yml", "name: [unclosed\n");
    let json = write(&dir, "bad.json", "{\"name\": ");

    let loader = DocumentLoader::new();
    assert!(matches!(
        loader.load(&yaml),
        Err(LoaderError::YamlParseError { .. })
    ));
    assert!(matches!(
        loader.load(&json),
        Err(LoaderError::JsonParseError { .. })
    ));
}

#[test]
fn test_structural_error() {
    let dir = TempDir::new().unwrap();
    let path = write(&dir, "tagged.yml", "name: !secret demo\n");

    let err = DocumentLoader::new().load(&path).unwrap_err();
    assert!(err.is_structural());
}

#[test]
fn test_yaml_infinity_and_nan_are_numbers() {
    let dir = TempDir::new().unwrap();
    let data = write(&dir, "data.yml", "timeout: .inf\nretries: .nan\n");
    let spec = write(
        &dir,
        "spec.yml",
        "timeout:\n  constraints: [non-empty]\nretries:\n  constraints: [non-empty]\n",
    );

    let loader = DocumentLoader::new();
    let data = loader.load(&data).unwrap();
    assert_eq!(data.get("timeout").map(TreeValue::kind_name), Some("number"));
    assert_eq!(data.get("retries").map(TreeValue::inspect).as_deref(), Some(".nan"));

    let report = check(&data, &loader.load(&spec).unwrap()).unwrap();
    assert!(report.is_clean());
}
