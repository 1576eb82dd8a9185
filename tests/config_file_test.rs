//! Loading experiment configurations from JSON files

use std::io::Write;

use listbench::config::{ConfidenceLevel, ExperimentConfig};
use listbench::Error;
use tempfile::NamedTempFile;

fn write_config(json: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(json.as_bytes()).unwrap();
    file
}

#[test]
fn test_load_full_config() {
    let file = write_config(
        r#"{
            "mix": { "member": 0.8, "insert": 0.1, "delete": 0.1 },
            "population": 1000,
            "operations_per_batch": 10000,
            "pilot_runs": 100,
            "relative_error": 0.05,
            "confidence": 0.9,
            "seed": 42
        }"#,
    );

    let config = ExperimentConfig::from_json_file(file.path()).unwrap();
    assert!((config.mix().member() - 0.8).abs() < f64::EPSILON);
    assert_eq!(config.confidence(), ConfidenceLevel::Ninety);
    assert_eq!(config.seed(), Some(42));
}

#[test]
fn test_load_empty_object_is_reference_workload() {
    let file = write_config("{}");
    let config = ExperimentConfig::from_json_file(file.path()).unwrap();
    assert_eq!(config, ExperimentConfig::default());
}

#[test]
fn test_load_rejects_bad_mix() {
    let file = write_config(r#"{ "mix": { "member": 0.5, "insert": 0.5, "delete": 0.5 } }"#);
    let err = ExperimentConfig::from_json_file(file.path()).unwrap_err();
    assert!(matches!(err, Error::Json(_)));
    assert!(err.to_string().contains("Invalid operation mix"));
}

#[test]
fn test_load_rejects_non_positive_relative_error() {
    let file = write_config(r#"{ "relative_error": 0.0 }"#);
    assert!(matches!(
        ExperimentConfig::from_json_file(file.path()),
        Err(Error::InvalidInput(_))
    ));
}

#[test]
fn test_load_missing_file() {
    let dir = tempfile::tempdir().unwrap();
    let missing = dir.path().join("absent.json");
    assert!(matches!(
        ExperimentConfig::from_json_file(missing),
        Err(Error::Io(_))
    ));
}
