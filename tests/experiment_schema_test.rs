//! Experiment tracking schema tests

use listbench::config::{ConfidenceLevel, ExperimentConfig};
use listbench::experiment::{
    ExperimentRecord, ExperimentStore, MetricRecord, RunRecord, RunStatus,
};

// =============================================================================
// ExperimentRecord Tests
// =============================================================================

#[test]
fn test_experiment_record_creation() {
    let record = ExperimentRecord::new("exp-001", "Serial baseline");

    assert_eq!(record.experiment_id(), "exp-001");
    assert_eq!(record.name(), "Serial baseline");
    assert!(record.created_at().timestamp() > 0);
    assert!(record.config().is_none());
}

#[test]
fn test_experiment_record_config_snapshot() {
    let config = ExperimentConfig::builder()
        .operation_mix(0.8, 0.1, 0.1)
        .population(250)
        .seed(17)
        .build()
        .unwrap();

    let record = ExperimentRecord::for_config("exp-002", "Insert heavy", &config).unwrap();
    let snapshot = record.config().unwrap();

    assert_eq!(snapshot["population"], 250);
    assert_eq!(snapshot["confidence"], 0.95);
    assert_eq!(record.benchmark_config().unwrap().unwrap(), config);
}

#[test]
fn test_experiment_record_serialization() {
    let record = ExperimentRecord::new("exp-003", "Serialization Test");

    let json = serde_json::to_string(&record).expect("serialization failed");
    let deserialized: ExperimentRecord =
        serde_json::from_str(&json).expect("deserialization failed");

    assert_eq!(record, deserialized);
}

// =============================================================================
// RunRecord Tests
// =============================================================================

#[test]
fn test_run_record_lifecycle() {
    let mut run = RunRecord::seeded("run-001", "exp-001", 123);
    assert_eq!(run.status(), RunStatus::Pending);
    assert!(run.started_at().is_none());

    run.start();
    assert_eq!(run.status(), RunStatus::Running);
    assert!(run.started_at().is_some());
    assert!(run.ended_at().is_none());

    run.complete(RunStatus::Failed);
    assert_eq!(run.status(), RunStatus::Failed);
    assert!(run.ended_at().unwrap() >= run.started_at().unwrap());
}

#[test]
fn test_run_record_serialization() {
    let mut run = RunRecord::seeded("run-002", "exp-001", 9);
    run.start();
    run.complete(RunStatus::Success);

    let json = serde_json::to_string(&run).unwrap();
    let deserialized: RunRecord = serde_json::from_str(&json).unwrap();
    assert_eq!(run, deserialized);
    assert_eq!(deserialized.seed(), Some(9));
}

// =============================================================================
// MetricRecord / Store Tests
// =============================================================================

#[test]
fn test_metric_time_series_query() {
    let mut store = ExperimentStore::new();
    for step in [3u64, 1, 0, 2] {
        #[allow(clippy::cast_precision_loss)]
        store.add_metric(MetricRecord::new("run-1", "pilot_seconds", step, step as f64));
    }
    store.add_metric(MetricRecord::new("run-1", "final_seconds", 0, 9.0));

    let series = store.get_metrics_for_run("run-1", "pilot_seconds");
    let steps: Vec<u64> = series.iter().map(MetricRecord::step).collect();
    assert_eq!(steps, vec![0, 1, 2, 3]);

    let stats = store
        .summarize("run-1", "pilot_seconds", ConfidenceLevel::NinetyFive)
        .unwrap();
    assert!((stats.mean - 1.5).abs() < 1e-12);
}

#[test]
fn test_runs_grouped_by_experiment() {
    let mut store = ExperimentStore::new();
    store.add_experiment(ExperimentRecord::new("exp-a", "A"));
    store.add_experiment(ExperimentRecord::new("exp-b", "B"));
    store.add_run(RunRecord::new("run-1", "exp-a"));
    store.add_run(RunRecord::new("run-2", "exp-a"));
    store.add_run(RunRecord::new("run-3", "exp-b"));

    assert_eq!(store.experiment_count(), 2);
    assert_eq!(store.run_count(), 3);
    assert_eq!(store.get_runs_for_experiment("exp-a").len(), 2);
    assert_eq!(store.get_runs_for_experiment("exp-b").len(), 1);
    assert!(store.get_runs_for_experiment("exp-c").is_empty());
}
