//! Tracked Experiment Example
//!
//! Runs the same configuration under several seeds, records every run into
//! an `ExperimentStore`, and summarizes the stored time series.
//!
//! Run with: cargo run --release --example tracked_experiment

use listbench::config::{ConfidenceLevel, ExperimentConfig};
use listbench::experiment::ExperimentStore;
use listbench::sampling::{Experiment, Phase, LIST_LEN_METRIC};
use tracing_subscriber::EnvFilter;

fn main() -> anyhow::Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(filter)
        .init();

    println!("=== listbench: tracked experiment ===\n");

    let mut store = ExperimentStore::new();

    // -------------------------------------------------------------------------
    // 1. Run the balanced mix under three seeds
    // -------------------------------------------------------------------------
    println!("1. Running three seeds...");

    for seed in [1_u64, 2, 3] {
        let config = ExperimentConfig::builder()
            .population(1_000)
            .operations_per_batch(2_000)
            .operation_mix(0.80, 0.10, 0.10)
            .pilot_runs(50)
            .relative_error(0.05)
            .confidence(ConfidenceLevel::NinetyFive)
            .seed(seed)
            .build()?;

        let run_id = format!("run-seed-{seed}");
        let report = Experiment::new(config)?.run_tracked(&mut store, "exp-balanced", &run_id)?;
        println!(
            "   {run_id}: pilot mean {:.6} s, {} final runs, final mean {:.6} s",
            report.pilot.statistics.mean,
            report.final_phase.runs,
            report.final_phase.statistics.mean,
        );
    }

    // -------------------------------------------------------------------------
    // 2. Inspect the stored series
    // -------------------------------------------------------------------------
    println!("\n2. Stored series...");

    let mut runs = store.get_runs_for_experiment("exp-balanced");
    runs.sort_by_key(|run| run.run_id().to_string());
    for run in runs {
        let final_stats = store.summarize(
            run.run_id(),
            Phase::Final.metric_key(),
            ConfidenceLevel::NinetyFive,
        )?;
        let lens = store.get_metrics_for_run(run.run_id(), LIST_LEN_METRIC);
        let first_len = lens.first().map_or(0.0, |m| m.value());
        let last_len = lens.last().map_or(0.0, |m| m.value());

        println!(
            "   {} ({:?}, seed {:?}): final {:.6} s ± {:.6} s, list {first_len} -> {last_len}",
            run.run_id(),
            run.status(),
            run.seed(),
            final_stats.mean,
            final_stats.margin_of_error,
        );
    }

    println!(
        "\n   {} experiments, {} runs, {} metrics",
        store.experiment_count(),
        store.run_count(),
        store.metric_count()
    );

    Ok(())
}
