//! Serial Baseline Experiment
//!
//! Runs the two-phase benchmark once and prints the report.
//!
//! Run with: cargo run --release --example serial_baseline [config.json] [--json]
//!
//! Without a config file the reference workload is used (n=1000, m=10000,
//! 99% member / 0.5% insert / 0.5% delete, 100 pilot runs, r=5%, 95%).
//! Set `RUST_LOG=debug` to see every timed batch.

use anyhow::Context;
use listbench::config::ExperimentConfig;
use listbench::sampling::Experiment;
use tracing_subscriber::EnvFilter;

fn main() -> anyhow::Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(filter)
        .init();

    let args: Vec<String> = std::env::args().skip(1).collect();
    let as_json = args.iter().any(|a| a == "--json");
    let config = match args.iter().find(|a| !a.starts_with("--")) {
        Some(path) => ExperimentConfig::from_json_file(path)
            .with_context(|| format!("loading experiment config from {path}"))?,
        None => ExperimentConfig::default(),
    };

    println!("=== listbench: serial baseline ===\n");

    let mut experiment = Experiment::new(config)?;
    let report = experiment.run()?;

    if as_json {
        println!("{}", report.to_json_pretty()?);
    } else {
        println!("{report}");
        println!(
            "\nOperations: {} member hits, {} inserts, {} deletes over {} batches",
            report.pilot.operations.member_hits + report.final_phase.operations.member_hits,
            report.pilot.operations.inserts + report.final_phase.operations.inserts,
            report.pilot.operations.deletes + report.final_phase.operations.deletes,
            report.total_runs(),
        );
    }

    Ok(())
}
