//! lobby — random passenger traffic against a simulated elevator fleet.
//!
//! Runs a fleet for a fixed number of tick periods (or until Ctrl-C) while a
//! producer task submits random trips inside the building's floor range.
//! Every event is logged; with `--out` they are also written as CSV.
//!
//! ```text
//! RUST_LOG=debug lobby --periods 60 --seed 7 --out ./out
//! lobby --config lobby.json --trip 1:9 --trip 8:2
//! ```

mod config;

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::Parser;
use lift_core::TrafficRng;
use lift_dispatch::RequestSubmitter;
use lift_output::{CsvWriter, OutputObserver, TracingObserver};
use lift_sim::FleetBuilder;
use tokio::time::MissedTickBehavior;
use tokio_util::sync::CancellationToken;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use config::{LobbyConfig, TripArg};

#[derive(Parser)]
#[command(name = "lobby")]
#[command(about = "Simulate random lobby traffic against an elevator fleet", long_about = None)]
struct Args {
    /// JSON run configuration (defaults are used for anything missing)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Number of tick periods to run before shutting down
    #[arg(long, default_value = "120")]
    periods: u64,

    /// Traffic seed (overrides the config file)
    #[arg(long)]
    seed: Option<u64>,

    /// Directory for unit_states.csv and assignments.csv
    #[arg(long)]
    out: Option<PathBuf>,

    /// Extra trip submitted before the run, as ORIGIN:DESTINATION
    #[arg(long = "trip")]
    trips: Vec<TripArg>,
}

#[tokio::main]
async fn main() -> Result<()> {
    init_logging();
    let args = Args::parse();

    let mut cfg = match &args.config {
        Some(path) => LobbyConfig::load(path)?,
        None => LobbyConfig::default(),
    };
    if let Some(seed) = args.seed {
        cfg.seed = seed;
    }
    cfg.validate()?;

    let output = match &args.out {
        Some(dir) => {
            std::fs::create_dir_all(dir)
                .with_context(|| format!("creating output directory {}", dir.display()))?;
            Some(Arc::new(OutputObserver::new(CsvWriter::new(dir)?)))
        }
        None => None,
    };

    let mut builder = FleetBuilder::new(cfg.fleet.clone()).observer(Arc::new(TracingObserver));
    if let Some(output) = &output {
        builder = builder.observer(output.clone());
    }
    let mut fleet = builder.build()?;

    for TripArg(request) in &args.trips {
        cfg.check_trip(request)?;
        fleet.submitter().submit_request(*request)?;
    }

    info!(
        units = cfg.fleet.unit_count,
        floors = %format!("{}..={}", cfg.min_floor, cfg.max_floor),
        periods = args.periods,
        seed = cfg.seed,
        "lobby starting"
    );

    let shutdown = CancellationToken::new();
    let run_for = cfg.fleet.tick_period() * u32::try_from(args.periods).unwrap_or(u32::MAX);
    tokio::spawn(stop_after(run_for, shutdown.clone()));
    let producer = tokio::spawn(produce_traffic(cfg.clone(), fleet.submitter(), shutdown.clone()));

    fleet.run(shutdown.clone()).await;

    match producer.await {
        Ok(submitted) => info!(submitted, "producer finished"),
        Err(e) => warn!(error = %e, "producer task failed"),
    }

    if let Some(output) = &output {
        output.finish()?;
        if let Some(e) = output.take_error() {
            warn!(error = %e, "output incomplete");
        }
    }
    if fleet.events().failures() > 0 {
        warn!(failures = fleet.events().failures(), "observer failures during run");
    }

    for unit in fleet.units() {
        let snap = unit.snapshot();
        println!(
            "{}: floor {} {} ({} queued)",
            snap.unit,
            snap.floor,
            snap.direction,
            snap.queue_len()
        );
    }
    Ok(())
}

fn init_logging() {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(env_filter).init();
}

/// Cancel `shutdown` after `run_for`, or earlier on Ctrl-C.
async fn stop_after(run_for: Duration, shutdown: CancellationToken) {
    tokio::select! {
        _ = tokio::time::sleep(run_for) => info!("period budget reached"),
        _ = tokio::signal::ctrl_c() => info!("interrupted"),
        _ = shutdown.cancelled() => {}
    }
    shutdown.cancel();
}

/// Submit random trips every tick period until shutdown.  Returns how many
/// were submitted.
async fn produce_traffic(cfg: LobbyConfig, submitter: RequestSubmitter, shutdown: CancellationToken) -> u64 {
    let mut rng = TrafficRng::new(cfg.seed).child(1);
    let mut interval = tokio::time::interval(cfg.fleet.tick_period());
    interval.set_missed_tick_behavior(MissedTickBehavior::Skip);
    let mut submitted = 0;

    loop {
        tokio::select! {
            biased;

            _ = shutdown.cancelled() => break,

            _ = interval.tick() => {
                for _ in 0..cfg.requests_per_period {
                    let Some(request) = rng.trip(cfg.min_floor, cfg.max_floor) else {
                        continue;
                    };
                    if let Err(e) = cfg.check_trip(&request) {
                        warn!(error = %e, %request, "trip rejected");
                        continue;
                    }
                    if let Err(e) = submitter.submit_request(request) {
                        warn!(error = %e, "producer stopping");
                        return submitted;
                    }
                    submitted += 1;
                }
            }
        }
    }
    submitted
}
