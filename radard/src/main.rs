//! `radard` — radar/vision lead-fusion cycle orchestrator.
//!
//! Reads `CarParams` once at startup (fatal if missing or the cycle period
//! is out of range), then drives the cycle loop at the configured radar
//! period until the input is exhausted or the process is signaled.
//!
//! The vendor radar interface and the inter-process message bus are
//! external collaborators; this binary reads cycle snapshots as
//! newline-delimited JSON from a file (or stdin) so it is runnable
//! standalone against recorded or synthetic input.

use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use radar_env::{CarParams, CycleSnapshot, InMemoryParamStore, ParamStore, SystemClock};
use radard::{RadarD, RateKeeper};
use tracing::{error, info, Level};

mod json_source;

use json_source::JsonLinesMessageSource;

#[derive(Debug, Parser)]
#[command(name = "radard", about = "Radar/vision lead-fusion cycle orchestrator")]
struct Cli {
    /// Radar cycle period, seconds. Must lie strictly between 0.01 and 0.20.
    #[arg(long, default_value_t = 0.05)]
    radar_period: f64,

    /// Ego-velocity-history delay in cycles, used to align v_ego with the
    /// radar's measurement latency.
    #[arg(long, default_value_t = 0)]
    delay: usize,

    /// Car identifier, carried in `CarParams`.
    #[arg(long, default_value = "generic")]
    car_name: String,

    /// File of newline-delimited JSON cycle snapshots to replay. Reads
    /// stdin when omitted.
    #[arg(long)]
    input: Option<PathBuf>,

    /// Log level (error, warn, info, debug, trace).
    #[arg(long, default_value = "info")]
    log_level: Level,
}

fn init_logging(level: Level) {
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_target(false)
        .init();
}

fn run(cli: Cli) -> Result<()> {
    info!("radard is waiting for CarParams");
    let params = InMemoryParamStore::new(CarParams {
        car_name: cli.car_name.clone(),
        radar_time_step: cli.radar_period,
    });
    // Blocking read at startup: a missing or unknown-car `CarParams` is
    // configuration-fatal and exits the process (see main's error path).
    let car_params = params
        .car_params()
        .context("configuration fatal: could not read CarParams at startup")?;
    info!(car_name = %car_params.car_name, "radard got CarParams");

    let clock = SystemClock;
    let mut radar_d = RadarD::new(car_params.radar_time_step, cli.delay)
        .context("failed to construct Kalman parameters from radar period")?;
    let mut rate_keeper = RateKeeper::new(car_params.radar_time_step, &clock);

    let reader: Box<dyn BufRead> = match &cli.input {
        Some(path) => Box::new(BufReader::new(
            File::open(path).with_context(|| format!("opening input file {path:?}"))?,
        )),
        None => Box::new(BufReader::new(io::stdin())),
    };
    let mut source = JsonLinesMessageSource::new(reader);

    let mut cycles = 0u64;
    loop {
        let snapshot: CycleSnapshot = match source.next_snapshot()? {
            Some(snap) => snap,
            None => break,
        };

        let mut msg = radar_d.update(&params, &snapshot);
        msg.cum_lag_ms = rate_keeper.cum_lag_ms(&clock);

        println!("{}", serde_json::to_string(&msg)?);
        println!("{}", serde_json::to_string(&radar_d.live_tracks())?);

        rate_keeper.monitor_time(&clock);
        cycles += 1;
    }

    info!(cycles, "radard processed all input, shutting down");
    Ok(())
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.log_level);

    if let Err(err) = run(cli) {
        error!(error = %err, "radard exited with a fatal error");
        return Err(err);
    }
    Ok(())
}
