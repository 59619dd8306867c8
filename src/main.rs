//! echowatch CLI
//!
//! Usage:
//!   echowatch                      # collect rounds, loop automatically
//!   echowatch --interactive        # ask before starting each new round
//!   echowatch --live               # continuous live view, Ctrl-C to stop
//!   echowatch --json               # export rounds as JSON instead of PNG

use anyhow::{Context, Result};
use clap::Parser;
use std::io::{self, Write};
use std::path::PathBuf;
use tokio_util::sync::CancellationToken;

use echowatch::audio::AudioAlertHandle;
use echowatch::config::MonitorConfig;
use echowatch::export::{JsonExporter, PlotExporter, RoundExporter};
use echowatch::sensing::{ContinueGate, MonitorController, SessionDriver, SessionMode};
use echowatch::sensor::{DistanceSensor, SimulatedSensor};
use echowatch::view::AsciiView;

#[derive(Parser, Debug)]
#[command(
    name = "echowatch",
    about = "Monitor a distance sensor, alert on close objects, export reading rounds"
)]
struct Args {
    /// Continuous live mode with a rolling window view (Ctrl-C to stop)
    #[arg(short, long)]
    live: bool,

    /// Ask for confirmation before starting each new round
    #[arg(short, long)]
    interactive: bool,

    /// Export rounds as JSON instead of PNG charts
    #[arg(long)]
    json: bool,

    /// Path to a JSON config file
    #[arg(long)]
    config: Option<PathBuf>,

    /// Directory for exported rounds
    #[arg(long, default_value = "./rounds")]
    export_dir: PathBuf,

    /// Override the warning distance (cm)
    #[arg(long)]
    threshold: Option<f64>,

    /// Override the sampling interval (ms)
    #[arg(long)]
    interval_ms: Option<u64>,

    /// Override the number of readings per round
    #[arg(long)]
    round_size: Option<usize>,

    /// Seed for the simulated sensor, for reproducible sessions
    #[arg(long)]
    seed: Option<u64>,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging (reads RUST_LOG env var)
    env_logger::Builder::from_default_env()
        .filter_level(log::LevelFilter::Info)
        .init();

    let args = Args::parse();

    let mut config = match &args.config {
        Some(path) => MonitorConfig::load(path)?,
        None => MonitorConfig::default(),
    };
    if let Some(threshold) = args.threshold {
        config.warning_distance_cm = threshold;
    }
    if let Some(interval_ms) = args.interval_ms {
        config.sample_interval_ms = interval_ms;
    }
    if let Some(round_size) = args.round_size {
        config.round_size = round_size;
    }
    config.validate()?;

    let sensor: Box<dyn DistanceSensor + Send> = match args.seed {
        Some(seed) => Box::new(SimulatedSensor::seeded(seed)),
        None => Box::new(SimulatedSensor::new()),
    };
    let sink = Box::new(AudioAlertHandle::new(
        config.alert_sound.clone(),
        config.alert_volume,
        config.blocking_alerts,
    ));
    let exporter: Box<dyn RoundExporter + Send> = if args.json {
        Box::new(JsonExporter::new(args.export_dir.clone()))
    } else {
        Box::new(PlotExporter::new(
            args.export_dir.clone(),
            config.warning_distance_cm,
        ))
    };
    let view = Box::new(AsciiView::new());
    let confirm: ContinueGate = Box::new(prompt_next_round);

    let driver = SessionDriver::new(config, sensor, sink, view, exporter, confirm)?;

    let outcome = if args.live {
        let mut controller = MonitorController::new();
        controller.start(driver, SessionMode::Live)?;

        tokio::signal::ctrl_c()
            .await
            .context("failed to listen for interrupt")?;
        controller.stop().await?
    } else {
        let cancel = CancellationToken::new();
        let interrupt_token = cancel.clone();
        tokio::spawn(async move {
            if tokio::signal::ctrl_c().await.is_ok() {
                interrupt_token.cancel();
            }
        });

        let mode = SessionMode::Rounds {
            interactive: args.interactive,
        };
        driver.run(mode, cancel).await?
    };

    log::info!(
        "Session complete: {} readings, {} rounds exported",
        outcome.readings_taken,
        outcome.rounds_completed
    );
    Ok(())
}

/// Ask on the terminal whether to start the next round. Anything but an
/// explicit "n"/"no" continues; a closed stdin ends the session.
fn prompt_next_round(completed: u32) -> bool {
    print!("Round {completed} done. Start another? [Y/n] ");
    let _ = io::stdout().flush();

    let mut line = String::new();
    match io::stdin().read_line(&mut line) {
        Ok(0) => false,
        Ok(_) => {
            let answer = line.trim().to_ascii_lowercase();
            answer != "n" && answer != "no"
        }
        Err(_) => false,
    }
}
