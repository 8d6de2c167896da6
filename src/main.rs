use std::path::PathBuf;

use anyhow::{Context, Result};
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use lap_replay::{cancel_on, drive, load_file, prepare_session, LogCanvas, ReplayConfig};

fn main() {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    // Create tokio runtime for the tick loop
    let rt = tokio::runtime::Runtime::new().expect("Failed to create Tokio runtime");

    if let Err(e) = rt.block_on(run()) {
        error!("{:#}", e);
        std::process::exit(1);
    }
}

async fn run() -> Result<()> {
    let path = std::env::args_os()
        .nth(1)
        .map(PathBuf::from)
        .context("Usage: lap-replay <lap.csv|lap.json>")?;

    let config = ReplayConfig::load();
    let recording =
        load_file(&path).with_context(|| format!("Failed to load lap from {}", path.display()))?;

    let mut engine = prepare_session(recording, &config)?;
    let mut canvas = LogCanvas::new();

    let summary = drive(&mut engine, &mut canvas, cancel_on(tokio::signal::ctrl_c())).await;

    if summary.cancelled {
        info!("Stopped after {} of {} frames", summary.frames_drawn, engine.total_frames());
    } else {
        info!("Replayed {} frames", summary.frames_drawn);
    }
    Ok(())
}
