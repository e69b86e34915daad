mod trace;

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use log::info;
use osk_core::{Keyboard, KeyboardConfig};
use osk_types::Viewport;

use crate::trace::{Trace, replay};

/// Replay a recorded touch trace through the on-screen keyboard and print the
/// keys it reports each frame.
#[derive(Parser, Debug)]
#[command(name = "osk-replay", version)]
struct Args {
    /// Trace file (JSON)
    #[arg(long)]
    trace: PathBuf,

    /// Keyboard configuration file (JSON); defaults apply when missing
    #[arg(long, env = "OSK_CONFIG", default_value = "keyboard.json")]
    config: PathBuf,

    /// Viewport width, overrides the trace
    #[arg(long)]
    width: Option<u32>,

    /// Viewport height, overrides the trace
    #[arg(long)]
    height: Option<u32>,

    /// Print one JSON object per frame
    #[arg(long)]
    json: bool,

    /// Print frames that reported no keys too
    #[arg(long)]
    all: bool,

    /// Enable debug logging
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> Result<()> {
    let args = Args::parse();

    let default_filter = if args.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_filter))
        .init();

    let config = KeyboardConfig::load_from(&args.config)?;
    let trace = Trace::load(&args.trace)?;

    let initial = trace.viewport.unwrap_or(Viewport::new(800, 480));
    let viewport = Viewport::new(
        args.width.unwrap_or(initial.width),
        args.height.unwrap_or(initial.height),
    );
    info!(
        "Replaying {} frames on {}x{}",
        trace.frames.len(),
        viewport.width,
        viewport.height
    );

    let mut keyboard =
        Keyboard::qwerty(config, viewport).context("Failed to construct keyboard")?;
    let reports = replay(&mut keyboard, &trace)?;

    let mut emitted = 0;
    for report in &reports {
        emitted += report.keys.len();
        if report.keys.is_empty() && !args.all {
            continue;
        }
        if args.json {
            println!("{}", serde_json::to_string(report)?);
        } else {
            let keys: Vec<String> = report.keys.iter().map(|k| k.to_string()).collect();
            println!(
                "{:>6} {:>9.3}s {:<8} [{}]",
                report.frame,
                report.time,
                report.mode,
                keys.join(", ")
            );
        }
    }

    info!("{} key reports over {} frames", emitted, reports.len());
    Ok(())
}
