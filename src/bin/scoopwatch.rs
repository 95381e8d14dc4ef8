//! Replay detector output through the compliance engine.
//!
//! Reads one JSON object per line (`{"frame_id": 1, "detections": [...]}`),
//! writes every frame verdict to stdout as JSON lines, and appends violation
//! verdicts to a separate file when `--violations` is given.

use std::fs::{File, OpenOptions};
use std::io::{self, BufRead, BufReader, BufWriter};
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::info;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

use scoopwatch::{Association, ComplianceEngine, Config, ReplayStats, replay};

#[derive(Parser, Debug)]
#[command(
    author,
    version,
    about = "Scooper compliance checker for detector output",
    long_about = None
)]
struct Args {
    /// ROI configuration file (`{"rois": [[x, y, w, h], ...]}`)
    #[arg(short, long)]
    config: PathBuf,

    /// JSON-lines detection frames; reads stdin when omitted
    #[arg(short, long)]
    input: Option<PathBuf>,

    /// Append verdicts of violation frames to this file
    #[arg(long)]
    violations: Option<PathBuf>,

    /// Use optimal association with this maximum match distance
    #[arg(long)]
    max_distance: Option<f32>,
}

fn init_tracing() {
    let use_json = std::env::var("LOG_FORMAT")
        .map(|v| v.eq_ignore_ascii_case("json"))
        .unwrap_or(false);

    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("scoopwatch=info"));

    if use_json {
        tracing_subscriber::registry()
            .with(fmt::layer().json().with_writer(io::stderr))
            .with(env_filter)
            .init();
    } else {
        tracing_subscriber::registry()
            .with(fmt::layer().with_target(true).with_writer(io::stderr))
            .with(env_filter)
            .init();
    }
}

fn main() -> Result<()> {
    init_tracing();
    let args = Args::parse();

    let mut config = Config::load(&args.config).with_context(|| {
        format!(
            "loading zone configuration from {}",
            args.config.display()
        )
    })?;
    if let Some(max_distance) = args.max_distance {
        config.tracker.association = Association::Optimal { max_distance };
    }
    info!(
        zones = config.zones.len(),
        proximity = config.rules.proximity,
        max_missed = config.tracker.max_missed,
        association = ?config.tracker.association,
        "configuration loaded"
    );

    let mut engine = ComplianceEngine::new(config)?;

    let reader: Box<dyn BufRead> = match &args.input {
        Some(path) => Box::new(BufReader::new(
            File::open(path)
                .with_context(|| format!("opening {}", path.display()))?,
        )),
        None => Box::new(BufReader::new(io::stdin())),
    };

    let violations_out = match &args.violations {
        Some(path) => Some(BufWriter::new(
            OpenOptions::new()
                .create(true)
                .append(true)
                .open(path)
                .with_context(|| format!("opening {}", path.display()))?,
        )),
        None => None,
    };

    let stdout = BufWriter::new(io::stdout().lock());
    let ReplayStats {
        frames,
        violation_frames,
        skipped_lines,
    } = replay(&mut engine, reader, stdout, violations_out)?;

    info!(frames, violation_frames, skipped_lines, "replay finished");
    Ok(())
}
