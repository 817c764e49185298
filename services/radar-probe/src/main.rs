//! Radar probe.
//!
//! Fetches the latest ARSO radar composite, classifies it into
//! precipitation intensities and prints a JSON report with:
//! - the selected snapshot
//! - per-group pixel counts
//! - the intensity at each `--point`
//!
//! Optionally writes the sanitized composite to `--output`.

mod probe;

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use radar::{ClassifierConfig, RadarClassifier};
use snapshot_source::{ArsoClient, ArsoClientConfig};
use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;

use probe::{run_probe, ProbeRequest, QueryPoint};

#[derive(Parser, Debug)]
#[command(name = "radar-probe")]
#[command(about = "Report radar precipitation intensity for the latest composite")]
struct Args {
    /// Query point "x,y" in degree-role coordinates (repeatable)
    #[arg(short, long = "point")]
    points: Vec<QueryPoint>,

    /// Write the sanitized composite PNG here
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Classifier configuration (YAML); defaults to the ARSO composite
    #[arg(long, env = "RADAR_CONFIG")]
    config: Option<PathBuf>,

    /// Host serving the timeline and images
    #[arg(long, env = "ARSO_HOST", default_value = "http://meteo.arso.gov.si")]
    host: String,

    /// Timeline path on the host
    #[arg(
        long,
        env = "ARSO_TIMELINE_PATH",
        default_value = "/uploads/probase/www/nowcast/inca/inca_si0zm_data.json?prod=si0zm"
    )]
    timeline_path: String,

    /// HTTP request timeout in seconds
    #[arg(long, default_value = "30")]
    timeout_secs: u64,

    /// Log level
    #[arg(long, default_value = "info")]
    log_level: String,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load environment from .env file if present
    dotenvy::dotenv().ok();

    let args = Args::parse();

    let level = match args.log_level.to_lowercase().as_str() {
        "trace" => Level::TRACE,
        "debug" => Level::DEBUG,
        "info" => Level::INFO,
        "warn" => Level::WARN,
        "error" => Level::ERROR,
        _ => Level::INFO,
    };

    // Logs go to stderr so stdout carries only the report
    let subscriber = FmtSubscriber::builder()
        .with_max_level(level)
        .with_target(true)
        .with_writer(std::io::stderr)
        .json()
        .finish();

    tracing::subscriber::set_global_default(subscriber)?;

    let config = match &args.config {
        Some(path) => ClassifierConfig::load(path)
            .with_context(|| format!("Failed to load {}", path.display()))?,
        None => ClassifierConfig::arso(),
    };
    let mut classifier =
        RadarClassifier::from_config(&config).context("Invalid classifier configuration")?;

    let client = ArsoClient::new(ArsoClientConfig {
        host: args.host.clone(),
        timeline_path: args.timeline_path.clone(),
        timeout_secs: args.timeout_secs,
    })?;

    info!(host = %args.host, points = args.points.len(), "Starting radar probe");

    let request = ProbeRequest {
        points: args.points,
        output: args.output,
    };
    let report = run_probe(&client, &mut classifier, &request).await?;

    println!("{}", serde_json::to_string_pretty(&report)?);
    Ok(())
}
