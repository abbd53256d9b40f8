//! Littering analysis command-line tool.
//!
//! Usage: `litterscan <video-file>`. Progress goes to the log on stderr; the
//! final report is printed to stdout as JSON.

use anyhow::{bail, Context};
use tracing::{error, info};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use litterscan_media::{check_ffmpeg, check_ffprobe, VideoResource};
use litterscan_models::AnalysisRun;
use litterscan_worker::{AnalysisPipeline, WorkerConfig};

#[tokio::main]
async fn main() {
    // Install rustls crypto provider (required for TLS/HTTPS)
    rustls::crypto::ring::default_provider()
        .install_default()
        .expect("Failed to install rustls crypto provider");

    dotenvy::dotenv().ok();

    if let Err(e) = init_tracing() {
        eprintln!("Failed to initialize logging: {}", e);
        std::process::exit(1);
    }

    if let Err(e) = run().await {
        error!("{:#}", e);
        std::process::exit(1);
    }
}

fn init_tracing() -> anyhow::Result<()> {
    let use_json = std::env::var("LOG_FORMAT")
        .map(|v| v.to_lowercase() == "json")
        .unwrap_or(false);

    let env_filter = EnvFilter::from_default_env().add_directive("litterscan=info".parse()?);

    if use_json {
        tracing_subscriber::registry()
            .with(fmt::layer().json().with_writer(std::io::stderr))
            .with(env_filter)
            .init();
    } else {
        tracing_subscriber::registry()
            .with(
                fmt::layer()
                    .with_writer(std::io::stderr)
                    .with_ansi(true)
                    .with_target(true)
                    .with_file(false)
                    .with_line_number(false),
            )
            .with(env_filter)
            .init();
    }
    Ok(())
}

async fn run() -> anyhow::Result<()> {
    let Some(path) = std::env::args().nth(1) else {
        bail!("usage: litterscan <video-file>");
    };

    check_ffmpeg()?;
    check_ffprobe()?;

    let config = WorkerConfig::from_env();
    info!("Worker config: {:?}", config);

    let pipeline = AnalysisPipeline::from_env(config)?;
    let video = VideoResource::from_path(&path)
        .await
        .with_context(|| format!("Cannot open {}", path))?;

    let mut run = AnalysisRun::new();
    pipeline
        .run_tracked(&mut run, &video, |progress| {
            info!(percent = progress.percent, "{}", progress.message);
        })
        .await?;

    let report = run.result().context("Run finished without a result")?;
    for incident in &report.incidents {
        info!(
            at = %incident.timestamp_label(),
            plate = incident.license_plate_display(),
            confidence = incident.confidence_percent(),
            "{}: {}",
            incident.vehicle_description,
            incident.action_description
        );
    }

    println!("{}", serde_json::to_string_pretty(report)?);
    Ok(())
}
