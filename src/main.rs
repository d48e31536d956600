use anyhow::Result;
use clap::Parser;
use hostwatch::*;
use std::path::PathBuf;
use std::sync::Arc;
use tokio::time::Duration;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::fmt::time::FormatTime;

struct LocalTimer;

impl FormatTime for LocalTimer {
    fn format_time(&self, w: &mut tracing_subscriber::fmt::format::Writer<'_>) -> std::fmt::Result {
        write!(
            w,
            "{}",
            chrono::Local::now().format("%Y-%m-%dT%H:%M:%S%.3f%:z")
        )
    }
}

#[derive(Parser, Debug)]
#[command(
    name = "hostwatch",
    about = "Host metrics agent - CPU/memory/disk/network snapshots with derived rates",
    version
)]
struct Args {
    /// Path to configuration file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Collection interval in seconds (overrides config)
    #[arg(long)]
    interval: Option<u64>,

    /// Collect one snapshot and exit
    #[arg(long)]
    once: bool,

    /// Output format
    #[arg(long, value_enum, default_value = "text")]
    format: render::OutputFormat,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    let mut app_config = config::AgentConfig::load(args.config.as_deref())?;
    if let Some(interval) = args.interval {
        app_config.agent.interval_secs = interval;
    }
    app_config.validate()?;

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(app_config.logging.level.clone()));
    tracing_subscriber::fmt()
        .with_timer(LocalTimer)
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    tracing::info!(
        interval_secs = app_config.agent.interval_secs,
        top_processes_limit = app_config.agent.top_processes_limit,
        "Starting {} v{}",
        version::NAME,
        version::VERSION
    );

    let probe = Arc::new(probe::SystemProbe::new());
    let registry = registry::Registry::new(probe, &app_config.collectors);
    let mut collector = orchestrator::Collector::new(
        registry,
        probe::hostname(),
        app_config.agent.top_processes_limit,
    );

    if args.once {
        let snapshot = collector.run_cycle().await?;
        println!("{}", render::render(&snapshot, args.format)?);
        return Ok(());
    }

    tracing::info!("Entering continuous collection mode");
    let (snapshot_tx, snapshot_rx) = tokio::sync::mpsc::channel(worker::SNAPSHOT_CHANNEL_CAPACITY);
    let (shutdown_tx, shutdown_rx) = tokio::sync::oneshot::channel();

    let emitter_handle = worker::spawn_emitter(snapshot_rx, args.format);
    let mut worker_handle = worker::spawn(
        worker::WorkerDeps {
            collector,
            snapshot_tx,
            shutdown_rx,
        },
        worker::WorkerConfig {
            interval: Duration::from_secs(app_config.agent.interval_secs),
        },
    );

    tokio::select! {
        result = &mut worker_handle => {
            // The worker only ends on its own on an orchestrator fault.
            emitter_handle.await?;
            result??;
        }
        _ = shutdown_signal() => {
            tracing::info!("Received shutdown signal");
            let _ = shutdown_tx.send(());
            worker_handle.await??;
            emitter_handle.await?;
        }
    }

    Ok(())
}

async fn shutdown_signal() {
    #[cfg(unix)]
    {
        let mut sigterm = match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(s) => s,
            Err(_) => {
                let _ = tokio::signal::ctrl_c().await;
                return;
            }
        };
        tokio::select! {
            _ = tokio::signal::ctrl_c() => {}
            _ = sigterm.recv() => {}
        }
    }
    #[cfg(not(unix))]
    {
        let _ = tokio::signal::ctrl_c().await;
    }
}
