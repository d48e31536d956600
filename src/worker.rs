// Background collection worker (continuous scheduler).
// Collection runs in the worker; rendering runs in a dedicated emitter task (channel).

use crate::models::Snapshot;
use crate::orchestrator::Collector;
use crate::registry::DomainSource;
use crate::render::{self, OutputFormat};
use tokio::sync::{mpsc, oneshot};
use tokio::time::Duration;

/// Capacity for the snapshot channel (backpressure if the emitter falls behind).
pub const SNAPSHOT_CHANNEL_CAPACITY: usize = 8;

/// Collector, output channel, and shutdown for the worker.
pub struct WorkerDeps<S> {
    pub collector: Collector<S>,
    pub snapshot_tx: mpsc::Sender<Snapshot>,
    pub shutdown_rx: oneshot::Receiver<()>,
}

pub struct WorkerConfig {
    /// Delay between the end of one cycle and the start of the next.
    pub interval: Duration,
}

/// Spawns the continuous collection loop. Domain failures are already isolated
/// inside the collector; an error escaping a cycle is an orchestrator fault
/// and terminates the loop with `Err`. The shutdown signal is honored between
/// cycles, never mid-merge, so a partial snapshot is never emitted.
pub fn spawn<S>(
    deps: WorkerDeps<S>,
    config: WorkerConfig,
) -> tokio::task::JoinHandle<anyhow::Result<()>>
where
    S: DomainSource + Send + Sync + 'static,
{
    let WorkerDeps {
        mut collector,
        snapshot_tx,
        mut shutdown_rx,
    } = deps;

    tokio::spawn(async move {
        loop {
            let snapshot = match collector.run_cycle().await {
                Ok(s) => s,
                Err(e) => {
                    tracing::error!(
                        error = %e,
                        operation = "run_cycle",
                        "collection cycle fault; stopping worker"
                    );
                    return Err(e);
                }
            };
            if snapshot_tx.send(snapshot).await.is_err() {
                tracing::debug!("snapshot channel closed");
                break;
            }
            tokio::select! {
                _ = tokio::time::sleep(config.interval) => {}
                _ = &mut shutdown_rx => {
                    tracing::debug!("Worker shutting down");
                    break;
                }
            }
        }
        Ok(())
    })
}

/// Spawns the task that renders snapshots to stdout as they arrive. Exits when
/// the worker drops its sender.
pub fn spawn_emitter(
    mut snapshot_rx: mpsc::Receiver<Snapshot>,
    format: OutputFormat,
) -> tokio::task::JoinHandle<()> {
    tokio::spawn(async move {
        while let Some(snapshot) = snapshot_rx.recv().await {
            match render::render(&snapshot, format) {
                Ok(out) => println!("{out}"),
                Err(e) => tracing::warn!(error = %e, "failed to render snapshot"),
            }
        }
        tracing::debug!("Snapshot emitter shutting down");
    })
}
