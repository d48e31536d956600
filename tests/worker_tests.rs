// Worker integration test: spawn loop, receive snapshots, shutdown cleanly

mod common;

use common::{FakeSource, io_counters};
use hostwatch::orchestrator::Collector;
use hostwatch::worker::{SNAPSHOT_CHANNEL_CAPACITY, WorkerConfig, WorkerDeps, spawn};
use tokio::time::Duration;

#[tokio::test]
async fn test_worker_ticks_and_shuts_down_cleanly() {
    let source = FakeSource::with_disk_io(vec![io_counters(100, 50), io_counters(200, 100)]);
    let collector = Collector::new(source, "testhost".into(), 5);

    let (snapshot_tx, mut snapshot_rx) = tokio::sync::mpsc::channel(SNAPSHOT_CHANNEL_CAPACITY);
    let (shutdown_tx, shutdown_rx) = tokio::sync::oneshot::channel();

    let handle = spawn(
        WorkerDeps {
            collector,
            snapshot_tx,
            shutdown_rx,
        },
        WorkerConfig {
            interval: Duration::from_millis(10),
        },
    );

    let first = snapshot_rx.recv().await.expect("first snapshot");
    assert_eq!(first.hostname, "testhost");
    assert!(first.disk.is_some());

    let second = snapshot_rx.recv().await.expect("second snapshot");
    assert!(second.disk_rates.is_some());

    shutdown_tx.send(()).expect("shutdown");
    handle.await.expect("join").expect("worker result");

    // Worker dropped its sender on shutdown, so the channel drains to closed.
    while snapshot_rx.recv().await.is_some() {}
}

#[tokio::test]
async fn test_worker_stops_between_cycles_on_shutdown() {
    let source = FakeSource::default();
    let collector = Collector::new(source, "testhost".into(), 5);

    let (snapshot_tx, mut snapshot_rx) = tokio::sync::mpsc::channel(SNAPSHOT_CHANNEL_CAPACITY);
    let (shutdown_tx, shutdown_rx) = tokio::sync::oneshot::channel();

    let handle = spawn(
        WorkerDeps {
            collector,
            snapshot_tx,
            shutdown_rx,
        },
        WorkerConfig {
            interval: Duration::from_secs(3600),
        },
    );

    // One snapshot arrives immediately; the worker then sleeps a full interval.
    let first = snapshot_rx.recv().await.expect("first snapshot");
    assert!(first.cpu.is_some());

    // Shutdown interrupts the sleep instead of waiting out the hour.
    shutdown_tx.send(()).expect("shutdown");
    tokio::time::timeout(Duration::from_secs(5), handle)
        .await
        .expect("worker exits promptly")
        .expect("join")
        .expect("worker result");

    assert!(snapshot_rx.recv().await.is_none(), "no snapshot after shutdown");
}
