// Collection orchestrator: one cycle across all enabled domains

use crate::models::{DiskRates, ProcessSummary, RankMetric, Snapshot};
use crate::rates;
use crate::registry::{Domain, DomainSource, Reading};
use crate::store::SnapshotStore;
use chrono::Utc;
use std::collections::BTreeMap;
use std::time::Instant;
use tracing::warn;

/// Drives one collection cycle at a time: reads enabled domains in canonical
/// order, isolates per-domain failures, derives rates from the previous-sample
/// store, and merges everything into one snapshot. Re-entrant across cycles.
pub struct Collector<S> {
    source: S,
    store: SnapshotStore,
    hostname: String,
    top_limit: usize,
}

impl<S: DomainSource> Collector<S> {
    pub fn new(source: S, hostname: String, top_limit: usize) -> Self {
        Self {
            source,
            store: SnapshotStore::new(),
            hostname,
            top_limit,
        }
    }

    /// One cycle. A failed domain is logged and omitted from the snapshot; a
    /// cycle where every domain failed still returns `Ok` with a snapshot
    /// carrying only timestamp and hostname. `Err` here means a fault outside
    /// the per-domain isolation boundary and is fatal to a continuous run.
    pub async fn run_cycle(&mut self) -> anyhow::Result<Snapshot> {
        let mut snapshot = Snapshot::empty(Utc::now(), self.hostname.clone());

        for domain in Domain::ALL {
            if !self.source.enabled(domain) {
                continue;
            }
            match self.source.read(domain).await {
                Ok(reading) => self.merge(&mut snapshot, reading).await,
                Err(e) => warn!(
                    domain = %e.domain,
                    error = %e,
                    "domain collection failed; omitting from snapshot"
                ),
            }
        }

        Ok(snapshot)
    }

    async fn merge(&mut self, snapshot: &mut Snapshot, reading: Reading) {
        match reading {
            Reading::Cpu(cpu) => {
                snapshot.cpu = Some(cpu);
                snapshot.top_cpu_processes = self.top(RankMetric::CpuPercent).await;
            }
            Reading::Memory(memory) => {
                snapshot.memory = Some(memory);
                snapshot.top_memory_processes = self.top(RankMetric::MemoryPercent).await;
            }
            Reading::Disk(disk) => {
                let now = Instant::now();
                let derived = match self.store.previous_disk() {
                    Some((prev, at)) => rates::disk_rates(
                        Some(prev),
                        disk.io.as_ref(),
                        now.duration_since(*at).as_secs_f64(),
                    ),
                    None => DiskRates::default(),
                };
                snapshot.disk_rates = Some(derived);
                // Elapsed is measured against this domain's own last successful
                // counters, so a missing counter set leaves the store untouched.
                if let Some(io) = disk.io.clone() {
                    self.store.record_disk(io, now);
                }
                snapshot.disk = Some(disk);
            }
            Reading::Network(network) => {
                let now = Instant::now();
                let derived = match self.store.previous_network() {
                    Some((prev, at)) => rates::interface_rates(
                        prev,
                        &network.interfaces,
                        now.duration_since(*at).as_secs_f64(),
                    ),
                    None => BTreeMap::new(),
                };
                snapshot.network_rates = Some(derived);
                self.store.record_network(network.interfaces.clone(), now);
                snapshot.network = Some(network);
            }
        }
    }

    /// A failed ranking never fails its domain; the list is just absent.
    async fn top(&self, metric: RankMetric) -> Option<Vec<ProcessSummary>> {
        match self.source.top(metric, self.top_limit).await {
            Ok(list) => Some(list),
            Err(e) => {
                warn!(domain = %e.domain, error = %e, "process ranking failed; omitting");
                None
            }
        }
    }
}
