// Collector registry: closed domain set, capability interface, probe binding

use crate::config::CollectorsConfig;
use crate::models::{
    CpuReading, DiskReading, MemoryReading, NetworkReading, ProcessSummary, RankMetric,
};
use crate::probe::SystemProbe;
use std::fmt;
use std::sync::Arc;

/// One category of host resource. `ALL` is the canonical collection order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Domain {
    Cpu,
    Memory,
    Disk,
    Network,
}

impl Domain {
    pub const ALL: [Domain; 4] = [Domain::Cpu, Domain::Memory, Domain::Disk, Domain::Network];

    pub fn name(&self) -> &'static str {
        match self {
            Domain::Cpu => "cpu",
            Domain::Memory => "memory",
            Domain::Disk => "disk",
            Domain::Network => "network",
        }
    }
}

impl fmt::Display for Domain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A domain adapter could not produce a reading at all. Field-level gaps never
/// surface here; they degrade the reading to `None` sub-fields instead.
#[derive(Debug, thiserror::Error)]
#[error("{domain} collector unavailable: {source}")]
pub struct CollectionError {
    pub domain: Domain,
    #[source]
    pub source: anyhow::Error,
}

/// One domain's instantaneous measurement.
#[derive(Debug, Clone)]
pub enum Reading {
    Cpu(CpuReading),
    Memory(MemoryReading),
    Disk(DiskReading),
    Network(NetworkReading),
}

/// Capability interface the orchestrator collects through. `Registry` is the
/// live implementation; tests substitute fakes to script failures.
pub trait DomainSource {
    fn enabled(&self, domain: Domain) -> bool;

    fn read(
        &self,
        domain: Domain,
    ) -> impl Future<Output = Result<Reading, CollectionError>> + Send;

    fn top(
        &self,
        metric: RankMetric,
        limit: usize,
    ) -> impl Future<Output = Result<Vec<ProcessSummary>, CollectionError>> + Send;
}

/// Maps each domain to its enabled flag and the shared probe. Resolved once at
/// startup; never mutated mid-cycle, so one snapshot stays internally consistent.
pub struct Registry {
    probe: Arc<SystemProbe>,
    cpu: bool,
    memory: bool,
    disk: bool,
    network: bool,
}

impl Registry {
    pub fn new(probe: Arc<SystemProbe>, collectors: &CollectorsConfig) -> Self {
        Self {
            probe,
            cpu: collectors.cpu,
            memory: collectors.memory,
            disk: collectors.disk,
            network: collectors.network,
        }
    }
}

impl DomainSource for Registry {
    fn enabled(&self, domain: Domain) -> bool {
        match domain {
            Domain::Cpu => self.cpu,
            Domain::Memory => self.memory,
            Domain::Disk => self.disk,
            Domain::Network => self.network,
        }
    }

    async fn read(&self, domain: Domain) -> Result<Reading, CollectionError> {
        let result = match domain {
            Domain::Cpu => self.probe.read_cpu().await.map(Reading::Cpu),
            Domain::Memory => self.probe.read_memory().await.map(Reading::Memory),
            Domain::Disk => self.probe.read_disk().await.map(Reading::Disk),
            Domain::Network => self.probe.read_network().await.map(Reading::Network),
        };
        result.map_err(|source| CollectionError { domain, source })
    }

    async fn top(
        &self,
        metric: RankMetric,
        limit: usize,
    ) -> Result<Vec<ProcessSummary>, CollectionError> {
        let domain = match metric {
            RankMetric::CpuPercent => Domain::Cpu,
            RankMetric::MemoryPercent => Domain::Memory,
        };
        self.probe
            .top_processes(metric, limit)
            .await
            .map_err(|source| CollectionError { domain, source })
    }
}
