// Aggregate snapshot: one collection cycle's result

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use super::{
    CpuReading, DiskRates, DiskReading, InterfaceRates, MemoryReading, NetworkReading,
    ProcessSummary,
};

/// Everything one cycle collected. Domains that failed or were disabled are
/// absent from the serialized form, not null — absence is the failure signal.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Snapshot {
    pub timestamp: DateTime<Utc>,
    pub hostname: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cpu: Option<CpuReading>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub memory: Option<MemoryReading>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub disk: Option<DiskReading>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub network: Option<NetworkReading>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub top_cpu_processes: Option<Vec<ProcessSummary>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub top_memory_processes: Option<Vec<ProcessSummary>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub disk_rates: Option<DiskRates>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub network_rates: Option<BTreeMap<String, InterfaceRates>>,
}

impl Snapshot {
    /// Bare snapshot carrying only capture instant and host identity.
    pub fn empty(timestamp: DateTime<Utc>, hostname: String) -> Self {
        Self {
            timestamp,
            hostname,
            cpu: None,
            memory: None,
            disk: None,
            network: None,
            top_cpu_processes: None,
            top_memory_processes: None,
            disk_rates: None,
            network_rates: None,
        }
    }
}
