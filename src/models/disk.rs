// Disk partition and I/O counter models

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Partition {
    pub device: String,
    pub mount: String,
    pub fstype: String,
    pub options: Option<String>,
    pub total: u64,
    pub used: u64,
    pub free: u64,
    pub percent: f64,
}

/// Cumulative I/O counters since boot (or counter reset). Monotonic.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DiskIoCounters {
    pub read_count: u64,
    pub write_count: u64,
    pub read_bytes: u64,
    pub write_bytes: u64,
    pub read_time_ms: u64,
    pub write_time_ms: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DiskReading {
    pub partitions: Vec<Partition>,
    /// Aggregate over whole devices; absent when the platform exposes no counters.
    pub io: Option<DiskIoCounters>,
    pub per_disk_io: Option<BTreeMap<String, DiskIoCounters>>,
}
