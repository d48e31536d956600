// Derived per-second rate models

use serde::{Deserialize, Serialize};

/// Disk rates over one interval. `Default` is the all-zero set emitted on the
/// first cycle and on degenerate input. Values are never negative.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DiskRates {
    pub read_iops: f64,
    pub write_iops: f64,
    pub read_bytes_per_sec: f64,
    pub write_bytes_per_sec: f64,
    pub read_mbps: f64,
    pub write_mbps: f64,
}

/// Per-interface traffic rates over one interval. Never negative.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InterfaceRates {
    pub bytes_sent_per_sec: f64,
    pub bytes_recv_per_sec: f64,
    pub mbps_sent: f64,
    pub mbps_recv: f64,
}
