// Physical and swap memory models

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PhysicalMemory {
    pub total: u64,
    pub available: u64,
    pub used: u64,
    pub free: u64,
    pub percent: f64,
    pub buffers: Option<u64>,
    pub cached: Option<u64>,
    pub shared: Option<u64>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SwapMemory {
    pub total: u64,
    pub used: u64,
    pub free: u64,
    /// Absent when swap total is 0.
    pub percent: Option<f64>,
    /// Cumulative bytes swapped in/out since boot. Monotonic.
    pub swapped_in_bytes: Option<u64>,
    pub swapped_out_bytes: Option<u64>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MemoryReading {
    pub physical: PhysicalMemory,
    pub swap: SwapMemory,
}
