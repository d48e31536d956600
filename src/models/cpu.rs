// CPU reading models

use serde::{Deserialize, Serialize};

/// Cumulative time-in-state counters in seconds since boot. Monotonic on a live host.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CpuTimes {
    pub user: f64,
    pub system: f64,
    pub idle: f64,
    /// Linux only; absent elsewhere.
    pub iowait: Option<f64>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoadAverage {
    pub one: f64,
    pub five: f64,
    pub fifteen: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CpuFrequency {
    pub current_mhz: f64,
    pub min_mhz: Option<f64>,
    pub max_mhz: Option<f64>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CpuReading {
    pub overall_percent: f64,
    /// Ordered by core index.
    pub per_core_percent: Vec<f64>,
    pub times: Option<CpuTimes>,
    /// Absent on platforms without the concept (e.g. Windows).
    pub load_average: Option<LoadAverage>,
    pub frequency: Option<CpuFrequency>,
    pub logical_cores: u32,
    pub physical_cores: u32,
}
