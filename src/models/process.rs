// Ranked process summaries

use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

/// Metric a top-N process query ranks by.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RankMetric {
    CpuPercent,
    MemoryPercent,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProcessSummary {
    pub pid: u32,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cpu_percent: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub memory_mb: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub memory_percent: Option<f64>,
}

impl RankMetric {
    fn value(&self, p: &ProcessSummary) -> f64 {
        match self {
            RankMetric::CpuPercent => p.cpu_percent.unwrap_or(0.0),
            RankMetric::MemoryPercent => p.memory_percent.unwrap_or(0.0),
        }
    }
}

/// Sort descending by `metric` and keep the first `limit` entries.
/// The sort is stable, so ties keep their enumeration order.
pub fn rank_top(
    mut entries: Vec<ProcessSummary>,
    metric: RankMetric,
    limit: usize,
) -> Vec<ProcessSummary> {
    entries.sort_by(|a, b| {
        metric
            .value(b)
            .partial_cmp(&metric.value(a))
            .unwrap_or(Ordering::Equal)
    });
    entries.truncate(limit);
    entries
}
