// Network interface counter, connection and address models

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Cumulative per-interface traffic counters. Monotonic.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InterfaceCounters {
    pub bytes_sent: u64,
    pub bytes_recv: u64,
    pub packets_sent: u64,
    pub packets_recv: u64,
    pub errors_in: u64,
    pub errors_out: u64,
    pub drops_in: u64,
    pub drops_out: u64,
}

/// TCP connection census by state. Absent when enumeration needs privileges we lack.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConnectionCounts {
    pub established: u64,
    pub time_wait: u64,
    pub close_wait: u64,
    pub listen: u64,
    pub total: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InterfaceAddress {
    /// "link", "inet" or "inet6".
    pub family: String,
    pub address: String,
    pub netmask: Option<String>,
    pub broadcast: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NetworkReading {
    pub interfaces: BTreeMap<String, InterfaceCounters>,
    /// Sum across all interfaces.
    pub total: InterfaceCounters,
    pub connections: Option<ConnectionCounts>,
    pub addresses: BTreeMap<String, Vec<InterfaceAddress>>,
}
