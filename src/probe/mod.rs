// Domain reading adapters via sysinfo

mod linux;

use crate::models::*;
use std::collections::BTreeMap;
use std::net::IpAddr;
use std::sync::Arc;
use std::time::Instant;
use sysinfo::{Disks, Networks, ProcessesToUpdate, System};
use tracing::instrument;

/// Best-effort host identity; "unknown" when the OS gives us nothing.
pub fn hostname() -> String {
    System::host_name().unwrap_or_else(|| "unknown".into())
}

pub struct SystemProbe {
    sys: Arc<std::sync::Mutex<System>>,
    disks: Arc<std::sync::Mutex<Disks>>,
    networks: Arc<std::sync::Mutex<Networks>>,
    last_cpu_sample: Arc<std::sync::Mutex<Option<(Instant, f64, Vec<f64>)>>>,
}

impl Default for SystemProbe {
    fn default() -> Self {
        Self::new()
    }
}

impl SystemProbe {
    pub fn new() -> Self {
        let mut sys = System::new_all();
        sys.refresh_all();
        let disks = Disks::new_with_refreshed_list();
        let networks = Networks::new_with_refreshed_list();
        Self {
            sys: Arc::new(std::sync::Mutex::new(sys)),
            disks: Arc::new(std::sync::Mutex::new(disks)),
            networks: Arc::new(std::sync::Mutex::new(networks)),
            last_cpu_sample: Arc::new(std::sync::Mutex::new(None)),
        }
    }

    /// Utilization percentages need two observations; the first call after
    /// startup establishes the baseline and reports 0.0. Later calls refresh
    /// at most once per `MINIMUM_CPU_UPDATE_INTERVAL` and otherwise reuse the
    /// cached sample, so the read stays time-bounded.
    #[instrument(skip(self), fields(probe = "sysinfo", operation = "read_cpu"))]
    pub async fn read_cpu(&self) -> anyhow::Result<CpuReading> {
        let sys = self.sys.clone();
        let last_cpu_sample = self.last_cpu_sample.clone();
        tokio::task::spawn_blocking(move || {
            let mut sys = sys
                .lock()
                .map_err(|e| anyhow::anyhow!("sysinfo lock poisoned: {}", e))?;

            let now = Instant::now();
            let (overall, per_core) = if let Ok(mut guard) = last_cpu_sample.lock() {
                match &*guard {
                    Some((prev_ts, prev_overall, prev_cores))
                        if now.duration_since(*prev_ts) < sysinfo::MINIMUM_CPU_UPDATE_INTERVAL =>
                    {
                        (*prev_overall, prev_cores.clone())
                    }
                    Some(_) => {
                        sys.refresh_cpu_all();
                        let overall = sys.global_cpu_usage() as f64;
                        let cores: Vec<f64> =
                            sys.cpus().iter().map(|c| c.cpu_usage() as f64).collect();
                        *guard = Some((now, overall, cores.clone()));
                        (overall, cores)
                    }
                    None => {
                        sys.refresh_cpu_all();
                        let zeros = vec![0.0; sys.cpus().len()];
                        *guard = Some((now, 0.0, zeros.clone()));
                        (0.0, zeros)
                    }
                }
            } else {
                sys.refresh_cpu_all();
                (0.0, vec![0.0; sys.cpus().len()])
            };

            let logical = sys.cpus().len() as u32;
            let physical = System::physical_core_count().unwrap_or(0) as u32;
            let frequency = cpu_frequency(&sys);

            Ok(CpuReading {
                overall_percent: overall.clamp(0.0, 100.0),
                per_core_percent: per_core
                    .into_iter()
                    .map(|p| p.clamp(0.0, 100.0))
                    .collect(),
                times: linux::read_cpu_times(),
                load_average: load_average(),
                frequency,
                logical_cores: logical,
                physical_cores: physical,
            })
        })
        .await
        .map_err(|e| anyhow::anyhow!("sysinfo task join: {}", e))?
    }

    #[instrument(skip(self), fields(probe = "sysinfo", operation = "read_memory"))]
    pub async fn read_memory(&self) -> anyhow::Result<MemoryReading> {
        let sys = self.sys.clone();
        tokio::task::spawn_blocking(move || {
            let mut sys = sys
                .lock()
                .map_err(|e| anyhow::anyhow!("sysinfo lock poisoned: {}", e))?;
            sys.refresh_memory();

            let total = sys.total_memory();
            let available = sys.available_memory();
            let used = sys.used_memory();
            let percent = if total > 0 {
                (total.saturating_sub(available) as f64 / total as f64) * 100.0
            } else {
                0.0
            };
            let (buffers, cached, shared) = linux::read_meminfo_extras();

            let swap_total = sys.total_swap();
            let swap_used = sys.used_swap();
            let swap_percent = (swap_total > 0)
                .then(|| (swap_used as f64 / swap_total as f64) * 100.0);
            let (swapped_in_bytes, swapped_out_bytes) = linux::read_swap_io();

            Ok(MemoryReading {
                physical: PhysicalMemory {
                    total,
                    available,
                    used,
                    free: sys.free_memory(),
                    percent,
                    buffers,
                    cached,
                    shared,
                },
                swap: SwapMemory {
                    total: swap_total,
                    used: swap_used,
                    free: sys.free_swap(),
                    percent: swap_percent,
                    swapped_in_bytes,
                    swapped_out_bytes,
                },
            })
        })
        .await
        .map_err(|e| anyhow::anyhow!("sysinfo task join: {}", e))?
    }

    /// Inaccessible partitions are simply not in the sysinfo list; counters are
    /// absent where the platform exposes none. Neither fails the read.
    #[instrument(skip(self), fields(probe = "sysinfo", operation = "read_disk"))]
    pub async fn read_disk(&self) -> anyhow::Result<DiskReading> {
        let disks = self.disks.clone();
        tokio::task::spawn_blocking(move || {
            let mut disks_guard = disks
                .lock()
                .map_err(|e| anyhow::anyhow!("sysinfo disks lock poisoned: {}", e))?;
            disks_guard.refresh(false);

            let mount_options = linux::read_mount_options();
            let partitions: Vec<Partition> = disks_guard
                .list()
                .iter()
                .map(|d| {
                    let total = d.total_space();
                    let free = d.available_space();
                    let used = total.saturating_sub(free);
                    let percent = if total > 0 {
                        (used as f64 / total as f64) * 100.0
                    } else {
                        0.0
                    };
                    let mount = d.mount_point().to_string_lossy().into_owned();
                    Partition {
                        device: d.name().to_string_lossy().into_owned(),
                        options: mount_options.get(&mount).cloned(),
                        mount,
                        fstype: d.file_system().to_string_lossy().into_owned(),
                        total,
                        used,
                        free,
                        percent,
                    }
                })
                .collect();

            let (io, per_disk_io) = match linux::read_diskstats() {
                Some((total, per_disk)) => (Some(total), Some(per_disk)),
                None => (None, None),
            };

            Ok(DiskReading {
                partitions,
                io,
                per_disk_io,
            })
        })
        .await
        .map_err(|e| anyhow::anyhow!("sysinfo task join: {}", e))?
    }

    #[instrument(skip(self), fields(probe = "sysinfo", operation = "read_network"))]
    pub async fn read_network(&self) -> anyhow::Result<NetworkReading> {
        let networks = self.networks.clone();
        tokio::task::spawn_blocking(move || {
            let mut networks_guard = networks
                .lock()
                .map_err(|e| anyhow::anyhow!("sysinfo networks lock poisoned: {}", e))?;
            networks_guard.refresh(true);

            let mut interfaces = BTreeMap::new();
            let mut addresses = BTreeMap::new();
            let mut total = InterfaceCounters::default();

            for (name, data) in networks_guard.list() {
                let (drops_in, drops_out) = linux::read_interface_drops(name);
                let counters = InterfaceCounters {
                    bytes_sent: data.total_transmitted(),
                    bytes_recv: data.total_received(),
                    packets_sent: data.total_packets_transmitted(),
                    packets_recv: data.total_packets_received(),
                    errors_in: data.total_errors_on_received(),
                    errors_out: data.total_errors_on_transmitted(),
                    drops_in,
                    drops_out,
                };
                total.bytes_sent += counters.bytes_sent;
                total.bytes_recv += counters.bytes_recv;
                total.packets_sent += counters.packets_sent;
                total.packets_recv += counters.packets_recv;
                total.errors_in += counters.errors_in;
                total.errors_out += counters.errors_out;
                total.drops_in += counters.drops_in;
                total.drops_out += counters.drops_out;
                interfaces.insert(name.clone(), counters);
                addresses.insert(name.clone(), interface_addresses(data));
            }

            Ok(NetworkReading {
                interfaces,
                total,
                connections: linux::read_tcp_states(),
                addresses,
            })
        })
        .await
        .map_err(|e| anyhow::anyhow!("sysinfo task join: {}", e))?
    }

    /// Ranked top-N over a fresh process table. The table is re-read on every
    /// call, so entries may skew slightly from an aggregate reading taken
    /// moments earlier; processes that vanish mid-enumeration are skipped by
    /// the refresh itself.
    #[instrument(skip(self), fields(probe = "sysinfo", operation = "top_processes"))]
    pub async fn top_processes(
        &self,
        metric: RankMetric,
        limit: usize,
    ) -> anyhow::Result<Vec<ProcessSummary>> {
        let sys = self.sys.clone();
        tokio::task::spawn_blocking(move || {
            let mut sys = sys
                .lock()
                .map_err(|e| anyhow::anyhow!("sysinfo lock poisoned: {}", e))?;
            sys.refresh_processes(ProcessesToUpdate::All, true);

            let total_memory = sys.total_memory();
            let entries: Vec<ProcessSummary> = sys
                .processes()
                .iter()
                .map(|(pid, p)| {
                    let memory_bytes = p.memory();
                    ProcessSummary {
                        pid: pid.as_u32(),
                        name: p.name().to_string_lossy().into_owned(),
                        cpu_percent: (metric == RankMetric::CpuPercent)
                            .then(|| p.cpu_usage() as f64),
                        memory_mb: (metric == RankMetric::MemoryPercent)
                            .then(|| memory_bytes as f64 / 1024.0 / 1024.0),
                        memory_percent: (metric == RankMetric::MemoryPercent && total_memory > 0)
                            .then(|| (memory_bytes as f64 / total_memory as f64) * 100.0),
                    }
                })
                .collect();

            Ok(rank_top(entries, metric, limit))
        })
        .await
        .map_err(|e| anyhow::anyhow!("sysinfo task join: {}", e))?
    }
}

fn load_average() -> Option<LoadAverage> {
    if cfg!(windows) {
        return None;
    }
    let avg = System::load_average();
    Some(LoadAverage {
        one: avg.one,
        five: avg.five,
        fifteen: avg.fifteen,
    })
}

fn cpu_frequency(sys: &System) -> Option<CpuFrequency> {
    let current = sys
        .cpus()
        .first()
        .map(|c| c.frequency())
        .filter(|f| *f > 0)?;
    let (min_mhz, max_mhz) = linux::read_cpufreq_limits();
    Some(CpuFrequency {
        current_mhz: current as f64,
        min_mhz,
        max_mhz,
    })
}

fn interface_addresses(data: &sysinfo::NetworkData) -> Vec<InterfaceAddress> {
    let mut out = Vec::new();
    let mac = data.mac_address().to_string();
    if !mac.is_empty() && mac != "00:00:00:00:00:00" {
        out.push(InterfaceAddress {
            family: "link".into(),
            address: mac,
            netmask: None,
            broadcast: None,
        });
    }
    for net in data.ip_networks() {
        let family = if net.addr.is_ipv4() { "inet" } else { "inet6" };
        out.push(InterfaceAddress {
            family: family.into(),
            address: net.addr.to_string(),
            netmask: netmask_from_prefix(&net.addr, net.prefix),
            broadcast: None,
        });
    }
    out
}

fn netmask_from_prefix(addr: &IpAddr, prefix: u8) -> Option<String> {
    match addr {
        IpAddr::V4(_) => {
            if prefix > 32 {
                return None;
            }
            let mask = if prefix == 0 {
                0
            } else {
                u32::MAX << (32 - prefix as u32)
            };
            Some(std::net::Ipv4Addr::from(mask).to_string())
        }
        IpAddr::V6(_) => {
            if prefix > 128 {
                return None;
            }
            let mask = if prefix == 0 {
                0
            } else {
                u128::MAX << (128 - prefix as u32)
            };
            Some(std::net::Ipv6Addr::from(mask).to_string())
        }
    }
}
