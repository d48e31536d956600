// Shared test helpers: sample readings and a scriptable DomainSource fake

#![allow(dead_code)]

use hostwatch::models::*;
use hostwatch::registry::{CollectionError, Domain, DomainSource, Reading};
use std::collections::{BTreeMap, VecDeque};
use std::sync::Mutex;

pub fn cpu_reading() -> CpuReading {
    CpuReading {
        overall_percent: 12.5,
        per_core_percent: vec![10.0, 15.0],
        times: Some(CpuTimes {
            user: 100.0,
            system: 50.0,
            idle: 800.0,
            iowait: Some(5.0),
        }),
        load_average: Some(LoadAverage {
            one: 0.5,
            five: 0.4,
            fifteen: 0.3,
        }),
        frequency: None,
        logical_cores: 2,
        physical_cores: 1,
    }
}

pub fn memory_reading() -> MemoryReading {
    MemoryReading {
        physical: PhysicalMemory {
            total: 8192,
            available: 4096,
            used: 4096,
            free: 4096,
            percent: 50.0,
            buffers: None,
            cached: None,
            shared: None,
        },
        swap: SwapMemory {
            total: 0,
            used: 0,
            free: 0,
            percent: None,
            swapped_in_bytes: None,
            swapped_out_bytes: None,
        },
    }
}

pub fn io_counters(read_count: u64, write_count: u64) -> DiskIoCounters {
    DiskIoCounters {
        read_count,
        write_count,
        read_bytes: read_count * 4096,
        write_bytes: write_count * 4096,
        read_time_ms: 0,
        write_time_ms: 0,
    }
}

pub fn iface(bytes_sent: u64, bytes_recv: u64) -> InterfaceCounters {
    InterfaceCounters {
        bytes_sent,
        bytes_recv,
        packets_sent: bytes_sent / 100,
        packets_recv: bytes_recv / 100,
        errors_in: 0,
        errors_out: 0,
        drops_in: 0,
        drops_out: 0,
    }
}

pub fn process(pid: u32, cpu_percent: f64) -> ProcessSummary {
    ProcessSummary {
        pid,
        name: format!("proc-{pid}"),
        cpu_percent: Some(cpu_percent),
        memory_mb: None,
        memory_percent: None,
    }
}

/// Scriptable source: per-domain failure/disable switches, queued disk and
/// network counter samples (the last queued sample repeats once drained), and
/// a fixed process table for rankings.
#[derive(Default)]
pub struct FakeSource {
    pub disabled: Vec<Domain>,
    pub failing: Vec<Domain>,
    pub disk_io: Mutex<VecDeque<DiskIoCounters>>,
    pub network_io: Mutex<VecDeque<BTreeMap<String, InterfaceCounters>>>,
    pub processes: Vec<ProcessSummary>,
}

impl FakeSource {
    pub fn with_disk_io(samples: Vec<DiskIoCounters>) -> Self {
        Self {
            disk_io: Mutex::new(samples.into()),
            ..Self::default()
        }
    }

    pub fn with_network_io(samples: Vec<BTreeMap<String, InterfaceCounters>>) -> Self {
        Self {
            network_io: Mutex::new(samples.into()),
            ..Self::default()
        }
    }

    fn next_disk_io(&self) -> DiskIoCounters {
        let mut queue = self.disk_io.lock().unwrap();
        if queue.len() > 1 {
            queue.pop_front().unwrap()
        } else {
            queue.front().cloned().unwrap_or_default()
        }
    }

    fn next_network_io(&self) -> BTreeMap<String, InterfaceCounters> {
        let mut queue = self.network_io.lock().unwrap();
        if queue.len() > 1 {
            queue.pop_front().unwrap()
        } else {
            queue.front().cloned().unwrap_or_default()
        }
    }
}

impl DomainSource for FakeSource {
    fn enabled(&self, domain: Domain) -> bool {
        !self.disabled.contains(&domain)
    }

    async fn read(&self, domain: Domain) -> Result<Reading, CollectionError> {
        if self.failing.contains(&domain) {
            return Err(CollectionError {
                domain,
                source: anyhow::anyhow!("scripted failure"),
            });
        }
        Ok(match domain {
            Domain::Cpu => Reading::Cpu(cpu_reading()),
            Domain::Memory => Reading::Memory(memory_reading()),
            Domain::Disk => Reading::Disk(DiskReading {
                partitions: vec![],
                io: Some(self.next_disk_io()),
                per_disk_io: None,
            }),
            Domain::Network => {
                let interfaces = self.next_network_io();
                let mut total = InterfaceCounters::default();
                for c in interfaces.values() {
                    total.bytes_sent += c.bytes_sent;
                    total.bytes_recv += c.bytes_recv;
                }
                Reading::Network(NetworkReading {
                    interfaces,
                    total,
                    connections: None,
                    addresses: BTreeMap::new(),
                })
            }
        })
    }

    async fn top(
        &self,
        metric: RankMetric,
        limit: usize,
    ) -> Result<Vec<ProcessSummary>, CollectionError> {
        Ok(rank_top(self.processes.clone(), metric, limit))
    }
}
