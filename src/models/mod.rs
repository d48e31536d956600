// Domain models (readings, rates, process summaries, snapshot)

mod cpu;
mod disk;
mod memory;
mod network;
mod process;
mod rates;
mod snapshot;

pub use cpu::{CpuFrequency, CpuReading, CpuTimes, LoadAverage};
pub use disk::{DiskIoCounters, DiskReading, Partition};
pub use memory::{MemoryReading, PhysicalMemory, SwapMemory};
pub use network::{ConnectionCounts, InterfaceAddress, InterfaceCounters, NetworkReading};
pub use process::{ProcessSummary, RankMetric, rank_top};
pub use rates::{DiskRates, InterfaceRates};
pub use snapshot::Snapshot;
