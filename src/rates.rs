// Derived-rate math: two counter snapshots + elapsed seconds -> per-second rates

use crate::models::{DiskIoCounters, DiskRates, InterfaceCounters, InterfaceRates};
use std::collections::BTreeMap;

/// Counter delta per second, clamped at zero. Clamping absorbs counter resets
/// and wraparound by reporting zero instead of a negative spike.
fn per_second(previous: u64, current: u64, elapsed_secs: f64) -> f64 {
    let delta = current as f64 - previous as f64;
    (delta / elapsed_secs).max(0.0)
}

fn mbps(bytes_per_sec: f64) -> f64 {
    bytes_per_sec * 8.0 / 1_000_000.0
}

/// IOPS and throughput from two aggregate disk counter snapshots.
///
/// Either side absent, or `elapsed_secs <= 0`, yields the all-zero set: that
/// is the expected first-cycle state, not an error.
pub fn disk_rates(
    previous: Option<&DiskIoCounters>,
    current: Option<&DiskIoCounters>,
    elapsed_secs: f64,
) -> DiskRates {
    let (Some(prev), Some(cur)) = (previous, current) else {
        return DiskRates::default();
    };
    if elapsed_secs <= 0.0 {
        return DiskRates::default();
    }

    let read_bytes_per_sec = per_second(prev.read_bytes, cur.read_bytes, elapsed_secs);
    let write_bytes_per_sec = per_second(prev.write_bytes, cur.write_bytes, elapsed_secs);
    DiskRates {
        read_iops: per_second(prev.read_count, cur.read_count, elapsed_secs),
        write_iops: per_second(prev.write_count, cur.write_count, elapsed_secs),
        read_bytes_per_sec,
        write_bytes_per_sec,
        read_mbps: mbps(read_bytes_per_sec),
        write_mbps: mbps(write_bytes_per_sec),
    }
}

/// Per-interface traffic rates, keyed by interface name.
///
/// Degenerate input yields an empty map. Interfaces present on only one side
/// (hotplug, rename) are skipped, not zero-filled.
pub fn interface_rates(
    previous: &BTreeMap<String, InterfaceCounters>,
    current: &BTreeMap<String, InterfaceCounters>,
    elapsed_secs: f64,
) -> BTreeMap<String, InterfaceRates> {
    if elapsed_secs <= 0.0 {
        return BTreeMap::new();
    }

    current
        .iter()
        .filter_map(|(name, cur)| {
            let prev = previous.get(name)?;
            let bytes_sent_per_sec = per_second(prev.bytes_sent, cur.bytes_sent, elapsed_secs);
            let bytes_recv_per_sec = per_second(prev.bytes_recv, cur.bytes_recv, elapsed_secs);
            Some((
                name.clone(),
                InterfaceRates {
                    bytes_sent_per_sec,
                    bytes_recv_per_sec,
                    mbps_sent: mbps(bytes_sent_per_sec),
                    mbps_recv: mbps(bytes_recv_per_sec),
                },
            ))
        })
        .collect()
}
