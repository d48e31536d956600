// Linux-specific readers: /proc/stat, /proc/meminfo, /proc/vmstat,
// /proc/diskstats, /proc/mounts, /proc/net/tcp*, /sys/class/net statistics.
// Everything here degrades to None/zero off-Linux or when a file is unreadable.

use crate::models::{ConnectionCounts, CpuTimes, DiskIoCounters};
use std::collections::BTreeMap;

const SECTOR_SIZE: u64 = 512;

#[cfg(target_os = "linux")]
fn clock_ticks_per_sec() -> f64 {
    let v = unsafe { libc::sysconf(libc::_SC_CLK_TCK) };
    if v > 0 { v as f64 } else { 100.0 }
}

#[cfg(target_os = "linux")]
fn page_size_bytes() -> u64 {
    let v = unsafe { libc::sysconf(libc::_SC_PAGESIZE) };
    if v > 0 { v as u64 } else { 4096 }
}

/// Aggregate time-in-state counters from the `cpu` summary line of /proc/stat.
pub(super) fn read_cpu_times() -> Option<CpuTimes> {
    #[cfg(target_os = "linux")]
    {
        let content = std::fs::read_to_string("/proc/stat").ok()?;
        return parse_cpu_times(&content, clock_ticks_per_sec());
    }
    #[cfg(not(target_os = "linux"))]
    None
}

fn parse_cpu_times(content: &str, tick_hz: f64) -> Option<CpuTimes> {
    let line = content.lines().find(|l| l.starts_with("cpu "))?;
    let fields: Vec<f64> = line
        .split_whitespace()
        .skip(1)
        .map_while(|f| f.parse::<f64>().ok())
        .collect();
    // user nice system idle iowait ...
    if fields.len() < 4 {
        return None;
    }
    Some(CpuTimes {
        user: fields[0] / tick_hz,
        system: fields[2] / tick_hz,
        idle: fields[3] / tick_hz,
        iowait: fields.get(4).map(|v| v / tick_hz),
    })
}

/// Advertised frequency limits of cpu0 in MHz, from cpufreq (values are kHz).
pub(super) fn read_cpufreq_limits() -> (Option<f64>, Option<f64>) {
    (
        read_khz_as_mhz("/sys/devices/system/cpu/cpu0/cpufreq/cpuinfo_min_freq"),
        read_khz_as_mhz("/sys/devices/system/cpu/cpu0/cpufreq/cpuinfo_max_freq"),
    )
}

fn read_khz_as_mhz(path: &str) -> Option<f64> {
    #[cfg(target_os = "linux")]
    {
        let khz: f64 = std::fs::read_to_string(path).ok()?.trim().parse().ok()?;
        return Some(khz / 1000.0);
    }
    #[cfg(not(target_os = "linux"))]
    {
        let _ = path;
        None
    }
}

/// Buffers/Cached/Shmem byte counts from /proc/meminfo.
pub(super) fn read_meminfo_extras() -> (Option<u64>, Option<u64>, Option<u64>) {
    #[cfg(target_os = "linux")]
    {
        if let Ok(content) = std::fs::read_to_string("/proc/meminfo") {
            return (
                parse_meminfo_kb(&content, "Buffers:"),
                parse_meminfo_kb(&content, "Cached:"),
                parse_meminfo_kb(&content, "Shmem:"),
            );
        }
    }
    (None, None, None)
}

fn parse_meminfo_kb(content: &str, key: &str) -> Option<u64> {
    let line = content.lines().find(|l| l.starts_with(key))?;
    let kb: u64 = line.split_whitespace().nth(1)?.parse().ok()?;
    Some(kb * 1024)
}

/// Cumulative swap-in/swap-out byte counters from /proc/vmstat (page counts).
pub(super) fn read_swap_io() -> (Option<u64>, Option<u64>) {
    #[cfg(target_os = "linux")]
    {
        if let Ok(content) = std::fs::read_to_string("/proc/vmstat") {
            let page = page_size_bytes();
            return (
                parse_vmstat_pages(&content, "pswpin").map(|p| p * page),
                parse_vmstat_pages(&content, "pswpout").map(|p| p * page),
            );
        }
    }
    (None, None)
}

fn parse_vmstat_pages(content: &str, key: &str) -> Option<u64> {
    content.lines().find_map(|l| {
        let mut it = l.split_whitespace();
        if it.next() != Some(key) {
            return None;
        }
        it.next()?.parse().ok()
    })
}

/// Aggregate plus per-device I/O counters from /proc/diskstats.
pub(super) fn read_diskstats() -> Option<(DiskIoCounters, BTreeMap<String, DiskIoCounters>)> {
    #[cfg(target_os = "linux")]
    {
        let content = std::fs::read_to_string("/proc/diskstats").ok()?;
        let per_disk = parse_diskstats(&content);
        if per_disk.is_empty() {
            return None;
        }
        let total = aggregate_diskstats(&per_disk);
        return Some((total, per_disk));
    }
    #[cfg(not(target_os = "linux"))]
    None
}

fn parse_diskstats(content: &str) -> BTreeMap<String, DiskIoCounters> {
    content
        .lines()
        .filter_map(|line| {
            let f: Vec<&str> = line.split_whitespace().collect();
            if f.len() < 11 {
                return None;
            }
            let name = f[2].to_string();
            Some((
                name,
                DiskIoCounters {
                    read_count: f[3].parse().ok()?,
                    write_count: f[7].parse().ok()?,
                    read_bytes: f[5].parse::<u64>().ok()? * SECTOR_SIZE,
                    write_bytes: f[9].parse::<u64>().ok()? * SECTOR_SIZE,
                    read_time_ms: f[6].parse().ok()?,
                    write_time_ms: f[10].parse().ok()?,
                },
            ))
        })
        .collect()
}

/// Sum whole devices only: rows whose name extends another device's name
/// (sda -> sda1, nvme0n1 -> nvme0n1p1) are partitions and would double-count,
/// and loop/ram devices are synthetic.
fn aggregate_diskstats(per_disk: &BTreeMap<String, DiskIoCounters>) -> DiskIoCounters {
    let mut total = DiskIoCounters::default();
    for (name, io) in per_disk {
        if name.starts_with("loop") || name.starts_with("ram") {
            continue;
        }
        let is_partition = per_disk.keys().any(|other| {
            other != name
                && name.starts_with(other.as_str())
                && name[other.len()..]
                    .chars()
                    .next()
                    .is_some_and(|c| c.is_ascii_digit() || c == 'p')
        });
        if is_partition {
            continue;
        }
        total.read_count += io.read_count;
        total.write_count += io.write_count;
        total.read_bytes += io.read_bytes;
        total.write_bytes += io.write_bytes;
        total.read_time_ms += io.read_time_ms;
        total.write_time_ms += io.write_time_ms;
    }
    total
}

/// Mount options keyed by mount point, from /proc/mounts.
pub(super) fn read_mount_options() -> BTreeMap<String, String> {
    #[cfg(target_os = "linux")]
    {
        if let Ok(content) = std::fs::read_to_string("/proc/mounts") {
            return parse_mount_options(&content);
        }
    }
    BTreeMap::new()
}

fn parse_mount_options(content: &str) -> BTreeMap<String, String> {
    content
        .lines()
        .filter_map(|line| {
            let mut f = line.split_whitespace();
            let _device = f.next()?;
            let mount = f.next()?.to_string();
            let _fstype = f.next()?;
            let options = f.next()?.to_string();
            Some((mount, options))
        })
        .collect()
}

/// Dropped-packet counters for an interface from /sys/class/net, 0 if unavailable.
pub(super) fn read_interface_drops(interface_name: &str) -> (u64, u64) {
    (
        read_net_stat(interface_name, "rx_dropped"),
        read_net_stat(interface_name, "tx_dropped"),
    )
}

fn read_net_stat(interface_name: &str, stat: &str) -> u64 {
    #[cfg(target_os = "linux")]
    {
        let path = format!("/sys/class/net/{}/statistics/{}", interface_name, stat);
        if let Ok(content) = std::fs::read_to_string(&path)
            && let Ok(v) = content.trim().parse::<u64>()
        {
            return v;
        }
    }
    #[cfg(not(target_os = "linux"))]
    {
        let _ = (interface_name, stat);
    }
    0
}

/// TCP connection census from /proc/net/tcp and /proc/net/tcp6.
/// None when neither table is readable (non-Linux, or access denied).
pub(super) fn read_tcp_states() -> Option<ConnectionCounts> {
    #[cfg(target_os = "linux")]
    {
        let mut counts = ConnectionCounts::default();
        let mut any = false;
        for path in ["/proc/net/tcp", "/proc/net/tcp6"] {
            if let Ok(content) = std::fs::read_to_string(path) {
                count_tcp_states(&content, &mut counts);
                any = true;
            }
        }
        return any.then_some(counts);
    }
    #[cfg(not(target_os = "linux"))]
    None
}

// Kernel state codes: 01 established, 06 time-wait, 08 close-wait, 0A listen.
fn count_tcp_states(content: &str, counts: &mut ConnectionCounts) {
    for line in content.lines().skip(1) {
        let Some(state) = line.split_whitespace().nth(3) else {
            continue;
        };
        counts.total += 1;
        match state {
            "01" => counts.established += 1,
            "06" => counts.time_wait += 1,
            "08" => counts.close_wait += 1,
            "0A" => counts.listen += 1,
            _ => {}
        }
    }
}
