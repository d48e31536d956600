// Snapshot rendering for stdout (human text or JSON)

use crate::models::Snapshot;
use clap::ValueEnum;

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}

pub fn render(snapshot: &Snapshot, format: OutputFormat) -> anyhow::Result<String> {
    match format {
        OutputFormat::Text => Ok(render_text(snapshot)),
        OutputFormat::Json => Ok(serde_json::to_string_pretty(snapshot)?),
    }
}

/// "1536.00 KB" style humanization.
pub fn format_bytes(bytes: u64) -> String {
    let mut value = bytes as f64;
    for unit in ["B", "KB", "MB", "GB", "TB"] {
        if value < 1024.0 {
            return format!("{value:.2} {unit}");
        }
        value /= 1024.0;
    }
    format!("{value:.2} PB")
}

fn render_text(s: &Snapshot) -> String {
    let mut lines = Vec::new();
    let rule = "=".repeat(80);
    lines.push(rule.clone());
    lines.push(format!(
        "System Metrics - {} - {}",
        s.timestamp.to_rfc3339(),
        s.hostname
    ));
    lines.push(rule.clone());

    if let Some(cpu) = &s.cpu {
        lines.push("\n[CPU]".into());
        lines.push(format!("  Overall Usage: {:.1}%", cpu.overall_percent));
        if let Some(load) = &cpu.load_average {
            lines.push(format!(
                "  Load Average: {:.2} (1m), {:.2} (5m), {:.2} (15m)",
                load.one, load.five, load.fifteen
            ));
        }
        lines.push(format!(
            "  Cores: {} logical, {} physical",
            cpu.logical_cores, cpu.physical_cores
        ));
        if !cpu.per_core_percent.is_empty() {
            let per_core = cpu
                .per_core_percent
                .iter()
                .map(|p| format!("{p:.1}%"))
                .collect::<Vec<_>>()
                .join(", ");
            lines.push(format!("  Per-core: {per_core}"));
        }
    }

    if let Some(memory) = &s.memory {
        let phys = &memory.physical;
        lines.push("\n[Memory]".into());
        lines.push(format!(
            "  Physical: {} / {} ({:.1}%)",
            format_bytes(phys.used),
            format_bytes(phys.total),
            phys.percent
        ));
        lines.push(format!("  Available: {}", format_bytes(phys.available)));
        let swap = &memory.swap;
        if swap.total > 0 {
            lines.push(format!(
                "  Swap: {} / {} ({:.1}%)",
                format_bytes(swap.used),
                format_bytes(swap.total),
                swap.percent.unwrap_or(0.0)
            ));
        }
    }

    if let Some(disk) = &s.disk {
        lines.push("\n[Disk]".into());
        for p in &disk.partitions {
            lines.push(format!("  {} ({}):", p.mount, p.device));
            lines.push(format!(
                "    Usage: {} / {} ({:.1}%)",
                format_bytes(p.used),
                format_bytes(p.total),
                p.percent
            ));
            lines.push(format!("    Free: {}", format_bytes(p.free)));
        }
        if let Some(io) = &disk.io {
            lines.push(format!(
                "  I/O: Read {}, Write {}",
                format_bytes(io.read_bytes),
                format_bytes(io.write_bytes)
            ));
        }
        if let Some(rates) = &s.disk_rates {
            lines.push(format!(
                "  IOPS: {:.1} read/s, {:.1} write/s",
                rates.read_iops, rates.write_iops
            ));
        }
    }

    if let Some(network) = &s.network {
        lines.push("\n[Network]".into());
        let total = &network.total;
        lines.push("  Total Traffic:".into());
        lines.push(format!(
            "    Sent: {} ({} packets)",
            format_bytes(total.bytes_sent),
            total.packets_sent
        ));
        lines.push(format!(
            "    Received: {} ({} packets)",
            format_bytes(total.bytes_recv),
            total.packets_recv
        ));
        lines.push(format!(
            "    Errors: {} in, {} out",
            total.errors_in, total.errors_out
        ));
        lines.push(format!(
            "    Drops: {} in, {} out",
            total.drops_in, total.drops_out
        ));
        if let Some(conn) = &network.connections {
            lines.push(format!(
                "  Connections: {} total, {} established",
                conn.total, conn.established
            ));
        }
        if let Some(rates) = &s.network_rates {
            for (name, r) in rates {
                lines.push(format!(
                    "  {name}: {:.2} Mbps up, {:.2} Mbps down",
                    r.mbps_sent, r.mbps_recv
                ));
            }
        }
    }

    if let Some(top) = &s.top_cpu_processes {
        lines.push("\n[Top CPU Processes]".into());
        for p in top {
            lines.push(format!(
                "  {:>7}  {:<24} {:.1}%",
                p.pid,
                p.name,
                p.cpu_percent.unwrap_or(0.0)
            ));
        }
    }

    if let Some(top) = &s.top_memory_processes {
        lines.push("\n[Top Memory Processes]".into());
        for p in top {
            lines.push(format!(
                "  {:>7}  {:<24} {:.1}% ({:.1} MB)",
                p.pid,
                p.name,
                p.memory_percent.unwrap_or(0.0),
                p.memory_mb.unwrap_or(0.0)
            ));
        }
    }

    lines.push(rule);
    lines.join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Snapshot;
    use chrono::Utc;

    #[test]
    fn format_bytes_picks_unit() {
        assert_eq!(format_bytes(512), "512.00 B");
        assert_eq!(format_bytes(2048), "2.00 KB");
        assert_eq!(format_bytes(3 * 1024 * 1024), "3.00 MB");
    }

    #[test]
    fn text_render_of_bare_snapshot_has_header_only() {
        let snapshot = Snapshot::empty(Utc::now(), "host-a".into());
        let out = render_text(&snapshot);
        assert!(out.contains("host-a"));
        assert!(!out.contains("[CPU]"));
        assert!(!out.contains("[Memory]"));
    }

    #[test]
    fn json_render_is_valid_json() {
        let snapshot = Snapshot::empty(Utc::now(), "host-a".into());
        let out = render(&snapshot, OutputFormat::Json).unwrap();
        let value: serde_json::Value = serde_json::from_str(&out).unwrap();
        assert_eq!(value["hostname"], "host-a");
    }
}
