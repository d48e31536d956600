// Model serialization tests (JSON camelCase, absence handling, ranking)

mod common;

use common::{cpu_reading, memory_reading, process};
use chrono::Utc;
use hostwatch::models::*;

#[test]
fn test_cpu_reading_serialization_camel_case() {
    let json = serde_json::to_string(&cpu_reading()).unwrap();
    assert!(json.contains("\"overallPercent\""));
    assert!(json.contains("\"perCorePercent\""));
    assert!(json.contains("\"logicalCores\""));
    let back: CpuReading = serde_json::from_str(&json).unwrap();
    assert_eq!(back.overall_percent, 12.5);
    assert_eq!(back.per_core_percent.len(), 2);
}

#[test]
fn test_memory_reading_swap_percent_absent_when_no_swap() {
    let value = serde_json::to_value(memory_reading()).unwrap();
    // Field-level absence is an explicit null inside an otherwise-present reading.
    assert_eq!(value["swap"]["percent"], serde_json::Value::Null);
    assert_eq!(value["physical"]["percent"], 50.0);
}

#[test]
fn test_disk_io_counters_json_roundtrip() {
    let io = DiskIoCounters {
        read_count: 1000,
        write_count: 500,
        read_bytes: 4096,
        write_bytes: 2048,
        read_time_ms: 10,
        write_time_ms: 20,
    };
    let json = serde_json::to_string(&io).unwrap();
    assert!(json.contains("\"readCount\""));
    let back: DiskIoCounters = serde_json::from_str(&json).unwrap();
    assert_eq!(back, io);
}

#[test]
fn test_snapshot_absent_domains_are_skipped_not_null() {
    let snapshot = Snapshot::empty(Utc::now(), "host-a".into());
    let value = serde_json::to_value(&snapshot).unwrap();
    let obj = value.as_object().unwrap();
    assert!(obj.contains_key("timestamp"));
    assert_eq!(obj["hostname"], "host-a");
    assert!(!obj.contains_key("cpu"));
    assert!(!obj.contains_key("disk"));
    assert!(!obj.contains_key("diskRates"));
    assert!(!obj.contains_key("networkRates"));
}

#[test]
fn test_snapshot_present_domain_serialized() {
    let mut snapshot = Snapshot::empty(Utc::now(), "host-a".into());
    snapshot.cpu = Some(cpu_reading());
    let value = serde_json::to_value(&snapshot).unwrap();
    assert!(value.as_object().unwrap().contains_key("cpu"));
    let back: Snapshot = serde_json::from_str(&value.to_string()).unwrap();
    assert!(back.cpu.is_some());
    assert!(back.memory.is_none());
}

#[test]
fn test_process_summary_skips_absent_metrics() {
    let p = process(42, 3.0);
    let value = serde_json::to_value(&p).unwrap();
    let obj = value.as_object().unwrap();
    assert!(obj.contains_key("cpuPercent"));
    assert!(!obj.contains_key("memoryMb"));
    assert!(!obj.contains_key("memoryPercent"));
}

#[test]
fn test_rank_top_descending_with_limit() {
    let entries = vec![process(1, 10.0), process(2, 50.0), process(3, 30.0)];
    let top = rank_top(entries, RankMetric::CpuPercent, 2);
    assert_eq!(top.len(), 2);
    assert_eq!(top[0].pid, 2);
    assert_eq!(top[1].pid, 3);
}

#[test]
fn test_rank_top_ties_keep_source_order() {
    let entries = vec![process(7, 20.0), process(8, 20.0), process(9, 20.0)];
    let top = rank_top(entries, RankMetric::CpuPercent, 3);
    assert_eq!(
        top.iter().map(|p| p.pid).collect::<Vec<_>>(),
        vec![7, 8, 9]
    );
}

#[test]
fn test_rank_top_limit_larger_than_input() {
    let entries = vec![process(1, 1.0)];
    let top = rank_top(entries, RankMetric::CpuPercent, 10);
    assert_eq!(top.len(), 1);
}

#[test]
fn test_interface_counters_camel_case_roundtrip() {
    let c = InterfaceCounters {
        bytes_sent: 1,
        bytes_recv: 2,
        packets_sent: 3,
        packets_recv: 4,
        errors_in: 5,
        errors_out: 6,
        drops_in: 7,
        drops_out: 8,
    };
    let json = serde_json::to_string(&c).unwrap();
    assert!(json.contains("\"bytesSent\""));
    assert!(json.contains("\"dropsOut\""));
    let back: InterfaceCounters = serde_json::from_str(&json).unwrap();
    assert_eq!(back, c);
}
