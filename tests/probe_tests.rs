// Live-host probe tests: invariants that must hold for any valid reading

use hostwatch::models::RankMetric;
use hostwatch::probe::SystemProbe;

#[tokio::test]
async fn test_cpu_reading_invariants() {
    let probe = SystemProbe::new();
    let cpu = probe.read_cpu().await.expect("read_cpu");

    assert!((0.0..=100.0).contains(&cpu.overall_percent));
    assert!(cpu.overall_percent.is_finite());
    assert!(cpu.logical_cores >= 1);
    if cpu.physical_cores > 0 {
        assert!(cpu.logical_cores >= cpu.physical_cores);
    }
    assert_eq!(cpu.per_core_percent.len(), cpu.logical_cores as usize);
    for p in &cpu.per_core_percent {
        assert!((0.0..=100.0).contains(p));
    }
    if let Some(times) = &cpu.times {
        assert!(times.user >= 0.0);
        assert!(times.idle >= 0.0);
    }
}

#[tokio::test]
async fn test_memory_reading_invariants() {
    let probe = SystemProbe::new();
    let memory = probe.read_memory().await.expect("read_memory");
    let phys = &memory.physical;

    assert!(phys.total > 0);
    assert!(phys.used <= phys.total);
    assert!(phys.available <= phys.total);
    assert!(phys.free <= phys.total);
    assert!((0.0..=100.0).contains(&phys.percent));

    let swap = &memory.swap;
    assert!(swap.used <= swap.total);
    match swap.percent {
        Some(p) => {
            assert!(swap.total > 0);
            assert!((0.0..=100.0).contains(&p));
        }
        None => assert_eq!(swap.total, 0),
    }
}

#[tokio::test]
async fn test_disk_reading_invariants() {
    let probe = SystemProbe::new();
    let disk = probe.read_disk().await.expect("read_disk");

    for p in &disk.partitions {
        assert!(p.used + p.free <= p.total);
        assert!((0.0..=100.0).contains(&p.percent));
        assert!(!p.mount.is_empty());
    }
    if let Some(per_disk) = &disk.per_disk_io {
        assert!(!per_disk.is_empty());
        assert!(disk.io.is_some());
    }
}

#[tokio::test]
async fn test_network_reading_totals_cover_interfaces() {
    let probe = SystemProbe::new();
    let network = probe.read_network().await.expect("read_network");

    let sent: u64 = network.interfaces.values().map(|c| c.bytes_sent).sum();
    let recv: u64 = network.interfaces.values().map(|c| c.bytes_recv).sum();
    assert_eq!(network.total.bytes_sent, sent);
    assert_eq!(network.total.bytes_recv, recv);

    if let Some(conn) = &network.connections {
        assert!(conn.established + conn.time_wait + conn.close_wait + conn.listen <= conn.total);
    }
}

#[tokio::test]
async fn test_top_processes_respects_limit_and_order() {
    let probe = SystemProbe::new();
    let top = probe
        .top_processes(RankMetric::MemoryPercent, 3)
        .await
        .expect("top_processes");

    assert!(top.len() <= 3);
    for pair in top.windows(2) {
        assert!(pair[0].memory_percent.unwrap_or(0.0) >= pair[1].memory_percent.unwrap_or(0.0));
    }
    for p in &top {
        assert!(p.cpu_percent.is_none());
        assert!(p.memory_mb.is_some());
    }
}
