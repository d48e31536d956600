// Previous-sample store for rate-bearing domains

use crate::models::{DiskIoCounters, InterfaceCounters};
use std::collections::BTreeMap;
use std::time::Instant;

/// Holds at most one prior counter sample per rate-bearing domain, paired with
/// its capture instant. Entries are overwritten on each successful reading and
/// never expire on their own; staleness is the caller's judgement via the
/// stored instant.
#[derive(Debug, Default)]
pub struct SnapshotStore {
    disk: Option<(DiskIoCounters, Instant)>,
    network: Option<(BTreeMap<String, InterfaceCounters>, Instant)>,
}

impl SnapshotStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn previous_disk(&self) -> Option<&(DiskIoCounters, Instant)> {
        self.disk.as_ref()
    }

    pub fn record_disk(&mut self, counters: DiskIoCounters, at: Instant) {
        self.disk = Some((counters, at));
    }

    pub fn previous_network(&self) -> Option<&(BTreeMap<String, InterfaceCounters>, Instant)> {
        self.network.as_ref()
    }

    pub fn record_network(&mut self, counters: BTreeMap<String, InterfaceCounters>, at: Instant) {
        self.network = Some((counters, at));
    }
}
