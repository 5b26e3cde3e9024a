use serde::Serialize;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use crate::error::FetchError;

#[derive(Default)]
pub struct Stats {
    start_ms: AtomicU64,
    last_log_ms: AtomicU64,

    cycles_started: AtomicU64,
    cycles_applied: AtomicU64,
    stale_dropped: AtomicU64,

    transport_failures: AtomicU64,
    application_failures: AtomicU64,
}

impl Stats {
    pub fn new(now_ms: u64) -> Arc<Self> {
        let s = Arc::new(Self::default());
        s.start_ms.store(now_ms, Ordering::Relaxed);
        s.last_log_ms.store(now_ms, Ordering::Relaxed);
        s
    }

    pub fn inc_started(&self) {
        self.cycles_started.fetch_add(1, Ordering::Relaxed);
    }

    pub fn inc_applied(&self) {
        self.cycles_applied.fetch_add(1, Ordering::Relaxed);
    }

    pub fn inc_stale(&self) {
        self.stale_dropped.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_failure(&self, err: &FetchError) {
        let counter = if err.is_application() {
            &self.application_failures
        } else {
            &self.transport_failures
        };
        counter.fetch_add(1, Ordering::Relaxed);
    }

    pub fn should_log(&self, now_ms: u64, every_sec: u64) -> bool {
        if every_sec == 0 { return false; }
        let last = self.last_log_ms.load(Ordering::Relaxed);
        now_ms.saturating_sub(last) >= every_sec.saturating_mul(1000)
    }

    pub fn mark_logged(&self, now_ms: u64) {
        self.last_log_ms.store(now_ms, Ordering::Relaxed);
    }

    pub fn snapshot(&self, now_ms: u64) -> StatsSnapshot {
        let start = self.start_ms.load(Ordering::Relaxed);
        StatsSnapshot {
            now_ms,
            up_sec: now_ms.saturating_sub(start) / 1000,
            cycles_started: self.cycles_started.load(Ordering::Relaxed),
            cycles_applied: self.cycles_applied.load(Ordering::Relaxed),
            stale_dropped: self.stale_dropped.load(Ordering::Relaxed),
            transport_failures: self.transport_failures.load(Ordering::Relaxed),
            application_failures: self.application_failures.load(Ordering::Relaxed),
        }
    }
}

#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct StatsSnapshot {
    pub now_ms: u64,
    pub up_sec: u64,
    pub cycles_started: u64,
    pub cycles_applied: u64,
    pub stale_dropped: u64,
    pub transport_failures: u64,
    pub application_failures: u64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn failures_are_split_by_kind() {
        let s = Stats::new(0);
        s.record_failure(&FetchError::Application("Sheet locked".into()));
        s.record_failure(&FetchError::Transport("refused".into()));
        s.record_failure(&FetchError::Transport("timeout".into()));
        let snap = s.snapshot(5_000);
        assert_eq!(snap.application_failures, 1);
        assert_eq!(snap.transport_failures, 2);
        assert_eq!(snap.up_sec, 5);
    }

    #[test]
    fn log_interval() {
        let s = Stats::new(1_000);
        assert!(!s.should_log(2_000, 0));
        assert!(!s.should_log(2_000, 5));
        assert!(s.should_log(6_000, 5));
        s.mark_logged(6_000);
        assert!(!s.should_log(7_000, 5));
    }
}
