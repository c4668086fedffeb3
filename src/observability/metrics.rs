//! Statement counters
//!
//! Counters only, monotonic, reset on process start. Relaxed atomics.

use std::sync::atomic::{AtomicU64, Ordering};

/// Per-client statement counters
#[derive(Debug, Default)]
pub struct MetricsRegistry {
    statements_executed: AtomicU64,
    statements_failed: AtomicU64,
    inserts: AtomicU64,
    mutations: AtomicU64,
    nested_rows: AtomicU64,
    missing_generated_keys: AtomicU64,
}

impl MetricsRegistry {
    /// Create a new registry with all counters at zero
    pub fn new() -> Self {
        Self::default()
    }

    /// Statement returned from the executor successfully
    pub fn increment_statements_executed(&self) {
        self.statements_executed.fetch_add(1, Ordering::Relaxed);
    }

    /// Executor raised an error
    pub fn increment_statements_failed(&self) {
        self.statements_failed.fetch_add(1, Ordering::Relaxed);
    }

    pub fn increment_inserts(&self) {
        self.inserts.fetch_add(1, Ordering::Relaxed);
    }

    /// UPDATE or DELETE
    pub fn increment_mutations(&self) {
        self.mutations.fetch_add(1, Ordering::Relaxed);
    }

    pub fn add_nested_rows(&self, rows: u64) {
        self.nested_rows.fetch_add(rows, Ordering::Relaxed);
    }

    pub fn increment_missing_generated_keys(&self) {
        self.missing_generated_keys.fetch_add(1, Ordering::Relaxed);
    }

    /// Take a point-in-time copy of all counters
    pub fn snapshot(&self) -> MetricsSnapshot {
        MetricsSnapshot {
            statements_executed: self.statements_executed.load(Ordering::Relaxed),
            statements_failed: self.statements_failed.load(Ordering::Relaxed),
            inserts: self.inserts.load(Ordering::Relaxed),
            mutations: self.mutations.load(Ordering::Relaxed),
            nested_rows: self.nested_rows.load(Ordering::Relaxed),
            missing_generated_keys: self.missing_generated_keys.load(Ordering::Relaxed),
        }
    }
}

/// Point-in-time copy of [`MetricsRegistry`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, serde::Serialize)]
pub struct MetricsSnapshot {
    pub statements_executed: u64,
    pub statements_failed: u64,
    pub inserts: u64,
    pub mutations: u64,
    pub nested_rows: u64,
    pub missing_generated_keys: u64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_registry_is_zero() {
        assert_eq!(MetricsRegistry::new().snapshot(), MetricsSnapshot::default());
    }

    #[test]
    fn test_counters_accumulate() {
        let metrics = MetricsRegistry::new();
        metrics.increment_statements_executed();
        metrics.increment_statements_executed();
        metrics.increment_inserts();
        metrics.add_nested_rows(5);
        metrics.add_nested_rows(2);

        let snap = metrics.snapshot();
        assert_eq!(snap.statements_executed, 2);
        assert_eq!(snap.inserts, 1);
        assert_eq!(snap.nested_rows, 7);
        assert_eq!(snap.statements_failed, 0);
    }
}
