use std::collections::BTreeMap;
use std::sync::{Mutex, PoisonError};

/// Counter group used for everything the scheme reports.
pub const COUNTER_GROUP: &str = "linecsv.scheme.CsvScheme";

/// Records dropped in lenient mode.
pub const INVALID_RECORDS: &str = "Invalid Records";

/// Receiver of named counter increments.
pub trait Diagnostics: Send + Sync {
    fn increment(&self, group: &str, counter: &str, amount: u64);
}

/// Thread-safe in-memory counters.
#[derive(Debug, Default)]
pub struct Counters {
    counts: Mutex<BTreeMap<(String, String), u64>>,
}

impl Counters {
    pub fn get(&self, group: &str, counter: &str) -> u64 {
        let counts = self.counts.lock().unwrap_or_else(PoisonError::into_inner);
        counts
            .get(&(group.to_string(), counter.to_string()))
            .copied()
            .unwrap_or(0)
    }

    /// Shorthand for the scheme's invalid record counter.
    pub fn invalid_records(&self) -> u64 {
        self.get(COUNTER_GROUP, INVALID_RECORDS)
    }
}

impl Diagnostics for Counters {
    fn increment(&self, group: &str, counter: &str, amount: u64) {
        let mut counts = self.counts.lock().unwrap_or_else(PoisonError::into_inner);
        *counts
            .entry((group.to_string(), counter.to_string()))
            .or_insert(0) += amount;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use std::thread;

    #[test]
    fn test_counters() {
        let counters = Counters::default();
        assert_eq!(counters.invalid_records(), 0);

        counters.increment(COUNTER_GROUP, INVALID_RECORDS, 1);
        counters.increment(COUNTER_GROUP, INVALID_RECORDS, 2);
        counters.increment("other", "x", 5);

        assert_eq!(counters.invalid_records(), 3);
        assert_eq!(counters.get("other", "x"), 5);
        assert_eq!(counters.get(COUNTER_GROUP, "x"), 0);
    }

    #[test]
    fn test_counters_across_threads() {
        let counters = Arc::new(Counters::default());
        let handles: Vec<_> = (0..4)
            .map(|_| {
                let counters = Arc::clone(&counters);
                thread::spawn(move || {
                    for _ in 0..100 {
                        counters.increment(COUNTER_GROUP, INVALID_RECORDS, 1);
                    }
                })
            })
            .collect();
        for handle in handles {
            handle.join().unwrap();
        }
        assert_eq!(counters.invalid_records(), 400);
    }
}
