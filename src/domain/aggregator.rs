//! Per-entry collection of fan-out attributes (example sentences).

use std::collections::{BTreeSet, HashMap};

use tracing::trace;

/// Collects distinct values per entry identifier.
///
/// Independent of where the entry lands in the tree: the same entry under
/// two categories shares one value set.
#[derive(Debug, Default)]
pub struct ExampleAggregator {
    values: HashMap<String, BTreeSet<String>>,
}

impl ExampleAggregator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add `value` to the set of `entry`. Repeats and blank values are no-ops.
    pub fn record(&mut self, entry: &str, value: &str) {
        if value.trim().is_empty() {
            return;
        }
        let inserted = self
            .values
            .entry(entry.to_string())
            .or_default()
            .insert(value.to_string());
        trace!(entry, inserted, "record example");
    }

    pub fn get(&self, entry: &str) -> Option<&BTreeSet<String>> {
        self.values.get(entry)
    }

    /// Consume the aggregator, yielding sorted distinct values per entry.
    pub fn drain(self) -> HashMap<String, Vec<String>> {
        self.values
            .into_iter()
            .map(|(entry, set)| (entry, set.into_iter().collect()))
            .collect()
    }
}
