//! Per-calendar-day totals.

use chrono::NaiveDate;
use std::collections::BTreeMap;

use super::Aggregator;
use crate::record::Record;

/// Running per-day totals.
///
/// Sums are kept as `u128` so any number of `u64` counts can be added
/// without wrapping.
#[derive(Debug, Default, Clone)]
pub struct DailyCounts {
    buckets: BTreeMap<NaiveDate, u128>,
}

impl DailyCounts {
    pub fn new() -> Self {
        Self::default()
    }

    /// `(date, total)` pairs in ascending date order.
    pub fn report(&self) -> Vec<(NaiveDate, u128)> {
        self.buckets.iter().map(|(date, sum)| (*date, *sum)).collect()
    }

    /// Sum over all days, i.e. every count processed so far.
    pub fn total(&self) -> u128 {
        self.buckets.values().sum()
    }

    /// Number of distinct days seen.
    pub fn len(&self) -> usize {
        self.buckets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.buckets.is_empty()
    }
}

impl Aggregator for DailyCounts {
    fn process(&mut self, record: Record) {
        *self.buckets.entry(record.date()).or_insert(0) += u128::from(record.count);
    }
}
