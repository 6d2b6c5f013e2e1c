//! Bounded top-K of the largest individual counts.

use chrono::NaiveDateTime;
use std::cmp::Reverse;
use std::collections::BinaryHeap;

use super::{Aggregator, DEFAULT_TOP_N};
use crate::record::Record;

/// Heap key: ordered by count first so the heap root is the smallest count.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
struct Ranked {
    count: u64,
    timestamp: NaiveDateTime,
}

/// Keeps the `capacity` largest observations seen so far.
///
/// Backed by a min-heap, so each record costs at most one `O(log k)`
/// replacement. Once full, a new record only gets in if its count is strictly
/// greater than the smallest tracked count; an equal count loses to the
/// record that got there first.
#[derive(Debug, Clone)]
pub struct LargestCounts {
    heap: BinaryHeap<Reverse<Ranked>>,
    capacity: usize,
}

impl LargestCounts {
    pub fn new(capacity: usize) -> Self {
        Self {
            heap: BinaryHeap::with_capacity(capacity),
            capacity,
        }
    }

    /// Tracked records ordered by ascending count, ties by timestamp.
    pub fn report(&self) -> Vec<Record> {
        let mut ranked: Vec<Ranked> = self.heap.iter().map(|Reverse(r)| *r).collect();
        ranked.sort_unstable();
        ranked
            .into_iter()
            .map(|r| Record::new(r.timestamp, r.count))
            .collect()
    }

    pub fn size(&self) -> usize {
        self.heap.len()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }
}

impl Default for LargestCounts {
    fn default() -> Self {
        Self::new(DEFAULT_TOP_N)
    }
}

impl Aggregator for LargestCounts {
    fn process(&mut self, record: Record) {
        let ranked = Ranked {
            count: record.count,
            timestamp: record.timestamp,
        };

        if self.heap.len() < self.capacity {
            self.heap.push(Reverse(ranked));
            return;
        }

        if let Some(mut smallest) = self.heap.peek_mut() {
            if smallest.0.count < ranked.count {
                *smallest = Reverse(ranked);
            }
        }
    }
}
