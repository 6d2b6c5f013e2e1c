//! Streaming aggregators over car count records.
//!
//! Each aggregator folds records one at a time and keeps only the state it
//! needs for its report. They share nothing, so the same record can be fed to
//! all of them in turn.

pub mod daily;
pub mod largest;
pub mod quietest;

pub use daily::DailyCounts;
pub use largest::LargestCounts;
pub use quietest::{QuietestPeriod, QuietestReport};

use std::num::NonZeroUsize;

use crate::record::Record;

/// Default number of largest observations to keep.
pub const DEFAULT_TOP_N: usize = 3;

/// Default number of consecutive observations forming the quietest period.
pub const DEFAULT_WINDOW: NonZeroUsize = NonZeroUsize::new(3).unwrap();

/// A consumer of records in arrival order.
pub trait Aggregator {
    fn process(&mut self, record: Record);
}
