//! Search run metrics.
//!
//! `Searcher::run` discards these; `Searcher::run_with_metrics` hands them
//! back for the CLI's verbose report and for tests that care about how much
//! work a search did.
//!
//! ## Design notes
//!
//! - Counters are plain integers updated inline in the loop; collecting them
//!   costs nothing measurable.
//! - `increments` is indexed by [`Position::index`].

use chrono::{DateTime, TimeZone};
use std::time::Duration;

use crate::{Position, Result};

#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct SearchMetrics {
    /// Wall time spent in the search loop.
    pub elapsed: Duration,
    /// Outer loop iterations used (at most [`super::MAX_ITERATIONS`]).
    pub iterations: usize,
    /// How often each field's grammar had to step the candidate.
    pub increments: [usize; 7],
    /// Matches passed over because of `skip` or an excluded reference.
    pub skipped_matches: usize,
    /// Candidates that fell into a DST gap of the target timezone.
    pub skipped_gaps: usize,
}

impl SearchMetrics {
    pub fn increments_for(&self, position: Position) -> usize {
        self.increments[position.index()]
    }

    pub fn total_increments(&self) -> usize {
        self.increments.iter().sum()
    }
}

/// A search outcome bundled with the counters collected on the way.
#[derive(Debug, Clone)]
pub struct SearchRun<Tz: TimeZone> {
    pub result: Result<DateTime<Tz>>,
    pub metrics: SearchMetrics,
}
