//! The search engine.
//!
//! Given an expression, a reference instant, a skip count, a direction and
//! whether the reference itself may count, the engine finds the nearest
//! instant that satisfies every field.
//!
//! ## How a search runs
//!
//! ```text
//! reference ── truncate to whole seconds ── candidate (wall clock)
//!                                              │
//!      ┌───────────────────────────────────────┘
//!      v
//!   for each position in YEAR, MONTH, DAY, WEEKDAY, HOUR, MINUTE, SECOND
//!      token satisfied? (any comma element)
//!        no  -> grammar.increment(candidate), restart from YEAR
//!      │
//!      v  all satisfied
//!   map wall clock into the timezone (gap: skip the hour, repeated hour: try both)
//!   reference excluded or matches left to skip? -> step one second, restart
//!   otherwise return
//! ```
//!
//! Restarting from the coarsest field matters: moving to a new month can
//! invalidate a day that was already accepted. The loop is capped at
//! [`MAX_ITERATIONS`] so that impossible expressions (`0 0 0 31 2 *`) end with
//! [`crate::Error::NoMatchFound`] instead of spinning forever.
//!
//! ## Responsibilities by module
//!
//! - `search.rs`: [`Searcher`], the loop itself and timezone mapping.
//! - `metrics.rs`: per-run counters returned by `Searcher::run_with_metrics`.
//!
//! ## Debugging
//!
//! Every rejected field is logged at `trace` level under the `cronsec::engine`
//! target, results at `debug`. The CLI reads its filter from `CRONSEC_LOG`.

#[path = "engine/metrics.rs"]
mod metrics;
#[path = "engine/search.rs"]
mod search;


pub use metrics::{SearchMetrics, SearchRun};
pub use search::{MAX_ITERATIONS, Searcher};
