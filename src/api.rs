use chrono::{DateTime, Local, NaiveDate, NaiveTime, TimeZone};

use crate::engine::{SearchRun, Searcher};
use crate::field::DEFAULT_REGISTRY;
use crate::{Expression, Result};

/// How day-of-month and day-of-week combine when both are restricted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DayMatch {
    /// Both fields must match (each is an independent constraint).
    #[default]
    Both,
    /// Classic Vixie cron: when both fields are restricted, a day matches if
    /// either does. With only one restricted, this behaves like `Both`.
    Either,
}

/// Options that affect how a search evaluates an expression.
#[derive(Debug, Clone, Default)]
pub struct Options {
    pub day_match: DayMatch,
}

/// Search context.
///
/// The reference time carries its own timezone; every instant a search
/// returns is in that same timezone.
#[derive(Debug, Clone)]
pub struct Context<Tz: TimeZone> {
    /// Instant the search starts from (or the due check tests).
    pub reference_time: DateTime<Tz>,
}

impl<Tz: TimeZone> Context<Tz> {
    pub fn new(reference_time: DateTime<Tz>) -> Self {
        Self { reference_time }
    }
}

impl Default for Context<Local> {
    fn default() -> Self {
        if cfg!(test) {
            let date = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
            let time = NaiveTime::from_hms_opt(10, 5, 0).unwrap();
            Self { reference_time: Local.from_local_datetime(&date.and_time(time)).earliest().unwrap() }
        } else {
            Self { reference_time: Local::now() }
        }
    }
}

/// Find the `skip`-th match strictly after the context's reference time (or
/// at it, with `include_reference`).
///
/// # Example
/// ```
/// use chrono::{TimeZone, Utc};
/// use cronsec::{Context, Expression, Options, next_match_with};
///
/// let expr = Expression::parse("*/15 * * * * *").unwrap();
/// let ctx = Context::new(Utc.with_ymd_and_hms(2024, 1, 1, 10, 0, 7).unwrap());
/// let next = next_match_with(&expr, &ctx, &Options::default(), 0, false).unwrap();
/// assert_eq!(next, Utc.with_ymd_and_hms(2024, 1, 1, 10, 0, 15).unwrap());
/// ```
pub fn next_match_with<Tz: TimeZone>(
    expression: &Expression,
    context: &Context<Tz>,
    options: &Options,
    skip: u32,
    include_reference: bool,
) -> Result<DateTime<Tz>> {
    Searcher::new(expression, &DEFAULT_REGISTRY, options).run(&context.reference_time, skip, false, include_reference)
}

/// Backward counterpart of [`next_match_with`].
pub fn previous_match_with<Tz: TimeZone>(
    expression: &Expression,
    context: &Context<Tz>,
    options: &Options,
    skip: u32,
    include_reference: bool,
) -> Result<DateTime<Tz>> {
    Searcher::new(expression, &DEFAULT_REGISTRY, options).run(&context.reference_time, skip, true, include_reference)
}

/// Whether the reference time, truncated to whole seconds, is itself a match.
///
/// Meant to be polled once per tick; sub-second precision is ignored.
pub fn is_due_with<Tz: TimeZone>(expression: &Expression, context: &Context<Tz>, options: &Options) -> bool {
    let at = context.reference_time.clone();
    let at = chrono::Timelike::with_nanosecond(&at, 0).unwrap_or(at);
    next_match_with(expression, &Context::new(at.clone()), options, 0, true).is_ok_and(|found| found == at)
}

/// Run a search and return the engine counters with the outcome.
///
/// This is useful for profiling and debugging expressions that take many
/// iterations; the plain search functions do not expose the counters.
pub fn search_verbose_with<Tz: TimeZone>(
    expression: &Expression,
    context: &Context<Tz>,
    options: &Options,
    skip: u32,
    invert: bool,
    include_reference: bool,
) -> SearchRun<Tz> {
    Searcher::new(expression, &DEFAULT_REGISTRY, options).run_with_metrics(
        &context.reference_time,
        skip,
        invert,
        include_reference,
    )
}
