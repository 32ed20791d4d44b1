//! The bounded backtracking search.
//!
//! A search owns one working instant (a wall-clock `NaiveDateTime`) and
//! nothing else; the expression, registry and options are borrowed, so a
//! `Searcher` is cheap to build per call and safe to share.

use std::time::Instant;

use chrono::{DateTime, LocalResult, NaiveDateTime, TimeZone, Timelike};

use super::metrics::{SearchMetrics, SearchRun};
use crate::api::{DayMatch, Options};
use crate::field::FieldSet;
use crate::{Error, Expression, FieldRegistry, Position, Result};

/// Upper bound on outer loop iterations for a single search (skips included).
pub const MAX_ITERATIONS: usize = 1000;

/// Runs searches for one expression.
#[derive(Debug, Clone, Copy)]
pub struct Searcher<'a> {
    expression: &'a Expression,
    registry: &'a FieldRegistry,
    options: &'a Options,
}

impl<'a> Searcher<'a> {
    pub fn new(expression: &'a Expression, registry: &'a FieldRegistry, options: &'a Options) -> Self {
        Self { expression, registry, options }
    }

    /// Find the `skip`-th match after (or, with `invert`, before) `reference`.
    ///
    /// With `include_reference`, a reference that matches counts as the first
    /// match. The reference is truncated to whole seconds first.
    pub fn run<Tz: TimeZone>(
        &self,
        reference: &DateTime<Tz>,
        skip: u32,
        invert: bool,
        include_reference: bool,
    ) -> Result<DateTime<Tz>> {
        let mut metrics = SearchMetrics::default();
        self.search(reference, skip, invert, include_reference, &mut metrics)
    }

    /// Same as [`Searcher::run`], also returning the loop counters.
    pub fn run_with_metrics<Tz: TimeZone>(
        &self,
        reference: &DateTime<Tz>,
        skip: u32,
        invert: bool,
        include_reference: bool,
    ) -> SearchRun<Tz> {
        let mut metrics = SearchMetrics::default();
        let result = self.search(reference, skip, invert, include_reference, &mut metrics);
        SearchRun { result, metrics }
    }

    fn search<Tz: TimeZone>(
        &self,
        reference: &DateTime<Tz>,
        skip: u32,
        invert: bool,
        include_reference: bool,
        metrics: &mut SearchMetrics,
    ) -> Result<DateTime<Tz>> {
        let started = Instant::now();
        let timezone = reference.timezone();
        let reference = truncate(reference);
        let reference_local = reference.naive_local();
        let either_day = self.options.day_match == DayMatch::Either
            && self.expression.restricted_fields().contains(FieldSet::DAY | FieldSet::WEEKDAY);

        let mut candidate = reference_local;
        let mut remaining = skip;

        for iteration in 1..=MAX_ITERATIONS {
            metrics.iterations = iteration;

            if let Some(position) = self.first_unsatisfied(&candidate, either_day) {
                tracing::trace!(target: "cronsec::engine", iteration, %position, %candidate, "field not satisfied");
                metrics.increments[position.index()] += 1;
                candidate = self.registry.get(position).increment(candidate, invert);
                continue;
            }

            let instants = local_instants(&timezone, &candidate, invert);
            if instants.is_empty() {
                tracing::trace!(target: "cronsec::engine", iteration, %candidate, "wall time does not exist, skipping hour");
                metrics.skipped_gaps += 1;
                candidate = self.registry.get(Position::Hour).increment(candidate, invert);
                continue;
            }

            for found in instants {
                // An excluded reference does not use up a skip.
                if !include_reference && found == reference {
                    metrics.skipped_matches += 1;
                    continue;
                }
                // Inside a repeated hour one occurrence can lie behind the reference.
                let ahead = if invert { found <= reference } else { found >= reference };
                if !ahead {
                    continue;
                }
                if remaining > 0 {
                    remaining -= 1;
                    metrics.skipped_matches += 1;
                    continue;
                }

                metrics.elapsed = started.elapsed();
                tracing::debug!(
                    target: "cronsec::engine",
                    expression = %self.expression,
                    iterations = iteration,
                    invert,
                    "match found at {candidate}"
                );
                return Ok(found);
            }
            candidate = self.registry.get(Position::Second).increment(candidate, invert);
        }

        metrics.elapsed = started.elapsed();
        tracing::warn!(
            target: "cronsec::engine",
            expression = %self.expression,
            %reference_local,
            invert,
            "no match within {MAX_ITERATIONS} iterations"
        );
        Err(Error::NoMatchFound { iterations: MAX_ITERATIONS })
    }

    /// The coarsest position whose token rejects `candidate`.
    fn first_unsatisfied(&self, candidate: &NaiveDateTime, either_day: bool) -> Option<Position> {
        Position::PRIORITY.into_iter().find(|position| {
            let Some(token) = self.expression.get_field(*position) else {
                return false;
            };
            let satisfied = match position {
                // Either-day policy: day-of-month and weekday are judged together
                // under DAY, and WEEKDAY is then always accepted.
                Position::Day if either_day => {
                    self.is_satisfied(Position::Day, candidate, token)
                        || self
                            .expression
                            .get_field(Position::Weekday)
                            .is_some_and(|weekday| self.is_satisfied(Position::Weekday, candidate, weekday))
                }
                Position::Weekday if either_day => true,
                _ => self.is_satisfied(*position, candidate, token),
            };
            !satisfied
        })
    }

    fn is_satisfied(&self, position: Position, candidate: &NaiveDateTime, token: &str) -> bool {
        self.registry.get(position).is_token_satisfied(candidate, token)
    }
}

fn truncate<Tz: TimeZone>(instant: &DateTime<Tz>) -> DateTime<Tz> {
    instant.with_nanosecond(0).unwrap_or_else(|| instant.clone())
}

/// Instants a wall-clock time stands for in `timezone`, in search order.
///
/// Empty inside a DST gap. A repeated hour yields both occurrences, the
/// earlier first going forward and the later first going backward.
fn local_instants<Tz: TimeZone>(timezone: &Tz, local: &NaiveDateTime, invert: bool) -> Vec<DateTime<Tz>> {
    match timezone.from_local_datetime(local) {
        LocalResult::Single(instant) => vec![instant],
        LocalResult::Ambiguous(earliest, latest) if invert => vec![latest, earliest],
        LocalResult::Ambiguous(earliest, latest) => vec![earliest, latest],
        LocalResult::None => Vec::new(),
    }
}
