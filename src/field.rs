//! Field grammars.
//!
//! Every calendar unit of an expression gets a [`FieldGrammar`]: a stateless
//! value that knows the unit's token syntax, how to test a single list element
//! against an instant, and how to step an instant by one unit.
//!
//! ## How the parts fit
//!
//! ```text
//! token.rs     Atom / Domain: shared `*`, value, range, step grammar
//! calendar.rs  unit boundaries, month lengths, weekday helpers
//! second.rs .. year.rs
//!              one grammar per unit; day-of-month and day-of-week add
//!              their own forms (`L`, `W`, `#`) on top of `Atom`
//! registry.rs  FieldRegistry: position -> grammar, built eagerly
//! ```
//!
//! ## Invariants
//!
//! - Grammars hold no state, so a registry can be shared between threads and
//!   searches without locking.
//! - `increment` only moves the instant. It never re-checks other fields; the
//!   search engine restarts from the coarsest field after every step.
//! - Coarse increments land on a unit boundary: the first second of the next
//!   unit going forward, the last second of the previous unit going backward.

#[path = "field/calendar.rs"]
pub(crate) mod calendar;
#[path = "field/day_of_month.rs"]
mod day_of_month;
#[path = "field/day_of_week.rs"]
mod day_of_week;
#[path = "field/hour.rs"]
mod hour;
#[path = "field/minute.rs"]
mod minute;
#[path = "field/month.rs"]
mod month;
#[path = "field/registry.rs"]
mod registry;
#[path = "field/second.rs"]
mod second;
#[path = "field/token.rs"]
pub(crate) mod token;
#[path = "field/year.rs"]
mod year;

#[cfg(test)]
#[path = "field/tests.rs"]
mod tests;

use std::fmt;

use chrono::NaiveDateTime;

use crate::Position;

pub use day_of_month::DayOfMonthField;
pub use day_of_week::DayOfWeekField;
pub use hour::HourField;
pub use minute::MinuteField;
pub use month::MonthField;
pub use registry::{DEFAULT_REGISTRY, FieldRegistry};
pub use second::SecondField;
pub use year::YearField;

/// The capability set of one calendar unit.
pub trait FieldGrammar: fmt::Debug + Send + Sync {
    /// The slot this grammar is registered for.
    fn position(&self) -> Position;

    /// Check a single list element (no commas) for syntax and domain bounds.
    fn validate_part(&self, part: &str) -> bool;

    /// Whether the instant's value for this unit satisfies a single list
    /// element. Malformed elements are never satisfied.
    fn is_satisfied_by(&self, instant: &NaiveDateTime, part: &str) -> bool;

    /// Step the instant by one unit of this field, backwards when `invert`.
    fn increment(&self, instant: NaiveDateTime, invert: bool) -> NaiveDateTime;

    /// Check a whole token, comma lists included.
    fn validate(&self, token: &str) -> bool {
        !token.is_empty() && token.split(',').all(|part| self.validate_part(part))
    }

    /// A token is satisfied when any element of its comma list is.
    fn is_token_satisfied(&self, instant: &NaiveDateTime, token: &str) -> bool {
        token.split(',').map(str::trim).any(|part| self.is_satisfied_by(instant, part))
    }
}

bitflags::bitflags! {
    /// A set of field positions, indexed like [`Position`].
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct FieldSet: u8 {
        const SECOND  = 1 << 0;
        const MINUTE  = 1 << 1;
        const HOUR    = 1 << 2;
        const DAY     = 1 << 3;
        const MONTH   = 1 << 4;
        const WEEKDAY = 1 << 5;
        const YEAR    = 1 << 6;
    }
}

impl FieldSet {
    pub const fn of(position: Position) -> FieldSet {
        FieldSet::from_bits_truncate(1 << position.index())
    }

    pub fn contains_position(&self, position: Position) -> bool {
        self.contains(FieldSet::of(position))
    }

    /// Positions in the set, in storage order.
    pub fn positions(&self) -> impl Iterator<Item = Position> + '_ {
        Position::ALL.into_iter().filter(|p| self.contains_position(*p))
    }
}
