//! Cron expressions with second-level granularity.
//!
//! An expression has six or seven whitespace-separated fields:
//!
//! ```text
//! second  minute  hour  day-of-month  month  day-of-week  [year]
//! ```
//!
//! Each field holds `*`, a value, a range `a-b`, a step `a/n` / `*/n`, or a
//! comma list of those. [`Expression`] validates and stores the fields; the
//! search engine (`engine`) walks a candidate instant field by field until it
//! satisfies all of them, and the due check is a self-inclusive search.
//!
//! ```
//! use chrono::{TimeZone, Utc};
//! use cronsec::Expression;
//!
//! let expr = Expression::parse("0 30 * * * *").unwrap();
//! let from = Utc.with_ymd_and_hms(2024, 1, 1, 10, 5, 0).unwrap();
//! let next = expr.next_match(&from, 0, false).unwrap();
//! assert_eq!(next, Utc.with_ymd_and_hms(2024, 1, 1, 10, 30, 0).unwrap());
//! ```

#[macro_use]
mod macros;
mod api;
mod engine;
mod error;
mod expression;
mod field;
mod reference;

use std::fmt;
use std::str::FromStr;

pub use api::{
    Context, DayMatch, Options, is_due_with, next_match_with, previous_match_with, search_verbose_with,
};
pub use engine::{MAX_ITERATIONS, SearchMetrics, SearchRun, Searcher};
pub use error::{Error, Result};
pub use expression::{Expression, Matches};
pub use field::{FieldGrammar, FieldRegistry, FieldSet};
pub use reference::parse_reference;

// --- Field positions ---------------------------------------------------------

/// A field slot in an expression, numbered by its position in the text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Position {
    Second = 0,
    Minute = 1,
    Hour = 2,
    Day = 3,
    Month = 4,
    Weekday = 5,
    Year = 6,
}

impl Position {
    /// All positions in storage (text) order.
    pub const ALL: [Position; 7] = [
        Position::Second,
        Position::Minute,
        Position::Hour,
        Position::Day,
        Position::Month,
        Position::Weekday,
        Position::Year,
    ];

    /// Evaluation order of the search engine: coarsest unit first, with the
    /// weekday treated as a day-granularity constraint.
    pub const PRIORITY: [Position; 7] = [
        Position::Year,
        Position::Month,
        Position::Day,
        Position::Weekday,
        Position::Hour,
        Position::Minute,
        Position::Second,
    ];

    pub const fn index(self) -> usize {
        self as usize
    }

    pub const fn name(self) -> &'static str {
        match self {
            Position::Second => "second",
            Position::Minute => "minute",
            Position::Hour => "hour",
            Position::Day => "day-of-month",
            Position::Month => "month",
            Position::Weekday => "day-of-week",
            Position::Year => "year",
        }
    }
}

impl TryFrom<usize> for Position {
    type Error = Error;

    fn try_from(index: usize) -> Result<Self> {
        Position::ALL.get(index).copied().ok_or(Error::InvalidPosition(index))
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Position {
    type Err = Error;

    /// Accepts a numeric index (`"0"`..`"6"`) or a field name (`"minute"`, `"weekday"`, ...).
    fn from_str(s: &str) -> Result<Self> {
        if let Ok(index) = s.parse::<usize>() {
            return Position::try_from(index);
        }

        match s.to_ascii_lowercase().as_str() {
            "second" | "seconds" => Ok(Position::Second),
            "minute" | "minutes" => Ok(Position::Minute),
            "hour" | "hours" => Ok(Position::Hour),
            "day" | "day-of-month" | "dom" => Ok(Position::Day),
            "month" | "months" => Ok(Position::Month),
            "weekday" | "day-of-week" | "dow" => Ok(Position::Weekday),
            "year" | "years" => Ok(Position::Year),
            _ => Err(Error::UnknownPosition(s.to_string())),
        }
    }
}
