use chrono::{NaiveDateTime, Timelike};

use super::FieldGrammar;
use super::calendar::{Grain, step};
use super::token::{Atom, Domain, part_matches};
use crate::Position;

const DOMAIN: Domain = Domain::cyclic(0, 23);

/// Hours of the wall clock, `0-23`.
#[derive(Debug, Clone, Copy, Default)]
pub struct HourField;

impl FieldGrammar for HourField {
    fn position(&self) -> Position {
        Position::Hour
    }

    fn validate_part(&self, part: &str) -> bool {
        Atom::parse(part, DOMAIN, &[]).is_some()
    }

    fn is_satisfied_by(&self, instant: &NaiveDateTime, part: &str) -> bool {
        part_matches(part, instant.hour(), DOMAIN, &[])
    }

    // Wall-clock hours: a DST gap is dealt with when the search maps the
    // candidate back into its timezone.
    fn increment(&self, instant: NaiveDateTime, invert: bool) -> NaiveDateTime {
        step(Grain::Hour, instant, invert)
    }
}
