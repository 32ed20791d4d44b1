use chrono::{Datelike, NaiveDateTime};

use super::FieldGrammar;
use super::calendar::{Grain, step};
use super::token::{Atom, Domain, part_matches};
use crate::Position;

const DOMAIN: Domain = Domain::cyclic(1, 12);

const NAMES: [(&str, u32); 12] = [
    ("JAN", 1),
    ("FEB", 2),
    ("MAR", 3),
    ("APR", 4),
    ("MAY", 5),
    ("JUN", 6),
    ("JUL", 7),
    ("AUG", 8),
    ("SEP", 9),
    ("OCT", 10),
    ("NOV", 11),
    ("DEC", 12),
];

/// Months, `1-12` or `JAN-DEC`.
#[derive(Debug, Clone, Copy, Default)]
pub struct MonthField;

impl FieldGrammar for MonthField {
    fn position(&self) -> Position {
        Position::Month
    }

    fn validate_part(&self, part: &str) -> bool {
        Atom::parse(part, DOMAIN, &NAMES).is_some()
    }

    fn is_satisfied_by(&self, instant: &NaiveDateTime, part: &str) -> bool {
        part_matches(part, instant.month(), DOMAIN, &NAMES)
    }

    fn increment(&self, instant: NaiveDateTime, invert: bool) -> NaiveDateTime {
        step(Grain::Month, instant, invert)
    }
}
