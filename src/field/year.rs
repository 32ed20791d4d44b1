use chrono::{Datelike, NaiveDateTime};

use super::FieldGrammar;
use super::calendar::{Grain, step};
use super::token::{Atom, Domain, part_matches};
use crate::Position;

/// Years a schedule may name. Ranges over years never wrap.
pub const DOMAIN: Domain = Domain::linear(1970, 2099);

#[derive(Debug, Clone, Copy, Default)]
pub struct YearField;

impl FieldGrammar for YearField {
    fn position(&self) -> Position {
        Position::Year
    }

    fn validate_part(&self, part: &str) -> bool {
        Atom::parse(part, DOMAIN, &[]).is_some()
    }

    fn is_satisfied_by(&self, instant: &NaiveDateTime, part: &str) -> bool {
        // Years before the common era can only match a bare wildcard.
        u32::try_from(instant.year()).map_or(part == "*", |year| part_matches(part, year, DOMAIN, &[]))
    }

    fn increment(&self, instant: NaiveDateTime, invert: bool) -> NaiveDateTime {
        step(Grain::Year, instant, invert)
    }
}
