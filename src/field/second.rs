use chrono::{NaiveDateTime, Timelike};

use super::FieldGrammar;
use super::calendar::{Grain, step};
use super::token::{Atom, Domain, part_matches};
use crate::Position;

const DOMAIN: Domain = Domain::cyclic(0, 59);

/// Seconds, `0-59`. Allows `* , / -`.
#[derive(Debug, Clone, Copy, Default)]
pub struct SecondField;

impl FieldGrammar for SecondField {
    fn position(&self) -> Position {
        Position::Second
    }

    fn validate_part(&self, part: &str) -> bool {
        Atom::parse(part, DOMAIN, &[]).is_some()
    }

    fn is_satisfied_by(&self, instant: &NaiveDateTime, part: &str) -> bool {
        part_matches(part, instant.second(), DOMAIN, &[])
    }

    fn increment(&self, instant: NaiveDateTime, invert: bool) -> NaiveDateTime {
        step(Grain::Second, instant, invert)
    }
}
