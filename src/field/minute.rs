use chrono::{NaiveDateTime, Timelike};

use super::FieldGrammar;
use super::calendar::{Grain, step};
use super::token::{Atom, Domain, part_matches};
use crate::Position;

const DOMAIN: Domain = Domain::cyclic(0, 59);

/// Minutes, `0-59`.
#[derive(Debug, Clone, Copy, Default)]
pub struct MinuteField;

impl FieldGrammar for MinuteField {
    fn position(&self) -> Position {
        Position::Minute
    }

    fn validate_part(&self, part: &str) -> bool {
        Atom::parse(part, DOMAIN, &[]).is_some()
    }

    fn is_satisfied_by(&self, instant: &NaiveDateTime, part: &str) -> bool {
        part_matches(part, instant.minute(), DOMAIN, &[])
    }

    fn increment(&self, instant: NaiveDateTime, invert: bool) -> NaiveDateTime {
        step(Grain::Minute, instant, invert)
    }
}
