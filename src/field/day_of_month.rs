use chrono::{Datelike, NaiveDateTime};

use super::FieldGrammar;
use super::calendar::{Grain, days_in_month, last_workday, nearest_workday, step};
use super::token::{Atom, Domain};
use crate::Position;

const DOMAIN: Domain = Domain::cyclic(1, 31);

/// One list element of a day-of-month token.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum DayPart {
    Atom(Atom),
    /// `L`: the last day of the month.
    Last,
    /// `LW`: the last workday of the month.
    LastWorkday,
    /// `nW`: the workday nearest to day `n`.
    NearestWorkday(u32),
}

fn parse_part(part: &str) -> Option<DayPart> {
    match part {
        "?" => return Some(DayPart::Atom(Atom::Any)),
        "L" => return Some(DayPart::Last),
        "LW" => return Some(DayPart::LastWorkday),
        _ => {}
    }

    if let Some(caps) = regex!(r"^([0-9]{1,2})W$").captures(part) {
        return capture_u32!(caps, 1).filter(|day| DOMAIN.contains(*day)).map(DayPart::NearestWorkday);
    }

    Atom::parse(part, DOMAIN, &[]).map(DayPart::Atom)
}

/// Day of the month, `1-31`, plus `?`, `L`, `LW` and `nW`.
///
/// Values beyond the current month's length simply never match, so `31`
/// skips 30-day months and `30 2` can never be satisfied.
#[derive(Debug, Clone, Copy, Default)]
pub struct DayOfMonthField;

impl FieldGrammar for DayOfMonthField {
    fn position(&self) -> Position {
        Position::Day
    }

    fn validate_part(&self, part: &str) -> bool {
        parse_part(part).is_some()
    }

    fn is_satisfied_by(&self, instant: &NaiveDateTime, part: &str) -> bool {
        let (year, month, day) = (instant.year(), instant.month(), instant.day());
        match parse_part(part) {
            Some(DayPart::Atom(atom)) => atom.matches(day, DOMAIN),
            Some(DayPart::Last) => day == days_in_month(year, month),
            Some(DayPart::LastWorkday) => last_workday(year, month) == Some(day),
            Some(DayPart::NearestWorkday(target)) => nearest_workday(year, month, target) == Some(day),
            None => false,
        }
    }

    fn increment(&self, instant: NaiveDateTime, invert: bool) -> NaiveDateTime {
        step(Grain::Day, instant, invert)
    }
}
