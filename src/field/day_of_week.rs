use chrono::{Datelike, NaiveDateTime};

use super::FieldGrammar;
use super::calendar::{Grain, days_in_month, step, weekday_occurrence};
use super::token::{Atom, Domain, lookup};
use crate::Position;

// 7 is accepted as a second spelling of Sunday.
const DOMAIN: Domain = Domain::cyclic(0, 7);
// Parsed atoms are folded onto this week before matching.
const WEEK: Domain = Domain::cyclic(0, 6);

const NAMES: [(&str, u32); 7] =
    [("SUN", 0), ("MON", 1), ("TUE", 2), ("WED", 3), ("THU", 4), ("FRI", 5), ("SAT", 6)];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum WeekdayPart {
    Atom(Atom),
    /// `5L`: the last Friday of the month.
    Last(u32),
    /// `1#2`: the second Monday of the month.
    Nth { weekday: u32, nth: u32 },
}

fn parse_part(part: &str) -> Option<WeekdayPart> {
    if part == "?" {
        return Some(WeekdayPart::Atom(Atom::Any));
    }

    if let Some(caps) = regex!(r"^([0-7]|[A-Za-z]{3})L$").captures(part) {
        return lookup(&caps[1], DOMAIN, &NAMES).map(|weekday| WeekdayPart::Last(weekday % 7));
    }

    if let Some(caps) = regex!(r"^([0-7]|[A-Za-z]{3})#([1-5])$").captures(part) {
        let weekday = lookup(&caps[1], DOMAIN, &NAMES)? % 7;
        return capture_u32!(caps, 2).map(|nth| WeekdayPart::Nth { weekday, nth });
    }

    Atom::parse(part, DOMAIN, &NAMES).map(|atom| WeekdayPart::Atom(sunday_as_zero(atom)))
}

/// Rewrite Sunday 7 as 0 so ranges and steps count each day once. `0-7`
/// and `*/n` still cover the whole week.
fn sunday_as_zero(atom: Atom) -> Atom {
    match atom {
        Atom::Any => Atom::Any,
        Atom::Value(value) => Atom::Value(value % 7),
        Atom::Range { start: 0, end: 7 } => Atom::Range { start: 0, end: 6 },
        Atom::Range { start, end } => Atom::Range { start: start % 7, end: end % 7 },
        Atom::Step { start: 0, end: 7, step } => Atom::Step { start: 0, end: 6, step },
        Atom::Step { start, end, step } => Atom::Step { start: start % 7, end: end % 7, step },
    }
}

/// Day of the week, `0-7` (Sunday is 0 and 7) or `SUN-SAT`, plus `?`, `nL`
/// and `n#k`.
#[derive(Debug, Clone, Copy, Default)]
pub struct DayOfWeekField;

impl FieldGrammar for DayOfWeekField {
    fn position(&self) -> Position {
        Position::Weekday
    }

    fn validate_part(&self, part: &str) -> bool {
        parse_part(part).is_some()
    }

    fn is_satisfied_by(&self, instant: &NaiveDateTime, part: &str) -> bool {
        let date = instant.date();
        let weekday = date.weekday().num_days_from_sunday();
        match parse_part(part) {
            Some(WeekdayPart::Atom(atom)) => atom.matches(weekday, WEEK),
            Some(WeekdayPart::Last(target)) => {
                target == weekday && date.day() + 7 > days_in_month(date.year(), date.month())
            }
            Some(WeekdayPart::Nth { weekday: target, nth }) => target == weekday && weekday_occurrence(date) == nth,
            None => false,
        }
    }

    fn increment(&self, instant: NaiveDateTime, invert: bool) -> NaiveDateTime {
        step(Grain::Day, instant, invert)
    }
}
