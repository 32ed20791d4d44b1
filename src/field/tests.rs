use chrono::{NaiveDate, NaiveDateTime};

use super::*;
use crate::Position;

fn at(y: i32, mo: u32, d: u32, h: u32, mi: u32, s: u32) -> NaiveDateTime {
    NaiveDate::from_ymd_opt(y, mo, d).unwrap().and_hms_opt(h, mi, s).unwrap()
}

#[test]
fn validate_accepts_and_rejects_per_unit() {
    let registry = FieldRegistry::new();
    // (position, token, valid)
    let cases: Vec<(Position, &str, bool)> = vec![
        (Position::Second, "*", true),
        (Position::Second, "0", true),
        (Position::Second, "59", true),
        (Position::Second, "*/15", true),
        (Position::Second, "0,15,30-40,50/2", true),
        (Position::Second, "60", false),
        (Position::Second, "99", false),
        (Position::Second, "", false),
        (Position::Second, "1,", false),
        (Position::Second, "L", false),
        (Position::Second, "?", false),
        (Position::Minute, "?", false),
        (Position::Hour, "?", false),
        (Position::Month, "?", false),
        (Position::Year, "?", false),
        (Position::Minute, "30", true),
        (Position::Minute, "5-55/10", true),
        (Position::Minute, "61", false),
        (Position::Hour, "23", true),
        (Position::Hour, "22-2", true),
        (Position::Hour, "24", false),
        (Position::Day, "1", true),
        (Position::Day, "31", true),
        (Position::Day, "?", true),
        (Position::Day, "L", true),
        (Position::Day, "LW", true),
        (Position::Day, "15W", true),
        (Position::Day, "1,15,L", true),
        (Position::Day, "0", false),
        (Position::Day, "32", false),
        (Position::Day, "32W", false),
        (Position::Day, "W", false),
        (Position::Month, "12", true),
        (Position::Month, "JAN", true),
        (Position::Month, "jan-mar", true),
        (Position::Month, "NOV-FEB", true),
        (Position::Month, "13", false),
        (Position::Month, "0", false),
        (Position::Month, "JANUARY", false),
        (Position::Weekday, "0", true),
        (Position::Weekday, "7", true),
        (Position::Weekday, "MON-FRI", true),
        (Position::Weekday, "5L", true),
        (Position::Weekday, "FRIL", true),
        (Position::Weekday, "1#2", true),
        (Position::Weekday, "sat#5", true),
        (Position::Weekday, "?", true),
        (Position::Weekday, "8", false),
        (Position::Weekday, "1#6", false),
        (Position::Weekday, "1#0", false),
        (Position::Weekday, "L", false),
        (Position::Year, "*", true),
        (Position::Year, "2024", true),
        (Position::Year, "2024-2030/2", true),
        (Position::Year, "*/4", true),
        (Position::Year, "*/2099", true),
        (Position::Year, "1969", false),
        (Position::Year, "2100", false),
        (Position::Year, "2030-2020", false),
    ];

    for (position, token, expected) in cases {
        let valid = registry.get(position).validate(token);
        assert_eq!(valid, expected, "{position} token {token:?}");
    }
}

#[test]
fn satisfied_by_checks_the_unit_value() {
    let registry = FieldRegistry::new();
    // 2024-05-31 is a Friday.
    let friday = at(2024, 5, 31, 14, 45, 30);
    // (position, part, satisfied)
    let cases: Vec<(Position, &str, bool)> = vec![
        (Position::Second, "30", true),
        (Position::Second, "*/15", true),
        (Position::Second, "*/20", false),
        (Position::Second, "25-35", true),
        (Position::Minute, "45", true),
        (Position::Minute, "0/15", true),
        (Position::Minute, "50-10", false),
        (Position::Hour, "14", true),
        (Position::Hour, "22-2", false),
        (Position::Hour, "*/7", true),
        (Position::Day, "31", true),
        (Position::Day, "L", true),
        (Position::Day, "LW", true),
        (Position::Day, "31W", true),
        (Position::Day, "30", false),
        (Position::Month, "5", true),
        (Position::Month, "MAY", true),
        (Position::Month, "jun", false),
        (Position::Month, "*/2", false),
        (Position::Month, "*/5", true),
        (Position::Day, "*/10", false),
        (Position::Day, "*/31", true),
        (Position::Weekday, "5", true),
        (Position::Weekday, "FRI", true),
        (Position::Weekday, "MON-FRI", true),
        (Position::Weekday, "SAT,SUN", false),
        (Position::Weekday, "5L", true),
        (Position::Weekday, "5#5", true),
        (Position::Weekday, "5#4", false),
        (Position::Year, "2024", true),
        (Position::Year, "2020-2030/2", true),
        (Position::Year, "2025", false),
        (Position::Year, "*/4", true),
        (Position::Year, "*/3", false),
        (Position::Second, "garbage", false),
    ];

    for (position, part, expected) in cases {
        let satisfied = registry.get(position).is_satisfied_by(&friday, part);
        assert_eq!(satisfied, expected, "{position} part {part:?}");
    }
}

#[test]
fn comma_lists_are_a_logical_or() {
    let registry = FieldRegistry::new();
    let minute = registry.get(Position::Minute);
    let dt = at(2024, 1, 1, 10, 30, 0);
    assert!(minute.is_token_satisfied(&dt, "0,30"));
    assert!(minute.is_token_satisfied(&dt, "5-10,25-35"));
    assert!(!minute.is_token_satisfied(&dt, "0,15,45"));
}

#[test]
fn sunday_matches_zero_and_seven() {
    let registry = FieldRegistry::new();
    let weekday = registry.get(Position::Weekday);
    // 2024-06-02 is a Sunday.
    let sunday = at(2024, 6, 2, 0, 0, 0);
    for part in ["0", "7", "SUN", "5-7", "6-1", "0-2", "0-7", "*/2", "7-3", "?"] {
        assert!(weekday.is_satisfied_by(&sunday, part), "{part:?}");
    }
    assert!(!weekday.is_satisfied_by(&sunday, "1-5"));
    assert!(weekday.is_satisfied_by(&sunday, "*/4"));
}

#[test]
fn weekday_steps_count_sunday_once() {
    let registry = FieldRegistry::new();
    let weekday = registry.get(Position::Weekday);
    // 2024-06-03 (Mon) .. 2024-06-09 (Sun); `5-1/2` walks Fri, Sat, Sun, Mon and keeps every other day.
    let hits: Vec<u32> = (3..=9).filter(|d| weekday.is_satisfied_by(&at(2024, 6, *d, 0, 0, 0), "5-1/2")).collect();
    assert_eq!(hits, vec![7, 9]);

    // `1/2` is Mon, Wed, Fri then Sunday (0 and 7 are the same day).
    let hits: Vec<u32> = (3..=9).filter(|d| weekday.is_satisfied_by(&at(2024, 6, *d, 0, 0, 0), "1/2")).collect();
    assert_eq!(hits, vec![3, 5, 7, 9]);
}

#[test]
fn weekday_range_wraps_through_the_weekend() {
    let registry = FieldRegistry::new();
    let weekday = registry.get(Position::Weekday);
    // 2024-06-03 (Mon) .. 2024-06-09 (Sun)
    let hits: Vec<u32> = (3..=9).filter(|d| weekday.is_satisfied_by(&at(2024, 6, *d, 0, 0, 0), "5-1")).collect();
    // Fri 7, Sat 8, Sun 9, Mon 3
    assert_eq!(hits, vec![3, 7, 8, 9]);
}

#[test]
fn day_of_month_beyond_month_length_never_matches() {
    let registry = FieldRegistry::new();
    let day = registry.get(Position::Day);
    for d in 1..=30 {
        assert!(!day.is_satisfied_by(&at(2024, 4, d, 0, 0, 0), "31"));
    }
    assert!(day.is_satisfied_by(&at(2024, 2, 29, 0, 0, 0), "L"));
    assert!(!day.is_satisfied_by(&at(2023, 2, 28, 0, 0, 0), "29"));
}

#[test]
fn increments_move_one_unit_in_either_direction() {
    let registry = FieldRegistry::new();
    let dt = at(2024, 1, 31, 10, 5, 7);
    let cases: Vec<(Position, NaiveDateTime, NaiveDateTime)> = vec![
        (Position::Second, at(2024, 1, 31, 10, 5, 8), at(2024, 1, 31, 10, 5, 6)),
        (Position::Minute, at(2024, 1, 31, 10, 6, 0), at(2024, 1, 31, 10, 4, 59)),
        (Position::Hour, at(2024, 1, 31, 11, 0, 0), at(2024, 1, 31, 9, 59, 59)),
        (Position::Day, at(2024, 2, 1, 0, 0, 0), at(2024, 1, 30, 23, 59, 59)),
        (Position::Weekday, at(2024, 2, 1, 0, 0, 0), at(2024, 1, 30, 23, 59, 59)),
        (Position::Month, at(2024, 2, 1, 0, 0, 0), at(2023, 12, 31, 23, 59, 59)),
        (Position::Year, at(2025, 1, 1, 0, 0, 0), at(2023, 12, 31, 23, 59, 59)),
    ];

    for (position, forward, backward) in cases {
        let field = registry.get(position);
        assert_eq!(field.increment(dt, false), forward, "{position} forward");
        assert_eq!(field.increment(dt, true), backward, "{position} backward");
    }
}

#[test]
fn field_set_tracks_positions() {
    let set = FieldSet::of(Position::Day) | FieldSet::of(Position::Weekday);
    assert!(set.contains(FieldSet::DAY | FieldSet::WEEKDAY));
    assert!(set.contains_position(Position::Weekday));
    assert!(!set.contains_position(Position::Month));
    assert_eq!(set.positions().collect::<Vec<_>>(), vec![Position::Day, Position::Weekday]);
}
