use chrono::{Datelike, Duration, Months, NaiveDate, NaiveDateTime, NaiveTime, Timelike, Weekday};

/// Granularity of a coarse increment.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Grain {
    Second,
    Minute,
    Hour,
    Day,
    Month,
    Year,
}

pub fn start_of(grain: Grain, dt: NaiveDateTime) -> NaiveDateTime {
    match grain {
        Grain::Second => dt.with_nanosecond(0).unwrap_or(dt),
        Grain::Minute => {
            let time = NaiveTime::from_hms_opt(dt.hour(), dt.minute(), 0).unwrap_or_else(|| dt.time());
            NaiveDateTime::new(dt.date(), time)
        }
        Grain::Hour => {
            let time = NaiveTime::from_hms_opt(dt.hour(), 0, 0).unwrap_or_else(|| dt.time());
            NaiveDateTime::new(dt.date(), time)
        }
        Grain::Day => NaiveDateTime::new(dt.date(), NaiveTime::MIN),
        Grain::Month => NaiveDateTime::new(dt.date().with_day(1).unwrap_or_else(|| dt.date()), NaiveTime::MIN),
        Grain::Year => NaiveDateTime::new(
            NaiveDate::from_ymd_opt(dt.year(), 1, 1).unwrap_or_else(|| dt.date()),
            NaiveTime::MIN,
        ),
    }
}

/// Move to the first second of the next `grain` unit, or (inverted) to the
/// last second of the previous one.
///
/// Falls back to the input when the step would leave chrono's range; the
/// search's iteration cap then reports the failure.
pub fn step(grain: Grain, dt: NaiveDateTime, invert: bool) -> NaiveDateTime {
    let start = start_of(grain, dt);
    if invert {
        return start.checked_sub_signed(Duration::seconds(1)).unwrap_or(dt);
    }

    let next = match grain {
        Grain::Second => start.checked_add_signed(Duration::seconds(1)),
        Grain::Minute => start.checked_add_signed(Duration::minutes(1)),
        Grain::Hour => start.checked_add_signed(Duration::hours(1)),
        Grain::Day => start.checked_add_signed(Duration::days(1)),
        Grain::Month => start.checked_add_months(Months::new(1)),
        Grain::Year => start.checked_add_months(Months::new(12)),
    };
    next.unwrap_or(dt)
}

pub fn days_in_month(year: i32, month: u32) -> u32 {
    let (next_year, next_month) = if month == 12 { (year + 1, 1) } else { (year, month + 1) };
    NaiveDate::from_ymd_opt(next_year, next_month, 1)
        .and_then(|first_next| first_next.pred_opt())
        .map_or(31, |last| last.day())
}

fn is_workday(date: NaiveDate) -> bool {
    !matches!(date.weekday(), Weekday::Sat | Weekday::Sun)
}

/// The workday closest to `day` within the same month (`15W`).
///
/// Saturday moves to Friday and Sunday to Monday unless that would cross
/// into another month, in which case the search goes the other way. Days
/// the month does not have yield `None`.
pub fn nearest_workday(year: i32, month: u32, day: u32) -> Option<u32> {
    let target = NaiveDate::from_ymd_opt(year, month, day)?;
    if is_workday(target) {
        return Some(target.day());
    }

    let (first, second) = match target.weekday() {
        Weekday::Sat => (-1, 2),
        _ => (1, -2),
    };
    [first, second]
        .into_iter()
        .filter_map(|offset| target.checked_add_signed(Duration::days(offset)))
        .find(|d| d.month() == month && is_workday(*d))
        .map(|d| d.day())
}

/// The last Monday..Friday of the month (`LW`).
pub fn last_workday(year: i32, month: u32) -> Option<u32> {
    let mut date = NaiveDate::from_ymd_opt(year, month, days_in_month(year, month))?;
    while !is_workday(date) {
        date = date.pred_opt()?;
    }
    Some(date.day())
}

/// 1-based occurrence of the date's weekday within its month (`#k`).
pub fn weekday_occurrence(date: NaiveDate) -> u32 {
    (date.day() - 1) / 7 + 1
}
