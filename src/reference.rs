use chrono::{DateTime, NaiveDateTime, TimeZone};
use chrono_english::{Dialect, parse_date_string};

use crate::{Error, Result};

const FORMATS: [&str; 3] = ["%Y-%m-%dT%H:%M:%S", "%Y-%m-%d %H:%M:%S", "%Y-%m-%dT%H:%M"];

/// Read a reference instant from text, in `now`'s timezone.
///
/// Accepts `now`, an ISO-like local timestamp (`2024-01-01T10:05:00` or
/// `2024-01-01 10:05:00`), or an English phrase relative to `now` such as
/// `"next friday 8pm"` or `"2 days ago"`.
///
/// # Example
/// ```
/// use chrono::{TimeZone, Utc};
/// use cronsec::parse_reference;
///
/// let now = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
/// let at = parse_reference("2024-03-05 06:07:08", &now).unwrap();
/// assert_eq!(at, Utc.with_ymd_and_hms(2024, 3, 5, 6, 7, 8).unwrap());
/// ```
pub fn parse_reference<Tz>(text: &str, now: &DateTime<Tz>) -> Result<DateTime<Tz>>
where
    Tz: TimeZone,
    Tz::Offset: Copy,
{
    let text = text.trim();
    if text.eq_ignore_ascii_case("now") {
        return Ok(now.clone());
    }

    for format in FORMATS {
        if let Ok(naive) = NaiveDateTime::parse_from_str(text, format) {
            return now.timezone().from_local_datetime(&naive).earliest().ok_or_else(|| Error::InvalidReference {
                input: text.to_string(),
                reason: "local time does not exist in this timezone".to_string(),
            });
        }
    }

    parse_date_string(text, now.clone(), Dialect::Us)
        .map_err(|err| Error::InvalidReference { input: text.to_string(), reason: err.to_string() })
}
