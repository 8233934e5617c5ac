use chrono::{DateTime, Datelike, NaiveDate, NaiveDateTime, TimeZone, Utc};
use chrono_tz::Tz;

/// Date-time layouts accepted for schedule cells, tried in order
const DATE_TIME_FORMATS: &[&str] = &[
    "%m/%d/%Y %I:%M:%S %p",
    "%m/%d/%Y %I:%M %p",
    "%m/%d/%Y %I:%M:%S%p",
    "%m/%d/%Y %I:%M%p",
    "%m/%d/%Y %H:%M:%S",
    "%m/%d/%Y %H:%M",
    "%Y-%m-%d %I:%M:%S %p",
    "%Y-%m-%d %I:%M %p",
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%d %H:%M",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%dT%H:%M",
];

/// Date-only layouts, resolved to midnight
const DATE_FORMATS: &[&str] = &["%m/%d/%Y", "%Y-%m-%d"];

/// Format a date the way the feed's `Date` column writes it: `M/D/YYYY`
pub fn today_key(date: NaiveDate) -> String {
    format!("{}/{}/{}", date.month(), date.day(), date.year())
}

/// Current time in the dashboard timezone
pub fn local_now(tz: Tz, now: DateTime<Utc>) -> DateTime<Tz> {
    now.with_timezone(&tz)
}

/// Attach a timezone to a wall-clock time.
///
/// Ambiguous times (DST fall-back) take the earlier instant; times inside a
/// DST gap do not exist and yield `None`.
pub fn localize(tz: Tz, naive: &NaiveDateTime) -> Option<DateTime<Tz>> {
    match tz.from_local_datetime(naive) {
        chrono::LocalResult::Single(dt) => Some(dt),
        chrono::LocalResult::Ambiguous(earliest, _) => Some(earliest),
        chrono::LocalResult::None => None,
    }
}

/// Parse a schedule timestamp such as `10/19/2026 7:00:00 PM` in the given timezone
pub fn parse_timestamp(text: &str, tz: Tz) -> Option<DateTime<Tz>> {
    let text = text.split_whitespace().collect::<Vec<_>>().join(" ");
    if text.is_empty() {
        return None;
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(&text) {
        return Some(dt.with_timezone(&tz));
    }

    for format in DATE_TIME_FORMATS {
        if let Ok(naive) = NaiveDateTime::parse_from_str(&text, format) {
            return localize(tz, &naive);
        }
    }

    for format in DATE_FORMATS {
        if let Ok(date) = NaiveDate::parse_from_str(&text, format) {
            return localize(tz, &date.and_hms_opt(0, 0, 0)?);
        }
    }

    None
}

/// Clock display without seconds, e.g. `2:35 PM`
pub fn format_clock<T: TimeZone>(instant: &DateTime<T>) -> String
where
    T::Offset: std::fmt::Display,
{
    instant.format("%-I:%M %p").to_string()
}
