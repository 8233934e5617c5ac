use lazy_static::lazy_static;
use regex::Regex;
use serde::{Deserialize, Serialize};

lazy_static! {
    static ref HOURS_RE: Regex = Regex::new(r"(?i)(\d+)\s*hr").expect("valid hours regex");
    static ref MINUTES_RE: Regex = Regex::new(r"(?i)(\d+)\s*min").expect("valid minutes regex");
}

/// Total minutes in a duration such as `1 hr 5 min` or `45 min`.
///
/// Missing parts count as zero, so unrecognised text is zero minutes.
pub fn parse_travel_minutes(text: &str) -> u32 {
    let capture = |re: &Regex| {
        re.captures(text)
            .and_then(|caps| caps[1].parse::<u32>().ok())
            .unwrap_or(0)
    };

    capture(&HOURS_RE)
        .saturating_mul(60)
        .saturating_add(capture(&MINUTES_RE))
}

/// Latest travel-time lookup result
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TravelEstimate {
    /// Text as shown on the ETA widget
    pub display: String,
    /// Minutes parsed from `display`
    pub minutes: u32,
}

impl TravelEstimate {
    pub fn from_display(display: impl Into<String>) -> Self {
        let display = display.into();
        let minutes = parse_travel_minutes(&display);
        Self { display, minutes }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_travel_minutes() {
        assert_eq!(parse_travel_minutes("1 hr 5 min"), 65);
        assert_eq!(parse_travel_minutes("45 min"), 45);
        assert_eq!(parse_travel_minutes("3 min"), 3);
        assert_eq!(parse_travel_minutes("2 hr"), 120);
        assert_eq!(parse_travel_minutes("1hr 10mins"), 70);
        assert_eq!(parse_travel_minutes("1 HR 5 MIN"), 65);
    }

    #[test]
    fn test_malformed_is_zero() {
        assert_eq!(parse_travel_minutes("garbage"), 0);
        assert_eq!(parse_travel_minutes(""), 0);
        assert_eq!(parse_travel_minutes("2 hours"), 0);
        assert_eq!(parse_travel_minutes("99999999999 min"), 0);
    }

    #[test]
    fn test_estimate_from_display() {
        let estimate = TravelEstimate::from_display("1 hr 20 min");
        assert_eq!(estimate.display, "1 hr 20 min");
        assert_eq!(estimate.minutes, 80);
    }
}
