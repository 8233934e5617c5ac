use super::travel_time::parse_travel_minutes;
use crate::utils::time::format_clock;
use chrono::{DateTime, Duration};
use chrono_tz::Tz;
use tracing::warn;

/// Fixed setup lead time before every event, in minutes
pub const BASELINE_MINUTES: i64 = 120;

/// Buffer added on top of travel time unless configured otherwise
pub const DEFAULT_BASE_BUFFER_MINUTES: i64 = 5;

/// Guest count above which extra setup time kicks in
const GUEST_THRESHOLD: i64 = 100;
/// Size of each guest block past the threshold
const GUEST_BLOCK: i64 = 50;
/// Minutes per started guest block
const MINUTES_PER_BLOCK: i64 = 15;

/// Suggested departure
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DepartureResult {
    pub instant: DateTime<Tz>,
    /// Clock time without seconds, e.g. `2:35 PM`
    pub display: String,
}

/// Turns a start instant and travel estimate into a departure time
#[derive(Debug, Clone, Copy)]
pub struct DepartureCalculator {
    base_buffer_minutes: i64,
}

impl Default for DepartureCalculator {
    fn default() -> Self {
        Self::new(DEFAULT_BASE_BUFFER_MINUTES)
    }
}

impl DepartureCalculator {
    pub fn new(base_buffer_minutes: i64) -> Self {
        Self { base_buffer_minutes }
    }

    /// Total minutes to leave before the start, `None` if the sum overflows
    pub fn lead_minutes(&self, travel_minutes: u32, guest_count: i64) -> Option<i64> {
        BASELINE_MINUTES
            .checked_add(i64::from(travel_minutes))?
            .checked_add(self.base_buffer_minutes)?
            .checked_add(extra_guest_buffer(guest_count))
    }

    /// Departure for an event, or `None` unless both the start and a
    /// non-empty travel estimate are known
    pub fn calculate(
        &self,
        start: Option<DateTime<Tz>>,
        travel: Option<&str>,
        guest_count: i64,
    ) -> Option<DepartureResult> {
        let start = start?;
        let travel = travel.map(str::trim).filter(|t| !t.is_empty())?;

        let lead = self.lead_minutes(parse_travel_minutes(travel), guest_count);
        let instant = lead
            .and_then(Duration::try_minutes)
            .and_then(|lead| start.checked_sub_signed(lead));
        let Some(instant) = instant else {
            warn!("Departure lead time out of range for guest count {}", guest_count);
            return None;
        };

        Some(DepartureResult {
            display: format_clock(&instant),
            instant,
        })
    }
}

/// 15 minutes for every started block of 50 guests beyond 100
pub fn extra_guest_buffer(guest_count: i64) -> i64 {
    if guest_count <= GUEST_THRESHOLD {
        return 0;
    }
    let over = guest_count - GUEST_THRESHOLD;
    let blocks = over / GUEST_BLOCK + i64::from(over % GUEST_BLOCK != 0);
    blocks.saturating_mul(MINUTES_PER_BLOCK)
}

/// Guest count from its cell: leading digits, anything else is zero
pub fn parse_guest_count(text: &str) -> i64 {
    let text = text.trim();
    let (sign, digits) = match text.strip_prefix('-') {
        Some(rest) => (-1, rest),
        None => (1, text.strip_prefix('+').unwrap_or(text)),
    };

    let end = digits
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(digits.len());

    digits[..end].parse::<i64>().map(|n| sign * n).unwrap_or(0)
}
