//! Start-time resolution and the departure rule.

pub mod calculator;
pub mod schedule;
pub mod travel_time;

pub use calculator::{
    extra_guest_buffer, parse_guest_count, DepartureCalculator, DepartureResult,
    BASELINE_MINUTES, DEFAULT_BASE_BUFFER_MINUTES,
};
pub use schedule::{ScheduleResolver, ScheduleSource};
pub use travel_time::{parse_travel_minutes, TravelEstimate};
