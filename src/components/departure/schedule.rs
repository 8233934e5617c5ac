use crate::components::event_feed::{Column, EventRecord};
use crate::utils::time::{parse_timestamp, today_key};
use chrono::{DateTime, NaiveDate};
use chrono_tz::Tz;
use tracing::debug;

/// Schedule column a start candidate came from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScheduleSource {
    EventStart,
    MealService,
    CocktailHour,
    PassedAppetizers,
}

impl ScheduleSource {
    pub fn column(self) -> Column {
        match self {
            ScheduleSource::EventStart => Column::EventStartTime,
            ScheduleSource::MealService => Column::MealServiceStartTime,
            ScheduleSource::CocktailHour => Column::CocktailHourStartTime,
            ScheduleSource::PassedAppetizers => Column::PassedAppetizersStartTime,
        }
    }
}

/// Fallback columns, in the order candidates are collected
const FALLBACK_SOURCES: [ScheduleSource; 3] = [
    ScheduleSource::MealService,
    ScheduleSource::CocktailHour,
    ScheduleSource::PassedAppetizers,
];

#[derive(Debug, Clone, Copy)]
struct ScheduleCandidate {
    source: ScheduleSource,
    instant: DateTime<Tz>,
}

/// Works out when today's event starts
#[derive(Debug, Clone, Copy)]
pub struct ScheduleResolver {
    today: NaiveDate,
    timezone: Tz,
}

impl ScheduleResolver {
    pub fn new(today: NaiveDate, timezone: Tz) -> Self {
        Self { today, timezone }
    }

    /// Start instant of the event, or `None` when no schedule column parses
    pub fn resolve(&self, record: &EventRecord) -> Option<DateTime<Tz>> {
        if let Some(start) = record.non_empty(Column::EventStartTime) {
            let text = if is_time_only(start) {
                self.on_today(start)
            } else {
                start.to_string()
            };

            if let Some(instant) = parse_timestamp(&text, self.timezone) {
                debug!("Start resolved from {}: {}", Column::EventStartTime.header(), instant);
                return Some(instant);
            }
            debug!("Unparseable {}: {:?}", Column::EventStartTime.header(), start);
        }

        let mut candidates: Vec<ScheduleCandidate> = FALLBACK_SOURCES
            .into_iter()
            .filter_map(|source| {
                let value = record.non_empty(source.column())?;
                let instant = parse_timestamp(&self.on_today(value), self.timezone)?;
                Some(ScheduleCandidate { source, instant })
            })
            .collect();

        if candidates.is_empty() {
            return None;
        }

        // Stable, so equal instants keep column order
        candidates.sort_by_key(|c| c.instant);
        let earliest = candidates[0];

        // Passed appetizers during cocktail hour still key off the cocktail start
        if earliest.source == ScheduleSource::CocktailHour && record.appetizers_passed() {
            debug!("Cocktail hour with passed appetizers starts at {}", earliest.instant);
            return Some(earliest.instant);
        }

        debug!(
            "Start resolved from {}: {}",
            earliest.source.column().header(),
            earliest.instant
        );
        Some(earliest.instant)
    }

    fn on_today(&self, time: &str) -> String {
        format!("{} {}", today_key(self.today), time)
    }
}

/// A cell is time-only unless its first token carries a date separator
fn is_time_only(value: &str) -> bool {
    value
        .split_whitespace()
        .next()
        .map_or(true, |token| !token.contains(['/', '-']))
}
