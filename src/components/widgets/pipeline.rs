use crate::components::departure::{
    parse_guest_count, DepartureCalculator, DepartureResult, ScheduleResolver, TravelEstimate,
};
use crate::components::estimate_store::EstimateStore;
use crate::components::event_feed::{parse_feed, select_today, Column, EventRecord, FeedSource};
use crate::utils::time::local_now;
use chrono::{DateTime, Utc};
use chrono_tz::Tz;
use std::sync::Arc;
use tracing::{debug, error};

/// What one refresh cycle worked out
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CycleOutcome {
    /// Today's row, if the feed has one
    pub event: Option<EventRecord>,
    /// Resolved start of today's event
    pub start: Option<DateTime<Tz>>,
    /// Suggested departure, when both start and travel estimate are known
    pub departure: Option<DepartureResult>,
}

/// Run the shared decision logic over one feed snapshot
pub fn evaluate(
    feed_text: &str,
    now: DateTime<Tz>,
    estimate: Option<&TravelEstimate>,
    calculator: &DepartureCalculator,
) -> CycleOutcome {
    let today = now.date_naive();
    let records = parse_feed(feed_text);

    let Some(event) = select_today(&records, today).cloned() else {
        return CycleOutcome::default();
    };

    let start = ScheduleResolver::new(today, now.timezone()).resolve(&event);
    let guest_count = parse_guest_count(event.get(Column::GuestCount).unwrap_or(""));
    let departure = calculator.calculate(start, estimate.map(|e| e.display.as_str()), guest_count);
    debug!("Cycle resolved start {:?}, departure {:?}", start, departure);

    CycleOutcome {
        event: Some(event),
        start,
        departure,
    }
}

/// Feed, shared estimate and departure rule, shared by every widget
pub struct EventPipeline {
    feed: Arc<dyn FeedSource>,
    store: Arc<dyn EstimateStore>,
    calculator: DepartureCalculator,
    timezone: Tz,
}

impl EventPipeline {
    pub fn new(
        feed: Arc<dyn FeedSource>,
        store: Arc<dyn EstimateStore>,
        calculator: DepartureCalculator,
        timezone: Tz,
    ) -> Self {
        Self {
            feed,
            store,
            calculator,
            timezone,
        }
    }

    pub fn store(&self) -> &Arc<dyn EstimateStore> {
        &self.store
    }

    pub fn timezone(&self) -> Tz {
        self.timezone
    }

    /// Today's row from a fresh fetch
    pub async fn fetch_today(&self, now: DateTime<Utc>) -> Option<EventRecord> {
        let text = self.feed.fetch_text().await;
        let today = local_now(self.timezone, now).date_naive();
        select_today(&parse_feed(&text), today).cloned()
    }

    /// Fetch the feed and the shared estimate, then evaluate
    pub async fn run_cycle(&self, now: DateTime<Utc>) -> CycleOutcome {
        let text = self.feed.fetch_text().await;

        let estimate = match self.store.get().await {
            Ok(estimate) => estimate,
            Err(e) => {
                error!("Failed to read travel estimate: {}", e);
                None
            }
        };

        evaluate(&text, local_now(self.timezone, now), estimate.as_ref(), &self.calculator)
    }
}
