use super::display::{slots, DisplayPage};
use super::pipeline::EventPipeline;
use super::{SharedDeparture, WidgetServices};
use crate::components::departure::DepartureCalculator;
use crate::components::event_feed::{Column, EventRecord};
use crate::config::Config;
use crate::error::BoardResult;
use crate::utils::scheduler::{refresh_job, RefreshHandle, RefreshScheduler};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use lazy_static::lazy_static;
use regex::Regex;
use rust_i18n::t;
use std::sync::Arc;
use tokio::sync::RwLock;
use tokio::time::Duration;
use tracing::{error, info, warn};

lazy_static! {
    /// Seconds in a clock time such as `9:30:00 PM`
    static ref ZERO_SECONDS_RE: Regex =
        Regex::new(r"(?i):00(\s*[AP]M)").expect("valid seconds regex");
}

/// Text shown on the event banner
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BannerFields {
    pub event_name: String,
    pub guest_count: String,
    pub end_time: String,
}

impl BannerFields {
    pub fn from_record(record: &EventRecord) -> Self {
        let name = record
            .non_empty(Column::EventName)
            .map(String::from)
            .unwrap_or_else(|| t!("no_event_name").to_string());
        let venue = record
            .non_empty(Column::VenueName)
            .map(String::from)
            .unwrap_or_else(|| t!("no_venue").to_string());

        let end_time = match record.non_empty(Column::EventConclusionTime) {
            Some(end) => ZERO_SECONDS_RE.replace(end, "$1").into_owned(),
            None => t!("end_time_tbd").to_string(),
        };

        Self {
            event_name: format!("{} | {}", name, venue),
            guest_count: record.non_empty(Column::GuestCount).unwrap_or("0").to_string(),
            end_time,
        }
    }
}

/// One banner refresh: today's name, guests, end time and departure
pub async fn run_cycle(
    pipeline: &EventPipeline,
    page: &DisplayPage,
    departure: &SharedDeparture,
    now: DateTime<Utc>,
) {
    let outcome = pipeline.run_cycle(now).await;

    let Some(event) = &outcome.event else {
        warn!("No row found for today's date");
        return;
    };

    let fields = BannerFields::from_record(event);
    page.write(slots::EVENT_NAME, fields.event_name).await;
    page.write(slots::GUEST_COUNT, fields.guest_count).await;
    page.write(slots::END_TIME, fields.end_time).await;

    match outcome.departure {
        Some(result) => {
            page.write(slots::DEPARTURE_TIME, result.display.as_str()).await;
            departure.publish(result.instant).await;
        }
        None if outcome.start.is_none() => error!("No valid event start time found"),
        None => error!("No travel time available"),
    }
}

/// Event banner widget
pub struct BannerWidget {
    page: DisplayPage,
    refresh: RwLock<Option<RefreshHandle>>,
}

impl Default for BannerWidget {
    fn default() -> Self {
        Self::new()
    }
}

impl BannerWidget {
    pub fn new() -> Self {
        Self {
            page: DisplayPage::new(
                "banner",
                &[
                    slots::EVENT_NAME,
                    slots::GUEST_COUNT,
                    slots::END_TIME,
                    slots::DEPARTURE_TIME,
                ],
            ),
            refresh: RwLock::new(None),
        }
    }

    pub fn page(&self) -> &DisplayPage {
        &self.page
    }
}

#[async_trait]
impl crate::components::Component for BannerWidget {
    fn name(&self) -> &'static str {
        "banner"
    }

    async fn init(&self, config: Arc<RwLock<Config>>, services: WidgetServices) -> BoardResult<()> {
        let (timezone, period, policy, calculator) = {
            let config = config.read().await;
            (
                config.tz()?,
                Duration::from_secs(config.data_refresh_interval),
                config.refresh_policy,
                DepartureCalculator::new(config.base_buffer_minutes),
            )
        };

        let pipeline = Arc::new(EventPipeline::new(
            services.feed,
            services.store,
            calculator,
            timezone,
        ));
        let page = self.page.clone();
        let departure = services.departure;

        let job = refresh_job(move || {
            let pipeline = Arc::clone(&pipeline);
            let page = page.clone();
            let departure = departure.clone();
            async move {
                info!("Refreshing banner");
                run_cycle(&pipeline, &page, &departure, Utc::now()).await;
            }
        });

        let handle = RefreshScheduler::new(self.name(), period, policy).start(job);
        *self.refresh.write().await = Some(handle);
        Ok(())
    }

    async fn shutdown(&self) -> BoardResult<()> {
        if let Some(handle) = self.refresh.write().await.take() {
            handle.stop();
        }
        Ok(())
    }

    fn as_any(&self) -> &dyn std::any::Any {
        self
    }
}
