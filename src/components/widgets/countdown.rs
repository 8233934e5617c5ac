use super::display::{slots, DisplayPage};
use super::{SharedDeparture, WidgetServices};
use crate::config::Config;
use crate::error::BoardResult;
use crate::utils::scheduler::{refresh_job, RefreshHandle, RefreshScheduler};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use chrono_tz::Tz;
use rust_i18n::t;
use std::sync::Arc;
use tokio::sync::RwLock;
use tokio::time::Duration;

/// Time left until departure, e.g. `2h 14m 5s left`
pub fn countdown_text(departure: Option<DateTime<Tz>>, now: DateTime<Utc>) -> String {
    let Some(departure) = departure else {
        return t!("no_departure_time").to_string();
    };

    let remaining = departure.with_timezone(&Utc) - now;
    if remaining <= chrono::Duration::zero() {
        return t!("departed").to_string();
    }

    t!(
        "countdown_remaining",
        hours = remaining.num_hours(),
        minutes = remaining.num_minutes() % 60,
        seconds = remaining.num_seconds() % 60
    )
    .to_string()
}

/// Redraw the countdown from the shared departure instant
pub async fn run_cycle(page: &DisplayPage, departure: &SharedDeparture, now: DateTime<Utc>) {
    let text = countdown_text(departure.current().await, now);
    page.write(slots::COUNTDOWN, text).await;
}

/// Countdown-to-departure widget
pub struct CountdownWidget {
    page: DisplayPage,
    refresh: RwLock<Option<RefreshHandle>>,
}

impl Default for CountdownWidget {
    fn default() -> Self {
        Self::new()
    }
}

impl CountdownWidget {
    pub fn new() -> Self {
        Self {
            page: DisplayPage::new("countdown", &[slots::COUNTDOWN]),
            refresh: RwLock::new(None),
        }
    }

    pub fn page(&self) -> &DisplayPage {
        &self.page
    }
}

#[async_trait]
impl crate::components::Component for CountdownWidget {
    fn name(&self) -> &'static str {
        "countdown"
    }

    async fn init(&self, config: Arc<RwLock<Config>>, services: WidgetServices) -> BoardResult<()> {
        let (period, policy) = {
            let config = config.read().await;
            (
                Duration::from_secs(config.countdown_refresh_interval),
                config.refresh_policy,
            )
        };

        let page = self.page.clone();
        let departure = services.departure;
        let job = refresh_job(move || {
            let page = page.clone();
            let departure = departure.clone();
            async move {
                run_cycle(&page, &departure, Utc::now()).await;
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

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use chrono_tz::America::New_York;

    fn now() -> DateTime<Utc> {
        // 2:00 PM in New York
        Utc.with_ymd_and_hms(2026, 10, 19, 18, 0, 0).unwrap()
    }

    #[test]
    fn test_countdown_text() {
        let departure = New_York.with_ymd_and_hms(2026, 10, 19, 16, 14, 5).unwrap();
        assert_eq!(countdown_text(Some(departure), now()), "2h 14m 5s left");

        let soon = New_York.with_ymd_and_hms(2026, 10, 19, 14, 0, 59).unwrap();
        assert_eq!(countdown_text(Some(soon), now()), "0h 0m 59s left");
    }

    #[test]
    fn test_countdown_departed_and_missing() {
        let past = New_York.with_ymd_and_hms(2026, 10, 19, 14, 0, 0).unwrap();
        assert_eq!(countdown_text(Some(past), now()), "Departed!");
        assert_eq!(countdown_text(None, now()), "No valid departure time set.");
    }
}
