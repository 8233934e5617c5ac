//! Stand-ins for the feed and routing services used by the integration tests.
#![allow(dead_code)]

use async_trait::async_trait;
use chrono::{DateTime, TimeZone, Utc};
use eventboard::components::event_feed::FeedSource;
use eventboard::components::routing::{Coordinates, RouteLookup};
use eventboard::error::{routing_error, BoardResult};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use tokio::sync::RwLock;

/// Header row of the published feed
pub const HEADER: &str = "Date,Event Name,Venue Name,Guest Count,Event Start Time,Meal Service Start Time,Cocktail Hour Start Time,Passed Hors D'oeuvres Time Start,Passed Hors D'oeuvres,Event Conclusion/Breakdown Time,Address,City,State,Zipcode";

/// Noon in New York on the day the sample feed is about
pub fn noon() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 10, 19, 16, 0, 0).unwrap()
}

/// A feed with an older event, a superseded row for today and today's final row
pub fn sample_feed() -> String {
    [
        HEADER,
        "10/18/2026,Jones Party,Old Mill,80,5:00:00 PM,,,,no,9:00:00 PM,1 Mill St,Columbia,SC,29201",
        "10/19/2026,Draft Row,Nowhere,10,3:00:00 PM,,,,no,,,,,",
        "10/19/2026,\"Smith Wedding, Reception\",Riverside Barn,120,6:00:00 PM,,,,no,11:00:00 PM,\"12 River Rd\",Chapin,SC,29036",
    ]
    .join("\n")
}

/// Feed transport returning fixed text, changeable between cycles
#[derive(Debug, Clone, Default)]
pub struct StaticFeed {
    text: Arc<RwLock<String>>,
    fetches: Arc<AtomicUsize>,
}

impl StaticFeed {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: Arc::new(RwLock::new(text.into())),
            fetches: Arc::new(AtomicUsize::new(0)),
        }
    }

    pub async fn replace(&self, text: impl Into<String>) {
        *self.text.write().await = text.into();
    }

    pub fn fetches(&self) -> usize {
        self.fetches.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl FeedSource for StaticFeed {
    async fn fetch_text(&self) -> String {
        self.fetches.fetch_add(1, Ordering::SeqCst);
        self.text.read().await.clone()
    }
}

/// Routing service with a scripted answer
#[derive(Debug, Clone)]
pub struct ScriptedRoutes {
    /// Addresses containing this text cannot be geocoded
    pub unknown_marker: &'static str,
    /// Drive time, or the error message the service reports
    pub travel: Result<String, String>,
}

impl ScriptedRoutes {
    pub fn answering(travel: &str) -> Self {
        Self {
            unknown_marker: "Nowhere",
            travel: Ok(travel.to_string()),
        }
    }

    pub fn failing(message: &str) -> Self {
        Self {
            unknown_marker: "Nowhere",
            travel: Err(message.to_string()),
        }
    }
}

#[async_trait]
impl RouteLookup for ScriptedRoutes {
    async fn geocode(&self, address: &str) -> BoardResult<Option<Coordinates>> {
        if address.contains(self.unknown_marker) {
            return Ok(None);
        }
        Ok(Some(Coordinates {
            latitude: 34.0,
            longitude: -81.0,
        }))
    }

    async fn travel_time(&self, _origin: Coordinates, _destination: Coordinates) -> BoardResult<String> {
        self.travel.clone().map_err(|message| routing_error(&message))
    }

    fn map_embed_url(&self, origin: &str, destination: &str) -> Option<String> {
        Some(format!("map://{}->{}", origin, destination))
    }
}
