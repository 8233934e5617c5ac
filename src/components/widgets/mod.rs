//! Dashboard widgets. Each one drives the shared pipeline on its own
//! schedule and only differs in what it renders.

pub mod banner;
pub mod countdown;
pub mod display;
pub mod pipeline;
pub mod travel;

pub use banner::BannerWidget;
pub use countdown::CountdownWidget;
pub use display::{slots, DisplayPage};
pub use pipeline::{evaluate, CycleOutcome, EventPipeline};
pub use travel::{TravelContext, TravelWidget};

use crate::components::estimate_store::EstimateStore;
use crate::components::event_feed::FeedSource;
use crate::components::routing::RouteLookup;
use chrono::DateTime;
use chrono_tz::Tz;
use std::sync::Arc;
use tokio::sync::RwLock;

/// Departure instant handed from the banner to the countdown
#[derive(Debug, Clone, Default)]
pub struct SharedDeparture {
    instant: Arc<RwLock<Option<DateTime<Tz>>>>,
}

impl SharedDeparture {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn publish(&self, instant: DateTime<Tz>) {
        *self.instant.write().await = Some(instant);
    }

    pub async fn current(&self) -> Option<DateTime<Tz>> {
        *self.instant.read().await
    }
}

/// Collaborators handed to every widget at startup
#[derive(Clone)]
pub struct WidgetServices {
    pub feed: Arc<dyn FeedSource>,
    pub store: Arc<dyn EstimateStore>,
    /// Absent when no routing key is configured
    pub routes: Option<Arc<dyn RouteLookup>>,
    pub departure: SharedDeparture,
}
