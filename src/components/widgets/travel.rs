use super::display::{slots, DisplayPage};
use super::pipeline::EventPipeline;
use super::WidgetServices;
use crate::components::departure::{DepartureCalculator, TravelEstimate};
use crate::components::routing::{Coordinates, RouteLookup};
use crate::config::Config;
use crate::error::{component_error, BoardResult};
use crate::utils::scheduler::{refresh_job, RefreshHandle, RefreshScheduler};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use rust_i18n::t;
use std::sync::Arc;
use tokio::sync::RwLock;
use tokio::time::Duration;
use tracing::{error, info};

/// Everything a travel refresh needs
pub struct TravelContext {
    pub pipeline: EventPipeline,
    pub routes: Arc<dyn RouteLookup>,
    pub origin_address: String,
}

async fn locate(routes: &dyn RouteLookup, address: &str) -> Option<Coordinates> {
    match routes.geocode(address).await {
        Ok(location) => location,
        Err(e) => {
            error!("Geocoding failed for {}: {}", address, e);
            None
        }
    }
}

/// One travel refresh: look up the drive time to today's venue and share it
pub async fn run_cycle(ctx: &TravelContext, page: &DisplayPage, now: DateTime<Utc>) {
    let store = ctx.pipeline.store();

    let Some(event) = ctx.pipeline.fetch_today(now).await else {
        page.write(slots::ETA, t!("no_event_today")).await;
        page.write(slots::MAP_FRAME, "").await;
        if let Err(e) = store.clear().await {
            error!("Failed to clear travel estimate: {}", e);
        }
        return;
    };

    let destination = event.destination_address();
    let (origin_coords, destination_coords) = tokio::join!(
        locate(ctx.routes.as_ref(), &ctx.origin_address),
        locate(ctx.routes.as_ref(), &destination)
    );

    let (Some(origin_coords), Some(destination_coords)) = (origin_coords, destination_coords) else {
        page.write(slots::ETA, t!("address_not_found")).await;
        page.write(slots::MAP_FRAME, "").await;
        return;
    };

    match ctx.routes.travel_time(origin_coords, destination_coords).await {
        Ok(travel_time) => {
            page.write(slots::ETA, travel_time.as_str()).await;
            if let Err(e) = store.set(TravelEstimate::from_display(travel_time)).await {
                error!("Failed to share travel estimate: {}", e);
            }
        }
        Err(e) => {
            error!("Travel time lookup failed: {}", e);
            page.write(slots::ETA, e.to_string()).await;
        }
    }

    let map_url = ctx
        .routes
        .map_embed_url(&ctx.origin_address, &destination)
        .unwrap_or_default();
    page.write(slots::MAP_FRAME, map_url).await;
}

/// Map and ETA widget
pub struct TravelWidget {
    page: DisplayPage,
    refresh: RwLock<Option<RefreshHandle>>,
}

impl Default for TravelWidget {
    fn default() -> Self {
        Self::new()
    }
}

impl TravelWidget {
    pub fn new() -> Self {
        Self {
            page: DisplayPage::new("travel", &[slots::ETA, slots::MAP_FRAME]),
            refresh: RwLock::new(None),
        }
    }

    pub fn page(&self) -> &DisplayPage {
        &self.page
    }
}

#[async_trait]
impl crate::components::Component for TravelWidget {
    fn name(&self) -> &'static str {
        "travel"
    }

    async fn init(&self, config: Arc<RwLock<Config>>, services: WidgetServices) -> BoardResult<()> {
        let routes = services
            .routes
            .ok_or_else(|| component_error("Travel widget needs GOOGLE_API_KEY"))?;

        let (timezone, period, policy, calculator, origin_address) = {
            let config = config.read().await;
            (
                config.tz()?,
                Duration::from_secs(config.data_refresh_interval),
                config.refresh_policy,
                DepartureCalculator::new(config.base_buffer_minutes),
                config.origin_address.clone(),
            )
        };

        let ctx = Arc::new(TravelContext {
            pipeline: EventPipeline::new(services.feed, services.store, calculator, timezone),
            routes,
            origin_address,
        });
        let page = self.page.clone();

        let job = refresh_job(move || {
            let ctx = Arc::clone(&ctx);
            let page = page.clone();
            async move {
                info!("Refreshing travel estimate");
                run_cycle(&ctx, &page, Utc::now()).await;
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
