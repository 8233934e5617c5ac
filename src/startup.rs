use crate::components::estimate_store::{EstimateStore, MemoryEstimateStore};
use crate::components::event_feed::HttpFeedSource;
use crate::components::redis_service::{RedisActor, RedisActorHandle};
use crate::components::routing::{GoogleRoutesClient, RouteLookup};
use crate::components::widgets::{BannerWidget, CountdownWidget, SharedDeparture, TravelWidget};
use crate::components::{ComponentManager, WidgetServices};
use crate::config::Config;
use crate::error::{BoardResult, Error};
use crate::shutdown;
use std::sync::Arc;
use tokio::sync::{oneshot, RwLock};
use tracing::{error, info, warn};
use tracing_subscriber::{EnvFilter, FmtSubscriber};

/// Initialize logging with environment-based configuration
pub fn init_logging() -> miette::Result<()> {
    let subscriber = FmtSubscriber::builder()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("info,reqwest=warn,hyper=warn,redis=warn")),
        )
        .finish();

    tracing::subscriber::set_global_default(subscriber)
        .map_err(|e| Error::Other(format!("Failed to set up logging: {}", e)))?;

    Ok(())
}

/// Load and initialize the application config
pub async fn load_config() -> miette::Result<Arc<RwLock<Config>>> {
    match Config::load() {
        Ok(config) => Ok(Arc::new(RwLock::new(config))),
        Err(e) => {
            error!("Failed to load configuration: {:?}", e);
            Err(e.into())
        }
    }
}

/// Pick the shared estimate backend; Redis when configured
fn start_estimate_store(
    redis_url: Option<&str>,
) -> BoardResult<(Arc<dyn EstimateStore>, Option<RedisActorHandle>)> {
    match redis_url {
        Some(url) => {
            let (mut redis_actor, redis_handle) = RedisActor::new(url)?;

            // Spawn Redis actor task
            tokio::spawn(async move {
                redis_actor.run().await;
            });

            info!("Sharing travel estimate through Redis");
            Ok((Arc::new(redis_handle.clone()), Some(redis_handle)))
        }
        None => {
            info!("Sharing travel estimate in memory");
            Ok((Arc::new(MemoryEstimateStore::new()), None))
        }
    }
}

/// Build the widget collaborators from the config
pub async fn build_services(
    config: &Config,
) -> BoardResult<(WidgetServices, Option<RedisActorHandle>)> {
    let feed = Arc::new(HttpFeedSource::new(&config.feed_url)?);
    let (store, redis_handle) = start_estimate_store(config.redis_url.as_deref())?;

    let routes: Option<Arc<dyn RouteLookup>> = match &config.google_api_key {
        Some(key) => Some(Arc::new(GoogleRoutesClient::new(key.clone()))),
        None => {
            warn!("GOOGLE_API_KEY not set, travel estimates are unavailable");
            None
        }
    };

    let services = WidgetServices {
        feed,
        store,
        routes,
        departure: SharedDeparture::new(),
    };

    Ok((services, redis_handle))
}

/// Start every widget and run until a shutdown signal arrives
pub async fn start_dashboard(config: Arc<RwLock<Config>>) -> miette::Result<()> {
    // Set locale from config
    {
        let config_read = config.read().await;
        crate::utils::i18n::set_locale(&config_read.locale);
        info!("Setting locale to {}", config_read.locale);
    }

    let (services, redis_handle) = {
        let config_read = config.read().await;
        build_services(&config_read).await?
    };

    // Initialize component manager
    let mut component_manager = ComponentManager::new(Arc::clone(&config));
    component_manager.register(BannerWidget::new());
    component_manager.register(TravelWidget::new());
    component_manager.register(CountdownWidget::new());

    let component_manager = Arc::new(component_manager);
    component_manager.init_all(services).await?;

    // Create shutdown channel
    let (shutdown_send, shutdown_recv) = oneshot::channel();

    // Spawn signal handler task
    let shutdown_components = Arc::clone(&component_manager);
    tokio::spawn(async move {
        shutdown::handle_signals(shutdown_send, shutdown_components, redis_handle).await;
    });

    info!("Dashboard running");
    let _ = shutdown_recv.await;
    info!("Received shutdown signal, dashboard stopped");

    Ok(())
}
