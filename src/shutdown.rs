use crate::components::redis_service::RedisActorHandle;
use crate::components::ComponentManager;
use std::sync::Arc;
use tokio::sync::oneshot;
use tracing::{error, info};

#[cfg(unix)]
use tokio::signal::unix::{signal, SignalKind};
#[cfg(windows)]
use tokio::signal::windows::{ctrl_break, ctrl_c};

/// Stop the dashboard once the process is asked to exit
pub async fn handle_signals(
    dashboard_stopped: oneshot::Sender<()>,
    widgets: Arc<ComponentManager>,
    estimate_store: Option<RedisActorHandle>,
) {
    let signal_name = wait_for_signal().await;
    info!("{} received, stopping dashboard", signal_name);

    stop_dashboard(&widgets, estimate_store).await;
    let _ = dashboard_stopped.send(());
}

/// Stop widget refresh loops, then the Redis estimate actor.
///
/// Widgets go first so no cycle writes to the estimate store after its actor
/// has gone away. Cycles already running finish on their own.
pub async fn stop_dashboard(widgets: &ComponentManager, estimate_store: Option<RedisActorHandle>) {
    if let Err(e) = widgets.shutdown_all().await {
        error!("Failed to stop widget refresh loops: {:?}", e);
    } else {
        info!("Widget refresh loops stopped");
    }

    // Only present when the estimate is shared through Redis
    if let Some(store) = estimate_store {
        match store.shutdown().await {
            Ok(()) => info!("Estimate store actor stopped"),
            Err(e) => error!("Failed to stop estimate store actor: {:?}", e),
        }
    }
}

/// Wait for SIGTERM or SIGINT and return which one arrived
#[cfg(unix)]
async fn wait_for_signal() -> &'static str {
    let mut terminate = signal(SignalKind::terminate()).expect("SIGTERM handler");
    let mut interrupt = signal(SignalKind::interrupt()).expect("SIGINT handler");

    tokio::select! {
        _ = terminate.recv() => "SIGTERM",
        _ = interrupt.recv() => "SIGINT",
    }
}

/// Wait for Ctrl+C or Ctrl+Break and return which one arrived
#[cfg(windows)]
async fn wait_for_signal() -> &'static str {
    let mut ctrlc = ctrl_c().expect("Ctrl+C handler");
    let mut ctrlbreak = ctrl_break().expect("Ctrl+Break handler");

    tokio::select! {
        _ = ctrlc.recv() => "Ctrl+C",
        _ = ctrlbreak.recv() => "Ctrl+Break",
    }
}
