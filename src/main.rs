use eventboard::startup;
use tracing::info;

#[tokio::main]
async fn main() -> miette::Result<()> {
    // Initialize logging
    startup::init_logging()?;

    info!("Starting eventboard");

    // Load configuration
    let config = startup::load_config().await?;

    // Run the widgets until shutdown
    startup::start_dashboard(config).await
}
