pub mod error;
pub mod models;
pub mod modules;
pub mod proxy; // Journal entry proxy service
pub mod utils;

use tracing::info;

pub use models::Settings;
pub use proxy::{build_router, AppState, AxumServer};

/// Load settings, start the server and run until Ctrl-C
pub async fn run() -> anyhow::Result<()> {
    let settings = modules::load_settings()?;

    // Keep the file writer alive for the whole run
    let _log_guard = modules::init_logger(&settings.log_level, settings.log_dir.as_deref());

    info!(
        environment = %settings.environment,
        mock_auth = settings.use_mock_auth,
        mock_sap = settings.use_mock_sap,
        attachments = settings.enable_attachment,
        "Starting journal entry proxy"
    );

    let state = AppState::new(settings)?;
    let (server, handle) = AxumServer::start(state).await?;

    tokio::signal::ctrl_c().await?;
    info!("Shutdown signal received");

    server.stop();
    handle.await?;

    Ok(())
}
