use std::sync::Arc;

use log::{error, info};
use tokio::net::TcpListener;

use bracketwiki::{build_router, AppState, Config, FilePageStore, Logger, TemplateComponent, WikiError};

#[tokio::main]
async fn main() -> Result<(), WikiError> {
    if let Err(e) = Logger::init() {
        eprintln!("Failed to initialize logger: {}", e);
    }

    let config = Config::from_env()?;
    let addr = config.socket_addr()?;

    std::fs::create_dir_all(&config.data_dir).inspect_err(|e| {
        error!("Cannot create data directory {:?}: {}", config.data_dir, e);
    })?;

    let templates = TemplateComponent::load(&config.template_dir)?;
    let store = FilePageStore::new(config.data_dir.clone());
    let state = AppState::new(Arc::new(store), templates);

    let app = build_router(state);

    info!("Wiki listening on http://{} (pages in {:?})", addr, config.data_dir);
    let listener = TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(WikiError::from)
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        error!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    info!("Shutting down");
}
