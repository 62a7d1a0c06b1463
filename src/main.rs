extern crate chrono;
extern crate tokio;

use std::sync::Arc;

use anyhow::Result;
use log::{error, info};

use anandam::config;
use anandam::logger::setup_logger;
use anandam::store::StoreClient;
use anandam::web::{start_http_server, AppState};

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logger
    setup_logger()?;

    let config = Arc::new(config::read_config()?);
    let store = Arc::new(StoreClient::new(&config)?);

    info!("serving listings backed by {}", config.store_url);

    let (shutdown_tx, shutdown_rx) = tokio::sync::broadcast::channel(1);

    let state = AppState {
        config: Arc::clone(&config),
        store,
    };
    let server_handle = tokio::task::spawn(start_http_server(state, shutdown_rx));

    let signal_handle = tokio::task::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            info!("shutdown signal received");
            let _ = shutdown_tx.send(());
        }
    });

    if let Err(err) = tokio::try_join!(server_handle, signal_handle) {
        error!("Error: {:?}", err)
    }

    Ok(())
}
