use std::sync::Arc;

use clap::Parser;
use signup_server::{config::ServerConfig, errors::ServerResult, router, AppState};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> ServerResult<()> {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("signup_server=debug,tower_http=debug"));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let config = ServerConfig::parse();
    tracing::debug!(?config, "Loaded configuration");

    let app_state = match AppState::from_config(&config) {
        Ok(state) => Arc::new(state),
        Err(e) => {
            tracing::error!(%e, "Invalid configuration");
            return Err(e);
        }
    };

    let addr = config.bind_address.clone();
    tracing::info!("Starting signup server on {}, forwarding users to {}", addr, app_state.forwarder.endpoint());

    let listener = match tokio::net::TcpListener::bind(&addr).await {
        Ok(listener) => listener,
        Err(e) => {
            tracing::error!(%e, addr=%addr);
            return Err(e.into());
        }
    };
    if let Err(e) = axum::serve(listener, router(app_state)).await {
        tracing::error!(%e, addr=%addr);
        return Err(e.into());
    }

    Ok(())
}
