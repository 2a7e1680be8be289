pub mod api;
pub mod auth;
pub mod config;
pub mod errors;
pub mod forwarder;

use std::sync::Arc;

use axum::{
    routing::{get, post},
    Router,
};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::auth::TokenIssuer;
use crate::config::ServerConfig;
use crate::errors::ServerResult;
use crate::forwarder::UserForwarder;

/// Per-process collaborators handed to every request. Nothing in here is
/// mutated after startup.
#[derive(Clone, Debug)]
pub struct AppState {
    pub tokens: TokenIssuer,
    pub forwarder: UserForwarder,
}

impl AppState {
    pub fn new(tokens: TokenIssuer, forwarder: UserForwarder) -> Self {
        Self { tokens, forwarder }
    }

    pub fn from_config(config: &ServerConfig) -> ServerResult<Self> {
        config.validate()?;
        let tokens = TokenIssuer::new(config.jwt_secret.as_bytes())?;
        let forwarder = UserForwarder::new(
            config.graphql_endpoint.clone(),
            config.graphql_admin_secret.clone(),
            config.graphql_timeout(),
        )?;
        Ok(Self::new(tokens, forwarder))
    }
}

pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/signup", post(api::signup))
        .route("/health", get(|| async { "OK" }))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
