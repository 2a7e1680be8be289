use std::time::Duration;

use clap::Parser;
use url::Url;

use crate::errors::{ServerError, ServerResult};

/// Runtime settings. Every flag falls back to the environment variable of
/// the same name.
#[derive(Parser, Clone)]
#[command(name = "signup-server", about = "Signup endpoint backed by a GraphQL user store")]
pub struct ServerConfig {
    #[arg(long, env = "BIND_ADDRESS", default_value = "0.0.0.0:8080")]
    pub bind_address: String,

    /// GraphQL endpoint that receives the user-creation mutation.
    #[arg(long, env = "GRAPHQL_ENDPOINT")]
    pub graphql_endpoint: Url,

    #[arg(long, env = "GRAPHQL_ADMIN_SECRET")]
    pub graphql_admin_secret: Option<String>,

    #[arg(long, env = "GRAPHQL_TIMEOUT_SECS", default_value_t = 10)]
    pub graphql_timeout_secs: u64,

    /// HS256 key for session tokens.
    #[arg(long, env = "JWT_SECRET", hide_env_values = true)]
    pub jwt_secret: String,
}

impl ServerConfig {
    pub fn graphql_timeout(&self) -> Duration {
        Duration::from_secs(self.graphql_timeout_secs)
    }

    /// Reject settings that parse but cannot work.
    pub fn validate(&self) -> ServerResult<()> {
        if self.jwt_secret.trim().is_empty() {
            return Err(ServerError::Config("JWT_SECRET must not be empty".to_string()));
        }
        if !matches!(self.graphql_endpoint.scheme(), "http" | "https") {
            return Err(ServerError::Config(format!(
                "GRAPHQL_ENDPOINT must be an http(s) URL, got {}",
                self.graphql_endpoint
            )));
        }
        if self.graphql_timeout_secs == 0 {
            return Err(ServerError::Config(
                "GRAPHQL_TIMEOUT_SECS must be at least 1".to_string(),
            ));
        }
        Ok(())
    }
}

impl std::fmt::Debug for ServerConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ServerConfig")
            .field("bind_address", &self.bind_address)
            .field("graphql_endpoint", &self.graphql_endpoint.as_str())
            .field(
                "graphql_admin_secret",
                &self.graphql_admin_secret.as_ref().map(|_| "<redacted>"),
            )
            .field("graphql_timeout_secs", &self.graphql_timeout_secs)
            .field("jwt_secret", &"<redacted>")
            .finish()
    }
}
