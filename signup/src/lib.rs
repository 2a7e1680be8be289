//! Signup - user registration endpoint
//!
//! This crate provides a unified API for the signup service: the wire
//! models, the axum router and its collaborators.
//!
//! # Example
//!
//! ```ignore
//! use signup::{router, AppState, ServerConfig};
//!
//! let config = ServerConfig::parse();
//! let app = router(Arc::new(AppState::from_config(&config)?));
//! axum::serve(listener, app).await?;
//! ```

// Re-export server types
pub use signup_server::auth::TokenIssuer;
pub use signup_server::config::ServerConfig;
pub use signup_server::errors::{ApiError, ErrResponse, ServerError, ServerResult};
pub use signup_server::forwarder::UserForwarder;
pub use signup_server::{router, AppState};

// Re-export core types that external applications may need
pub use signup_core::errors::SignupError;
pub use signup_core::models::{SignupRequest, SignupResponse, TokenClaims, User};
pub use signup_core::SignupResult;
