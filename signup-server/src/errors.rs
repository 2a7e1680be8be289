use std::fmt::{Display, Formatter};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{error, warn};
use signup_core::SignupError;

#[derive(Debug, Error)]
pub enum ServerError {
    #[error("{0}")]
    ApiError(#[from] ApiError),

    #[error("HTTP client error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Token error: {0}")]
    Token(#[from] jsonwebtoken::errors::Error),

    #[error("argon2 Library Error: {0}")]
    HashingError(argon2::password_hash::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Configuration error: {0}")]
    Config(String),
}

impl From<argon2::password_hash::Error> for ServerError {
    fn from(error: argon2::password_hash::Error) -> Self {
        ServerError::HashingError(error)
    }
}

impl From<SignupError> for ServerError {
    fn from(error: SignupError) -> Self {
        ServerError::ApiError(ApiError::invalid_request(error.to_string()))
    }
}

/// Request-level failures, one variant per response kind.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum ApiError {
    InvalidRequest(String),
    TokenIssuance(String),
    DependencyUnavailable(String),
    InternalServerError(String),
}

impl ApiError {
    pub fn invalid_request(message: impl Into<String>) -> Self {
        Self::InvalidRequest(message.into())
    }

    pub fn token_issuance(message: impl Into<String>) -> Self {
        Self::TokenIssuance(message.into())
    }

    pub fn dependency(message: impl Into<String>) -> Self {
        Self::DependencyUnavailable(message.into())
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self::InternalServerError(message.into())
    }

    /// Status code, status text and application code for each kind.
    pub fn descriptor(&self) -> (StatusCode, &'static str, Option<i64>) {
        match self {
            ApiError::InvalidRequest(_) => (StatusCode::BAD_REQUEST, "Invalid request.", None),
            ApiError::TokenIssuance(_) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "Token issuance failed.",
                Some(1001),
            ),
            ApiError::DependencyUnavailable(_) => {
                (StatusCode::BAD_GATEWAY, "User store unavailable.", Some(1002))
            }
            ApiError::InternalServerError(_) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "Internal server error.",
                Some(1000),
            ),
        }
    }

    pub fn status_code(&self) -> StatusCode {
        self.descriptor().0
    }

    pub fn message(&self) -> &str {
        match self {
            ApiError::InvalidRequest(message)
            | ApiError::TokenIssuance(message)
            | ApiError::DependencyUnavailable(message)
            | ApiError::InternalServerError(message) => message,
        }
    }

    /// Render the client-facing body. Only validation failures echo their
    /// message; everything else stays in the server log.
    pub fn to_err_response(&self) -> ErrResponse {
        let (_, status, code) = self.descriptor();
        let error = match self {
            ApiError::InvalidRequest(message) => Some(message.clone()),
            _ => None,
        };
        ErrResponse {
            status: status.to_string(),
            code,
            error,
        }
    }
}

impl Display for ApiError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let status = self.status_code();
        match self {
            ApiError::InvalidRequest(message) => write!(f, "Status={}, InvalidRequest: {}", status.as_u16(), message),
            ApiError::TokenIssuance(message) => write!(f, "Status={}, TokenIssuance: {}", status.as_u16(), message),
            ApiError::DependencyUnavailable(message) => write!(f, "Status={}, DependencyUnavailable: {}", status.as_u16(), message),
            ApiError::InternalServerError(message) => write!(f, "Status={}, InternalServerError: {}", status.as_u16(), message),
        }
    }
}

/// Error body sent to clients.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrResponse {
    pub status: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub code: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl ServerError {
    /// Collapse any server error into the request-level kind it renders as.
    pub fn into_api_error(self) -> ApiError {
        match self {
            ServerError::ApiError(e) => e,
            ServerError::Http(e) => ApiError::dependency(e.to_string()),
            ServerError::Token(e) => ApiError::token_issuance(e.to_string()),
            other => ApiError::internal(other.to_string()),
        }
    }
}

impl IntoResponse for ServerError {
    fn into_response(self) -> Response {
        let api_error = self.into_api_error();
        let status = api_error.status_code();
        if status.is_server_error() {
            error!("{}", api_error);
        } else {
            warn!("{}", api_error);
        }

        (status, axum::Json(api_error.to_err_response())).into_response()
    }
}

pub type ServerResult<T> = Result<T, ServerError>;

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_invalid_request_body() {
        let body = ApiError::invalid_request("missing required Article fields.").to_err_response();
        assert_eq!(
            serde_json::to_value(&body).unwrap(),
            json!({"status": "Invalid request.", "error": "missing required Article fields."})
        );
    }

    #[test]
    fn test_server_side_errors_hide_cause() {
        let body = ApiError::dependency("connection refused to 10.0.0.3").to_err_response();
        assert_eq!(
            serde_json::to_value(&body).unwrap(),
            json!({"status": "User store unavailable.", "code": 1002})
        );

        let body = ApiError::token_issuance("bad key").to_err_response();
        assert_eq!(body.error, None);
        assert_eq!(body.code, Some(1001));
    }

    #[test]
    fn test_status_table() {
        assert_eq!(ApiError::invalid_request("x").status_code(), StatusCode::BAD_REQUEST);
        assert_eq!(ApiError::token_issuance("x").status_code(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(ApiError::dependency("x").status_code(), StatusCode::BAD_GATEWAY);
        assert_eq!(ApiError::internal("x").status_code(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn test_signup_error_maps_to_invalid_request() {
        let api = ServerError::from(SignupError::MissingUser).into_api_error();
        assert_eq!(api, ApiError::invalid_request("missing required Article fields."));
    }

    #[test]
    fn test_config_error_is_internal() {
        let api = ServerError::Config("JWT_SECRET is empty".into()).into_api_error();
        assert_eq!(api.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(api.message(), "Configuration error: JWT_SECRET is empty");
    }
}
