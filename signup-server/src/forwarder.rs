use std::time::Duration;

use reqwest::Client;
use signup_core::{CreateUserData, GraphQLRequest, GraphQLResponse, User};
use url::Url;

use crate::auth::hash_password_blocking;
use crate::errors::{ApiError, ServerResult};

const ADMIN_SECRET_HEADER: &str = "x-hasura-admin-secret";

/// Relays new users to the GraphQL system of record.
#[derive(Clone)]
pub struct UserForwarder {
    http: Client,
    endpoint: Url,
    admin_secret: Option<String>,
}

impl UserForwarder {
    pub fn new(endpoint: Url, admin_secret: Option<String>, timeout: Duration) -> ServerResult<Self> {
        let http = Client::builder().timeout(timeout).build()?;
        Ok(Self {
            http,
            endpoint,
            admin_secret,
        })
    }

    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }

    /// Insert `user` upstream and return the identifier the store assigned.
    ///
    /// The password is hashed before it leaves the process. Any failure,
    /// including a GraphQL-level error, is reported as a dependency error.
    pub async fn create_user(&self, user: &User) -> ServerResult<String> {
        let passwordhash = hash_password_blocking(user.password.clone()).await?;
        let request = GraphQLRequest::create_user(user.email.as_str(), passwordhash);

        let mut builder = self
            .http
            .post(self.endpoint.clone())
            .json(&request);
        if let Some(secret) = &self.admin_secret {
            builder = builder.header(ADMIN_SECRET_HEADER, secret);
        }

        let response = builder.send().await.map_err(|e| {
            tracing::error!(%e, endpoint = %self.endpoint, "User creation request failed");
            ApiError::dependency(format!("request failed: {}", e))
        })?;

        let status = response.status();
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "<failed to read response body>".to_string());
            tracing::error!(status = status.as_u16(), %body, "User store rejected creation");
            return Err(ApiError::dependency(format!("status {}: {}", status.as_u16(), body)))?;
        }

        let gql_response: GraphQLResponse<CreateUserData> = response.json().await.map_err(|e| {
            tracing::error!(%e, "Unreadable response from user store");
            ApiError::dependency(format!("invalid response: {}", e))
        })?;

        if let Some(errors) = gql_response.errors.filter(|errors| !errors.is_empty()) {
            let messages: Vec<String> = errors.into_iter().map(|e| e.message).collect();
            tracing::error!(errors = ?messages, "User store returned GraphQL errors");
            return Err(ApiError::dependency(format!("GraphQL errors: {}", messages.join(", "))))?;
        }

        let id = gql_response
            .data
            .and_then(|data| data.insert_users_one)
            .and_then(|inserted| inserted.id_string())
            .ok_or_else(|| {
                tracing::error!("User store response carried no user id");
                ApiError::dependency("empty response from user store")
            })?;

        tracing::debug!(user_id = %id, "User created upstream");
        Ok(id)
    }
}

impl std::fmt::Debug for UserForwarder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("UserForwarder")
            .field("endpoint", &self.endpoint.as_str())
            .field("admin_secret", &self.admin_secret.as_ref().map(|_| "<redacted>"))
            .finish()
    }
}
