use std::sync::Arc;

use axum::{body::Bytes, extract::State, http::StatusCode, Json};
use signup_core::{SignupRequest, SignupResponse};

use crate::{errors::ServerResult, AppState};

/// `POST /signup`: bind the payload, issue a session token, create the user
/// upstream and answer `201 Created`.
///
/// The token is only returned once the user store has accepted the user.
pub async fn signup(
    State(state): State<Arc<AppState>>,
    body: Bytes,
) -> ServerResult<(StatusCode, Json<SignupResponse>)> {
    let mut user = SignupRequest::decode(&body)?.bind()?;

    let token = state.tokens.issue(&user.email)?;

    user.id = state.forwarder.create_user(&user).await?;
    tracing::info!(user_id = %user.id, "Signup completed");

    Ok((StatusCode::CREATED, Json(SignupResponse::created(user, token))))
}
