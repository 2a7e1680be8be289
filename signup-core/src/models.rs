use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::errors::{SignupError, SignupResult};

/// Value reported in `SignupResponse::elapsed`. It is a fixed stub, not a
/// measured latency.
pub const PLACEHOLDER_ELAPSED: i64 = 10;

/// A user record as it travels over the wire.
///
/// Field names keep the capitalised form clients already send (`ID`,
/// `Email`, `Password`). The password is never serialized back out.
#[derive(Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    #[serde(rename = "ID", alias = "id", default)]
    pub id: String,
    #[serde(rename = "Email", alias = "email", default)]
    pub email: String,
    #[serde(rename = "Password", alias = "password", default, skip_serializing)]
    pub password: String,
}

impl User {
    pub fn new(email: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            id: String::new(),
            email: email.into(),
            password: password.into(),
        }
    }
}

impl std::fmt::Debug for User {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("User")
            .field("id", &self.id)
            .field("email", &self.email)
            .field("password", &"<redacted>")
            .finish()
    }
}

/// Inbound signup payload.
///
/// `user` is `None` when the decoded object carried none of the user
/// fields. Field names match case-insensitively and a `null` value still
/// marks the user as present. Keys are applied in document order, so a
/// repeated field keeps its last value.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(try_from = "Map<String, Value>")]
pub struct SignupRequest {
    pub user: Option<User>,
}

impl TryFrom<Map<String, Value>> for SignupRequest {
    type Error = String;

    fn try_from(fields: Map<String, Value>) -> Result<Self, Self::Error> {
        let mut user: Option<User> = None;
        for (key, value) in fields {
            let slot = if key.eq_ignore_ascii_case("ID") {
                &mut user.get_or_insert_with(User::default).id
            } else if key.eq_ignore_ascii_case("Email") {
                &mut user.get_or_insert_with(User::default).email
            } else if key.eq_ignore_ascii_case("Password") {
                &mut user.get_or_insert_with(User::default).password
            } else {
                continue;
            };
            match value {
                Value::Null => {}
                Value::String(text) => *slot = text,
                other => return Err(format!("field {} must be a string, got {}", key, other)),
            }
        }
        Ok(Self { user })
    }
}

impl SignupRequest {
    pub fn new(user: User) -> Self {
        Self { user: Some(user) }
    }

    /// Decode a raw JSON request body.
    pub fn decode(body: &[u8]) -> SignupResult<Self> {
        Ok(serde_json::from_slice(body)?)
    }

    /// Validate the request and hand back the user it carries.
    ///
    /// Any identifier the client sent is cleared: identifiers are assigned
    /// by the user store, never by the caller.
    pub fn bind(self) -> SignupResult<User> {
        let mut user = self.user.ok_or(SignupError::MissingUser)?;
        user.id.clear();
        Ok(user)
    }
}

/// Body of a successful signup, serialized flat next to the user fields.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SignupResponse {
    #[serde(flatten)]
    pub user: User,
    #[serde(rename = "Token")]
    pub token: String,
    #[serde(rename = "Elapsed")]
    pub elapsed: i64,
}

impl SignupResponse {
    pub fn created(user: User, token: String) -> Self {
        Self {
            user,
            token,
            elapsed: PLACEHOLDER_ELAPSED,
        }
    }
}

/// Claim set carried by a session token.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenClaims {
    pub user_id: String,
}
