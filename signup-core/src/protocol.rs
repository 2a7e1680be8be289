//! GraphQL wire types for the user-creation mutation.

use serde::{Deserialize, Serialize};

pub const CREATE_USER_OPERATION: &str = "CreateUserMutation";

pub const CREATE_USER_MUTATION: &str = "mutation CreateUserMutation($email: String!, $passwordhash: String!) { insert_users_one(object: {email: $email, passwordhash: $passwordhash}) { id } }";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GraphQLRequest<V> {
    pub operation_name: String,
    pub query: String,
    pub variables: V,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreateUserVariables {
    pub email: String,
    pub passwordhash: String,
}

impl GraphQLRequest<CreateUserVariables> {
    /// Build the mutation that inserts one user. Values only ever travel in
    /// `variables`; the query text is a constant.
    pub fn create_user(email: impl Into<String>, passwordhash: impl Into<String>) -> Self {
        Self {
            operation_name: CREATE_USER_OPERATION.to_string(),
            query: CREATE_USER_MUTATION.to_string(),
            variables: CreateUserVariables {
                email: email.into(),
                passwordhash: passwordhash.into(),
            },
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GraphQLResponse<T> {
    pub data: Option<T>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub errors: Option<Vec<GraphQLError>>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GraphQLError {
    pub message: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateUserData {
    pub insert_users_one: Option<InsertedUser>,
}

/// Row returned by `insert_users_one`. Stores disagree on whether `id` is a
/// string (uuid) or an integer, so it is kept as raw JSON.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InsertedUser {
    pub id: serde_json::Value,
}

impl InsertedUser {
    pub fn id_string(&self) -> Option<String> {
        match &self.id {
            serde_json::Value::String(s) if !s.is_empty() => Some(s.clone()),
            serde_json::Value::Number(n) => Some(n.to_string()),
            _ => None,
        }
    }
}
