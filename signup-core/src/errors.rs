use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SignupError {
    /// The payload decoded, but carried no user fields at all.
    #[error("missing required Article fields.")]
    MissingUser,

    #[error("{0}")]
    Malformed(String),
}

impl From<serde_json::Error> for SignupError {
    fn from(err: serde_json::Error) -> Self {
        SignupError::Malformed(err.to_string())
    }
}

pub type SignupResult<T> = Result<T, SignupError>;
