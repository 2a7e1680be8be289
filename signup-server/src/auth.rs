use argon2::{
    password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2,
};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use signup_core::TokenClaims;

use crate::errors::{ApiError, ServerError, ServerResult};

/// Signs session tokens with a symmetric HS256 key.
#[derive(Clone)]
pub struct TokenIssuer {
    encoding: EncodingKey,
    decoding: DecodingKey,
}

impl TokenIssuer {
    pub fn new(secret: &[u8]) -> ServerResult<Self> {
        if secret.is_empty() {
            return Err(ServerError::Config("token signing secret is empty".to_string()));
        }
        Ok(Self {
            encoding: EncodingKey::from_secret(secret),
            decoding: DecodingKey::from_secret(secret),
        })
    }

    /// Issue a token whose only claim is `user_id`.
    pub fn issue(&self, user_id: &str) -> ServerResult<String> {
        let claims = TokenClaims {
            user_id: user_id.to_string(),
        };
        encode(&Header::new(Algorithm::HS256), &claims, &self.encoding).map_err(|e| {
            tracing::error!(%e, "Failed to sign session token");
            ApiError::token_issuance(e.to_string()).into()
        })
    }

    pub fn verify(&self, token: &str) -> ServerResult<TokenClaims> {
        let mut validation = Validation::new(Algorithm::HS256);
        // Tokens carry no `exp` claim.
        validation.required_spec_claims.clear();
        validation.validate_exp = false;

        let data = decode::<TokenClaims>(token, &self.decoding, &validation)?;
        Ok(data.claims)
    }
}

impl std::fmt::Debug for TokenIssuer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TokenIssuer").finish_non_exhaustive()
    }
}

pub fn hash_password(password: &str) -> ServerResult<String> {
    let salt = SaltString::generate(&mut OsRng);
    let argon2 = Argon2::default();
    let password_hash = argon2.hash_password(password.as_bytes(), &salt)?;
    Ok(password_hash.to_string())
}

/// Run `hash_password` on the blocking pool so argon2 does not stall the
/// async workers.
pub async fn hash_password_blocking(password: String) -> ServerResult<String> {
    tokio::task::spawn_blocking(move || hash_password(&password))
        .await
        .map_err(|e| ApiError::internal(format!("password hashing task failed: {}", e)))?
}

pub fn verify_password(password: &str, hash: &str) -> ServerResult<bool> {
    let parsed_hash = PasswordHash::new(hash)?;
    let argon2 = Argon2::default();
    Ok(argon2.verify_password(password.as_bytes(), &parsed_hash).is_ok())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_secret_rejected() {
        assert!(matches!(TokenIssuer::new(b""), Err(ServerError::Config(_))));
    }

    #[test]
    fn test_token_has_three_segments() {
        let issuer = TokenIssuer::new(b"test-signing-secret").unwrap();
        let token = issuer.issue("a@example.com").unwrap();

        assert!(!token.is_empty());
        let parts: Vec<&str> = token.split('.').collect();
        assert_eq!(parts.len(), 3);
        assert!(parts.iter().all(|p| !p.is_empty()));
    }

    #[test]
    fn test_token_round_trips_claim() {
        let issuer = TokenIssuer::new(b"test-signing-secret").unwrap();
        let token = issuer.issue("a@example.com").unwrap();

        let claims = issuer.verify(&token).unwrap();
        assert_eq!(claims.user_id, "a@example.com");
    }

    #[test]
    fn test_token_rejected_under_other_secret() {
        let issuer = TokenIssuer::new(b"first-secret").unwrap();
        let other = TokenIssuer::new(b"second-secret").unwrap();
        let token = issuer.issue("a@example.com").unwrap();

        assert!(matches!(other.verify(&token), Err(ServerError::Token(_))));
    }

    #[test]
    fn test_password_hash_verifies() {
        let hash = hash_password("pw1").unwrap();
        assert!(hash.starts_with("$argon2"));
        assert_ne!(hash, "pw1");
        assert!(verify_password("pw1", &hash).unwrap());
        assert!(!verify_password("pw2", &hash).unwrap());
    }

    #[tokio::test(flavor = "current_thread")]
    async fn test_hash_on_blocking_pool() {
        let hash = hash_password_blocking("pw1".to_string()).await.unwrap();
        assert!(hash.starts_with("$argon2"));
        assert!(verify_password("pw1", &hash).unwrap());
    }

    #[test]
    fn test_password_hashes_are_salted() {
        let first = hash_password("same").unwrap();
        let second = hash_password("same").unwrap();
        assert_ne!(first, second);
    }
}
