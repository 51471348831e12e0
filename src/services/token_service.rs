use std::env;

use chrono::{Duration, Utc};
use jsonwebtoken::{DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::errors::ApiError;

/// Tokens are good for 24 hours; there is no refresh, expiry forces a
/// fresh login.
pub const TOKEN_TTL_HOURS: i64 = 24;

#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    pub sub: Uuid,
    pub name: String,
    pub iat: i64,
    pub exp: i64,
}

/// The verified caller, as carried inside a token.
#[derive(Debug, Clone)]
pub struct Identity {
    pub user_id: Uuid,
    pub name: String,
}

/// Issues and verifies the signed session tokens. Stateless: the server
/// keeps no revocation list, logout is a client-side discard.
#[derive(Clone)]
pub struct TokenService {
    encoding: EncodingKey,
    decoding: DecodingKey,
}

impl TokenService {
    pub fn new(secret: &str) -> Self {
        Self {
            encoding: EncodingKey::from_secret(secret.as_bytes()),
            decoding: DecodingKey::from_secret(secret.as_bytes()),
        }
    }

    pub fn new_from_env() -> Self {
        let secret = env::var("JWT_SECRET").expect("JWT_SECRET must be set");
        Self::new(secret.trim())
    }

    pub fn issue(&self, user_id: Uuid, name: &str) -> Result<String, ApiError> {
        let now = Utc::now();
        let claims = Claims {
            sub: user_id,
            name: name.to_string(),
            iat: now.timestamp(),
            exp: (now + Duration::hours(TOKEN_TTL_HOURS)).timestamp(),
        };
        encode(&Header::default(), &claims, &self.encoding)
            .map_err(|e| ApiError::Internal(format!("failed to sign token: {e}")))
    }

    /// Signature and expiry are both checked; any failure collapses into
    /// the same unauthenticated class.
    pub fn verify(&self, token: &str) -> Result<Identity, ApiError> {
        let data = decode::<Claims>(token, &self.decoding, &Validation::default())
            .map_err(|_| ApiError::Unauthenticated("Token is not valid"))?;
        Ok(Identity {
            user_id: data.claims.sub,
            name: data.claims.name,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn issued_tokens_verify_back_to_the_same_identity() {
        let svc = TokenService::new("test-secret");
        let user_id = Uuid::new_v4();
        let token = svc.issue(user_id, "Ada Lovelace").unwrap();

        let identity = svc.verify(&token).unwrap();
        assert_eq!(identity.user_id, user_id);
        assert_eq!(identity.name, "Ada Lovelace");
    }

    #[test]
    fn tampered_tokens_are_rejected() {
        let svc = TokenService::new("test-secret");
        let token = svc.issue(Uuid::new_v4(), "Ada").unwrap();
        let mut tampered = token.clone();
        tampered.pop();

        let err = svc.verify(&tampered).unwrap_err();
        assert!(matches!(err, ApiError::Unauthenticated(_)));
    }

    #[test]
    fn tokens_signed_with_another_secret_are_rejected() {
        let token = TokenService::new("secret-a")
            .issue(Uuid::new_v4(), "Ada")
            .unwrap();
        let err = TokenService::new("secret-b").verify(&token).unwrap_err();
        assert!(matches!(err, ApiError::Unauthenticated(_)));
    }

    #[test]
    fn expired_tokens_are_rejected() {
        let svc = TokenService::new("test-secret");
        let now = Utc::now();
        let claims = Claims {
            sub: Uuid::new_v4(),
            name: "Ada".into(),
            iat: (now - Duration::hours(2)).timestamp(),
            exp: (now - Duration::hours(1)).timestamp(),
        };
        let token = encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(b"test-secret"),
        )
        .unwrap();

        let err = svc.verify(&token).unwrap_err();
        assert!(matches!(err, ApiError::Unauthenticated(_)));
    }
}
