//! # Access tokens
//!
//! Stateless HS256 JWTs whose subject is the user's email. Nothing is stored
//! server-side; a token is valid while its signature checks out and `exp` is
//! in the future.

use chrono::{Duration, Utc};
use jsonwebtoken::{
    decode, encode, errors::ErrorKind, Algorithm, DecodingKey, EncodingKey, Header, Validation,
};
use serde::{Deserialize, Serialize};

use crate::utils::{AppError, AppResult};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// Subject (user email)
    pub sub: String,

    /// Issued at (Unix epoch seconds)
    pub iat: i64,

    /// Expiration (Unix epoch seconds)
    pub exp: i64,
}

#[derive(Clone)]
pub struct TokenIssuer {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    ttl: Duration,
}

impl TokenIssuer {
    pub fn new(secret: &str, ttl: Duration) -> Self {
        Self {
            encoding_key: EncodingKey::from_secret(secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(secret.as_bytes()),
            ttl,
        }
    }

    pub fn issue(&self, subject: &str) -> AppResult<String> {
        let now = Utc::now();
        let claims = Claims {
            sub: subject.to_string(),
            iat: now.timestamp(),
            exp: (now + self.ttl).timestamp(),
        };

        encode(&Header::new(Algorithm::HS256), &claims, &self.encoding_key)
            .map_err(|e| AppError::InternalServerError(format!("token signing failed: {e}")))
    }

    pub fn verify(&self, token: &str) -> AppResult<Claims> {
        let validation = Validation::new(Algorithm::HS256);

        decode::<Claims>(token, &self.decoding_key, &validation)
            .map(|data| data.claims)
            .map_err(|e| {
                let reason = match e.kind() {
                    ErrorKind::ExpiredSignature => "token has expired",
                    ErrorKind::InvalidSignature => "token signature is invalid",
                    _ => "token is malformed",
                };
                AppError::AuthError(reason.to_string())
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn issuer() -> TokenIssuer {
        TokenIssuer::new("test_secret_key_for_testing_only", Duration::minutes(15))
    }

    #[test]
    fn test_issue_and_verify() {
        let issuer = issuer();
        let token = issuer.issue("a@x.com").unwrap();

        assert_eq!(token.split('.').count(), 3);

        let claims = issuer.verify(&token).unwrap();
        assert_eq!(claims.sub, "a@x.com");
        assert!(claims.exp > claims.iat);
    }

    #[test]
    fn test_wrong_secret_rejected() {
        let token = TokenIssuer::new("secret_one", Duration::minutes(15))
            .issue("a@x.com")
            .unwrap();

        let err = TokenIssuer::new("secret_two", Duration::minutes(15))
            .verify(&token)
            .unwrap_err();
        assert!(matches!(err, AppError::AuthError(msg) if msg.contains("signature")));
    }

    #[test]
    fn test_expired_token_rejected() {
        // Well past the default 60s leeway.
        let expired = TokenIssuer::new("secret", Duration::minutes(-10))
            .issue("a@x.com")
            .unwrap();

        let err = TokenIssuer::new("secret", Duration::minutes(15))
            .verify(&expired)
            .unwrap_err();
        assert!(matches!(err, AppError::AuthError(msg) if msg.contains("expired")));
    }

    #[test]
    fn test_garbage_rejected() {
        assert!(matches!(
            issuer().verify("invalid.token.here"),
            Err(AppError::AuthError(_))
        ));
    }
}
