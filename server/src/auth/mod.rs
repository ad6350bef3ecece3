pub mod password;
pub mod token;

use axum::{
    async_trait,
    extract::FromRequestParts,
    http::{header, request::Parts},
};

pub use token::{Claims, TokenIssuer};

use crate::state::AppState;
use crate::utils::AppError;

/// Extractor for routes that require `Authorization: Bearer <token>`.
///
/// Only authenticates the caller; it does not check that the caller owns the
/// resource being touched.
#[derive(Debug, Clone)]
pub struct Authenticated(pub Claims);

impl Authenticated {
    pub fn subject(&self) -> &str {
        &self.0.sub
    }
}

#[async_trait]
impl FromRequestParts<AppState> for Authenticated {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let value = parts
            .headers
            .get(header::AUTHORIZATION)
            .ok_or_else(|| AppError::AuthError("missing bearer token".to_string()))?;

        let token = value
            .to_str()
            .ok()
            .and_then(|v| v.strip_prefix("Bearer "))
            .map(str::trim)
            .filter(|t| !t.is_empty())
            .ok_or_else(|| AppError::AuthError("malformed authorization header".to_string()))?;

        state.tokens.verify(token).map(Authenticated)
    }
}
