use axum::{
    async_trait,
    extract::{FromRequest, FromRequestParts, Path, Request},
    http::request::Parts,
    response::Response,
    Json,
};
use serde::{de::DeserializeOwned, Serialize};

use crate::utils::error::AppError;
use crate::utils::response::ok;

pub mod events;
pub mod login;
pub mod users;

pub use events::{create_event, delete_event, list_events, update_event};
pub use login::login;
pub use users::{list_users, register_user};

#[derive(Serialize)]
struct HealthPayload {
    status: &'static str,
    service: &'static str,
}

pub async fn health_check() -> Response {
    ok(HealthPayload {
        status: "ok",
        service: "eventos-api",
    })
}

/// A JSON request body whose rejections (bad content type, syntax errors,
/// wrong types, unknown enum codes) are reported as [`AppError::ValidationError`].
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonBody<T>(pub T);

#[async_trait]
impl<T, S> FromRequest<S> for JsonBody<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(req, state)
            .await
            .map_err(|rejection| AppError::ValidationError(rejection.body_text()))?;
        Ok(JsonBody(value))
    }
}

/// A path parameter whose parse failures (e.g. `/eventos/abc`) are reported
/// as [`AppError::ValidationError`].
#[derive(Debug, Clone, Copy)]
pub struct PathParam<T>(pub T);

#[async_trait]
impl<T, S> FromRequestParts<S> for PathParam<T>
where
    T: DeserializeOwned + Send,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Path(value) = Path::<T>::from_request_parts(parts, state)
            .await
            .map_err(|rejection| AppError::ValidationError(rejection.body_text()))?;
        Ok(PathParam(value))
    }
}

/// Unwraps a required body field; absent or blank values are a 400 naming the field.
pub(crate) fn required(value: Option<String>, field: &'static str) -> Result<String, AppError> {
    match value {
        Some(v) if !v.trim().is_empty() => Ok(v),
        _ => Err(missing(field)),
    }
}

pub(crate) fn missing(field: &'static str) -> AppError {
    AppError::ValidationError(format!("missing required field '{field}'"))
}
