use axum::{extract::State, response::Response};
use serde::{Deserialize, Serialize};

use crate::auth::password::hash_password_blocking;
use crate::handlers::{required, JsonBody};
use crate::state::AppState;
use crate::utils::response::{created, ok};
use crate::utils::{AppError, AppResult};

const EMAIL_TAKEN: &str = "This email is already registered";

/// Body of `POST /usuarios`
#[derive(Debug, Deserialize)]
pub struct RegisterInput {
    pub email: Option<String>,
    pub password: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct RegisterResponse {
    pub token: String,
    pub user_id: i64,
}

/// Handler for `GET /usuarios`
pub async fn list_users(State(state): State<AppState>) -> AppResult<Response> {
    let users = state.store.list_users().await?;
    Ok(ok(users))
}

/// Handler for `POST /usuarios`
pub async fn register_user(
    State(state): State<AppState>,
    JsonBody(input): JsonBody<RegisterInput>,
) -> AppResult<Response> {
    let email = required(input.email, "email")?;
    let password = required(input.password, "password")?;

    // Fast path; the unique constraint below settles concurrent registrations.
    if state.store.find_user_by_email(&email).await?.is_some() {
        return Err(AppError::Conflict(EMAIL_TAKEN.to_string()));
    }

    let password_hash = hash_password_blocking(password).await?;

    let user_id = match state.store.insert_user(&email, &password_hash).await {
        Ok(id) => id,
        Err(sqlx::Error::Database(e)) if e.is_unique_violation() => {
            return Err(AppError::Conflict(EMAIL_TAKEN.to_string()));
        }
        Err(e) => return Err(e.into()),
    };

    let token = state.tokens.issue(&email)?;
    tracing::info!(user_id, "User registered");

    Ok(created(RegisterResponse { token, user_id }))
}
