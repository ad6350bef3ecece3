use axum::{extract::State, response::Response};
use serde::{Deserialize, Serialize};

use crate::auth::password::verify_password_blocking;
use crate::handlers::{required, JsonBody};
use crate::state::AppState;
use crate::utils::response::ok;
use crate::utils::{AppError, AppResult};

/// Body of `POST /login`
#[derive(Debug, Deserialize)]
pub struct LoginInput {
    pub email: Option<String>,
    pub password: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct LoginResponse {
    pub token: String,
}

/// Handler for `POST /login`
pub async fn login(
    State(state): State<AppState>,
    JsonBody(input): JsonBody<LoginInput>,
) -> AppResult<Response> {
    let email = required(input.email, "email")?;
    let password = required(input.password, "password")?;

    let Some(user) = state.store.find_user_by_email(&email).await? else {
        return Err(AppError::AuthError(
            "No user is registered with that email".to_string(),
        ));
    };

    if !verify_password_blocking(password, user.password_hash).await? {
        return Err(AppError::AuthError("Incorrect password".to_string()));
    }

    let token = state.tokens.issue(&user.email)?;
    tracing::info!(user_id = user.id, "User logged in");

    Ok(ok(LoginResponse { token }))
}
