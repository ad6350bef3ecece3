use axum::{extract::State, response::Response};
use serde::Deserialize;

use crate::auth::Authenticated;
use crate::handlers::{missing, required, JsonBody, PathParam};
use crate::models::{Category, EventKind, NewEvent};
use crate::state::AppState;
use crate::utils::response::{created, no_content, ok};
use crate::utils::{AppError, AppResult};

/// Body of `POST /eventos2/:user_id`
#[derive(Debug, Deserialize)]
pub struct NewEventInput {
    pub name: Option<String>,
    pub category: Option<Category>,
    pub venue: Option<String>,
    pub address: Option<String>,
    pub start_date: Option<String>,
    pub end_date: Option<String>,
    pub kind: Option<EventKind>,
}

impl NewEventInput {
    fn into_new_event(self, owner_id: i64) -> AppResult<NewEvent> {
        Ok(NewEvent {
            name: required(self.name, "name")?,
            category: self.category.ok_or_else(|| missing("category"))?,
            venue: required(self.venue, "venue")?,
            address: required(self.address, "address")?,
            start_date: required(self.start_date, "start_date")?,
            end_date: required(self.end_date, "end_date")?,
            kind: self.kind.ok_or_else(|| missing("kind"))?,
            owner_id,
        })
    }
}

/// Body of `PUT /eventos/:event_id`. Only the name can be changed; any
/// other field sent along is ignored.
#[derive(Debug, Default, Deserialize)]
pub struct UpdateEventInput {
    pub name: Option<String>,
}

fn event_not_found(event_id: i64) -> AppError {
    AppError::NotFound(format!("Event with id '{}' was not found", event_id))
}

fn user_not_found(user_id: i64) -> AppError {
    AppError::NotFound(format!("User with id '{}' was not found", user_id))
}

/// Handler for `GET /eventos2/:user_id`
pub async fn list_events(
    State(state): State<AppState>,
    PathParam(user_id): PathParam<i64>,
) -> AppResult<Response> {
    let events = state.store.list_events_by_owner(user_id).await?;
    Ok(ok(events))
}

/// Handler for `POST /eventos2/:user_id`
pub async fn create_event(
    State(state): State<AppState>,
    PathParam(user_id): PathParam<i64>,
    auth: Authenticated,
    JsonBody(input): JsonBody<NewEventInput>,
) -> AppResult<Response> {
    let new_event = input.into_new_event(user_id)?;

    // The owner reference is enforced by the schema.
    let event = match state.store.insert_event(new_event).await {
        Ok(event) => event,
        Err(sqlx::Error::Database(e)) if e.is_foreign_key_violation() => {
            return Err(user_not_found(user_id));
        }
        Err(e) => return Err(e.into()),
    };

    tracing::info!(event_id = event.id, user_id, subject = auth.subject(), "Event created");
    Ok(created(event))
}

/// Handler for `PUT /eventos/:event_id`
pub async fn update_event(
    State(state): State<AppState>,
    PathParam(event_id): PathParam<i64>,
    auth: Authenticated,
    JsonBody(input): JsonBody<UpdateEventInput>,
) -> AppResult<Response> {
    let mut event = state
        .store
        .find_event(event_id)
        .await?
        .ok_or_else(|| event_not_found(event_id))?;

    if let Some(name) = input.name {
        let name = required(Some(name), "name")?;
        if !state.store.update_event_name(event_id, &name).await? {
            return Err(event_not_found(event_id));
        }
        event.name = name;
        tracing::info!(event_id, subject = auth.subject(), "Event renamed");
    }

    Ok(ok(event))
}

/// Handler for `DELETE /eventos/:event_id`
pub async fn delete_event(
    State(state): State<AppState>,
    PathParam(event_id): PathParam<i64>,
    auth: Authenticated,
) -> AppResult<Response> {
    if !state.store.delete_event(event_id).await? {
        return Err(event_not_found(event_id));
    }

    tracing::info!(event_id, subject = auth.subject(), "Event deleted");
    Ok(no_content())
}
