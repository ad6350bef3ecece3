#![allow(dead_code)]

use axum::{
    body::Body,
    http::{header, Method, Request, StatusCode},
    Router,
};
use eventos_server::config::Config;
use eventos_server::routes::create_routes;
use eventos_server::state::AppState;
use eventos_server::store::Store;
use serde_json::{json, Value};
use tower::ServiceExt;

pub async fn test_app() -> Router {
    let store = Store::in_memory().await.unwrap();
    store.migrate().await.unwrap();

    let config = Config::for_tests();
    create_routes(AppState::new(store, &config), &config)
}

pub async fn send(
    app: &Router,
    method: Method,
    uri: &str,
    token: Option<&str>,
    body: Option<Value>,
) -> (StatusCode, Value) {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(token) = token {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {token}"));
    }

    let request = match body {
        Some(body) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();

    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let value = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };

    (status, value)
}

/// Registers a user and returns `(user_id, token)`.
pub async fn register(app: &Router, email: &str, password: &str) -> (i64, String) {
    let (status, body) = send(
        app,
        Method::POST,
        "/usuarios",
        None,
        Some(json!({ "email": email, "password": password })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED, "registration failed: {body}");

    (
        body["user_id"].as_i64().unwrap(),
        body["token"].as_str().unwrap().to_string(),
    )
}

pub fn talk() -> Value {
    json!({
        "name": "Talk",
        "category": 1,
        "venue": "Hall",
        "address": "St 1",
        "start_date": "2024-01-01",
        "end_date": "2024-01-02",
        "kind": 1
    })
}

pub async fn create_talk(app: &Router, user_id: i64, token: &str) -> (StatusCode, Value) {
    let uri = format!("/eventos2/{user_id}");
    send(app, Method::POST, &uri, Some(token), Some(talk())).await
}
