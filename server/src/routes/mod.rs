use axum::{
    routing::{get, post, put},
    Router,
};
use tower::ServiceBuilder;
use tower_http::{timeout::TimeoutLayer, trace::TraceLayer};

use crate::config::{create_cors_layer, create_security_headers_layers, Config};
use crate::handlers::{
    create_event, delete_event, health_check, list_events, list_users, login, register_user,
    update_event,
};
use crate::state::AppState;

pub fn create_routes(state: AppState, config: &Config) -> Router {
    let router = Router::new()
        .route("/health", get(health_check))
        .route("/usuarios", get(list_users).post(register_user))
        .route("/login", post(login))
        .route("/eventos2/:user_id", get(list_events).post(create_event))
        .route("/eventos/:event_id", put(update_event).delete(delete_event))
        .with_state(state);

    with_middleware(router, config)
}

/// Security headers, CORS, tracing and the per-request timeout.
fn with_middleware(router: Router, config: &Config) -> Router {
    let router = create_security_headers_layers(config.production)
        .into_iter()
        .fold(router, |router, layer| router.layer(layer));

    router.layer(
        ServiceBuilder::new()
            .layer(TraceLayer::new_for_http())
            .layer(TimeoutLayer::new(config.request_timeout))
            .layer(create_cors_layer(&config.cors_allowed_origins)),
    )
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use axum::{
        body::Body,
        http::{Request, StatusCode},
    };
    use tower::ServiceExt;

    use super::*;

    async fn slow_handler() -> &'static str {
        tokio::time::sleep(Duration::from_secs(5)).await;
        "too late"
    }

    fn get_request(uri: &str) -> Request<Body> {
        Request::builder().uri(uri).body(Body::empty()).unwrap()
    }

    #[tokio::test]
    async fn test_slow_request_times_out_with_408() {
        let config = Config {
            request_timeout: Duration::from_millis(20),
            ..Config::for_tests()
        };
        let app = with_middleware(Router::new().route("/slow", get(slow_handler)), &config);

        let response = app.oneshot(get_request("/slow")).await.unwrap();

        assert_eq!(response.status(), StatusCode::REQUEST_TIMEOUT);
    }

    #[tokio::test]
    async fn test_fast_request_is_not_cut_off() {
        let config = Config {
            request_timeout: Duration::from_millis(500),
            ..Config::for_tests()
        };
        let app = with_middleware(Router::new().route("/fast", get(|| async { "ok" })), &config);

        let response = app.oneshot(get_request("/fast")).await.unwrap();

        assert_eq!(response.status(), StatusCode::OK);
    }
}
