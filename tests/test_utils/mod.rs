//! Test utilities for integration tests
use std::sync::{Arc, RwLock};

use axum::{Router, body::Body};

use parley::api::{AppState, app};
use parley::core::AppConfig;

/// Creates a test application router pointed at `api_hostname` as the
/// chat backend (a `mockito` server in practice). Sessions start
/// empty; every call builds an independent app.
pub fn test_app(api_hostname: &str) -> Router {
    let config = AppConfig {
        openai_api_hostname: api_hostname.to_string(),
        openai_api_key: String::from("test-api-key"),
        openai_model: String::from("gpt-4o"),
    };
    let app_state = AppState::new(config);
    app(Arc::new(RwLock::new(app_state)))
}

/// Reads a response body to completion. For SSE responses this only
/// returns once the server side has finished the turn and closed the
/// stream.
pub async fn body_to_string(body: Body) -> String {
    let bytes = axum::body::to_bytes(body, usize::MAX).await.unwrap();
    String::from_utf8(bytes.to_vec()).unwrap()
}
