//! API routes module

pub mod chat;

use std::sync::{Arc, RwLock};

use axum::Router;

use crate::api::state::AppState;

type SharedState = Arc<RwLock<AppState>>;

/// Create the combined API router
pub fn router() -> Router<SharedState> {
    Router::new()
        // Chat routes
        .nest("/chat", chat::router())
}
