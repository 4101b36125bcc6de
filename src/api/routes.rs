use axum::{
    routing::{get, post},
    Router,
};
use std::sync::Arc;

use crate::counting::VisitorCounter;

use super::handlers::{get_visitor_counts, health_check, increment_visitor, AppState};

pub fn create_api_router(counter: Arc<VisitorCounter>) -> Router {
    let state = Arc::new(AppState { counter });

    Router::new()
        .route("/health", get(health_check))
        .route("/api/visitors", post(increment_visitor))
        .route("/api/visitors/counts", get(get_visitor_counts))
        .with_state(state)
}
