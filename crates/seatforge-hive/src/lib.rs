pub mod error;
pub mod routes;
pub mod state;

use axum::extract::DefaultBodyLimit;
use axum::Router;
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use tower_http::limit::RequestBodyLimitLayer;
use tower_http::trace::TraceLayer;

pub use crate::state::AppState;

/// Upper bound on a submitted state, generous enough for a few thousand
/// persons.
pub const MAX_BODY_BYTES: usize = 64 * 1024 * 1024;

pub fn app(state: Arc<AppState>) -> Router {
    routes::state_routes()
        .merge(routes::export_routes())
        .merge(routes::system_routes())
        .layer(DefaultBodyLimit::disable())
        .layer(RequestBodyLimitLayer::new(MAX_BODY_BYTES))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
