pub mod export;
pub mod state;
pub mod system;

use crate::state::AppState;
use axum::Router;
use std::sync::Arc;

pub fn system_routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/", axum::routing::get(system::root))
        .route("/health", axum::routing::get(system::health))
        .route("/status", axum::routing::get(system::status))
}

pub fn state_routes() -> Router<Arc<AppState>> {
    Router::new().route(
        "/state",
        axum::routing::get(state::current_state).post(state::submit_state),
    )
}

pub fn export_routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/dump", axum::routing::get(export::dump))
        .route("/export", axum::routing::get(export::export))
        .route("/report", axum::routing::get(export::report))
}
