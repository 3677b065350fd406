use crate::error::{AppError, AppResult};
use crate::state::AppState;
use axum::extract::State;
use seatforge_core::formats::write_text;
use seatforge_core::{report as reports, SeatingState};
use std::sync::Arc;

fn held(app: &AppState) -> AppResult<SeatingState> {
    app.snapshot()?
        .map(|(state, _)| state)
        .ok_or(AppError::NotFound)
}

pub async fn dump(State(app): State<Arc<AppState>>) -> AppResult<String> {
    Ok(reports::dump(&held(&app)?))
}

/// The held state in the plain-text plan format.
pub async fn export(State(app): State<Arc<AppState>>) -> AppResult<String> {
    Ok(write_text(&held(&app)?))
}

pub async fn report(State(app): State<Arc<AppState>>) -> AppResult<String> {
    Ok(reports::report(&held(&app)?))
}
