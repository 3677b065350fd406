use crate::error::AppResult;
use crate::state::AppState;
use axum::{extract::State, Json};
use seatforge_core::protocol::HiveStatus;
use serde::Serialize;
use std::sync::Arc;

#[derive(Serialize)]
pub struct StatusResponse {
    pub status: String,
    pub version: String,
    pub message: String,
}

pub async fn root() -> &'static str {
    "SeatForge Hive API v0.2"
}

pub async fn health() -> Json<StatusResponse> {
    Json(StatusResponse {
        status: "ok".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        message: "Best-state keeper active".to_string(),
    })
}

pub async fn status(State(app): State<Arc<AppState>>) -> AppResult<Json<HiveStatus>> {
    let held = app.snapshot()?;
    let (energy, fingerprint) = match held {
        Some((state, energy)) => (Some(energy), Some(state.to_wire().fingerprint())),
        None => (None, None),
    };

    Ok(Json(HiveStatus {
        accepted: app.accepted(),
        discarded: app.discarded(),
        energy,
        fingerprint,
        last_accepted: app.last_accepted().map(|at| at.to_rfc3339()),
    }))
}
