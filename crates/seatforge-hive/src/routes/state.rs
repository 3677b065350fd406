use crate::error::{AppError, AppResult};
use crate::state::AppState;
use axum::extract::rejection::JsonRejection;
use axum::{extract::State, Json};
use seatforge_core::protocol::{CurrentStateResponse, SubmitStateResponse, Verdict, WireState};
use seatforge_core::{ScoredState, SeatingState};
use std::sync::Arc;
use tracing::{debug, info, warn};

pub async fn current_state(
    State(app): State<Arc<AppState>>,
) -> AppResult<Json<CurrentStateResponse>> {
    let Some((state, energy)) = app.snapshot()? else {
        return Ok(Json(CurrentStateResponse::default()));
    };

    let wire = state.to_wire();
    let fingerprint = wire.fingerprint();
    Ok(Json(CurrentStateResponse {
        state: Some(wire),
        energy: Some(energy),
        fingerprint: Some(fingerprint),
    }))
}

pub async fn submit_state(
    State(app): State<Arc<AppState>>,
    payload: Result<Json<WireState>, JsonRejection>,
) -> AppResult<Json<SubmitStateResponse>> {
    let Json(wire) = payload?;
    let fingerprint = wire.fingerprint();
    let persons = wire.persons();
    let kind = app.energy_kind();

    // Validation and scoring only touch the candidate.
    let scored = tokio::task::spawn_blocking(move || {
        SeatingState::from_wire(wire).map(|state| ScoredState::new(state, kind))
    })
    .await
    .map_err(|e| AppError::Any(e.into()))?;

    let scored = match scored {
        Ok(scored) => scored,
        Err(e) => {
            warn!("🗑️ Rejected malformed state {}: {}", short(&fingerprint), e);
            app.record_discarded();
            let energy = app.snapshot()?.map(|(_, energy)| energy);
            return Ok(Json(SubmitStateResponse {
                verdict: Verdict::Discarded,
                energy,
            }));
        }
    };

    let candidate_energy = scored.energy;
    let (changed, held_energy) = {
        let mut keeper = app.keeper()?;
        let changed = keeper.challenge_scored(scored);
        (changed, keeper.get_current().map(|held| held.energy))
    };

    let verdict = if changed {
        app.record_accepted();
        info!(
            "🏆 New best: {} | {} persons | energy {}",
            short(&fingerprint),
            persons,
            candidate_energy
        );
        Verdict::Accepted
    } else {
        app.record_discarded();
        debug!(
            "📥 Discarded {} | energy {} (holding {:?})",
            short(&fingerprint),
            candidate_energy,
            held_energy
        );
        Verdict::Discarded
    };

    Ok(Json(SubmitStateResponse {
        verdict,
        energy: held_energy,
    }))
}

fn short(fingerprint: &str) -> &str {
    &fingerprint[..fingerprint.len().min(12)]
}
