use crate::error::{AppError, AppResult};
use chrono::{DateTime, Utc};
use seatforge_core::{EnergyKind, SeatingState, StateKeeper};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Mutex, MutexGuard};

/// Shared between every request. The keeper mutex is the only path to the
/// held state, so challenges are applied one at a time.
pub struct AppState {
    keeper: Mutex<StateKeeper>,
    energy: EnergyKind,
    accepted: AtomicU64,
    discarded: AtomicU64,
    last_accepted: Mutex<Option<DateTime<Utc>>>,
}

impl AppState {
    pub fn new(keeper: StateKeeper) -> Self {
        Self {
            energy: keeper.energy_kind(),
            keeper: Mutex::new(keeper),
            accepted: AtomicU64::new(0),
            discarded: AtomicU64::new(0),
            last_accepted: Mutex::new(None),
        }
    }

    pub fn keeper(&self) -> AppResult<MutexGuard<'_, StateKeeper>> {
        self.keeper
            .lock()
            .map_err(|_| AppError::Any(anyhow::anyhow!("state keeper lock poisoned")))
    }

    pub fn energy_kind(&self) -> EnergyKind {
        self.energy
    }

    /// Clone of the held state and its energy.
    pub fn snapshot(&self) -> AppResult<Option<(SeatingState, u64)>> {
        Ok(self
            .keeper()?
            .get_current()
            .map(|held| (held.state.clone(), held.energy)))
    }

    pub fn record_accepted(&self) {
        self.accepted.fetch_add(1, Ordering::Relaxed);
        if let Ok(mut at) = self.last_accepted.lock() {
            *at = Some(Utc::now());
        }
    }

    pub fn record_discarded(&self) {
        self.discarded.fetch_add(1, Ordering::Relaxed);
    }

    pub fn accepted(&self) -> u64 {
        self.accepted.load(Ordering::Relaxed)
    }

    pub fn discarded(&self) -> u64 {
        self.discarded.load(Ordering::Relaxed)
    }

    pub fn last_accepted(&self) -> Option<DateTime<Utc>> {
        self.last_accepted.lock().ok().and_then(|at| *at)
    }
}
