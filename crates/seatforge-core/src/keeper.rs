use crate::energy::EnergyKind;
use crate::model::SeatingState;
use tracing::{debug, info};

/// A state together with its energy under a given evaluator.
#[derive(Debug, Clone)]
pub struct ScoredState {
    pub state: SeatingState,
    pub energy: u64,
    pub kind: EnergyKind,
}

impl ScoredState {
    pub fn new(state: SeatingState, kind: EnergyKind) -> Self {
        let energy = kind.evaluate(&state);
        Self {
            state,
            energy,
            kind,
        }
    }
}

/// Arbitrates between two states: the lower energy wins, ties keep the
/// first (incumbent) one.
#[derive(Debug, Clone, Copy, Default)]
pub struct HillClimber {
    pub energy: EnergyKind,
}

impl HillClimber {
    pub fn new(energy: EnergyKind) -> Self {
        Self { energy }
    }

    pub fn challenge<'a>(
        &self,
        incumbent: &'a SeatingState,
        candidate: &'a SeatingState,
    ) -> &'a SeatingState {
        if self.energy.evaluate(candidate) < self.energy.evaluate(incumbent) {
            candidate
        } else {
            incumbent
        }
    }
}

/// Holds the best state seen so far.
///
/// Starts empty; the first challenger is adopted unconditionally. The held
/// energy never increases. Callers must serialize access (the hive wraps
/// the keeper in a mutex).
#[derive(Debug, Default)]
pub struct StateKeeper {
    climber: HillClimber,
    current: Option<ScoredState>,
}

impl StateKeeper {
    pub fn new(energy: EnergyKind) -> Self {
        Self {
            climber: HillClimber::new(energy),
            current: None,
        }
    }

    pub fn with_state(energy: EnergyKind, state: SeatingState) -> Self {
        let mut keeper = Self::new(energy);
        keeper.challenge(state);
        keeper
    }

    pub fn energy_kind(&self) -> EnergyKind {
        self.climber.energy
    }

    pub fn get_current(&self) -> Option<&ScoredState> {
        self.current.as_ref()
    }

    pub fn is_empty(&self) -> bool {
        self.current.is_none()
    }

    /// Returns whether the held state changed.
    pub fn challenge(&mut self, candidate: SeatingState) -> bool {
        let scored = ScoredState::new(candidate, self.climber.energy);
        self.challenge_scored(scored)
    }

    /// Like [`challenge`](Self::challenge) for a candidate whose energy was
    /// computed beforehand, so the comparison itself stays cheap.
    pub fn challenge_scored(&mut self, candidate: ScoredState) -> bool {
        let candidate = if candidate.kind == self.climber.energy {
            candidate
        } else {
            ScoredState::new(candidate.state, self.climber.energy)
        };

        match &self.current {
            None => {
                info!("Adopted first state, energy {}", candidate.energy);
                self.current = Some(candidate);
                true
            }
            Some(held) if candidate.energy < held.energy => {
                info!(
                    "New best state: energy {} -> {}",
                    held.energy, candidate.energy
                );
                self.current = Some(candidate);
                true
            }
            Some(held) => {
                debug!(
                    "Discarded candidate with energy {} (holding {})",
                    candidate.energy, held.energy
                );
                false
            }
        }
    }
}
