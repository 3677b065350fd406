use crate::config::SearchParams;
use crate::energy::EnergyKind;
use crate::error::SfResult;
use crate::model::SeatingState;
use crate::stepper::{Stepper, DEFAULT_MAX_SWAP_ATTEMPTS};
use fastrand::Rng;
use std::ops::Range;
use tracing::{info, warn};
use typed_builder::TypedBuilder;

/// Strict greedy descent: a neighbour replaces the current state only when
/// its energy is strictly lower.
#[derive(TypedBuilder, Debug, Clone)]
pub struct Searcher {
    #[builder(default)]
    pub stepper: Stepper,
    #[builder(default)]
    pub energy: EnergyKind,
    #[builder(default = 10_000)]
    pub iterations: usize,
    #[builder(default = DEFAULT_MAX_SWAP_ATTEMPTS)]
    pub max_swap_attempts: usize,
    /// Swaps tried together per iteration. `None` means one stepper move at
    /// a time.
    #[builder(default)]
    pub batch: Option<usize>,
}

#[derive(Debug, Clone)]
pub struct SearchOutcome {
    pub state: SeatingState,
    pub energy: u64,
    /// Number of accepted neighbours.
    pub improvements: usize,
}

impl From<&SearchParams> for Searcher {
    fn from(params: &SearchParams) -> Self {
        Searcher::builder()
            .stepper(params.stepper)
            .energy(params.energy)
            .iterations(params.iterations)
            .max_swap_attempts(params.max_swap_attempts)
            .batch(params.batch)
            .build()
    }
}

impl Searcher {
    /// Runs the descent from `start`. A stepper that runs out of movable
    /// pairs ends the run early with the best state reached so far.
    pub fn search(&self, start: SeatingState, rng: &mut Rng) -> SfResult<SearchOutcome> {
        if let Some(batch) = self.batch {
            return Ok(self.batch_search(start, rng, batch));
        }

        info!(
            "Searching... ({} iterations, {} stepper)",
            self.iterations, self.stepper
        );

        let mut state = start;
        let mut energy = self.energy.evaluate(&state);
        let mut improvements = 0;

        for i in 0..self.iterations {
            let candidate = match self.stepper.step(&state, rng, self.max_swap_attempts) {
                Ok(candidate) => candidate,
                Err(e) => {
                    warn!("Stopping after {} iterations: {}", i, e);
                    break;
                }
            };
            let candidate_energy = self.energy.evaluate(&candidate);
            if candidate_energy < energy {
                state = candidate;
                energy = candidate_energy;
                improvements += 1;
                info!("New best state energy: {}", energy);
            }
        }

        info!("Done. Energy {} after {} improvements", energy, improvements);
        Ok(SearchOutcome {
            state,
            energy,
            improvements,
        })
    }

    /// Cycles through the exclusive dimensions, applying up to `batch`
    /// swaps between movable persons at once and reverting the whole batch
    /// unless the energy strictly drops.
    fn batch_search(&self, start: SeatingState, rng: &mut Rng, batch: usize) -> SearchOutcome {
        info!(
            "Batch searching... ({} iterations, {} swaps per batch)",
            self.iterations, batch
        );

        let mut choices: Vec<(Range<usize>, Vec<usize>)> = start
            .exclusive_dimensions()
            .map(|d| {
                let movable = (0..start.persons())
                    .filter(|&p| start.is_movable(d.range(), p))
                    .collect::<Vec<_>>();
                (d.range(), movable)
            })
            .filter(|(_, movable)| movable.len() >= 2)
            .collect();

        let mut state = start;
        let mut energy = self.energy.evaluate(&state);
        let mut improvements = 0;

        if choices.is_empty() || batch == 0 {
            warn!("No dimension has two movable persons, nothing to search");
            return SearchOutcome {
                state,
                energy,
                improvements,
            };
        }

        for i in 0..self.iterations {
            let turn = i % choices.len();
            let (range, persons) = &mut choices[turn];
            rng.shuffle(persons);
            let pivot = batch.min(persons.len() / 2);
            let (movers, partners) = persons.split_at(pivot);

            let swaps: Vec<(usize, usize)> = movers
                .iter()
                .map(|&a| (a, partners[rng.usize(0..partners.len())]))
                .filter(|&(a, b)| state.swap(range.clone(), a, b))
                .collect();

            let candidate_energy = self.energy.evaluate(&state);
            if candidate_energy < energy {
                energy = candidate_energy;
                improvements += 1;
                info!("New best state energy: {}", energy);
            } else {
                for &(a, b) in swaps.iter().rev() {
                    state.swap(range.clone(), a, b);
                }
            }
        }

        info!("Done. Energy {} after {} improvements", energy, improvements);
        SearchOutcome {
            state,
            energy,
            improvements,
        }
    }
}
