use crate::closeness::most_exposed;
use crate::error::{SeatingError, SfResult};
use crate::model::SeatingState;
use fastrand::Rng;
use serde::{Deserialize, Serialize};
use std::ops::Range;
use strum_macros::{Display, EnumString};

pub const DEFAULT_MAX_SWAP_ATTEMPTS: usize = 10_000;

/// Candidate generation strategy: turns a state into one neighbouring state
/// that differs by a single successful swap.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Default,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    clap::ValueEnum,
)]
#[serde(rename_all = "kebab-case")]
#[strum(serialize_all = "kebab-case")]
pub enum Stepper {
    /// Random exclusive dimension, two random persons.
    Blind,
    /// Random exclusive dimension, first person drawn from those involved in
    /// the worst repeat who are free to move there.
    #[default]
    #[value(name = "closeness")]
    #[serde(rename = "closeness")]
    #[strum(serialize = "closeness")]
    ClosenessGuided,
}

impl Stepper {
    /// Returns a copy of `state` with one swap applied. `state` itself is
    /// never touched.
    ///
    /// Draws new candidates until a swap goes through, giving up with
    /// [`SeatingError::NoMovablePair`] after `max_attempts` refusals.
    pub fn step(
        &self,
        state: &SeatingState,
        rng: &mut Rng,
        max_attempts: usize,
    ) -> SfResult<SeatingState> {
        let ranges: Vec<Range<usize>> = state.exclusive_dimensions().map(|d| d.range()).collect();
        let persons = state.persons();
        if ranges.is_empty() || persons == 0 {
            return Err(SeatingError::NoMovablePair { attempts: 0 });
        }

        // Exposed persons that can actually leave their seat, per dimension.
        // When none can, the first person is drawn uniformly instead.
        let firsts: Vec<Vec<usize>> = match self {
            Stepper::Blind => Vec::new(),
            Stepper::ClosenessGuided => {
                let exposed = most_exposed(state.closeness());
                ranges
                    .iter()
                    .map(|range| {
                        exposed
                            .iter()
                            .copied()
                            .filter(|&p| state.is_movable(range.clone(), p))
                            .collect()
                    })
                    .collect()
            }
        };

        let mut result = state.clone();
        for _ in 0..max_attempts {
            let dim = rng.usize(0..ranges.len());
            let a = match firsts.get(dim) {
                Some(candidates) if !candidates.is_empty() => {
                    candidates[rng.usize(0..candidates.len())]
                }
                _ => rng.usize(0..persons),
            };
            let b = rng.usize(0..persons);
            if result.swap(ranges[dim].clone(), a, b) {
                return Ok(result);
            }
        }

        Err(SeatingError::NoMovablePair {
            attempts: max_attempts,
        })
    }
}
