use crate::model::SeatingState;
use serde::{Deserialize, Serialize};
use strum_macros::{Display, EnumString};

/// Scalar fitness of a seating, lower is better. Only repeat meetings
/// (closeness above 1) are penalized.
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
pub enum EnergyKind {
    /// Square of the summed repeat closeness.
    #[default]
    Square,
    /// Sum of each repeat closeness squared.
    SumOfSquares,
}

impl EnergyKind {
    pub fn evaluate(&self, state: &SeatingState) -> u64 {
        let repeats = state
            .closeness()
            .as_slice()
            .iter()
            .filter(|&&v| v > 1)
            .map(|&v| v as u64);

        match self {
            EnergyKind::Square => {
                let sum = repeats.fold(0u64, u64::saturating_add);
                sum.saturating_mul(sum)
            }
            EnergyKind::SumOfSquares => repeats.fold(0u64, |acc, v| acc.saturating_add(v * v)),
        }
    }
}
