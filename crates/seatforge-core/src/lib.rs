// Re-export wire types so they are reachable as seatforge_core::protocol::*
pub use seatforge_protocol as protocol;

pub mod closeness;
pub mod config;
pub mod energy;
pub mod error;
pub mod formats;
pub mod keeper;
pub mod matrix;
pub mod model;
pub mod report;
pub mod searcher;
pub mod seeding;
pub mod stepper;
pub mod wire;

pub use energy::EnergyKind;
pub use error::{SeatingError, SfResult};
pub use keeper::{HillClimber, ScoredState, StateKeeper};
pub use model::{DimensionKind, GroupDimension, SeatingState};
pub use searcher::{SearchOutcome, Searcher};
pub use stepper::Stepper;
