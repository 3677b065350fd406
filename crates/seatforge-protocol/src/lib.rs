pub mod protocol;
pub mod state;

pub use protocol::{CurrentStateResponse, HiveStatus, SubmitStateResponse, Verdict};
pub use state::WireState;
