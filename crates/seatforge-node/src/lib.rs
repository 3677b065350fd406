pub mod client;
pub mod error;
pub mod worker;

pub use client::{HiveClient, PulledState};
pub use error::{NodeError, NodeResult};
pub use worker::{run_round, run_worker, search_parallel, RoundOutcome, WorkerOptions, WorkerSummary};
