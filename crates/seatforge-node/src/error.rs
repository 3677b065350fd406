use seatforge_core::SeatingError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum NodeError {
    #[error("Hive request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Seating error: {0}")]
    Model(#[from] SeatingError),

    #[error("Search task failed: {0}")]
    Join(#[from] tokio::task::JoinError),
}

pub type NodeResult<T> = Result<T, NodeError>;
