use thiserror::Error;

#[derive(Error, Debug)]
pub enum SeatingError {
    #[error("IO Error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV Error: {0}")]
    Csv(#[from] csv::Error),

    #[error("JSON Parsing Error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Parse Error (line {line}): {message}")]
    Parse { line: usize, message: String },

    #[error("Data Validation Error: {0}")]
    Validation(String),

    #[error("Unknown person: {0}")]
    UnknownPerson(String),

    #[error("No movable pair found after {attempts} swap attempts")]
    NoMovablePair { attempts: usize },
}

pub type SfResult<T> = Result<T, SeatingError>;
