use thiserror::Error;

#[derive(Error, Debug)]
pub enum LedgerError {
    #[error("sqlite: {0}")]
    Sqlite(#[from] rusqlite::Error),
    #[error("stored result: {0}")]
    Json(#[from] serde_json::Error),
    #[error("client not found: {0}")]
    ClientNotFound(String),
    #[error("calculation not found: {0}")]
    CalculationNotFound(String),
    #[error("rating must be between 1 and 5, got {0}")]
    InvalidRating(u8),
    #[error("stored birth date {0:?} is not YYYY-MM-DD")]
    BadDate(String),
}
