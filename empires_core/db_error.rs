use thiserror::Error;
use uuid::Uuid;

/// Errors for db stuff.
#[derive(Debug, Error)]
pub enum DbError {
    #[error("Village with ID {0} not found")]
    VillageNotFound(Uuid),

    #[error("Environment variable {0} must be set")]
    MissingDatabaseUrl(&'static str),

    #[error("Invalid record in {table}: {reason}")]
    InvalidRecord { table: &'static str, reason: String },

    #[error(transparent)]
    Database(#[from] sqlx::Error),

    #[error("Transaction error: {0}")]
    Transaction(String),

    #[error(transparent)]
    Json(#[from] serde_json::Error),
}
