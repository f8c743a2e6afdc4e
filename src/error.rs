//! Fault types for each component boundary.
//!
//! Every public operation that talks to disk or the network returns one of
//! these instead of swallowing the fault. Callers that only want a safe
//! default (the CLI, the submission pipeline) log and coerce at their layer.

use thiserror::Error;

/// Schema inspection, creation or migration failed.
#[derive(Debug, Error)]
pub enum SchemaError {
    #[error("sqlite error: {0}")]
    Sqlite(#[from] rusqlite::Error),

    /// The table carries columns the canonical schema does not know about.
    #[error("entries table has unexpected columns: {}", .0.join(", "))]
    UnexpectedColumns(Vec<String>),

    #[error("entries table has no id column; it cannot be added in place")]
    MissingPrimaryKey,
}

/// Persistence Store fault.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("sqlite error: {0}")]
    Sqlite(#[from] rusqlite::Error),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("schema error: {0}")]
    Schema(#[from] SchemaError),

    #[error("invalid input: {0}")]
    InvalidInput(String),

    #[error("no entry with id {0}")]
    NotFound(i64),
}

/// Language-model backend fault.
#[derive(Debug, Error)]
pub enum InsightError {
    #[error("http error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("API error (status {status}): {message}")]
    Api { status: u16, message: String },

    #[error("no API key configured for the hosted backend")]
    MissingApiKey,

    #[error("unknown insight backend '{0}'")]
    UnknownBackend(String),

    #[error("insight backend is disabled")]
    Disabled,

    #[error("backend returned an empty response")]
    EmptyResponse,

    #[error("malformed backend response: {0}")]
    Malformed(String),
}

/// Weather Adapter fault.
#[derive(Debug, Error)]
pub enum WeatherError {
    #[error("http error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("weather API returned status {0}")]
    Status(u16),

    #[error("malformed weather payload: {0}")]
    Malformed(String),
}
