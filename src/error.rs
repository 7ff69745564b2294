//! Error types for the FFL Almanac.

use thiserror::Error;

pub type Result<T> = std::result::Result<T, AlmanacError>;

#[derive(Error, Debug)]
pub enum AlmanacError {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("JSON parsing failed: {0}")]
    Json(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid header value: {0}")]
    InvalidHeader(#[from] reqwest::header::InvalidHeaderValue),

    #[error("League ID not provided and {env_var} environment variable not set")]
    MissingLeagueId { env_var: String },

    #[error("Failed to parse league ID: {0}")]
    InvalidLeagueId(#[from] std::num::ParseIntError),

    #[error("Cache error: {message}")]
    Cache { message: String },

    #[error("No weeks in this season")]
    SeasonNotStarted,

    #[error("Malformed upstream document: {context}")]
    Malformed { context: String },
}

impl AlmanacError {
    /// Store fault that is not a missing key.
    pub fn cache(message: impl Into<String>) -> Self {
        AlmanacError::Cache {
            message: message.into(),
        }
    }

    /// An expected field is absent from an upstream payload.
    pub fn malformed(context: impl Into<String>) -> Self {
        AlmanacError::Malformed {
            context: context.into(),
        }
    }
}
