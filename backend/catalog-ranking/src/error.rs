use thiserror::Error;

pub type Result<T> = std::result::Result<T, RankingError>;

#[derive(Debug, Error)]
pub enum RankingError {
    #[error("Concept at position {position} has no id")]
    MissingId { position: usize },

    #[error("Duplicate concept id: {0}")]
    DuplicateId(String),

    #[error("Unknown measure: {0}")]
    UnknownMeasure(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Configuration error: {0}")]
    Configuration(String),
}

impl From<config::ConfigError> for RankingError {
    fn from(err: config::ConfigError) -> Self {
        RankingError::Configuration(err.to_string())
    }
}
