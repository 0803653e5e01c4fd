//! Error types for pattern loading.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum PatternError {
    #[error("invalid death pattern {pattern:?}: {source}")]
    InvalidRegex {
        pattern: String,
        #[source]
        source: regex::Error,
    },

    #[error("failed to read pattern file: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to parse pattern file: {0}")]
    Toml(#[from] toml::de::Error),
}
