//! Error types for message delivery.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum DeliveryError {
    #[error("webhook request failed: {0}")]
    Network(String),

    #[error("webhook returned HTTP {0}")]
    HttpStatus(u16),

    #[error("webhook request timed out")]
    Timeout,

    #[error("output error: {0}")]
    Io(#[from] std::io::Error),
}
