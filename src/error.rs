/// Custom error type for release notification operations
#[derive(Debug, thiserror::Error)]
pub enum NotifyError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Event context error: {0}")]
    Context(String),

    #[error("Release payload parsing error: {0}")]
    PayloadParse(#[from] serde_json::Error),

    #[error("Webhook delivery failed: {0}")]
    Delivery(#[from] reqwest::Error),
}

/// Helper type for Results that use NotifyError
pub type Result<T> = std::result::Result<T, NotifyError>;
