//! Error types for the webhook service.

/// Top-level error type.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Database error: {0}")]
    Database(#[from] DatabaseError),

    #[error("Webhook error: {0}")]
    Webhook(#[from] WebhookError),

    #[error("Transport error: {0}")]
    Transport(#[from] TransportError),

    #[error("Handler error: {0}")]
    Handler(#[from] HandlerError),
}

/// Configuration-related errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Missing required environment variable: {0}")]
    MissingEnvVar(String),

    #[error("Invalid configuration value for {key}: {message}")]
    InvalidValue { key: String, message: String },
}

/// Database-related errors.
#[derive(Debug, thiserror::Error)]
pub enum DatabaseError {
    #[error("Connection error: {0}")]
    Pool(String),

    #[error("Query failed: {0}")]
    Query(String),

    #[error("Migration failed: {0}")]
    Migration(String),
}

/// Webhook intake errors.
#[derive(Debug, thiserror::Error)]
pub enum WebhookError {
    #[error("Invalid webhook signature")]
    InvalidSignature,

    #[error("Invalid webhook payload: {0}")]
    InvalidPayload(String),
}

/// Outbound reply transport errors.
#[derive(Debug, thiserror::Error)]
pub enum TransportError {
    #[error("Reply request failed: {0}")]
    Request(String),

    #[error("Reply rejected with status {status}: {body}")]
    Rejected { status: u16, body: String },
}

/// Errors from the delegated message handler.
#[derive(Debug, thiserror::Error)]
pub enum HandlerError {
    #[error("Message handler failed: {0}")]
    Failed(String),
}

/// Result type alias for the service.
pub type Result<T> = std::result::Result<T, Error>;
