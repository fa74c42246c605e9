//! Error types for Leadflow.

/// Top-level error type for the service.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    #[error("Generation error: {0}")]
    Generation(#[from] GenerationError),

    #[error("Dispatch error: {0}")]
    Dispatch(#[from] DispatchError),

    #[error("Relay error: {0}")]
    Relay(#[from] RelayError),
}

/// Configuration-related errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Missing required environment variable: {0}")]
    MissingEnvVar(String),

    #[error("Invalid configuration value for {key}: {message}")]
    InvalidValue { key: String, message: String },

    #[error("Service not configured: {0}")]
    ServiceUnavailable(String),
}

/// Local, user-correctable input errors. Never reach an external call.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("Missing required field: {field}")]
    MissingField { field: String },

    #[error("Invalid value for {field}: {message}")]
    InvalidField { field: String, message: String },

    #[error("Answer {index} must not be empty")]
    EmptyAnswer { index: usize },

    #[error("Expected {expected} answers, got {got}")]
    AnswerCountMismatch { expected: usize, got: usize },

    #[error("Cannot {action} while in the {step} step")]
    InvalidTransition { step: String, action: String },
}

/// Generative-text call failed or returned an unusable structure.
#[derive(Debug, thiserror::Error)]
pub enum GenerationError {
    #[error("Provider {provider} request failed: {reason}")]
    RequestFailed { provider: String, reason: String },

    #[error("Provider {provider} returned status {status}: {body}")]
    Status {
        provider: String,
        status: u16,
        body: String,
    },

    #[error("Invalid response from {provider}: {reason}")]
    InvalidResponse { provider: String, reason: String },

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Outbound email dispatch errors.
#[derive(Debug, thiserror::Error)]
pub enum DispatchError {
    #[error("Invalid {field} address: {reason}")]
    InvalidAddress { field: String, reason: String },

    #[error("Failed to build email: {0}")]
    BuildFailed(String),

    #[error("SMTP transport error: {0}")]
    Transport(String),

    #[error("Send to {recipient} failed: {reason}")]
    SendFailed { recipient: String, reason: String },
}

/// Contact-form relay errors (third-party forms endpoint).
#[derive(Debug, thiserror::Error)]
pub enum RelayError {
    #[error("Forms endpoint request failed: {0}")]
    RequestFailed(String),

    #[error("Forms endpoint returned status {status}")]
    Status { status: u16 },
}

/// Result type alias for the service.
pub type Result<T> = std::result::Result<T, Error>;
