//! Error types for the NotifyMe signup workflow

use thiserror::Error;

/// Main error type for signup operations
#[derive(Error, Debug)]
pub enum SignupError {
    /// Network, DNS, TLS or timeout failure talking to the backend
    #[error("Transport error: {0}")]
    Transport(String),

    /// The GraphQL response carried an `errors` collection
    #[error("Backend error: {0}")]
    Backend(String),

    /// API credentials could not be resolved
    #[error("Configuration error: {0}")]
    Config(String),

    /// Response body or secret payload could not be (de)serialized
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// The secret store could not be reached or returned nothing usable
    #[error("Secret store error: {0}")]
    SecretStore(String),

    /// A form field is empty or the email is malformed
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// A submission is already checking or creating
    #[error("A submission is already in flight")]
    SubmissionInFlight,

    /// The session was shut down while work was pending
    #[error("Session cancelled")]
    Cancelled,

    /// General I/O error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<reqwest::Error> for SignupError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            SignupError::Serialization(err.to_string())
        } else {
            SignupError::Transport(err.to_string())
        }
    }
}

impl From<serde_json::Error> for SignupError {
    fn from(err: serde_json::Error) -> Self {
        SignupError::Serialization(err.to_string())
    }
}

/// Result type alias using SignupError
pub type SignupResult<T> = Result<T, SignupError>;
