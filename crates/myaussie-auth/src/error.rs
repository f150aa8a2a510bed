//! Error types for MyAussie authentication operations

/// Errors from login, refresh and credential persistence.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Login was refused, or succeeded without issuing a session cookie.
    #[error("login rejected: {reason}")]
    Rejected { status: Option<u16>, reason: String },

    /// Login request never produced a response.
    #[error("auth host unreachable: {0}")]
    Unreachable(#[source] reqwest::Error),

    /// Refresh endpoint answered with a non-200 status.
    #[error("auth endpoint returned {status} {reason}")]
    Http { status: u16, reason: String },

    #[error("invalid auth response: {0}")]
    Decode(#[source] serde_json::Error),

    #[error("HTTP request failed: {0}")]
    Transport(#[source] reqwest::Error),

    #[error("credential parse error: {0}")]
    CredentialParse(String),

    #[error("I/O error: {0}")]
    Io(String),
}

/// Result alias for auth operations.
pub type Result<T> = std::result::Result<T, Error>;
