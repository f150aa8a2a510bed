//! Error taxonomy for client operations

use crate::classify::{ErrorClassification, classify_status};

/// Errors from session and resource operations.
///
/// `Http` is the signal that a session has gone stale: match on
/// `classification()` (or `is_auth_rejection()`) to decide between
/// logging in again and surfacing the failure.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Login refused. `status` is `None` when the request never reached
    /// the server (`source` holds the transport error), when the response
    /// lacked a session cookie, or when the check failed locally.
    #[error("authentication failed: {reason}")]
    Auth {
        status: Option<u16>,
        reason: String,
        #[source]
        source: Option<reqwest::Error>,
    },

    #[error("no refresh token held, log in with a password instead")]
    MissingRefreshToken,

    #[error("HTTP {status} {reason}")]
    Http { status: u16, reason: String },

    #[error("malformed response body: {0}")]
    Decode(#[source] serde_json::Error),

    #[error("HTTP request failed: {0}")]
    Transport(#[source] reqwest::Error),

    #[error("credential storage error: {0}")]
    Storage(String),
}

impl Error {
    /// HTTP status attached to this error, if any.
    pub fn status(&self) -> Option<u16> {
        match self {
            Error::Http { status, .. } => Some(*status),
            Error::Auth { status, .. } => *status,
            _ => None,
        }
    }

    /// Classification of the HTTP status, if this error carries one.
    pub fn classification(&self) -> Option<ErrorClassification> {
        self.status().map(classify_status)
    }

    /// Whether the server refused the session's credentials (401/403).
    ///
    /// Local `Auth` failures carry no status and are not rejections.
    pub fn is_auth_rejection(&self) -> bool {
        self.classification() == Some(ErrorClassification::AuthRejected)
    }

    /// `Auth` error raised before any request was sent.
    pub(crate) fn local_auth(reason: impl Into<String>) -> Self {
        Error::Auth {
            status: None,
            reason: reason.into(),
            source: None,
        }
    }
}

impl From<myaussie_auth::Error> for Error {
    fn from(err: myaussie_auth::Error) -> Self {
        use myaussie_auth::Error as AuthError;
        match err {
            AuthError::Rejected { status, reason } => Error::Auth {
                status,
                reason,
                source: None,
            },
            AuthError::Unreachable(e) => Error::Auth {
                status: None,
                reason: "auth host unreachable".into(),
                source: Some(e),
            },
            AuthError::Http { status, reason } => Error::Http { status, reason },
            AuthError::Decode(e) => Error::Decode(e),
            AuthError::Transport(e) => Error::Transport(e),
            AuthError::CredentialParse(msg) | AuthError::Io(msg) => Error::Storage(msg),
        }
    }
}

/// Result alias for client operations.
pub type Result<T> = std::result::Result<T, Error>;
