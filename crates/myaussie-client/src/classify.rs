//! Classification of non-200 statuses from the MyAussie API
//!
//! The API never returns a structured error body, so the status code is the
//! only signal. Callers use the classification to decide whether to log in
//! again (`AuthRejected`), retry later (`Transient`) or give up.

use serde::Serialize;

/// What a failed status means for the caller.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorClassification {
    /// 401/403: cookie expired or revoked, session needs a fresh login
    AuthRejected,
    /// 404: resource or service ID does not exist on this account
    NotFound,
    /// 408/429/5xx: server-side or rate limiting, may succeed later
    Transient,
    /// Any other status: the server refused the request as sent
    Rejected,
}

/// Classify an HTTP status code.
pub fn classify_status(status: u16) -> ErrorClassification {
    match status {
        401 | 403 => ErrorClassification::AuthRejected,
        404 => ErrorClassification::NotFound,
        408 | 429 | 500..=599 => ErrorClassification::Transient,
        _ => ErrorClassification::Rejected,
    }
}
