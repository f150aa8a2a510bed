//! Typed client for the MyAussie customer API
//!
//! A `Session` owns one customer's credential material and a `Transport`
//! (HTTP client + hosts). Every accessor call runs the same sequence:
//! 1. `Session::refresh_if_needed()` renews the cookie inside the 24h margin
//! 2. `Session::execute()` sends the request with `myaussie_cookie` attached
//! 3. 200 bodies decode into the resource's model; anything else is an `Error`
//!
//! Session lifecycle:
//! - `Session::login()` or `Session::restore()` → Authenticated
//! - successful refresh → Authenticated (cookie, refresh token, expiry swapped)
//! - 401/403 on a request, or a failed refresh past expiry → Expired
//! - Expired is terminal; `Session::login_again()` builds a new session

pub mod classify;
pub mod error;
pub mod executor;
pub mod models;
pub mod resources;
pub mod session;
pub mod transport;

#[cfg(test)]
mod testing;

pub use classify::{ErrorClassification, classify_status};
pub use error::{Error, Result};
pub use executor::{RequestBody, expand_path};
pub use models::*;
pub use myaussie_auth::Credentials;
pub use resources::Resource;
pub use session::{REFRESH_MARGIN, RefreshOutcome, Session, SessionState};
pub use transport::{Endpoints, REQUEST_TIMEOUT, Transport};
