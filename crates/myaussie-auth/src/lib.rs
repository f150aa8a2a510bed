//! MyAussie authentication library
//!
//! Talks to the MyAussie auth host: password login, refresh-token exchange,
//! and extraction of the `myaussie_cookie` session cookie. Also defines the
//! `Credentials` tuple a caller persists between runs, and an atomic JSON
//! file store for it.
//!
//! Credential flow:
//! 1. `token::login()` posts username/password, returns a `Grant`
//! 2. `Credentials::from_grant()` turns it into absolute-expiry material
//! 3. `token::refresh()` trades the refresh token for a new `Grant`
//! 4. `Credentials::apply()` swaps all three fields in one step
//! 5. `CredentialFile::save()` persists the tuple for the next process

pub mod constants;
pub mod credentials;
pub mod error;
pub mod token;

pub use constants::*;
pub use credentials::{CredentialFile, Credentials, now_millis};
pub use error::{Error, Result};
pub use token::{AuthResponse, Grant, cookie_header, login, reason_phrase, refresh, session_cookie};
