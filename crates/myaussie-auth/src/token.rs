//! Password login and refresh-token exchange
//!
//! Both operations hit `/login` on the auth host:
//! 1. `POST` with a form-encoded username/password (initial login)
//! 2. `PUT` with a JSON refresh token (session renewal)
//!
//! Each success returns an `AuthResponse` body and rotates the
//! `myaussie_cookie` session cookie through `Set-Cookie`.

use reqwest::StatusCode;
use reqwest::header::{COOKIE, HeaderMap, SET_COOKIE};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::constants::SESSION_COOKIE;
use crate::error::{Error, Result};

/// Body returned by the auth host for both login and refresh.
///
/// `expires_in` is a delta in seconds from the response time. A login
/// without a `refreshToken` yields an empty string, which marks the
/// session as password-only (no refresh possible).
#[derive(Debug, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthResponse {
    #[serde(default)]
    pub refresh_token: String,
    pub expires_in: u64,
}

/// Credential material issued by one login or refresh response.
///
/// `cookie` is `None` when a refresh response did not rotate the cookie;
/// the caller keeps the one it already holds.
#[derive(Debug)]
pub struct Grant {
    pub cookie: Option<String>,
    pub refresh_token: String,
    pub expires_in: u64,
}

impl Grant {
    /// Absolute expiry in unix milliseconds, relative to `now_millis`.
    pub fn expires_at(&self, now_millis: u64) -> u64 {
        now_millis.saturating_add(self.expires_in.saturating_mul(1000))
    }
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct RefreshRequest<'a> {
    refresh_token: &'a str,
}

/// Log in with a username and password.
///
/// The password is sent here and nowhere else. Any non-200 status is a
/// rejection; a 200 that sets no session cookie is also a rejection since
/// nothing downstream can authenticate without it. A request that gets no
/// response at all is `Error::Unreachable`.
pub async fn login(
    client: &reqwest::Client,
    auth_base: &str,
    username: &str,
    password: &str,
) -> Result<Grant> {
    let response = client
        .post(login_url(auth_base))
        .form(&[("username", username), ("password", password)])
        .send()
        .await
        .map_err(Error::Unreachable)?;

    let status = response.status();
    if status != StatusCode::OK {
        return Err(Error::Rejected {
            status: Some(status.as_u16()),
            reason: reason_phrase(status),
        });
    }

    let cookie = session_cookie(response.headers());
    let body = response.bytes().await.map_err(Error::Unreachable)?;
    let auth: AuthResponse = serde_json::from_slice(&body).map_err(Error::Decode)?;

    let Some(cookie) = cookie else {
        return Err(Error::Rejected {
            status: None,
            reason: format!("login response did not set {SESSION_COOKIE}"),
        });
    };

    debug!(
        username,
        expires_in = auth.expires_in,
        refreshable = !auth.refresh_token.is_empty(),
        "login accepted"
    );
    Ok(Grant {
        cookie: Some(cookie),
        refresh_token: auth.refresh_token,
        expires_in: auth.expires_in,
    })
}

/// Exchange a refresh token for a new session.
///
/// Carries the refresh token (and the current cookie, when there is one)
/// but never the password.
pub async fn refresh(
    client: &reqwest::Client,
    auth_base: &str,
    refresh_token: &str,
    cookie: &str,
) -> Result<Grant> {
    let mut request = client
        .put(login_url(auth_base))
        .json(&RefreshRequest { refresh_token });
    if !cookie.is_empty() {
        request = request.header(COOKIE, cookie_header(cookie));
    }

    let response = request.send().await.map_err(Error::Transport)?;

    let status = response.status();
    if status != StatusCode::OK {
        return Err(Error::Http {
            status: status.as_u16(),
            reason: reason_phrase(status),
        });
    }

    let cookie = session_cookie(response.headers());
    let body = response.bytes().await.map_err(Error::Transport)?;
    let auth: AuthResponse = serde_json::from_slice(&body).map_err(Error::Decode)?;

    debug!(
        expires_in = auth.expires_in,
        cookie_rotated = cookie.is_some(),
        "refresh accepted"
    );
    Ok(Grant {
        cookie,
        refresh_token: auth.refresh_token,
        expires_in: auth.expires_in,
    })
}

/// Pull the `myaussie_cookie` value out of a response's `Set-Cookie` headers.
pub fn session_cookie(headers: &HeaderMap) -> Option<String> {
    headers
        .get_all(SET_COOKIE)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .filter_map(|value| value.split(';').next())
        .filter_map(|pair| pair.split_once('='))
        .find(|(name, _)| name.trim() == SESSION_COOKIE)
        .map(|(_, value)| value.trim().to_string())
        .filter(|value| !value.is_empty())
}

/// `Cookie` header value carrying the session cookie.
pub fn cookie_header(cookie: &str) -> String {
    format!("{SESSION_COOKIE}={cookie}")
}

/// Canonical reason phrase for a status, e.g. `Unauthorized` for 401.
pub fn reason_phrase(status: StatusCode) -> String {
    status.canonical_reason().unwrap_or("Unknown").to_string()
}

fn login_url(auth_base: &str) -> String {
    format!("{}/login", auth_base.trim_end_matches('/'))
}
