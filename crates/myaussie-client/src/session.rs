//! Session manager: login, restore and lazy token refresh
//!
//! The credential store sits behind a tokio `Mutex`. `refresh_if_needed`
//! holds it across the whole check-expiry / refresh / swap sequence, so
//! concurrent callers on one session trigger at most one refresh and never
//! observe a half-updated cookie/expiry pair. Requests only take the lock
//! long enough to copy the cookie.

use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

use common::Secret;
use myaussie_auth::{Credentials, now_millis, token};
use tokio::sync::Mutex;
use tracing::{debug, info, warn};

use crate::error::{Error, Result};
use crate::transport::Transport;

/// Refresh once the session is this close to expiry.
pub const REFRESH_MARGIN: Duration = Duration::from_secs(24 * 60 * 60);

/// Observed state of a session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    Authenticated,
    /// The server rejected the cookie, or a refresh failed after expiry.
    /// Sticky: only a new login recovers.
    Expired,
}

/// Result of `Session::refresh_if_needed`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RefreshOutcome {
    Refreshed,
    NotNeeded,
}

impl RefreshOutcome {
    pub fn refreshed(self) -> bool {
        self == RefreshOutcome::Refreshed
    }
}

/// One authenticated MyAussie customer.
pub struct Session {
    pub(crate) transport: Transport,
    username: String,
    password: Option<Secret<String>>,
    store: Mutex<Credentials>,
    expired: AtomicBool,
}

impl Session {
    /// Log in with a username and password.
    ///
    /// Empty credentials fail locally without touching the network. Login
    /// is never retried.
    pub async fn login(transport: Transport, username: &str, password: &str) -> Result<Self> {
        if username.is_empty() || password.is_empty() {
            return Err(Error::local_auth("username and password must not be empty"));
        }

        let grant = token::login(
            transport.http(),
            &transport.endpoints().auth,
            username,
            password,
        )
        .await?;
        let credentials = Credentials::from_grant(username, grant, now_millis());

        info!(
            username,
            expires_at = credentials.expires_at,
            refreshable = credentials.has_refresh_token(),
            "logged in"
        );
        Ok(Self::new(
            transport,
            credentials,
            Some(Secret::new(password.to_string())),
        ))
    }

    /// Rebuild a session from saved credentials without contacting the server.
    ///
    /// Nothing is validated here; a dead cookie shows up as `Error::Http`
    /// (401/403) on the first request. `password` enables `login_again`.
    pub fn restore(
        transport: Transport,
        credentials: Credentials,
        password: Option<String>,
    ) -> Self {
        debug!(
            username = %credentials.username,
            expires_at = credentials.expires_at,
            "restoring session"
        );
        Self::new(transport, credentials, password.map(Secret::new))
    }

    fn new(
        transport: Transport,
        credentials: Credentials,
        password: Option<Secret<String>>,
    ) -> Self {
        Self {
            transport,
            username: credentials.username.clone(),
            password,
            store: Mutex::new(credentials),
            expired: AtomicBool::new(false),
        }
    }

    pub fn username(&self) -> &str {
        &self.username
    }

    pub fn transport(&self) -> &Transport {
        &self.transport
    }

    pub fn state(&self) -> SessionState {
        if self.expired.load(Ordering::Acquire) {
            SessionState::Expired
        } else {
            SessionState::Authenticated
        }
    }

    /// Snapshot of the credential tuple, for persisting between runs.
    pub async fn credentials(&self) -> Credentials {
        self.store.lock().await.clone()
    }

    /// Refresh the session if it expires within `REFRESH_MARGIN`.
    ///
    /// Without a refresh token this always fails with `MissingRefreshToken`
    /// and leaves the store alone. Outside the margin it returns `NotNeeded`
    /// with no network call. A failed refresh leaves the store unmodified.
    pub async fn refresh_if_needed(&self) -> Result<RefreshOutcome> {
        let mut store = self.store.lock().await;

        if !store.has_refresh_token() {
            return Err(Error::MissingRefreshToken);
        }

        let now = now_millis();
        let margin = REFRESH_MARGIN.as_millis() as u64;
        if !store.expires_within(margin, now) {
            return Ok(RefreshOutcome::NotNeeded);
        }

        debug!(
            username = %self.username,
            expires_at = store.expires_at,
            "session inside refresh margin, refreshing"
        );
        let result = token::refresh(
            self.transport.http(),
            &self.transport.endpoints().auth,
            &store.refresh_token,
            &store.cookie,
        )
        .await;
        match result {
            Ok(grant) => {
                store.apply(grant, now_millis());
                info!(
                    username = %self.username,
                    expires_at = store.expires_at,
                    "session refreshed"
                );
                Ok(RefreshOutcome::Refreshed)
            }
            Err(e) => {
                if store.expires_at <= now {
                    self.mark_expired();
                }
                warn!(username = %self.username, error = %e, "session refresh failed");
                Err(e.into())
            }
        }
    }

    /// Log in again with the retained password, producing a fresh session.
    pub async fn login_again(&self) -> Result<Session> {
        let Some(password) = &self.password else {
            return Err(Error::local_auth("no password retained for this session"));
        };
        Session::login(self.transport.clone(), &self.username, password.expose()).await
    }

    pub(crate) async fn cookie(&self) -> String {
        self.store.lock().await.cookie.clone()
    }

    pub(crate) fn mark_expired(&self) {
        if !self.expired.swap(true, Ordering::AcqRel) {
            warn!(username = %self.username, "session rejected by server, marked expired");
        }
    }
}

impl std::fmt::Debug for Session {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Session")
            .field("username", &self.username)
            .field("state", &self.state())
            .field("endpoints", self.transport.endpoints())
            .finish_non_exhaustive()
    }
}
