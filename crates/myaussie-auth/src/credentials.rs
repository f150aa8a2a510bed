//! Session credential material and its on-disk form
//!
//! `Credentials` is the 4-tuple (username, cookie, refresh token, absolute
//! expiry) that is enough to rebuild a session without logging in again.
//! `CredentialFile` persists one tuple as JSON using atomic temp-file +
//! rename writes, so a crash mid-save never leaves a truncated file.

use std::fmt;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::error::{Error, Result};
use crate::token::Grant;

/// Credential material for one MyAussie customer.
///
/// `expires_at` is a unix timestamp in milliseconds (absolute, not a
/// delta), computed from `AuthResponse.expires_in` at the time the cookie
/// was issued. `cookie` and `expires_at` always come from the same response.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Credentials {
    pub username: String,
    pub cookie: String,
    /// Empty for password-only sessions
    #[serde(default)]
    pub refresh_token: String,
    pub expires_at: u64,
}

impl Credentials {
    /// Build credentials from a login grant issued at `now_millis`.
    pub fn from_grant(username: impl Into<String>, grant: Grant, now_millis: u64) -> Self {
        let expires_at = grant.expires_at(now_millis);
        Self {
            username: username.into(),
            cookie: grant.cookie.unwrap_or_default(),
            refresh_token: grant.refresh_token,
            expires_at,
        }
    }

    /// Replace cookie, refresh token and expiry from a refresh grant.
    ///
    /// A grant that did not rotate the cookie keeps the current one; the
    /// expiry still moves because the server extended the session.
    pub fn apply(&mut self, grant: Grant, now_millis: u64) {
        self.expires_at = grant.expires_at(now_millis);
        if let Some(cookie) = grant.cookie {
            self.cookie = cookie;
        }
        self.refresh_token = grant.refresh_token;
    }

    pub fn has_refresh_token(&self) -> bool {
        !self.refresh_token.is_empty()
    }

    /// Whether the session expires before `now_millis + margin_millis`.
    pub fn expires_within(&self, margin_millis: u64, now_millis: u64) -> bool {
        self.expires_at < now_millis.saturating_add(margin_millis)
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("username", &self.username)
            .field("cookie", &"[REDACTED]")
            .field("refresh_token", &"[REDACTED]")
            .field("expires_at", &self.expires_at)
            .finish()
    }
}

/// Current time as unix milliseconds.
pub fn now_millis() -> u64 {
    std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .unwrap_or_default()
        .as_millis() as u64
}

/// JSON file holding one customer's `Credentials`.
#[derive(Debug, Clone)]
pub struct CredentialFile {
    path: PathBuf,
}

impl CredentialFile {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read saved credentials, or `None` if nothing has been saved yet.
    pub async fn load(&self) -> Result<Option<Credentials>> {
        if !self.path.exists() {
            debug!(path = %self.path.display(), "no saved credentials");
            return Ok(None);
        }
        let contents = tokio::fs::read_to_string(&self.path)
            .await
            .map_err(|e| Error::Io(format!("reading credential file: {e}")))?;
        let credentials: Credentials = serde_json::from_str(&contents)
            .map_err(|e| Error::CredentialParse(format!("parsing credential file: {e}")))?;
        info!(
            path = %self.path.display(),
            username = %credentials.username,
            expires_at = credentials.expires_at,
            "loaded saved credentials"
        );
        Ok(Some(credentials))
    }

    /// Persist credentials, replacing any previous contents.
    pub async fn save(&self, credentials: &Credentials) -> Result<()> {
        write_atomic(&self.path, credentials).await
    }

    /// Delete saved credentials. Missing file is not an error.
    pub async fn clear(&self) -> Result<()> {
        match tokio::fs::remove_file(&self.path).await {
            Ok(()) => {
                debug!(path = %self.path.display(), "cleared saved credentials");
                Ok(())
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(Error::Io(format!("removing credential file: {e}"))),
        }
    }
}

/// Write credentials to a file atomically.
///
/// Writes to a temporary file in the same directory, then renames it over
/// the target. Permissions are 0600 on unix since the file holds a live
/// session cookie.
async fn write_atomic(path: &Path, credentials: &Credentials) -> Result<()> {
    let json = serde_json::to_string_pretty(credentials)
        .map_err(|e| Error::CredentialParse(format!("serializing credentials: {e}")))?;

    let dir = match path.parent() {
        Some(dir) if !dir.as_os_str().is_empty() => dir,
        Some(_) => Path::new("."),
        None => return Err(Error::Io("credential path has no parent directory".into())),
    };

    let tmp_path = dir.join(format!(".myaussie-credentials.tmp.{}", std::process::id()));

    tokio::fs::write(&tmp_path, json.as_bytes())
        .await
        .map_err(|e| Error::Io(format!("writing temp credential file: {e}")))?;

    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        let perms = std::fs::Permissions::from_mode(0o600);
        tokio::fs::set_permissions(&tmp_path, perms)
            .await
            .map_err(|e| Error::Io(format!("setting credential file permissions: {e}")))?;
    }

    tokio::fs::rename(&tmp_path, path)
        .await
        .map_err(|e| Error::Io(format!("renaming temp credential file: {e}")))?;

    debug!(path = %path.display(), "persisted credentials");
    Ok(())
}
