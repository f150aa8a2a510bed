//! HTTP transport handle owned by each session

use std::time::Duration;

use myaussie_auth::{API_BASE_URL, AUTH_BASE_URL, USER_AGENT};

use crate::error::{Error, Result};

/// Per-request timeout applied by `Transport::new`.
pub const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Base URLs for the auth and API hosts.
///
/// `Endpoints::default()` is the production pair. Overriding it only makes
/// sense to aim a session at a local fake server.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Endpoints {
    pub auth: String,
    pub api: String,
}

impl Default for Endpoints {
    fn default() -> Self {
        Self {
            auth: AUTH_BASE_URL.to_string(),
            api: API_BASE_URL.to_string(),
        }
    }
}

impl Endpoints {
    /// Both hosts served from one base URL.
    pub fn single(base: impl Into<String>) -> Self {
        let base = base.into();
        Self {
            auth: base.clone(),
            api: base,
        }
    }
}

/// An HTTP client plus the hosts it talks to.
///
/// Cloning is cheap (`reqwest::Client` is reference-counted). Each session
/// holds its own handle; there is no process-wide default client.
#[derive(Debug, Clone)]
pub struct Transport {
    http: reqwest::Client,
    endpoints: Endpoints,
}

impl Transport {
    /// Transport against the production hosts.
    pub fn new() -> Result<Self> {
        Self::with_endpoints(Endpoints::default())
    }

    /// Transport with the crate's User-Agent and timeout against `endpoints`.
    pub fn with_endpoints(endpoints: Endpoints) -> Result<Self> {
        let http = reqwest::Client::builder()
            .user_agent(USER_AGENT)
            .timeout(REQUEST_TIMEOUT)
            .build()
            .map_err(Error::Transport)?;
        Ok(Self { http, endpoints })
    }

    /// Use a caller-built client (connection pool reuse, custom TLS).
    pub fn from_client(http: reqwest::Client, endpoints: Endpoints) -> Self {
        Self { http, endpoints }
    }

    pub fn http(&self) -> &reqwest::Client {
        &self.http
    }

    pub fn endpoints(&self) -> &Endpoints {
        &self.endpoints
    }

    /// Absolute URL for a path on the API host.
    pub fn api_url(&self, path: &str) -> String {
        format!(
            "{}/{}",
            self.endpoints.api.trim_end_matches('/'),
            path.trim_start_matches('/')
        )
    }
}
