//! Request executor
//!
//! Every authenticated call goes through `Session::execute`: lazy refresh,
//! cookie attachment, then status/JSON handling. No retries happen here; a
//! caller who wants them wraps the call.

use reqwest::header::COOKIE;
use reqwest::{Method, StatusCode};
use serde::de::DeserializeOwned;
use tracing::{debug, warn};

use myaussie_auth::{cookie_header, reason_phrase};

use crate::classify::{ErrorClassification, classify_status};
use crate::error::{Error, Result};
use crate::resources::Resource;
use crate::session::{RefreshOutcome, Session};

/// Outgoing request body.
#[derive(Debug, Clone)]
pub enum RequestBody {
    /// `application/x-www-form-urlencoded`, as the login endpoint expects
    Form(Vec<(String, String)>),
    /// `application/json`, for mutation calls
    Json(serde_json::Value),
}

/// Substitute `{name}` placeholders in a path template.
///
/// Values are inserted verbatim; unknown placeholders are left in place and
/// will 404 on the server.
pub fn expand_path(template: &str, params: &[(&str, String)]) -> String {
    params.iter().fold(template.to_string(), |path, (name, value)| {
        path.replace(&format!("{{{name}}}"), value)
    })
}

impl Session {
    /// Send one request to the API host and decode the 200 body as JSON.
    ///
    /// A failed pre-request refresh does not stop the call: the request goes
    /// out with the current cookie and the server's answer decides.
    pub async fn execute(
        &self,
        method: Method,
        path_template: &str,
        path_params: &[(&str, String)],
        body: Option<RequestBody>,
    ) -> Result<serde_json::Value> {
        match self.refresh_if_needed().await {
            Ok(RefreshOutcome::Refreshed) => debug!("session refreshed before request"),
            Ok(RefreshOutcome::NotNeeded) => {}
            Err(Error::MissingRefreshToken) => {
                debug!("no refresh token, sending with current cookie")
            }
            Err(e) => warn!(error = %e, "refresh failed, sending with current cookie"),
        }

        let path = expand_path(path_template, path_params);
        let url = self.transport.api_url(&path);
        let cookie = self.cookie().await;

        let mut request = self
            .transport
            .http()
            .request(method.clone(), &url)
            .header(COOKIE, cookie_header(&cookie));
        request = match body {
            Some(RequestBody::Form(fields)) => request.form(&fields),
            Some(RequestBody::Json(value)) => request.json(&value),
            None => request,
        };

        let response = request.send().await.map_err(Error::Transport)?;

        let status = response.status();
        if status != StatusCode::OK {
            let code = status.as_u16();
            if classify_status(code) == ErrorClassification::AuthRejected {
                self.mark_expired();
            }
            debug!(%method, path = %path, status = code, "request failed");
            return Err(Error::Http {
                status: code,
                reason: reason_phrase(status),
            });
        }

        let bytes = response.bytes().await.map_err(Error::Transport)?;
        debug!(%method, path = %path, bytes = bytes.len(), "request succeeded");
        serde_json::from_slice(&bytes).map_err(Error::Decode)
    }

    /// Execute a resource descriptor and decode the body into its shape.
    pub async fn fetch<T: DeserializeOwned>(&self, resource: &Resource<T>) -> Result<T> {
        let value = self
            .execute(
                resource.method.clone(),
                resource.path_template,
                &resource.params,
                None,
            )
            .await?;
        serde_json::from_value(value).map_err(Error::Decode)
    }
}
