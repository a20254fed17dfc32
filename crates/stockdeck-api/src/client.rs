// Stockdeck service HTTP client
//
// Wraps `reqwest::Client` with envelope unwrapping, bearer credential
// attachment, and status-to-category error mapping. Endpoint groups
// (auth, stocks, movements, users) are implemented as inherent methods in
// separate files to keep this module focused on transport mechanics.

use arc_swap::ArcSwapOption;
use secrecy::{ExposeSecret, SecretString};
use serde::Serialize;
use serde::de::DeserializeOwned;
use std::sync::Arc;
use tracing::debug;
use url::Url;

use crate::error::Error;
use crate::transport::TransportConfig;
use crate::types::Envelope;

/// Raw HTTP client for the Stockdeck service.
///
/// Handles the `{ success, message, data }` envelope and attaches the
/// current bearer credential to every request when one is present. All
/// methods return unwrapped `data` payloads -- the envelope is stripped
/// before the caller sees it. The bearer slot is shared and swappable, so
/// one client instance serves the whole session lifecycle (anonymous,
/// authenticated, logged out again).
pub struct ApiClient {
    http: reqwest::Client,
    base_url: Url,
    bearer: ArcSwapOption<SecretString>,
}

impl ApiClient {
    /// Create a new client from a base URL and transport settings.
    pub fn new(base_url: Url, transport: &TransportConfig) -> Result<Self, Error> {
        let http = transport.build_client()?;
        Ok(Self {
            http,
            base_url: normalize_base_url(base_url),
            bearer: ArcSwapOption::empty(),
        })
    }

    /// Wrap an existing `reqwest::Client` (used by tests).
    pub fn from_reqwest(base_url: &str, http: reqwest::Client) -> Result<Self, Error> {
        let base_url = Url::parse(base_url)?;
        Ok(Self {
            http,
            base_url: normalize_base_url(base_url),
            bearer: ArcSwapOption::empty(),
        })
    }

    /// The service base URL.
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    // ── Bearer credential ────────────────────────────────────────────

    /// Install the bearer credential attached to subsequent requests.
    pub fn set_bearer(&self, token: SecretString) {
        self.bearer.store(Some(Arc::new(token)));
    }

    /// Drop the bearer credential; subsequent requests go out anonymous.
    pub fn clear_bearer(&self) {
        self.bearer.store(None);
    }

    /// Whether a bearer credential is currently installed.
    pub fn has_bearer(&self) -> bool {
        self.bearer.load().is_some()
    }

    // ── URL builder ──────────────────────────────────────────────────

    /// Join a relative path (e.g. `"stocks/movement"`) onto the base URL.
    pub(crate) fn url(&self, path: &str) -> Url {
        // base_url always ends with `/`, so joining a relative path works.
        self.base_url
            .join(path)
            .expect("path should be a valid relative URL")
    }

    // ── Request helpers ──────────────────────────────────────────────

    fn authorized(&self, req: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        match self.bearer.load_full() {
            Some(token) => req.bearer_auth(token.expose_secret()),
            None => req,
        }
    }

    /// Send a GET request and unwrap the envelope.
    pub(crate) async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T, Error> {
        let url = self.url(path);
        debug!("GET {url}");

        let resp = self
            .authorized(self.http.get(url))
            .send()
            .await
            .map_err(Error::Network)?;
        self.parse_envelope(resp).await
    }

    /// Send a POST request with a JSON body and unwrap the envelope.
    pub(crate) async fn post<T: DeserializeOwned>(
        &self,
        path: &str,
        body: &impl Serialize,
    ) -> Result<T, Error> {
        let url = self.url(path);
        debug!("POST {url}");

        let resp = self
            .authorized(self.http.post(url))
            .json(body)
            .send()
            .await
            .map_err(Error::Network)?;
        self.parse_envelope(resp).await
    }

    /// Send a POST request and discard any payload.
    pub(crate) async fn post_empty(&self, path: &str) -> Result<(), Error> {
        let url = self.url(path);
        debug!("POST {url}");

        let resp = self
            .authorized(self.http.post(url))
            .send()
            .await
            .map_err(Error::Network)?;
        self.parse_no_content(resp).await
    }

    /// Send a PATCH request with a JSON body and unwrap the envelope.
    pub(crate) async fn patch<T: DeserializeOwned>(
        &self,
        path: &str,
        body: &impl Serialize,
    ) -> Result<T, Error> {
        let url = self.url(path);
        debug!("PATCH {url}");

        let resp = self
            .authorized(self.http.patch(url))
            .json(body)
            .send()
            .await
            .map_err(Error::Network)?;
        self.parse_envelope(resp).await
    }

    /// Send a PATCH request with a JSON body and discard any payload.
    pub(crate) async fn patch_empty(
        &self,
        path: &str,
        body: &impl Serialize,
    ) -> Result<(), Error> {
        let url = self.url(path);
        debug!("PATCH {url}");

        let resp = self
            .authorized(self.http.patch(url))
            .json(body)
            .send()
            .await
            .map_err(Error::Network)?;
        self.parse_no_content(resp).await
    }

    /// Send a DELETE request and discard any payload.
    pub(crate) async fn delete(&self, path: &str) -> Result<(), Error> {
        let url = self.url(path);
        debug!("DELETE {url}");

        let resp = self
            .authorized(self.http.delete(url))
            .send()
            .await
            .map_err(Error::Network)?;
        self.parse_no_content(resp).await
    }

    // ── Envelope parsing ─────────────────────────────────────────────

    /// Parse the `{ success, message, data }` envelope, returning `data`
    /// on success. A non-2xx status or a `false` success flag becomes the
    /// matching taxonomy error, with the envelope message attached when
    /// one was present.
    async fn parse_envelope<T: DeserializeOwned>(
        &self,
        resp: reqwest::Response,
    ) -> Result<T, Error> {
        let status = resp.status();
        let body = resp.text().await.map_err(Error::Network)?;

        if !status.is_success() {
            return Err(Error::from_status(status, remote_message(&body)));
        }

        let envelope: Envelope<T> =
            serde_json::from_str(&body).map_err(|e| Error::Deserialization {
                message: e.to_string(),
                body: body.clone(),
            })?;

        if !envelope.success {
            return Err(Error::ValidationFailed {
                message: envelope
                    .message
                    .unwrap_or_else(|| "request rejected by the service".into()),
            });
        }

        envelope.data.ok_or_else(|| Error::Deserialization {
            message: "successful response carried no data field".into(),
            body,
        })
    }

    /// Like [`parse_envelope`](Self::parse_envelope) for endpoints whose
    /// success payload is empty (logout, deletes, password change). An
    /// entirely empty body on a 2xx status is accepted as well.
    async fn parse_no_content(&self, resp: reqwest::Response) -> Result<(), Error> {
        let status = resp.status();
        let body = resp.text().await.map_err(Error::Network)?;

        if !status.is_success() {
            return Err(Error::from_status(status, remote_message(&body)));
        }

        if body.trim().is_empty() {
            return Ok(());
        }

        let envelope: Envelope<serde_json::Value> =
            serde_json::from_str(&body).map_err(|e| Error::Deserialization {
                message: e.to_string(),
                body: body.clone(),
            })?;

        if !envelope.success {
            return Err(Error::ValidationFailed {
                message: envelope
                    .message
                    .unwrap_or_else(|| "request rejected by the service".into()),
            });
        }

        Ok(())
    }
}

/// Ensure the base URL path ends with `/` so relative joins append instead
/// of replacing the last segment.
fn normalize_base_url(mut url: Url) -> Url {
    if !url.path().ends_with('/') {
        let path = format!("{}/", url.path());
        url.set_path(&path);
    }
    url
}

/// Best-effort extraction of the service's message from an error body.
fn remote_message(body: &str) -> Option<String> {
    let envelope: Envelope<serde_json::Value> = serde_json::from_str(body).ok()?;
    envelope.message.filter(|m| !m.is_empty())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn base_url_join_appends() {
        let client =
            ApiClient::from_reqwest("https://inventory.example.com", reqwest::Client::new())
                .unwrap();
        assert_eq!(
            client.url("stocks/movement/42").as_str(),
            "https://inventory.example.com/stocks/movement/42"
        );
    }

    #[test]
    fn remote_message_ignores_garbage() {
        assert_eq!(remote_message("not json"), None);
        assert_eq!(
            remote_message(r#"{"success":false,"message":"nope","data":null}"#),
            Some("nope".into())
        );
    }
}
