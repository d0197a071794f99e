// Gateway HTTP client
//
// Wraps `reqwest::Client` with gateway URL construction and the
// "HTTP 200 or failure" response contract. Endpoint groups (config, wifi,
// server, modules, dashboard) are implemented as inherent methods in
// separate files to keep this module focused on transport mechanics.

use std::time::Duration;

use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::{debug, trace};
use url::Url;

use crate::error::Error;
use crate::transport::TransportConfig;

/// Raw HTTP client for the Hidra gateway API.
///
/// Every endpoint answers JSON; success is signalled by HTTP 200 and
/// nothing else. Bodies are decoded into the typed schemas in
/// [`crate::models`] and rejected as [`Error::MalformedResponse`] when they
/// don't fit.
pub struct GatewayClient {
    http: reqwest::Client,
    base_url: Url,
    timeout: Duration,
}

impl GatewayClient {
    /// Create a new client from a `TransportConfig`.
    ///
    /// The `base_url` is the gateway root (e.g. `http://192.168.4.1`).
    pub fn new(base_url: Url, transport: &TransportConfig) -> Result<Self, Error> {
        let http = transport.build_client()?;
        Ok(Self {
            http,
            base_url,
            timeout: transport.timeout,
        })
    }

    /// Create a client with a pre-built `reqwest::Client`.
    pub fn with_client(http: reqwest::Client, base_url: Url) -> Self {
        Self {
            http,
            base_url,
            timeout: TransportConfig::default().timeout,
        }
    }

    /// The gateway base URL.
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    // ── URL builders ─────────────────────────────────────────────────

    /// Build a full URL for a gateway path: `{base}/{path}`.
    pub(crate) fn url(&self, path: &str) -> Result<Url, Error> {
        let base = self.base_url.as_str().trim_end_matches('/');
        let path = path.trim_start_matches('/');
        Ok(Url::parse(&format!("{base}/{path}"))?)
    }

    // ── Request helpers ──────────────────────────────────────────────

    /// Send a GET request and decode the body.
    pub(crate) async fn get<T: DeserializeOwned>(&self, url: Url) -> Result<T, Error> {
        debug!("GET {}", url);

        let resp = self
            .http
            .get(url)
            .send()
            .await
            .map_err(|e| self.transport_error(e))?;

        self.parse_response(resp).await
    }

    /// Send a POST request with a JSON body and decode the reply.
    pub(crate) async fn post<T: DeserializeOwned>(
        &self,
        url: Url,
        body: &(impl Serialize + Sync),
    ) -> Result<T, Error> {
        debug!("POST {}", url);

        let resp = self
            .http
            .post(url)
            .json(body)
            .send()
            .await
            .map_err(|e| self.transport_error(e))?;

        self.parse_response(resp).await
    }

    /// Send a DELETE request, optionally with a JSON body, and decode the reply.
    pub(crate) async fn delete<T: DeserializeOwned>(
        &self,
        url: Url,
        body: Option<&serde_json::Value>,
    ) -> Result<T, Error> {
        debug!("DELETE {}", url);

        let mut builder = self.http.delete(url);
        if let Some(body) = body {
            builder = builder.json(body);
        }
        let resp = builder.send().await.map_err(|e| self.transport_error(e))?;

        self.parse_response(resp).await
    }

    /// Enforce the HTTP 200 contract, then decode the JSON body.
    async fn parse_response<T: DeserializeOwned>(&self, resp: reqwest::Response) -> Result<T, Error> {
        let status = resp.status();

        if status != reqwest::StatusCode::OK {
            let body = resp.text().await.unwrap_or_default();
            return Err(Error::Status {
                status: status.as_u16(),
                body: preview(&body).to_owned(),
            });
        }

        let body = resp.text().await.map_err(|e| self.transport_error(e))?;
        trace!(bytes = body.len(), "response body received");

        serde_json::from_str(&body).map_err(|e| Error::MalformedResponse {
            message: format!("{e} (body preview: {:?})", preview(&body)),
            body: body.clone(),
        })
    }

    fn transport_error(&self, err: reqwest::Error) -> Error {
        if err.is_timeout() {
            Error::Timeout {
                timeout_secs: self.timeout.as_secs(),
            }
        } else {
            Error::Transport(err)
        }
    }
}

/// First 200 bytes of a body, cut on a char boundary.
fn preview(body: &str) -> &str {
    let mut end = body.len().min(200);
    while !body.is_char_boundary(end) {
        end -= 1;
    }
    &body[..end]
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn client(base: &str) -> GatewayClient {
        GatewayClient::with_client(reqwest::Client::new(), Url::parse(base).unwrap())
    }

    #[test]
    fn url_joins_without_double_slash() {
        let c = client("http://192.168.4.1/");
        assert_eq!(
            c.url("/wifi/status").unwrap().as_str(),
            "http://192.168.4.1/wifi/status"
        );
    }

    #[test]
    fn url_keeps_base_path_prefix() {
        let c = client("http://localhost:8000/gw");
        assert_eq!(
            c.url("modules/3/date").unwrap().as_str(),
            "http://localhost:8000/gw/modules/3/date"
        );
    }

    #[test]
    fn preview_respects_char_boundaries() {
        let body = "é".repeat(150);
        let p = preview(&body);
        assert!(p.len() <= 200);
        assert!(body.starts_with(p));
    }
}
