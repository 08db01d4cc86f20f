//! HTTP client abstraction.
//!
//! The REST adapter talks through the [`HttpClient`] trait rather than a
//! concrete HTTP library, so tests can substitute a canned client and the
//! library can be swapped without touching the adapter.

use crate::error::{RemoteError, RemoteResult};
use std::time::Duration;

/// A plain HTTP response: status code and body text.
#[derive(Debug, Clone)]
pub struct HttpResponse {
    /// HTTP status code.
    pub status: u16,
    /// Response body.
    pub body: String,
}

impl HttpResponse {
    /// Returns true for a 2xx status.
    #[must_use]
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// HTTP client abstraction.
///
/// Errors are plain strings at this layer; the REST adapter wraps them
/// into [`RemoteError`] with retryability attached. Implementations must
/// apply their own request timeout - a hung call otherwise blocks the
/// whole logical operation.
pub trait HttpClient: Send + Sync {
    /// Sends a GET request.
    fn get(&self, url: &str, headers: &[(String, String)]) -> Result<HttpResponse, String>;

    /// Sends a POST request with a JSON body.
    fn post(
        &self,
        url: &str,
        headers: &[(String, String)],
        body: &str,
    ) -> Result<HttpResponse, String>;

    /// Sends a PATCH request with a JSON body.
    fn patch(
        &self,
        url: &str,
        headers: &[(String, String)],
        body: &str,
    ) -> Result<HttpResponse, String>;
}

/// Blocking [`HttpClient`] implementation over `reqwest`.
pub struct ReqwestClient {
    client: reqwest::blocking::Client,
}

impl ReqwestClient {
    /// Builds a client with the given per-request timeout.
    ///
    /// # Errors
    ///
    /// Returns an error if the underlying client cannot be constructed.
    pub fn new(timeout: Duration) -> RemoteResult<Self> {
        let client = reqwest::blocking::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| RemoteError::http_fatal(format!("http client init: {e}")))?;
        Ok(Self { client })
    }

    fn send(
        &self,
        builder: reqwest::blocking::RequestBuilder,
        headers: &[(String, String)],
    ) -> Result<HttpResponse, String> {
        let mut builder = builder;
        for (name, value) in headers {
            builder = builder.header(name.as_str(), value.as_str());
        }
        let response = builder.send().map_err(|e| e.to_string())?;
        let status = response.status().as_u16();
        let body = response.text().map_err(|e| e.to_string())?;
        Ok(HttpResponse { status, body })
    }
}

impl HttpClient for ReqwestClient {
    fn get(&self, url: &str, headers: &[(String, String)]) -> Result<HttpResponse, String> {
        self.send(self.client.get(url), headers)
    }

    fn post(
        &self,
        url: &str,
        headers: &[(String, String)],
        body: &str,
    ) -> Result<HttpResponse, String> {
        self.send(self.client.post(url).body(body.to_string()), headers)
    }

    fn patch(
        &self,
        url: &str,
        headers: &[(String, String)],
        body: &str,
    ) -> Result<HttpResponse, String> {
        self.send(self.client.patch(url).body(body.to_string()), headers)
    }
}
