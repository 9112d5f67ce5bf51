//! Plain-data HTTP types and the blocking transport behind them.
//!
//! # Design
//! `HttpRequest` and `HttpResponse` describe a round trip as plain data, so
//! request construction and response decoding stay testable without a
//! network. `Transport` is the one place the crate performs I/O: it executes
//! a request with a shared `ureq` agent and maps network-layer failures to
//! `ApiError::Transport`.
//!
//! The agent disables ureq's status-code-as-error behavior, so 4xx/5xx
//! responses come back as data like any other body. The client never
//! branches on the status; whatever the service sent goes to the decoder.

use crate::error::ApiError;

/// An HTTP GET request described as plain data.
///
/// Built by `W3wClient::build_*` methods. Query values are carried unencoded;
/// the transport percent-encodes them when the request is executed.
#[derive(Debug, Clone)]
pub struct HttpRequest {
    /// Absolute URL without the query string.
    pub url: String,
    pub query: Vec<(String, String)>,
    pub headers: Vec<(String, String)>,
}

/// An HTTP response described as plain data.
///
/// Produced by `Transport::get`, consumed by `W3wClient::parse_*` methods.
/// The status code is recorded but never interpreted by the client.
#[derive(Debug, Clone)]
pub struct HttpResponse {
    pub status: u16,
    pub body: String,
}

/// Blocking HTTP transport wrapping a `ureq::Agent`.
///
/// The agent owns the connection pool and is safe to share; `Transport` is
/// held by a client for its whole lifetime and cloned with it.
#[derive(Debug, Clone)]
pub struct Transport {
    agent: ureq::Agent,
}

impl Transport {
    pub fn new() -> Self {
        let agent = ureq::Agent::config_builder()
            .http_status_as_error(false)
            .build()
            .new_agent();
        Self { agent }
    }

    /// Execute a GET round trip. Fails with `ApiError::Transport` when the
    /// exchange dies before a body is available; never retries.
    pub fn get(&self, request: &HttpRequest) -> Result<HttpResponse, ApiError> {
        log::debug!("GET {} ({} query params)", request.url, request.query.len());

        let mut builder = self.agent.get(&request.url);
        for (name, value) in &request.headers {
            builder = builder.header(name.as_str(), value.as_str());
        }
        for (name, value) in &request.query {
            builder = builder.query(name.as_str(), value.as_str());
        }
        let mut response = builder
            .call()
            .map_err(|e| ApiError::Transport(e.to_string()))?;

        let status = response.status().as_u16();
        let body = response
            .body_mut()
            .read_to_string()
            .map_err(|e| ApiError::Transport(e.to_string()))?;
        log::debug!("GET {} -> {status} ({} bytes)", request.url, body.len());

        Ok(HttpResponse { status, body })
    }
}

impl Default for Transport {
    fn default() -> Self {
        Self::new()
    }
}
