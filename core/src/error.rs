//! Error types for the what3words API client.
//!
//! # Design
//! `MissingApiKey` gets a dedicated variant because it is the only failure
//! a client can produce before touching the network. Everything that happens
//! during a call lands in `Transport` (the request never produced a body) or
//! `Decode` (the body did not match the expected shape), each carrying the
//! rendered underlying cause. No variant is ever retried internally.

use std::fmt;

/// Errors returned by `W3wClient` construction and call methods.
#[derive(Debug)]
pub enum ApiError {
    /// The API key was empty or whitespace-only at construction.
    MissingApiKey,

    /// The HTTP round-trip failed before a response body was available
    /// (connection refused, DNS failure, timeout).
    Transport(String),

    /// The response body could not be deserialized into the expected type.
    /// Service-level error payloads also surface here, since the client
    /// never inspects the HTTP status code.
    Decode(String),
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ApiError::MissingApiKey => write!(f, "no API key specified"),
            ApiError::Transport(msg) => write!(f, "transport failed: {msg}"),
            ApiError::Decode(msg) => write!(f, "decoding response failed: {msg}"),
        }
    }
}

impl std::error::Error for ApiError {}
