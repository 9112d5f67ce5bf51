//! Synchronous client for the what3words geocoding API.
//!
//! # Overview
//! Translates three-word addresses and latitude/longitude pairs through the
//! service's HTTP endpoints (`/w3w`, `/position`, `/get-languages`) and
//! decodes the JSON responses into typed results.
//!
//! # Design
//! - `W3wClient` holds the API key, base URL, default `CallOptions`, and the
//!   transport agent. It carries no per-call state, so one instance can be
//!   shared across threads.
//! - Each operation is split into a `build_*` method that produces an
//!   `HttpRequest` and a `parse_*` method that consumes an `HttpResponse`,
//!   with the transport round trip between them. Both halves are public so
//!   request construction and decoding stay testable without a network.
//! - The HTTP status code is never inspected. A service error body reaches
//!   the decoder like any other response and surfaces as `ApiError::Decode`.

pub mod client;
pub mod error;
pub mod http;
pub mod types;

pub use client::{W3wClient, DEFAULT_ENDPOINT};
pub use error::ApiError;
pub use http::{HttpRequest, HttpResponse, Transport};
pub use types::{BoundingBox, CallOptions, Language, Languages, LatLng, Position, ThreeWordAddress};
