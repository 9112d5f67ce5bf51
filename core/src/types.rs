//! Domain DTOs for the what3words API.
//!
//! # Design
//! These types mirror the service's wire schema but are defined
//! independently from the mock-server crate; integration tests catch schema
//! drift between the two. Response types use owned fields and are immutable
//! once decoded. `CallOptions::default()` is the single source of the
//! fallback configuration so no shared mutable defaults value exists.

use serde::{Deserialize, Serialize};

/// A three-word address: exactly three ordered word tokens.
///
/// The query form joins the tokens with `.` (for example `prom.cape.pump`).
/// No validation happens beyond the arity enforced by the array type; the
/// service rejects malformed addresses itself.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ThreeWordAddress(pub [String; 3]);

impl ThreeWordAddress {
    /// The `string` query parameter value: tokens joined with `.`, no
    /// leading or trailing separator.
    pub fn query_value(&self) -> String {
        self.0.join(".")
    }
}

impl From<[&str; 3]> for ThreeWordAddress {
    fn from(words: [&str; 3]) -> Self {
        Self(words.map(str::to_string))
    }
}

/// A latitude/longitude pair in decimal degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LatLng {
    pub lat: f64,
    pub lng: f64,
}

impl LatLng {
    /// The `position` query parameter value: fixed-point with 15 fractional
    /// digits per component, comma-separated, no spaces. The service rejects
    /// scientific notation, so the width matters.
    pub fn query_value(&self) -> String {
        format!("{:.15},{:.15}", self.lat, self.lng)
    }
}

/// The southwest/northeast corners of the square a three-word address names.
///
/// Produced only by decoding service responses; callers never construct one.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BoundingBox {
    pub sw: LatLng,
    pub ne: LatLng,
}

/// Decoded response of the two lookup operations.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Position {
    /// Result-type tag reported by the service (`"3 words"` for lookups).
    #[serde(rename = "type")]
    pub kind: String,
    pub words: ThreeWordAddress,
    pub position: LatLng,
    /// Present only when corner data was requested and the service
    /// returned it.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub corners: Option<BoundingBox>,
    pub language: String,
}

/// One supported response language.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Language {
    pub code: String,
    #[serde(rename = "name_display")]
    pub name: String,
}

/// Decoded response of the language discovery operations. The list may be
/// empty, never null; a response without a `languages` field decodes to an
/// empty list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Languages {
    #[serde(default)]
    pub languages: Vec<Language>,
}

/// Per-call configuration shared by every operation.
///
/// Supplied per call, or once at client construction as the fallback. A
/// per-call value replaces the client default wholesale; fields are never
/// merged.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CallOptions {
    /// Response language code. An empty string resolves to `en` at query
    /// build time.
    pub lang: String,
    /// Request corner data in lookup responses. Contributes `corners=true`
    /// when set; the parameter is omitted entirely when unset.
    pub corners: bool,
}

impl CallOptions {
    pub fn new(lang: &str, corners: bool) -> Self {
        Self {
            lang: lang.to_string(),
            corners,
        }
    }

    /// Append the `lang` and `corners` query parameters these options
    /// resolve to.
    pub(crate) fn apply(&self, query: &mut Vec<(String, String)>) {
        let lang = if self.lang.is_empty() { "en" } else { &self.lang };
        query.push(("lang".to_string(), lang.to_string()));
        if self.corners {
            query.push(("corners".to_string(), "true".to_string()));
        }
    }
}

impl Default for CallOptions {
    fn default() -> Self {
        Self {
            lang: "en".to_string(),
            corners: false,
        }
    }
}
