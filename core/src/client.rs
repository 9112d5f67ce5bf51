//! Request builder, executor, and response parser for the what3words API.
//!
//! # Design
//! `W3wClient` holds the API key, the base URL, the default `CallOptions`,
//! and the transport agent. Nothing mutates after construction, so one
//! client can serve concurrent callers. Each operation is split into a
//! `build_*` method that produces an `HttpRequest` and a `parse_*` method
//! that consumes an `HttpResponse`; the public operations compose the two
//! around a single transport round trip. Both result shapes decode through
//! one primitive generic over the expected type.

use serde::de::DeserializeOwned;

use crate::error::ApiError;
use crate::http::{HttpRequest, HttpResponse, Transport};
use crate::types::{CallOptions, Languages, LatLng, Position, ThreeWordAddress};

/// Endpoint of the public what3words deployment. Integration tests swap it
/// out via [`W3wClient::with_endpoint`].
pub const DEFAULT_ENDPOINT: &str = "https://api.what3words.com";

/// Client for the what3words HTTP API.
///
/// Construction validates the API key and allocates the transport agent; no
/// network call is made until an operation runs. Each operation is one
/// independent GET round trip with no retry, caching, or batching.
#[derive(Debug, Clone)]
pub struct W3wClient {
    api_key: String,
    base_url: String,
    defaults: CallOptions,
    transport: Transport,
}

impl W3wClient {
    /// Create a client against the public service endpoint.
    ///
    /// `defaults` applies to calls made without per-call options; when
    /// omitted, `CallOptions::default()` (language `en`, no corners) is
    /// used. Fails with `ApiError::MissingApiKey` when `api_key` is empty
    /// or whitespace-only; no other validation happens here.
    pub fn new(api_key: &str, defaults: Option<CallOptions>) -> Result<Self, ApiError> {
        Self::with_endpoint(api_key, DEFAULT_ENDPOINT, defaults)
    }

    /// Create a client against an explicit endpoint (for example a local
    /// test server). Same key validation as [`W3wClient::new`].
    pub fn with_endpoint(
        api_key: &str,
        base_url: &str,
        defaults: Option<CallOptions>,
    ) -> Result<Self, ApiError> {
        if api_key.trim().is_empty() {
            return Err(ApiError::MissingApiKey);
        }
        Ok(Self {
            api_key: api_key.to_string(),
            base_url: base_url.trim_end_matches('/').to_string(),
            defaults: defaults.unwrap_or_default(),
            transport: Transport::new(),
        })
    }

    /// Forward lookup: a three-word address to its position.
    pub fn lookup_by_address(
        &self,
        words: &ThreeWordAddress,
        opts: Option<&CallOptions>,
    ) -> Result<Position, ApiError> {
        let request = self.build_lookup_by_address(words, opts);
        self.parse_position(self.transport.get(&request)?)
    }

    /// Reverse lookup: a position to the three-word address of its square.
    pub fn lookup_by_position(
        &self,
        position: LatLng,
        opts: Option<&CallOptions>,
    ) -> Result<Position, ApiError> {
        let request = self.build_lookup_by_position(position, opts);
        self.parse_position(self.transport.get(&request)?)
    }

    /// Languages the service can answer in for the given address.
    pub fn languages_for_address(
        &self,
        words: &ThreeWordAddress,
        opts: Option<&CallOptions>,
    ) -> Result<Languages, ApiError> {
        let request = self.build_languages_for_address(words, opts);
        self.parse_languages(self.transport.get(&request)?)
    }

    /// Languages the service can answer in for the given position.
    pub fn languages_for_position(
        &self,
        position: LatLng,
        opts: Option<&CallOptions>,
    ) -> Result<Languages, ApiError> {
        let request = self.build_languages_for_position(position, opts);
        self.parse_languages(self.transport.get(&request)?)
    }

    pub fn build_lookup_by_address(
        &self,
        words: &ThreeWordAddress,
        opts: Option<&CallOptions>,
    ) -> HttpRequest {
        self.build_get("/w3w", ("string", words.query_value()), opts)
    }

    pub fn build_lookup_by_position(
        &self,
        position: LatLng,
        opts: Option<&CallOptions>,
    ) -> HttpRequest {
        self.build_get("/position", ("position", position.query_value()), opts)
    }

    pub fn build_languages_for_address(
        &self,
        words: &ThreeWordAddress,
        opts: Option<&CallOptions>,
    ) -> HttpRequest {
        self.build_get("/get-languages", ("string", words.query_value()), opts)
    }

    pub fn build_languages_for_position(
        &self,
        position: LatLng,
        opts: Option<&CallOptions>,
    ) -> HttpRequest {
        self.build_get("/get-languages", ("position", position.query_value()), opts)
    }

    pub fn parse_position(&self, response: HttpResponse) -> Result<Position, ApiError> {
        decode(response)
    }

    pub fn parse_languages(&self, response: HttpResponse) -> Result<Languages, ApiError> {
        decode(response)
    }

    /// Shared request construction: the operation parameter plus the key,
    /// then whichever options resolve for this call. A supplied `opts` is
    /// used verbatim in place of the stored defaults, even when its fields
    /// hold default values.
    fn build_get(
        &self,
        path: &str,
        param: (&str, String),
        opts: Option<&CallOptions>,
    ) -> HttpRequest {
        let mut query = vec![
            ("key".to_string(), self.api_key.clone()),
            (param.0.to_string(), param.1),
        ];
        opts.unwrap_or(&self.defaults).apply(&mut query);

        HttpRequest {
            url: format!("{}{path}", self.base_url),
            query,
            headers: vec![("accept".to_string(), "application/json".to_string())],
        }
    }
}

/// Decode a response body into the expected result shape. The status code
/// is not consulted; an error payload that does not match the shape fails
/// here as `ApiError::Decode`.
fn decode<T: DeserializeOwned>(response: HttpResponse) -> Result<T, ApiError> {
    serde_json::from_str(&response.body).map_err(|e| ApiError::Decode(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn client() -> W3wClient {
        W3wClient::new("KEY", None).unwrap()
    }

    fn pair(k: &str, v: &str) -> (String, String) {
        (k.to_string(), v.to_string())
    }

    #[test]
    fn new_rejects_empty_key() {
        let err = W3wClient::new("", None).unwrap_err();
        assert!(matches!(err, ApiError::MissingApiKey));
    }

    #[test]
    fn new_rejects_whitespace_key() {
        let err = W3wClient::new("  \t ", None).unwrap_err();
        assert!(matches!(err, ApiError::MissingApiKey));
    }

    #[test]
    fn new_accepts_nonempty_key() {
        assert!(W3wClient::new("KEY", None).is_ok());
    }

    #[test]
    fn build_lookup_by_address_produces_correct_request() {
        let words = ThreeWordAddress::from(["prom", "cape", "pump"]);
        let req = client().build_lookup_by_address(&words, None);
        assert_eq!(req.url, "https://api.what3words.com/w3w");
        assert_eq!(
            req.query,
            vec![
                pair("key", "KEY"),
                pair("string", "prom.cape.pump"),
                pair("lang", "en"),
            ]
        );
        assert_eq!(req.headers, vec![pair("accept", "application/json")]);
    }

    #[test]
    fn corners_param_is_omitted_when_false() {
        let words = ThreeWordAddress::from(["prom", "cape", "pump"]);
        let req = client().build_lookup_by_address(&words, Some(&CallOptions::new("en", false)));
        assert!(!req.query.iter().any(|(k, _)| k == "corners"));
    }

    #[test]
    fn corners_param_is_exactly_true_when_requested() {
        let words = ThreeWordAddress::from(["prom", "cape", "pump"]);
        let req = client().build_lookup_by_address(&words, Some(&CallOptions::new("en", true)));
        let corners: Vec<_> = req.query.iter().filter(|(k, _)| k == "corners").collect();
        assert_eq!(corners, vec![&pair("corners", "true")]);
    }

    #[test]
    fn empty_lang_falls_back_to_en() {
        let words = ThreeWordAddress::from(["prom", "cape", "pump"]);
        let req = client().build_lookup_by_address(&words, Some(&CallOptions::new("", false)));
        assert!(req.query.contains(&pair("lang", "en")));
    }

    #[test]
    fn stored_defaults_apply_without_per_call_options() {
        let c = W3wClient::new("KEY", Some(CallOptions::new("fr", true))).unwrap();
        let words = ThreeWordAddress::from(["prom", "cape", "pump"]);
        let req = c.build_lookup_by_address(&words, None);
        assert!(req.query.contains(&pair("lang", "fr")));
        assert!(req.query.contains(&pair("corners", "true")));
    }

    #[test]
    fn per_call_options_replace_defaults_wholesale() {
        // A zero-value per-call struct wins over the stored defaults; the
        // fields are not merged.
        let c = W3wClient::new("KEY", Some(CallOptions::new("fr", true))).unwrap();
        let words = ThreeWordAddress::from(["prom", "cape", "pump"]);
        let req = c.build_lookup_by_address(&words, Some(&CallOptions::default()));
        assert!(req.query.contains(&pair("lang", "en")));
        assert!(!req.query.iter().any(|(k, _)| k == "corners"));
    }

    #[test]
    fn build_lookup_by_position_formats_fifteen_fractional_digits() {
        let position = LatLng {
            lat: 51.484463,
            lng: -0.195405,
        };
        let req = client().build_lookup_by_position(position, None);
        assert_eq!(req.url, "https://api.what3words.com/position");
        let value = &req
            .query
            .iter()
            .find(|(k, _)| k == "position")
            .expect("position param")
            .1;
        assert_eq!(value, "51.484463000000000,-0.195405000000000");
        for part in value.split(',') {
            let (_, frac) = part.split_once('.').expect("fixed-point value");
            assert_eq!(frac.len(), 15);
        }
    }

    #[test]
    fn position_param_round_trips_through_text() {
        let position = LatLng {
            lat: -33.856783,
            lng: 151.215298,
        };
        let value = position.query_value();
        let (lat, lng) = value.split_once(',').unwrap();
        assert_eq!(lat.parse::<f64>().unwrap(), position.lat);
        assert_eq!(lng.parse::<f64>().unwrap(), position.lng);
    }

    #[test]
    fn build_languages_requests_target_shared_endpoint() {
        let words = ThreeWordAddress::from(["prom", "cape", "pump"]);
        let req = client().build_languages_for_address(&words, None);
        assert_eq!(req.url, "https://api.what3words.com/get-languages");
        assert!(req.query.contains(&pair("string", "prom.cape.pump")));

        let position = LatLng { lat: 1.0, lng: 2.0 };
        let req = client().build_languages_for_position(position, None);
        assert_eq!(req.url, "https://api.what3words.com/get-languages");
        assert!(req
            .query
            .contains(&pair("position", "1.000000000000000,2.000000000000000")));
    }

    #[test]
    fn trailing_slash_is_stripped_from_endpoint() {
        let c = W3wClient::with_endpoint("KEY", "http://localhost:3000/", None).unwrap();
        let words = ThreeWordAddress::from(["a", "b", "c"]);
        let req = c.build_lookup_by_address(&words, None);
        assert_eq!(req.url, "http://localhost:3000/w3w");
    }

    #[test]
    fn parse_position_without_corners() {
        let response = HttpResponse {
            status: 200,
            body: r#"{"type":"3 words","words":["prom","cape","pump"],"position":{"lat":51.484463,"lng":-0.195405},"language":"en"}"#.to_string(),
        };
        let position = client().parse_position(response).unwrap();
        assert_eq!(position.kind, "3 words");
        assert_eq!(position.words, ThreeWordAddress::from(["prom", "cape", "pump"]));
        assert_eq!(position.position.lat, 51.484463);
        assert_eq!(position.position.lng, -0.195405);
        assert!(position.corners.is_none());
        assert_eq!(position.language, "en");
    }

    #[test]
    fn parse_position_with_corners() {
        let response = HttpResponse {
            status: 200,
            body: r#"{"type":"3 words","words":["prom","cape","pump"],"position":{"lat":51.484463,"lng":-0.195405},"corners":{"sw":{"lat":51.484449,"lng":-0.195426},"ne":{"lat":51.484476,"lng":-0.195383}},"language":"en"}"#.to_string(),
        };
        let position = client().parse_position(response).unwrap();
        let corners = position.corners.expect("corners present");
        assert!(corners.sw.lat < corners.ne.lat);
        assert!(corners.sw.lng < corners.ne.lng);
    }

    #[test]
    fn parse_languages_success() {
        let response = HttpResponse {
            status: 200,
            body: r#"{"languages":[{"code":"en","name_display":"English"},{"code":"de","name_display":"Deutsch"}]}"#.to_string(),
        };
        let languages = client().parse_languages(response).unwrap();
        assert_eq!(languages.languages.len(), 2);
        assert_eq!(languages.languages[0].code, "en");
        assert_eq!(languages.languages[1].name, "Deutsch");
    }

    #[test]
    fn parse_languages_tolerates_missing_field() {
        let response = HttpResponse {
            status: 200,
            body: "{}".to_string(),
        };
        let languages = client().parse_languages(response).unwrap();
        assert!(languages.languages.is_empty());
    }

    #[test]
    fn parse_position_bad_json() {
        let response = HttpResponse {
            status: 200,
            body: "not json".to_string(),
        };
        let err = client().parse_position(response).unwrap_err();
        assert!(matches!(err, ApiError::Decode(_)));
    }

    #[test]
    fn parse_position_schema_mismatch() {
        // A service error payload is valid JSON but not a position; it must
        // surface as a decode failure, not a partial result.
        let response = HttpResponse {
            status: 401,
            body: r#"{"code":1,"message":"authentication failed"}"#.to_string(),
        };
        let err = client().parse_position(response).unwrap_err();
        assert!(matches!(err, ApiError::Decode(_)));
    }
}
