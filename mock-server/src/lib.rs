use axum::{extract::Query, http::StatusCode, routing::get, Json, Router};
use serde::{Deserialize, Serialize};
use tokio::net::TcpListener;

#[derive(Clone, Copy, Debug, Serialize, Deserialize)]
pub struct LatLng {
    pub lat: f64,
    pub lng: f64,
}

#[derive(Clone, Copy, Debug, Serialize, Deserialize)]
pub struct BoundingBox {
    pub sw: LatLng,
    pub ne: LatLng,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Position {
    #[serde(rename = "type")]
    pub kind: String,
    pub words: [String; 3],
    pub position: LatLng,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub corners: Option<BoundingBox>,
    pub language: String,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Language {
    pub code: String,
    pub name_display: String,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Languages {
    pub languages: Vec<Language>,
}

/// Error payload in the service's wire format, returned alongside a non-2xx
/// status.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ErrorBody {
    pub code: u16,
    pub message: String,
}

/// Query parameters accepted by every route. Validation happens in the
/// handlers so requests with missing parameters get a service-style error
/// body instead of an extractor rejection.
#[derive(Debug, Deserialize)]
pub struct LookupParams {
    #[serde(default)]
    pub key: String,
    pub string: Option<String>,
    pub position: Option<String>,
    pub lang: Option<String>,
    pub corners: Option<String>,
}

type Rejection = (StatusCode, Json<ErrorBody>);

const SUPPORTED_LANGUAGES: &[(&str, &str)] = &[
    ("en", "English"),
    ("de", "Deutsch"),
    ("fr", "Français"),
    ("pt", "Português"),
];

/// Centre of the square every address lookup resolves to.
const CELL_CENTRE: LatLng = LatLng {
    lat: 51.484463,
    lng: -0.195405,
};

// Half-extent of a mock square, roughly three metres.
const HALF_CELL: f64 = 0.0000135;

pub fn app() -> Router {
    Router::new()
        .route("/w3w", get(lookup_by_address))
        .route("/position", get(lookup_by_position))
        .route("/get-languages", get(get_languages))
}

pub async fn run(listener: TcpListener) -> Result<(), std::io::Error> {
    axum::serve(listener, app()).await
}

async fn lookup_by_address(Query(params): Query<LookupParams>) -> Result<Json<Position>, Rejection> {
    let language = validate(&params)?;
    let raw = params
        .string
        .as_deref()
        .ok_or_else(|| bad_request(2, "missing string parameter"))?;

    let words: [String; 3] = raw
        .split('.')
        .map(str::to_string)
        .collect::<Vec<_>>()
        .try_into()
        .map_err(|_| bad_request(2, "string must contain exactly three words"))?;

    Ok(Json(Position {
        kind: "3 words".to_string(),
        words,
        position: CELL_CENTRE,
        corners: corners_requested(&params).then(|| square_around(CELL_CENTRE)),
        language,
    }))
}

async fn lookup_by_position(
    Query(params): Query<LookupParams>,
) -> Result<Json<Position>, Rejection> {
    let language = validate(&params)?;
    let raw = params
        .position
        .as_deref()
        .ok_or_else(|| bad_request(2, "missing position parameter"))?;
    let position = parse_lat_lng(raw).ok_or_else(|| bad_request(2, "unparseable position"))?;

    Ok(Json(Position {
        kind: "3 words".to_string(),
        words: ["prom", "cape", "pump"].map(str::to_string),
        position,
        corners: corners_requested(&params).then(|| square_around(position)),
        language,
    }))
}

async fn get_languages(Query(params): Query<LookupParams>) -> Result<Json<Languages>, Rejection> {
    validate(&params)?;
    if params.string.is_none() && params.position.is_none() {
        return Err(bad_request(2, "missing string or position parameter"));
    }

    let languages = SUPPORTED_LANGUAGES
        .iter()
        .map(|(code, name)| Language {
            code: (*code).to_string(),
            name_display: (*name).to_string(),
        })
        .collect();
    Ok(Json(Languages { languages }))
}

/// Shared checks: the key must be present and the resolved language
/// supported. Returns the resolved language code.
fn validate(params: &LookupParams) -> Result<String, Rejection> {
    if params.key.is_empty() {
        return Err((
            StatusCode::UNAUTHORIZED,
            Json(ErrorBody {
                code: 1,
                message: "missing or empty API key".to_string(),
            }),
        ));
    }

    let language = match params.lang.as_deref() {
        None | Some("") => "en",
        Some(lang) => lang,
    };
    if !SUPPORTED_LANGUAGES.iter().any(|(code, _)| *code == language) {
        return Err(bad_request(3, "unsupported language"));
    }
    Ok(language.to_string())
}

fn bad_request(code: u16, message: &str) -> Rejection {
    (
        StatusCode::BAD_REQUEST,
        Json(ErrorBody {
            code,
            message: message.to_string(),
        }),
    )
}

fn corners_requested(params: &LookupParams) -> bool {
    params.corners.as_deref() == Some("true")
}

fn square_around(centre: LatLng) -> BoundingBox {
    BoundingBox {
        sw: LatLng {
            lat: centre.lat - HALF_CELL,
            lng: centre.lng - HALF_CELL,
        },
        ne: LatLng {
            lat: centre.lat + HALF_CELL,
            lng: centre.lng + HALF_CELL,
        },
    }
}

fn parse_lat_lng(raw: &str) -> Option<LatLng> {
    let (lat, lng) = raw.split_once(',')?;
    Some(LatLng {
        lat: lat.parse().ok()?,
        lng: lng.parse().ok()?,
    })
}
