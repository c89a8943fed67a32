//! Driving-distance lookups via the Google Distance Matrix API.
//!
//! The adapter normalizes provider units (metres, seconds) into domain
//! units (kilometres to 2 decimals, whole minutes rounded up) and
//! degrades to `None` on any failure: missing credential, transport
//! error, non-OK provider status, unroutable pair, or absent fields.
//! It never substitutes an estimate itself; callers own the fallback so
//! the degradation is logged where the booking decision is made.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use tracing::error;

use super::calculators::round_money;

const DISTANCE_MATRIX_URL: &str = "https://maps.googleapis.com/maps/api/distancematrix/json";

/// Distance and duration of a driving route, in domain units.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DistanceResult {
    #[serde(with = "rust_decimal::serde::str")]
    pub distance_km: Decimal,
    pub distance_text: String,
    pub duration_minutes: i64,
    pub duration_text: String,
}

impl DistanceResult {
    /// Fixed placeholder estimate used when the provider is
    /// unreachable. Bookings proceed on this rather than hard-failing.
    pub fn fallback() -> Self {
        Self {
            distance_km: dec!(50),
            distance_text: "50 km (estimé)".to_string(),
            duration_minutes: 45,
            duration_text: "45 min (estimé)".to_string(),
        }
    }
}

#[derive(Debug, Deserialize)]
struct DistanceMatrixResponse {
    status: String,
    #[serde(default)]
    rows: Vec<MatrixRow>,
}

#[derive(Debug, Deserialize)]
struct MatrixRow {
    #[serde(default)]
    elements: Vec<MatrixElement>,
}

#[derive(Debug, Deserialize)]
struct MatrixElement {
    status: String,
    distance: Option<ValueText>,
    duration: Option<ValueText>,
}

/// Provider value pair: machine units plus localized human text.
#[derive(Debug, Deserialize)]
struct ValueText {
    text: String,
    value: i64,
}

/// Client for the Distance Matrix API.
#[derive(Clone)]
pub struct DistanceClient {
    http: reqwest::Client,
    api_key: Option<String>,
    base_url: String,
}

impl DistanceClient {
    /// Creates a new client with the given API key.
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            http: reqwest::Client::new(),
            api_key: Some(api_key.into()),
            base_url: DISTANCE_MATRIX_URL.to_string(),
        }
    }

    /// Creates a client from `GOOGLE_MAPS_API_KEY`. With the variable
    /// unset the client stays usable but every lookup degrades.
    pub fn from_env() -> Self {
        Self {
            http: reqwest::Client::new(),
            api_key: std::env::var("GOOGLE_MAPS_API_KEY").ok(),
            base_url: DISTANCE_MATRIX_URL.to_string(),
        }
    }

    /// Creates a new client with a custom base URL.
    pub fn with_base_url(api_key: impl Into<String>, base_url: impl Into<String>) -> Self {
        Self {
            http: reqwest::Client::new(),
            api_key: Some(api_key.into()),
            base_url: base_url.into(),
        }
    }

    /// Look up the driving distance and duration between two addresses.
    ///
    /// Human-readable text fields come back in French, the deployment's
    /// language. Returns `None` on any failure; never errors.
    pub async fn lookup(&self, origin: &str, destination: &str) -> Option<DistanceResult> {
        let api_key = match self.api_key.as_deref() {
            Some(key) => key,
            None => {
                error!("GOOGLE_MAPS_API_KEY is not configured");
                return None;
            }
        };

        let request = self.http.get(&self.base_url).query(&[
            ("origins", origin),
            ("destinations", destination),
            ("key", api_key),
            ("mode", "driving"),
            ("language", "fr"),
        ]);

        let response = match request.send().await {
            Ok(response) => response,
            Err(e) => {
                error!("Distance Matrix request failed: {}", e);
                return None;
            }
        };

        if !response.status().is_success() {
            error!(status = %response.status(), "Distance Matrix returned an error status");
            return None;
        }

        let body: DistanceMatrixResponse = match response.json().await {
            Ok(body) => body,
            Err(e) => {
                error!("Failed to decode Distance Matrix response: {}", e);
                return None;
            }
        };

        parse_distance_matrix(body)
    }
}

/// Extract the single origin/destination element and convert units.
fn parse_distance_matrix(response: DistanceMatrixResponse) -> Option<DistanceResult> {
    if response.status != "OK" {
        error!(status = %response.status, "Distance Matrix rejected the request");
        return None;
    }

    let element = response.rows.into_iter().next()?.elements.into_iter().next()?;

    if element.status != "OK" {
        error!(status = %element.status, "No route for this origin/destination pair");
        return None;
    }

    let distance = element.distance?;
    let duration = element.duration?;

    let distance_km = round_money(Decimal::from(distance.value) / dec!(1000), 2);
    // Seconds round up to whole minutes
    let duration_minutes = (duration.value + 59) / 60;

    Some(DistanceResult {
        distance_km,
        distance_text: distance.text,
        duration_minutes,
        duration_text: duration.text,
    })
}
