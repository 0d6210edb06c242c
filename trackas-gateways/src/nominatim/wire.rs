//! JSON format of the Nominatim API (`format=json`).

use serde::Deserialize;

use trackas_core::gateways::GeocodingError;
use trackas_entities::{geo::Coordinate, location::Place};

pub const REVERSE_PATH: &str = "reverse";
pub const SEARCH_PATH: &str = "search";

#[derive(Debug, Deserialize)]
pub struct ReverseResponse {
    pub display_name: Option<String>,
    /// Set instead of a result, e.g. "Unable to geocode"
    pub error: Option<String>,
}

impl ReverseResponse {
    pub fn into_display_name(self) -> Result<String, GeocodingError> {
        let Self {
            display_name,
            error,
        } = self;
        if let Some(err) = error {
            return Err(GeocodingError::Provider(err));
        }
        display_name
            .filter(|name| !name.trim().is_empty())
            .ok_or_else(|| GeocodingError::Response("missing display_name".to_string()))
    }
}

#[derive(Debug, Deserialize)]
pub struct SearchResult {
    // Nominatim encodes coordinates as strings
    pub lat: String,
    pub lon: String,
    pub display_name: String,
}

/// Convert search results into places, keeping their order.
///
/// Results with invalid coordinates are skipped.
pub fn into_places(results: Vec<SearchResult>) -> Vec<Place> {
    results
        .into_iter()
        .filter_map(|SearchResult { lat, lon, display_name }| {
            match Coordinate::parse_lat_lng_deg(&lat, &lon) {
                Ok(pos) => Some(Place { pos, display_name }),
                Err(err) => {
                    log::warn!("Skip search result '{display_name}': {err}");
                    None
                }
            }
        })
        .collect()
}

pub fn reverse_params(pos: Coordinate) -> [(&'static str, String); 3] {
    let (lat, lng) = pos.to_lat_lng_deg();
    [
        ("format", "json".to_string()),
        ("lat", lat.to_string()),
        ("lon", lng.to_string()),
    ]
}

pub fn search_params(query: &str) -> [(&'static str, &str); 2] {
    [("format", "json"), ("q", query)]
}
