use async_trait::async_trait;
use thiserror::Error;

use trackas_entities::{geo::Coordinate, location::Place};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GeocodingError {
    #[error("Geocoding request failed: {0}")]
    Request(String),
    #[error("Geocoding provider error: {0}")]
    Provider(String),
    #[error("Unexpected geocoding response: {0}")]
    Response(String),
}

#[async_trait(?Send)]
pub trait GeocodingGateway {
    /// Resolve a human-readable name for a position.
    async fn reverse(&self, pos: Coordinate) -> Result<String, GeocodingError>;

    /// Find candidate places for a free-text query,
    /// ordered by relevance.
    async fn search(&self, query: &str) -> Result<Vec<Place>, GeocodingError>;
}
