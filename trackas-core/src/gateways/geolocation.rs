use async_trait::async_trait;
use thiserror::Error;

use trackas_entities::geo::Coordinate;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GeolocationError {
    #[error("Geolocation is not supported on this device")]
    Unsupported,
    #[error("Permission to access the current location was denied")]
    Denied,
    #[error("Timed out while fetching the current location")]
    Timeout,
    #[error("Error fetching location: {0}")]
    Unavailable(String),
}

#[async_trait(?Send)]
pub trait GeolocationGateway {
    async fn current_position(&self) -> Result<Coordinate, GeolocationError>;
}
