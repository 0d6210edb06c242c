use thiserror::Error;

use crate::gateways::{GeocodingError, GeolocationError};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    #[error("No results found")]
    NoResultsFound,
    #[error("Error searching location: {0}")]
    Search(#[source] GeocodingError),
    #[error(transparent)]
    Geolocation(#[from] GeolocationError),
    #[error("Please select a location")]
    NoSelectionOnConfirm,
    #[error("A location lookup is still in progress")]
    Busy,
    #[error("The request was superseded by a newer selection")]
    Superseded,
    #[error("The location picker has been closed")]
    Closed,
}
