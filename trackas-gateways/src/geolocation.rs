use async_trait::async_trait;

use trackas_core::gateways::{GeolocationError, GeolocationGateway};
use trackas_entities::geo::Coordinate;

/// Device location of a host without positioning hardware.
///
/// Reports a preconfigured position or, if there is none,
/// that geolocation is not supported.
#[derive(Debug, Clone, Copy, Default)]
pub struct ConfiguredPosition(Option<Coordinate>);

impl ConfiguredPosition {
    pub const fn new(pos: Option<Coordinate>) -> Self {
        Self(pos)
    }
}

#[async_trait(?Send)]
impl GeolocationGateway for ConfiguredPosition {
    async fn current_position(&self) -> Result<Coordinate, GeolocationError> {
        self.0.ok_or_else(|| {
            log::debug!("No device position configured");
            GeolocationError::Unsupported
        })
    }
}
