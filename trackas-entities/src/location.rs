use crate::geo::*;

/// A candidate position returned by a geocoding provider.
#[derive(Debug, Clone, PartialEq)]
pub struct Place {
    pub pos: Coordinate,
    pub display_name: String,
}

/// The single location a user has picked on the map.
#[derive(Debug, Clone, PartialEq)]
pub struct SelectedLocation {
    pub pos: Coordinate,
    pub display_name: String,
}

impl SelectedLocation {
    pub fn new(pos: Coordinate, display_name: impl Into<String>) -> Self {
        Self {
            pos,
            display_name: display_name.into(),
        }
    }
}

impl From<Place> for SelectedLocation {
    fn from(from: Place) -> Self {
        let Place { pos, display_name } = from;
        Self { pos, display_name }
    }
}
