use std::fmt;

use trackas_entities::geo::Coordinate;

/// The interactive map a picker draws its marker on.
pub trait MapCanvas {
    /// Handle of a marker that has been added to the map.
    type Marker: fmt::Debug;

    fn add_marker(&mut self, pos: Coordinate, label: &str) -> Self::Marker;
    fn remove_marker(&mut self, marker: Self::Marker);
    fn set_view(&mut self, center: Coordinate, zoom: f64);
}
