use trackas_entities::geo::Coordinate;

/// The form that opened a picker and receives its result.
pub trait LocationHost {
    /// Called once when the user confirms a location.
    fn on_select_location(&mut self, name: &str, pos: Coordinate);

    /// Called after confirmation or when the user cancels.
    fn on_close(&mut self);
}
