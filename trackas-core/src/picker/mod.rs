//! Interactive selection of a single location on a map.
//!
//! A [`LocationPicker`] owns the map canvas of a location dialog.
//! A location can be picked by clicking on the map, by using the
//! current position of the device or by searching for a place name.
//! Each of these requests is asynchronous. Only the request that was
//! started last is allowed to update the selection, results of older
//! requests are discarded.

use std::cell::RefCell;

use trackas_entities::{geo::Coordinate, location::SelectedLocation};

use crate::gateways::{GeocodingGateway, GeolocationGateway};

mod canvas;
mod error;
mod host;
mod state;

#[cfg(test)]
mod tests;

pub use self::{canvas::*, error::Error, host::*, state::*};

pub type Result<T> = std::result::Result<T, Error>;

pub const DEFAULT_FALLBACK_NAME: &str = "Unknown location";
pub const DEFAULT_ZOOM: f64 = 18.0;

#[derive(Debug, Clone, PartialEq)]
pub struct PickerOptions {
    /// Zoom level of the map after a location has been selected.
    pub zoom: f64,
    /// Name of a selected location that could not be resolved.
    pub fallback_name: String,
}

impl Default for PickerOptions {
    fn default() -> Self {
        Self {
            zoom: DEFAULT_ZOOM,
            fallback_name: DEFAULT_FALLBACK_NAME.to_string(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NameSource {
    Provider,
    Fallback,
}

/// The outcome of a successful selection request.
#[derive(Debug, Clone, PartialEq)]
pub struct Selection {
    pub location: SelectedLocation,
    pub name_source: NameSource,
}

#[derive(Debug)]
pub struct LocationPicker<M, G, L>
where
    M: MapCanvas,
{
    state: RefCell<PickerState<M>>,
    geocoding: G,
    geolocation: L,
    fallback_name: String,
}

impl<M, G, L> LocationPicker<M, G, L>
where
    M: MapCanvas,
    G: GeocodingGateway,
    L: GeolocationGateway,
{
    pub fn new(canvas: M, geocoding: G, geolocation: L, options: PickerOptions) -> Self {
        let PickerOptions {
            zoom,
            fallback_name,
        } = options;
        Self {
            state: RefCell::new(PickerState::new(canvas, zoom)),
            geocoding,
            geolocation,
            fallback_name,
        }
    }

    pub fn selection(&self) -> Option<SelectedLocation> {
        self.state.borrow().selection().cloned()
    }

    pub fn is_open(&self) -> bool {
        self.state.borrow().is_open()
    }

    /// A request is pending: search, current location and
    /// confirmation are rejected until it has finished.
    pub fn is_busy(&self) -> bool {
        self.state.borrow().is_busy()
    }

    pub fn with_canvas<T>(&self, f: impl FnOnce(&M) -> T) -> T {
        f(self.state.borrow().canvas())
    }

    pub async fn select_by_map_click(&self, pos: Coordinate) -> Result<Selection> {
        let ticket = self.state.borrow_mut().begin(Trigger::MapClick)?;
        self.select_resolved(ticket, pos).await
    }

    pub async fn select_by_current_location(&self) -> Result<Selection> {
        let ticket = self.state.borrow_mut().begin(Trigger::CurrentLocation)?;
        let pos = match self.geolocation.current_position().await {
            Ok(pos) => pos,
            Err(err) => {
                log::warn!("Unable to fetch the current location: {err}");
                self.state.borrow_mut().abort(ticket)?;
                return Err(err.into());
            }
        };
        log::debug!("Current device location: {pos}");
        if !self.state.borrow().is_current(ticket) {
            // Don't resolve a name that would be discarded anyway.
            return Err(Error::Superseded);
        }
        self.select_resolved(ticket, pos).await
    }

    /// Select the most relevant place matching `query`.
    ///
    /// Returns `Ok(None)` without sending any request if the query is blank.
    pub async fn search_by_text(&self, query: &str) -> Result<Option<Selection>> {
        let query = query.trim();
        if query.is_empty() {
            return Ok(None);
        }
        let ticket = self.state.borrow_mut().begin(Trigger::Search)?;
        let places = match self.geocoding.search(query).await {
            Ok(places) => places,
            Err(err) => {
                log::warn!("Unable to search for '{query}': {err}");
                self.state.borrow_mut().abort(ticket)?;
                return Err(Error::Search(err));
            }
        };
        let Some(place) = places.into_iter().next() else {
            log::info!("No places found for '{query}'");
            self.state.borrow_mut().abort(ticket)?;
            return Err(Error::NoResultsFound);
        };
        let location = SelectedLocation::from(place);
        self.state.borrow_mut().resolve(ticket, location.clone())?;
        log::info!("Selected '{}' ({})", location.display_name, location.pos);
        Ok(Some(Selection {
            location,
            name_source: NameSource::Provider,
        }))
    }

    /// Hand the selected location over to `host` and close the picker.
    pub fn confirm<H>(&self, host: &mut H) -> Result<SelectedLocation>
    where
        H: LocationHost + ?Sized,
    {
        let location = {
            let mut state = self.state.borrow_mut();
            if !state.is_open() {
                return Err(Error::Closed);
            }
            if state.is_busy() {
                return Err(Error::Busy);
            }
            if state.selection().is_none() {
                return Err(Error::NoSelectionOnConfirm);
            }
            state.close().ok_or(Error::NoSelectionOnConfirm)?
        };
        log::info!("Confirmed location '{}'", location.display_name);
        host.on_select_location(&location.display_name, location.pos);
        host.on_close();
        Ok(location)
    }

    /// Close the picker without handing over a location.
    pub fn cancel<H>(&self, host: &mut H) -> Result<()>
    where
        H: LocationHost + ?Sized,
    {
        {
            let mut state = self.state.borrow_mut();
            if !state.is_open() {
                return Err(Error::Closed);
            }
            state.close();
        }
        log::debug!("Location picker cancelled");
        host.on_close();
        Ok(())
    }

    async fn select_resolved(&self, ticket: Generation, pos: Coordinate) -> Result<Selection> {
        let (display_name, name_source) = match self.geocoding.reverse(pos).await {
            Ok(name) => (name, NameSource::Provider),
            Err(err) => {
                log::warn!("Reverse geocoding of {pos} failed: {err}");
                (self.fallback_name.clone(), NameSource::Fallback)
            }
        };
        let location = SelectedLocation::new(pos, display_name);
        self.state.borrow_mut().resolve(ticket, location.clone())?;
        log::info!("Selected '{}' ({pos})", location.display_name);
        Ok(Selection {
            location,
            name_source,
        })
    }
}
