use trackas_entities::location::SelectedLocation;

use super::{canvas::MapCanvas, Error, Result};

/// Identifies a selection request.
///
/// Only the request that was started last may update the selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct Generation(u64);

impl Generation {
    const fn next(self) -> Self {
        Self(self.0 + 1)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Trigger {
    MapClick,
    CurrentLocation,
    Search,
}

#[derive(Debug)]
struct Pinned<K> {
    location: SelectedLocation,
    marker: K,
}

/// Selection state of a picker without any I/O.
///
/// The selected location and its map marker are kept in a single
/// slot, so there is either one of each or none.
#[derive(Debug)]
pub struct PickerState<M: MapCanvas> {
    canvas: M,
    zoom: f64,
    pinned: Option<Pinned<M::Marker>>,
    latest: Generation,
    pending: Option<Generation>,
    open: bool,
}

impl<M: MapCanvas> PickerState<M> {
    pub const fn new(canvas: M, zoom: f64) -> Self {
        Self {
            canvas,
            zoom,
            pinned: None,
            latest: Generation(0),
            pending: None,
            open: true,
        }
    }

    pub const fn canvas(&self) -> &M {
        &self.canvas
    }

    pub fn selection(&self) -> Option<&SelectedLocation> {
        self.pinned.as_ref().map(|p| &p.location)
    }

    pub const fn is_open(&self) -> bool {
        self.open
    }

    pub const fn is_busy(&self) -> bool {
        self.pending.is_some()
    }

    pub fn is_current(&self, ticket: Generation) -> bool {
        self.open && ticket == self.latest
    }

    /// Start a new request.
    ///
    /// A map click is always accepted and supersedes any pending request,
    /// all other triggers are rejected while a request is pending.
    pub fn begin(&mut self, trigger: Trigger) -> Result<Generation> {
        if !self.open {
            return Err(Error::Closed);
        }
        if self.is_busy() && trigger != Trigger::MapClick {
            return Err(Error::Busy);
        }
        self.latest = self.latest.next();
        self.pending = Some(self.latest);
        log::debug!("Started {trigger:?} request {:?}", self.latest);
        Ok(self.latest)
    }

    /// Replace the current selection with the result of a request.
    pub fn resolve(&mut self, ticket: Generation, location: SelectedLocation) -> Result<()> {
        self.ensure_current(ticket)?;
        if let Some(Pinned { marker, .. }) = self.pinned.take() {
            self.canvas.remove_marker(marker);
        }
        let marker = self.canvas.add_marker(location.pos, &location.display_name);
        self.canvas.set_view(location.pos, self.zoom);
        self.pinned = Some(Pinned { location, marker });
        self.pending = None;
        Ok(())
    }

    /// Finish a request without changing the selection.
    pub fn abort(&mut self, ticket: Generation) -> Result<()> {
        self.ensure_current(ticket)?;
        self.pending = None;
        Ok(())
    }

    /// Discard the selection and its marker and reject all further requests.
    pub fn close(&mut self) -> Option<SelectedLocation> {
        self.open = false;
        self.pending = None;
        self.latest = self.latest.next();
        self.pinned.take().map(|Pinned { location, marker }| {
            self.canvas.remove_marker(marker);
            location
        })
    }

    fn ensure_current(&self, ticket: Generation) -> Result<()> {
        if !self.open {
            log::debug!("Discard result of request {ticket:?}: picker closed");
            return Err(Error::Closed);
        }
        if ticket != self.latest {
            log::debug!(
                "Discard result of request {ticket:?}: superseded by {:?}",
                self.latest
            );
            return Err(Error::Superseded);
        }
        Ok(())
    }
}
