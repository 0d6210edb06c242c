use std::{
    cell::{Cell, RefCell},
    collections::VecDeque,
    future::{poll_fn, Future},
    pin::pin,
    task::Poll,
};

use async_trait::async_trait;
use tokio::sync::oneshot;

use trackas_entities::location::Place;

use super::*;
use crate::gateways::{GeocodingError, GeolocationError};

#[derive(Debug, Default)]
struct RecordingCanvas {
    next_id: u32,
    markers: Vec<(u32, Coordinate, String)>,
    views: Vec<(Coordinate, f64)>,
}

impl MapCanvas for RecordingCanvas {
    type Marker = u32;

    fn add_marker(&mut self, pos: Coordinate, label: &str) -> u32 {
        self.next_id += 1;
        self.markers.push((self.next_id, pos, label.to_string()));
        self.next_id
    }

    fn remove_marker(&mut self, marker: u32) {
        let count = self.markers.len();
        self.markers.retain(|(id, _, _)| *id != marker);
        assert_eq!(count - 1, self.markers.len(), "unknown marker {marker}");
    }

    fn set_view(&mut self, center: Coordinate, zoom: f64) {
        self.views.push((center, zoom));
    }
}

#[derive(Default)]
struct StubGeocoder {
    name: Option<String>,
    places: Vec<Place>,
    search_fails: bool,
    reverse_calls: Cell<usize>,
    search_calls: Cell<usize>,
}

impl StubGeocoder {
    fn named(name: &str) -> Self {
        Self {
            name: Some(name.to_string()),
            ..Default::default()
        }
    }

    fn with_places(places: Vec<Place>) -> Self {
        Self {
            places,
            ..Default::default()
        }
    }
}

#[async_trait(?Send)]
impl GeocodingGateway for StubGeocoder {
    async fn reverse(&self, _: Coordinate) -> std::result::Result<String, GeocodingError> {
        self.reverse_calls.set(self.reverse_calls.get() + 1);
        self.name
            .clone()
            .ok_or_else(|| GeocodingError::Request("connection refused".into()))
    }

    async fn search(&self, _: &str) -> std::result::Result<Vec<Place>, GeocodingError> {
        self.search_calls.set(self.search_calls.get() + 1);
        if self.search_fails {
            return Err(GeocodingError::Provider("Bad request".into()));
        }
        Ok(self.places.clone())
    }
}

type Reply<T> = oneshot::Receiver<std::result::Result<T, GeocodingError>>;

/// Answers each request with the next scripted reply as soon as it arrives.
#[derive(Default)]
struct ScriptedGeocoder {
    names: RefCell<VecDeque<Reply<String>>>,
    places: RefCell<VecDeque<Reply<Vec<Place>>>>,
}

impl ScriptedGeocoder {
    fn reverse_reply(&self) -> oneshot::Sender<std::result::Result<String, GeocodingError>> {
        let (tx, rx) = oneshot::channel();
        self.names.borrow_mut().push_back(rx);
        tx
    }

    fn search_reply(&self) -> oneshot::Sender<std::result::Result<Vec<Place>, GeocodingError>> {
        let (tx, rx) = oneshot::channel();
        self.places.borrow_mut().push_back(rx);
        tx
    }
}

#[async_trait(?Send)]
impl GeocodingGateway for &ScriptedGeocoder {
    async fn reverse(&self, _: Coordinate) -> std::result::Result<String, GeocodingError> {
        let reply = self.names.borrow_mut().pop_front().expect("scripted reply");
        reply
            .await
            .map_err(|_| GeocodingError::Request("dropped".into()))?
    }

    async fn search(&self, _: &str) -> std::result::Result<Vec<Place>, GeocodingError> {
        let reply = self.places.borrow_mut().pop_front().expect("scripted reply");
        reply
            .await
            .map_err(|_| GeocodingError::Request("dropped".into()))?
    }
}

struct FixedGeolocation(std::result::Result<Coordinate, GeolocationError>);

#[async_trait(?Send)]
impl GeolocationGateway for FixedGeolocation {
    async fn current_position(&self) -> std::result::Result<Coordinate, GeolocationError> {
        self.0.clone()
    }
}

type PositionReply = oneshot::Receiver<std::result::Result<Coordinate, GeolocationError>>;

/// Answers each position request with the next scripted reply.
#[derive(Default)]
struct ScriptedGeolocation {
    positions: RefCell<VecDeque<PositionReply>>,
}

impl ScriptedGeolocation {
    fn position_reply(&self) -> oneshot::Sender<std::result::Result<Coordinate, GeolocationError>> {
        let (tx, rx) = oneshot::channel();
        self.positions.borrow_mut().push_back(rx);
        tx
    }
}

#[async_trait(?Send)]
impl GeolocationGateway for &ScriptedGeolocation {
    async fn current_position(&self) -> std::result::Result<Coordinate, GeolocationError> {
        let reply = self.positions.borrow_mut().pop_front().expect("scripted reply");
        reply
            .await
            .map_err(|_| GeolocationError::Unavailable("dropped".into()))?
    }
}

#[derive(Debug, Default)]
struct RecordingHost {
    selected: Vec<(String, Coordinate)>,
    closed: usize,
}

impl LocationHost for RecordingHost {
    fn on_select_location(&mut self, name: &str, pos: Coordinate) {
        self.selected.push((name.to_string(), pos));
    }

    fn on_close(&mut self) {
        self.closed += 1;
    }
}

fn unsupported() -> FixedGeolocation {
    FixedGeolocation(Err(GeolocationError::Unsupported))
}

fn picker<G: GeocodingGateway>(
    geocoding: G,
    geolocation: FixedGeolocation,
) -> LocationPicker<RecordingCanvas, G, FixedGeolocation> {
    LocationPicker::new(
        RecordingCanvas::default(),
        geocoding,
        geolocation,
        PickerOptions::default(),
    )
}

fn place(name: &str, lat: f64, lng: f64) -> Place {
    Place {
        pos: Coordinate::from_lat_lng_deg(lat, lng),
        display_name: name.to_string(),
    }
}

fn markers<G, L>(picker: &LocationPicker<RecordingCanvas, G, L>) -> Vec<(Coordinate, String)>
where
    G: GeocodingGateway,
    L: GeolocationGateway,
{
    picker.with_canvas(|c| {
        c.markers
            .iter()
            .map(|(_, pos, label)| (*pos, label.clone()))
            .collect()
    })
}

/// Poll a future exactly once and report whether it is still pending.
async fn poll_once<F: Future>(fut: std::pin::Pin<&mut F>) -> bool {
    let mut fut = fut;
    poll_fn(|cx| Poll::Ready(fut.as_mut().poll(cx).is_pending())).await
}

#[tokio::test]
async fn click_then_confirm_hands_over_the_resolved_name() {
    let picker = picker(StubGeocoder::named("Example Hall"), unsupported());
    let pos = Coordinate::from_lat_lng_deg(7.3056, 5.1357);

    let selection = picker.select_by_map_click(pos).await.unwrap();
    assert_eq!(NameSource::Provider, selection.name_source);
    assert_eq!(
        Some(SelectedLocation::new(pos, "Example Hall")),
        picker.selection()
    );
    assert_eq!(vec![(pos, "Example Hall".to_string())], markers(&picker));
    assert_eq!(
        vec![(pos, DEFAULT_ZOOM)],
        picker.with_canvas(|c| c.views.clone())
    );

    let mut host = RecordingHost::default();
    let confirmed = picker.confirm(&mut host).unwrap();
    assert_eq!("Example Hall", confirmed.display_name);
    assert_eq!(vec![("Example Hall".to_string(), pos)], host.selected);
    assert_eq!((7.3056, 5.1357), host.selected[0].1.to_lat_lng_deg());
    assert_eq!(1, host.closed);
    assert!(!picker.is_open());
    assert!(markers(&picker).is_empty());
}

#[tokio::test]
async fn each_click_replaces_the_previous_marker() {
    let picker = picker(StubGeocoder::named("Somewhere"), unsupported());
    let positions = [
        Coordinate::from_lat_lng_deg(-90.0, -180.0),
        Coordinate::from_lat_lng_deg(0.0, 0.0),
        Coordinate::from_lat_lng_deg(90.0, 180.0),
        Coordinate::from_lat_lng_deg(7.3056, 5.1357),
    ];
    for pos in positions {
        picker.select_by_map_click(pos).await.unwrap();
        let markers = markers(&picker);
        assert_eq!(1, markers.len());
        assert_eq!(pos, markers[0].0);
        assert_eq!(Some(pos), picker.selection().map(|s| s.pos));
    }
}

#[tokio::test]
async fn failed_reverse_geocoding_falls_back_to_placeholder_name() {
    let picker = picker(StubGeocoder::default(), unsupported());
    let pos = Coordinate::from_lat_lng_deg(1.0, 2.0);

    let selection = picker.select_by_map_click(pos).await.unwrap();
    assert_eq!(NameSource::Fallback, selection.name_source);
    assert_eq!("Unknown location", selection.location.display_name);
    assert_eq!(1, markers(&picker).len());
    assert!(!picker.is_busy());
}

#[tokio::test]
async fn confirm_without_selection_does_not_call_the_host() {
    let picker = picker(StubGeocoder::named("Example Hall"), unsupported());
    let mut host = RecordingHost::default();

    assert_eq!(
        Err(Error::NoSelectionOnConfirm),
        picker.confirm(&mut host)
    );
    assert!(host.selected.is_empty());
    assert_eq!(0, host.closed);
    assert!(picker.is_open());
}

#[tokio::test]
async fn cancel_closes_without_selection() {
    let picker = picker(StubGeocoder::named("Example Hall"), unsupported());
    picker
        .select_by_map_click(Coordinate::from_lat_lng_deg(1.0, 1.0))
        .await
        .unwrap();
    let mut host = RecordingHost::default();

    picker.cancel(&mut host).unwrap();
    assert!(host.selected.is_empty());
    assert_eq!(1, host.closed);
    assert_eq!(None, picker.selection());
    assert!(markers(&picker).is_empty());

    assert_eq!(Err(Error::Closed), picker.cancel(&mut host));
    assert_eq!(
        Err(Error::Closed),
        picker
            .select_by_map_click(Coordinate::from_lat_lng_deg(1.0, 1.0))
            .await
    );
}

#[tokio::test]
async fn blank_search_is_a_no_op() {
    let geocoder = StubGeocoder::with_places(vec![place("Main Library", 1.0, 2.0)]);
    let picker = picker(geocoder, unsupported());

    assert_eq!(Ok(None), picker.search_by_text("").await);
    assert_eq!(Ok(None), picker.search_by_text(" \t\n").await);
    assert_eq!(0, picker.geocoding.search_calls.get());
    assert_eq!(None, picker.selection());
    assert!(!picker.is_busy());
}

#[tokio::test]
async fn search_selects_the_first_result() {
    let geocoder = StubGeocoder::with_places(vec![
        place("Main Library", 7.5, 4.5),
        place("Main Library Annex", 7.6, 4.6),
    ]);
    let picker = picker(geocoder, unsupported());

    let selection = picker.search_by_text("Main Library").await.unwrap().unwrap();
    assert_eq!("Main Library", selection.location.display_name);
    assert_eq!((7.5, 4.5), selection.location.pos.to_lat_lng_deg());
    assert_eq!(1, markers(&picker).len());
    assert_eq!(0, picker.geocoding.reverse_calls.get());
}

#[tokio::test]
async fn search_without_results_keeps_the_previous_selection() {
    let picker = picker(StubGeocoder::named("Example Hall"), unsupported());
    let pos = Coordinate::from_lat_lng_deg(7.3056, 5.1357);
    picker.select_by_map_click(pos).await.unwrap();

    assert_eq!(
        Err(Error::NoResultsFound),
        picker.search_by_text("Main Library").await
    );
    assert_eq!(
        Some(SelectedLocation::new(pos, "Example Hall")),
        picker.selection()
    );
    assert_eq!(vec![(pos, "Example Hall".to_string())], markers(&picker));
    assert!(!picker.is_busy());
}

#[tokio::test]
async fn search_without_results_and_without_selection() {
    let picker = picker(StubGeocoder::default(), unsupported());
    assert_eq!(
        Err(Error::NoResultsFound),
        picker.search_by_text("Main Library").await
    );
    assert_eq!(None, picker.selection());
    assert!(markers(&picker).is_empty());
}

#[tokio::test]
async fn failed_search_is_reported() {
    let geocoder = StubGeocoder {
        search_fails: true,
        ..Default::default()
    };
    let picker = picker(geocoder, unsupported());
    let err = picker.search_by_text("Main Library").await.unwrap_err();
    assert!(matches!(err, Error::Search(GeocodingError::Provider(_))));
    assert!(!picker.is_busy());
}

#[tokio::test]
async fn current_location_is_resolved_like_a_click() {
    let pos = Coordinate::from_lat_lng_deg(6.5, 3.4);
    let picker = picker(
        StubGeocoder::named("Lecture Theatre"),
        FixedGeolocation(Ok(pos)),
    );

    let selection = picker.select_by_current_location().await.unwrap();
    assert_eq!(SelectedLocation::new(pos, "Lecture Theatre"), selection.location);
    assert_eq!(vec![(pos, "Lecture Theatre".to_string())], markers(&picker));
}

#[tokio::test]
async fn geolocation_failures_are_not_fatal() {
    for err in [
        GeolocationError::Unsupported,
        GeolocationError::Denied,
        GeolocationError::Timeout,
    ] {
        let picker = picker(
            StubGeocoder::named("Example Hall"),
            FixedGeolocation(Err(err.clone())),
        );
        assert_eq!(
            Err(Error::Geolocation(err)),
            picker.select_by_current_location().await
        );
        assert!(picker.is_open());
        assert!(!picker.is_busy());
        assert_eq!(0, picker.geocoding.reverse_calls.get());
        // the picker remains usable
        picker
            .select_by_map_click(Coordinate::from_lat_lng_deg(1.0, 1.0))
            .await
            .unwrap();
    }
}

#[tokio::test]
async fn stale_reverse_geocoding_result_is_discarded() {
    let geocoder = ScriptedGeocoder::default();
    let first_reply = geocoder.reverse_reply();
    let second_reply = geocoder.reverse_reply();
    let picker = picker(&geocoder, unsupported());
    let first_pos = Coordinate::from_lat_lng_deg(1.0, 1.0);
    let second_pos = Coordinate::from_lat_lng_deg(2.0, 2.0);

    let mut first = pin!(picker.select_by_map_click(first_pos));
    assert!(poll_once(first.as_mut()).await);
    assert!(picker.is_busy());

    second_reply.send(Ok("Second".into())).unwrap();
    let second = picker.select_by_map_click(second_pos).await.unwrap();
    assert_eq!("Second", second.location.display_name);

    first_reply.send(Ok("First".into())).unwrap();
    assert_eq!(Err(Error::Superseded), first.await);

    assert_eq!(
        Some(SelectedLocation::new(second_pos, "Second")),
        picker.selection()
    );
    assert_eq!(vec![(second_pos, "Second".to_string())], markers(&picker));
    assert!(!picker.is_busy());
}

#[tokio::test]
async fn stale_current_location_is_not_resolved() {
    let geocoder = ScriptedGeocoder::default();
    let click_reply = geocoder.reverse_reply();
    let geolocation = ScriptedGeolocation::default();
    let position_reply = geolocation.position_reply();
    let picker = LocationPicker::new(
        RecordingCanvas::default(),
        &geocoder,
        &geolocation,
        PickerOptions::default(),
    );

    let mut here = pin!(picker.select_by_current_location());
    assert!(poll_once(here.as_mut()).await);

    let click_pos = Coordinate::from_lat_lng_deg(3.0, 4.0);
    click_reply.send(Ok("Clicked".into())).unwrap();
    picker.select_by_map_click(click_pos).await.unwrap();

    // no reverse geocoding for an outdated position
    position_reply
        .send(Ok(Coordinate::from_lat_lng_deg(6.5, 3.4)))
        .unwrap();
    assert_eq!(Err(Error::Superseded), here.await);
    assert_eq!(
        Some(SelectedLocation::new(click_pos, "Clicked")),
        picker.selection()
    );
    assert_eq!(vec![(click_pos, "Clicked".to_string())], markers(&picker));
    assert!(!picker.is_busy());
}

#[tokio::test]
async fn stale_geolocation_failure_is_silent() {
    let geocoder = ScriptedGeocoder::default();
    let click_reply = geocoder.reverse_reply();
    let geolocation = ScriptedGeolocation::default();
    let position_reply = geolocation.position_reply();
    let picker = LocationPicker::new(
        RecordingCanvas::default(),
        &geocoder,
        &geolocation,
        PickerOptions::default(),
    );

    let mut here = pin!(picker.select_by_current_location());
    assert!(poll_once(here.as_mut()).await);

    let click_pos = Coordinate::from_lat_lng_deg(3.0, 4.0);
    click_reply.send(Ok("Clicked".into())).unwrap();
    picker.select_by_map_click(click_pos).await.unwrap();

    position_reply.send(Err(GeolocationError::Denied)).unwrap();
    let err = here.await.unwrap_err();
    assert_eq!(Error::Superseded, err);
    assert_eq!(None, crate::notice::Notice::failed(&err));
    assert_eq!(Some(click_pos), picker.selection().map(|s| s.pos));
    assert!(!picker.is_busy());
}

#[tokio::test]
async fn requests_are_rejected_while_busy_except_map_clicks() {
    let geocoder = ScriptedGeocoder::default();
    let search_reply = geocoder.search_reply();
    let click_reply = geocoder.reverse_reply();
    let here = FixedGeolocation(Ok(Coordinate::from_lat_lng_deg(0.0, 0.0)));
    let picker = picker(&geocoder, here);
    let mut host = RecordingHost::default();

    let mut search = pin!(picker.search_by_text("Main Library"));
    assert!(poll_once(search.as_mut()).await);

    assert_eq!(Err(Error::Busy), picker.search_by_text("Other").await);
    assert_eq!(Err(Error::Busy), picker.select_by_current_location().await);
    assert_eq!(Err(Error::Busy), picker.confirm(&mut host));
    assert!(host.selected.is_empty());

    let click_pos = Coordinate::from_lat_lng_deg(3.0, 4.0);
    click_reply.send(Ok("Clicked".into())).unwrap();
    picker.select_by_map_click(click_pos).await.unwrap();
    assert!(!picker.is_busy());

    search_reply
        .send(Ok(vec![place("Main Library", 7.5, 4.5)]))
        .unwrap();
    assert_eq!(Err(Error::Superseded), search.await);
    assert_eq!(Some(click_pos), picker.selection().map(|s| s.pos));

    picker.confirm(&mut host).unwrap();
    assert_eq!(vec![("Clicked".to_string(), click_pos)], host.selected);
}

#[tokio::test]
async fn results_arriving_after_close_are_discarded() {
    let geocoder = ScriptedGeocoder::default();
    let reply = geocoder.reverse_reply();
    let picker = picker(&geocoder, unsupported());
    let mut host = RecordingHost::default();

    let mut click = pin!(picker.select_by_map_click(Coordinate::from_lat_lng_deg(1.0, 1.0)));
    assert!(poll_once(click.as_mut()).await);
    picker.cancel(&mut host).unwrap();

    reply.send(Ok("Too late".into())).unwrap();
    assert_eq!(Err(Error::Closed), click.await);
    assert_eq!(None, picker.selection());
    assert!(markers(&picker).is_empty());
    assert!(host.selected.is_empty());
}
