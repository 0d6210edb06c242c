use std::rc::Rc;

use leptos::*;
use leptos_leaflet::{MapContainer, MapEvents, Position, TileLayer};

use trackas_core::{
    entities::{Coordinate, SelectedLocation},
    notice::Notice,
    picker::{self, LocationHost, LocationPicker, PickerOptions, Selection, Trigger},
};

use crate::{
    canvas::LeafletCanvas,
    components::NoticeBanner,
    gateways::{BrowserGeolocation, NominatimApi},
};

const TILE_LAYER_URL: &str = "https://tile.openstreetmap.org/{z}/{x}/{y}.png";
const MAP_ATTRIBUTION: &str =
    "&copy; <a href=\"https://www.openstreetmap.org/copyright\">OpenStreetMap</a> contributors";
const NOMINATIM_URL: &str = "https://nominatim.openstreetmap.org";
const INITIAL_ZOOM: f64 = 13.0;

type Picker = LocationPicker<LeafletCanvas, NominatimApi, BrowserGeolocation>;

struct CallbackHost {
    on_select_location: Callback<(String, Coordinate)>,
    on_close: Callback<()>,
}

impl LocationHost for CallbackHost {
    fn on_select_location(&mut self, name: &str, pos: Coordinate) {
        self.on_select_location.call((name.to_string(), pos));
    }

    fn on_close(&mut self) {
        self.on_close.call(());
    }
}

/// Reactive view state of the modal.
///
/// Requests may finish after the modal was unmounted,
/// so every update is a `try_set`.
#[derive(Clone, Copy)]
struct ModalState {
    busy: RwSignal<bool>,
    notice: RwSignal<Option<Notice>>,
    selection: RwSignal<Option<SelectedLocation>>,
}

impl ModalState {
    fn new() -> Self {
        Self {
            busy: RwSignal::new(false),
            notice: RwSignal::new(None),
            selection: RwSignal::new(None),
        }
    }

    fn start(self) {
        self.busy.try_set(true);
    }

    fn finish(
        self,
        trigger: Trigger,
        result: picker::Result<Option<Selection>>,
        selection: Option<SelectedLocation>,
        busy: bool,
    ) {
        let notice = match result {
            Err(picker::Error::Closed) => {
                log::debug!("Discard result of closed location picker");
                return;
            }
            Ok(Some(selection)) => Notice::for_selection(trigger, &selection),
            Ok(None) => None,
            Err(err) => Notice::failed(&err),
        };
        if let Some(notice) = notice {
            self.notice.try_set(Some(notice));
        }
        self.selection.try_set(selection);
        self.busy.try_set(busy);
    }
}

#[component]
pub fn MapModal(
    center: Coordinate,
    on_select_location: Callback<(String, Coordinate)>,
    on_close: Callback<()>,
) -> impl IntoView {
    // -- signals -- //

    let map = RwSignal::<Option<leaflet::Map>>::new(None);
    let state = ModalState::new();
    let ModalState {
        busy,
        notice,
        selection,
    } = state;
    let query = RwSignal::new(String::new());

    let picker: StoredValue<Rc<Picker>> = store_value(Rc::new(LocationPicker::new(
        LeafletCanvas::new(map),
        NominatimApi::new(NOMINATIM_URL),
        BrowserGeolocation,
        PickerOptions::default(),
    )));

    // -- requests -- //

    let select_by_map_click = move |pos: Coordinate| {
        let picker = picker.get_value();
        state.start();
        spawn_local(async move {
            let result = picker.select_by_map_click(pos).await.map(Some);
            state.finish(Trigger::MapClick, result, picker.selection(), picker.is_busy());
        });
    };

    let select_by_current_location = move || {
        let picker = picker.get_value();
        state.start();
        spawn_local(async move {
            let result = picker.select_by_current_location().await.map(Some);
            state.finish(
                Trigger::CurrentLocation,
                result,
                picker.selection(),
                picker.is_busy(),
            );
        });
    };

    let search_by_text = move || {
        let picker = picker.get_value();
        let text = query.get_untracked();
        if text.trim().is_empty() {
            return;
        }
        state.start();
        spawn_local(async move {
            let result = picker.search_by_text(&text).await;
            state.finish(Trigger::Search, result, picker.selection(), picker.is_busy());
        });
    };

    let host = move || CallbackHost {
        on_select_location,
        on_close,
    };
    let confirm = move || {
        if let Err(err) = picker.get_value().confirm(&mut host()) {
            notice.set(Notice::failed(&err));
        }
    };
    let cancel = move || {
        if let Err(err) = picker.get_value().cancel(&mut host()) {
            log::warn!("Unable to cancel location picker: {err}");
        }
    };

    // -- map -- //

    let events = MapEvents::new().mouse_click(move |ev| {
        let lat_lng = ev.lat_lng();
        match Coordinate::try_from_lat_lng_deg(lat_lng.lat(), lat_lng.lng()) {
            Some(pos) => select_by_map_click(pos),
            None => log::warn!("Ignore click outside of the map bounds"),
        }
    });
    let (lat, lng) = center.to_lat_lng_deg();

    view! {
      <div class="fixed inset-0 bg-black bg-opacity-50 flex items-center justify-center z-50">
        <div class="bg-white p-4 rounded-lg w-4/5 h-4/5 flex flex-col">
          <h2 class="sm:text-xl text-base text-neutral-700 font-bold mb-4 text-center">
            "Select Location"
          </h2>
          <div class="flex gap-2 mb-2">
            <input
              type="text"
              placeholder="Search for a place..."
              class="border border-gray-300 px-3 py-1 rounded flex-1"
              prop:value = move || query.get()
              on:input = move |ev| query.set(event_target_value(&ev))
              on:keydown = move |ev| {
                if ev.key() == "Enter" {
                  search_by_text();
                }
              }
            />
            <button
              class="bg-blue-500 text-white px-3 py-1 rounded hover:bg-blue-600"
              disabled = move || busy.get()
              on:click = move |_| search_by_text()
            >
              "Search"
            </button>
            <button
              class="bg-yellow-500 text-white px-3 py-1 rounded hover:bg-yellow-600"
              disabled = move || busy.get()
              on:click = move |_| select_by_current_location()
            >
              "Use Current Location"
            </button>
          </div>
          { move || notice.get().map(|notice| view! { <NoticeBanner notice /> }) }
          <div class="flex-1">
            <MapContainer
              class="h-full"
              center=Position::new(lat, lng)
              zoom=INITIAL_ZOOM
              map=map.write_only()
              set_view=true
              events
            >
              <TileLayer url=TILE_LAYER_URL attribution=MAP_ATTRIBUTION />
            </MapContainer>
          </div>
          <p class="mt-2 text-gray-600">
            { move || selection.get().map(|location| location.display_name) }
          </p>
          <div class="flex justify-end gap-2 mt-2">
            <button
              class="bg-gray-300 px-4 py-2 rounded hover:bg-gray-400"
              disabled = move || busy.get()
              on:click = move |_| cancel()
            >
              "Cancel"
            </button>
            <button
              class="bg-green-500 text-white px-4 py-2 rounded hover:bg-green-600"
              disabled = move || busy.get()
              on:click = move |_| confirm()
            >
              "Confirm Location"
            </button>
          </div>
        </div>
      </div>
    }
}
