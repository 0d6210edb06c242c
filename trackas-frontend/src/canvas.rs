use js_sys::{Function, Reflect};
use leaflet::LatLng;
use leptos::*;
use wasm_bindgen::{JsCast, JsValue};

use trackas_core::{entities::Coordinate, picker::MapCanvas};

/// Draws the picker state onto a leaflet map.
///
/// The map becomes available after the map container
/// has been mounted.
#[derive(Clone, Copy)]
pub struct LeafletCanvas {
    map: RwSignal<Option<leaflet::Map>>,
}

impl LeafletCanvas {
    pub const fn new(map: RwSignal<Option<leaflet::Map>>) -> Self {
        Self { map }
    }
}

fn lat_lng(pos: Coordinate) -> LatLng {
    let (lat, lng) = pos.to_lat_lng_deg();
    LatLng::new(lat, lng)
}

/// Leaflet renders popup strings as HTML.
fn popup_content(label: &str) -> String {
    let mut content = String::with_capacity(label.len());
    for c in label.chars() {
        match c {
            '&' => content.push_str("&amp;"),
            '<' => content.push_str("&lt;"),
            '>' => content.push_str("&gt;"),
            '"' => content.push_str("&quot;"),
            '\'' => content.push_str("&#39;"),
            c => content.push(c),
        }
    }
    content
}

fn call_method(target: &JsValue, name: &str, args: &js_sys::Array) -> Result<JsValue, JsValue> {
    let method: Function = Reflect::get(target, &JsValue::from_str(name))?.dyn_into()?;
    method.apply(target, args)
}

fn open_popup(marker: &leaflet::Marker, label: &str) -> Result<(), JsValue> {
    let target: &JsValue = marker.as_ref();
    let content = js_sys::Array::of1(&JsValue::from_str(&popup_content(label)));
    call_method(target, "bindPopup", &content)?;
    call_method(target, "openPopup", &js_sys::Array::new())?;
    Ok(())
}

impl MapCanvas for LeafletCanvas {
    type Marker = leaflet::Marker;

    fn add_marker(&mut self, pos: Coordinate, label: &str) -> Self::Marker {
        let marker = leaflet::Marker::new(&lat_lng(pos));
        match self.map.get_untracked() {
            Some(map) => {
                log::debug!("Add marker '{label}' at {pos}");
                marker.add_to(&map);
                if let Err(err) = open_popup(&marker, label) {
                    log::warn!("Unable to open marker popup: {err:?}");
                }
            }
            None => log::warn!("No leaflet map found"),
        }
        marker
    }

    fn remove_marker(&mut self, marker: Self::Marker) {
        marker.remove();
    }

    fn set_view(&mut self, center: Coordinate, zoom: f64) {
        let Some(map) = self.map.get_untracked() else {
            log::warn!("No leaflet map found");
            return;
        };
        map.set_view(&lat_lng(center), zoom);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn popup_shows_the_label_as_text() {
        assert_eq!(popup_content("Obafemi Awolowo Way"), "Obafemi Awolowo Way");
        assert_eq!(
            popup_content("<b>Lab & Annex</b>"),
            "&lt;b&gt;Lab &amp; Annex&lt;/b&gt;"
        );
    }
}
