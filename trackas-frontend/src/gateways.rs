use async_trait::async_trait;
use gloo_net::http::{Request, Response};
use leptos::window;
use wasm_bindgen::{JsCast, JsValue};
use wasm_bindgen_futures::JsFuture;
use web_sys::{GeolocationPosition, GeolocationPositionError, PositionOptions};

use trackas_core::{
    entities::{Coordinate, Place},
    gateways::{GeocodingError, GeocodingGateway, GeolocationError, GeolocationGateway},
};
use trackas_gateways::nominatim::wire;

const GEOLOCATION_TIMEOUT_MILLIS: u32 = 10_000;

/// Nominatim client using the fetch API of the browser.
#[derive(Debug, Clone)]
pub struct NominatimApi {
    url: String,
}

impl NominatimApi {
    pub fn new(url: &str) -> Self {
        Self {
            url: url.trim_end_matches('/').to_string(),
        }
    }
}

async fn into_json<T>(response: Response) -> Result<T, GeocodingError>
where
    T: serde::de::DeserializeOwned,
{
    if !response.ok() {
        return Err(GeocodingError::Provider(format!(
            "{} {}",
            response.status(),
            response.status_text()
        )));
    }
    response
        .json()
        .await
        .map_err(|err| GeocodingError::Response(err.to_string()))
}

fn request_error(err: gloo_net::Error) -> GeocodingError {
    GeocodingError::Request(err.to_string())
}

#[async_trait(?Send)]
impl GeocodingGateway for NominatimApi {
    async fn reverse(&self, pos: Coordinate) -> Result<String, GeocodingError> {
        let url = format!("{}/{}", self.url, wire::REVERSE_PATH);
        let response = Request::get(&url)
            .query(wire::reverse_params(pos))
            .send()
            .await
            .map_err(request_error)?;
        into_json::<wire::ReverseResponse>(response)
            .await?
            .into_display_name()
    }

    async fn search(&self, query: &str) -> Result<Vec<Place>, GeocodingError> {
        let url = format!("{}/{}", self.url, wire::SEARCH_PATH);
        let response = Request::get(&url)
            .query(wire::search_params(query))
            .send()
            .await
            .map_err(request_error)?;
        let results = into_json::<Vec<wire::SearchResult>>(response).await?;
        Ok(wire::into_places(results))
    }
}

/// The positioning service of the browser.
#[derive(Debug, Clone, Copy, Default)]
pub struct BrowserGeolocation;

fn geolocation_error(err: &JsValue) -> GeolocationError {
    let Some(err) = err.dyn_ref::<GeolocationPositionError>() else {
        return GeolocationError::Unavailable(
            err.as_string()
                .unwrap_or_else(|| "unknown JS error".to_string()),
        );
    };
    match err.code() {
        GeolocationPositionError::PERMISSION_DENIED => GeolocationError::Denied,
        GeolocationPositionError::TIMEOUT => GeolocationError::Timeout,
        _ => GeolocationError::Unavailable(err.message()),
    }
}

#[async_trait(?Send)]
impl GeolocationGateway for BrowserGeolocation {
    async fn current_position(&self) -> Result<Coordinate, GeolocationError> {
        let geolocation = window()
            .navigator()
            .geolocation()
            .map_err(|_| GeolocationError::Unsupported)?;
        let promise = js_sys::Promise::new(&mut |resolve, reject| {
            let options = PositionOptions::new();
            options.set_enable_high_accuracy(true);
            options.set_timeout(GEOLOCATION_TIMEOUT_MILLIS);
            if let Err(err) = geolocation.get_current_position_with_error_callback_and_options(
                &resolve,
                Some(&reject),
                &options,
            ) {
                _ = reject.call1(&JsValue::NULL, &err);
            }
        });
        let position: GeolocationPosition = JsFuture::from(promise)
            .await
            .map_err(|err| geolocation_error(&err))?
            .unchecked_into();
        let coords = position.coords();
        let (lat, lng) = (coords.latitude(), coords.longitude());
        Coordinate::try_from_lat_lng_deg(lat, lng).ok_or_else(|| {
            GeolocationError::Unavailable(format!("invalid position {lat},{lng}"))
        })
    }
}
