//! Geocoding with [Nominatim](https://nominatim.org).

#[cfg(feature = "reqwest")]
use std::time::Duration;

#[cfg(feature = "reqwest")]
use async_trait::async_trait;
#[cfg(feature = "reqwest")]
use serde::de::DeserializeOwned;

#[cfg(feature = "reqwest")]
use trackas_core::gateways::{GeocodingError, GeocodingGateway};
#[cfg(feature = "reqwest")]
use trackas_entities::{geo::Coordinate, location::Place};

pub mod wire;

pub const DEFAULT_BASE_URL: &str = "https://nominatim.openstreetmap.org";

/// The public instance requires an identifying user agent.
pub const DEFAULT_USER_AGENT: &str = concat!("trackas/", env!("CARGO_PKG_VERSION"));

#[cfg(feature = "reqwest")]
pub struct Nominatim {
    base_url: String,
    client: reqwest::Client,
}

#[cfg(feature = "reqwest")]
impl Nominatim {
    pub fn new(base_url: &str, user_agent: &str, timeout: Duration) -> reqwest::Result<Self> {
        let client = reqwest::Client::builder()
            .user_agent(user_agent)
            .timeout(timeout)
            .build()?;
        let base_url = base_url.trim_end_matches('/').to_string();
        Ok(Self { base_url, client })
    }

    async fn get<T, Q>(&self, path: &str, query: &Q) -> Result<T, GeocodingError>
    where
        T: DeserializeOwned,
        Q: serde::Serialize + ?Sized,
    {
        let url = format!("{}/{path}", self.base_url);
        let response = self
            .client
            .get(&url)
            .query(query)
            .send()
            .await
            .map_err(|err| GeocodingError::Request(err.to_string()))?;
        let status = response.status();
        if !status.is_success() {
            return Err(GeocodingError::Provider(format!("{url}: {status}")));
        }
        response
            .json()
            .await
            .map_err(|err| GeocodingError::Response(err.to_string()))
    }
}

#[cfg(feature = "reqwest")]
impl std::fmt::Debug for Nominatim {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        f.debug_struct("Nominatim")
            .field("base_url", &self.base_url)
            .finish_non_exhaustive()
    }
}

#[cfg(feature = "reqwest")]
#[async_trait(?Send)]
impl GeocodingGateway for Nominatim {
    async fn reverse(&self, pos: Coordinate) -> Result<String, GeocodingError> {
        log::debug!("Resolve name of {pos}");
        let res: wire::ReverseResponse = self
            .get(wire::REVERSE_PATH, &wire::reverse_params(pos))
            .await?;
        res.into_display_name()
    }

    async fn search(&self, query: &str) -> Result<Vec<Place>, GeocodingError> {
        log::debug!("Search places matching '{query}'");
        let results: Vec<wire::SearchResult> = self
            .get(wire::SEARCH_PATH, &wire::search_params(query))
            .await?;
        Ok(wire::into_places(results))
    }
}
