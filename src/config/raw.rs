use std::time::Duration;

use duration_str::deserialize_option_duration;
use serde::Deserialize;

const DEFAULT_CONFIG_FILE: &str = include_str!("trackas.default.toml");

#[derive(Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct Config {
    pub map: Option<Map>,
    pub picker: Option<Picker>,
    pub geocoding: Option<Geocoding>,
    pub geolocation: Option<Geolocation>,
    pub attendance: Option<Attendance>,
    pub gateway: Option<Gateway>,
}

impl Default for Config {
    fn default() -> Self {
        let cfg: Self = toml::from_str(DEFAULT_CONFIG_FILE).expect("Default configuration");
        cfg
    }
}

#[derive(Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct Map {
    /// `<lat>,<lng>` in decimal degrees
    pub center: String,
    pub zoom: f64,
}

impl Default for Map {
    fn default() -> Self {
        Config::default().map.expect("Map configuration")
    }
}

#[derive(Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct Picker {
    pub fallback_name: String,
}

impl Default for Picker {
    fn default() -> Self {
        Config::default().picker.expect("Picker configuration")
    }
}

#[derive(Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct Geocoding {
    pub gateway: Option<GeocodingGateway>,
}

#[derive(Debug, Clone, Copy, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum GeocodingGateway {
    Nominatim,
}

impl GeocodingGateway {
    pub const fn toml_name(self) -> &'static str {
        match self {
            Self::Nominatim => "nominatim",
        }
    }
}

#[derive(Clone, Default, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct Gateway {
    pub nominatim: Option<Nominatim>,
}

#[derive(Clone, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct Nominatim {
    pub base_url: Option<String>,
    pub user_agent: Option<String>,
    #[serde(default, deserialize_with = "deserialize_option_duration")]
    pub timeout: Option<Duration>,
}

#[derive(Default, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct Geolocation {
    /// `<lat>,<lng>` in decimal degrees
    pub position: Option<String>,
}

#[derive(Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct Attendance {
    pub base_url: String,
}

impl Default for Attendance {
    fn default() -> Self {
        Config::default()
            .attendance
            .expect("Attendance configuration")
    }
}
