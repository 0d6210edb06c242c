use std::{env, fs, io::ErrorKind, path::Path, time::Duration};

use anyhow::{anyhow, Result};
use trackas_core::picker::PickerOptions;
use trackas_entities::geo::Coordinate;
use trackas_gateways::nominatim::{DEFAULT_BASE_URL, DEFAULT_USER_AGENT};

mod raw;

const DEFAULT_CONFIG_FILE_NAME: &str = "trackas.toml";

const ENV_NAME_NOMINATIM_BASE_URL: &str = "NOMINATIM_BASE_URL";

const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

pub struct Config {
    pub map: Map,
    pub picker: Picker,
    pub geocoding: Geocoding,
    pub geolocation: Geolocation,
    pub attendance: Attendance,
}

impl Config {
    pub fn try_load_from_file_or_default<P: AsRef<Path>>(file_path: Option<P>) -> Result<Self> {
        let file_path: &Path = file_path.as_ref().map(|p| p.as_ref()).unwrap_or_else(|| {
            log::info!("No configuration file specified. load {DEFAULT_CONFIG_FILE_NAME}");
            Path::new(DEFAULT_CONFIG_FILE_NAME)
        });

        let raw_config = match fs::read_to_string(file_path) {
            Ok(cfg_string) => toml::from_str(&cfg_string)?,
            Err(err) => match err.kind() {
                ErrorKind::NotFound => {
                    log::info!("{} not found => load default configuration.", file_path.display());
                    Ok(raw::Config::default())
                }
                _ => Err(err),
            }?,
        };
        let mut cfg = Self::try_from(raw_config)?;
        if let Ok(url) = env::var(ENV_NAME_NOMINATIM_BASE_URL) {
            if let Some(GeocodingGateway::Nominatim { base_url, .. }) = &mut cfg.geocoding.gateway {
                log::debug!("Use Nominatim base URL from {ENV_NAME_NOMINATIM_BASE_URL}");
                *base_url = url;
            }
        }
        Ok(cfg)
    }

    pub fn picker_options(&self) -> PickerOptions {
        PickerOptions {
            zoom: self.map.zoom,
            fallback_name: self.picker.fallback_name.clone(),
        }
    }
}

pub struct Map {
    pub center: Coordinate,
    /// Zoom level after a location has been selected
    pub zoom: f64,
}

pub struct Picker {
    pub fallback_name: String,
}

pub struct Geocoding {
    pub gateway: Option<GeocodingGateway>,
}

pub enum GeocodingGateway {
    Nominatim {
        base_url: String,
        user_agent: String,
        timeout: Duration,
    },
}

pub struct Geolocation {
    /// Fixed position of this device
    pub position: Option<Coordinate>,
}

pub struct Attendance {
    pub base_url: String,
}

impl TryFrom<raw::Config> for Config {
    type Error = anyhow::Error;
    fn try_from(from: raw::Config) -> Result<Self> {
        let raw::Config {
            map,
            picker,
            geocoding,
            geolocation,
            attendance,
            gateway,
        } = from;

        let raw::Map { center, zoom } = map.unwrap_or_default();
        let center = center
            .parse()
            .map_err(|err| anyhow!("Invalid map center: {err}"))?;
        if !(zoom.is_finite() && zoom >= 0.0) {
            return Err(anyhow!("Invalid map zoom level: {zoom}"));
        }
        let map = Map { center, zoom };

        let raw::Picker { fallback_name } = picker.unwrap_or_default();
        if fallback_name.trim().is_empty() {
            return Err(anyhow!("Empty fallback name of unresolved locations"));
        }
        let picker = Picker { fallback_name };

        let geo_gateway = match geocoding.and_then(|g| g.gateway) {
            Some(gw_name) => {
                let toml_name = gw_name.toml_name();
                let gateway = gateway.unwrap_or_default();
                let gw = match gw_name {
                    raw::GeocodingGateway::Nominatim => {
                        let raw::Nominatim {
                            base_url,
                            user_agent,
                            timeout,
                        } = gateway.nominatim.ok_or_else(|| {
                            anyhow!("Missing '{toml_name}' gateway configuration")
                        })?;
                        let base_url = base_url.unwrap_or_else(|| DEFAULT_BASE_URL.to_string());
                        log::info!("Use Nominatim geocoding gateway ({base_url})");
                        GeocodingGateway::Nominatim {
                            base_url,
                            user_agent: user_agent
                                .unwrap_or_else(|| DEFAULT_USER_AGENT.to_string()),
                            timeout: timeout.unwrap_or(DEFAULT_REQUEST_TIMEOUT),
                        }
                    }
                };
                Some(gw)
            }
            None => None,
        };
        let geocoding = Geocoding {
            gateway: geo_gateway,
        };

        let raw::Geolocation { position } = geolocation.unwrap_or_default();
        let position = position
            .map(|pos| pos.parse())
            .transpose()
            .map_err(|err| anyhow!("Invalid device position: {err}"))?;
        let geolocation = Geolocation { position };

        let raw::Attendance { base_url } = attendance.unwrap_or_default();
        let attendance = Attendance { base_url };

        Ok(Self {
            map,
            picker,
            geocoding,
            geolocation,
            attendance,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn load_default_config() {
        let file: Option<&Path> = None;
        let cfg: Config = Config::try_load_from_file_or_default(file).unwrap();
        assert_eq!((7.3056, 5.1357), cfg.map.center.to_lat_lng_deg());
        assert!(cfg.geolocation.position.is_none());
        let options = cfg.picker_options();
        assert_eq!(18.0, options.zoom);
        assert_eq!("Unknown location", options.fallback_name);
    }

    #[test]
    fn nominatim_defaults() {
        let raw: raw::Config = toml::from_str(
            r#"
            [geocoding]
            gateway = "nominatim"
            [gateway.nominatim]
            "#,
        )
        .unwrap();
        let cfg = Config::try_from(raw).unwrap();
        let Some(GeocodingGateway::Nominatim {
            base_url,
            user_agent,
            timeout,
        }) = cfg.geocoding.gateway
        else {
            panic!("Nominatim gateway expected");
        };
        assert_eq!(DEFAULT_BASE_URL, base_url);
        assert_eq!(DEFAULT_USER_AGENT, user_agent);
        assert_eq!(DEFAULT_REQUEST_TIMEOUT, timeout);
    }

    #[test]
    fn missing_gateway_configuration() {
        let raw: raw::Config = toml::from_str("[geocoding]\ngateway = \"nominatim\"").unwrap();
        assert!(Config::try_from(raw).is_err());
    }

    #[test]
    fn invalid_positions() {
        let raw: raw::Config = toml::from_str("[map]\ncenter = \"95,5\"\nzoom = 18.0").unwrap();
        assert!(Config::try_from(raw).is_err());
        let raw: raw::Config = toml::from_str("[geolocation]\nposition = \"7.3\"").unwrap();
        assert!(Config::try_from(raw).is_err());
    }
}
