use std::{fmt, str::FromStr};

use thiserror::Error;

/// Spatial reference id of WGS 84, the only one we read and write.
pub const SRID_WGS84: u32 = 4326;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    #[error("Invalid latitude degrees: {0}")]
    Latitude(String),
    #[error("Invalid longitude degrees: {0}")]
    Longitude(String),
    #[error("Failed to parse coordinate: {0}")]
    Coordinate(String),
    #[error("Failed to parse point geometry: {0}")]
    Point(String),
    #[error("Unsupported spatial reference id: {0}")]
    Srid(String),
}

#[derive(Clone, Copy, Debug, PartialEq, PartialOrd)]
pub struct LatCoord(f64);

impl LatCoord {
    const DEG_MAX: f64 = 90.0;
    const DEG_MIN: f64 = -90.0;

    pub const fn max() -> Self {
        Self(Self::DEG_MAX)
    }

    pub const fn min() -> Self {
        Self(Self::DEG_MIN)
    }

    pub const fn to_deg(self) -> f64 {
        self.0
    }

    pub fn from_deg<T: Into<f64>>(deg: T) -> Self {
        let deg = deg.into();
        debug_assert!(deg >= Self::DEG_MIN);
        debug_assert!(deg <= Self::DEG_MAX);
        Self(deg)
    }

    pub fn try_from_deg<T: Into<f64>>(deg: T) -> Option<Self> {
        let deg = deg.into();
        // NaN fails both comparisons
        if deg >= Self::DEG_MIN && deg <= Self::DEG_MAX {
            Some(Self(deg))
        } else {
            None
        }
    }
}

impl fmt::Display for LatCoord {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.to_deg())
    }
}

#[derive(Clone, Copy, Debug, PartialEq, PartialOrd)]
pub struct LngCoord(f64);

impl LngCoord {
    const DEG_MAX: f64 = 180.0;
    const DEG_MIN: f64 = -180.0;

    pub const fn max() -> Self {
        Self(Self::DEG_MAX)
    }

    pub const fn min() -> Self {
        Self(Self::DEG_MIN)
    }

    pub const fn to_deg(self) -> f64 {
        self.0
    }

    pub fn from_deg<T: Into<f64>>(deg: T) -> Self {
        let deg = deg.into();
        debug_assert!(deg >= Self::DEG_MIN);
        debug_assert!(deg <= Self::DEG_MAX);
        Self(deg)
    }

    pub fn try_from_deg<T: Into<f64>>(deg: T) -> Option<Self> {
        let deg = deg.into();
        if deg >= Self::DEG_MIN && deg <= Self::DEG_MAX {
            Some(Self(deg))
        } else {
            None
        }
    }
}

impl fmt::Display for LngCoord {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.to_deg())
    }
}

/// A geographical position in WGS 84 degrees.
///
/// Values of this type are always within the valid range,
/// i.e. latitude in `[-90, 90]` and longitude in `[-180, 180]`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Coordinate {
    lat: LatCoord,
    lng: LngCoord,
}

impl Coordinate {
    pub const fn new(lat: LatCoord, lng: LngCoord) -> Self {
        Self { lat, lng }
    }

    pub const fn lat(self) -> LatCoord {
        self.lat
    }

    pub const fn lng(self) -> LngCoord {
        self.lng
    }

    pub const fn to_lat_lng_deg(self) -> (f64, f64) {
        (self.lat.to_deg(), self.lng.to_deg())
    }

    pub fn from_lat_lng_deg<LAT: Into<f64>, LNG: Into<f64>>(lat: LAT, lng: LNG) -> Self {
        Self::new(LatCoord::from_deg(lat), LngCoord::from_deg(lng))
    }

    pub fn try_from_lat_lng_deg<LAT: Into<f64>, LNG: Into<f64>>(
        lat: LAT,
        lng: LNG,
    ) -> Option<Self> {
        match (LatCoord::try_from_deg(lat), LngCoord::try_from_deg(lng)) {
            (Some(lat), Some(lng)) => Some(Self::new(lat, lng)),
            _ => None,
        }
    }

    /// Parse a pair of decimal degree strings, e.g. as delivered
    /// by geocoding providers that encode numbers as text.
    pub fn parse_lat_lng_deg(lat_deg_str: &str, lng_deg_str: &str) -> Result<Self, ParseError> {
        let lat_deg = lat_deg_str
            .trim()
            .parse::<f64>()
            .map_err(|_| ParseError::Latitude(lat_deg_str.to_string()))?;
        let lng_deg = lng_deg_str
            .trim()
            .parse::<f64>()
            .map_err(|_| ParseError::Longitude(lng_deg_str.to_string()))?;
        let lat = LatCoord::try_from_deg(lat_deg)
            .ok_or_else(|| ParseError::Latitude(lat_deg_str.to_string()))?;
        let lng = LngCoord::try_from_deg(lng_deg)
            .ok_or_else(|| ParseError::Longitude(lng_deg_str.to_string()))?;
        Ok(Self::new(lat, lng))
    }

    /// Extended well-known text, e.g. `SRID=4326;POINT(5.1357 7.3056)`.
    ///
    /// Note that WKT puts the longitude first.
    pub fn to_ewkt(self) -> String {
        EwktPoint(self).to_string()
    }
}

impl fmt::Display for Coordinate {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{},{}", self.lat, self.lng)
    }
}

impl FromStr for Coordinate {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let Some((lat_deg_str, lng_deg_str)) = s.split_once(',') else {
            return Err(ParseError::Coordinate(s.to_string()));
        };
        Self::parse_lat_lng_deg(lat_deg_str, lng_deg_str)
    }
}

/// A [`Coordinate`] in its EWKT point representation.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct EwktPoint(pub Coordinate);

impl fmt::Display for EwktPoint {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let Self(pos) = self;
        write!(f, "SRID={SRID_WGS84};POINT({} {})", pos.lng, pos.lat)
    }
}

impl FromStr for EwktPoint {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        let wkt = match s.split_once(';') {
            Some((srid, wkt)) => {
                let id = srid
                    .trim()
                    .strip_prefix("SRID=")
                    .and_then(|id| id.parse::<u32>().ok())
                    .ok_or_else(|| ParseError::Srid(srid.to_string()))?;
                if id != SRID_WGS84 {
                    return Err(ParseError::Srid(srid.to_string()));
                }
                wkt.trim()
            }
            None => s,
        };
        let body = wkt
            .get(..5)
            .filter(|tag| tag.eq_ignore_ascii_case("POINT"))
            .map(|_| wkt[5..].trim())
            .and_then(|rest| rest.strip_prefix('('))
            .and_then(|rest| rest.strip_suffix(')'))
            .ok_or_else(|| ParseError::Point(s.to_string()))?;
        let mut numbers = body.split_whitespace();
        let (Some(lng), Some(lat), None) = (numbers.next(), numbers.next(), numbers.next()) else {
            return Err(ParseError::Point(s.to_string()));
        };
        Coordinate::parse_lat_lng_deg(lat, lng).map(Self)
    }
}

impl From<EwktPoint> for Coordinate {
    fn from(from: EwktPoint) -> Self {
        from.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn latitude() {
        assert_eq!(LatCoord::min(), LatCoord::from_deg(-90));
        assert_eq!(LatCoord::max(), LatCoord::from_deg(90));
        assert_eq!(None, LatCoord::try_from_deg(-90.000001));
        assert_eq!(None, LatCoord::try_from_deg(90.000001));
        assert_eq!(None, LatCoord::try_from_deg(f64::NAN));
    }

    #[test]
    fn longitude() {
        assert_eq!(LngCoord::min(), LngCoord::from_deg(-180));
        assert_eq!(LngCoord::max(), LngCoord::from_deg(180));
        assert_eq!(None, LngCoord::try_from_deg(-180.000001));
        assert_eq!(None, LngCoord::try_from_deg(180.000001));
        assert_eq!(None, LngCoord::try_from_deg(f64::INFINITY));
    }

    #[test]
    fn try_from_out_of_range_degrees() {
        assert!(Coordinate::try_from_lat_lng_deg(7.3056, 5.1357).is_some());
        assert!(Coordinate::try_from_lat_lng_deg(91.0, 5.1357).is_none());
        assert!(Coordinate::try_from_lat_lng_deg(7.3056, -181.0).is_none());
    }

    #[test]
    fn parse_from_str() {
        let pos: Coordinate = "7.3056,5.1357".parse().unwrap();
        assert_eq!(pos.to_lat_lng_deg(), (7.3056, 5.1357));
        assert_eq!(pos.to_string(), "7.3056,5.1357");
        assert!("7.3056".parse::<Coordinate>().is_err());
        assert_eq!(
            Err(ParseError::Latitude("abc".into())),
            Coordinate::parse_lat_lng_deg("abc", "5.0")
        );
        assert_eq!(
            Err(ParseError::Longitude("200".into())),
            Coordinate::parse_lat_lng_deg("5.0", "200")
        );
    }

    #[test]
    fn ewkt_puts_longitude_first() {
        let pos = Coordinate::from_lat_lng_deg(7.3056, 5.1357);
        assert_eq!(pos.to_ewkt(), "SRID=4326;POINT(5.1357 7.3056)");
        let pos = Coordinate::from_lat_lng_deg(-33.0, 151.0);
        assert_eq!(pos.to_ewkt(), "SRID=4326;POINT(151 -33)");
    }

    #[test]
    fn parse_ewkt() {
        let EwktPoint(pos) = "SRID=4326;POINT(5.1357 7.3056)".parse().unwrap();
        assert_eq!(pos.to_lat_lng_deg(), (7.3056, 5.1357));

        let EwktPoint(pos) = " point ( -0.5  51.25 ) ".parse().unwrap();
        assert_eq!(pos.to_lat_lng_deg(), (51.25, -0.5));
    }

    #[test]
    fn reject_invalid_ewkt() {
        assert!(matches!(
            "SRID=3857;POINT(5 7)".parse::<EwktPoint>(),
            Err(ParseError::Srid(_))
        ));
        assert!(matches!(
            "LINESTRING(5 7, 6 8)".parse::<EwktPoint>(),
            Err(ParseError::Point(_))
        ));
        assert!(matches!(
            "POINT(5 7 9)".parse::<EwktPoint>(),
            Err(ParseError::Point(_))
        ));
        assert!(matches!(
            "POINT(5 95)".parse::<EwktPoint>(),
            Err(ParseError::Latitude(_))
        ));
    }
}
