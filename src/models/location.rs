//! Geolocation records attached to tweets.

use serde::Deserialize;
use std::fmt;

/// A latitude/longitude pair, in that order.
#[derive(Debug, Clone, Copy, Default, PartialEq, Deserialize)]
pub struct LatLong(pub f64, pub f64);

impl LatLong {
    pub fn latitude(&self) -> f64 {
        self.0
    }

    pub fn longitude(&self) -> f64 {
        self.1
    }
}

impl fmt::Display for LatLong {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{},{}", self.0, self.1)
    }
}

/// A longitude/latitude pair, as used by GeoJSON-style `coordinates`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Deserialize)]
pub struct LongLat(pub f64, pub f64);

impl fmt::Display for LongLat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{},{}", self.0, self.1)
    }
}

/// Deprecated point field on a tweet; latitude-first coordinates.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct Geo {
    #[serde(rename = "type")]
    pub kind: String,
    pub coordinates: LatLong,
}

/// GeoJSON point field on a tweet; longitude-first coordinates.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct Coordinates {
    #[serde(rename = "type")]
    pub kind: String,
    pub coordinates: LongLat,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct BoundingBox {
    #[serde(rename = "type")]
    pub kind: String,
    pub coordinates: Vec<Vec<Vec<f64>>>,
}

/// A named place a tweet is associated with.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct Place {
    pub id: String,
    pub url: String,
    pub place_type: String,
    pub name: String,
    pub full_name: String,
    pub country_code: String,
    pub country: String,
    pub bounding_box: BoundingBox,
}
