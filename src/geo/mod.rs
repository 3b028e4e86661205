//! Geo-assignment of texts to reference locations
//!
//! Each geotagged text goes to the reference location closest to it in the
//! plane of `(lat, lon)` pairs. Distances are planar on purpose: the
//! reference points are dense within one city, where the distortion does
//! not change which neighbour is nearest.

pub mod assign;
pub mod index;

use serde::{Deserialize, Serialize};

/// A named point texts can be assigned to
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReferenceLocation {
    #[serde(default)]
    pub name: Option<String>,
    pub lat: f64,
    pub lon: f64,
}

impl ReferenceLocation {
    pub fn new(name: impl Into<String>, lat: f64, lon: f64) -> Self {
        Self {
            name: Some(name.into()),
            lat,
            lon,
        }
    }
}

/// A raw text with the coordinates it was posted from
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeoText {
    pub lat: f64,
    pub lon: f64,
    pub text: String,
}

impl GeoText {
    pub fn new(lat: f64, lon: f64, text: impl Into<String>) -> Self {
        Self {
            lat,
            lon,
            text: text.into(),
        }
    }
}
