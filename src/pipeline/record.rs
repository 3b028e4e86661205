//! Per-location output record

use serde::{Deserialize, Serialize};

use crate::geo::ReferenceLocation;
use crate::pipeline::artifacts::LocationKeyphrases;

/// Name used when a reference location has none
pub const UNKNOWN_PLACE: &str = "unknown place";

/// Serializable summary of one location's keyphrases
///
/// `center` is `[lon, lat]` (GeoJSON order).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LocationRecord {
    pub center: [f64; 2],
    pub name: String,
    pub num_doc: usize,
    pub topwords: Vec<String>,
}

impl LocationRecord {
    pub fn new(location: &ReferenceLocation, result: &LocationKeyphrases) -> Self {
        let name = location
            .name
            .as_deref()
            .map(str::trim)
            .filter(|name| !name.is_empty())
            .unwrap_or(UNKNOWN_PLACE)
            .to_string();

        Self {
            center: [location.lon, location.lat],
            name,
            num_doc: result.num_docs,
            topwords: result.texts(),
        }
    }
}
