//! Grouping texts by their nearest reference location

use super::index::LocationIndex;
use super::{GeoText, ReferenceLocation};

/// One reference location and the raw texts assigned to it
#[derive(Debug, Clone, PartialEq)]
pub struct AssignedLocation {
    pub location: ReferenceLocation,
    /// Texts in input order
    pub texts: Vec<String>,
}

impl AssignedLocation {
    pub fn num_docs(&self) -> usize {
        self.texts.len()
    }
}

/// Result of [`assign_texts`]
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Assignment {
    /// One group per reference location, in index order. Locations nothing
    /// was assigned to have an empty `texts`.
    pub groups: Vec<AssignedLocation>,
    /// Texts whose coordinates were not finite
    pub unplaced: Vec<GeoText>,
}

impl Assignment {
    /// Groups with at least one text
    pub fn non_empty(&self) -> impl Iterator<Item = &AssignedLocation> {
        self.groups.iter().filter(|g| !g.texts.is_empty())
    }
}

/// Assign every text to exactly one reference location
pub fn assign_texts<I>(index: &LocationIndex, texts: I) -> Assignment
where
    I: IntoIterator<Item = GeoText>,
{
    let mut groups: Vec<AssignedLocation> = index
        .locations()
        .iter()
        .map(|location| AssignedLocation {
            location: location.clone(),
            texts: Vec::new(),
        })
        .collect();
    let mut unplaced = Vec::new();

    for text in texts {
        match index.nearest(text.lat, text.lon) {
            Some(slot) => groups[slot].texts.push(text.text),
            None => unplaced.push(text),
        }
    }

    #[cfg(feature = "tracing")]
    if !unplaced.is_empty() {
        tracing::warn!(count = unplaced.len(), "texts with non-finite coordinates left unassigned");
    }

    Assignment { groups, unplaced }
}
