//! # rapid-locphrase
//!
//! Location keyphrase extraction for short, noisy texts.
//!
//! For each location, the texts assigned to it are cleaned into token
//! sequences, significant multi-word phrases are mined with a frequency ratio
//! test, documents are re-segmented by longest phrase match, and the
//! resulting elements are ranked with PageRank over their co-occurrence
//! graph.
//!
//! ```no_run
//! use rapid_locphrase::{
//!     assign_texts, process_locations, BasicCleaner, GeoText, KeyphrasePipeline,
//!     LocationIndex, ReferenceLocation,
//! };
//!
//! # fn main() -> rapid_locphrase::Result<()> {
//! let index = LocationIndex::build(vec![
//!     ReferenceLocation::new("navy pier", 41.8917, -87.6086),
//!     ReferenceLocation::new("wrigley field", 41.9484, -87.6553),
//! ])?;
//! let assignment = assign_texts(
//!     &index,
//!     vec![GeoText::new(41.892, -87.609, "Fireworks at Navy Pier tonight")],
//! );
//!
//! let pipeline = KeyphrasePipeline::default();
//! let records = process_locations(&pipeline, &BasicCleaner::default(), &assignment.groups);
//! println!("{}", serde_json::to_string_pretty(&records).unwrap_or_default());
//! # Ok(())
//! # }
//! ```

pub mod error;
pub mod geo;
pub mod graph;
pub mod nlp;
pub mod pagerank;
pub mod phrase;
pub mod pipeline;
pub mod types;

pub use error::{LocphraseError, Result};
pub use geo::assign::{assign_texts, AssignedLocation, Assignment};
pub use geo::index::LocationIndex;
pub use geo::{GeoText, ReferenceLocation};
pub use nlp::cleaner::{BasicCleaner, TextCleaner};
pub use nlp::stopwords::StopwordFilter;
pub use pipeline::artifacts::{Keyphrase, LocationKeyphrases, RankScores};
pub use pipeline::batch::process_locations;
pub use pipeline::record::LocationRecord;
pub use pipeline::runner::KeyphrasePipeline;
pub use types::{KeyphraseConfig, MatchRule, MinerConfig, RankConfig};

/// Rank the elements of one location's cleaned documents with default
/// settings
pub fn extract_keyphrases<D, T>(documents: D) -> LocationKeyphrases
where
    D: IntoIterator,
    D::Item: IntoIterator<Item = T>,
    T: AsRef<str>,
{
    KeyphrasePipeline::default().extract(documents)
}
