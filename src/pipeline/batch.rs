//! Many locations at once
//!
//! Locations share nothing, so each runs its own pipeline on the rayon pool.
//! Output order follows input order.

use rayon::prelude::*;

use crate::geo::assign::AssignedLocation;
use crate::nlp::cleaner::TextCleaner;
use crate::pipeline::record::LocationRecord;
use crate::pipeline::runner::KeyphrasePipeline;

/// Clean, extract, and summarize every location in parallel
pub fn process_locations<C>(
    pipeline: &KeyphrasePipeline,
    cleaner: &C,
    locations: &[AssignedLocation],
) -> Vec<LocationRecord>
where
    C: TextCleaner + ?Sized,
{
    locations
        .par_iter()
        .map(|assigned| {
            let documents: Vec<Vec<String>> = assigned
                .texts
                .iter()
                .map(|text| cleaner.clean(text))
                .collect();
            let result = pipeline.extract(documents);

            #[cfg(feature = "tracing")]
            tracing::debug!(
                location = assigned.location.name.as_deref().unwrap_or_default(),
                documents = result.num_docs,
                keyphrases = result.keyphrases.len(),
                "processed location"
            );

            LocationRecord::new(&assigned.location, &result)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geo::ReferenceLocation;
    use crate::nlp::cleaner::BasicCleaner;
    use crate::nlp::stopwords::StopwordFilter;
    use crate::pipeline::record::UNKNOWN_PLACE;

    fn group(name: Option<&str>, texts: &[&str]) -> AssignedLocation {
        AssignedLocation {
            location: ReferenceLocation {
                name: name.map(str::to_string),
                lat: 41.0,
                lon: -87.0,
            },
            texts: texts.iter().map(|t| t.to_string()).collect(),
        }
    }

    #[test]
    fn test_order_preserved() {
        let pipeline = KeyphrasePipeline::default();
        let cleaner = BasicCleaner::new(StopwordFilter::from_list(&["the", "at"]));
        let locations: Vec<AssignedLocation> = (0..16)
            .map(|i| {
                let name = format!("spot {i}");
                group(Some(&name), &["deep dish pizza", "deep dish again"])
            })
            .collect();

        let records = process_locations(&pipeline, &cleaner, &locations);

        assert_eq!(records.len(), 16);
        for (i, record) in records.iter().enumerate() {
            assert_eq!(record.name, format!("spot {i}"));
            assert_eq!(record.num_doc, 2);
        }
    }

    #[test]
    fn test_matches_sequential_run() {
        let pipeline = KeyphrasePipeline::default();
        let cleaner = BasicCleaner::new(StopwordFilter::from_list(&["the", "at"]));
        let texts = [
            "Fireworks at the Navy Pier tonight",
            "navy pier ferris wheel",
            "ferris wheel views at navy pier",
        ];
        let locations = vec![group(None, &texts)];

        let records = process_locations(&pipeline, &cleaner, &locations);
        let documents: Vec<Vec<String>> = texts.iter().map(|t| cleaner.clean(t)).collect();
        let direct = pipeline.extract(documents);

        assert_eq!(records[0].topwords, direct.texts());
        assert_eq!(records[0].name, UNKNOWN_PLACE);
        assert_eq!(records[0].num_doc, 3);
    }

    #[test]
    fn test_empty_location() {
        let pipeline = KeyphrasePipeline::default();
        let cleaner = BasicCleaner::default();
        let records = process_locations(&pipeline, &cleaner, &[group(Some("empty"), &[])]);

        assert_eq!(records[0].num_doc, 0);
        assert!(records[0].topwords.is_empty());
    }
}
