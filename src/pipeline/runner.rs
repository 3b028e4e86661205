//! Pipeline runner for one location.
//!
//! Stages run in order, each fed by the previous one's artifact:
//!
//! 1. Intern the cleaned documents into a [`Corpus`]
//! 2. Count unigrams and bigrams ([`FrequencyModel`])
//! 3. Mine significant phrases ([`PhraseMiner`])
//! 4. Re-segment documents ([`Segmenter`])
//! 5. Build and normalize the co-occurrence graph ([`TransitionMatrix`])
//! 6. Rank nodes ([`StandardPageRank`])
//! 7. Materialize strings and take the top K
//!
//! Every structure lives only for the duration of [`KeyphrasePipeline::run`];
//! the pipeline holds nothing but its configuration and can be shared across
//! threads.

use crate::error::Result;
use crate::graph::builder::GraphBuilder;
use crate::graph::csr::TransitionMatrix;
use crate::pagerank::standard::StandardPageRank;
use crate::phrase::corpus::Corpus;
use crate::phrase::frequency::FrequencyModel;
use crate::phrase::miner::PhraseMiner;
use crate::phrase::segmenter::{render_segments, Segmenter};
use crate::pipeline::artifacts::{Keyphrase, LocationKeyphrases, RankScores};
use crate::pipeline::observer::{
    NoopObserver, PipelineObserver, StageClock, StageReport, StageReportBuilder, STAGE_CORPUS,
    STAGE_FORMAT, STAGE_FREQUENCY, STAGE_GRAPH, STAGE_MINE, STAGE_RANK, STAGE_SEGMENT,
};
use crate::types::KeyphraseConfig;

// ---------------------------------------------------------------------------
// Conditional tracing support
// ---------------------------------------------------------------------------

/// Enter a tracing span for a pipeline stage (when the `tracing` feature is
/// enabled). When disabled, this is a no-op and the compiler eliminates it.
macro_rules! trace_stage {
    ($name:expr) => {
        #[cfg(feature = "tracing")]
        let _span = tracing::info_span!("pipeline_stage", stage = $name).entered();
    };
}

/// Per-location keyphrase extraction pipeline
#[derive(Debug, Clone, Default)]
pub struct KeyphrasePipeline {
    config: KeyphraseConfig,
}

impl KeyphrasePipeline {
    /// Create a pipeline after validating `config`
    pub fn new(config: KeyphraseConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &KeyphraseConfig {
        &self.config
    }

    /// Run without an observer
    pub fn extract<D, T>(&self, documents: D) -> LocationKeyphrases
    where
        D: IntoIterator,
        D::Item: IntoIterator<Item = T>,
        T: AsRef<str>,
    {
        self.run(documents, &mut NoopObserver)
    }

    /// Execute every stage over one location's cleaned documents
    pub fn run<D, T>(&self, documents: D, observer: &mut impl PipelineObserver) -> LocationKeyphrases
    where
        D: IntoIterator,
        D::Item: IntoIterator<Item = T>,
        T: AsRef<str>,
    {
        let miner_cfg = &self.config.miner;

        // Stage 1: Intern documents
        trace_stage!(STAGE_CORPUS);
        observer.on_stage_start(STAGE_CORPUS);
        let clock = StageClock::start();
        let corpus = Corpus::new(documents, &miner_cfg.sentinel);
        let report = StageReportBuilder::new(clock.elapsed())
            .items(corpus.num_docs())
            .build();
        observer.on_stage_end(STAGE_CORPUS, &report);

        // Stage 2: Frequencies
        trace_stage!(STAGE_FREQUENCY);
        observer.on_stage_start(STAGE_FREQUENCY);
        let clock = StageClock::start();
        let freq = FrequencyModel::build(&corpus, miner_cfg);
        let report = StageReportBuilder::new(clock.elapsed())
            .items(freq.total() as usize)
            .build();
        observer.on_stage_end(STAGE_FREQUENCY, &report);
        #[cfg(feature = "tracing")]
        tracing::debug!(
            documents = corpus.num_docs(),
            vocabulary = freq.vocabulary_size(),
            total = freq.total(),
            min_sup = freq.min_sup(),
            "counted corpus"
        );

        // Stage 3: Mine phrases
        trace_stage!(STAGE_MINE);
        observer.on_stage_start(STAGE_MINE);
        let clock = StageClock::start();
        let table = PhraseMiner::with_config(miner_cfg.clone()).mine(&corpus, &freq);
        let report = StageReportBuilder::new(clock.elapsed())
            .items(table.num_phrases())
            .build();
        observer.on_stage_end(STAGE_MINE, &report);

        // Stage 4: Re-segment
        trace_stage!(STAGE_SEGMENT);
        observer.on_stage_start(STAGE_SEGMENT);
        let clock = StageClock::start();
        let segmented = Segmenter::new(&table, miner_cfg).segment_corpus(&corpus);
        let report = StageReportBuilder::new(clock.elapsed())
            .items(segmented.iter().map(Vec::len).sum())
            .build();
        observer.on_stage_end(STAGE_SEGMENT, &report);

        // Stage 5: Build graph
        trace_stage!(STAGE_GRAPH);
        observer.on_stage_start(STAGE_GRAPH);
        let clock = StageClock::start();
        let builder = GraphBuilder::from_segments(&segmented);
        let graph = TransitionMatrix::from_builder(&builder);
        let report = StageReportBuilder::new(clock.elapsed())
            .nodes(graph.num_nodes)
            .edges(graph.num_edges())
            .build();
        observer.on_stage_end(STAGE_GRAPH, &report);

        // Stage 6: Rank
        trace_stage!(STAGE_RANK);
        observer.on_stage_start(STAGE_RANK);
        let clock = StageClock::start();
        let rank = StandardPageRank::from_config(&self.config.rank).run(&graph);
        let report = StageReportBuilder::new(clock.elapsed())
            .nodes(rank.len())
            .iterations(rank.iterations)
            .converged(rank.converged)
            .build();
        observer.on_stage_end(STAGE_RANK, &report);
        #[cfg(feature = "tracing")]
        tracing::debug!(
            nodes = graph.num_nodes,
            edges = graph.num_edges(),
            iterations = rank.iterations,
            converged = rank.converged,
            "ranked co-occurrence graph"
        );

        // Stage 7: Format
        trace_stage!(STAGE_FORMAT);
        observer.on_stage_start(STAGE_FORMAT);
        let clock = StageClock::start();
        let pool = corpus.pool();
        let delimiter = miner_cfg.delimiter.as_str();
        let scores = RankScores::new(
            rank.scores
                .iter()
                .enumerate()
                .map(|(node, &score)| Keyphrase {
                    text: graph.label(node as u32, pool, delimiter),
                    score,
                })
                .collect(),
        );
        let result = LocationKeyphrases {
            keyphrases: scores.top_k(self.config.top_k),
            scores,
            phrases: table.render(pool, delimiter),
            segments: render_segments(pool, &segmented, delimiter),
            num_docs: corpus.num_docs(),
            iterations: rank.iterations,
            converged: rank.converged,
        };
        let report = StageReport::new(clock.elapsed());
        observer.on_stage_end(STAGE_FORMAT, &report);

        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pipeline::observer::RecordingObserver;
    use crate::types::MatchRule;

    fn tweets() -> Vec<Vec<&'static str>> {
        vec![
            vec!["navy", "pier", "<unk>", "ferris", "wheel"],
            vec!["navy", "pier", "fireworks", "<unk>", "tonight"],
            vec!["ferris", "wheel", "navy", "pier"],
            vec!["fireworks", "<unk>", "lake"],
            vec!["lake", "navy", "pier"],
        ]
    }

    #[test]
    fn test_end_to_end_phrases_ranked() {
        let pipeline = KeyphrasePipeline::default();
        let out = pipeline.extract(tweets());

        assert_eq!(out.num_docs, 5);
        assert!(out.phrases.iter().any(|p| p.prefix == "navy" && p.extension == "pier"));
        assert!(out.segments[0].contains(&"navy|pier".to_string()));
        assert_eq!(out.keyphrases[0].text, "navy|pier");
        assert!(out.keyphrases.len() <= 10);

        for pair in out.keyphrases.windows(2) {
            assert!(pair[0].score >= pair[1].score);
        }
    }

    #[test]
    fn test_single_document_example() {
        let pipeline = KeyphrasePipeline::default();
        let out = pipeline.extract(vec![vec!["a", "b", "c"]]);

        // (a, b) and (b, c) are both retained, so "a" opens a phrase and the
        // anchor probe takes "b"; (a, c) is not a pair, so "c" stays alone.
        assert_eq!(out.segments, vec![vec!["a|b", "c"]]);
        assert_eq!(out.scores.len(), 2);
        assert_eq!(out.scores.get("a|b"), Some(0.5));
        assert_eq!(out.scores.get("c"), Some(0.5));
        assert_eq!(out.iterations, 1);
        assert!(out.converged);
    }

    #[test]
    fn test_degenerate_inputs() {
        let pipeline = KeyphrasePipeline::default();

        let out = pipeline.extract(Vec::<Vec<&str>>::new());
        assert!(out.keyphrases.is_empty());
        assert!(out.phrases.is_empty());
        assert!(out.segments.is_empty());

        let out = pipeline.extract(vec![vec!["<unk>", "<unk>"], vec![]]);
        assert!(out.keyphrases.is_empty());
        assert_eq!(out.segments, vec![Vec::<String>::new(), Vec::new()]);
    }

    #[test]
    fn test_ties_ordered_by_first_pair() {
        let pipeline = KeyphrasePipeline::default();
        let out = pipeline.extract(vec![
            vec!["x"],
            vec!["y", "<unk>", "<unk>", "x"],
            vec!["p", "<unk>", "q"],
        ]);

        assert_eq!(out.texts(), vec!["y", "x", "p", "q"]);
        let first = out.keyphrases[0].score;
        assert!(out.keyphrases.iter().all(|k| k.score == first));
    }

    #[test]
    fn test_observer_sees_every_stage() {
        let pipeline = KeyphrasePipeline::default();
        let mut observer = RecordingObserver::new();
        pipeline.run(tweets(), &mut observer);

        assert_eq!(
            observer.stages(),
            vec![
                STAGE_CORPUS,
                STAGE_FREQUENCY,
                STAGE_MINE,
                STAGE_SEGMENT,
                STAGE_GRAPH,
                STAGE_RANK,
                STAGE_FORMAT
            ]
        );
        assert_eq!(observer.report(STAGE_CORPUS).unwrap().items, Some(5));
        let rank = observer.report(STAGE_RANK).unwrap();
        assert!(rank.iterations.unwrap() >= 1);
        assert!(rank.iterations.unwrap() <= 30);
    }

    #[test]
    fn test_top_k_respected() {
        let mut config = KeyphraseConfig::default();
        config.top_k = 2;
        let pipeline = KeyphrasePipeline::new(config).unwrap();

        let out = pipeline.extract(tweets());
        assert_eq!(out.keyphrases.len(), 2);
        assert!(out.scores.len() > 2);
    }

    #[test]
    fn test_custom_sentinel_and_delimiter() {
        let mut config = KeyphraseConfig::default();
        config.miner.sentinel = "_".to_string();
        config.miner.delimiter = " ".to_string();
        config.miner.match_rule = MatchRule::Incremental;
        let pipeline = KeyphrasePipeline::new(config).unwrap();

        let out = pipeline.extract(vec![vec!["a", "b", "_", "c"]]);
        assert_eq!(out.segments, vec![vec!["a b", "c"]]);
    }

    #[test]
    fn test_invalid_config_rejected() {
        let mut config = KeyphraseConfig::default();
        config.rank.damping = -0.1;
        assert!(KeyphrasePipeline::new(config).is_err());
    }

    #[test]
    fn test_deterministic() {
        let pipeline = KeyphrasePipeline::default();
        let a = pipeline.extract(tweets());
        let b = pipeline.extract(tweets());

        assert_eq!(a.keyphrases, b.keyphrases);
        assert_eq!(a.scores, b.scores);
        assert_eq!(a.phrases, b.phrases);
        assert_eq!(a.segments, b.segments);
    }
}
