//! Pipeline observer: hooks at stage boundaries.
//!
//! Observers receive notifications at stage boundaries without coupling to
//! stage logic. Use cases include timing stages, capturing graph sizes and
//! convergence info, and emitting structured telemetry.

use std::time::{Duration, Instant};

pub const STAGE_CORPUS: &str = "corpus";
pub const STAGE_FREQUENCY: &str = "frequency";
pub const STAGE_MINE: &str = "mine_phrases";
pub const STAGE_SEGMENT: &str = "segment";
pub const STAGE_GRAPH: &str = "graph";
pub const STAGE_RANK: &str = "rank";
pub const STAGE_FORMAT: &str = "format";

/// Wall-clock timer for a single stage
#[derive(Debug, Clone, Copy)]
pub struct StageClock {
    started: Instant,
}

impl StageClock {
    pub fn start() -> Self {
        Self {
            started: Instant::now(),
        }
    }

    pub fn elapsed(&self) -> Duration {
        self.started.elapsed()
    }
}

/// What a stage reports when it finishes
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StageReport {
    pub elapsed: Duration,
    /// Items produced (documents, phrases, segments) where meaningful
    pub items: Option<usize>,
    pub nodes: Option<usize>,
    pub edges: Option<usize>,
    pub iterations: Option<usize>,
    pub converged: Option<bool>,
}

impl StageReport {
    pub fn new(elapsed: Duration) -> Self {
        Self {
            elapsed,
            ..Default::default()
        }
    }
}

/// Fluent construction of a [`StageReport`]
#[derive(Debug, Clone)]
pub struct StageReportBuilder {
    report: StageReport,
}

impl StageReportBuilder {
    pub fn new(elapsed: Duration) -> Self {
        Self {
            report: StageReport::new(elapsed),
        }
    }

    pub fn items(mut self, items: usize) -> Self {
        self.report.items = Some(items);
        self
    }

    pub fn nodes(mut self, nodes: usize) -> Self {
        self.report.nodes = Some(nodes);
        self
    }

    pub fn edges(mut self, edges: usize) -> Self {
        self.report.edges = Some(edges);
        self
    }

    pub fn iterations(mut self, iterations: usize) -> Self {
        self.report.iterations = Some(iterations);
        self
    }

    pub fn converged(mut self, converged: bool) -> Self {
        self.report.converged = Some(converged);
        self
    }

    pub fn build(self) -> StageReport {
        self.report
    }
}

/// Stage boundary callbacks. All methods default to no-ops.
pub trait PipelineObserver {
    fn on_stage_start(&mut self, _stage: &'static str) {}
    fn on_stage_end(&mut self, _stage: &'static str, _report: &StageReport) {}
}

/// Observer that ignores every event
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopObserver;

impl PipelineObserver for NoopObserver {}

/// Observer that keeps every finished stage report, in order
#[derive(Debug, Clone, Default)]
pub struct RecordingObserver {
    pub started: Vec<&'static str>,
    pub reports: Vec<(&'static str, StageReport)>,
}

impl RecordingObserver {
    pub fn new() -> Self {
        Self::default()
    }

    /// The report of a finished stage
    pub fn report(&self, stage: &str) -> Option<&StageReport> {
        self.reports
            .iter()
            .find(|(name, _)| *name == stage)
            .map(|(_, report)| report)
    }

    /// Names of finished stages in completion order
    pub fn stages(&self) -> Vec<&'static str> {
        self.reports.iter().map(|(name, _)| *name).collect()
    }
}

impl PipelineObserver for RecordingObserver {
    fn on_stage_start(&mut self, stage: &'static str) {
        self.started.push(stage);
    }

    fn on_stage_end(&mut self, stage: &'static str, report: &StageReport) {
        self.reports.push((stage, report.clone()));
    }
}
