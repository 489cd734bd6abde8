//! Batch orchestration across many random realizations.
//!
//! A [`BatchRunner`] generates graphs from a seeded random source, colours
//! them greedily, runs the Brooks classifier and checker, accumulates
//! statistics, and hands every `stride`-th realization to a
//! [`SnapshotRenderer`].

use rand::{SeedableRng, rngs::SmallRng};
use tracing::{debug, info, instrument, warn};

use crate::{
    Result,
    coloring::{Coloring, greedy_largest_first},
    error::BrooksError,
    generator::{GraphModel, ModelParams, generate},
    graph::Graph,
    snapshot::{NoSnapshots, Snapshot, SnapshotRenderer, snapshot_title},
    stats::{BatchStatistics, SampleStatistics},
    theorem::{TheoremCheck, Verdict, evaluate},
};

const DEFAULT_SAMPLE_STRIDE: usize = 10;
const DEFAULT_SEED: u64 = 0;

/// Configures and constructs [`BatchRunner`] instances.
///
/// # Examples
/// ```
/// use brooks_core::{BatchRunnerBuilder, ModelParams};
///
/// let runner = BatchRunnerBuilder::new()
///     .with_seed(7)
///     .with_sample_stride(5)
///     .with_params(ModelParams::default().with_attachments(3))
///     .build()
///     .expect("configuration is valid");
/// assert_eq!(runner.seed(), 7);
/// assert_eq!(runner.sample_stride(), 5);
/// ```
#[derive(Debug, Clone)]
pub struct BatchRunnerBuilder {
    params: ModelParams,
    seed: u64,
    sample_stride: usize,
}

impl Default for BatchRunnerBuilder {
    fn default() -> Self {
        Self {
            params: ModelParams::default(),
            seed: DEFAULT_SEED,
            sample_stride: DEFAULT_SAMPLE_STRIDE,
        }
    }
}

impl BatchRunnerBuilder {
    /// Creates a builder populated with default parameters.
    ///
    /// # Examples
    /// ```
    /// use brooks_core::BatchRunnerBuilder;
    ///
    /// let builder = BatchRunnerBuilder::new();
    /// assert_eq!(builder.sample_stride(), 10);
    /// assert_eq!(builder.seed(), 0);
    /// ```
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Overrides the generator parameters.
    #[must_use]
    pub fn with_params(mut self, params: ModelParams) -> Self {
        self.params = params;
        self
    }

    /// Overrides the seed of the random source.
    #[must_use]
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// Overrides the snapshot sampling stride.
    #[must_use]
    pub fn with_sample_stride(mut self, stride: usize) -> Self {
        self.sample_stride = stride;
        self
    }

    /// Returns the configured generator parameters.
    #[must_use]
    pub fn params(&self) -> ModelParams {
        self.params
    }

    /// Returns the configured seed.
    #[must_use]
    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Returns the configured snapshot sampling stride.
    #[must_use]
    pub fn sample_stride(&self) -> usize {
        self.sample_stride
    }

    /// Validates the configuration and constructs a [`BatchRunner`].
    ///
    /// # Errors
    /// Returns [`BrooksError::InvalidSampleStride`] when the stride is zero.
    ///
    /// # Examples
    /// ```
    /// use brooks_core::{BatchRunnerBuilder, BrooksError};
    ///
    /// let err = BatchRunnerBuilder::new().with_sample_stride(0).build().unwrap_err();
    /// assert!(matches!(err, BrooksError::InvalidSampleStride { got: 0 }));
    /// ```
    pub fn build(self) -> Result<BatchRunner> {
        if self.sample_stride == 0 {
            return Err(BrooksError::InvalidSampleStride {
                got: self.sample_stride,
            });
        }
        Ok(BatchRunner {
            params: self.params,
            seed: self.seed,
            sample_stride: self.sample_stride,
        })
    }
}

/// Measurements for one realization of a batch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct RealizationOutcome {
    /// Zero-based realization index.
    pub index: usize,
    /// Number of nodes in the generated graph.
    pub node_count: usize,
    /// Number of edges in the generated graph.
    pub edge_count: usize,
    /// Classifier and checker results.
    pub check: TheoremCheck,
}

/// Statistics reported after a batch completes.
///
/// `anomalies` counts realizations whose greedy colouring used more colours
/// than the maximum degree on a graph the Brooks bound covers. Greedy colour
/// counts overestimate the chromatic number, so these are heuristic
/// anomalies rather than counterexamples.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct BatchSummary {
    /// Model that generated every realization.
    pub model: GraphModel,
    /// Node count of every realization.
    pub node_count: usize,
    /// Number of realizations run.
    pub realizations: usize,
    /// Seed of the random source.
    pub seed: u64,
    /// Statistics over greedy colour counts.
    pub chromatic: SampleStatistics,
    /// Statistics over maximum degrees.
    pub max_degree: SampleStatistics,
    /// Realizations whose verdict was [`Verdict::Violated`].
    pub anomalies: usize,
    /// `anomalies / realizations`.
    pub anomaly_ratio: f64,
    /// Realizations whose verdict was [`Verdict::NotApplicable`].
    pub not_applicable: usize,
    /// Snapshots written by the renderer.
    pub snapshots_written: usize,
    /// Snapshots the renderer failed to write.
    pub snapshots_failed: usize,
}

/// Runs batches of random realizations.
///
/// # Examples
/// ```
/// use brooks_core::{BatchRunnerBuilder, GraphModel};
///
/// let runner = BatchRunnerBuilder::new().with_seed(3).build().expect("valid configuration");
/// let summary = runner.run_batch("barabasi", 30, 12).expect("batch must run");
/// assert_eq!(summary.model, GraphModel::ScaleFree);
/// assert_eq!(summary.realizations, 12);
/// assert!(summary.chromatic.mean <= summary.max_degree.mean + 1.0);
/// ```
#[derive(Debug, Clone)]
pub struct BatchRunner {
    params: ModelParams,
    seed: u64,
    sample_stride: usize,
}

#[derive(Debug, Default)]
struct SnapshotTally {
    written: usize,
    failed: usize,
}

impl BatchRunner {
    /// Returns the generator parameters.
    #[must_use]
    pub fn params(&self) -> ModelParams {
        self.params
    }

    /// Returns the seed of the random source.
    #[must_use]
    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Returns the snapshot sampling stride.
    #[must_use]
    pub fn sample_stride(&self) -> usize {
        self.sample_stride
    }

    /// Runs `realizations` graphs of `node_count` nodes from the model named
    /// `generator` without rendering snapshots.
    ///
    /// # Errors
    /// Returns [`BrooksError::InvalidModel`] for an unknown model name before
    /// any realization runs, and the errors of [`Self::run_model`].
    pub fn run_batch(
        &self,
        generator: &str,
        node_count: usize,
        realizations: usize,
    ) -> Result<BatchSummary> {
        self.run_batch_with_renderer(generator, node_count, realizations, &mut NoSnapshots)
    }

    /// Like [`Self::run_batch`], handing every `stride`-th realization to
    /// `renderer`.
    ///
    /// # Errors
    /// See [`Self::run_batch`].
    pub fn run_batch_with_renderer<R: SnapshotRenderer>(
        &self,
        generator: &str,
        node_count: usize,
        realizations: usize,
        renderer: &mut R,
    ) -> Result<BatchSummary> {
        let model: GraphModel = generator.parse()?;
        self.run_model(model, node_count, realizations, renderer, |_| {})
    }

    /// Runs a batch for an already parsed `model`, reporting each realization
    /// to `on_realization`.
    ///
    /// # Errors
    /// Returns [`BrooksError::InvalidNodeCount`] or
    /// [`BrooksError::InvalidRealizationCount`] for zero counts,
    /// [`BrooksError::InvalidModelParameter`] when the parameters do not fit
    /// `node_count`, and [`BrooksError::InvalidColoring`] if the colouring
    /// oracle produces an improper colouring. Rendering failures are logged
    /// and counted, never returned.
    #[instrument(
        name = "core.run_batch",
        err,
        skip(self, renderer, on_realization),
        fields(
            model = %model,
            nodes = node_count,
            realizations = realizations,
            seed = self.seed,
            stride = self.sample_stride
        ),
    )]
    pub fn run_model<R, F>(
        &self,
        model: GraphModel,
        node_count: usize,
        realizations: usize,
        renderer: &mut R,
        mut on_realization: F,
    ) -> Result<BatchSummary>
    where
        R: SnapshotRenderer,
        F: FnMut(&RealizationOutcome),
    {
        if node_count == 0 {
            return Err(BrooksError::InvalidNodeCount { got: node_count });
        }
        if realizations == 0 {
            return Err(BrooksError::InvalidRealizationCount { got: realizations });
        }
        self.params.validate(model, node_count)?;

        let mut rng = SmallRng::seed_from_u64(self.seed);
        let mut stats = BatchStatistics::with_capacity(realizations);
        let mut tally = SnapshotTally::default();

        for index in 0..realizations {
            let graph = generate(model, node_count, &self.params, &mut rng)?;
            let coloring = greedy_largest_first(&graph);
            coloring
                .verify(&graph)
                .map_err(|defect| BrooksError::InvalidColoring {
                    realization: index,
                    defect,
                })?;

            let check = evaluate(&graph, &coloring);
            match check.verdict {
                Verdict::Violated => {
                    stats.record_anomaly();
                    record_anomaly_metric(model);
                }
                Verdict::NotApplicable => stats.record_not_applicable(),
                Verdict::Satisfied => {}
            }
            stats.record(check.colors_used, check.max_degree);
            record_realization_metric(model);

            let outcome = RealizationOutcome {
                index,
                node_count: graph.node_count(),
                edge_count: graph.edge_count(),
                check,
            };
            debug!(
                index,
                edges = outcome.edge_count,
                max_degree = check.max_degree,
                colors_used = check.colors_used,
                connected = check.connected,
                exception = ?check.exception,
                verdict = ?check.verdict,
                "realization evaluated"
            );
            on_realization(&outcome);

            if renderer.enabled() && index % self.sample_stride == 0 {
                request_snapshot(model, index, &graph, &coloring, renderer, &mut tally);
            }
        }

        let summary = BatchSummary {
            model,
            node_count,
            realizations,
            seed: self.seed,
            chromatic: stats.chromatic(),
            max_degree: stats.max_degree(),
            anomalies: stats.anomalies(),
            anomaly_ratio: stats.anomaly_ratio(),
            not_applicable: stats.not_applicable(),
            snapshots_written: tally.written,
            snapshots_failed: tally.failed,
        };
        info!(
            anomalies = summary.anomalies,
            not_applicable = summary.not_applicable,
            snapshots = summary.snapshots_written,
            "batch completed"
        );
        Ok(summary)
    }
}

fn request_snapshot<R: SnapshotRenderer>(
    model: GraphModel,
    index: usize,
    graph: &Graph,
    coloring: &Coloring,
    renderer: &mut R,
    tally: &mut SnapshotTally,
) {
    let title = snapshot_title(model, index);
    let snapshot = Snapshot {
        model,
        index,
        graph,
        coloring,
        title: &title,
    };
    match renderer.render(&snapshot) {
        Ok(path) => {
            tally.written += 1;
            debug!(index, path = %path.display(), "snapshot written");
        }
        Err(err) => {
            tally.failed += 1;
            record_snapshot_failure_metric(model);
            warn!(index, error = %err, "snapshot rendering failed; continuing batch");
        }
    }
}

#[cfg(feature = "metrics")]
fn record_realization_metric(model: GraphModel) {
    metrics::counter!("brooks_realizations_total", "model" => model.slug()).increment(1);
}

#[cfg(not(feature = "metrics"))]
const fn record_realization_metric(_model: GraphModel) {}

#[cfg(feature = "metrics")]
fn record_anomaly_metric(model: GraphModel) {
    metrics::counter!("brooks_anomalies_total", "model" => model.slug()).increment(1);
}

#[cfg(not(feature = "metrics"))]
const fn record_anomaly_metric(_model: GraphModel) {}

#[cfg(feature = "metrics")]
fn record_snapshot_failure_metric(model: GraphModel) {
    metrics::counter!("brooks_snapshot_failures_total", "model" => model.slug()).increment(1);
}

#[cfg(not(feature = "metrics"))]
const fn record_snapshot_failure_metric(_model: GraphModel) {}
