//! Running statistics for a batch of realizations.

/// Mean and population standard deviation of a sample.
///
/// # Examples
/// ```
/// use brooks_core::SampleStatistics;
///
/// let stats = SampleStatistics::from_values(&[2, 4, 4, 4, 5, 5, 7, 9]);
/// assert_eq!(stats.mean, 5.0);
/// assert_eq!(stats.std_dev, 2.0);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct SampleStatistics {
    /// Arithmetic mean.
    pub mean: f64,
    /// Standard deviation with denominator `n`.
    pub std_dev: f64,
}

impl SampleStatistics {
    /// Summarises `values`. An empty sample yields zero mean and deviation.
    #[expect(
        clippy::cast_precision_loss,
        reason = "degree and colour counts are far below 2^52"
    )]
    #[expect(
        clippy::float_arithmetic,
        reason = "mean and variance are floating-point by definition"
    )]
    #[must_use]
    pub fn from_values(values: &[usize]) -> Self {
        if values.is_empty() {
            return Self {
                mean: 0.0,
                std_dev: 0.0,
            };
        }
        let count = values.len() as f64;
        let mean = values.iter().map(|value| *value as f64).sum::<f64>() / count;
        let variance = values
            .iter()
            .map(|value| {
                let delta = *value as f64 - mean;
                delta * delta
            })
            .sum::<f64>()
            / count;
        Self {
            mean,
            std_dev: variance.sqrt(),
        }
    }
}

/// Accumulates per-realization measurements for one batch.
///
/// Owned by a single batch run and finalised once all realizations have been
/// recorded.
#[derive(Debug, Clone, Default)]
pub struct BatchStatistics {
    colors_used: Vec<usize>,
    max_degrees: Vec<usize>,
    anomalies: usize,
    not_applicable: usize,
}

impl BatchStatistics {
    /// Creates an accumulator with room for `realizations` samples.
    #[must_use]
    pub fn with_capacity(realizations: usize) -> Self {
        Self {
            colors_used: Vec::with_capacity(realizations),
            max_degrees: Vec::with_capacity(realizations),
            ..Self::default()
        }
    }

    /// Records the colour count and maximum degree of one realization.
    pub fn record(&mut self, colors_used: usize, max_degree: usize) {
        self.colors_used.push(colors_used);
        self.max_degrees.push(max_degree);
    }

    /// Counts a realization whose greedy colouring exceeded the bound.
    pub fn record_anomaly(&mut self) {
        self.anomalies += 1;
    }

    /// Counts a realization the bound does not apply to.
    pub fn record_not_applicable(&mut self) {
        self.not_applicable += 1;
    }

    /// Number of recorded realizations.
    #[must_use]
    pub fn len(&self) -> usize {
        self.colors_used.len()
    }

    /// Returns `true` when nothing has been recorded.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.colors_used.is_empty()
    }

    /// Anomalies counted so far.
    #[must_use]
    pub fn anomalies(&self) -> usize {
        self.anomalies
    }

    /// Not-applicable verdicts counted so far.
    #[must_use]
    pub fn not_applicable(&self) -> usize {
        self.not_applicable
    }

    /// Statistics over recorded colour counts.
    #[must_use]
    pub fn chromatic(&self) -> SampleStatistics {
        SampleStatistics::from_values(&self.colors_used)
    }

    /// Statistics over recorded maximum degrees.
    #[must_use]
    pub fn max_degree(&self) -> SampleStatistics {
        SampleStatistics::from_values(&self.max_degrees)
    }

    /// Fraction of recorded realizations flagged as anomalies.
    #[expect(
        clippy::cast_precision_loss,
        reason = "realization counts are far below 2^52"
    )]
    #[expect(clippy::float_arithmetic, reason = "ratio is a floating-point quotient")]
    #[must_use]
    pub fn anomaly_ratio(&self) -> f64 {
        if self.is_empty() {
            return 0.0;
        }
        self.anomalies as f64 / self.len() as f64
    }
}
