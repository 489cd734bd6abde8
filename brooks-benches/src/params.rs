//! Benchmark parameter types.
//!
//! Each type renders as the Criterion benchmark identifier.

use std::fmt;

use brooks_core::GraphModel;

/// Parameters for a per-graph benchmark.
#[derive(Clone, Copy, Debug)]
pub struct GraphBenchParams {
    /// Generator model.
    pub model: GraphModel,
    /// Nodes per graph.
    pub node_count: usize,
}

impl fmt::Display for GraphBenchParams {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{},n={}", self.model, self.node_count)
    }
}

/// Parameters for a whole-batch benchmark.
#[derive(Clone, Copy, Debug)]
pub struct BatchBenchParams {
    /// Generator model.
    pub model: GraphModel,
    /// Nodes per realization.
    pub node_count: usize,
    /// Realizations per batch.
    pub realizations: usize,
}

impl fmt::Display for BatchBenchParams {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{},n={},r={}",
            self.model, self.node_count, self.realizations
        )
    }
}
