//! Seeded graph fixtures.

use brooks_core::{Graph, GraphModel, ModelParams, generate};
use rand::{SeedableRng, rngs::SmallRng};

use crate::error::BenchSetupError;

/// Generates `count` graphs of `node_count` nodes from `model` with default
/// parameters, reproducibly from `seed`.
///
/// # Errors
/// Returns [`BenchSetupError::Core`] when the default parameters do not fit
/// `node_count`.
pub fn seeded_graphs(
    model: GraphModel,
    node_count: usize,
    count: usize,
    seed: u64,
) -> Result<Vec<Graph>, BenchSetupError> {
    let params = ModelParams::default();
    params.validate(model, node_count)?;
    let mut rng = SmallRng::seed_from_u64(seed);
    (0..count)
        .map(|_| generate(model, node_count, &params, &mut rng).map_err(BenchSetupError::from))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    use rstest::rstest;

    #[rstest]
    #[case(GraphModel::SmallWorld)]
    #[case(GraphModel::ScaleFree)]
    fn fixtures_are_reproducible(#[case] model: GraphModel) -> Result<(), BenchSetupError> {
        let first = seeded_graphs(model, 40, 3, 9)?;
        let second = seeded_graphs(model, 40, 3, 9)?;
        assert_eq!(first.len(), 3);
        for (left, right) in first.iter().zip(&second) {
            assert_eq!(left.edges().collect::<Vec<_>>(), right.edges().collect::<Vec<_>>());
        }
        Ok(())
    }

    #[rstest]
    fn undersized_lattice_is_rejected() {
        assert!(seeded_graphs(GraphModel::SmallWorld, 3, 1, 0).is_err());
    }
}
