//! Named graph families checked one graph at a time.
//!
//! These sit beside the batch models rather than inside [`crate::GraphModel`]:
//! batches only accept the two random models, while single checks also take
//! the deterministic exception graphs and Erdős–Rényi `G(n, p)`.

use rand::Rng;

use crate::{Result, error::BrooksError, graph::Graph};

const CYCLE_SLUG: &str = "cycle";
const GNP_SLUG: &str = "gnp";

/// Complete graph `K_n`.
///
/// # Examples
/// ```
/// use brooks_core::complete_graph;
///
/// assert_eq!(complete_graph(5).edge_count(), 10);
/// ```
#[must_use]
pub fn complete_graph(node_count: usize) -> Graph {
    Graph::from_edges(
        node_count,
        (0..node_count).flat_map(|left| ((left + 1)..node_count).map(move |right| (left, right))),
    )
}

/// Simple cycle `C_n`.
///
/// # Errors
/// Returns [`BrooksError::InvalidModelParameter`] when `node_count < 3`.
///
/// # Examples
/// ```
/// use brooks_core::cycle_graph;
///
/// let pentagon = cycle_graph(5).expect("five nodes form a cycle");
/// assert_eq!(pentagon.edge_count(), 5);
/// assert!(cycle_graph(2).is_err());
/// ```
pub fn cycle_graph(node_count: usize) -> Result<Graph> {
    if node_count < 3 {
        return Err(BrooksError::InvalidModelParameter {
            model: CYCLE_SLUG,
            parameter: "nodes",
            reason: format!("a cycle needs at least 3 nodes (got {node_count})"),
        });
    }
    Ok(Graph::from_edges(
        node_count,
        (0..node_count).map(|node| (node, (node + 1) % node_count)),
    ))
}

/// Erdős–Rényi `G(n, p)`: each unordered pair is joined with probability `p`.
///
/// Pairs are visited in lexicographic order, so the graph is a pure function
/// of the random source.
///
/// # Errors
/// Returns [`BrooksError::InvalidModelParameter`] when `probability` lies
/// outside `[0, 1]`.
///
/// # Examples
/// ```
/// use brooks_core::gnp_random_graph;
/// use rand::{SeedableRng, rngs::SmallRng};
///
/// let mut rng = SmallRng::seed_from_u64(0);
/// let graph = gnp_random_graph(8, 1.0, &mut rng).expect("probability is valid");
/// assert_eq!(graph.edge_count(), 28);
/// ```
pub fn gnp_random_graph<R: Rng + ?Sized>(
    node_count: usize,
    probability: f64,
    rng: &mut R,
) -> Result<Graph> {
    if !(0.0..=1.0).contains(&probability) {
        return Err(BrooksError::InvalidModelParameter {
            model: GNP_SLUG,
            parameter: "probability",
            reason: format!("{probability} is not within [0, 1]"),
        });
    }
    let mut graph = Graph::with_nodes(node_count);
    for left in 0..node_count {
        for right in (left + 1)..node_count {
            if rng.gen_bool(probability) {
                graph.add_edge(left, right);
            }
        }
    }
    Ok(graph)
}
