//! Greedy largest-first vertex colouring.
//!
//! Nodes are visited in non-increasing degree order, ties broken by ascending
//! node identifier, and each receives the smallest colour not already used by
//! a coloured neighbour. The heuristic never uses more than `Δ + 1` colours
//! but may exceed the chromatic number.

use std::collections::BTreeSet;

use crate::{
    error::ColoringDefect,
    graph::{Graph, NodeId},
};

/// Colour assigned to a node.
pub type Color = usize;

/// Assignment of a colour to every node of a graph.
///
/// # Examples
/// ```
/// use brooks_core::{Coloring, Graph, greedy_largest_first};
///
/// let star = Graph::from_edges(5, [(0, 1), (0, 2), (0, 3), (0, 4)]);
/// let coloring = greedy_largest_first(&star);
/// assert_eq!(coloring.color_of(0), Some(0));
/// assert_eq!(coloring.colors_used(), 2);
/// assert!(coloring.verify(&star).is_ok());
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Coloring {
    colors: Vec<Option<Color>>,
}

impl Coloring {
    /// Builds a colouring from per-node colours indexed by node identifier.
    #[must_use]
    pub fn from_colors(colors: Vec<Color>) -> Self {
        Self {
            colors: colors.into_iter().map(Some).collect(),
        }
    }

    /// Colour of `node`, if assigned.
    #[must_use]
    pub fn color_of(&self, node: NodeId) -> Option<Color> {
        self.colors.get(node).copied().flatten()
    }

    /// Number of nodes covered by the colouring.
    #[must_use]
    pub fn len(&self) -> usize {
        self.colors.iter().filter(|color| color.is_some()).count()
    }

    /// Returns `true` when no node carries a colour.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Number of distinct colours in use.
    #[must_use]
    pub fn colors_used(&self) -> usize {
        self.colors.iter().flatten().collect::<BTreeSet<_>>().len()
    }

    /// Iterates `(node, colour)` pairs for coloured nodes.
    pub fn iter(&self) -> impl Iterator<Item = (NodeId, Color)> + '_ {
        self.colors
            .iter()
            .enumerate()
            .filter_map(|(node, color)| color.map(|value| (node, value)))
    }

    /// Checks that every node of `graph` is coloured and no edge is
    /// monochromatic.
    ///
    /// # Errors
    /// Returns [`ColoringDefect::MissingNode`] for the first uncoloured node
    /// and [`ColoringDefect::Conflict`] for the first monochromatic edge.
    pub fn verify(&self, graph: &Graph) -> Result<(), ColoringDefect> {
        if let Some(node) = graph.nodes().find(|node| self.color_of(*node).is_none()) {
            return Err(ColoringDefect::MissingNode { node });
        }
        for (left, right) in graph.edges() {
            let shared = self
                .color_of(left)
                .filter(|color| Some(*color) == self.color_of(right));
            if let Some(color) = shared {
                return Err(ColoringDefect::Conflict { left, right, color });
            }
        }
        Ok(())
    }

    fn assign(&mut self, node: NodeId, color: Color) {
        if self.colors.len() <= node {
            self.colors.resize(node + 1, None);
        }
        if let Some(slot) = self.colors.get_mut(node) {
            *slot = Some(color);
        }
    }
}

/// Colours `graph` greedily in largest-degree-first order.
///
/// # Examples
/// ```
/// use brooks_core::{Graph, greedy_largest_first};
///
/// let triangle = Graph::from_edges(3, [(0, 1), (1, 2), (2, 0)]);
/// assert_eq!(greedy_largest_first(&triangle).colors_used(), 3);
/// ```
#[must_use]
pub fn greedy_largest_first(graph: &Graph) -> Coloring {
    let mut order: Vec<NodeId> = graph.nodes().collect();
    order.sort_by_key(|node| std::cmp::Reverse(graph.degree(*node)));

    let mut coloring = Coloring {
        colors: vec![None; graph.node_count()],
    };
    for node in order {
        let taken: BTreeSet<Color> = graph
            .neighbors(node)
            .filter_map(|neighbor| coloring.color_of(neighbor))
            .collect();
        let color = (0..).find(|candidate| !taken.contains(candidate)).unwrap_or(0);
        coloring.assign(node, color);
    }
    coloring
}
