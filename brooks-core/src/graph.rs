//! Undirected simple graph over dense node identifiers.
//!
//! Nodes are always `0..n`; edges are unordered pairs without self-loops or
//! duplicates. Degrees are derived from the adjacency structure on demand so
//! the degree sequence can never drift from the edge set.

use petgraph::{graphmap::UnGraphMap, visit::Bfs};

/// Identifier of a node within a [`Graph`].
pub type NodeId = usize;

/// Undirected simple graph backed by [`petgraph`]'s `UnGraphMap`.
///
/// # Examples
/// ```
/// use brooks_core::Graph;
///
/// let graph = Graph::from_edges(3, [(0, 1), (1, 2)]);
/// assert_eq!(graph.node_count(), 3);
/// assert_eq!(graph.edge_count(), 2);
/// assert_eq!(graph.max_degree(), 2);
/// assert!(graph.is_connected());
/// ```
#[derive(Clone, Debug, Default)]
pub struct Graph {
    inner: UnGraphMap<NodeId, ()>,
}

impl Graph {
    /// Creates a graph with `node_count` isolated nodes.
    #[must_use]
    pub fn with_nodes(node_count: usize) -> Self {
        let mut inner = UnGraphMap::with_capacity(node_count, 0);
        for id in 0..node_count {
            inner.add_node(id);
        }
        Self { inner }
    }

    /// Creates a graph with `node_count` nodes and the supplied edges.
    ///
    /// Self-loops, repeated edges and endpoints outside `0..node_count` are
    /// ignored.
    ///
    /// # Examples
    /// ```
    /// use brooks_core::Graph;
    ///
    /// let graph = Graph::from_edges(2, [(0, 1), (1, 0), (1, 1), (0, 7)]);
    /// assert_eq!(graph.edge_count(), 1);
    /// ```
    #[must_use]
    pub fn from_edges(node_count: usize, edges: impl IntoIterator<Item = (NodeId, NodeId)>) -> Self {
        let mut graph = Self::with_nodes(node_count);
        for (left, right) in edges {
            graph.add_edge(left, right);
        }
        graph
    }

    /// Adds the undirected edge `(left, right)`.
    ///
    /// Returns `false` without modifying the graph when the edge would be a
    /// self-loop, already exists, or references a node outside the graph.
    pub fn add_edge(&mut self, left: NodeId, right: NodeId) -> bool {
        if left == right
            || !self.contains_node(left)
            || !self.contains_node(right)
            || self.inner.contains_edge(left, right)
        {
            return false;
        }
        self.inner.add_edge(left, right, ());
        true
    }

    /// Removes the undirected edge `(left, right)`, returning whether it existed.
    pub fn remove_edge(&mut self, left: NodeId, right: NodeId) -> bool {
        self.inner.remove_edge(left, right).is_some()
    }

    /// Number of nodes.
    #[must_use]
    pub fn node_count(&self) -> usize {
        self.inner.node_count()
    }

    /// Number of undirected edges.
    #[must_use]
    pub fn edge_count(&self) -> usize {
        self.inner.edge_count()
    }

    /// Returns whether `node` belongs to the graph.
    #[must_use]
    pub fn contains_node(&self, node: NodeId) -> bool {
        self.inner.contains_node(node)
    }

    /// Returns whether `left` and `right` are adjacent.
    #[must_use]
    pub fn contains_edge(&self, left: NodeId, right: NodeId) -> bool {
        self.inner.contains_edge(left, right)
    }

    /// Number of distinct neighbours of `node` (zero for unknown nodes).
    #[must_use]
    pub fn degree(&self, node: NodeId) -> usize {
        self.inner.neighbors(node).count()
    }

    /// Degree of every node, indexed by node identifier.
    #[must_use]
    pub fn degree_sequence(&self) -> Vec<usize> {
        self.nodes().map(|node| self.degree(node)).collect()
    }

    /// Largest node degree, or zero for an empty graph.
    #[must_use]
    pub fn max_degree(&self) -> usize {
        self.nodes().map(|node| self.degree(node)).max().unwrap_or(0)
    }

    /// Iterates node identifiers in ascending order.
    pub fn nodes(&self) -> impl Iterator<Item = NodeId> + '_ {
        self.inner.nodes()
    }

    /// Iterates the neighbours of `node`.
    pub fn neighbors(&self, node: NodeId) -> impl Iterator<Item = NodeId> + '_ {
        self.inner.neighbors(node)
    }

    /// Iterates every undirected edge once.
    pub fn edges(&self) -> impl Iterator<Item = (NodeId, NodeId)> + '_ {
        self.inner.all_edges().map(|(left, right, _)| (left, right))
    }

    /// Returns whether every node is reachable from every other node.
    ///
    /// The empty graph is reported as disconnected; a single node is
    /// connected.
    #[must_use]
    pub fn is_connected(&self) -> bool {
        let Some(start) = self.nodes().next() else {
            return false;
        };
        let mut bfs = Bfs::new(&self.inner, start);
        let mut reached = 0_usize;
        while bfs.next(&self.inner).is_some() {
            reached += 1;
        }
        reached == self.node_count()
    }
}
