//! Brooks' theorem exception classification and bound checking.
//!
//! Brooks' theorem bounds the chromatic number of a connected graph by its
//! maximum degree unless the graph is complete or an odd cycle. The
//! classifier detects those two exception classes and the checker turns a
//! colour count into a verdict.
//!
//! The colour counts fed to [`check`] come from the greedy largest-first
//! heuristic, not from an exact chromatic number. A [`Verdict::Violated`]
//! therefore means the heuristic exceeded the bound (a heuristic anomaly); it
//! is never evidence against the theorem itself.

use crate::{coloring::Coloring, graph::Graph};

/// Structural classes for which the Brooks bound does not hold.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum ExceptionClass {
    /// The graph is neither complete nor an odd cycle.
    None,
    /// Every pair of distinct nodes is adjacent.
    Complete,
    /// A connected graph with an odd node count where every node has degree 2.
    OddCycle,
}

/// Outcome of comparing a colour count against the Brooks bound.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum Verdict {
    /// The colouring uses at most `Δ` colours.
    Satisfied,
    /// The colouring uses more than `Δ` colours on a graph the bound covers.
    ///
    /// Because colour counts come from a heuristic, this flags a heuristic
    /// anomaly rather than a counterexample.
    Violated,
    /// The graph is disconnected or exceptional, so the bound does not apply.
    NotApplicable,
}

/// Classifies `graph` into a Brooks exception class.
///
/// A graph is [`ExceptionClass::Complete`] when it has `n(n − 1)/2` edges.
/// Graphs with zero or one node satisfy that formula and are reported as
/// complete. Otherwise a connected graph with an odd node count whose nodes
/// all have degree 2 is an [`ExceptionClass::OddCycle`].
///
/// # Examples
/// ```
/// use brooks_core::{ExceptionClass, Graph, classify};
///
/// let pentagon = Graph::from_edges(5, [(0, 1), (1, 2), (2, 3), (3, 4), (4, 0)]);
/// assert_eq!(classify(&pentagon), ExceptionClass::OddCycle);
///
/// let triangle = Graph::from_edges(3, [(0, 1), (1, 2), (2, 0)]);
/// assert_eq!(classify(&triangle), ExceptionClass::Complete);
/// ```
#[must_use]
pub fn classify(graph: &Graph) -> ExceptionClass {
    if is_complete(graph) {
        ExceptionClass::Complete
    } else if is_odd_cycle(graph) {
        ExceptionClass::OddCycle
    } else {
        ExceptionClass::None
    }
}

fn is_complete(graph: &Graph) -> bool {
    let n = graph.node_count();
    graph.edge_count() == n * n.saturating_sub(1) / 2
}

fn is_odd_cycle(graph: &Graph) -> bool {
    graph.node_count() % 2 == 1
        && graph.nodes().all(|node| graph.degree(node) == 2)
        && graph.is_connected()
}

/// Decides whether a colour count respects the Brooks bound.
///
/// Disconnected graphs and exceptional graphs yield
/// [`Verdict::NotApplicable`]. Otherwise the verdict is
/// [`Verdict::Satisfied`] when `colors_used <= max_degree` and
/// [`Verdict::Violated`] when it is larger.
///
/// # Examples
/// ```
/// use brooks_core::{ExceptionClass, Verdict, check};
///
/// assert_eq!(check(4, 2, true, ExceptionClass::None), Verdict::Satisfied);
/// assert_eq!(check(2, 3, true, ExceptionClass::None), Verdict::Violated);
/// assert_eq!(check(2, 3, false, ExceptionClass::None), Verdict::NotApplicable);
/// assert_eq!(check(4, 5, true, ExceptionClass::Complete), Verdict::NotApplicable);
/// ```
#[must_use]
pub const fn check(
    max_degree: usize,
    colors_used: usize,
    is_connected: bool,
    exception: ExceptionClass,
) -> Verdict {
    if !is_connected || !matches!(exception, ExceptionClass::None) {
        Verdict::NotApplicable
    } else if colors_used <= max_degree {
        Verdict::Satisfied
    } else {
        Verdict::Violated
    }
}

/// Inputs and outcome of a single Brooks check.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct TheoremCheck {
    /// Maximum node degree `Δ`.
    pub max_degree: usize,
    /// Distinct colours used by the colouring.
    pub colors_used: usize,
    /// Whether the graph is connected.
    pub connected: bool,
    /// Exception class reported by [`classify`].
    pub exception: ExceptionClass,
    /// Verdict reported by [`check`].
    pub verdict: Verdict,
}

/// Classifies `graph` and checks `coloring` against the Brooks bound.
///
/// # Examples
/// ```
/// use brooks_core::{ExceptionClass, Graph, Verdict, evaluate, greedy_largest_first};
///
/// let star = Graph::from_edges(5, [(0, 1), (0, 2), (0, 3), (0, 4)]);
/// let result = evaluate(&star, &greedy_largest_first(&star));
/// assert_eq!(result.exception, ExceptionClass::None);
/// assert_eq!(result.colors_used, 2);
/// assert_eq!(result.verdict, Verdict::Satisfied);
/// ```
#[must_use]
pub fn evaluate(graph: &Graph, coloring: &Coloring) -> TheoremCheck {
    let max_degree = graph.max_degree();
    let colors_used = coloring.colors_used();
    let connected = graph.is_connected();
    let exception = classify(graph);
    TheoremCheck {
        max_degree,
        colors_used,
        connected,
        exception,
        verdict: check(max_degree, colors_used, connected, exception),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use proptest::prelude::*;
    use rstest::rstest;

    fn complete(n: usize) -> Graph {
        Graph::from_edges(
            n,
            (0..n).flat_map(|left| ((left + 1)..n).map(move |right| (left, right))),
        )
    }

    fn cycle(n: usize) -> Graph {
        Graph::from_edges(n, (0..n).map(|node| (node, (node + 1) % n)))
    }

    #[rstest]
    #[case::no_nodes(Graph::with_nodes(0), ExceptionClass::Complete)]
    #[case::single_node(Graph::with_nodes(1), ExceptionClass::Complete)]
    #[case::edge(complete(2), ExceptionClass::Complete)]
    #[case::triangle(cycle(3), ExceptionClass::Complete)]
    #[case::k5(complete(5), ExceptionClass::Complete)]
    #[case::c5(cycle(5), ExceptionClass::OddCycle)]
    #[case::c7(cycle(7), ExceptionClass::OddCycle)]
    #[case::c6(cycle(6), ExceptionClass::None)]
    #[case::path(Graph::from_edges(3, [(0, 1), (1, 2)]), ExceptionClass::None)]
    #[case::isolated_pair(Graph::with_nodes(2), ExceptionClass::None)]
    fn classify_reports_exception_class(#[case] graph: Graph, #[case] expected: ExceptionClass) {
        assert_eq!(classify(&graph), expected);
    }

    #[rstest]
    fn two_disjoint_triangles_are_not_an_odd_cycle() {
        // Nine nodes, all degree 2, odd count, but three components.
        let graph = Graph::from_edges(
            9,
            [
                (0, 1),
                (1, 2),
                (2, 0),
                (3, 4),
                (4, 5),
                (5, 3),
                (6, 7),
                (7, 8),
                (8, 6),
            ],
        );
        assert_eq!(classify(&graph), ExceptionClass::None);
    }

    #[rstest]
    #[case(0, 0, ExceptionClass::None)]
    #[case(4, 9, ExceptionClass::None)]
    #[case(2, 3, ExceptionClass::OddCycle)]
    #[case(4, 5, ExceptionClass::Complete)]
    fn disconnected_graphs_are_not_applicable(
        #[case] max_degree: usize,
        #[case] colors_used: usize,
        #[case] exception: ExceptionClass,
    ) {
        assert_eq!(
            check(max_degree, colors_used, false, exception),
            Verdict::NotApplicable
        );
    }

    #[rstest]
    #[case::at_bound(3, 3, Verdict::Satisfied)]
    #[case::below_bound(4, 2, Verdict::Satisfied)]
    #[case::above_bound(3, 4, Verdict::Violated)]
    fn connected_regular_graphs_compare_against_bound(
        #[case] max_degree: usize,
        #[case] colors_used: usize,
        #[case] expected: Verdict,
    ) {
        assert_eq!(
            check(max_degree, colors_used, true, ExceptionClass::None),
            expected
        );
    }

    #[rstest]
    #[case::k5(complete(5), ExceptionClass::Complete)]
    #[case::c5(cycle(5), ExceptionClass::OddCycle)]
    fn exceptional_graphs_are_not_applicable(
        #[case] graph: Graph,
        #[case] exception: ExceptionClass,
    ) {
        let result = evaluate(&graph, &crate::greedy_largest_first(&graph));
        assert_eq!(result.exception, exception);
        assert!(result.connected);
        assert_eq!(result.verdict, Verdict::NotApplicable);
    }

    #[rstest]
    fn star_is_satisfied_with_two_colours() {
        let star = Graph::from_edges(5, [(0, 1), (0, 2), (0, 3), (0, 4)]);
        let coloring = Coloring::from_colors(vec![0, 1, 1, 1, 1]);
        let result = evaluate(&star, &coloring);
        assert_eq!(result.max_degree, 4);
        assert_eq!(result.colors_used, 2);
        assert_eq!(result.exception, ExceptionClass::None);
        assert_eq!(result.verdict, Verdict::Satisfied);
    }

    proptest! {
        #[test]
        fn disconnected_is_never_applicable(
            max_degree in 0_usize..64,
            colors_used in 0_usize..64,
            exception in prop_oneof![
                Just(ExceptionClass::None),
                Just(ExceptionClass::Complete),
                Just(ExceptionClass::OddCycle),
            ],
        ) {
            prop_assert_eq!(
                check(max_degree, colors_used, false, exception),
                Verdict::NotApplicable
            );
        }

        #[test]
        fn complete_iff_all_pairs_adjacent(
            nodes in 0_usize..9,
            removals in proptest::collection::vec((0_usize..9, 0_usize..9), 0..4),
        ) {
            let mut graph = complete(nodes);
            for (left, right) in removals {
                graph.remove_edge(left, right);
            }
            let all_adjacent = graph.nodes().all(|left| {
                graph
                    .nodes()
                    .all(|right| left == right || graph.contains_edge(left, right))
            });
            prop_assert_eq!(classify(&graph) == ExceptionClass::Complete, all_adjacent);
        }

        #[test]
        fn odd_connected_graph_is_odd_cycle_iff_two_regular(
            half in 1_usize..5,
            removals in proptest::collection::vec((0_usize..9, 0_usize..9), 0..2),
            additions in proptest::collection::vec((0_usize..9, 0_usize..9), 0..3),
        ) {
            let nodes = 2 * half + 1;
            let mut graph = cycle(nodes);
            for (left, right) in removals {
                graph.remove_edge(left % nodes, right % nodes);
            }
            for (left, right) in additions {
                graph.add_edge(left % nodes, right % nodes);
            }
            prop_assume!(graph.is_connected());
            prop_assume!(classify(&graph) != ExceptionClass::Complete);

            let two_regular = graph.nodes().all(|node| graph.degree(node) == 2);
            prop_assert_eq!(classify(&graph) == ExceptionClass::OddCycle, two_regular);
        }

        #[test]
        fn proper_colouring_within_bound_is_satisfied(
            nodes in 3_usize..12,
            parents in proptest::collection::vec(any::<usize>(), 11),
            extras in proptest::collection::vec((0_usize..12, 0_usize..12), 0..10),
        ) {
            // Spanning tree first so every generated graph is connected.
            let mut graph = Graph::with_nodes(nodes);
            for (child, seed) in (1..nodes).zip(parents) {
                graph.add_edge(child, seed % child);
            }
            for (left, right) in extras {
                graph.add_edge(left % nodes, right % nodes);
            }
            let coloring = crate::greedy_largest_first(&graph);
            prop_assert!(coloring.verify(&graph).is_ok());
            prop_assume!(classify(&graph) == ExceptionClass::None);
            prop_assume!(coloring.colors_used() <= graph.max_degree());

            let result = evaluate(&graph, &coloring);
            prop_assert!(result.connected);
            prop_assert_eq!(result.verdict, Verdict::Satisfied);
        }
    }
}
