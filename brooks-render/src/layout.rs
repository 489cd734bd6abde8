//! Node placement in the unit square.
//!
//! Positions are indexed by [`NodeId`] and lie in `[0, 1] x [0, 1]`; the
//! renderer maps them onto the pixel area of the image.

use std::f64::consts::TAU;

use brooks_core::{Graph, NodeId};
use rand::{Rng, SeedableRng, rngs::SmallRng};

const SPRING_ITERATIONS: usize = 50;
const INITIAL_TEMPERATURE: f64 = 0.1;
const MIN_DISTANCE: f64 = 0.01;

/// A point in the unit square.
pub type Point = (f64, f64);

/// Strategy used to place nodes.
#[derive(Clone, Copy, Debug, Default, Eq, Hash, PartialEq)]
#[non_exhaustive]
pub enum Layout {
    /// Seeded Fruchterman–Reingold force-directed placement.
    #[default]
    Spring,
    /// Nodes evenly spaced on a circle in id order.
    Circular,
}

impl Layout {
    /// Computes one position per node of `graph`.
    ///
    /// The spring layout is deterministic for a given `seed`; the circular
    /// layout ignores it.
    ///
    /// # Examples
    /// ```
    /// use brooks_core::Graph;
    /// use brooks_render::Layout;
    ///
    /// let graph = Graph::from_edges(3, [(0, 1), (1, 2)]);
    /// let positions = Layout::Circular.positions(&graph, 0);
    /// assert_eq!(positions.len(), 3);
    /// ```
    #[must_use]
    pub fn positions(self, graph: &Graph, seed: u64) -> Vec<Point> {
        match self {
            Self::Spring => spring(graph, seed),
            Self::Circular => circular(graph.node_count()),
        }
    }
}

#[expect(
    clippy::cast_precision_loss,
    reason = "node counts are far below 2^52"
)]
fn circular(node_count: usize) -> Vec<Point> {
    if node_count == 1 {
        return vec![(0.5, 0.5)];
    }
    (0..node_count)
        .map(|node| {
            let angle = TAU * node as f64 / node_count as f64;
            (0.5 + 0.5 * angle.cos(), 0.5 + 0.5 * angle.sin())
        })
        .collect()
}

#[expect(
    clippy::cast_precision_loss,
    reason = "node counts are far below 2^52"
)]
fn spring(graph: &Graph, seed: u64) -> Vec<Point> {
    let node_count = graph.node_count();
    let mut rng = SmallRng::seed_from_u64(seed);
    let mut positions: Vec<Point> = (0..node_count)
        .map(|_| (rng.gen_range(0.0..1.0), rng.gen_range(0.0..1.0)))
        .collect();
    if node_count < 2 {
        return normalise(positions);
    }

    let edges: Vec<(NodeId, NodeId)> = graph.edges().collect();
    let optimal = (1.0 / node_count as f64).sqrt();
    let cooling = INITIAL_TEMPERATURE / (SPRING_ITERATIONS as f64 + 1.0);
    let mut temperature = INITIAL_TEMPERATURE;

    for _ in 0..SPRING_ITERATIONS {
        let mut displacement = vec![(0.0_f64, 0.0_f64); node_count];

        for left in 0..node_count {
            for right in (left + 1)..node_count {
                let (dx, dy, distance) = offset(&positions, left, right);
                let force = optimal * optimal / distance;
                push(&mut displacement, left, right, dx / distance * force, dy / distance * force);
            }
        }

        for &(left, right) in &edges {
            let (dx, dy, distance) = offset(&positions, left, right);
            let force = distance * distance / optimal;
            push(&mut displacement, left, right, -dx / distance * force, -dy / distance * force);
        }

        for (position, (dx, dy)) in positions.iter_mut().zip(displacement) {
            let length = dx.hypot(dy).max(MIN_DISTANCE);
            let step = length.min(temperature);
            position.0 += dx / length * step;
            position.1 += dy / length * step;
        }
        temperature -= cooling;
    }

    normalise(positions)
}

fn offset(positions: &[Point], left: NodeId, right: NodeId) -> (f64, f64, f64) {
    let (lx, ly) = positions.get(left).copied().unwrap_or_default();
    let (rx, ry) = positions.get(right).copied().unwrap_or_default();
    let (dx, dy) = (lx - rx, ly - ry);
    (dx, dy, dx.hypot(dy).max(MIN_DISTANCE))
}

// Applies `(fx, fy)` to `left` and the opposite force to `right`.
fn push(displacement: &mut [Point], left: NodeId, right: NodeId, fx: f64, fy: f64) {
    if let Some(entry) = displacement.get_mut(left) {
        entry.0 += fx;
        entry.1 += fy;
    }
    if let Some(entry) = displacement.get_mut(right) {
        entry.0 -= fx;
        entry.1 -= fy;
    }
}

fn normalise(mut positions: Vec<Point>) -> Vec<Point> {
    let Some(&(first_x, first_y)) = positions.first() else {
        return positions;
    };
    let (mut min_x, mut max_x, mut min_y, mut max_y) = (first_x, first_x, first_y, first_y);
    for &(x, y) in &positions {
        min_x = min_x.min(x);
        max_x = max_x.max(x);
        min_y = min_y.min(y);
        max_y = max_y.max(y);
    }
    let span_x = max_x - min_x;
    let span_y = max_y - min_y;
    for position in &mut positions {
        position.0 = if span_x > 0.0 { (position.0 - min_x) / span_x } else { 0.5 };
        position.1 = if span_y > 0.0 { (position.1 - min_y) / span_y } else { 0.5 };
    }
    positions
}
