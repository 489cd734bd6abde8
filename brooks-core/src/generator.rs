//! Seeded random graph generators.
//!
//! Two models are supported: the Watts–Strogatz small-world model (a ring
//! lattice whose edges are rewired at random) and the Barabási–Albert
//! scale-free model (preferential attachment grown from a star). Both take
//! an explicit random source so batches are reproducible from a seed.

use std::{fmt, str::FromStr};

use rand::Rng;

use crate::{
    Result,
    error::BrooksError,
    graph::{Graph, NodeId},
    named::complete_graph,
};

const SMALL_WORLD_SLUG: &str = "watts";
const SCALE_FREE_SLUG: &str = "barabasi";

/// Random graph models understood by [`generate`].
///
/// # Examples
/// ```
/// use brooks_core::GraphModel;
///
/// let model: GraphModel = "Barabasi".parse().expect("model is supported");
/// assert_eq!(model, GraphModel::ScaleFree);
/// assert_eq!(model.slug(), "barabasi");
/// assert!("erdos".parse::<GraphModel>().is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub enum GraphModel {
    /// Watts–Strogatz ring lattice with random rewiring.
    #[cfg_attr(feature = "serde", serde(rename = "watts"))]
    SmallWorld,
    /// Barabási–Albert preferential attachment.
    #[cfg_attr(feature = "serde", serde(rename = "barabasi"))]
    ScaleFree,
}

impl GraphModel {
    /// Every built-in model, in the order the reference batches run them.
    pub const ALL: [Self; 2] = [Self::SmallWorld, Self::ScaleFree];

    /// Short lowercase name used in file paths and on the command line.
    #[must_use]
    pub const fn slug(self) -> &'static str {
        match self {
            Self::SmallWorld => SMALL_WORLD_SLUG,
            Self::ScaleFree => SCALE_FREE_SLUG,
        }
    }

    /// Capitalised name used in snapshot titles and reports.
    #[must_use]
    pub const fn title(self) -> &'static str {
        match self {
            Self::SmallWorld => "Watts",
            Self::ScaleFree => "Barabasi",
        }
    }
}

impl fmt::Display for GraphModel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.slug())
    }
}

impl FromStr for GraphModel {
    type Err = BrooksError;

    fn from_str(raw: &str) -> Result<Self> {
        match raw.trim().to_ascii_lowercase().as_str() {
            SMALL_WORLD_SLUG | "small-world" | "watts-strogatz" => Ok(Self::SmallWorld),
            SCALE_FREE_SLUG | "scale-free" | "barabasi-albert" => Ok(Self::ScaleFree),
            _ => Err(BrooksError::InvalidModel {
                provided: raw.to_owned(),
            }),
        }
    }
}

/// Tunable parameters for the built-in models.
///
/// # Examples
/// ```
/// use brooks_core::ModelParams;
///
/// let params = ModelParams::default().with_neighbours(6);
/// assert_eq!(params.neighbours(), 6);
/// assert_eq!(params.attachments(), 2);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct ModelParams {
    neighbours: usize,
    rewire_probability: f64,
    attachments: usize,
}

impl Default for ModelParams {
    fn default() -> Self {
        Self {
            neighbours: 4,
            rewire_probability: 0.3,
            attachments: 2,
        }
    }
}

impl ModelParams {
    /// Sets the lattice degree `k` of the small-world model.
    #[must_use]
    pub const fn with_neighbours(mut self, neighbours: usize) -> Self {
        self.neighbours = neighbours;
        self
    }

    /// Sets the rewiring probability `p` of the small-world model.
    #[must_use]
    pub const fn with_rewire_probability(mut self, probability: f64) -> Self {
        self.rewire_probability = probability;
        self
    }

    /// Sets the number of edges `m` each new node attaches with in the
    /// scale-free model.
    #[must_use]
    pub const fn with_attachments(mut self, attachments: usize) -> Self {
        self.attachments = attachments;
        self
    }

    /// Lattice degree `k` of the small-world model.
    #[must_use]
    pub const fn neighbours(&self) -> usize {
        self.neighbours
    }

    /// Rewiring probability `p` of the small-world model.
    #[must_use]
    pub const fn rewire_probability(&self) -> f64 {
        self.rewire_probability
    }

    /// Attachment count `m` of the scale-free model.
    #[must_use]
    pub const fn attachments(&self) -> usize {
        self.attachments
    }

    /// Checks that the parameters used by `model` fit a graph of
    /// `node_count` nodes.
    ///
    /// # Errors
    /// Returns [`BrooksError::InvalidModelParameter`] when the lattice degree
    /// exceeds the node count, the rewiring probability lies outside
    /// `[0, 1]`, or the attachment count is not in `1..node_count`.
    pub fn validate(&self, model: GraphModel, node_count: usize) -> Result<()> {
        match model {
            GraphModel::SmallWorld => {
                if self.neighbours > node_count {
                    return Err(invalid_parameter(
                        model,
                        "neighbours",
                        format!(
                            "lattice degree {} exceeds node count {node_count}",
                            self.neighbours
                        ),
                    ));
                }
                if !(0.0..=1.0).contains(&self.rewire_probability) {
                    return Err(invalid_parameter(
                        model,
                        "rewire_probability",
                        format!("{} is not within [0, 1]", self.rewire_probability),
                    ));
                }
            }
            GraphModel::ScaleFree => {
                if self.attachments == 0 || self.attachments >= node_count {
                    return Err(invalid_parameter(
                        model,
                        "attachments",
                        format!(
                            "{} must satisfy 1 <= m < {node_count}",
                            self.attachments
                        ),
                    ));
                }
            }
        }
        Ok(())
    }
}

fn invalid_parameter(model: GraphModel, parameter: &'static str, reason: String) -> BrooksError {
    BrooksError::InvalidModelParameter {
        model: model.slug(),
        parameter,
        reason,
    }
}

/// Generates a random graph of `node_count` nodes from `model`.
///
/// # Errors
/// Returns [`BrooksError::InvalidModelParameter`] when `params` do not fit
/// the requested node count.
///
/// # Examples
/// ```
/// use brooks_core::{GraphModel, ModelParams, generate};
/// use rand::{SeedableRng, rngs::SmallRng};
///
/// let mut rng = SmallRng::seed_from_u64(7);
/// let graph = generate(GraphModel::SmallWorld, 20, &ModelParams::default(), &mut rng)
///     .expect("parameters fit 20 nodes");
/// assert_eq!(graph.node_count(), 20);
/// assert_eq!(graph.edge_count(), 40);
/// ```
pub fn generate<R: Rng + ?Sized>(
    model: GraphModel,
    node_count: usize,
    params: &ModelParams,
    rng: &mut R,
) -> Result<Graph> {
    params.validate(model, node_count)?;
    let graph = match model {
        GraphModel::SmallWorld => watts_strogatz(
            node_count,
            params.neighbours,
            params.rewire_probability,
            rng,
        ),
        GraphModel::ScaleFree => barabasi_albert(node_count, params.attachments, rng),
    };
    Ok(graph)
}

fn watts_strogatz<R: Rng + ?Sized>(
    node_count: usize,
    neighbours: usize,
    probability: f64,
    rng: &mut R,
) -> Graph {
    if neighbours == node_count {
        return complete_graph(node_count);
    }
    let reach = neighbours / 2;
    let mut graph = Graph::with_nodes(node_count);
    for offset in 1..=reach {
        for node in 0..node_count {
            graph.add_edge(node, (node + offset) % node_count);
        }
    }

    for offset in 1..=reach {
        for node in 0..node_count {
            if !rng.gen_bool(probability) {
                continue;
            }
            let lattice_neighbour = (node + offset) % node_count;
            if graph.degree(node) + 1 >= node_count || !graph.contains_edge(node, lattice_neighbour)
            {
                continue;
            }
            let candidates: Vec<NodeId> = (0..node_count)
                .filter(|candidate| *candidate != node && !graph.contains_edge(node, *candidate))
                .collect();
            let Some(&target) = candidates.get(rng.gen_range(0..candidates.len())) else {
                continue;
            };
            graph.remove_edge(node, lattice_neighbour);
            graph.add_edge(node, target);
        }
    }
    graph
}

fn barabasi_albert<R: Rng + ?Sized>(node_count: usize, attachments: usize, rng: &mut R) -> Graph {
    let mut graph = Graph::from_edges(node_count, (1..=attachments).map(|leaf| (0, leaf)));
    let mut repeated: Vec<NodeId> = graph
        .nodes()
        .take(attachments + 1)
        .flat_map(|node| std::iter::repeat_n(node, graph.degree(node)))
        .collect();

    for source in (attachments + 1)..node_count {
        let mut targets: Vec<NodeId> = Vec::with_capacity(attachments);
        while targets.len() < attachments {
            if let Some(&pick) = repeated.get(rng.gen_range(0..repeated.len()))
                && !targets.contains(&pick)
            {
                targets.push(pick);
            }
        }
        for &target in &targets {
            graph.add_edge(source, target);
        }
        repeated.extend_from_slice(&targets);
        repeated.extend(std::iter::repeat_n(source, attachments));
    }
    graph
}
