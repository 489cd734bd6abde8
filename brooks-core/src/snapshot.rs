//! Snapshot requests handed to rendering collaborators.

use std::path::{Path, PathBuf};

use crate::{coloring::Coloring, generator::GraphModel, graph::Graph};

/// A single realization selected for rendering.
#[derive(Debug, Clone, Copy)]
pub struct Snapshot<'a> {
    /// Model that generated the graph.
    pub model: GraphModel,
    /// Zero-based realization index within the batch.
    pub index: usize,
    /// Generated graph.
    pub graph: &'a Graph,
    /// Greedy colouring of [`Self::graph`].
    pub coloring: &'a Coloring,
    /// Human-readable title, e.g. `Watts Realization #10`.
    pub title: &'a str,
}

/// Draws snapshots of selected realizations.
///
/// Rendering is best-effort: the batch runner logs and counts failures but
/// never aborts because of them.
pub trait SnapshotRenderer {
    /// Error produced when a snapshot cannot be written.
    type Error: std::error::Error + Send + Sync + 'static;

    /// Renders `snapshot` and returns the path of the written file.
    ///
    /// # Errors
    /// Returns [`Self::Error`] when drawing or writing the image fails.
    fn render(&mut self, snapshot: &Snapshot<'_>) -> Result<PathBuf, Self::Error>;

    /// Whether snapshots should be requested at all.
    fn enabled(&self) -> bool {
        true
    }
}

impl<R: SnapshotRenderer + ?Sized> SnapshotRenderer for &mut R {
    type Error = R::Error;

    fn render(&mut self, snapshot: &Snapshot<'_>) -> Result<PathBuf, Self::Error> {
        (**self).render(snapshot)
    }

    fn enabled(&self) -> bool {
        (**self).enabled()
    }
}

/// Renderer that draws nothing; used when snapshots are disabled.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoSnapshots;

impl SnapshotRenderer for NoSnapshots {
    type Error = std::convert::Infallible;

    fn render(&mut self, _snapshot: &Snapshot<'_>) -> Result<PathBuf, Self::Error> {
        Ok(PathBuf::new())
    }

    fn enabled(&self) -> bool {
        false
    }
}

/// Returns the title used for realization `index` of `model`.
///
/// # Examples
/// ```
/// use brooks_core::{GraphModel, snapshot_title};
///
/// assert_eq!(snapshot_title(GraphModel::SmallWorld, 10), "Watts Realization #10");
/// ```
#[must_use]
pub fn snapshot_title(model: GraphModel, index: usize) -> String {
    format!("{} Realization #{index}", model.title())
}

/// Returns `<output_dir>/<model>/<model>_<index>.<extension>`.
///
/// # Examples
/// ```
/// use std::path::Path;
/// use brooks_core::{GraphModel, snapshot_path};
///
/// let path = snapshot_path(Path::new("output_graphs"), GraphModel::ScaleFree, 20, "png");
/// assert_eq!(path, Path::new("output_graphs/barabasi/barabasi_20.png"));
/// ```
#[must_use]
pub fn snapshot_path(output_dir: &Path, model: GraphModel, index: usize, extension: &str) -> PathBuf {
    let slug = model.slug();
    output_dir
        .join(slug)
        .join(format!("{slug}_{index}"))
        .with_extension(extension)
}
