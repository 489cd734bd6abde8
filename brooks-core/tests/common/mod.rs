use std::path::PathBuf;

use brooks_core::{GraphModel, Snapshot, SnapshotRenderer, snapshot_path};
use thiserror::Error;

/// Renderer that remembers every snapshot it was asked to draw.
#[derive(Default)]
pub struct RecordingRenderer {
    pub requests: Vec<(GraphModel, usize, String, usize)>,
}

impl SnapshotRenderer for RecordingRenderer {
    type Error = std::convert::Infallible;

    fn render(&mut self, snapshot: &Snapshot<'_>) -> Result<PathBuf, Self::Error> {
        assert!(snapshot.coloring.verify(snapshot.graph).is_ok());
        self.requests.push((
            snapshot.model,
            snapshot.index,
            snapshot.title.to_owned(),
            snapshot.graph.node_count(),
        ));
        Ok(snapshot_path(
            std::path::Path::new("memory"),
            snapshot.model,
            snapshot.index,
            "png",
        ))
    }
}

#[derive(Debug, Error)]
#[error("display unavailable")]
pub struct DisplayUnavailable;

/// Renderer that fails every request.
#[derive(Default)]
pub struct FailingRenderer {
    pub attempts: usize,
}

impl SnapshotRenderer for FailingRenderer {
    type Error = DisplayUnavailable;

    fn render(&mut self, _snapshot: &Snapshot<'_>) -> Result<PathBuf, Self::Error> {
        self.attempts += 1;
        Err(DisplayUnavailable)
    }
}
