//! Drawing snapshots with `plotters`.

use std::fs;
use std::path::PathBuf;

use brooks_core::{Coloring, Graph, Snapshot, SnapshotRenderer, snapshot_path};
use plotters::coord::Shift;
use plotters::prelude::*;
use plotters::style::text_anchor::{HPos, Pos, VPos};
use tracing::{instrument, warn};

use crate::{
    config::{ImageFormat, RenderConfig},
    error::RenderError,
    layout::Point,
    palette::fill_for,
};

const MARGIN: u32 = 30;
const TITLE_BAND: u32 = 40;
const NODE_RADIUS: i32 = 9;
const LABEL_SIZE: u32 = 10;
const TITLE_SIZE: u32 = 20;
const EDGE_COLOUR: RGBColor = RGBColor(120, 120, 120);

/// Writes snapshots to `<output_dir>/<model>/<model>_<index>.<ext>`.
///
/// Created through [`RenderConfig::build`].
#[derive(Clone, Debug)]
pub struct PlotRenderer {
    config: RenderConfig,
}

struct Scene<'a> {
    graph: &'a Graph,
    coloring: &'a Coloring,
    title: &'a str,
    positions: Vec<Point>,
    text: bool,
}

impl PlotRenderer {
    pub(crate) fn new(config: RenderConfig) -> Self {
        Self { config }
    }

    /// Configuration the renderer was built from.
    #[must_use]
    pub fn config(&self) -> &RenderConfig {
        &self.config
    }
}

impl SnapshotRenderer for PlotRenderer {
    type Error = RenderError;

    #[instrument(
        name = "render.snapshot",
        err(level = "warn"),
        skip(self, snapshot),
        fields(model = %snapshot.model, index = snapshot.index)
    )]
    fn render(&mut self, snapshot: &Snapshot<'_>) -> Result<PathBuf, RenderError> {
        let format = self.config.format();
        let path = snapshot_path(
            self.config.output_dir(),
            snapshot.model,
            snapshot.index,
            format.extension(),
        );
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(|source| RenderError::Io {
                path: parent.to_path_buf(),
                source,
            })?;
        }

        let scene = Scene {
            graph: snapshot.graph,
            coloring: snapshot.coloring,
            title: snapshot.title,
            positions: self
                .config
                .layout()
                .positions(snapshot.graph, self.config.layout_seed()),
            text: format.draws_text(),
        };
        let size = self.config.size();
        let drawn = match format {
            ImageFormat::Png => {
                draw_scene(&BitMapBackend::new(&path, size).into_drawing_area(), &scene)
                    .map_err(|err| err.to_string())
            }
            ImageFormat::Svg => {
                draw_scene(&SVGBackend::new(&path, size).into_drawing_area(), &scene)
                    .map_err(|err| err.to_string())
            }
        };
        drawn.map_err(|message| RenderError::Drawing {
            path: path.clone(),
            message,
        })?;

        if self.config.display() {
            warn!(
                path = %path.display(),
                "interactive display unavailable; snapshot written to file only"
            );
        }
        Ok(path)
    }
}

fn draw_scene<DB: DrawingBackend>(
    root: &DrawingArea<DB, Shift>,
    scene: &Scene<'_>,
) -> Result<(), DrawingAreaErrorKind<DB::ErrorType>> {
    root.fill(&WHITE)?;
    let (width, height) = root.dim_in_pixel();
    let project = |node: usize| -> (i32, i32) {
        let point = scene.positions.get(node).copied().unwrap_or((0.5, 0.5));
        to_pixels(point, width, height)
    };

    for (left, right) in scene.graph.edges() {
        root.draw(&PathElement::new(
            vec![project(left), project(right)],
            EDGE_COLOUR.stroke_width(1),
        ))?;
    }

    let label_style = TextStyle::from(("sans-serif", LABEL_SIZE).into_font())
        .color(&BLACK)
        .pos(Pos::new(HPos::Center, VPos::Center));
    for node in scene.graph.nodes() {
        let centre = project(node);
        let fill = fill_for(scene.coloring.color_of(node));
        root.draw(&Circle::new(centre, NODE_RADIUS, fill.filled()))?;
        root.draw(&Circle::new(centre, NODE_RADIUS, BLACK.stroke_width(1)))?;
        if scene.text {
            root.draw(&Text::new(node.to_string(), centre, label_style.clone()))?;
        }
    }

    if scene.text {
        let title_style = TextStyle::from(("sans-serif", TITLE_SIZE).into_font())
            .color(&BLACK)
            .pos(Pos::new(HPos::Center, VPos::Center));
        let centre_x = i32::try_from(width / 2).unwrap_or(i32::MAX);
        let centre_y = i32::try_from(TITLE_BAND / 2).unwrap_or(0);
        root.draw(&Text::new(
            scene.title.to_owned(),
            (centre_x, centre_y),
            title_style,
        ))?;
    }

    root.present()
}

/// Maps a unit-square point into the drawable area below the title band.
#[expect(
    clippy::cast_possible_truncation,
    reason = "pixel coordinates are bounded by the image size"
)]
fn to_pixels((x, y): Point, width: u32, height: u32) -> (i32, i32) {
    let usable_width = f64::from(width.saturating_sub(2 * MARGIN));
    let usable_height = f64::from(height.saturating_sub(2 * MARGIN + TITLE_BAND));
    let px = f64::from(MARGIN) + x * usable_width;
    let py = f64::from(MARGIN + TITLE_BAND) + y * usable_height;
    (px.round() as i32, py.round() as i32)
}
