//! Renderer configuration.

use std::path::{Path, PathBuf};

use crate::{error::RenderError, layout::Layout, renderer::PlotRenderer};

const DEFAULT_OUTPUT_DIR: &str = "output_graphs";
const DEFAULT_WIDTH: u32 = 800;
const DEFAULT_HEIGHT: u32 = 600;

/// Image encoding of written snapshots.
#[derive(Clone, Copy, Debug, Default, Eq, Hash, PartialEq)]
#[non_exhaustive]
pub enum ImageFormat {
    /// Raster PNG through the bitmap backend; nodes and edges only.
    Png,
    /// Vector SVG with node labels and title.
    #[default]
    Svg,
}

impl ImageFormat {
    /// File extension without the leading dot.
    #[must_use]
    pub const fn extension(self) -> &'static str {
        match self {
            Self::Png => "png",
            Self::Svg => "svg",
        }
    }

    /// Whether the backend can draw node labels and titles.
    ///
    /// The bitmap backend is built without a font engine, so PNG snapshots
    /// carry nodes and edges only.
    #[must_use]
    pub const fn draws_text(self) -> bool {
        matches!(self, Self::Svg)
    }
}

/// Configures a [`PlotRenderer`].
///
/// # Examples
/// ```
/// use brooks_render::{ImageFormat, Layout, RenderConfig};
///
/// let renderer = RenderConfig::new("snapshots")
///     .with_format(ImageFormat::Png)
///     .with_layout(Layout::Circular)
///     .build()
///     .expect("configuration is valid");
/// assert_eq!(renderer.config().format(), ImageFormat::Png);
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RenderConfig {
    output_dir: PathBuf,
    format: ImageFormat,
    width: u32,
    height: u32,
    layout: Layout,
    layout_seed: u64,
    display: bool,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self::new(DEFAULT_OUTPUT_DIR)
    }
}

impl RenderConfig {
    /// Creates a configuration writing beneath `output_dir` with default
    /// settings: 800x600 SVG, spring layout, layout seed 0, no display.
    #[must_use]
    pub fn new(output_dir: impl Into<PathBuf>) -> Self {
        Self {
            output_dir: output_dir.into(),
            format: ImageFormat::default(),
            width: DEFAULT_WIDTH,
            height: DEFAULT_HEIGHT,
            layout: Layout::default(),
            layout_seed: 0,
            display: false,
        }
    }

    /// Sets the image encoding.
    #[must_use]
    pub fn with_format(mut self, format: ImageFormat) -> Self {
        self.format = format;
        self
    }

    /// Sets the image size in pixels.
    #[must_use]
    pub fn with_size(mut self, width: u32, height: u32) -> Self {
        self.width = width;
        self.height = height;
        self
    }

    /// Sets the node placement strategy.
    #[must_use]
    pub fn with_layout(mut self, layout: Layout) -> Self {
        self.layout = layout;
        self
    }

    /// Sets the seed of the spring layout.
    #[must_use]
    pub fn with_layout_seed(mut self, seed: u64) -> Self {
        self.layout_seed = seed;
        self
    }

    /// Requests that snapshots also be shown interactively.
    #[must_use]
    pub fn with_display(mut self, display: bool) -> Self {
        self.display = display;
        self
    }

    /// Root directory of written snapshots.
    #[must_use]
    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }

    /// Image encoding.
    #[must_use]
    pub fn format(&self) -> ImageFormat {
        self.format
    }

    /// Image size in pixels as `(width, height)`.
    #[must_use]
    pub fn size(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    /// Node placement strategy.
    #[must_use]
    pub fn layout(&self) -> Layout {
        self.layout
    }

    /// Seed of the spring layout.
    #[must_use]
    pub fn layout_seed(&self) -> u64 {
        self.layout_seed
    }

    /// Whether interactive display was requested.
    #[must_use]
    pub fn display(&self) -> bool {
        self.display
    }

    /// Validates the configuration and returns a renderer.
    ///
    /// # Errors
    /// Returns [`RenderError::InvalidDimensions`] when width or height is zero.
    pub fn build(self) -> Result<PlotRenderer, RenderError> {
        if self.width == 0 || self.height == 0 {
            return Err(RenderError::InvalidDimensions {
                width: self.width,
                height: self.height,
            });
        }
        Ok(PlotRenderer::new(self))
    }
}
