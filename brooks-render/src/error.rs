//! Errors raised while configuring or drawing snapshots.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Errors returned by [`crate::RenderConfig::build`] and
/// [`crate::PlotRenderer`].
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum RenderError {
    /// Width or height of the image was zero.
    #[error("image dimensions must be non-zero, got {width}x{height}")]
    InvalidDimensions {
        /// Requested width in pixels.
        width: u32,
        /// Requested height in pixels.
        height: u32,
    },
    /// The output directory could not be created.
    #[error("failed to create `{path}`: {source}")]
    Io {
        /// Directory that could not be created.
        path: PathBuf,
        /// Underlying operating system error.
        #[source]
        source: io::Error,
    },
    /// The drawing backend failed while drawing or encoding the image.
    #[error("failed to draw `{path}`: {message}")]
    Drawing {
        /// Image file being written.
        path: PathBuf,
        /// Backend error message.
        message: String,
    },
}

impl RenderError {
    /// Returns a stable, machine-readable error code for the variant.
    #[must_use]
    pub const fn code(&self) -> RenderErrorCode {
        match self {
            Self::InvalidDimensions { .. } => RenderErrorCode::InvalidDimensions,
            Self::Io { .. } => RenderErrorCode::Io,
            Self::Drawing { .. } => RenderErrorCode::Drawing,
        }
    }
}

/// Machine-readable error codes for [`RenderError`].
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
#[non_exhaustive]
pub enum RenderErrorCode {
    /// Width or height of the image was zero.
    InvalidDimensions,
    /// The output directory could not be created.
    Io,
    /// The drawing backend failed.
    Drawing,
}

impl RenderErrorCode {
    /// Returns the symbolic identifier for logging surfaces.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::InvalidDimensions => "RENDER_INVALID_DIMENSIONS",
            Self::Io => "RENDER_IO",
            Self::Drawing => "RENDER_DRAWING",
        }
    }
}
