//! Snapshot renderer for brooks batches.
//!
//! [`PlotRenderer`] implements [`brooks_core::SnapshotRenderer`] on top of
//! `plotters`, drawing each selected realization with its colouring as a PNG
//! or SVG image beneath a configurable output directory.

mod config;
mod error;
mod layout;
mod palette;
mod renderer;

pub use crate::{
    config::{ImageFormat, RenderConfig},
    error::{RenderError, RenderErrorCode},
    layout::{Layout, Point},
    palette::{PALETTE, UNCOLOURED, fill_for},
    renderer::PlotRenderer,
};
