//! Benchmark setup error type.
//!
//! Lets setup functions propagate failures with `?` instead of `.expect()`.

use brooks_core::BrooksError;

/// Errors that may occur during benchmark setup.
#[derive(Debug, thiserror::Error)]
pub enum BenchSetupError {
    /// Graph generation or batch configuration failed.
    #[error("brooks operation failed: {0}")]
    Core(#[from] BrooksError),
}
