//! Error types for the brooks core library.
//!
//! Defines the error enum exposed by the public API, its stable error codes,
//! and a convenient result alias.

use std::fmt;

use thiserror::Error;

use crate::graph::NodeId;

macro_rules! define_error_codes {
    (
        $(#[$enum_meta:meta])*
        enum $CodeTy:ident for $ErrTy:ident {
            $(
                $(#[$variant_meta:meta])*
                $CodeVariant:ident => $ErrVariant:ident $( { $($pattern:tt)* } )? => $code:expr
            ),+ $(,)?
        }
    ) => {
        $(#[$enum_meta])*
        #[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
        #[non_exhaustive]
        pub enum $CodeTy {
            $(
                $(#[$variant_meta])*
                $CodeVariant,
            )+
        }

        impl $CodeTy {
            /// Return the stable machine-readable representation of this error code.
            #[must_use]
            pub const fn as_str(self) -> &'static str {
                match self {
                    $(Self::$CodeVariant => $code,)+
                }
            }
        }

        impl fmt::Display for $CodeTy {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl $ErrTy {
            #[doc = concat!(
                "Retrieve the stable [`",
                stringify!($CodeTy),
                "`] for this error."
            )]
            #[must_use]
            pub const fn code(&self) -> $CodeTy {
                match self {
                    $(Self::$ErrVariant $( { $($pattern)* } )? => $CodeTy::$CodeVariant,)+
                }
            }
        }
    };
}

/// Reasons a [`crate::Coloring`] fails verification against its graph.
#[non_exhaustive]
#[derive(Clone, Copy, Debug, Eq, Error, PartialEq)]
pub enum ColoringDefect {
    /// The colouring has no entry for a node of the graph.
    #[error("node {node} has no colour")]
    MissingNode {
        /// Node without a colour.
        node: NodeId,
    },
    /// Both endpoints of an edge received the same colour.
    #[error("edge ({left}, {right}) joins two nodes coloured {color}")]
    Conflict {
        /// First endpoint of the offending edge.
        left: NodeId,
        /// Second endpoint of the offending edge.
        right: NodeId,
        /// Colour shared by both endpoints.
        color: usize,
    },
}

/// Error type produced when configuring or running a batch.
#[non_exhaustive]
#[derive(Clone, Debug, Eq, Error, PartialEq)]
pub enum BrooksError {
    /// The requested generator model is not one of the built-in models.
    #[error("unsupported graph model `{provided}`; expected `watts` or `barabasi`")]
    InvalidModel {
        /// Raw model name supplied by the caller.
        provided: String,
    },
    /// Batches require at least one node per graph.
    #[error("node count must be at least 1 (got {got})")]
    InvalidNodeCount {
        /// The invalid node count supplied by the caller.
        got: usize,
    },
    /// Batches require at least one realization.
    #[error("realization count must be at least 1 (got {got})")]
    InvalidRealizationCount {
        /// The invalid realization count supplied by the caller.
        got: usize,
    },
    /// Snapshot sampling stride must be positive.
    #[error("snapshot stride must be at least 1 (got {got})")]
    InvalidSampleStride {
        /// The invalid stride supplied by the caller.
        got: usize,
    },
    /// A generator parameter is out of range for the requested graph.
    #[error("invalid `{parameter}` for {model} model: {reason}")]
    InvalidModelParameter {
        /// Model slug the parameter belongs to.
        model: &'static str,
        /// Name of the offending parameter.
        parameter: &'static str,
        /// Human-readable explanation.
        reason: String,
    },
    /// The colouring oracle produced an improper colouring.
    #[error("realization {realization} produced an invalid colouring: {defect}")]
    InvalidColoring {
        /// Index of the realization whose colouring failed verification.
        realization: usize,
        /// What was wrong with the colouring.
        #[source]
        defect: ColoringDefect,
    },
}

define_error_codes! {
    /// Stable codes describing [`BrooksError`] variants.
    enum BrooksErrorCode for BrooksError {
        /// The requested generator model is not supported.
        InvalidModel => InvalidModel { .. } => "BROOKS_INVALID_MODEL",
        /// Node count was zero.
        InvalidNodeCount => InvalidNodeCount { .. } => "BROOKS_INVALID_NODE_COUNT",
        /// Realization count was zero.
        InvalidRealizationCount => InvalidRealizationCount { .. } => "BROOKS_INVALID_REALIZATION_COUNT",
        /// Snapshot stride was zero.
        InvalidSampleStride => InvalidSampleStride { .. } => "BROOKS_INVALID_SAMPLE_STRIDE",
        /// A generator parameter was out of range.
        InvalidModelParameter => InvalidModelParameter { .. } => "BROOKS_INVALID_MODEL_PARAMETER",
        /// The colouring oracle produced an improper colouring.
        InvalidColoring => InvalidColoring { .. } => "BROOKS_INVALID_COLORING",
    }
}

/// Convenient alias for results returned by the core API.
pub type Result<T> = core::result::Result<T, BrooksError>;
