//! Error handling for terrakit
//!
//! Provides the error types used across the engine:
//! - Overlay errors (lifecycle manager misuse, degenerate geometry)
//! - A unified `Error` that can represent any error from all layers
//!
//! All error types use `thiserror` for ergonomic error handling.
//! Recoverable conditions (an unresolvable layer source, a missing render
//! layer on removal) are repaired in place by the synchronizer and never
//! surface as errors.

use thiserror::Error;

/// Overlay error type
///
/// Represents errors raised by the overlay lifecycle managers. These are
/// programmer errors (calling into an unbound manager) or degenerate
/// geometry; none of them occur on the normal reconciliation paths.
#[derive(Error, Debug, Clone)]
pub enum OverlayError {
    /// The manager has never been activated against a render surface
    #[error("No render surface bound; call activate() first")]
    SurfaceNotBound,

    /// The feature geometry has no coordinates to anchor an overlay to
    #[error("Cannot place a {kind} overlay on empty geometry")]
    EmptyGeometry {
        /// The overlay kind that could not be placed.
        kind: String,
    },
}

/// Main error type for terrakit
///
/// A unified error type used in public APIs.
#[derive(Error, Debug)]
pub enum Error {
    /// Overlay error
    #[error(transparent)]
    Overlay(#[from] OverlayError),

    /// Generic error
    #[error("{0}")]
    Other(String),
}

impl Error {
    /// Create an error from a string message
    pub fn other(msg: impl Into<String>) -> Self {
        Error::Other(msg.into())
    }

    /// Check if this is an overlay error
    pub fn is_overlay_error(&self) -> bool {
        matches!(self, Error::Overlay(_))
    }
}

/// Result type using Error
pub type Result<T> = std::result::Result<T, Error>;
