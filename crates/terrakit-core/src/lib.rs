//! # Terrakit Core
//!
//! Core types and utilities for the terrakit map-viewer engine.
//! Provides the observable state store, the planar geometry primitives,
//! the error taxonomy and the trailing-edge debouncer shared by the
//! higher-level reconciliation crates.

pub mod constants;
pub mod debounce;
pub mod error;
pub mod geo;
pub mod store;

pub use debounce::Debouncer;
pub use error::{Error, OverlayError, Result};
pub use geo::{Coordinate, Geometry};
pub use store::{Store, SubscriptionId};
