//! Catalog model and view-state core for the Rust NEO platform.
//!
//! The modules mirror the legacy Flask/React near-Earth-object viewer while
//! providing typed catalog records, a generation-checked fetch cycle, and a
//! seam for the upstream catalog source.

pub mod catalog;
pub mod prelude;
pub mod telemetry;
pub mod view;

pub use prelude::{CatalogError, CatalogResult, FeedWindow, ObjectSource};
