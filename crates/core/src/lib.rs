//! trellis - reconstruction of table grids from ruling-line segments.
//!
//! A page arrives as two unordered sets of horizontal and vertical line
//! segments (ruling lines of a table, scanned borders, form boxes). This
//! crate reassembles them into rectangles with a sweep along the x axis,
//! repairs rectangles that a broken or missing rule left open on one side,
//! and groups adjacent rectangles into rectilinear polygons whose row and
//! column counts drive table detection downstream.

pub mod api;
pub mod error;
pub mod grid;

// Re-export the high-level entry points
pub use api::high_level;

pub use error::{GridError, Result};
