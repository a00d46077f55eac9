//! High-level API module for grid detection.
//!
//! # Example
//!
//! ```
//! use trellis_core::api::detect_grids;
//! use trellis_core::grid::{HorizontalLine, VerticalLine};
//!
//! let horizontals = vec![
//!     HorizontalLine::new(0.0, 0.0, 20.0),
//!     HorizontalLine::new(10.0, 0.0, 20.0),
//! ];
//! let verticals = vec![
//!     VerticalLine::new(0.0, 0.0, 10.0),
//!     VerticalLine::new(0.0, 20.0, 10.0),
//! ];
//! let detection = detect_grids(&horizontals, &verticals, |_, _| true)?;
//! assert_eq!(detection.rectangles.len(), 1);
//! # Ok::<(), trellis_core::GridError>(())
//! ```

pub mod high_level;

// Re-export for convenience
pub use high_level::{GridDetection, PageLines, detect_grids, detect_grids_in_pages};
