//! Error types for grid detection.

use thiserror::Error;

/// Errors reported at the detection API boundary.
///
/// The sweep itself never fails on line data; degenerate segments simply
/// produce no rectangles. Inputs that would corrupt the sweep ordering are
/// rejected before it starts.
#[derive(Debug, Error)]
pub enum GridError {
    /// A line coordinate was NaN or infinite. Upstream line detectors are
    /// expected to supply finite page coordinates.
    #[error("non-finite {field} on a {context}: {value}")]
    NonFiniteCoordinate {
        context: &'static str,
        field: &'static str,
        value: f64,
    },
}

pub type Result<T> = std::result::Result<T, GridError>;
