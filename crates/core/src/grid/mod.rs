//! Rectangle reconstruction from ruling lines.
//!
//! A page arrives as flat sets of horizontal and vertical line segments.
//! The sweep in [`RectangleFinder`] reassembles them into rectangles,
//! [`OpenRectangle`] repairs rectangles a broken or missing rule left open
//! on one side, and [`RectilinearPolygon`] groups the results into
//! grid-shaped regions.

mod abscissa;
mod builder;
mod finder;
mod open;
mod polygon;
mod types;

// Re-export public types
pub use abscissa::{AbscissaKind, LineAbscissa, SweepLine};
pub use builder::RectangleBuilder;
pub use finder::{RectangleFinder, SweepOutcome};
pub use open::OpenRectangle;
pub use polygon::{RectilinearPolygon, build_rectilinear_polygons};
pub use types::{
    HorizontalLine, OpenSide, Rectangle, SEPARATION_EPSILON, VerticalLine, approx_eq,
};
