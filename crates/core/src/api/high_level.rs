//! High-level grid detection API.
//!
//! Provides the main entry points for running the full reconstruction
//! pipeline on one page or, in parallel, on many:
//! - `detect_grids()` - validate, sweep, repair, aggregate one page
//! - `detect_grids_in_pages()` - independent runs over many pages

use rayon::prelude::*;

use crate::error::{GridError, Result};
use crate::grid::{
    HorizontalLine, OpenRectangle, Rectangle, RectangleFinder, RectilinearPolygon, VerticalLine,
    build_rectilinear_polygons,
};

/// The line segments of one page, in top-left-origin page coordinates.
#[derive(Clone, Debug, Default)]
pub struct PageLines {
    pub horizontals: Vec<HorizontalLine>,
    pub verticals: Vec<VerticalLine>,
}

/// Everything detected on one page.
#[derive(Clone, Debug)]
pub struct GridDetection {
    /// Closed rectangles: sweep results plus repaired open rectangles.
    pub rectangles: Vec<Rectangle>,
    /// Grid-shaped groups of adjacent rectangles, in discovery order.
    pub polygons: Vec<RectilinearPolygon>,
}

/// Runs the full detection pipeline on one page.
///
/// Validates that every coordinate is finite, sweeps the lines into
/// rectangles, repairs horizontally open rectangles (with
/// `combine_condition` deciding which broken vertical rules may be spliced),
/// and aggregates the result into rectilinear polygons.
pub fn detect_grids<F>(
    horizontals: &[HorizontalLine],
    verticals: &[VerticalLine],
    combine_condition: F,
) -> Result<GridDetection>
where
    F: Fn(&VerticalLine, &VerticalLine) -> bool,
{
    validate_horizontals(horizontals)?;
    validate_verticals(verticals)?;

    let outcome = RectangleFinder::new(horizontals, verticals).find();
    let mut rectangles = outcome.rectangles;
    rectangles.extend(OpenRectangle::combine_horizontally_open(
        &outcome.horizontally_open,
        &combine_condition,
    ));

    let polygons = build_rectilinear_polygons(&rectangles);
    Ok(GridDetection {
        rectangles,
        polygons,
    })
}

/// Runs [`detect_grids`] over many pages in parallel.
///
/// Pages are independent; each run owns its own sweep state.
pub fn detect_grids_in_pages<F>(
    pages: &[PageLines],
    combine_condition: F,
) -> Result<Vec<GridDetection>>
where
    F: Fn(&VerticalLine, &VerticalLine) -> bool + Sync,
{
    pages
        .par_iter()
        .map(|page| detect_grids(&page.horizontals, &page.verticals, &combine_condition))
        .collect()
}

fn validate_horizontals(lines: &[HorizontalLine]) -> Result<()> {
    for line in lines {
        check_finite("horizontal line", "top", line.top)?;
        check_finite("horizontal line", "left", line.left)?;
        check_finite("horizontal line", "stretch", line.stretch)?;
    }
    Ok(())
}

fn validate_verticals(lines: &[VerticalLine]) -> Result<()> {
    for line in lines {
        check_finite("vertical line", "top", line.top)?;
        check_finite("vertical line", "left", line.left)?;
        check_finite("vertical line", "stretch", line.stretch)?;
    }
    Ok(())
}

fn check_finite(context: &'static str, field: &'static str, value: f64) -> Result<()> {
    if value.is_finite() {
        Ok(())
    } else {
        Err(GridError::NonFiniteCoordinate {
            context,
            field,
            value,
        })
    }
}
