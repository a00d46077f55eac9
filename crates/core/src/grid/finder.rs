//! Sweep-line reconstruction of rectangles from ruling lines.
//!
//! The sweep walks the page left to right. Horizontal lines enter a live
//! y-keyed map at their left end and leave it at their right end; every
//! vertical line first acts as a candidate right border for all builders
//! created so far, then becomes a builder of its own. Event order is
//! load-bearing: it decides which builder owns an open horizontal line.

use std::collections::BTreeMap;

use super::abscissa::{self, AbscissaKind, LineAbscissa, SweepLine};
use super::builder::RectangleBuilder;
use super::open::OpenRectangle;
use super::types::{HorizontalLine, KeyF64, Rectangle, VerticalLine, key_f64};

/// Everything one sweep produces.
pub struct SweepOutcome {
    /// Rectangles whose four sides were all found among the input lines.
    pub rectangles: Vec<Rectangle>,
    /// Rectangles missing their top or bottom border.
    pub horizontally_open: Vec<OpenRectangle>,
    /// The builders created during the sweep, one per vertical line, still
    /// holding their unconsumed left/right open candidates.
    pub builders: Vec<RectangleBuilder>,
}

/// Reconstructs rectangles from one page's ruling lines.
pub struct RectangleFinder {
    horizontals: Vec<HorizontalLine>,
    verticals: Vec<VerticalLine>,
}

impl RectangleFinder {
    pub fn new(horizontals: &[HorizontalLine], verticals: &[VerticalLine]) -> Self {
        Self {
            horizontals: horizontals.to_vec(),
            verticals: verticals.to_vec(),
        }
    }

    /// Runs the sweep.
    pub fn find(&self) -> SweepOutcome {
        let mut events =
            Vec::with_capacity(self.horizontals.len() * 2 + self.verticals.len());
        for &line in &self.horizontals {
            events.push(LineAbscissa::horizontal_left(line));
            events.push(LineAbscissa::horizontal_right(line));
        }
        for &line in &self.verticals {
            events.push(LineAbscissa::vertical(line));
        }
        events.sort_by(abscissa::compare);

        let mut current_horizontals: BTreeMap<KeyF64, HorizontalLine> = BTreeMap::new();
        let mut builders: Vec<RectangleBuilder> = Vec::new();
        let mut rectangles: Vec<Rectangle> = Vec::new();
        let mut horizontally_open: Vec<OpenRectangle> = Vec::new();

        for event in &events {
            match (event.kind, event.line) {
                (AbscissaKind::HorizontalLeft, SweepLine::Horizontal(line)) => {
                    current_horizontals.insert(key_f64(line.top), line);
                }
                (AbscissaKind::HorizontalRight, SweepLine::Horizontal(line)) => {
                    current_horizontals.remove(&key_f64(line.top));
                }
                (AbscissaKind::Vertical, SweepLine::Vertical(line)) => {
                    let closed = close_against_builders(
                        &line,
                        &mut builders,
                        &mut rectangles,
                        &mut horizontally_open,
                    );
                    let mut builder = RectangleBuilder::new(line, &current_horizontals);
                    builder.remove_left_side_closed_lines(&closed);
                    builders.push(builder);
                }
                _ => unreachable!("event construction pairs each kind with its line"),
            }
        }

        SweepOutcome {
            rectangles,
            horizontally_open,
            builders,
        }
    }
}

/// Treats `right` as a closing right border for every builder created so
/// far; returns the horizontal borders consumed in this step.
fn close_against_builders(
    right: &VerticalLine,
    builders: &mut [RectangleBuilder],
    rectangles: &mut Vec<Rectangle>,
    horizontally_open: &mut Vec<OpenRectangle>,
) -> Vec<HorizontalLine> {
    let mut closed = Vec::new();
    for builder in builders.iter_mut() {
        let borders = builder.find_intersecting_borders(right);
        if borders.is_empty() {
            continue;
        }
        rectangles.extend(builder.rectangles_with_right_border(right, &borders));
        horizontally_open.extend(builder.horizontally_open_rectangles(right, &borders));
        builder.remove_right_side_closed_lines(&borders);
        closed.extend(borders);
    }
    closed
}
