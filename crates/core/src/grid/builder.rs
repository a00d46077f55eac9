//! Candidate left borders and the horizontal lines crossing them.
//!
//! A builder is created when the sweep reaches a vertical line. It snapshots
//! the horizontal lines alive at that x whose span reaches the vertical, and
//! later answers which of them also reach a candidate right border.

use std::collections::BTreeMap;

use itertools::Itertools;

use super::open::OpenRectangle;
use super::types::{
    HorizontalLine, KeyF64, Rectangle, SEPARATION_EPSILON, VerticalLine, approx_eq, key_f64,
};

/// One candidate left border together with the horizontal lines known to
/// cross it.
#[derive(Clone, Debug)]
pub struct RectangleBuilder {
    left_border: VerticalLine,
    /// Crossing horizontals keyed by y, queried for right-border closures.
    intersecting_lines: BTreeMap<KeyF64, HorizontalLine>,
    /// Crossing horizontals extending right of the border. Entries still
    /// here after the sweep describe a rectangle missing its right side.
    right_side_open: BTreeMap<KeyF64, HorizontalLine>,
    /// Mirror bookkeeping for lines extending left of the border.
    left_side_open: BTreeMap<KeyF64, HorizontalLine>,
}

impl RectangleBuilder {
    /// Snapshots the live horizontal lines around `left_border`.
    ///
    /// Only lines whose y falls within the border's vertical extent (widened
    /// by the separation tolerance) and whose x-range reaches the border are
    /// recorded; a line that never touches the border cannot bound a
    /// rectangle anchored on it.
    pub(crate) fn new(
        left_border: VerticalLine,
        horizontals: &BTreeMap<KeyF64, HorizontalLine>,
    ) -> Self {
        let mut intersecting_lines = BTreeMap::new();
        let mut right_side_open = BTreeMap::new();
        let mut left_side_open = BTreeMap::new();

        let x = left_border.left;
        let lo = key_f64(left_border.top - SEPARATION_EPSILON);
        let hi = key_f64(left_border.bottom() + SEPARATION_EPSILON);
        // A negative-stretch border yields an inverted range; it crosses
        // nothing and leaves the builder empty.
        if lo <= hi {
            for (&y, &line) in horizontals.range(lo..=hi) {
                if !line.covers_x(x) {
                    continue;
                }
                intersecting_lines.insert(y, line);
                if line.right() > x + SEPARATION_EPSILON {
                    right_side_open.insert(y, line);
                }
                if line.left < x - SEPARATION_EPSILON {
                    left_side_open.insert(y, line);
                }
            }
        }

        Self {
            left_border,
            intersecting_lines,
            right_side_open,
            left_side_open,
        }
    }

    pub fn left_border(&self) -> &VerticalLine {
        &self.left_border
    }

    /// Horizontal lines crossing both this builder's border and `right`, in
    /// ascending y. Empty when the candidate sits on the border itself.
    ///
    /// The query is bounded by the candidate's own vertical extent: a short
    /// right border cannot close rows it does not reach.
    pub fn find_intersecting_borders(&self, right: &VerticalLine) -> Vec<HorizontalLine> {
        if approx_eq(right.left, self.left_border.left) {
            return Vec::new();
        }
        let lo = key_f64(right.top - SEPARATION_EPSILON);
        let hi = key_f64(right.bottom() + SEPARATION_EPSILON);
        if lo > hi {
            return Vec::new();
        }
        self.intersecting_lines
            .range(lo..=hi)
            .filter(|(_, line)| line.covers_x(right.left))
            .map(|(_, &line)| line)
            .collect()
    }

    /// Closed rectangles between this border and `right`: one per
    /// consecutive pair of crossing horizontals, invalid ones dropped.
    pub fn rectangles_with_right_border(
        &self,
        right: &VerticalLine,
        borders: &[HorizontalLine],
    ) -> Vec<Rectangle> {
        borders
            .iter()
            .tuple_windows()
            .map(|(upper, lower)| {
                Rectangle::from_corners(self.left_border.left, upper.top, right.left, lower.top)
            })
            .filter(Rectangle::is_valid)
            .collect()
    }

    /// Open rectangles above the topmost and below the bottommost crossing
    /// horizontal, emitted when both vertical borders extend past it.
    pub fn horizontally_open_rectangles(
        &self,
        right: &VerticalLine,
        borders: &[HorizontalLine],
    ) -> Vec<OpenRectangle> {
        let mut open = Vec::new();
        let (Some(first), Some(last)) = (borders.first(), borders.last()) else {
            return open;
        };
        let left = self.left_border;
        if first.top > left.top + SEPARATION_EPSILON && first.top > right.top + SEPARATION_EPSILON {
            open.push(OpenRectangle::top_open(left, *right, *first));
        }
        if last.top < left.bottom() - SEPARATION_EPSILON
            && last.top < right.bottom() - SEPARATION_EPSILON
        {
            open.push(OpenRectangle::bottom_open(left, *right, *last));
        }
        open
    }

    /// Drops horizontals consumed as closing borders to the right of this
    /// builder, so they are not reported open again.
    pub(crate) fn remove_right_side_closed_lines(&mut self, borders: &[HorizontalLine]) {
        for border in borders {
            self.right_side_open.remove(&key_f64(border.top));
        }
    }

    /// Drops horizontals that were already consumed as closing borders when
    /// this builder's border was reached.
    pub(crate) fn remove_left_side_closed_lines(&mut self, borders: &[HorizontalLine]) {
        for border in borders {
            self.left_side_open.remove(&key_f64(border.top));
        }
    }

    /// The rectangle left open to the right of this border, when the
    /// unconsumed candidates span more than the separation tolerance.
    pub fn right_side_open_rectangles(&self) -> Vec<OpenRectangle> {
        let (Some(first), Some(last)) = (
            self.right_side_open.values().next(),
            self.right_side_open.values().next_back(),
        ) else {
            return Vec::new();
        };
        if last.top - first.top > SEPARATION_EPSILON {
            vec![OpenRectangle::right_open(self.left_border, *first, *last)]
        } else {
            Vec::new()
        }
    }

    /// Mirror of [`Self::right_side_open_rectangles`] for lines extending
    /// left of the border.
    pub fn left_side_open_rectangles(&self) -> Vec<OpenRectangle> {
        let (Some(first), Some(last)) = (
            self.left_side_open.values().next(),
            self.left_side_open.values().next_back(),
        ) else {
            return Vec::new();
        };
        if last.top - first.top > SEPARATION_EPSILON {
            vec![OpenRectangle::left_open(self.left_border, *first, *last)]
        } else {
            Vec::new()
        }
    }
}
