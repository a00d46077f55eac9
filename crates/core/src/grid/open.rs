//! Repair of rectangles missing one side.
//!
//! The sweep reports a rectangle missing its top or bottom border when a
//! table rule is broken or never drawn. This module splices vertically
//! adjacent open rectangles back together (subject to a caller-supplied
//! predicate), closes the rest at the ends of their vertical borders, and
//! restores row dividers a splice swallowed.

use std::collections::BTreeMap;

use rustc_hash::FxHashSet;

use super::finder::RectangleFinder;
use super::types::{
    CONTEXT_LIMIT, HorizontalLine, KeyF64, OpenSide, Rectangle, SEPARATION_EPSILON, VerticalLine,
    key_f64, rect_key,
};

/// A rectangle known to be missing exactly one side.
///
/// The three known borders are stored; the missing one is synthesized on
/// demand and never stored. Requesting the border on the open side panics.
#[derive(Clone, Copy, Debug)]
pub struct OpenRectangle {
    open_side: OpenSide,
    top: Option<HorizontalLine>,
    bottom: Option<HorizontalLine>,
    left: Option<VerticalLine>,
    right: Option<VerticalLine>,
}

impl OpenRectangle {
    /// A rectangle missing its top border.
    pub fn top_open(left: VerticalLine, right: VerticalLine, bottom: HorizontalLine) -> Self {
        Self {
            open_side: OpenSide::Top,
            top: None,
            bottom: Some(bottom),
            left: Some(left),
            right: Some(right),
        }
    }

    /// A rectangle missing its bottom border.
    pub fn bottom_open(left: VerticalLine, right: VerticalLine, top: HorizontalLine) -> Self {
        Self {
            open_side: OpenSide::Bottom,
            top: Some(top),
            bottom: None,
            left: Some(left),
            right: Some(right),
        }
    }

    /// A rectangle missing its left border.
    pub fn left_open(right: VerticalLine, top: HorizontalLine, bottom: HorizontalLine) -> Self {
        Self {
            open_side: OpenSide::Left,
            top: Some(top),
            bottom: Some(bottom),
            left: None,
            right: Some(right),
        }
    }

    /// A rectangle missing its right border.
    pub fn right_open(left: VerticalLine, top: HorizontalLine, bottom: HorizontalLine) -> Self {
        Self {
            open_side: OpenSide::Right,
            top: Some(top),
            bottom: Some(bottom),
            left: Some(left),
            right: None,
        }
    }

    pub fn open_side(&self) -> OpenSide {
        self.open_side
    }

    pub fn top_border(&self) -> HorizontalLine {
        match self.top {
            Some(line) => line,
            None => panic!("top border is the open side of this rectangle"),
        }
    }

    pub fn bottom_border(&self) -> HorizontalLine {
        match self.bottom {
            Some(line) => line,
            None => panic!("bottom border is the open side of this rectangle"),
        }
    }

    pub fn left_border(&self) -> VerticalLine {
        match self.left {
            Some(line) => line,
            None => panic!("left border is the open side of this rectangle"),
        }
    }

    pub fn right_border(&self) -> VerticalLine {
        match self.right {
            Some(line) => line,
            None => panic!("right border is the open side of this rectangle"),
        }
    }

    /// Synthesizes the missing horizontal border of a vertically open
    /// rectangle at the ends of its two vertical borders, clipped so it
    /// cannot overshoot the known opposite border.
    pub fn closing_horizontal(&self) -> HorizontalLine {
        if !matches!(self.open_side, OpenSide::Top | OpenSide::Bottom) {
            panic!(
                "closing horizontal requested on a {:?}-open rectangle",
                self.open_side
            );
        }
        let left = self.left_border();
        let right = self.right_border();
        let stretch = right.left - left.left;
        let limit = self.border_position(self.open_side.complement());
        let y = match self.open_side {
            OpenSide::Top => left.top.max(right.top).min(limit),
            _ => left.bottom().min(right.bottom()).max(limit),
        };
        HorizontalLine::new(y, left.left, stretch)
    }

    /// Mirror of [`Self::closing_horizontal`] on the x axis.
    pub fn closing_vertical(&self) -> VerticalLine {
        if !matches!(self.open_side, OpenSide::Left | OpenSide::Right) {
            panic!(
                "closing vertical requested on a {:?}-open rectangle",
                self.open_side
            );
        }
        let top = self.top_border();
        let bottom = self.bottom_border();
        let stretch = bottom.top - top.top;
        let limit = self.border_position(self.open_side.complement());
        let x = match self.open_side {
            OpenSide::Left => top.left.max(bottom.left).min(limit),
            _ => top.right().min(bottom.right()).max(limit),
        };
        VerticalLine::new(top.top, x, stretch)
    }

    /// Coordinate of the named border along its aligned axis.
    fn border_position(&self, side: OpenSide) -> f64 {
        match side {
            OpenSide::Top => self.top_border().top,
            OpenSide::Bottom => self.bottom_border().top,
            OpenSide::Left => self.left_border().left,
            OpenSide::Right => self.right_border().left,
        }
    }

    /// Materializes the rectangle by fixing the missing border at its
    /// synthesized position. The result may still fail `is_valid`.
    pub fn close(&self) -> Rectangle {
        let (min_y, max_y) = match self.open_side {
            OpenSide::Top => (self.closing_horizontal().top, self.bottom_border().top),
            OpenSide::Bottom => (self.top_border().top, self.closing_horizontal().top),
            _ => (self.top_border().top, self.bottom_border().top),
        };
        let (min_x, max_x) = match self.open_side {
            OpenSide::Left => (self.closing_vertical().left, self.right_border().left),
            OpenSide::Right => (self.left_border().left, self.closing_vertical().left),
            _ => (self.left_border().left, self.right_border().left),
        };
        Rectangle::from_corners(min_x, min_y, max_x, max_y)
    }

    /// Splices vertically adjacent open rectangles and closes the rest.
    ///
    /// Bottom-open rectangles provide pivot vertical borders; top-open
    /// rectangles provide candidates. A pivot and the first collinear
    /// candidate starting at or below its lower end are replaced by one
    /// continuous vertical border when `combine_condition` accepts the pair
    /// (the caller knows, for instance, whether text runs between the two
    /// fragments). The sweep is then re-run over the merged verticals plus
    /// the known and synthesized closing horizontals of every open
    /// rectangle, and row dividers swallowed by a splice are restored as
    /// sub-rectangles.
    pub fn combine_horizontally_open<F>(
        open_rectangles: &[OpenRectangle],
        combine_condition: F,
    ) -> Vec<Rectangle>
    where
        F: Fn(&VerticalLine, &VerticalLine) -> bool,
    {
        let bottom_open: Vec<&OpenRectangle> = open_rectangles
            .iter()
            .filter(|r| r.open_side == OpenSide::Bottom)
            .collect();
        let top_open: Vec<&OpenRectangle> = open_rectangles
            .iter()
            .filter(|r| r.open_side == OpenSide::Top)
            .collect();

        let mut pivots: Vec<VerticalLine> = Vec::new();
        for rect in &bottom_open {
            pivots.push(rect.left_border());
            pivots.push(rect.right_border());
        }
        let mut candidates: BTreeMap<(KeyF64, KeyF64), VerticalLine> = BTreeMap::new();
        for rect in &top_open {
            for border in [rect.left_border(), rect.right_border()] {
                candidates.insert((key_f64(border.left), key_f64(border.top)), border);
            }
        }

        let mut originals: Vec<VerticalLine> = pivots.clone();
        originals.extend(candidates.values().copied());

        let mut verticals: Vec<VerticalLine> = Vec::with_capacity(originals.len());
        for pivot in pivots {
            let lo = (
                key_f64(pivot.left - SEPARATION_EPSILON),
                key_f64(pivot.top - CONTEXT_LIMIT),
            );
            let hi = (
                key_f64(pivot.left + SEPARATION_EPSILON),
                key_f64(pivot.bottom() + CONTEXT_LIMIT),
            );
            let spliced = candidates
                .range(lo..=hi)
                .find(|(_, candidate)| {
                    candidate.top >= pivot.bottom() - SEPARATION_EPSILON
                        && combine_condition(&pivot, candidate)
                })
                .map(|(key, candidate)| (*key, *candidate));
            match spliced {
                Some((key, candidate)) => {
                    candidates.remove(&key);
                    verticals.push(VerticalLine::new(
                        pivot.top,
                        pivot.left,
                        candidate.bottom() - pivot.top,
                    ));
                }
                None => verticals.push(pivot),
            }
        }
        verticals.extend(candidates.into_values());

        // The same physical border can back several open rectangles; it must
        // reach the rebuilt sweep once.
        let mut unique = FxHashSet::default();
        verticals.retain(|v| {
            unique.insert((v.top.to_bits(), v.left.to_bits(), v.stretch.to_bits()))
        });

        let mut horizontals: Vec<HorizontalLine> = Vec::new();
        for rect in bottom_open.iter().chain(top_open.iter()) {
            match rect.open_side {
                OpenSide::Bottom => horizontals.push(rect.top_border()),
                _ => horizontals.push(rect.bottom_border()),
            }
            horizontals.push(rect.closing_horizontal());
        }

        let combined = RectangleFinder::new(&horizontals, &verticals).find().rectangles;
        let internal = find_internal_rectangles(&combined, &originals);

        let mut seen: FxHashSet<_> = combined.iter().map(rect_key).collect();
        let mut result = combined;
        for rect in internal {
            if seen.insert(rect_key(&rect)) {
                result.push(rect);
            }
        }
        result
    }
}

/// Sub-rectangles restoring original vertical borders whose ends were
/// swallowed into a larger combined rectangle.
///
/// A border end strictly inside a combined rectangle marks a row divider
/// that existed before the splice; the parent is clipped to the border's
/// span to bring it back.
fn find_internal_rectangles(
    combined: &[Rectangle],
    originals: &[VerticalLine],
) -> Vec<Rectangle> {
    let mut internal = Vec::new();
    for rect in combined {
        let lo = rect.min_y + SEPARATION_EPSILON;
        let hi = rect.max_y() - SEPARATION_EPSILON;
        for border in originals {
            if border.left < rect.min_x - SEPARATION_EPSILON
                || border.left > rect.max_x() + SEPARATION_EPSILON
            {
                continue;
            }
            let top_inside = border.top > lo && border.top < hi;
            let bottom_inside = border.bottom() > lo && border.bottom() < hi;
            if !top_inside && !bottom_inside {
                continue;
            }
            let sub = Rectangle::from_corners(
                rect.min_x,
                border.top.max(rect.min_y),
                rect.max_x(),
                border.bottom().min(rect.max_y()),
            );
            if sub.is_valid() {
                internal.push(sub);
            }
        }
    }
    internal
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn closing_horizontal_sits_at_the_shorter_vertical() {
        let open = OpenRectangle::bottom_open(
            VerticalLine::new(0.0, 0.0, 10.0),
            VerticalLine::new(0.0, 20.0, 12.0),
            HorizontalLine::new(0.0, 0.0, 20.0),
        );
        let closing = open.closing_horizontal();
        assert_eq!(closing.top, 10.0);
        assert_eq!(closing.left, 0.0);
        assert_eq!(closing.stretch, 20.0);
    }

    #[test]
    fn closing_horizontal_clips_at_the_known_border() {
        // Degenerate verticals ending above the known top border: the
        // closing border must not overshoot past it.
        let open = OpenRectangle::bottom_open(
            VerticalLine::new(0.0, 0.0, 3.0),
            VerticalLine::new(0.0, 20.0, 3.0),
            HorizontalLine::new(5.0, 0.0, 20.0),
        );
        assert_eq!(open.closing_horizontal().top, 5.0);
    }

    #[test]
    fn closing_vertical_mirrors_on_x() {
        let open = OpenRectangle::right_open(
            VerticalLine::new(0.0, 0.0, 10.0),
            HorizontalLine::new(0.0, 0.0, 20.0),
            HorizontalLine::new(10.0, 0.0, 18.0),
        );
        let closing = open.closing_vertical();
        assert_eq!(closing.left, 18.0);
        assert_eq!(closing.top, 0.0);
        assert_eq!(closing.stretch, 10.0);
    }

    #[test]
    fn close_materializes_a_bottom_open_rectangle() {
        let open = OpenRectangle::bottom_open(
            VerticalLine::new(0.0, 0.0, 10.0),
            VerticalLine::new(0.0, 20.0, 10.0),
            HorizontalLine::new(0.0, 0.0, 20.0),
        );
        assert_eq!(open.close(), Rectangle::new(0.0, 0.0, 20.0, 10.0));
    }

    #[test]
    #[should_panic(expected = "open side")]
    fn requesting_the_open_border_panics() {
        let open = OpenRectangle::top_open(
            VerticalLine::new(0.0, 0.0, 10.0),
            VerticalLine::new(0.0, 20.0, 10.0),
            HorizontalLine::new(10.0, 0.0, 20.0),
        );
        open.top_border();
    }

    #[test]
    #[should_panic(expected = "closing vertical")]
    fn closing_vertical_on_a_vertically_open_rectangle_panics() {
        let open = OpenRectangle::bottom_open(
            VerticalLine::new(0.0, 0.0, 10.0),
            VerticalLine::new(0.0, 20.0, 10.0),
            HorizontalLine::new(0.0, 0.0, 20.0),
        );
        open.closing_vertical();
    }
}
