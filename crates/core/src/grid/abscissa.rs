//! Sweep events along the x axis.
//!
//! Each horizontal line produces a left and a right event; each vertical line
//! produces a single event at its x. Events at (approximately) the same x
//! are ordered left < vertical < right, so a shared corner opens its
//! horizontal before any vertical at that x queries the live set, and closes
//! it only afterwards. Without the tie-break, rounding jitter at corners
//! makes rectangle closure depend on float noise.

use std::cmp::Ordering;

use super::types::{HorizontalLine, VerticalLine, approx_eq};

/// The kind of sweep event, in tie-break priority order.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AbscissaKind {
    HorizontalLeft,
    Vertical,
    HorizontalRight,
}

impl AbscissaKind {
    fn priority(self) -> u8 {
        match self {
            AbscissaKind::HorizontalLeft => 0,
            AbscissaKind::Vertical => 1,
            AbscissaKind::HorizontalRight => 2,
        }
    }
}

/// The line a sweep event belongs to.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum SweepLine {
    Horizontal(HorizontalLine),
    Vertical(VerticalLine),
}

/// One sweep event: an event kind plus its line.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LineAbscissa {
    pub kind: AbscissaKind,
    pub line: SweepLine,
}

impl LineAbscissa {
    pub fn horizontal_left(line: HorizontalLine) -> Self {
        Self {
            kind: AbscissaKind::HorizontalLeft,
            line: SweepLine::Horizontal(line),
        }
    }

    pub fn horizontal_right(line: HorizontalLine) -> Self {
        Self {
            kind: AbscissaKind::HorizontalRight,
            line: SweepLine::Horizontal(line),
        }
    }

    pub fn vertical(line: VerticalLine) -> Self {
        Self {
            kind: AbscissaKind::Vertical,
            line: SweepLine::Vertical(line),
        }
    }

    /// X coordinate of this event.
    ///
    /// Panics when the event kind does not match the line orientation; such
    /// a pairing can only be produced by a caller bug, never by input data.
    pub fn value(&self) -> f64 {
        match (self.kind, self.line) {
            (AbscissaKind::HorizontalLeft, SweepLine::Horizontal(h)) => h.left,
            (AbscissaKind::HorizontalRight, SweepLine::Horizontal(h)) => h.right(),
            (AbscissaKind::Vertical, SweepLine::Vertical(v)) => v.left,
            (kind, line) => panic!("event kind {kind:?} does not match line {line:?}"),
        }
    }
}

/// Orders two sweep events.
///
/// Events compare by x value, except when the values sit within the
/// separation tolerance of each other and the kinds differ; then kind
/// priority decides.
pub(crate) fn compare(a: &LineAbscissa, b: &LineAbscissa) -> Ordering {
    let av = a.value();
    let bv = b.value();
    if approx_eq(av, bv) && a.kind != b.kind {
        return a.kind.priority().cmp(&b.kind.priority());
    }
    av.partial_cmp(&bv).unwrap_or(Ordering::Equal)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn horizontal(top: f64, left: f64, stretch: f64) -> HorizontalLine {
        HorizontalLine::new(top, left, stretch)
    }

    #[test]
    fn events_order_by_value() {
        let a = LineAbscissa::horizontal_left(horizontal(0.0, 0.0, 5.0));
        let b = LineAbscissa::vertical(VerticalLine::new(0.0, 10.0, 5.0));
        assert_eq!(compare(&a, &b), Ordering::Less);
        assert_eq!(compare(&b, &a), Ordering::Greater);
    }

    #[test]
    fn near_ties_order_by_kind_priority() {
        // The vertical sits 0.5 units left of the horizontal's left end, yet
        // the left event still fires first.
        let left = LineAbscissa::horizontal_left(horizontal(0.0, 10.0, 5.0));
        let vertical = LineAbscissa::vertical(VerticalLine::new(0.0, 9.5, 5.0));
        let right = LineAbscissa::horizontal_right(horizontal(0.0, 5.0, 4.8));
        assert_eq!(compare(&left, &vertical), Ordering::Less);
        assert_eq!(compare(&vertical, &right), Ordering::Less);
        assert_eq!(compare(&left, &right), Ordering::Less);
    }

    #[test]
    fn same_kind_near_ties_order_by_value() {
        let a = LineAbscissa::vertical(VerticalLine::new(0.0, 9.5, 5.0));
        let b = LineAbscissa::vertical(VerticalLine::new(0.0, 10.0, 5.0));
        assert_eq!(compare(&a, &b), Ordering::Less);
    }

    #[test]
    #[should_panic(expected = "does not match")]
    fn mismatched_kind_and_line_panics() {
        let event = LineAbscissa {
            kind: AbscissaKind::Vertical,
            line: SweepLine::Horizontal(horizontal(0.0, 0.0, 5.0)),
        };
        event.value();
    }
}
