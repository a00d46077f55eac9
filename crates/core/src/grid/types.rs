//! Value types and tolerances for grid reconstruction.
//!
//! Line segments arrive from the layout-analysis layer as `{top, left,
//! stretch}` triples in top-left-origin page coordinates (y grows downward).
//! Everything here is a small `Copy` value; a merged or synthesized line is a
//! new value, never an in-place edit of an input.

use ordered_float::OrderedFloat;

/// Tolerance below which two coordinates describe the same position.
///
/// Scanned and vector-drawn rules rarely line up exactly; every adjacency and
/// intersection test in this crate goes through this tolerance instead of
/// exact equality.
pub const SEPARATION_EPSILON: f64 = 1.0;

/// Arbitrarily large offset used to build one-sided open bounds for ordered
/// range queries. Not a physical page limit.
pub(crate) const CONTEXT_LIMIT: f64 = 1000.0;

/// Compares two coordinates for approximate equality.
#[inline]
pub fn approx_eq(a: f64, b: f64) -> bool {
    (a - b).abs() < SEPARATION_EPSILON
}

// Key types for ordered float maps
pub(crate) type KeyF64 = OrderedFloat<f64>;

pub(crate) fn key_f64(v: f64) -> KeyF64 {
    OrderedFloat(v)
}

/// A horizontal ruling line: y position, left end, and length.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct HorizontalLine {
    pub top: f64,
    pub left: f64,
    pub stretch: f64,
}

impl HorizontalLine {
    pub fn new(top: f64, left: f64, stretch: f64) -> Self {
        Self { top, left, stretch }
    }

    /// X coordinate of the right end.
    pub fn right(&self) -> f64 {
        self.left + self.stretch
    }

    /// Whether the line's x-range, widened by the separation tolerance,
    /// contains `x`.
    pub(crate) fn covers_x(&self, x: f64) -> bool {
        self.left - SEPARATION_EPSILON <= x && x <= self.right() + SEPARATION_EPSILON
    }
}

/// A vertical ruling line: upper end y, x position, and length.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct VerticalLine {
    pub top: f64,
    pub left: f64,
    pub stretch: f64,
}

impl VerticalLine {
    pub fn new(top: f64, left: f64, stretch: f64) -> Self {
        Self { top, left, stretch }
    }

    /// Y coordinate of the lower end.
    pub fn bottom(&self) -> f64 {
        self.top + self.stretch
    }
}

/// An axis-aligned rectangle reconstructed from ruling lines.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Rectangle {
    pub min_x: f64,
    pub min_y: f64,
    pub width: f64,
    pub height: f64,
}

impl Rectangle {
    pub fn new(min_x: f64, min_y: f64, width: f64, height: f64) -> Self {
        Self {
            min_x,
            min_y,
            width,
            height,
        }
    }

    pub fn from_corners(min_x: f64, min_y: f64, max_x: f64, max_y: f64) -> Self {
        Self::new(min_x, min_y, max_x - min_x, max_y - min_y)
    }

    pub fn max_x(&self) -> f64 {
        self.min_x + self.width
    }

    pub fn max_y(&self) -> f64 {
        self.min_y + self.height
    }

    /// A rectangle is kept only when both dimensions clear the separation
    /// tolerance; anything thinner is scan noise.
    pub fn is_valid(&self) -> bool {
        self.width > SEPARATION_EPSILON && self.height > SEPARATION_EPSILON
    }

    pub fn top_border(&self) -> HorizontalLine {
        HorizontalLine::new(self.min_y, self.min_x, self.width)
    }

    pub fn bottom_border(&self) -> HorizontalLine {
        HorizontalLine::new(self.max_y(), self.min_x, self.width)
    }

    pub fn left_border(&self) -> VerticalLine {
        VerticalLine::new(self.min_y, self.min_x, self.height)
    }

    pub fn right_border(&self) -> VerticalLine {
        VerticalLine::new(self.min_y, self.max_x(), self.height)
    }
}

// Rectangle key for hashing
#[derive(Hash, Eq, PartialEq, Clone, Copy, Debug)]
pub(crate) struct RectKey(pub u64, pub u64, pub u64, pub u64);

pub(crate) fn rect_key(r: &Rectangle) -> RectKey {
    RectKey(
        r.min_x.to_bits(),
        r.min_y.to_bits(),
        r.width.to_bits(),
        r.height.to_bits(),
    )
}

/// The single missing side of an open rectangle.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum OpenSide {
    Top,
    Bottom,
    Left,
    Right,
}

impl OpenSide {
    /// The side facing this one.
    pub fn complement(self) -> OpenSide {
        match self {
            OpenSide::Top => OpenSide::Bottom,
            OpenSide::Bottom => OpenSide::Top,
            OpenSide::Left => OpenSide::Right,
            OpenSide::Right => OpenSide::Left,
        }
    }
}
