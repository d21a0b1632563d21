//! Geometry primitives: [`Point`] and [`Range`].
//!
//! A [`Point`] names one tile of a map. Map rows grow downward, so `y + 1`
//! is the row below. A [`Range`] is a half-open rectangle of tiles, the shape
//! a tilemap layer reports for its painted block.

use std::fmt;
use std::ops::{Add, Mul, Sub};

// ---------------------------------------------------------------------------
// Point
// ---------------------------------------------------------------------------

/// An integer tile coordinate.
///
/// Equality and hashing use exact integer identity, so a `Point` can key a
/// map without approximation.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Point {
    pub x: i32,
    pub y: i32,
}

impl Point {
    /// Origin (0, 0).
    pub const ZERO: Self = Self { x: 0, y: 0 };

    /// Create a new point.
    #[inline]
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Return a point shifted by (dx, dy). Overflow behaves as `i32`
    /// addition; use [`checked_shift`](Self::checked_shift) at the edges of
    /// the coordinate space.
    #[inline]
    pub const fn shift(self, dx: i32, dy: i32) -> Self {
        Self {
            x: self.x + dx,
            y: self.y + dy,
        }
    }

    /// Shift by (dx, dy), or `None` when either axis leaves the `i32` range.
    #[inline]
    pub const fn checked_shift(self, dx: i32, dy: i32) -> Option<Self> {
        match (self.x.checked_add(dx), self.y.checked_add(dy)) {
            (Some(x), Some(y)) => Some(Self { x, y }),
            _ => None,
        }
    }

    /// `self + d`, or `None` on overflow.
    #[inline]
    pub const fn checked_add(self, d: Point) -> Option<Self> {
        self.checked_shift(d.x, d.y)
    }

    /// Whether the point lies inside the half-open range.
    #[inline]
    pub fn in_range(self, r: Range) -> bool {
        r.contains(self)
    }

    /// The four orthogonal neighbours (up, down, left, right).
    #[inline]
    pub fn neighbors_4(self) -> [Point; 4] {
        [
            self.shift(0, -1),
            self.shift(0, 1),
            self.shift(-1, 0),
            self.shift(1, 0),
        ]
    }

    /// The four orthogonal neighbours followed by the four diagonals.
    #[inline]
    pub fn neighbors_8(self) -> [Point; 8] {
        let [up, down, left, right] = self.neighbors_4();
        [
            up,
            down,
            left,
            right,
            self.shift(-1, -1),
            self.shift(-1, 1),
            self.shift(1, -1),
            self.shift(1, 1),
        ]
    }

    /// Whether `other` is one king move away (orthogonal or diagonal).
    #[inline]
    pub fn is_adjacent(self, other: Point) -> bool {
        let (dx, dy) = (self.x.abs_diff(other.x), self.y.abs_diff(other.y));
        self != other && dx <= 1 && dy <= 1
    }

    /// Whether `other` is exactly one orthogonal step away.
    #[inline]
    pub fn is_orthogonal_to(self, other: Point) -> bool {
        let (dx, dy) = (self.x.abs_diff(other.x), self.y.abs_diff(other.y));
        dx.saturating_add(dy) == 1
    }
}

impl PartialOrd for Point {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

/// Row-major order: rows first, then columns.
impl Ord for Point {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        self.y.cmp(&other.y).then(self.x.cmp(&other.x))
    }
}

impl fmt::Display for Point {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

impl From<(i32, i32)> for Point {
    #[inline]
    fn from((x, y): (i32, i32)) -> Self {
        Self::new(x, y)
    }
}

impl Add for Point {
    type Output = Self;
    #[inline]
    fn add(self, rhs: Self) -> Self {
        Self::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl Sub for Point {
    type Output = Self;
    #[inline]
    fn sub(self, rhs: Self) -> Self {
        Self::new(self.x - rhs.x, self.y - rhs.y)
    }
}

impl Mul<i32> for Point {
    type Output = Self;
    #[inline]
    fn mul(self, rhs: i32) -> Self {
        Self::new(self.x * rhs, self.y * rhs)
    }
}

// ---------------------------------------------------------------------------
// Range
// ---------------------------------------------------------------------------

/// A half-open rectangle \[min, max). `min` is inclusive, `max` is exclusive.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Range {
    pub min: Point,
    pub max: Point,
}

impl Range {
    /// Create a new range from two corners, canonicalized so that
    /// `min` ≤ `max` on each axis.
    #[inline]
    pub fn new(x0: i32, y0: i32, x1: i32, y1: i32) -> Self {
        Self {
            min: Point::new(x0.min(x1), y0.min(y1)),
            max: Point::new(x0.max(x1), y0.max(y1)),
        }
    }

    /// A range anchored at `origin` spanning `width` × `height` tiles. The
    /// far corner saturates at the `i32` limits.
    #[inline]
    pub fn with_size(origin: Point, width: i32, height: i32) -> Self {
        Self::new(
            origin.x,
            origin.y,
            origin.x.saturating_add(width),
            origin.y.saturating_add(height),
        )
    }

    /// The range covering the inclusive corners `lo` and `hi`. The exclusive
    /// edge saturates, so a corner on `i32::MAX` falls just outside.
    #[inline]
    pub fn inclusive(lo: Point, hi: Point) -> Self {
        Self::new(lo.x, lo.y, hi.x.saturating_add(1), hi.y.saturating_add(1))
    }

    /// The single-tile range holding `p`. Empty when `p` sits on `i32::MAX`.
    #[inline]
    pub fn unit(p: Point) -> Self {
        Self::inclusive(p, p)
    }

    /// Size as a `Point` (width, height), each clamped to `i32::MAX`.
    #[inline]
    pub fn size(self) -> Point {
        Point::new(self.width(), self.height())
    }

    /// Width of the range, clamped to `i32::MAX`.
    #[inline]
    pub fn width(self) -> i32 {
        i32::try_from(self.span_x()).unwrap_or(i32::MAX)
    }

    /// Height of the range, clamped to `i32::MAX`.
    #[inline]
    pub fn height(self) -> i32 {
        i32::try_from(self.span_y()).unwrap_or(i32::MAX)
    }

    #[inline]
    fn span_x(self) -> usize {
        if self.min.x >= self.max.x { 0 } else { self.min.x.abs_diff(self.max.x) as usize }
    }

    #[inline]
    fn span_y(self) -> usize {
        if self.min.y >= self.max.y { 0 } else { self.min.y.abs_diff(self.max.y) as usize }
    }

    /// Total number of tiles in the range, saturating at `usize::MAX`.
    #[inline]
    pub fn len(self) -> usize {
        self.span_x().saturating_mul(self.span_y())
    }

    /// Whether the range has zero area.
    #[inline]
    pub fn is_empty(self) -> bool {
        self.min.x >= self.max.x || self.min.y >= self.max.y
    }

    /// Whether `p` is inside the half-open range.
    #[inline]
    pub fn contains(self, p: Point) -> bool {
        p.x >= self.min.x && p.x < self.max.x && p.y >= self.min.y && p.y < self.max.y
    }

    /// Smallest range that contains both ranges. Empty ranges are ignored.
    #[inline]
    pub fn union(self, other: Range) -> Self {
        if self.is_empty() {
            return other;
        }
        if other.is_empty() {
            return self;
        }
        Self {
            min: Point::new(self.min.x.min(other.min.x), self.min.y.min(other.min.y)),
            max: Point::new(self.max.x.max(other.max.x), self.max.y.max(other.max.y)),
        }
    }

    /// Offset of `p` in a row-major walk of the range, or `None` outside it.
    #[inline]
    pub fn offset_of(self, p: Point) -> Option<usize> {
        if !self.contains(p) {
            return None;
        }
        let col = self.min.x.abs_diff(p.x) as usize;
        let row = self.min.y.abs_diff(p.y) as usize;
        Some(row.saturating_mul(self.span_x()).saturating_add(col))
    }

    /// Row-major iterator over every point in the range.
    #[inline]
    pub fn iter(self) -> RangeIter {
        let remaining = self.len();
        RangeIter {
            range: self,
            next: (remaining > 0).then_some(self.min),
            remaining,
        }
    }
}

impl IntoIterator for Range {
    type Item = Point;
    type IntoIter = RangeIter;
    #[inline]
    fn into_iter(self) -> RangeIter {
        self.iter()
    }
}

impl fmt::Display for Range {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}-{})", self.min, self.max)
    }
}

// ---------------------------------------------------------------------------
// RangeIter
// ---------------------------------------------------------------------------

/// Row-major iterator over the points in a [`Range`].
///
/// Holds the point it yields next and a count of what is left. A point
/// inside the range is below `max` on both axes, so stepping to the next
/// column or row cannot overflow.
#[derive(Clone, Debug)]
pub struct RangeIter {
    range: Range,
    next: Option<Point>,
    remaining: usize,
}

impl RangeIter {
    fn successor(&self, p: Point) -> Option<Point> {
        if p.x + 1 < self.range.max.x {
            Some(Point::new(p.x + 1, p.y))
        } else if p.y + 1 < self.range.max.y {
            Some(Point::new(self.range.min.x, p.y + 1))
        } else {
            None
        }
    }
}

impl Iterator for RangeIter {
    type Item = Point;

    #[inline]
    fn next(&mut self) -> Option<Point> {
        let p = self.next?;
        self.next = self.successor(p);
        self.remaining = self.remaining.saturating_sub(1);
        Some(p)
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl ExactSizeIterator for RangeIter {}


#[cfg(all(test, feature = "serde"))]
mod serde_tests {
    use super::*;

    #[test]
    fn point_round_trip() {
        let p = Point::new(-3, 9);
        let json = serde_json::to_string(&p).unwrap();
        let back: Point = serde_json::from_str(&json).unwrap();
        assert_eq!(p, back);
    }

    #[test]
    fn range_round_trip() {
        let r = Range::new(1, 2, 10, 20);
        let json = serde_json::to_string(&r).unwrap();
        let back: Range = serde_json::from_str(&json).unwrap();
        assert_eq!(r, back);
    }
}
