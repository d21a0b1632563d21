use tactile_core::Point;

/// Orthogonal offsets, in expansion order.
const CARDINAL: [Point; 4] = [
    Point::new(0, -1),
    Point::new(0, 1),
    Point::new(-1, 0),
    Point::new(1, 0),
];

/// Orthogonal offsets followed by diagonals, in expansion order.
const OMNI: [Point; 8] = [
    Point::new(0, -1),
    Point::new(0, 1),
    Point::new(-1, 0),
    Point::new(1, 0),
    Point::new(-1, -1),
    Point::new(-1, 1),
    Point::new(1, -1),
    Point::new(1, 1),
];

/// Which neighbouring tiles a unit may step to.
///
/// The offset order is fixed. It decides the discovery order of neighbours
/// and therefore which of several equal-cost routes a search returns.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Movement {
    /// Four orthogonal steps.
    #[default]
    Cardinal,
    /// Four orthogonal steps plus four diagonals, all at the same cost.
    Omni,
}

impl Movement {
    /// `Omni` when `allow_diagonal` is set, `Cardinal` otherwise.
    #[inline]
    pub const fn from_diagonal(allow_diagonal: bool) -> Self {
        if allow_diagonal { Self::Omni } else { Self::Cardinal }
    }

    #[inline]
    pub const fn allows_diagonal(self) -> bool {
        matches!(self, Self::Omni)
    }

    /// Step offsets in expansion order.
    #[inline]
    pub fn offsets(self) -> &'static [Point] {
        match self {
            Self::Cardinal => &CARDINAL,
            Self::Omni => &OMNI,
        }
    }

    /// Whether `from` → `to` is a single legal step.
    #[inline]
    pub fn is_step(self, from: Point, to: Point) -> bool {
        match self {
            Self::Cardinal => from.is_orthogonal_to(to),
            Self::Omni => from.is_adjacent(to),
        }
    }
}
