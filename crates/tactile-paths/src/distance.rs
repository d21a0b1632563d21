use tactile_core::Point;

use crate::neighbors::Movement;

/// Manhattan (L1) distance between two points, saturating at `i32::MAX`.
#[inline]
pub fn manhattan(a: Point, b: Point) -> i32 {
    clamp(a.x.abs_diff(b.x).saturating_add(a.y.abs_diff(b.y)).into())
}

/// Chebyshev (L∞) distance between two points, saturating at `i32::MAX`.
#[inline]
pub fn chebyshev(a: Point, b: Point) -> i32 {
    clamp(a.x.abs_diff(b.x).max(a.y.abs_diff(b.y)).into())
}

/// Sum of squared per-axis differences, saturating at `i32::MAX`.
#[inline]
pub fn squared_euclidean(a: Point, b: Point) -> i32 {
    let dx = u64::from(a.x.abs_diff(b.x));
    let dy = u64::from(a.y.abs_diff(b.y));
    clamp((dx * dx).saturating_add(dy * dy))
}

#[inline]
fn clamp(d: u64) -> i32 {
    i32::try_from(d).unwrap_or(i32::MAX)
}

/// Estimate of the remaining cost from a tile to the goal.
///
/// Every step costs 1, orthogonal or diagonal. Under that cost model
/// [`Manhattan`](Self::Manhattan) is admissible for cardinal movement and
/// [`Chebyshev`](Self::Chebyshev) is admissible for omnidirectional movement.
///
/// [`SquaredEuclidean`](Self::SquaredEuclidean) overestimates any distance
/// longer than one step. It pulls the search hard toward the goal and expands
/// fewer tiles, but the returned route is not guaranteed to be shortest.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Heuristic {
    Manhattan,
    Chebyshev,
    SquaredEuclidean,
}

impl Heuristic {
    /// The admissible heuristic matching a movement rule.
    pub const fn for_movement(movement: Movement) -> Self {
        match movement {
            Movement::Cardinal => Self::Manhattan,
            Movement::Omni => Self::Chebyshev,
        }
    }

    /// Estimated cost from `from` to `to`.
    #[inline]
    pub fn estimate(self, from: Point, to: Point) -> i32 {
        match self {
            Self::Manhattan => manhattan(from, to),
            Self::Chebyshev => chebyshev(from, to),
            Self::SquaredEuclidean => squared_euclidean(from, to),
        }
    }

    /// Whether the estimate never exceeds the true unit-step cost under
    /// `movement`.
    pub const fn is_admissible_for(self, movement: Movement) -> bool {
        match (self, movement) {
            (Self::Manhattan, Movement::Cardinal) => true,
            (Self::Chebyshev, _) => true,
            _ => false,
        }
    }
}
