//! Best-first route search over a [`TileGrid`].
//!
//! The search is A*-shaped with two deliberate departures from the textbook
//! algorithm:
//!
//! - a tile is never reopened once closed, even if a cheaper route to it
//!   turns up later;
//! - an open node's cost is never lowered in place. A strictly cheaper
//!   candidate for the same tile is queued as a new node instead, and a
//!   candidate that is not strictly cheaper is dropped.
//!
//! With unit step cost and an admissible, consistent heuristic neither rule
//! loses optimality. That holds for cardinal movement with
//! [`Heuristic::Manhattan`]. For omnidirectional movement, or with
//! [`Heuristic::SquaredEuclidean`], the returned route is valid but is not
//! guaranteed to be a shortest one.
//!
//! Among open nodes with the same `f`, the one discovered first is expanded
//! first. Neighbours are discovered in [`Movement::offsets`] order, so the
//! route chosen among several equal-cost ones is fully reproducible.

use std::collections::HashSet;
use std::fmt;

use tactile_core::Point;

use crate::distance::Heuristic;
use crate::grid::{TileGrid, TileState};
use crate::neighbors::Movement;
use crate::node::{NodeArena, OpenSet, SearchNode};

/// Cost of any single step.
const STEP_COST: i32 = 1;

// ---------------------------------------------------------------------------
// Options
// ---------------------------------------------------------------------------

/// Search configuration.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SearchOptions {
    /// Which neighbouring tiles count as one step.
    pub movement: Movement,
    /// Cost estimate; `None` picks [`Heuristic::for_movement`].
    pub heuristic: Option<Heuristic>,
    /// Give up after expanding this many nodes. `None` searches until the
    /// goal is reached or every reachable tile has been expanded.
    pub max_expansions: Option<usize>,
}

impl SearchOptions {
    pub fn with_movement(mut self, movement: Movement) -> Self {
        self.movement = movement;
        self
    }

    pub fn with_diagonal(self, allow_diagonal: bool) -> Self {
        self.with_movement(Movement::from_diagonal(allow_diagonal))
    }

    pub fn with_heuristic(mut self, heuristic: Heuristic) -> Self {
        self.heuristic = Some(heuristic);
        self
    }

    pub fn with_max_expansions(mut self, limit: usize) -> Self {
        self.max_expansions = Some(limit);
        self
    }

    /// The heuristic a search with these options uses.
    #[inline]
    pub fn effective_heuristic(&self) -> Heuristic {
        self.heuristic
            .unwrap_or_else(|| Heuristic::for_movement(self.movement))
    }
}

// ---------------------------------------------------------------------------
// Path
// ---------------------------------------------------------------------------

/// A route from start to goal, both included.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct Path(Vec<Point>);

impl Path {
    /// Number of tiles on the route, endpoints included.
    #[inline]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Number of moves needed to walk the route.
    #[inline]
    pub fn steps(&self) -> usize {
        self.0.len().saturating_sub(1)
    }

    #[inline]
    pub fn start(&self) -> Option<Point> {
        self.0.first().copied()
    }

    #[inline]
    pub fn goal(&self) -> Option<Point> {
        self.0.last().copied()
    }

    #[inline]
    pub fn points(&self) -> &[Point] {
        &self.0
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Point> {
        self.0.iter()
    }

    pub fn into_inner(self) -> Vec<Point> {
        self.0
    }

    /// Whether every tile is traversable in `grid` and each consecutive pair
    /// is one legal `movement` step.
    pub fn is_walkable(&self, grid: &TileGrid, movement: Movement) -> bool {
        self.0.iter().all(|&p| grid.is_traversable(p))
            && self.0.windows(2).all(|w| movement.is_step(w[0], w[1]))
    }
}

impl From<Vec<Point>> for Path {
    fn from(points: Vec<Point>) -> Self {
        Self(points)
    }
}

impl From<Path> for Vec<Point> {
    fn from(path: Path) -> Self {
        path.0
    }
}

impl<'a> IntoIterator for &'a Path {
    type Item = &'a Point;
    type IntoIter = std::slice::Iter<'a, Point>;
    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

/// `(x, y), (x, y), ...`
impl fmt::Display for Path {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, p) in self.0.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{p}")?;
        }
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Outcome
// ---------------------------------------------------------------------------

/// How a search ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SearchOutcome {
    /// A route was found.
    Found(Path),
    /// Every reachable tile was expanded without reaching the goal, or an
    /// endpoint is absent or blocked.
    Unreachable,
    /// The expansion ceiling was hit first; a route may still exist.
    Aborted { expanded: usize },
}

impl SearchOutcome {
    #[inline]
    pub fn is_found(&self) -> bool {
        matches!(self, Self::Found(_))
    }

    #[inline]
    pub fn path(&self) -> Option<&Path> {
        match self {
            Self::Found(p) => Some(p),
            _ => None,
        }
    }

    /// The route's tiles, or an empty vector when there is none.
    pub fn into_path(self) -> Vec<Point> {
        match self {
            Self::Found(p) => p.into_inner(),
            _ => Vec::new(),
        }
    }
}

/// Counters collected during one search.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SearchStats {
    /// Nodes taken off the open set and expanded.
    pub expanded: usize,
    /// Nodes created, the start node included.
    pub discovered: usize,
    /// Neighbour lookups that fell off the known map.
    pub rejected_absent: usize,
    /// Neighbour lookups that hit a blocked tile.
    pub rejected_blocked: usize,
    /// Open entries dropped on pop because a cheaper node for the same tile
    /// was expanded first.
    pub superseded: usize,
}

// ---------------------------------------------------------------------------
// PathFinder
// ---------------------------------------------------------------------------

/// Route search with fixed [`SearchOptions`].
///
/// A `PathFinder` holds no per-search state: each call builds its own open
/// set, closed set and node arena and drops them on return, so one finder
/// may serve concurrent searches on a shared grid.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PathFinder {
    options: SearchOptions,
}

impl PathFinder {
    pub fn new(options: SearchOptions) -> Self {
        Self { options }
    }

    #[inline]
    pub fn options(&self) -> &SearchOptions {
        &self.options
    }

    /// Search for a route from `start` to `goal`.
    pub fn search(&self, grid: &TileGrid, start: Point, goal: Point) -> SearchOutcome {
        self.search_with_stats(grid, start, goal).0
    }

    /// [`search`](Self::search), also returning the search counters.
    pub fn search_with_stats(
        &self,
        grid: &TileGrid,
        start: Point,
        goal: Point,
    ) -> (SearchOutcome, SearchStats) {
        let mut stats = SearchStats::default();
        let outcome = self.run(grid, start, goal, &mut stats);
        log::debug!(
            "search {start} -> {goal}: {} after {} expansions ({} nodes)",
            match &outcome {
                SearchOutcome::Found(_) => "found",
                SearchOutcome::Unreachable => "unreachable",
                SearchOutcome::Aborted { .. } => "aborted",
            },
            stats.expanded,
            stats.discovered,
        );
        (outcome, stats)
    }

    fn run(
        &self,
        grid: &TileGrid,
        start: Point,
        goal: Point,
        stats: &mut SearchStats,
    ) -> SearchOutcome {
        for (what, p) in [("start", start), ("goal", goal)] {
            let state = grid.state(p);
            if state != TileState::Traversable {
                log::debug!("{what} {p} is {state:?}");
                return SearchOutcome::Unreachable;
            }
        }

        let heuristic = self.options.effective_heuristic();
        let mut arena = NodeArena::default();
        let mut open = OpenSet::default();
        let mut closed: HashSet<Point> = HashSet::new();

        let root = SearchNode::new(start, None, 0, heuristic.estimate(start, goal));
        let root_id = arena.push(root);
        open.push(root_id, &root);

        while let Some(current_id) = open.pop(&arena) {
            let current = *arena.get(current_id);

            // Superseded entry for a tile that is already final.
            if !closed.insert(current.pos) {
                stats.superseded += 1;
                continue;
            }

            if current.pos == goal {
                stats.discovered = arena.len();
                return SearchOutcome::Found(Path(arena.backtrack(current_id)));
            }

            if let Some(limit) = self.options.max_expansions {
                if stats.expanded >= limit {
                    stats.discovered = arena.len();
                    log::debug!("search {start} -> {goal} hit expansion limit {limit}");
                    return SearchOutcome::Aborted {
                        expanded: stats.expanded,
                    };
                }
            }
            stats.expanded += 1;
            log::trace!(
                "expand {} g={} h={} f={}",
                current.pos,
                current.g,
                current.h,
                current.f
            );

            for &offset in self.options.movement.offsets() {
                // Steps past the i32 range have no tile.
                let Some(next) = current.pos.checked_add(offset) else {
                    stats.rejected_absent += 1;
                    continue;
                };
                match grid.state(next) {
                    TileState::Absent => {
                        stats.rejected_absent += 1;
                        continue;
                    }
                    TileState::Blocked => {
                        stats.rejected_blocked += 1;
                        continue;
                    }
                    TileState::Traversable => {}
                }
                if closed.contains(&next) {
                    continue;
                }
                let g = current.g.saturating_add(STEP_COST);
                if !open.admits(next, g) {
                    continue;
                }
                let node = SearchNode::new(next, Some(current_id), g, heuristic.estimate(next, goal));
                let id = arena.push(node);
                open.push(id, &node);
            }
        }

        stats.discovered = arena.len();
        SearchOutcome::Unreachable
    }
}

/// Shortest route from `start` to `goal`, endpoints included.
///
/// Returns `[start]` when `start == goal` and the tile is walkable, and an
/// empty vector when no route exists.
pub fn find_path(grid: &TileGrid, start: Point, goal: Point, allow_diagonal: bool) -> Vec<Point> {
    PathFinder::new(SearchOptions::default().with_diagonal(allow_diagonal))
        .search(grid, start, goal)
        .into_path()
}


#[cfg(all(test, feature = "serde"))]
mod serde_tests {
    use super::*;

    #[test]
    fn options_round_trip() {
        let o = SearchOptions::default()
            .with_diagonal(true)
            .with_heuristic(Heuristic::SquaredEuclidean)
            .with_max_expansions(64);
        let json = serde_json::to_string(&o).unwrap();
        let back: SearchOptions = serde_json::from_str(&json).unwrap();
        assert_eq!(o, back);
    }

    #[test]
    fn path_serializes_as_list() {
        let path = Path::from(vec![Point::new(0, 0), Point::new(0, 1)]);
        let json = serde_json::to_string(&path).unwrap();
        assert_eq!(json, r#"[{"x":0,"y":0},{"x":0,"y":1}]"#);
        let back: Path = serde_json::from_str(&json).unwrap();
        assert_eq!(path, back);
    }
}
