//! Tile grids and shortest-route search for tile-based strategy games.
//!
//! The host flattens its map into a [`TileGrid`] once per level load, then
//! asks a [`PathFinder`] for routes between tiles:
//!
//! ```
//! use tactile_core::Point;
//! use tactile_paths::{TileGrid, find_path};
//!
//! let grid: TileGrid = "\
//! .....
//! .###.
//! .....".parse().unwrap();
//! let path = find_path(&grid, Point::new(0, 1), Point::new(4, 1), false);
//! assert_eq!(path.len(), 7);
//! ```
//!
//! | Item | Purpose |
//! |---|---|
//! | [`TileGrid`], [`TileLayer`] | immutable traversability lookup built from tile records or layers |
//! | [`ParsedMap`], [`render`] | ASCII map text in and out |
//! | [`Heuristic`], [`Movement`] | cost estimate and neighbour offsets |
//! | [`PathFinder`], [`SearchOptions`] | best-first search with an optional expansion ceiling |
//!
//! A failed search is not an error: [`find_path`] returns an empty route and
//! [`PathFinder::search`] reports [`SearchOutcome::Unreachable`] or
//! [`SearchOutcome::Aborted`].

mod distance;
mod grid;
mod map;
mod neighbors;
mod node;
mod pathfinder;

pub use distance::{Heuristic, chebyshev, manhattan, squared_euclidean};
pub use grid::{Tile, TileGrid, TileLayer, TileState};
pub use map::{MapError, ParsedMap, render};
pub use neighbors::Movement;
pub use pathfinder::{Path, PathFinder, SearchOptions, SearchOutcome, SearchStats, find_path};
