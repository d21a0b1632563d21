//! ASCII map text.
//!
//! One text row per map row, top row first:
//!
//! | Char | Meaning |
//! |---|---|
//! | `.` | walkable tile |
//! | `#` | blocked tile |
//! | ` ` | no tile (off the map) |
//! | `S` | walkable tile, route start |
//! | `G` | walkable tile, route goal |
//!
//! [`render`] writes the same alphabet back, with `*` marking a route.

use std::fmt;
use std::str::FromStr;

use tactile_core::Point;

use crate::grid::{Tile, TileGrid, TileState};

/// A grid parsed from text, together with its optional start/goal markers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedMap {
    pub grid: TileGrid,
    pub start: Option<Point>,
    pub goal: Option<Point>,
}

impl ParsedMap {
    /// Parse map text.
    ///
    /// Blank lines around the map are dropped; every remaining line must have
    /// the same width. `\r\n` line endings are accepted.
    pub fn parse(s: &str) -> Result<Self, MapError> {
        let s = s.trim_matches(|c| c == '\n' || c == '\r');
        let mut tiles = Vec::new();
        let mut start = None;
        let mut goal = None;
        let mut width: Option<usize> = None;

        for (y, line) in s.lines().enumerate() {
            let w = line.chars().count();
            match width {
                Some(expected) if expected != w => {
                    return Err(MapError::InconsistentSize {
                        line: y,
                        expected,
                        actual: w,
                    });
                }
                _ => width = Some(w),
            }
            for (x, ch) in line.chars().enumerate() {
                let pos = Point::new(x as i32, y as i32);
                match ch {
                    '.' => tiles.push(Tile::open(pos)),
                    '#' => tiles.push(Tile::blocked(pos)),
                    ' ' => {}
                    'S' | 'G' => {
                        let slot = if ch == 'S' { &mut start } else { &mut goal };
                        if slot.is_some() {
                            return Err(MapError::DuplicateMarker { ch, pos });
                        }
                        *slot = Some(pos);
                        tiles.push(Tile::open(pos));
                    }
                    _ => return Err(MapError::InvalidRune { ch, pos }),
                }
            }
        }

        Ok(Self {
            grid: TileGrid::build(tiles),
            start,
            goal,
        })
    }
}

impl FromStr for ParsedMap {
    type Err = MapError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

/// Parses map text, discarding start/goal markers (they stay walkable).
impl FromStr for TileGrid {
    type Err = MapError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ParsedMap::parse(s).map(|m| m.grid)
    }
}

/// Draw `grid` as map text over its bounding box, marking `path` with `S`
/// (first point), `G` (last point) and `*` (the rest).
///
/// Returns an empty string for an empty grid.
pub fn render(grid: &TileGrid, path: &[Point]) -> String {
    let Some((lo, hi)) = grid.corners() else {
        return String::new();
    };
    let mut out = String::new();
    let cells = (lo.y..=hi.y).flat_map(|y| (lo.x..=hi.x).map(move |x| Point::new(x, y)));
    for p in cells {
        if p.x == lo.x && p.y != lo.y {
            out.push('\n');
        }
        let ch = if path.first() == Some(&p) {
            'S'
        } else if path.last() == Some(&p) {
            'G'
        } else if path.contains(&p) {
            '*'
        } else {
            match grid.state(p) {
                TileState::Absent => ' ',
                TileState::Blocked => '#',
                TileState::Traversable => '.',
            }
        };
        out.push(ch);
    }
    out
}

/// Errors raised while reading map data.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MapError {
    /// A text row is wider or narrower than the first one.
    InconsistentSize {
        line: usize,
        expected: usize,
        actual: usize,
    },
    /// A character outside the map alphabet.
    InvalidRune { ch: char, pos: Point },
    /// `S` or `G` appears more than once.
    DuplicateMarker { ch: char, pos: Point },
    /// A layer block's cell list does not match its bounds.
    BlockSize { expected: usize, actual: usize },
}

impl fmt::Display for MapError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InconsistentSize {
                line,
                expected,
                actual,
            } => write!(
                f,
                "map: line {line} has width {actual}, expected {expected}"
            ),
            Self::InvalidRune { ch, pos } => {
                write!(f, "map contains invalid rune \u{201c}{ch}\u{201d} at {pos}")
            }
            Self::DuplicateMarker { ch, pos } => {
                write!(f, "map: second \u{201c}{ch}\u{201d} marker at {pos}")
            }
            Self::BlockSize { expected, actual } => write!(
                f,
                "layer block holds {actual} cells, bounds need {expected}"
            ),
        }
    }
}

impl std::error::Error for MapError {}
