//! The [`TileGrid`] traversability lookup and the [`TileLayer`]s it is
//! usually flattened from.

use std::collections::HashMap;

use tactile_core::{Point, Range};

use crate::map::MapError;

/// One tile record: a position and whether units may stand on it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Tile {
    pub pos: Point,
    pub traversable: bool,
}

impl Tile {
    #[inline]
    pub const fn new(pos: Point, traversable: bool) -> Self {
        Self { pos, traversable }
    }

    /// A traversable tile.
    #[inline]
    pub const fn open(pos: Point) -> Self {
        Self::new(pos, true)
    }

    /// A tile that exists but cannot be entered.
    #[inline]
    pub const fn blocked(pos: Point) -> Self {
        Self::new(pos, false)
    }
}

/// What a [`TileGrid`] knows about a coordinate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TileState {
    /// No tile at this coordinate: off the known map.
    Absent,
    /// A tile exists but cannot be entered.
    Blocked,
    /// A tile units may stand on.
    Traversable,
}

// ---------------------------------------------------------------------------
// TileGrid
// ---------------------------------------------------------------------------

/// Immutable traversability snapshot of a map.
///
/// Built once from tile records; when several records share a coordinate the
/// last one wins. Lookups are O(1) on average. The grid never changes after
/// construction, so any number of searches may read it at once.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TileGrid {
    tiles: HashMap<Point, bool>,
    /// Inclusive lowest and highest corners of the known tiles.
    corners: Option<(Point, Point)>,
}

impl TileGrid {
    /// Build a grid from tile records. Later records overwrite earlier ones
    /// at the same coordinate.
    pub fn build(source: impl IntoIterator<Item = Tile>) -> Self {
        let mut tiles = HashMap::new();
        let mut corners: Option<(Point, Point)> = None;
        for tile in source {
            if let Some(prev) = tiles.insert(tile.pos, tile.traversable) {
                if prev != tile.traversable {
                    log::debug!(
                        "tile {} redefined: traversable {} -> {}",
                        tile.pos,
                        prev,
                        tile.traversable
                    );
                }
            } else {
                let p = tile.pos;
                corners = Some(match corners {
                    None => (p, p),
                    Some((lo, hi)) => (
                        Point::new(lo.x.min(p.x), lo.y.min(p.y)),
                        Point::new(hi.x.max(p.x), hi.y.max(p.y)),
                    ),
                });
            }
        }
        Self { tiles, corners }
    }

    /// Every tile of `rng` present with the same traversability.
    pub fn filled(rng: Range, traversable: bool) -> Self {
        Self::build(rng.iter().map(|p| Tile::new(p, traversable)))
    }

    /// Flatten layers bottom to top. A tile painted by a later layer replaces
    /// whatever an earlier layer put at the same coordinate.
    pub fn from_layers<'a>(layers: impl IntoIterator<Item = &'a TileLayer>) -> Self {
        Self::build(layers.into_iter().flat_map(TileLayer::tiles))
    }

    /// Three-way lookup distinguishing absent from blocked tiles.
    #[inline]
    pub fn state(&self, p: Point) -> TileState {
        match self.tiles.get(&p) {
            None => TileState::Absent,
            Some(false) => TileState::Blocked,
            Some(true) => TileState::Traversable,
        }
    }

    #[inline]
    pub fn is_traversable(&self, p: Point) -> bool {
        self.tiles.get(&p).copied().unwrap_or(false)
    }

    /// Whether a tile of either kind exists at `p`.
    #[inline]
    pub fn contains(&self, p: Point) -> bool {
        self.tiles.contains_key(&p)
    }

    #[inline]
    pub fn get(&self, p: Point) -> Option<Tile> {
        self.tiles.get(&p).map(|&t| Tile::new(p, t))
    }

    /// Number of known tiles.
    #[inline]
    pub fn len(&self) -> usize {
        self.tiles.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.tiles.is_empty()
    }

    /// Smallest range holding every known tile, `None` for an empty grid.
    ///
    /// The exclusive edge saturates, so tiles in the `i32::MAX` column or row
    /// are not covered; [`corners`](Self::corners) is exact.
    #[inline]
    pub fn bounds(&self) -> Option<Range> {
        self.corners.map(|(lo, hi)| Range::inclusive(lo, hi))
    }

    /// Inclusive lowest and highest corners of the known tiles.
    #[inline]
    pub fn corners(&self) -> Option<(Point, Point)> {
        self.corners
    }

    /// All tiles in row-major order.
    pub fn tiles(&self) -> Vec<Tile> {
        let mut out: Vec<Tile> = self.tiles.iter().map(|(&p, &t)| Tile::new(p, t)).collect();
        out.sort_by_key(|t| t.pos);
        out
    }

    /// Number of traversable tiles.
    pub fn traversable_count(&self) -> usize {
        self.tiles.values().filter(|&&t| t).count()
    }
}

impl FromIterator<Tile> for TileGrid {
    fn from_iter<I: IntoIterator<Item = Tile>>(iter: I) -> Self {
        Self::build(iter)
    }
}

#[cfg(feature = "serde")]
impl serde::Serialize for TileGrid {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serde::Serialize::serialize(&self.tiles(), serializer)
    }
}

#[cfg(feature = "serde")]
impl<'de> serde::Deserialize<'de> for TileGrid {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let tiles = <Vec<Tile> as serde::Deserialize>::deserialize(deserializer)?;
        Ok(TileGrid::build(tiles))
    }
}

// ---------------------------------------------------------------------------
// TileLayer
// ---------------------------------------------------------------------------

/// One painted layer of a tilemap.
///
/// Maps are drawn as a stack of layers (ground, walls, water, ...). Every
/// cell a layer paints becomes a tile; cells of a `blocking` layer are
/// impassable, cells of any other layer are walkable.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TileLayer {
    pub name: String,
    pub blocking: bool,
    pub cells: Vec<Point>,
}

impl TileLayer {
    /// An empty layer.
    pub fn new(name: impl Into<String>, blocking: bool) -> Self {
        Self {
            name: name.into(),
            blocking,
            cells: Vec::new(),
        }
    }

    /// Read a layer from its cell block.
    ///
    /// `painted` lists one flag per cell of `bounds` in row-major order
    /// (`x + y * width` relative to `bounds.min`); only painted cells become
    /// tiles.
    pub fn from_block(
        name: impl Into<String>,
        blocking: bool,
        bounds: Range,
        painted: &[bool],
    ) -> Result<Self, MapError> {
        if painted.len() != bounds.len() {
            return Err(MapError::BlockSize {
                expected: bounds.len(),
                actual: painted.len(),
            });
        }
        let cells = bounds
            .iter()
            .zip(painted)
            .filter_map(|(p, &on)| on.then_some(p))
            .collect();
        Ok(Self {
            name: name.into(),
            blocking,
            cells,
        })
    }

    /// Paint one more cell.
    pub fn paint(&mut self, p: Point) -> &mut Self {
        self.cells.push(p);
        self
    }

    /// Paint every cell of `rng`.
    pub fn paint_range(&mut self, rng: Range) -> &mut Self {
        self.cells.extend(rng);
        self
    }

    /// The tile records this layer contributes.
    pub fn tiles(&self) -> impl Iterator<Item = Tile> + '_ {
        let traversable = !self.blocking;
        self.cells.iter().map(move |&p| Tile::new(p, traversable))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_source_gives_empty_grid() {
        let g = TileGrid::build(std::iter::empty());
        assert!(g.is_empty());
        assert_eq!(g.bounds(), None);
        assert_eq!(g.state(Point::ZERO), TileState::Absent);
    }

    #[test]
    fn absent_and_blocked_differ() {
        let g = TileGrid::build([Tile::open(Point::new(0, 0)), Tile::blocked(Point::new(1, 0))]);
        assert_eq!(g.state(Point::new(0, 0)), TileState::Traversable);
        assert_eq!(g.state(Point::new(1, 0)), TileState::Blocked);
        assert_eq!(g.state(Point::new(2, 0)), TileState::Absent);
        assert!(g.contains(Point::new(1, 0)));
        assert!(!g.is_traversable(Point::new(1, 0)));
        assert!(!g.contains(Point::new(2, 0)));
        assert!(!g.is_traversable(Point::new(2, 0)));
    }

    #[test]
    fn last_write_wins() {
        let p = Point::new(3, 3);
        let g = TileGrid::build([Tile::open(p), Tile::blocked(p)]);
        assert_eq!(g.len(), 1);
        assert_eq!(g.state(p), TileState::Blocked);

        let g = TileGrid::build([Tile::blocked(p), Tile::open(p), Tile::open(p)]);
        assert_eq!(g.len(), 1);
        assert_eq!(g.get(p), Some(Tile::open(p)));
    }

    #[test]
    fn bounds_cover_all_tiles() {
        let g = TileGrid::build([Tile::open(Point::new(-2, 5)), Tile::blocked(Point::new(3, -1))]);
        assert_eq!(g.bounds(), Some(Range::new(-2, -1, 4, 6)));
    }

    #[test]
    fn tiles_at_coordinate_limits() {
        let lo = Point::new(i32::MIN, i32::MIN);
        let hi = Point::new(i32::MAX, i32::MAX);
        let g = TileGrid::build([
            Tile::open(hi),
            Tile::blocked(lo),
            Tile::open(Point::new(i32::MAX, 0)),
        ]);
        assert_eq!(g.len(), 3);
        assert_eq!(g.state(hi), TileState::Traversable);
        assert_eq!(g.state(lo), TileState::Blocked);
        assert_eq!(g.corners(), Some((lo, hi)));
        assert_eq!(g.bounds(), Some(Range::new(i32::MIN, i32::MIN, i32::MAX, i32::MAX)));
    }

    #[test]
    fn filled_and_counts() {
        let g = TileGrid::filled(Range::new(0, 0, 5, 5), true);
        assert_eq!(g.len(), 25);
        assert_eq!(g.traversable_count(), 25);
        assert_eq!(g.bounds(), Some(Range::new(0, 0, 5, 5)));
    }

    #[test]
    fn tiles_sorted_row_major() {
        let g: TileGrid = [
            Tile::open(Point::new(1, 1)),
            Tile::open(Point::new(0, 1)),
            Tile::blocked(Point::new(4, 0)),
        ]
        .into_iter()
        .collect();
        let pos: Vec<_> = g.tiles().iter().map(|t| t.pos).collect();
        assert_eq!(pos, vec![Point::new(4, 0), Point::new(0, 1), Point::new(1, 1)]);
    }

    #[test]
    fn layers_flatten_in_order() {
        let mut ground = TileLayer::new("ground", false);
        ground.paint_range(Range::new(0, 0, 3, 1));
        let mut walls = TileLayer::new("walls", true);
        walls.paint(Point::new(1, 0));

        let g = TileGrid::from_layers([&ground, &walls]);
        assert_eq!(g.state(Point::new(0, 0)), TileState::Traversable);
        assert_eq!(g.state(Point::new(1, 0)), TileState::Blocked);
        assert_eq!(g.state(Point::new(2, 0)), TileState::Traversable);

        // Reversed order: the ground repaints the wall cell.
        let g = TileGrid::from_layers([&walls, &ground]);
        assert_eq!(g.state(Point::new(1, 0)), TileState::Traversable);
    }

    #[test]
    fn layer_from_block() {
        let bounds = Range::with_size(Point::new(-1, 2), 2, 2);
        let layer = TileLayer::from_block("water", true, bounds, &[true, false, false, true]).unwrap();
        assert_eq!(layer.cells, vec![Point::new(-1, 2), Point::new(0, 3)]);
        assert!(layer.tiles().all(|t| !t.traversable));
    }

    #[test]
    fn layer_from_block_size_mismatch() {
        let err = TileLayer::from_block("x", false, Range::new(0, 0, 2, 2), &[true]).unwrap_err();
        assert_eq!(err, MapError::BlockSize { expected: 4, actual: 1 });
    }
}

#[cfg(all(test, feature = "serde"))]
mod serde_tests {
    use super::*;

    #[test]
    fn grid_round_trip() {
        let g = TileGrid::build([Tile::open(Point::new(0, 0)), Tile::blocked(Point::new(0, 1))]);
        let json = serde_json::to_string(&g).unwrap();
        let back: TileGrid = serde_json::from_str(&json).unwrap();
        assert_eq!(g, back);
    }

    #[test]
    fn layer_round_trip() {
        let mut layer = TileLayer::new("walls", true);
        layer.paint(Point::new(2, 2));
        let json = serde_json::to_string(&layer).unwrap();
        let back: TileLayer = serde_json::from_str(&json).unwrap();
        assert_eq!(layer, back);
    }
}
