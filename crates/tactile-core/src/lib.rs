//! **tactile-core** — shared tile-grid primitives.
//!
//! Every other tactile crate speaks in terms of [`Point`] (a tile coordinate)
//! and [`Range`] (a half-open block of tiles).

pub mod geom;

pub use geom::{Point, Range, RangeIter};
