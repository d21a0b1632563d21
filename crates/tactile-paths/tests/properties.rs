//! Property tests for route search on random obstacle fields.
//!
//! Run more cases with: PROPTEST_CASES=10000 cargo test -p tactile-paths --test properties

use std::collections::{HashMap, VecDeque};

use proptest::prelude::*;

use tactile_core::{Point, Range};
use tactile_paths::{Movement, Path, Tile, TileGrid, find_path, manhattan};

/// A `w` × `h` field, its walkable flags, and two points inside it.
fn field() -> impl Strategy<Value = (TileGrid, Point, Point)> {
    (1i32..10, 1i32..10)
        .prop_flat_map(|(w, h)| {
            (
                Just(Range::new(0, 0, w, h)),
                prop::collection::vec(prop::bool::weighted(0.7), (w * h) as usize),
                (0..w, 0..h),
                (0..w, 0..h),
            )
        })
        .prop_map(|(rng, walkable, s, g)| {
            let grid = TileGrid::build(rng.iter().zip(walkable).map(|(p, t)| Tile::new(p, t)));
            (grid, Point::from(s), Point::from(g))
        })
}

/// Reference breadth-first distances from `src` under `movement`.
fn bfs(grid: &TileGrid, src: Point, movement: Movement) -> HashMap<Point, usize> {
    let mut dist = HashMap::new();
    if !grid.is_traversable(src) {
        return dist;
    }
    dist.insert(src, 0);
    let mut queue = VecDeque::from([src]);
    while let Some(p) = queue.pop_front() {
        let d = dist[&p];
        for &off in movement.offsets() {
            let n = p + off;
            if grid.is_traversable(n) && !dist.contains_key(&n) {
                dist.insert(n, d + 1);
                queue.push_back(n);
            }
        }
    }
    dist
}

proptest! {
    #[test]
    fn start_equals_goal_is_single_tile((grid, s, _) in field(), diag in any::<bool>()) {
        let path = find_path(&grid, s, s, diag);
        if grid.is_traversable(s) {
            prop_assert_eq!(path, vec![s]);
        } else {
            prop_assert!(path.is_empty());
        }
    }

    #[test]
    fn routes_are_walkable((grid, s, g) in field(), diag in any::<bool>()) {
        let path = find_path(&grid, s, g, diag);
        if !path.is_empty() {
            prop_assert_eq!(path.first(), Some(&s));
            prop_assert_eq!(path.last(), Some(&g));
            prop_assert!(Path::from(path).is_walkable(&grid, Movement::from_diagonal(diag)));
        }
    }

    #[test]
    fn found_exactly_when_reachable((grid, s, g) in field(), diag in any::<bool>()) {
        let reachable = bfs(&grid, s, Movement::from_diagonal(diag)).contains_key(&g);
        prop_assert_eq!(!find_path(&grid, s, g, diag).is_empty(), reachable);
    }

    #[test]
    fn cardinal_routes_are_shortest((grid, s, g) in field()) {
        let path = find_path(&grid, s, g, false);
        if let Some(&d) = bfs(&grid, s, Movement::Cardinal).get(&g) {
            prop_assert_eq!(path.len(), d + 1);
        }
    }

    #[test]
    fn open_field_length_is_manhattan_plus_one(
        w in 1i32..16, h in 1i32..16,
        sx in 0i32..16, sy in 0i32..16, gx in 0i32..16, gy in 0i32..16,
    ) {
        let grid = TileGrid::filled(Range::new(0, 0, w, h), true);
        let s = Point::new(sx % w, sy % h);
        let g = Point::new(gx % w, gy % h);
        let path = find_path(&grid, s, g, false);
        prop_assert_eq!(path.len() as i32, manhattan(s, g) + 1);
    }

    #[test]
    fn search_is_repeatable((grid, s, g) in field(), diag in any::<bool>()) {
        prop_assert_eq!(find_path(&grid, s, g, diag), find_path(&grid, s, g, diag));
    }

    #[test]
    fn goal_off_the_map_is_unreachable((grid, s, _) in field(), diag in any::<bool>()) {
        let off = Point::new(-1, -1);
        prop_assert!(find_path(&grid, s, off, diag).is_empty());
        prop_assert!(find_path(&grid, off, s, diag).is_empty());
    }
}
