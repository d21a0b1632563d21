//! Host side of the route-finding demo: argument handling, map loading and
//! the printed report.

use std::fmt;
use std::path::PathBuf;

use rand::rngs::StdRng;
use rand::{RngExt, SeedableRng};
use tactile_core::{Point, Range};
use tactile_paths::{
    Heuristic, MapError, ParsedMap, PathFinder, SearchOptions, SearchOutcome, Tile, TileGrid,
    render,
};

/// Map used when neither a file nor `--random` is given.
pub const DEFAULT_MAP: &str = "
S.....#.......
.####.#.#####.
.#....#.#...#.
.#.####.#.#.#.
.#......#.#..G
.########.####
..............
";

/// Width and height of `--random` maps.
pub const RANDOM_SIZE: (i32, i32) = (24, 12);

/// Share of blocked tiles in `--random` maps.
pub const RANDOM_BLOCKED: f64 = 0.28;

/// Parsed command line.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DemoArgs {
    pub map_file: Option<PathBuf>,
    pub random_seed: Option<u64>,
    pub options: SearchOptions,
}

impl DemoArgs {
    /// Parse arguments, program name excluded.
    pub fn parse(args: impl IntoIterator<Item = String>) -> Result<Self, DemoError> {
        let mut out = Self::default();
        let mut args = args.into_iter();
        while let Some(arg) = args.next() {
            match arg.as_str() {
                "--diagonal" => out.options = out.options.with_diagonal(true),
                "--squared" => {
                    out.options = out.options.with_heuristic(Heuristic::SquaredEuclidean)
                }
                "--max-expansions" => {
                    let limit = number(&mut args, "--max-expansions")?;
                    out.options = out.options.with_max_expansions(limit);
                }
                "--random" => out.random_seed = Some(number(&mut args, "--random")?),
                flag if flag.starts_with("--") => {
                    return Err(DemoError::UnknownFlag(flag.to_string()));
                }
                _ => out.map_file = Some(PathBuf::from(&arg)),
            }
        }
        Ok(out)
    }
}

fn number<T: std::str::FromStr>(
    args: &mut impl Iterator<Item = String>,
    flag: &'static str,
) -> Result<T, DemoError> {
    let value = args.next().ok_or(DemoError::MissingValue(flag))?;
    value
        .parse()
        .map_err(|_| DemoError::InvalidNumber { flag, value })
}

/// A random obstacle field with `S` in the top-left and `G` in the
/// bottom-right corner. The same seed always yields the same map.
pub fn random_field(seed: u64, width: i32, height: i32, blocked: f64) -> ParsedMap {
    let mut rng = StdRng::seed_from_u64(seed);
    let start = Point::ZERO;
    let goal = Point::new(width - 1, height - 1);
    let tiles: Vec<Tile> = Range::new(0, 0, width, height)
        .iter()
        .map(|p| {
            let open = p == start || p == goal || !rng.random_bool(blocked);
            Tile::new(p, open)
        })
        .collect();
    ParsedMap {
        grid: TileGrid::build(tiles),
        start: Some(start),
        goal: Some(goal),
    }
}

/// Load the map `args` asks for.
pub fn load_map(args: &DemoArgs) -> Result<ParsedMap, DemoError> {
    if let Some(seed) = args.random_seed {
        let (w, h) = RANDOM_SIZE;
        log::info!("generating {w}x{h} map from seed {seed}");
        return Ok(random_field(seed, w, h, RANDOM_BLOCKED));
    }
    match &args.map_file {
        Some(path) => {
            let text = std::fs::read_to_string(path)?;
            Ok(ParsedMap::parse(&text)?)
        }
        None => Ok(ParsedMap::parse(DEFAULT_MAP)?),
    }
}

/// Search the map's `S` → `G` route and describe the result.
pub fn report(map: &ParsedMap, options: SearchOptions) -> Result<String, DemoError> {
    let start = map.start.ok_or(DemoError::MissingMarker('S'))?;
    let goal = map.goal.ok_or(DemoError::MissingMarker('G'))?;
    let (outcome, stats) = PathFinder::new(options).search_with_stats(&map.grid, start, goal);

    let (drawing, summary) = match &outcome {
        SearchOutcome::Found(path) => (
            render(&map.grid, path.points()),
            format!("route: {path}\nsteps: {}", path.steps()),
        ),
        SearchOutcome::Unreachable => (render(&map.grid, &[]), "no route".to_string()),
        SearchOutcome::Aborted { expanded } => (
            render(&map.grid, &[]),
            format!("search aborted after {expanded} expansions"),
        ),
    };
    Ok(format!(
        "{drawing}\n\n{summary}\nexpanded {} of {} discovered nodes",
        stats.expanded, stats.discovered
    ))
}

/// Load, search and describe, as the `pathdemo` binary does.
pub fn run(args: &DemoArgs) -> Result<String, DemoError> {
    let map = load_map(args)?;
    report(&map, args.options)
}

/// Everything that can stop the demo.
#[derive(Debug)]
pub enum DemoError {
    UnknownFlag(String),
    MissingValue(&'static str),
    InvalidNumber { flag: &'static str, value: String },
    MissingMarker(char),
    Map(MapError),
    Io(std::io::Error),
}

impl fmt::Display for DemoError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnknownFlag(flag) => write!(f, "unknown flag {flag}"),
            Self::MissingValue(flag) => write!(f, "{flag} needs a value"),
            Self::InvalidNumber { flag, value } => write!(f, "{flag}: not a number: {value}"),
            Self::MissingMarker(ch) => write!(f, "map has no \u{201c}{ch}\u{201d} marker"),
            Self::Map(e) => write!(f, "{e}"),
            Self::Io(e) => write!(f, "cannot read map: {e}"),
        }
    }
}

impl std::error::Error for DemoError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Map(e) => Some(e),
            Self::Io(e) => Some(e),
            _ => None,
        }
    }
}

impl From<MapError> for DemoError {
    fn from(e: MapError) -> Self {
        Self::Map(e)
    }
}

impl From<std::io::Error> for DemoError {
    fn from(e: std::io::Error) -> Self {
        Self::Io(e)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tactile_paths::Movement;

    fn args(v: &[&str]) -> Result<DemoArgs, DemoError> {
        DemoArgs::parse(v.iter().map(|s| s.to_string()))
    }

    #[test]
    fn parse_flags() {
        let a = args(&["--diagonal", "--max-expansions", "50", "maps/a.txt"]).unwrap();
        assert_eq!(a.options.movement, Movement::Omni);
        assert_eq!(a.options.max_expansions, Some(50));
        assert_eq!(a.map_file, Some(PathBuf::from("maps/a.txt")));
        assert_eq!(a.random_seed, None);
    }

    #[test]
    fn parse_errors() {
        assert!(matches!(args(&["--bogus"]), Err(DemoError::UnknownFlag(_))));
        assert!(matches!(
            args(&["--random"]),
            Err(DemoError::MissingValue("--random"))
        ));
        assert!(matches!(
            args(&["--max-expansions", "many"]),
            Err(DemoError::InvalidNumber { .. })
        ));
    }

    #[test]
    fn default_map_has_route() {
        let text = run(&DemoArgs::default()).unwrap();
        assert!(text.contains("route: (0, 0), "));
        assert!(text.contains("steps: "));
    }

    #[test]
    fn default_map_aborts_under_tight_ceiling() {
        let a = args(&["--max-expansions", "2"]).unwrap();
        let text = run(&a).unwrap();
        assert!(text.contains("search aborted after 2 expansions"));
    }

    #[test]
    fn random_field_is_seeded() {
        let a = random_field(7, 10, 6, 0.3);
        let b = random_field(7, 10, 6, 0.3);
        assert_eq!(a, b);
        assert_eq!(a.grid.len(), 60);
        assert!(a.grid.is_traversable(Point::ZERO));
        assert!(a.grid.is_traversable(Point::new(9, 5)));
    }

    #[test]
    fn report_needs_markers() {
        let map = ParsedMap::parse("...").unwrap();
        let err = report(&map, SearchOptions::default()).unwrap_err();
        assert!(matches!(err, DemoError::MissingMarker('S')));
    }

    #[test]
    fn report_without_route() {
        let map = ParsedMap::parse("S#G").unwrap();
        let text = report(&map, SearchOptions::default()).unwrap();
        assert!(text.starts_with(".#."));
        assert!(text.contains("no route"));
    }

    #[test]
    fn missing_file_is_io_error() {
        let a = args(&["/nonexistent/tactile/map.txt"]).unwrap();
        assert!(matches!(run(&a), Err(DemoError::Io(_))));
    }
}
