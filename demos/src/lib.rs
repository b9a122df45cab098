//! Shared pieces of the headless gridpath demo: configuration loading and
//! ASCII rendering of a [`Grid`].
//!
//! The demo carves a maze, then animates a search over it in the terminal.

use std::fs;
use std::path::Path as FsPath;

use gridpath_core::{CellKind, Grid, GridError, Speed, Visit};
use gridpath_maze::Difficulty;
use gridpath_search::Algorithm;
use serde::Deserialize;

pub const DEFAULT_ROWS: i32 = 21;
pub const DEFAULT_COLS: i32 = 61;

// ---------------------------------------------------------------------------
// DemoConfig
// ---------------------------------------------------------------------------

/// Demo settings, read from an optional JSON file. Missing fields take their
/// default values.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct DemoConfig {
    pub rows: i32,
    pub cols: i32,
    pub algorithm: Algorithm,
    pub speed: Speed,
    pub difficulty: Difficulty,
    /// Seed for the maze; a random one is drawn when absent.
    pub seed: Option<u64>,
    /// Redraw the grid after every step instead of only at the end.
    pub animate: bool,
    /// Cancel the search after this many steps.
    pub max_steps: Option<usize>,
}

impl Default for DemoConfig {
    fn default() -> Self {
        Self {
            rows: DEFAULT_ROWS,
            cols: DEFAULT_COLS,
            algorithm: Algorithm::default(),
            speed: Speed::default(),
            difficulty: Difficulty::default(),
            seed: None,
            animate: false,
            max_steps: None,
        }
    }
}

impl DemoConfig {
    /// Parse a config from JSON text.
    pub fn from_json(text: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(text)
    }

    /// Load the config at `path`, or the defaults when no path is given.
    pub fn load(path: Option<&FsPath>) -> Result<Self, Box<dyn std::error::Error>> {
        let Some(path) = path else {
            return Ok(Self::default());
        };
        let text = fs::read_to_string(path)?;
        let config = Self::from_json(&text)?;
        log::info!("loaded config from {}", path.display());
        Ok(config)
    }

    /// Build the empty grid this config describes.
    pub fn grid(&self) -> Result<Grid, GridError> {
        Grid::with_default_endpoints(self.rows, self.cols)
    }
}

// ---------------------------------------------------------------------------
// Rendering
// ---------------------------------------------------------------------------

/// Glyph for one cell. Kinds other than Empty take precedence over visit
/// markers.
pub fn glyph(kind: CellKind, visit: Visit) -> char {
    match (kind, visit) {
        (CellKind::Wall, _) => '#',
        (CellKind::Start, _) => 'S',
        (CellKind::End, _) => 'E',
        (CellKind::Empty, Visit::Path) => '*',
        (CellKind::Empty, Visit::Closed) => '.',
        (CellKind::Empty, Visit::Open) => 'o',
        (CellKind::Empty, Visit::Unvisited) => ' ',
    }
}

/// Render the whole grid, one text line per row, framed by a border.
pub fn render(grid: &Grid) -> String {
    let cols = grid.cols() as usize;
    let border: String = std::iter::once('+')
        .chain(std::iter::repeat_n('-', cols))
        .chain(std::iter::once('+'))
        .collect();
    let mut out = String::with_capacity((cols + 3) * (grid.rows() as usize + 2));
    out.push_str(&border);
    out.push('\n');
    for row in grid.iter().collect::<Vec<_>>().chunks(cols) {
        out.push('|');
        out.extend(row.iter().map(|c| glyph(c.kind(), c.visit)));
        out.push_str("|\n");
    }
    out.push_str(&border);
    out.push('\n');
    out
}
