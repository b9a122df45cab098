//! The [`Cell`] type: one grid position with its search scratch state.

use crate::geom::Point;

/// What occupies a cell. Exactly one `Start` and one `End` exist per grid.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum CellKind {
    #[default]
    Empty,
    Wall,
    Start,
    End,
}

impl CellKind {
    /// Whether a search may step onto this cell.
    #[inline]
    pub const fn is_passable(self) -> bool {
        !matches!(self, CellKind::Wall)
    }
}

/// Search progress marker, written only by the search engine.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Visit {
    #[default]
    Unvisited,
    /// Discovered, waiting in the frontier.
    Open,
    /// Selected and expanded.
    Closed,
    /// Part of the final path.
    Path,
}

/// One grid position.
///
/// `g`, `h`, `f` and `d` are `f64::INFINITY` while unset. `came_from` refers
/// to the predecessor by coordinate and never owns it.
///
/// The public fields are scratch state written by the search engine. A
/// search resets them before its first step and never reads stale values.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Cell {
    pos: Point,
    kind: CellKind,
    pub visit: Visit,
    /// Best known cost from Start (A*).
    pub g: f64,
    /// Heuristic estimate to End (A*).
    pub h: f64,
    /// `g + h` (A*).
    pub f: f64,
    /// Uniform-cost distance from Start (Dijkstra).
    pub d: f64,
    pub came_from: Option<Point>,
}

impl Cell {
    /// A fresh empty cell at `pos`.
    #[inline]
    pub const fn new(pos: Point) -> Self {
        Self {
            pos,
            kind: CellKind::Empty,
            visit: Visit::Unvisited,
            g: f64::INFINITY,
            h: f64::INFINITY,
            f: f64::INFINITY,
            d: f64::INFINITY,
            came_from: None,
        }
    }

    /// The cell's coordinate; fixed for its lifetime.
    #[inline]
    pub const fn pos(&self) -> Point {
        self.pos
    }

    /// What occupies the cell. Changed only through [`Grid`](crate::Grid)
    /// mutations so the Start/End invariants hold.
    #[inline]
    pub const fn kind(&self) -> CellKind {
        self.kind
    }

    /// Set the kind (builder).
    #[inline]
    pub(crate) const fn with_kind(mut self, kind: CellKind) -> Self {
        self.kind = kind;
        self
    }

    #[inline]
    pub(crate) fn set_kind(&mut self, kind: CellKind) {
        self.kind = kind;
    }

    /// Reset `g`, `h`, `f`, `d` to unset and forget the predecessor.
    #[inline]
    pub fn reset_search(&mut self) {
        self.g = f64::INFINITY;
        self.h = f64::INFINITY;
        self.f = f64::INFINITY;
        self.d = f64::INFINITY;
        self.came_from = None;
    }
}
