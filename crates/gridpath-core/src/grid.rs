//! The [`Grid`] type: a fixed-shape 2D array of [`Cell`]s with a Start and
//! an End.
//!
//! All mutations that change a cell's [`CellKind`] go through the grid so that
//! exactly one Start and one End exist at all times. Mutations aimed at a cell
//! that cannot take them are silent no-ops reported as `Ok(false)`; points
//! outside the grid are reported as [`GridError::OutOfBounds`].

use std::collections::VecDeque;

use crate::cell::{Cell, CellKind, Visit};
use crate::error::GridError;
use crate::geom::{Point, Range};

/// Columns kept between each endpoint and its side wall by
/// [`Grid::with_default_endpoints`].
const DEFAULT_ENDPOINT_INSET: i32 = 3;

/// Most wall events kept between two [`Grid::drain_events`] calls. Older
/// events are dropped first.
pub const EVENT_LOG_CAPACITY: usize = 4096;

// ---------------------------------------------------------------------------
// GridEvent
// ---------------------------------------------------------------------------

/// A wall change, recorded so a renderer can replay placement effects.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum GridEvent {
    WallPlaced(Point),
    WallRemoved(Point),
}

// ---------------------------------------------------------------------------
// Grid
// ---------------------------------------------------------------------------

/// A `rows × cols` grid of [`Cell`]s.
#[derive(Debug, Clone)]
pub struct Grid {
    cells: Vec<Cell>,
    bounds: Range,
    start: Point,
    end: Point,
    events: VecDeque<(u64, GridEvent)>,
    seq: u64,
}

impl Grid {
    /// Create a grid with every cell empty except `start` and `end`.
    pub fn new(rows: i32, cols: i32, start: Point, end: Point) -> Result<Self, GridError> {
        if rows <= 0 || cols <= 0 {
            return Err(GridError::EmptyGrid { rows, cols });
        }
        match rows.checked_mul(cols) {
            None => return Err(GridError::TooLarge { rows, cols }),
            Some(n) if n < 2 => return Err(GridError::EmptyGrid { rows, cols }),
            Some(_) => {}
        }
        let bounds = Range::new(0, 0, cols, rows);
        for p in [start, end] {
            if !bounds.contains(p) {
                return Err(GridError::OutOfBounds(p));
            }
        }
        if start == end {
            return Err(GridError::EndpointsCoincide(start));
        }

        let mut cells: Vec<Cell> = bounds.iter().map(Cell::new).collect();
        let width = cols as usize;
        let at = |p: Point| p.y as usize * width + p.x as usize;
        cells[at(start)] = cells[at(start)].with_kind(CellKind::Start);
        cells[at(end)] = cells[at(end)].with_kind(CellKind::End);

        Ok(Self {
            cells,
            bounds,
            start,
            end,
            events: VecDeque::new(),
            seq: 0,
        })
    }

    /// Create a grid with Start and End facing each other on the middle row,
    /// a few columns in from the left and right edges.
    ///
    /// Single-column grids place them at the top and bottom instead.
    pub fn with_default_endpoints(rows: i32, cols: i32) -> Result<Self, GridError> {
        if rows <= 0 || cols <= 0 {
            return Err(GridError::EmptyGrid { rows, cols });
        }
        if cols == 1 {
            return Self::new(rows, cols, Point::new(0, 0), Point::new(0, rows - 1));
        }
        let inset = if cols > 2 * DEFAULT_ENDPOINT_INSET + 1 {
            DEFAULT_ENDPOINT_INSET
        } else {
            0
        };
        let row = rows / 2;
        Self::new(
            rows,
            cols,
            Point::new(inset, row),
            Point::new(cols - 1 - inset, row),
        )
    }

    /// Number of rows.
    #[inline]
    pub fn rows(&self) -> i32 {
        self.bounds.height()
    }

    /// Number of columns.
    #[inline]
    pub fn cols(&self) -> i32 {
        self.bounds.width()
    }

    /// The bounding range, `[0, cols) × [0, rows)`.
    #[inline]
    pub fn bounds(&self) -> Range {
        self.bounds
    }

    /// Number of cells.
    #[inline]
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    /// Always false: a grid holds at least its two endpoints.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Whether `p` is inside the grid.
    #[inline]
    pub fn contains(&self, p: Point) -> bool {
        self.bounds.contains(p)
    }

    /// Current Start position.
    #[inline]
    pub fn start(&self) -> Point {
        self.start
    }

    /// Current End position.
    #[inline]
    pub fn end(&self) -> Point {
        self.end
    }

    /// Flat row-major index of `p`.
    #[inline]
    pub fn index(&self, p: Point) -> Result<usize, GridError> {
        if !self.bounds.contains(p) {
            return Err(GridError::OutOfBounds(p));
        }
        Ok(p.y as usize * self.cols() as usize + p.x as usize)
    }

    /// The cell at `p`.
    pub fn cell(&self, p: Point) -> Result<&Cell, GridError> {
        let i = self.index(p)?;
        Ok(&self.cells[i])
    }

    /// Mutable access to the cell at `p`, for writing search scratch and
    /// visit markers. The cell's kind stays read-only.
    ///
    /// Search runs own these fields while they hold the grid and reset the
    /// scratch values when they start, so anything written here is only a
    /// display hint. Renderers should read cells, not write them.
    pub fn cell_mut(&mut self, p: Point) -> Result<&mut Cell, GridError> {
        let i = self.index(p)?;
        Ok(&mut self.cells[i])
    }

    /// The kind of the cell at `p`.
    #[inline]
    pub fn kind(&self, p: Point) -> Result<CellKind, GridError> {
        self.cell(p).map(Cell::kind)
    }

    /// Row-major iterator over all cells.
    pub fn iter(&self) -> std::slice::Iter<'_, Cell> {
        self.cells.iter()
    }

    // -----------------------------------------------------------------------
    // Layout mutations
    // -----------------------------------------------------------------------

    /// Turn an empty cell into a wall. Returns whether the wall was placed.
    pub fn set_wall(&mut self, p: Point) -> Result<bool, GridError> {
        let i = self.index(p)?;
        if self.cells[i].kind() != CellKind::Empty {
            return Ok(false);
        }
        self.cells[i].set_kind(CellKind::Wall);
        self.record(GridEvent::WallPlaced(p));
        Ok(true)
    }

    /// Turn a wall back into an empty cell. Returns whether a wall was
    /// removed.
    pub fn clear_wall(&mut self, p: Point) -> Result<bool, GridError> {
        let i = self.index(p)?;
        if self.cells[i].kind() != CellKind::Wall {
            return Ok(false);
        }
        self.cells[i].set_kind(CellKind::Empty);
        self.record(GridEvent::WallRemoved(p));
        Ok(true)
    }

    /// Move Start onto the empty cell `to`. Returns whether it moved.
    pub fn move_start(&mut self, to: Point) -> Result<bool, GridError> {
        let from = self.start;
        let moved = self.relocate(from, to, CellKind::Start)?;
        if moved {
            self.start = to;
        }
        Ok(moved)
    }

    /// Move End onto the empty cell `to`. Returns whether it moved.
    pub fn move_end(&mut self, to: Point) -> Result<bool, GridError> {
        let from = self.end;
        let moved = self.relocate(from, to, CellKind::End)?;
        if moved {
            self.end = to;
        }
        Ok(moved)
    }

    fn relocate(&mut self, from: Point, to: Point, kind: CellKind) -> Result<bool, GridError> {
        let ti = self.index(to)?;
        if self.cells[ti].kind() != CellKind::Empty {
            return Ok(false);
        }
        let fi = self.index(from)?;
        self.cells[fi].set_kind(CellKind::Empty);
        self.cells[ti].set_kind(kind);
        Ok(true)
    }

    // -----------------------------------------------------------------------
    // Search support
    // -----------------------------------------------------------------------

    /// Append the in-bounds neighbours of `p` to `buf`, in the order left,
    /// right, up, down. The caller clears `buf` before calling.
    pub fn neighbors_into(&self, p: Point, buf: &mut Vec<Point>) -> Result<(), GridError> {
        if !self.bounds.contains(p) {
            return Err(GridError::OutOfBounds(p));
        }
        buf.extend(
            p.neighbors_4()
                .into_iter()
                .filter(|&n| self.bounds.contains(n)),
        );
        Ok(())
    }

    /// The in-bounds neighbours of `p`, in the order left, right, up, down.
    pub fn neighbors(&self, p: Point) -> Result<Vec<Point>, GridError> {
        let mut buf = Vec::with_capacity(4);
        self.neighbors_into(p, &mut buf)?;
        Ok(buf)
    }

    /// Set every cell's `g`, `h`, `f`, `d` to unset and clear `came_from`.
    pub fn reset_search_fields(&mut self) {
        for c in self.cells.iter_mut() {
            c.reset_search();
        }
    }

    /// Reset visit markers and search fields, keeping the layout.
    pub fn clear_visits(&mut self) {
        for c in self.cells.iter_mut() {
            c.visit = Visit::Unvisited;
            c.reset_search();
        }
    }

    /// Remove every wall and all search state. Start and End stay put.
    /// Pending wall events are discarded.
    pub fn clear(&mut self) {
        for c in self.cells.iter_mut() {
            if c.kind() == CellKind::Wall {
                c.set_kind(CellKind::Empty);
            }
            c.visit = Visit::Unvisited;
            c.reset_search();
        }
        self.events.clear();
    }

    // -----------------------------------------------------------------------
    // Events
    // -----------------------------------------------------------------------

    fn record(&mut self, event: GridEvent) {
        if self.events.len() == EVENT_LOG_CAPACITY {
            self.events.pop_front();
        }
        self.events.push_back((self.seq, event));
        self.seq += 1;
    }

    /// Take the recorded wall events, oldest first, each with its sequence
    /// number. Sequence numbers keep increasing across drains, so a gap
    /// means events were dropped at [`EVENT_LOG_CAPACITY`].
    pub fn drain_events(&mut self) -> std::collections::vec_deque::Drain<'_, (u64, GridEvent)> {
        self.events.drain(..)
    }
}

impl<'a> IntoIterator for &'a Grid {
    type Item = &'a Cell;
    type IntoIter = std::slice::Iter<'a, Cell>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

// ---------------------------------------------------------------------------
// Frame / FrameCell / compute_frame
// ---------------------------------------------------------------------------

/// A single cell whose kind or visit marker changed between two snapshots.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct FrameCell {
    pub pos: Point,
    pub kind: CellKind,
    pub visit: Visit,
}

/// A set of cell changes (a diff frame).
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Frame {
    pub cells: Vec<FrameCell>,
    pub rows: i32,
    pub cols: i32,
}

/// Compute what a renderer must redraw to go from `prev` to `curr`.
///
/// Cells are compared by kind and visit marker only; search scratch values
/// are not visible. Grids of different shapes yield a full frame of `curr`.
pub fn compute_frame(prev: &Grid, curr: &Grid) -> Frame {
    let same_shape = prev.bounds() == curr.bounds();
    let cells = curr
        .iter()
        .zip(prev.iter().map(Some).chain(std::iter::repeat(None)))
        .filter(|&(c, p)| {
            !same_shape || p.is_none_or(|p| p.kind() != c.kind() || p.visit != c.visit)
        })
        .map(|(c, _)| FrameCell {
            pos: c.pos(),
            kind: c.kind(),
            visit: c.visit,
        })
        .collect();
    Frame {
        cells,
        rows: curr.rows(),
        cols: curr.cols(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn grid_4x4() -> Grid {
        Grid::new(4, 4, Point::new(0, 0), Point::new(3, 3)).unwrap()
    }

    #[test]
    fn new_places_endpoints() {
        let g = grid_4x4();
        assert_eq!(g.rows(), 4);
        assert_eq!(g.cols(), 4);
        assert_eq!(g.len(), 16);
        assert_eq!(g.kind(Point::new(0, 0)), Ok(CellKind::Start));
        assert_eq!(g.kind(Point::new(3, 3)), Ok(CellKind::End));
        assert_eq!(g.kind(Point::new(1, 2)), Ok(CellKind::Empty));
        assert_eq!(g.iter().filter(|c| c.kind() == CellKind::Start).count(), 1);
        assert_eq!(g.iter().filter(|c| c.kind() == CellKind::End).count(), 1);
    }

    #[test]
    fn new_rejects_bad_layouts() {
        assert_eq!(
            Grid::new(4, 4, Point::new(4, 0), Point::new(1, 1)).unwrap_err(),
            GridError::OutOfBounds(Point::new(4, 0))
        );
        assert_eq!(
            Grid::new(4, 4, Point::new(1, 1), Point::new(1, 1)).unwrap_err(),
            GridError::EndpointsCoincide(Point::new(1, 1))
        );
        assert!(matches!(
            Grid::new(1, 1, Point::ZERO, Point::ZERO),
            Err(GridError::EmptyGrid { rows: 1, cols: 1 })
        ));
    }

    #[test]
    fn new_rejects_overflowing_shapes() {
        assert_eq!(
            Grid::new(65_536, 65_536, Point::new(0, 0), Point::new(1, 0)).unwrap_err(),
            GridError::TooLarge {
                rows: 65_536,
                cols: 65_536
            }
        );
        assert!(matches!(
            Grid::with_default_endpoints(i32::MAX, 2),
            Err(GridError::TooLarge { .. })
        ));
    }

    #[test]
    fn cell_coordinates_match_positions() {
        let g = Grid::new(3, 5, Point::new(0, 0), Point::new(4, 2)).unwrap();
        for p in g.bounds() {
            assert_eq!(g.cell(p).unwrap().pos(), p);
        }
    }

    #[test]
    fn default_endpoints_are_symmetric() {
        let g = Grid::with_default_endpoints(27, 75).unwrap();
        assert_eq!(g.start(), Point::new(3, 13));
        assert_eq!(g.end(), Point::new(71, 13));

        let narrow = Grid::with_default_endpoints(4, 4).unwrap();
        assert_eq!(narrow.start(), Point::new(0, 2));
        assert_eq!(narrow.end(), Point::new(3, 2));

        let column = Grid::with_default_endpoints(5, 1).unwrap();
        assert_eq!(column.start(), Point::new(0, 0));
        assert_eq!(column.end(), Point::new(0, 4));
    }

    #[test]
    fn set_wall_only_on_empty() {
        let mut g = grid_4x4();
        assert_eq!(g.set_wall(Point::new(1, 1)), Ok(true));
        assert_eq!(g.kind(Point::new(1, 1)), Ok(CellKind::Wall));
        assert_eq!(g.set_wall(Point::new(1, 1)), Ok(false));
        assert_eq!(g.set_wall(g.start()), Ok(false));
        assert_eq!(g.set_wall(g.end()), Ok(false));
        assert_eq!(g.kind(Point::new(0, 0)), Ok(CellKind::Start));
        assert_eq!(
            g.set_wall(Point::new(-1, 0)),
            Err(GridError::OutOfBounds(Point::new(-1, 0)))
        );
    }

    #[test]
    fn clear_wall_only_on_wall() {
        let mut g = grid_4x4();
        assert_eq!(g.clear_wall(Point::new(2, 2)), Ok(false));
        g.set_wall(Point::new(2, 2)).unwrap();
        assert_eq!(g.clear_wall(Point::new(2, 2)), Ok(true));
        assert_eq!(g.kind(Point::new(2, 2)), Ok(CellKind::Empty));
        assert_eq!(g.clear_wall(g.start()), Ok(false));
    }

    #[test]
    fn move_endpoints_onto_empty_cells_only() {
        let mut g = grid_4x4();
        assert_eq!(g.move_start(Point::new(1, 0)), Ok(true));
        assert_eq!(g.start(), Point::new(1, 0));
        assert_eq!(g.kind(Point::new(0, 0)), Ok(CellKind::Empty));
        assert_eq!(g.kind(Point::new(1, 0)), Ok(CellKind::Start));

        g.set_wall(Point::new(2, 0)).unwrap();
        assert_eq!(g.move_start(Point::new(2, 0)), Ok(false));
        assert_eq!(g.move_start(g.end()), Ok(false));
        assert_eq!(g.move_end(g.start()), Ok(false));
        assert_eq!(g.start(), Point::new(1, 0));

        assert_eq!(g.move_end(Point::new(0, 3)), Ok(true));
        assert_eq!(g.kind(Point::new(3, 3)), Ok(CellKind::Empty));
        assert_eq!(g.kind(Point::new(0, 3)), Ok(CellKind::End));
        assert_eq!(
            g.move_end(Point::new(0, 4)),
            Err(GridError::OutOfBounds(Point::new(0, 4)))
        );
    }

    #[test]
    fn neighbor_order_and_counts() {
        let g = grid_4x4();
        assert_eq!(
            g.neighbors(Point::new(1, 1)).unwrap(),
            vec![
                Point::new(0, 1),
                Point::new(2, 1),
                Point::new(1, 0),
                Point::new(1, 2),
            ]
        );
        assert_eq!(
            g.neighbors(Point::new(0, 0)).unwrap(),
            vec![Point::new(1, 0), Point::new(0, 1)]
        );
        assert_eq!(g.neighbors(Point::new(3, 3)).unwrap().len(), 2);
        assert_eq!(g.neighbors(Point::new(0, 3)).unwrap().len(), 2);
        assert_eq!(g.neighbors(Point::new(2, 0)).unwrap().len(), 3);
        assert_eq!(g.neighbors(Point::new(3, 1)).unwrap().len(), 3);
        assert_eq!(
            g.neighbors(Point::new(4, 1)),
            Err(GridError::OutOfBounds(Point::new(4, 1)))
        );
    }

    #[test]
    fn neighbor_counts_by_position() {
        let g = Grid::new(6, 7, Point::new(0, 0), Point::new(6, 5)).unwrap();
        for p in g.bounds() {
            let n = g.neighbors(p).unwrap().len();
            let on_x_edge = p.x == 0 || p.x == 6;
            let on_y_edge = p.y == 0 || p.y == 5;
            let expected = match (on_x_edge, on_y_edge) {
                (true, true) => 2,
                (true, false) | (false, true) => 3,
                (false, false) => 4,
            };
            assert_eq!(n, expected, "at {p}");
        }
    }

    #[test]
    fn reset_search_fields_clears_scratch_only() {
        let mut g = grid_4x4();
        {
            let c = g.cell_mut(Point::new(2, 1)).unwrap();
            c.g = 3.0;
            c.h = 1.0;
            c.f = 4.0;
            c.d = 3.0;
            c.came_from = Some(Point::new(1, 1));
            c.visit = Visit::Closed;
        }
        g.reset_search_fields();
        let c = g.cell(Point::new(2, 1)).unwrap();
        assert!(c.g.is_infinite() && c.h.is_infinite() && c.f.is_infinite() && c.d.is_infinite());
        assert_eq!(c.came_from, None);
        assert_eq!(c.visit, Visit::Closed);

        g.clear_visits();
        assert_eq!(g.cell(Point::new(2, 1)).unwrap().visit, Visit::Unvisited);
    }

    #[test]
    fn clear_removes_walls_and_keeps_endpoints() {
        let mut g = grid_4x4();
        g.move_end(Point::new(2, 3)).unwrap();
        g.set_wall(Point::new(1, 1)).unwrap();
        g.set_wall(Point::new(2, 2)).unwrap();
        g.cell_mut(Point::new(0, 1)).unwrap().visit = Visit::Path;
        g.clear();
        assert!(g.iter().all(|c| c.kind() != CellKind::Wall));
        assert!(g.iter().all(|c| c.visit == Visit::Unvisited));
        assert_eq!(g.end(), Point::new(2, 3));
        assert_eq!(g.kind(Point::new(2, 3)), Ok(CellKind::End));
        assert_eq!(g.drain_events().count(), 0);
    }

    #[test]
    fn wall_events_are_sequenced() {
        let mut g = grid_4x4();
        g.set_wall(Point::new(1, 1)).unwrap();
        g.set_wall(Point::new(1, 1)).unwrap();
        g.clear_wall(Point::new(1, 1)).unwrap();
        let events: Vec<_> = g.drain_events().collect();
        assert_eq!(
            events,
            vec![
                (0, GridEvent::WallPlaced(Point::new(1, 1))),
                (1, GridEvent::WallRemoved(Point::new(1, 1))),
            ]
        );
        g.set_wall(Point::new(2, 1)).unwrap();
        assert_eq!(
            g.drain_events().next(),
            Some((2, GridEvent::WallPlaced(Point::new(2, 1))))
        );
    }

    #[test]
    fn event_log_keeps_the_newest() {
        let mut g = grid_4x4();
        let p = Point::new(1, 1);
        for _ in 0..3000 {
            g.set_wall(p).unwrap();
            g.clear_wall(p).unwrap();
        }
        let events: Vec<_> = g.drain_events().collect();
        assert_eq!(events.len(), EVENT_LOG_CAPACITY);
        assert_eq!(events[0].0, 6000 - EVENT_LOG_CAPACITY as u64);
        assert_eq!(events.last(), Some(&(5999, GridEvent::WallRemoved(p))));
        assert_eq!(g.drain_events().count(), 0);
    }

    #[test]
    fn compute_frame_diff() {
        let a = grid_4x4();
        let mut b = a.clone();
        b.set_wall(Point::new(1, 0)).unwrap();
        b.cell_mut(Point::new(0, 1)).unwrap().visit = Visit::Open;
        b.cell_mut(Point::new(2, 2)).unwrap().g = 7.0;
        let frame = compute_frame(&a, &b);
        assert_eq!(frame.rows, 4);
        assert_eq!(frame.cols, 4);
        assert_eq!(
            frame.cells,
            vec![
                FrameCell {
                    pos: Point::new(1, 0),
                    kind: CellKind::Wall,
                    visit: Visit::Unvisited,
                },
                FrameCell {
                    pos: Point::new(0, 1),
                    kind: CellKind::Empty,
                    visit: Visit::Open,
                },
            ]
        );
    }

    #[test]
    fn compute_frame_full_on_shape_change() {
        let a = grid_4x4();
        let b = Grid::new(2, 3, Point::new(0, 0), Point::new(2, 1)).unwrap();
        assert_eq!(compute_frame(&a, &b).cells.len(), 6);
    }
}
