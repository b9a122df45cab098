use std::fmt;

use gridpath_core::{Grid, GridError, Point, Status, Stepper, Visit};

use crate::open::OpenSet;
use crate::path::Path;

/// Which search to run.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum Algorithm {
    /// A* with the row-weighted Manhattan estimate.
    #[default]
    AStar,
    /// Uniform-cost search.
    Dijkstra,
}

impl fmt::Display for Algorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::AStar => f.write_str("A*"),
            Self::Dijkstra => f.write_str("Dijkstra"),
        }
    }
}

// ---------------------------------------------------------------------------
// SearchRun
// ---------------------------------------------------------------------------

/// One in-flight search over a [`Grid`].
///
/// The run borrows the grid exclusively, so walls and endpoints cannot move
/// until it is dropped. Each [`step`](Stepper::step) selects one frontier
/// cell and expands it.
pub struct SearchRun<'g> {
    pub(crate) grid: &'g mut Grid,
    pub(crate) algorithm: Algorithm,
    pub(crate) goal: Point,
    pub(crate) open: OpenSet,
    /// Finalized cells, by flat grid index.
    pub(crate) closed: Vec<bool>,
    pub(crate) status: Status<Path>,
    pub(crate) steps: usize,
    // scratch buffer for neighbor queries
    pub(crate) nbuf: Vec<Point>,
}

/// Start a search of kind `algorithm` from the grid's Start to its End.
///
/// Search fields are reset first; visit markers from earlier runs are left
/// for the caller to clear with [`Grid::clear_visits`].
pub fn run_search(algorithm: Algorithm, grid: &mut Grid) -> SearchRun<'_> {
    grid.reset_search_fields();
    let goal = grid.end();
    let len = grid.len();
    let mut run = SearchRun {
        grid,
        algorithm,
        goal,
        open: OpenSet::new(),
        closed: vec![false; len],
        status: Status::Running,
        steps: 0,
        nbuf: Vec::with_capacity(4),
    };
    log::debug!(
        "{algorithm} search started: {} -> {goal} on {}x{}",
        run.grid.start(),
        run.grid.rows(),
        run.grid.cols()
    );
    match algorithm {
        Algorithm::AStar => run.seed_astar(),
        Algorithm::Dijkstra => run.seed_dijkstra(),
    }
    run
}

/// Run a search to completion. An unreachable End yields the empty path.
pub fn find_path(algorithm: Algorithm, grid: &mut Grid) -> Result<Path, GridError> {
    match run_search(algorithm, grid).run_to_end()? {
        Status::Succeeded(path) => Ok(path),
        _ => Ok(Path::empty()),
    }
}

impl SearchRun<'_> {
    /// The algorithm driving this run.
    #[inline]
    pub fn algorithm(&self) -> Algorithm {
        self.algorithm
    }

    /// Number of steps taken so far.
    #[inline]
    pub fn steps(&self) -> usize {
        self.steps
    }

    /// Number of cells currently in the frontier.
    #[inline]
    pub fn open_len(&self) -> usize {
        self.open.len()
    }

    #[inline]
    pub(crate) fn is_closed(&self, p: Point) -> bool {
        self.grid.index(p).is_ok_and(|i| self.closed[i])
    }

    pub(crate) fn close(&mut self, p: Point) -> Result<(), GridError> {
        let i = self.grid.index(p)?;
        self.closed[i] = true;
        self.grid.cell_mut(p)?.visit = Visit::Closed;
        Ok(())
    }

    /// Walk `came_from` links back from the goal, mark the cells as the
    /// path, and finish the run.
    pub(crate) fn succeed(&mut self) -> Result<Status<Path>, GridError> {
        let mut coords = Vec::new();
        let mut cur = Some(self.goal);
        while let Some(p) = cur {
            coords.push(p);
            cur = self.grid.cell(p)?.came_from;
        }
        coords.reverse();
        for &p in &coords {
            self.grid.cell_mut(p)?.visit = Visit::Path;
        }
        log::debug!(
            "{} search reached {} in {} steps, path of {}",
            self.algorithm,
            self.goal,
            self.steps,
            coords.len()
        );
        Ok(self.finish(Status::Succeeded(Path::new(coords))))
    }

    pub(crate) fn exhaust(&mut self) -> Status<Path> {
        log::debug!(
            "{} search exhausted after {} steps",
            self.algorithm,
            self.steps
        );
        self.finish(Status::Exhausted)
    }

    fn finish(&mut self, status: Status<Path>) -> Status<Path> {
        self.open.clear();
        self.closed = Vec::new();
        self.status = status.clone();
        status
    }
}

impl Stepper for SearchRun<'_> {
    type Output = Path;

    fn step(&mut self) -> Result<Status<Path>, GridError> {
        if self.status.is_terminal() {
            return Err(GridError::InvalidState("search run already finished"));
        }
        self.steps += 1;
        match self.algorithm {
            Algorithm::AStar => self.astar_step(),
            Algorithm::Dijkstra => self.dijkstra_step(),
        }
    }

    fn cancel(&mut self) {
        if self.status.is_terminal() {
            return;
        }
        log::debug!("{} search cancelled after {} steps", self.algorithm, self.steps);
        self.finish(Status::Cancelled);
    }

    fn status(&self) -> &Status<Path> {
        &self.status
    }

    fn grid(&self) -> &Grid {
        &*self.grid
    }
}
