//! Recursive-division maze generation.
//!
//! A region is cut by a straight wall line with a two-cell gap, and each
//! side is divided again until the region gets too small or the depth budget
//! runs out. The work is kept on an explicit stack so a [`MazeRun`] can do
//! one division per [`Stepper::step`], in the same order a recursive
//! implementation would (first half fully before the second).

use gridpath_core::{Grid, GridError, Point, Range, Status, Stepper};
use rand::{Rng, RngExt};

/// Regions narrower or shorter than this are left undivided.
pub const MIN_REGION_SIDE: i32 = 4;

/// One pending division call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Division {
    region: Range,
    /// Remaining depth budget.
    depth: u32,
    /// Gap coordinates opened by the parent's wall line.
    gaps: Option<(i32, i32)>,
}

/// Orientation of a dividing wall line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Line {
    /// A column of wall cells at this `x`.
    Vertical(i32),
    /// A row of wall cells at this `y`.
    Horizontal(i32),
}

/// A recursive-division maze being carved into a [`Grid`].
///
/// The generator only adds walls; callers clear the grid first if they want
/// a fresh maze. Start and End are never walled over.
pub struct MazeRun<'g, R: Rng> {
    grid: &'g mut Grid,
    rng: R,
    stack: Vec<Division>,
    status: Status<()>,
    steps: usize,
}

impl<'g, R: Rng> MazeRun<'g, R> {
    /// Prepare a maze over the whole grid with recursion depth `complexity`.
    pub fn new(grid: &'g mut Grid, complexity: u32, rng: R) -> Self {
        let root = Division {
            region: grid.bounds(),
            depth: complexity,
            gaps: None,
        };
        log::debug!(
            "maze started: {}x{} at complexity {complexity}",
            grid.rows(),
            grid.cols()
        );
        Self {
            grid,
            rng,
            stack: vec![root],
            status: Status::Running,
            steps: 0,
        }
    }

    /// Number of division calls performed so far.
    #[inline]
    pub fn steps(&self) -> usize {
        self.steps
    }

    /// Regions still waiting to be divided, next one first.
    pub fn pending_regions(&self) -> Vec<Range> {
        self.stack.iter().rev().map(|d| d.region).collect()
    }

    /// Carve one region: draw its wall line and queue both halves.
    fn divide(&mut self, div: Division) -> Result<(), GridError> {
        let Division {
            region,
            depth,
            gaps,
        } = div;
        let (width, height) = (region.width(), region.height());
        if width < MIN_REGION_SIDE || height < MIN_REGION_SIDE || depth == 0 {
            return Ok(());
        }

        let Some(line) = self.pick_line(region, gaps) else {
            log::warn!("maze: no room for a wall line in {region}, leaving it open");
            return Ok(());
        };

        let (first, second, gap1) = match line {
            Line::Vertical(x) => {
                let gap1 = self.rng.random_range(region.min.y..region.max.y);
                for y in region.min.y..region.max.y {
                    if y != gap1 && y != gap1 + 1 {
                        self.grid.set_wall(Point::new(x, y))?;
                    }
                }
                let (left, right) = region.split_at_column(x);
                (left, right, gap1)
            }
            Line::Horizontal(y) => {
                let gap1 = self.rng.random_range(region.min.x..region.max.x);
                for x in region.min.x..region.max.x {
                    if x != gap1 && x != gap1 + 1 {
                        self.grid.set_wall(Point::new(x, y))?;
                    }
                }
                let (top, bottom) = region.split_at_row(y);
                (top, bottom, gap1)
            }
        };
        log::trace!("maze: {line:?} in {region}, gap at {gap1}");

        let gaps = Some((gap1, gap1 + 1));
        let depth = depth - 1;
        self.stack.push(Division {
            region: second,
            depth,
            gaps,
        });
        self.stack.push(Division {
            region: first,
            depth,
            gaps,
        });
        Ok(())
    }

    /// Choose where to draw the wall line: along the longer side, strictly
    /// inside the region, never through Start's or End's row/column and
    /// never at the parent's gap coordinates.
    fn pick_line(&mut self, region: Range, gaps: Option<(i32, i32)>) -> Option<Line> {
        let (start, end) = (self.grid.start(), self.grid.end());
        let vertical = region.width() > region.height();
        let (lo, hi, blocked) = if vertical {
            (region.min.x, region.max.x, [start.x, end.x])
        } else {
            (region.min.y, region.max.y, [start.y, end.y])
        };
        let candidates: Vec<i32> = (lo + 1..hi - 1)
            .filter(|c| !blocked.contains(c))
            .filter(|&c| gaps.is_none_or(|(g1, g2)| c != g1 && c != g2))
            .collect();
        if candidates.is_empty() {
            return None;
        }
        let c = candidates[self.rng.random_range(0..candidates.len())];
        Some(if vertical {
            Line::Vertical(c)
        } else {
            Line::Horizontal(c)
        })
    }
}

impl<R: Rng> Stepper for MazeRun<'_, R> {
    type Output = ();

    fn step(&mut self) -> Result<Status<()>, GridError> {
        if self.status.is_terminal() {
            return Err(GridError::InvalidState("maze run already finished"));
        }
        if let Some(div) = self.stack.pop() {
            self.steps += 1;
            self.divide(div)?;
        }
        if self.stack.is_empty() {
            log::debug!("maze finished after {} divisions", self.steps);
            self.status = Status::Succeeded(());
        }
        Ok(self.status.clone())
    }

    fn cancel(&mut self) {
        if self.status.is_terminal() {
            return;
        }
        log::debug!("maze cancelled after {} divisions", self.steps);
        self.stack.clear();
        self.status = Status::Cancelled;
    }

    fn status(&self) -> &Status<()> {
        &self.status
    }

    fn grid(&self) -> &Grid {
        &*self.grid
    }
}

/// Carve a complete recursive-division maze into `grid`.
pub fn generate_maze<R: Rng>(grid: &mut Grid, complexity: u32, rng: R) -> Result<(), GridError> {
    MazeRun::new(grid, complexity, rng).run_to_end()?;
    Ok(())
}
