use gridpath_core::{GridError, Status, Visit};

use crate::heuristic::estimate;
use crate::path::Path;
use crate::run::SearchRun;

impl SearchRun<'_> {
    /// Put Start in the frontier with `g = 0`.
    pub(crate) fn seed_astar(&mut self) {
        let start = self.grid.start();
        let goal = self.goal;
        if let Ok(c) = self.grid.cell_mut(start) {
            c.g = 0.0;
            c.h = estimate(start, goal);
            c.f = c.g + c.h;
            c.visit = Visit::Open;
            self.open.push(start);
        }
    }

    /// Select the frontier cell with the lowest `f` (first found on ties),
    /// stop if it is the goal, otherwise close it and relax its neighbours.
    pub(crate) fn astar_step(&mut self) -> Result<Status<Path>, GridError> {
        let grid = &*self.grid;
        let selected = self
            .open
            .pop_min(|p| grid.cell(p).map_or(f64::INFINITY, |c| c.f));
        let Some((current, _)) = selected else {
            return Ok(self.exhaust());
        };
        log::trace!("A* step {}: select {current}", self.steps);

        if current == self.goal {
            return self.succeed();
        }

        self.close(current)?;
        let current_g = self.grid.cell(current)?.g;

        let mut nbuf = std::mem::take(&mut self.nbuf);
        nbuf.clear();
        self.grid.neighbors_into(current, &mut nbuf)?;

        for &np in nbuf.iter() {
            if self.is_closed(np) || !self.grid.kind(np)?.is_passable() {
                continue;
            }
            let tentative_g = current_g + 1.0;
            let goal = self.goal;
            let n = self.grid.cell_mut(np)?;

            let improves = if n.g.is_infinite() {
                // First time this cell is seen.
                n.h = estimate(np, goal);
                n.visit = Visit::Open;
                self.open.push(np);
                true
            } else {
                tentative_g < n.g
            };

            if improves {
                n.g = tentative_g;
                n.f = n.g + n.h;
                n.came_from = Some(current);
            }
        }

        self.nbuf = nbuf;
        Ok(Status::Running)
    }
}
