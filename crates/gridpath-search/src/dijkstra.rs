use gridpath_core::{GridError, Status, Visit};

use crate::open::OpenSet;
use crate::path::Path;
use crate::run::SearchRun;

impl SearchRun<'_> {
    /// Put every cell in the frontier, row-major, with Start at `d = 0`.
    pub(crate) fn seed_dijkstra(&mut self) {
        let start = self.grid.start();
        self.open = OpenSet::with_capacity(self.grid.len());
        for p in self.grid.bounds() {
            self.open.push(p);
        }
        if let Ok(c) = self.grid.cell_mut(start) {
            c.d = 0.0;
            c.visit = Visit::Open;
        }
    }

    /// Select the frontier cell with the lowest `d` (first found on ties),
    /// stop if it is the goal, otherwise relax its neighbours and close it.
    ///
    /// Once the lowest remaining distance is infinite nothing left in the
    /// frontier is reachable and the run is exhausted.
    pub(crate) fn dijkstra_step(&mut self) -> Result<Status<Path>, GridError> {
        let grid = &*self.grid;
        let selected = self
            .open
            .pop_min(|p| grid.cell(p).map_or(f64::INFINITY, |c| c.d));
        let Some((current, current_d)) = selected else {
            return Ok(self.exhaust());
        };
        if current_d.is_infinite() {
            return Ok(self.exhaust());
        }
        log::trace!("Dijkstra step {}: select {current} at {current_d}", self.steps);

        if current == self.goal {
            return self.succeed();
        }

        let mut nbuf = std::mem::take(&mut self.nbuf);
        nbuf.clear();
        self.grid.neighbors_into(current, &mut nbuf)?;

        for &np in nbuf.iter() {
            if self.is_closed(np) || !self.grid.kind(np)?.is_passable() {
                continue;
            }
            let n = self.grid.cell_mut(np)?;
            if current_d + 1.0 < n.d {
                n.d = current_d + 1.0;
                n.came_from = Some(current);
                n.visit = Visit::Open;
            }
        }

        self.nbuf = nbuf;
        self.close(current)?;
        Ok(Status::Running)
    }
}
