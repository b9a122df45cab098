//! Stepwise A* and uniform-cost search over a [`gridpath_core::Grid`].
//!
//! A search is started with [`run_search`], which returns a [`SearchRun`]
//! implementing [`gridpath_core::Stepper`]: every call to `step` selects one
//! frontier cell and expands it, leaving visit markers on the grid for a
//! renderer to draw. [`find_path`] runs a search to completion.
//!
//! | Algorithm | Frontier key | Seeded with |
//! |---|---|---|
//! | [`Algorithm::AStar`] | `f = g + h`, `h` from [`estimate`] | Start |
//! | [`Algorithm::Dijkstra`] | `d` | every cell, Start at 0 |
//!
//! Both select the first minimum in frontier insertion order, so results
//! are reproducible. Both return a [`Path`] that starts at Start and ends at
//! End; [`Path::steps`] drops Start.

mod astar;
mod dijkstra;
mod heuristic;
mod open;
mod path;
mod run;

pub use heuristic::{VERTICAL_WEIGHT, estimate, manhattan};
pub use path::Path;
pub use run::{Algorithm, SearchRun, find_path, run_search};
