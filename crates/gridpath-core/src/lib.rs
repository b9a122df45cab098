//! **gridpath-core**: grid model and stepwise execution for grid search
//! visualizers.
//!
//! This crate provides the foundational types used across the *gridpath*
//! workspace: geometry primitives, cells with search scratch state, the
//! [`Grid`] with its Start/End invariants, frame diffs for renderers, and the
//! [`Stepper`] contract that lets a caller advance an algorithm one unit of
//! work at a time.

pub mod cell;
pub mod error;
pub mod geom;
pub mod grid;
pub mod stepper;

pub use cell::{Cell, CellKind, Visit};
pub use error::GridError;
pub use geom::{Point, Range};
pub use grid::{EVENT_LOG_CAPACITY, Frame, FrameCell, Grid, GridEvent, compute_frame};
pub use stepper::{Context, Speed, Status, Stepper, drive};
