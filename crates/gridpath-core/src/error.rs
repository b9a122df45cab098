//! Errors reported by grid operations and steppable runs.

use std::fmt;

use crate::geom::Point;

/// Errors that can occur when operating on a [`Grid`](crate::Grid) or
/// stepping a run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GridError {
    /// A coordinate outside the grid was passed in.
    OutOfBounds(Point),
    /// A run was stepped after reaching a terminal status.
    InvalidState(&'static str),
    /// Start and End were given the same coordinate.
    EndpointsCoincide(Point),
    /// The requested shape cannot hold two distinct cells.
    EmptyGrid { rows: i32, cols: i32 },
    /// The requested shape has more cells than an `i32` can count.
    TooLarge { rows: i32, cols: i32 },
}

impl fmt::Display for GridError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::OutOfBounds(p) => write!(f, "grid: point {p} is out of bounds"),
            Self::InvalidState(why) => write!(f, "grid: invalid run state: {why}"),
            Self::EndpointsCoincide(p) => write!(f, "grid: start and end both at {p}"),
            Self::EmptyGrid { rows, cols } => {
                write!(f, "grid: {rows}x{cols} cannot hold a start and an end")
            }
            Self::TooLarge { rows, cols } => write!(f, "grid: {rows}x{cols} is too large"),
        }
    }
}

impl std::error::Error for GridError {}
