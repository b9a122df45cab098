//! Maze generation for gridpath: recursive division, run one division per
//! step so the carving can be animated.

pub mod difficulty;
pub mod division;

pub use difficulty::Difficulty;
pub use division::{MIN_REGION_SIDE, MazeRun, generate_maze};
