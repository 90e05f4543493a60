//! Type definitions shared by the grid, the search and the user interface.

use std::{error::Error, fmt};

use crate::grid::Position;

/// Terminal result of a breadth-first search run.
///
/// This enumeration holds the state a search finishes in. It starts off as
/// [`Pending`](Outcome::Pending) and is set exactly once when the traversal stops.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Outcome {
    /// Search still running.
    ///
    /// This variant represents a traversal that has not reached a terminal state yet. It is the
    /// state the renderer observes while the frontier is being expanded.
    Pending,
    /// Exit reached after the given number of steps.
    ///
    /// This variant holds the hop count from the start cell to the first exit dequeued, which is
    /// the shortest one by the breadth-first property.
    Found(usize),
    /// Frontier exhausted without reaching an exit.
    NotFound,
    /// Observer requested the traversal to stop early.
    ///
    /// This variant only occurs when the observer breaks out of a step, which the interactive
    /// driver does when the user asks to quit halfway through an animation.
    Cancelled,
}

impl Outcome {
    /// Returns whether the traversal has reached a terminal state.
    pub const fn is_finished(self) -> bool {
        !matches!(self, Self::Pending)
    }

    /// Returns the hop count for a successful search.
    pub const fn steps(self) -> Option<usize> {
        match self {
            Self::Found(steps) => Some(steps),
            Self::Pending | Self::NotFound | Self::Cancelled => None,
        }
    }
}

impl fmt::Display for Outcome {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Pending => formatter.write_str("Searching..."),
            Self::Found(steps) => write!(formatter, "Exit Found in {steps} steps!"),
            Self::NotFound => formatter.write_str("No Exit Found!"),
            Self::Cancelled => formatter.write_str("Search cancelled."),
        }
    }
}

/// Structural failures detected while building a grid or starting a search.
///
/// These are the only error conditions of the maze domain. An unreachable exit is not one of them;
/// it is reported through [`Outcome::NotFound`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum MazeError {
    /// Grid has no rows or no columns.
    EmptyGrid,
    /// Row length differs from the first row.
    RaggedRow {
        /// Index of the offending row.
        row: usize,
        /// Length of the first row.
        expected: usize,
        /// Length of the offending row.
        found: usize,
    },
    /// Symbol in the textual grid is neither a wall nor an open cell.
    InvalidCell {
        /// Row of the offending symbol.
        row: usize,
        /// Column of the offending symbol.
        col: usize,
        /// The symbol itself.
        symbol: char,
    },
    /// Start position lies outside of the grid.
    StartOutOfBounds {
        /// Requested start position.
        start: Position,
        /// Number of rows in the grid.
        rows: usize,
        /// Number of columns in the grid.
        cols: usize,
    },
    /// Start position is a wall.
    StartIsWall {
        /// Requested start position.
        start: Position,
    },
}

impl fmt::Display for MazeError {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyGrid => formatter.write_str("grid has no cells"),
            Self::RaggedRow {
                row,
                expected,
                found,
            } => write!(
                formatter,
                "row {row} has {found} cells but the grid is {expected} cells wide"
            ),
            Self::InvalidCell { row, col, symbol } => {
                write!(formatter, "invalid cell {symbol:?} at ({row}, {col})")
            }
            Self::StartOutOfBounds { start, rows, cols } => write!(
                formatter,
                "start {start} lies outside of the {rows}x{cols} grid"
            ),
            Self::StartIsWall { start } => write!(formatter, "start {start} is a wall"),
        }
    }
}

impl Error for MazeError {}
