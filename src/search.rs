//! Breadth-first search module.
//!
//! This module contains the traversal that walks a [`Grid`] from a start cell until it dequeues a
//! cell accepted by an exit predicate. Presentation is kept out of the algorithm: every newly
//! discovered cell is reported to a [`SearchObserver`], which is free to redraw, sleep, or do
//! nothing at all.

use std::{
    collections::{HashSet, VecDeque},
    ops::ControlFlow,
};

use log::{info, trace};

use crate::{
    grid::{Cell, Grid, Position},
    types::{MazeError, Outcome},
};

/// Receiver of search progress.
///
/// The traversal calls [`on_step`](SearchObserver::on_step) synchronously after every neighbor
/// discovery and [`on_done`](SearchObserver::on_done) once after the outcome is set.
pub trait SearchObserver {
    /// Called after a cell has been marked visited and appended to the explored log.
    ///
    /// Returning [`ControlFlow::Break`] stops the traversal with [`Outcome::Cancelled`].
    fn on_step(&mut self, state: &SearchState) -> ControlFlow<()>;

    /// Called once with the final state.
    fn on_done(&mut self, _state: &SearchState) {}
}

/// Observer that ignores every notification.
#[derive(Clone, Copy, Debug, Default)]
pub struct Headless;

impl SearchObserver for Headless {
    fn on_step(&mut self, _state: &SearchState) -> ControlFlow<()> {
        ControlFlow::Continue(())
    }
}

/// Mutable state of a single traversal.
///
/// A fresh state is created for every run and dropped with it; nothing is shared across grids.
#[derive(Clone, Debug)]
pub struct SearchState {
    /// Cell the traversal started from.
    start: Position,
    /// Every cell discovered so far, start included.
    visited: HashSet<Position>,
    /// Discovered cells waiting to be expanded, with their hop count.
    frontier: VecDeque<(Position, usize)>,
    /// Cells in first-visit order, start excluded.
    explored: Vec<Position>,
    /// Terminal result, [`Outcome::Pending`] until the traversal stops.
    outcome: Outcome,
}

impl SearchState {
    /// Creates the initial state with only the start cell visited.
    fn new(start: Position) -> Self {
        Self {
            start,
            visited: HashSet::from([start]),
            frontier: VecDeque::new(),
            explored: Vec::new(),
            outcome: Outcome::Pending,
        }
    }

    /// Returns the cell the traversal started from.
    pub const fn start(&self) -> Position {
        self.start
    }

    /// Returns the set of visited cells.
    pub const fn visited(&self) -> &HashSet<Position> {
        &self.visited
    }

    /// Returns whether the cell has been visited.
    pub fn is_visited(&self, pos: Position) -> bool {
        self.visited.contains(&pos)
    }

    /// Returns the cells in the order they were first visited, without the start cell.
    pub fn explored(&self) -> &[Position] {
        &self.explored
    }

    /// Returns whether the cell appears in the explored log.
    pub fn is_explored(&self, pos: Position) -> bool {
        self.explored.contains(&pos)
    }

    /// Returns the number of cells waiting to be expanded.
    pub fn frontier_len(&self) -> usize {
        self.frontier.len()
    }

    /// Returns the outcome of the traversal.
    pub const fn outcome(&self) -> Outcome {
        self.outcome
    }

    /// Runs the traversal loop until a terminal outcome is reached.
    fn advance<F, O>(&mut self, grid: &Grid, is_exit: &F, observer: &mut O) -> Outcome
    where
        F: Fn(&Grid, Position) -> bool,
        O: SearchObserver + ?Sized,
    {
        self.frontier.push_back((self.start, 0));

        while let Some((pos, steps)) = self.frontier.pop_front() {
            // The exit test happens on dequeue so the reported count is the shortest one.
            if is_exit(grid, pos) {
                return Outcome::Found(steps);
            }

            for next in pos.neighbors() {
                if !grid.is_open(next) || !self.visited.insert(next) {
                    continue;
                }

                self.frontier.push_back((next, steps + 1));
                self.explored.push(next);
                trace!("discovered {next} at depth {}", steps + 1);

                if observer.on_step(self).is_break() {
                    return Outcome::Cancelled;
                }
            }
        }

        Outcome::NotFound
    }
}

/// Default exit predicate: an open cell on the outer border of the grid.
pub fn border_exit(grid: &Grid, pos: Position) -> bool {
    grid.is_border(pos) && grid.is_open(pos)
}

/// Builds an exit predicate accepting a single target cell.
pub fn target_exit(target: Position) -> impl Fn(&Grid, Position) -> bool {
    move |grid, pos| pos == target && grid.is_open(pos)
}

/// Runs a breadth-first search from `start` until a cell accepted by `is_exit` is dequeued.
///
/// Neighbors are expanded right, down, left, up. The observer is notified after every discovery
/// and once more when the outcome is set. The returned state always carries a terminal outcome
/// and an empty frontier.
///
/// # Errors
///
/// This function may return errors if:
/// - The start lies outside of the grid ([`MazeError::StartOutOfBounds`])
/// - The start is a wall ([`MazeError::StartIsWall`])
pub fn search<F, O>(
    grid: &Grid,
    start: Position,
    is_exit: F,
    observer: &mut O,
) -> Result<SearchState, MazeError>
where
    F: Fn(&Grid, Position) -> bool,
    O: SearchObserver + ?Sized,
{
    match grid.cell(start) {
        None => {
            return Err(MazeError::StartOutOfBounds {
                start,
                rows: grid.rows(),
                cols: grid.cols(),
            })
        }
        Some(Cell::Wall) => return Err(MazeError::StartIsWall { start }),
        Some(Cell::Open) => {}
    }

    info!(
        "searching {}x{} grid from {start}",
        grid.rows(),
        grid.cols()
    );

    let mut state = SearchState::new(start);
    state.outcome = state.advance(grid, &is_exit, observer);
    state.frontier.clear();

    info!(
        "search from {start} finished: {} ({} cells visited)",
        state.outcome,
        state.visited.len()
    );
    observer.on_done(&state);

    Ok(state)
}
