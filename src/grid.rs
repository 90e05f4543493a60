//! Maze grid data and validation module.
//!
//! This module contains the [`Grid`] type along with the [`Cell`] and [`Position`] types it is
//! built from. Grids are immutable once built and can only be obtained through validating
//! constructors, so every grid handed to the search is non-empty and rectangular.

use std::fmt;

use crate::types::MazeError;

/// Offsets visited around a cell, in expansion order: right, down, left, up.
///
/// The order is part of the observable behavior since it decides which of several equally short
/// exits is reported and the order in which cells light up on screen.
const NEIGHBOR_OFFSETS: [(isize, isize); 4] = [(0, 1), (1, 0), (0, -1), (-1, 0)];

/// Kind of a single maze cell.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Cell {
    /// Impassable cell, written as `1` in the textual form.
    Wall,
    /// Walkable cell, written as `0` in the textual form.
    Open,
}

impl Cell {
    /// Maps a textual grid symbol to a cell kind.
    pub(crate) const fn from_symbol(symbol: char) -> Option<Self> {
        match symbol {
            '1' => Some(Self::Wall),
            '0' => Some(Self::Open),
            _ => None,
        }
    }

    /// Returns the textual grid symbol for this cell kind.
    pub(crate) const fn symbol(self) -> char {
        match self {
            Self::Wall => '1',
            Self::Open => '0',
        }
    }

    /// Returns whether the cell can be walked on.
    pub const fn is_open(self) -> bool {
        matches!(self, Self::Open)
    }
}

/// Row and column of a cell within a grid.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Position {
    /// Zero-based row, growing downwards.
    pub row: usize,
    /// Zero-based column, growing to the right.
    pub col: usize,
}

impl Position {
    /// Builds a position from a row and a column.
    pub const fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }

    /// Returns the orthogonal neighbors of this position in expansion order.
    ///
    /// Neighbors that would fall above the first row or left of the first column are skipped. The
    /// lower and right bounds depend on the grid and are left for the caller to check.
    pub fn neighbors(self) -> impl Iterator<Item = Self> {
        NEIGHBOR_OFFSETS
            .into_iter()
            .filter_map(move |(row_offset, col_offset)| {
                Some(Self::new(
                    self.row.checked_add_signed(row_offset)?,
                    self.col.checked_add_signed(col_offset)?,
                ))
            })
    }
}

impl fmt::Display for Position {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(formatter, "({}, {})", self.row, self.col)
    }
}

/// Immutable rectangular maze.
///
/// This structure holds the maze as a list of rows of cells. The constructors guarantee at least
/// one row, at least one column and a uniform row length.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Grid {
    /// Maze content as rows of cells.
    cells: Vec<Vec<Cell>>,
    /// Width shared by every row.
    width: usize,
}

impl Grid {
    /// Builds a grid from rows of cells.
    ///
    /// # Errors
    ///
    /// This function may return errors if:
    /// - There are no rows, or the first row is empty ([`MazeError::EmptyGrid`])
    /// - Any row differs in length from the first one ([`MazeError::RaggedRow`])
    pub fn new(cells: Vec<Vec<Cell>>) -> Result<Self, MazeError> {
        let width = cells.first().map_or(0, Vec::len);
        if width == 0 {
            return Err(MazeError::EmptyGrid);
        }

        if let Some((row, line)) = cells
            .iter()
            .enumerate()
            .find(|(_, line)| line.len() != width)
        {
            return Err(MazeError::RaggedRow {
                row,
                expected: width,
                found: line.len(),
            });
        }

        Ok(Self { cells, width })
    }

    /// Parses a grid from its textual form.
    ///
    /// Every non-blank line is a row and every non-whitespace character a cell, `1` for a wall and
    /// `0` for an open cell. Whitespace between cells is ignored, so both `"101"` and `"1 0 1"`
    /// describe the same row.
    ///
    /// # Errors
    ///
    /// This function may return errors if:
    /// - A symbol other than `0` or `1` is found ([`MazeError::InvalidCell`])
    /// - The resulting rows do not form a grid (see [`Grid::new`])
    pub fn parse(text: &str) -> Result<Self, MazeError> {
        let mut cells = Vec::new();
        for (row, line) in text.lines().filter(|line| !line.trim().is_empty()).enumerate() {
            let parsed = line
                .chars()
                .filter(|symbol| !symbol.is_whitespace())
                .enumerate()
                .map(|(col, symbol)| {
                    Cell::from_symbol(symbol).ok_or(MazeError::InvalidCell { row, col, symbol })
                })
                .collect::<Result<Vec<_>, _>>()?;
            cells.push(parsed);
        }

        Self::new(cells)
    }

    /// Returns the number of rows.
    pub fn rows(&self) -> usize {
        self.cells.len()
    }

    /// Returns the number of columns.
    pub const fn cols(&self) -> usize {
        self.width
    }

    /// Returns the cell at the given position, or `None` when it lies outside of the grid.
    pub fn cell(&self, pos: Position) -> Option<Cell> {
        self.cells
            .get(pos.row)
            .and_then(|line| line.get(pos.col))
            .copied()
    }

    /// Returns whether the position lies inside of the grid and is walkable.
    pub fn is_open(&self, pos: Position) -> bool {
        self.cell(pos).is_some_and(Cell::is_open)
    }

    /// Returns whether the position lies on the outermost rows or columns of the grid.
    pub fn is_border(&self, pos: Position) -> bool {
        pos.row == 0 || pos.col == 0 || pos.row + 1 == self.rows() || pos.col + 1 == self.width
    }

    /// Iterates over every cell together with its position, row by row.
    pub fn cells(&self) -> impl Iterator<Item = (Position, Cell)> + '_ {
        self.cells.iter().enumerate().flat_map(|(row, line)| {
            line.iter()
                .enumerate()
                .map(move |(col, cell)| (Position::new(row, col), *cell))
        })
    }
}

impl fmt::Display for Grid {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        for line in &self.cells {
            let row: String = line.iter().copied().map(Cell::symbol).collect();
            writeln!(formatter, "{row}")?;
        }

        Ok(())
    }
}
