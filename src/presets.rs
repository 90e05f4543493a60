//! Compiled-in demonstration mazes.
//!
//! This module holds the mazes the driver cycles through. They are written in the textual grid
//! form and parsed on load, so a typo in one of them surfaces as a [`MazeError`] instead of a
//! panic.

use crate::{
    grid::{Grid, Position},
    types::MazeError,
};

/// Demonstration mazes as `(name, layout, start)` triples.
const LAYOUTS: [(&str, &str, Position); 3] = [
    (
        "Winding corridor",
        "\
111111
101001
100011
111011
100000
111111",
        Position::new(1, 1),
    ),
    (
        "Sealed loop",
        "\
1111111
1011111
1000001
1111101
1000001
1111111",
        Position::new(1, 1),
    ),
    (
        "Twin shafts",
        "\
11111111
10010001
10110101
10100101
10110101
10000111
10110001
10111101",
        Position::new(1, 1),
    ),
];

/// Maze shown by the driver, with its start cell.
#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) struct Preset {
    /// Caption shown in the footer.
    pub name: &'static str,
    /// Maze layout.
    pub grid: Grid,
    /// Cell the search starts from.
    pub start: Position,
}

/// Parses every demonstration maze.
///
/// # Errors
///
/// This function may return errors if one of the compiled-in layouts is not a valid grid.
pub(crate) fn load() -> Result<Vec<Preset>, MazeError> {
    LAYOUTS
        .into_iter()
        .map(|(name, layout, start)| {
            Ok(Preset {
                name,
                grid: Grid::parse(layout)?,
                start,
            })
        })
        .collect()
}
