//! Animated breadth-first search escaping a set of preset mazes.
//!
//! The library splits into a headless part, the [`Grid`] model and the [`search()`] traversal that
//! reports progress to a [`SearchObserver`], and a terminal front end, [`App`], which cycles
//! through the compiled-in mazes and draws every step of the search.

#![expect(
    clippy::cargo_common_metadata,
    reason = "Temporary allow during development."
)]

mod app;
mod config;
mod events;
mod grid;
mod presets;
mod search;
mod types;
mod ui;

pub use app::App;
pub use config::Config;
pub use grid::{Cell, Grid, Position};
pub use search::{border_exit, search, target_exit, Headless, SearchObserver, SearchState};
pub use types::{MazeError, Outcome};
