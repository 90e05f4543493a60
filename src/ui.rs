//! User interface rendering functions for the maze screen.

use color_eyre::eyre::{OptionExt as _, Result};
use ratatui::{
    layout::{Alignment, Constraint, Flex, Layout, Rect},
    style::{Color, Style},
    symbols::DOT,
    text::Line,
    widgets::{Block, BorderType, Borders, Clear},
    Frame,
};

use crate::{
    grid::{Cell, Grid, Position},
    presets::Preset,
    search::SearchState,
};

/// Width of a maze tile, in terminal columns.
pub(crate) const TILE_WIDTH: u16 = 6;

/// Height of a maze tile, in terminal rows.
pub(crate) const TILE_HEIGHT: u16 = 3;

/// Height of the status footer under the maze, in terminal rows.
pub(crate) const FOOTER_HEIGHT: u16 = 3;

/// Outline drawn around every tile.
const GRID_COLOR: Color = Color::Rgb(200, 200, 200);
/// Fill of wall tiles.
const WALL_COLOR: Color = Color::Rgb(0, 0, 0);
/// Fill of visited tiles once the search is over.
const PATH_COLOR: Color = Color::Rgb(0, 0, 255);
/// Fill of the start tile and of the player marker.
const START_COLOR: Color = Color::Rgb(0, 255, 0);
/// Background of the canvas and fill of plain open tiles.
const SCREEN_COLOR: Color = Color::Rgb(255, 255, 255);
/// Fill of tiles discovered while the search is running.
const EXPLORE_COLOR: Color = Color::Rgb(255, 255, 0);
/// Foreground of the status text and of the player marker.
const TEXT_COLOR: Color = Color::Rgb(0, 0, 0);

/// Everything needed to draw one frame of a search.
pub(crate) struct View<'view> {
    /// Maze being searched.
    pub grid: &'view Grid,
    /// Current search state.
    pub state: &'view SearchState,
    /// Caption shown in the footer border.
    pub caption: &'view str,
    /// Fixed canvas size as `(width, height)`, shared by every maze of a run.
    pub canvas: (u16, u16),
}

/// Computes the canvas size fitting the largest of the given mazes plus the footer.
///
/// # Errors
///
/// This function may return errors if:
/// - The preset list is empty
/// - The largest maze does not fit in a terminal-sized area
pub(crate) fn canvas_size(presets: &[Preset]) -> Result<(u16, u16)> {
    let max_rows = presets
        .iter()
        .map(|preset| preset.grid.rows())
        .max()
        .ok_or_eyre("no maze to size the canvas for")?;
    let max_cols = presets
        .iter()
        .map(|preset| preset.grid.cols())
        .max()
        .ok_or_eyre("no maze to size the canvas for")?;

    let width = u16::try_from(max_cols)?
        .checked_mul(TILE_WIDTH)
        .ok_or_eyre("maze is too wide to draw")?;
    let height = u16::try_from(max_rows)?
        .checked_mul(TILE_HEIGHT)
        .and_then(|height| height.checked_add(FOOTER_HEIGHT))
        .ok_or_eyre("maze is too tall to draw")?;

    Ok((width, height))
}

/// Picks the fill of a tile.
///
/// Walls win over everything, then the start cell, then visited cells once the search is over,
/// then cells discovered so far.
pub(crate) fn tile_color(state: &SearchState, pos: Position, cell: Cell) -> Color {
    if cell == Cell::Wall {
        WALL_COLOR
    } else if pos == state.start() {
        START_COLOR
    } else if state.outcome().is_finished() && state.is_visited(pos) {
        PATH_COLOR
    } else if state.is_explored(pos) {
        EXPLORE_COLOR
    } else {
        SCREEN_COLOR
    }
}

/// Clears the terminal screen by rendering a [`Clear`] widget.
pub(crate) fn clear(frame: &mut Frame) {
    frame.render_widget(Clear, frame.area());
}

/// Returns the offset that centers `inner` within `outer`.
fn centered_offset(outer: u16, inner: u16) -> Result<u16> {
    let free = (i32::from(outer) - i32::from(inner)).max(0);

    Ok(u16::try_from(rounded_div::i32(free, 2))?)
}

/// Renders a full frame: the maze tiles, the player marker and the status footer.
///
/// The canvas is centered in the terminal and clipped to it when the terminal is too small.
///
/// # Errors
///
/// This function may return errors from layout lookups or coordinate conversions.
pub(crate) fn draw(frame: &mut Frame, view: &View<'_>) -> Result<()> {
    clear(frame);

    let (canvas_width, canvas_height) = view.canvas;
    let column = *Layout::horizontal([Constraint::Length(canvas_width)])
        .flex(Flex::Center)
        .split(frame.area())
        .first()
        .ok_or_eyre("failed to get canvas column from layout")?;
    let canvas = *Layout::vertical([Constraint::Length(canvas_height)])
        .flex(Flex::Center)
        .split(column)
        .first()
        .ok_or_eyre("failed to get canvas area from layout")?;

    let layout = Layout::vertical([Constraint::Min(0), Constraint::Length(FOOTER_HEIGHT)])
        .split(canvas);
    let board = *layout
        .first()
        .ok_or_eyre("failed to get maze area from layout")?;
    let footer = *layout
        .last()
        .ok_or_eyre("failed to get footer area from layout")?;

    frame.render_widget(
        Block::default().style(Style::default().bg(SCREEN_COLOR)),
        canvas,
    );

    let grid_width = u16::try_from(view.grid.cols())?.saturating_mul(TILE_WIDTH);
    let grid_height = u16::try_from(view.grid.rows())?.saturating_mul(TILE_HEIGHT);
    let origin_x = board
        .x
        .saturating_add(centered_offset(board.width, grid_width)?);
    let origin_y = board
        .y
        .saturating_add(centered_offset(board.height, grid_height)?);

    for (pos, cell) in view.grid.cells() {
        let tile = tile_area(origin_x, origin_y, pos)?.intersection(board);
        if tile.is_empty() {
            continue;
        }

        let tile_block = Block::bordered()
            .border_type(BorderType::Plain)
            .border_style(Style::default().fg(GRID_COLOR))
            .style(Style::default().bg(tile_color(view.state, pos, cell)));
        frame.render_widget(tile_block, tile);
    }

    // Player marker, drawn over the start tile.
    let player = tile_area(origin_x, origin_y, view.state.start())?.intersection(board);
    if !player.is_empty() {
        let marker_block = Block::default().style(Style::default().bg(START_COLOR));
        let marker_area = marker_block.inner(player);
        frame.render_widget(marker_block, player);
        let marker_row = Layout::vertical([Constraint::Length(1)])
            .flex(Flex::Center)
            .split(marker_area);
        if let Some(row) = marker_row.first() {
            frame.render_widget(
                Line::styled(DOT, Style::default().fg(TEXT_COLOR)).centered(),
                *row,
            );
        }
    }

    status_footer(frame, footer, view);

    Ok(())
}

/// Returns the unclipped screen area of the tile at `pos`.
fn tile_area(origin_x: u16, origin_y: u16, pos: Position) -> Result<Rect> {
    let x = origin_x.saturating_add(u16::try_from(pos.col)?.saturating_mul(TILE_WIDTH));
    let y = origin_y.saturating_add(u16::try_from(pos.row)?.saturating_mul(TILE_HEIGHT));

    Ok(Rect::new(x, y, TILE_WIDTH, TILE_HEIGHT))
}

/// Renders the footer with the maze caption, the quit hint and the status line.
fn status_footer(frame: &mut Frame, area: Rect, view: &View<'_>) {
    let block = Block::bordered()
        .title(view.caption)
        .title(Line::raw("(q) quit").right_aligned())
        .title_alignment(Alignment::Left)
        .style(Style::default().fg(TEXT_COLOR).bg(SCREEN_COLOR))
        .border_type(BorderType::Plain)
        .borders(Borders::TOP);
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let status = Line::raw(view.state.outcome().to_string()).centered();
    frame.render_widget(status, inner);
}

#[cfg(test)]
mod tests {
    use std::ops::ControlFlow;

    use super::*;
    use crate::{
        presets,
        search::{self, border_exit, Headless, SearchObserver},
    };
    use ratatui::{backend::TestBackend, Terminal};

    /// Observer keeping a copy of the state at a given step.
    struct Snapshot {
        /// Step to copy the state at.
        at: usize,
        /// Copied state, once reached.
        state: Option<SearchState>,
    }

    impl SearchObserver for Snapshot {
        fn on_step(&mut self, state: &SearchState) -> ControlFlow<()> {
            if state.explored().len() == self.at {
                self.state = Some(state.clone());
            }
            ControlFlow::Continue(())
        }
    }

    /// Returns the first preset, used by most rendering tests.
    fn first_preset() -> Preset {
        presets::load()
            .expect("presets should parse")
            .into_iter()
            .next()
            .expect("first preset exists")
    }

    /// Draws a view on a test terminal of the given size.
    fn render(view: &View<'_>, width: u16, height: u16) -> Terminal<TestBackend> {
        let mut terminal =
            Terminal::new(TestBackend::new(width, height)).expect("failed to create test terminal");
        let _ = terminal
            .draw(|frame| draw(frame, view).expect("drawing should succeed in test"))
            .expect("terminal draw should succeed");
        terminal
    }

    /// Returns the background color inside the tile of `pos` for a canvas filling the terminal.
    fn tile_bg(terminal: &Terminal<TestBackend>, grid: &Grid, pos: Position) -> Color {
        let grid_width = u16::try_from(grid.cols()).expect("small grid") * TILE_WIDTH;
        let grid_height = u16::try_from(grid.rows()).expect("small grid") * TILE_HEIGHT;
        let (canvas_width, canvas_height) =
            canvas_size(&presets::load().expect("presets should parse")).expect("canvas fits");
        let board_height = canvas_height - FOOTER_HEIGHT;
        let origin_x = centered_offset(canvas_width, grid_width).expect("offset fits");
        let origin_y = centered_offset(board_height, grid_height).expect("offset fits");
        let x = origin_x + u16::try_from(pos.col).expect("small grid") * TILE_WIDTH + 1;
        let y = origin_y + u16::try_from(pos.row).expect("small grid") * TILE_HEIGHT + 1;

        terminal
            .backend()
            .buffer()
            .cell((x, y))
            .expect("tile lies inside the terminal")
            .bg
    }

    /// Returns the text of one terminal row.
    fn row_text(terminal: &Terminal<TestBackend>, row: u16) -> String {
        let buffer = terminal.backend().buffer();
        (0..buffer.area.width)
            .filter_map(|col| buffer.cell((col, row)))
            .map(ratatui::buffer::Cell::symbol)
            .collect()
    }

    #[test]
    fn test_canvas_size_fits_largest_preset() {
        let presets = presets::load().expect("presets should parse");

        let size = canvas_size(&presets).expect("canvas fits");

        assert_eq!(size, (8 * TILE_WIDTH, 8 * TILE_HEIGHT + FOOTER_HEIGHT));
    }

    #[test]
    fn test_canvas_size_without_presets() {
        assert!(canvas_size(&[]).is_err(), "empty preset list has no size");
    }

    #[test]
    fn test_centered_offset() {
        assert_eq!(centered_offset(48, 36).expect("offset fits"), 6);
        assert_eq!(centered_offset(10, 10).expect("offset fits"), 0);
        assert_eq!(centered_offset(4, 10).expect("offset fits"), 0);
    }

    #[test]
    fn test_tile_color_precedence_when_finished() {
        let preset = first_preset();
        let state = search::search(&preset.grid, preset.start, border_exit, &mut Headless)
            .expect("search should start");

        assert_eq!(
            tile_color(&state, Position::new(0, 0), Cell::Wall),
            WALL_COLOR
        );
        assert_eq!(tile_color(&state, preset.start, Cell::Open), START_COLOR);
        assert_eq!(
            tile_color(&state, Position::new(4, 5), Cell::Open),
            PATH_COLOR
        );
    }

    #[test]
    fn test_tile_color_while_running() {
        let preset = first_preset();
        let mut snapshot = Snapshot { at: 2, state: None };
        let _ = search::search(&preset.grid, preset.start, border_exit, &mut snapshot)
            .expect("search should start");
        let state = snapshot.state.expect("search reaches two discoveries");

        assert_eq!(
            tile_color(&state, Position::new(2, 1), Cell::Open),
            EXPLORE_COLOR
        );
        assert_eq!(
            tile_color(&state, Position::new(4, 5), Cell::Open),
            SCREEN_COLOR
        );
    }

    #[test]
    fn test_draw_finished_search() {
        let presets = presets::load().expect("presets should parse");
        let preset = presets.first().expect("first preset exists");
        let canvas = canvas_size(&presets).expect("canvas fits");
        let state = search::search(&preset.grid, preset.start, border_exit, &mut Headless)
            .expect("search should start");
        let view = View {
            grid: &preset.grid,
            state: &state,
            caption: preset.name,
            canvas,
        };

        let terminal = render(&view, canvas.0, canvas.1);

        assert_eq!(
            tile_bg(&terminal, &preset.grid, Position::new(0, 0)),
            WALL_COLOR
        );
        assert_eq!(
            tile_bg(&terminal, &preset.grid, Position::new(1, 1)),
            START_COLOR
        );
        assert_eq!(
            tile_bg(&terminal, &preset.grid, Position::new(4, 5)),
            PATH_COLOR
        );
        assert!(
            row_text(&terminal, canvas.1 - FOOTER_HEIGHT + 1).contains("Exit Found in 7 steps!"),
            "status line shows the outcome"
        );
        assert!(
            row_text(&terminal, canvas.1 - FOOTER_HEIGHT).contains(preset.name),
            "footer border shows the caption"
        );
    }

    #[test]
    fn test_draw_running_search() {
        let presets = presets::load().expect("presets should parse");
        let preset = presets.first().expect("first preset exists");
        let canvas = canvas_size(&presets).expect("canvas fits");
        let mut snapshot = Snapshot { at: 1, state: None };
        let _ = search::search(&preset.grid, preset.start, border_exit, &mut snapshot)
            .expect("search should start");
        let state = snapshot.state.expect("search reaches one discovery");
        let view = View {
            grid: &preset.grid,
            state: &state,
            caption: preset.name,
            canvas,
        };

        let terminal = render(&view, canvas.0, canvas.1);

        assert_eq!(
            tile_bg(&terminal, &preset.grid, Position::new(2, 1)),
            EXPLORE_COLOR
        );
        assert_eq!(
            tile_bg(&terminal, &preset.grid, Position::new(2, 2)),
            SCREEN_COLOR
        );
        assert!(
            row_text(&terminal, canvas.1 - FOOTER_HEIGHT + 1).contains("Searching..."),
            "status line shows the pending search"
        );
    }

    #[test]
    fn test_draw_in_small_terminal() {
        let presets = presets::load().expect("presets should parse");
        let preset = presets.last().expect("last preset exists");
        let canvas = canvas_size(&presets).expect("canvas fits");
        let state = search::search(&preset.grid, preset.start, border_exit, &mut Headless)
            .expect("search should start");
        let view = View {
            grid: &preset.grid,
            state: &state,
            caption: preset.name,
            canvas,
        };

        let mut terminal =
            Terminal::new(TestBackend::new(20, 10)).expect("failed to create test terminal");
        let result = terminal.draw(|frame| {
            draw(frame, &view).expect("drawing should succeed in a small terminal");
        });

        assert!(result.is_ok(), "clipped drawing should succeed");
    }

    #[test]
    fn test_clear_function() {
        let mut terminal =
            Terminal::new(TestBackend::new(10, 4)).expect("failed to create test terminal");

        let result = terminal.draw(|frame| {
            clear(frame);
        });

        assert!(result.is_ok(), "clearing screen should succeed");
    }
}
