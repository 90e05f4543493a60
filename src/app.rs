//! Core application state and the demonstration loop.

use std::{io, ops::ControlFlow, time::Duration};

use color_eyre::eyre::{Report, Result};
use log::debug;
use ratatui::{backend::Backend, DefaultTerminal, Terminal};

use crate::{
    config::Config,
    events::{InputSource, Keyboard},
    grid::Grid,
    presets::{self, Preset},
    search::{self, border_exit, SearchObserver, SearchState},
    ui::{self, View},
};

/// Application state container for the demonstration.
///
/// This structure holds the mazes the demonstration cycles through, the index of the one being
/// shown and the exit flag checked by the main loop.
pub struct App {
    /// Runtime configuration.
    config: Config,
    /// Mazes shown in order, wrapping around.
    presets: Vec<Preset>,
    /// Index of the maze currently on screen.
    current: usize,
    /// Canvas size fitting every maze, so the picture does not jump between mazes.
    canvas: (u16, u16),
    /// Application exit flag.
    ///
    /// This field starts off `false` and is set when the user asks to quit or, with
    /// [`Config::once`], after the last maze.
    exit: bool,
}

impl App {
    /// Creates a new instance of the application with the compiled-in mazes.
    ///
    /// # Errors
    ///
    /// This function may return errors if a compiled-in maze is malformed or too large to draw.
    pub fn new(config: Config) -> Result<Self> {
        let presets = presets::load()?;
        let canvas = ui::canvas_size(&presets)?;

        Ok(Self {
            config,
            presets,
            current: 0,
            canvas,
            exit: false,
        })
    }

    /// Runs the main loop of the application.
    ///
    /// Every maze is searched with the animation paced by the configured step delay, then its final
    /// frame stays on screen for the dwell time before moving on. The loop continues until the user
    /// quits.
    ///
    /// # Errors
    ///
    /// This function may return errors from drawing to or reading from the terminal.
    pub fn run(&mut self, terminal: &mut DefaultTerminal) -> Result<()> {
        self.run_with(terminal, &mut Keyboard)
    }

    /// Runs the main loop against any backend and input source.
    pub(crate) fn run_with<B, I>(&mut self, terminal: &mut Terminal<B>, input: &mut I) -> Result<()>
    where
        B: Backend,
        I: InputSource,
    {
        while !self.exit {
            self.play_current(terminal, input)?;
            self.advance();
        }

        debug!("leaving the demonstration loop");

        Ok(())
    }

    /// Searches the current maze on screen and dwells on the result.
    fn play_current<B, I>(&mut self, terminal: &mut Terminal<B>, input: &mut I) -> Result<()>
    where
        B: Backend,
        I: InputSource,
    {
        let Some(preset) = self.presets.get(self.current) else {
            self.exit = true;
            return Ok(());
        };
        debug!("showing maze {}: {}", self.current, preset.name);

        let caption = format!(
            " {} ({}/{}) ",
            preset.name,
            self.current + 1,
            self.presets.len()
        );
        let mut painter = Painter {
            terminal,
            input,
            grid: &preset.grid,
            caption: &caption,
            canvas: self.canvas,
            step_delay: self.config.step_delay(),
            quit: false,
            error: None,
        };

        let _ = search::search(&preset.grid, preset.start, border_exit, &mut painter)?;

        if let Some(err) = painter.error {
            return Err(err);
        }
        if painter.quit || painter.input.wait_for_quit(self.config.dwell())? {
            debug!("quit requested");
            self.exit = true;
        }

        Ok(())
    }

    /// Moves on to the next maze, wrapping around unless only one pass was requested.
    fn advance(&mut self) {
        self.current += 1;
        if self.current >= self.presets.len() {
            self.current = 0;
            if self.config.once {
                self.exit = true;
            }
        }
    }
}

/// Search observer drawing every step to the terminal.
///
/// After each discovered cell the painter redraws the maze and then waits out the step delay while
/// listening for a quit request, which stops the search.
struct Painter<'run, B: Backend, I: InputSource> {
    /// Terminal drawn to.
    terminal: &'run mut Terminal<B>,
    /// Input polled while pacing the animation.
    input: &'run mut I,
    /// Maze being searched.
    grid: &'run Grid,
    /// Caption shown in the footer.
    caption: &'run str,
    /// Canvas size shared by every maze.
    canvas: (u16, u16),
    /// Pause after every drawn step.
    step_delay: Duration,
    /// Whether a quit request arrived during the search.
    quit: bool,
    /// First drawing or input error, reported once the search returns.
    error: Option<Report>,
}

impl<B: Backend, I: InputSource> Painter<'_, B, I> {
    /// Draws one frame for the given state.
    fn paint(&mut self, state: &SearchState) -> Result<()> {
        let view = View {
            grid: self.grid,
            state,
            caption: self.caption,
            canvas: self.canvas,
        };
        let _ = self
            .terminal
            .try_draw(|frame| ui::draw(frame, &view).map_err(io::Error::other))?;

        Ok(())
    }
}

impl<B: Backend, I: InputSource> SearchObserver for Painter<'_, B, I> {
    fn on_step(&mut self, state: &SearchState) -> ControlFlow<()> {
        let step = self
            .paint(state)
            .and_then(|()| self.input.wait_for_quit(self.step_delay));

        match step {
            Ok(false) => ControlFlow::Continue(()),
            Ok(true) => {
                self.quit = true;
                ControlFlow::Break(())
            }
            Err(err) => {
                self.error = Some(err);
                ControlFlow::Break(())
            }
        }
    }

    fn on_done(&mut self, state: &SearchState) {
        if let Err(err) = self.paint(state) {
            let _ = self.error.get_or_insert(err);
        }
    }
}
