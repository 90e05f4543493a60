//! Command line configuration and logging setup.

use std::{fs::File, path::PathBuf, time::Duration};

use clap::Parser;
use color_eyre::eyre::Result;
use env_logger::{Builder, Env, Target};

/// Runtime configuration of the demonstration.
///
/// Every option has a default, so running the binary without arguments plays the demonstration at
/// two frames per second and cycles forever.
#[derive(Clone, Debug, PartialEq, Eq, Parser)]
#[command(version, about)]
pub struct Config {
    /// Delay between two discovered cells, in milliseconds.
    #[arg(long, value_name = "MS", default_value_t = 500)]
    pub step_delay_ms: u64,
    /// Time the final frame of each maze stays on screen, in milliseconds.
    #[arg(long, value_name = "MS", default_value_t = 2000)]
    pub dwell_ms: u64,
    /// Play every maze once and exit instead of cycling.
    #[arg(long)]
    pub once: bool,
    /// Write logs to this file; logging is off otherwise since the terminal is taken by the UI.
    #[arg(long, value_name = "PATH")]
    pub log_file: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            step_delay_ms: 500,
            dwell_ms: 2000,
            once: false,
            log_file: None,
        }
    }
}

impl Config {
    /// Returns the pause taken after every discovered cell.
    pub const fn step_delay(&self) -> Duration {
        Duration::from_millis(self.step_delay_ms)
    }

    /// Returns the time the final frame of a maze stays on screen.
    pub const fn dwell(&self) -> Duration {
        Duration::from_millis(self.dwell_ms)
    }

    /// Installs the global logger when a log file was requested.
    ///
    /// The filter is read from `RUST_LOG` and defaults to `info`.
    ///
    /// # Errors
    ///
    /// This function may return errors if:
    /// - The log file cannot be created
    /// - A global logger has already been installed
    pub fn init_logging(&self) -> Result<()> {
        let Some(path) = &self.log_file else {
            return Ok(());
        };

        let file = File::create(path)?;
        Builder::from_env(Env::default().default_filter_or("info"))
            .format_timestamp_micros()
            .target(Target::Pipe(Box::new(file)))
            .try_init()?;

        log::info!("logging to {}", path.display());

        Ok(())
    }
}
