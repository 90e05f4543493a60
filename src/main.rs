//! This crate contains the source code for the binary of the mazewalk demonstration.

#![expect(
    clippy::cargo_common_metadata,
    reason = "Temporary allow during development."
)]
#![expect(
    unused_crate_dependencies,
    reason = "The dependencies are used in the library crate."
)]

use clap::Parser as _;
use color_eyre::{eyre::Result, install};
use mazewalk::{App, Config};

fn main() -> Result<()> {
    install()?;

    let config = Config::parse();
    config.init_logging()?;
    let app = App::new(config);

    let mut terminal = ratatui::init();
    let result = app.and_then(|mut app| app.run(&mut terminal));
    ratatui::restore();

    result
}
