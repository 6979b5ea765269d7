//! CodeTutor TUI — interactive chat interface for canned programming answers.
//!
//! A Chat tab talks to the response engine on a worker thread; a Topics tab
//! browses the loaded table. Built with `ratatui` + `crossterm`.

mod app;
mod screens;
mod widgets;
mod worker;

use color_eyre::eyre::Result;

fn main() -> Result<()> {
    color_eyre::install()?;
    app::run()
}
