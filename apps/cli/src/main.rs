//! CodeTutor CLI — canned programming answers from the terminal.
//!
//! Matches questions against a static topic table and prints the canned
//! snippet, explanation, and a diagnostic token count.

mod commands;

use clap::Parser;
use color_eyre::eyre::Result;

use commands::Cli;

#[tokio::main]
async fn main() -> Result<()> {
    color_eyre::install()?;
    let cli = Cli::parse();
    commands::init_tracing(&cli);
    commands::run(cli).await
}
