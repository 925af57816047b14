//! Feynsketch CLI - Turn drawn Feynman diagram canvases into PNG and TikZ

mod cli;
mod colorizer;

use clap::Parser;

fn main() {
    let cli_args = cli::Cli::parse();

    // Logging is installed inside run() once flags and environment are known
    let mut app = cli::FeynsketchApp::new();

    if let Err(e) = app.run(cli_args) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
