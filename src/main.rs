use std::path::Path;

use clap::Parser;
use todo::cli::commands::Cli;
use todo::cli::handlers;

fn main() {
    let cli = Cli::parse();

    let result = match cli.command {
        // No subcommand → launch TUI
        None => todo::tui::run(cli.store_dir.as_deref().map(Path::new)),
        Some(_) => handlers::dispatch(cli),
    };

    if let Err(e) = result {
        eprintln!("error: {}", e);
        std::process::exit(1);
    }
}
