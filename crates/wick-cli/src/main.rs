//! wick CLI - development server and build runner with live reload.
//!
//! This is the main entry point for wick. It handles command-line argument
//! parsing, logging initialization, and command dispatch.

use clap::Parser;
use miette::Result;
use wick_cli::{cli, commands, error, logger, ui};

#[tokio::main]
async fn main() -> Result<()> {
    // Parse command-line arguments
    let args = cli::Cli::parse();

    // Initialize logging and colors based on global flags
    logger::init_logger(args.verbose, args.quiet, args.no_color);
    ui::init_colors();

    // Execute the appropriate command
    let result = match args.command {
        cli::Command::Serve(serve_args) => commands::serve_execute(serve_args).await,
        cli::Command::Build(build_args) => commands::build_execute(build_args).await,
    };

    // Convert CLI errors to miette diagnostics for rendered error reporting
    result.map_err(error::cli_error_to_miette)
}
