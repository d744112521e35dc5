//! SpriteBatch CLI - Command-line interface for sprite sheet batch rendering
//!
//! This binary validates project files, plans render batches, and renders
//! them through Blender.

use clap::Parser;
use std::process::ExitCode;

mod cli_args;

use cli_args::{Cli, Commands};
// Use modules from the library crate
use spritebatch_cli::commands;

fn init_logging(verbose: bool) {
    let default_filter = if verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_filter))
        .format_timestamp(None)
        .init();
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let result = match cli.command {
        Commands::Validate { project, json } => commands::validate::run(&project, json),
        Commands::Plan { project, json, out } => {
            commands::plan::run(&project, json, out.as_deref())
        }
        Commands::Render {
            project,
            blend,
            blender,
            timeout,
            json,
        } => commands::render::run(&project, &blend, blender.as_deref(), timeout, json),
    };

    match result {
        Ok(code) => code,
        Err(e) => {
            eprintln!("{}: {:#}", colored::Colorize::red("error"), e);
            ExitCode::from(1)
        }
    }
}
