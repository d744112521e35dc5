//! CLI argument definitions for the SpriteBatch command-line interface.
//!
//! All `#[derive(Parser)]` and `#[derive(Subcommand)]` types are defined here,
//! keeping `main.rs` focused on dispatch logic.

use clap::{Parser, Subcommand};

/// SpriteBatch - Sprite sheet batch rendering
#[derive(Parser)]
#[command(name = "spritebatch")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub(crate) struct Cli {
    /// Enable debug logging (overridden by RUST_LOG)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub(crate) enum Commands {
    /// Validate a project file without rendering
    Validate {
        /// Path to the project file (JSON)
        #[arg(short, long)]
        project: String,

        /// Output machine-readable JSON diagnostics (no colored output)
        #[arg(long)]
        json: bool,
    },

    /// List every still a render would write, without rendering
    Plan {
        /// Path to the project file (JSON)
        #[arg(short, long)]
        project: String,

        /// Output machine-readable JSON (no colored output)
        #[arg(long)]
        json: bool,

        /// Write the run report with every job to this file
        #[arg(short, long)]
        out: Option<String>,
    },

    /// Render every selected object in Blender
    ///
    /// A started render cannot be cancelled; it runs every frame and angle of
    /// every selected object. Use `plan` first to see the shot count.
    Render {
        /// Path to the project file (JSON)
        #[arg(short, long)]
        project: String,

        /// Blender scene to render
        #[arg(short, long)]
        blend: String,

        /// Path to the Blender executable (default: BLENDER_PATH, then PATH)
        #[arg(long)]
        blender: Option<String>,

        /// Blender timeout in seconds (default: 3600)
        #[arg(long)]
        timeout: Option<u64>,

        /// Output machine-readable JSON (no colored output)
        #[arg(long)]
        json: bool,
    },
}
