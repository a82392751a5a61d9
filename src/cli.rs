//! Command-line interface definitions.
//!
//! Defines all CLI arguments and subcommands using clap.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// notepress: publish tagged notes as blog posts
#[derive(Parser, Debug, Clone)]
#[command(version, about, long_about = None, arg_required_else_help = true)]
pub struct Cli {
    /// Project root; relative paths in the config resolve against it
    #[arg(short, long)]
    pub root: Option<PathBuf>,

    /// Config file name (default: notepress.toml)
    #[arg(short = 'C', long, default_value = "notepress.toml")]
    pub config: PathBuf,

    /// Notes directory (overrides `[source.notes]`)
    #[arg(short, long)]
    pub notes: Option<PathBuf>,

    /// Attachments directory (overrides `[source.assets]`)
    #[arg(short, long)]
    pub assets: Option<PathBuf>,

    /// Posts output directory (overrides `[output.posts]`)
    #[arg(short, long)]
    pub posts: Option<PathBuf>,

    /// Images output directory (overrides `[output.assets]`)
    #[arg(short, long)]
    pub images: Option<PathBuf>,

    /// subcommands
    #[command(subcommand)]
    pub command: Commands,
}

/// Available subcommands
#[derive(Subcommand, Debug, Clone)]
pub enum Commands {
    /// Write a default notepress.toml into the root directory
    Init,

    /// Publish every tagged note that changed since its last export
    Publish {
        /// Republish even when the existing post is newer than the note
        #[arg(short, long)]
        force: bool,
    },
}

impl Cli {
    pub const fn is_init(&self) -> bool {
        matches!(self.command, Commands::Init)
    }
}
