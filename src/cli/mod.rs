//! CLI interface using clap.
//!
//! Provides command-line arguments and subcommands for the tool.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::application::OutputFormat;

/// bookmarksync - Keep GTK, KDE and Qt file dialog bookmarks in sync.
#[derive(Parser, Debug)]
#[command(name = "bookmarksync")]
#[command(author, version, about, long_about = None, arg_required_else_help = true)]
pub struct Cli {
    /// Enable verbose logging (use multiple times for more verbosity).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Configuration file (defaults to ~/.config/bookmarksync/config.toml).
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Copy the places of one backend to all the others.
    Sync {
        /// Source backend: gtk, kde or qt.
        #[arg(short = 'f', long = "from", alias = "sync-from")]
        from: String,
    },

    /// Print the places stored by one backend.
    List {
        /// Backend to read: gtk, kde or qt.
        backend: String,

        /// Output format: table, json, or plain.
        #[arg(short, long, default_value = "table")]
        format: String,
    },

    /// Show the store file used by each backend.
    Paths,

    /// Write a default configuration file if none exists.
    InitConfig,
}

impl Commands {
    /// Parse the output format argument of `list`.
    pub fn output_format(&self) -> Result<OutputFormat, String> {
        match self {
            Self::List { format, .. } => format.parse(),
            _ => Ok(OutputFormat::default()),
        }
    }
}
