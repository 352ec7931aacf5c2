//! Command-line argument definitions for the UMLKit CLI.
//!
//! This module defines the [`Args`] structure parsed from the command line
//! using [`clap`]. Arguments control where diagrams are stored, which
//! configuration file is used, where commands are read from, and logging
//! verbosity.

use clap::Parser;

/// Command-line arguments for the UMLKit class diagram editor
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// Read commands from this file instead of the interactive prompt
    #[arg(help = "Path to a file of commands, one per line")]
    pub script: Option<String>,

    /// Path to configuration file (TOML)
    #[arg(short, long)]
    pub config: Option<String>,

    /// Directory for saved diagrams, overriding the configuration
    #[arg(short, long)]
    pub storage_dir: Option<String>,

    /// Log level (off, error, warn, info, debug, trace)
    #[arg(long, default_value = "warn")]
    pub log_level: String,
}
