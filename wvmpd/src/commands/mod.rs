mod manifest;
mod options;
mod serve;

pub use manifest::Manifest;
pub use options::Options;
pub use serve::Serve;

use clap::{Parser, Subcommand};
use log::LevelFilter;

/// Rewrite DASH manifests with Widevine signaling rebuilt from their audio init segment.
#[derive(Debug, Clone, Parser)]
#[command(version, about)]
pub struct Args {
    #[command(subcommand)]
    pub command: Commands,

    /// Log debug messages with their source location.
    #[arg(short, long, global = true, conflicts_with = "quiet")]
    pub verbose: bool,

    /// Only log warnings and errors.
    #[arg(short, long, global = true)]
    pub quiet: bool,
}

impl Args {
    pub fn log_level(&self) -> LevelFilter {
        if self.verbose {
            LevelFilter::Debug
        } else if self.quiet {
            LevelFilter::Warn
        } else {
            LevelFilter::Info
        }
    }
}

#[derive(Debug, Clone, Subcommand)]
pub enum Commands {
    Manifest(Manifest),
    Serve(Serve),
}
