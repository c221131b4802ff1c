use super::Options;
use crate::handler::{self, ManifestRequest, Reply};
use anyhow::Result;
use clap::Args;
use colored::Colorize;
use std::{fs, io::Write, path::PathBuf};

/// Rewrite the manifest of a single channel and print it.
#[derive(Debug, Clone, Args)]
pub struct Manifest {
    /// Channel id as listed in the channel directory.
    #[arg(required = true)]
    pub id: String,

    /// Start of the catchup window in unix epoch seconds.
    #[arg(long)]
    pub begin: Option<String>,

    /// End of the catchup window in unix epoch seconds.
    #[arg(long)]
    pub end: Option<String>,

    /// Write the manifest to this file instead of stdout.
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    #[command(flatten)]
    pub options: Options,
}

impl Manifest {
    pub async fn execute(self) -> Result<()> {
        let state = self.options.state(None, None)?;
        let request = ManifestRequest {
            id: Some(self.id),
            begin: self.begin,
            end: self.end,
            user_agent: None,
        };

        match handler::manifest(&state, request).await? {
            Reply::Manifest { body, .. } | Reply::Playlist { body } => match &self.output {
                Some(path) => fs::write(path, body)?,
                None => std::io::stdout().write_all(body.as_bytes())?,
            },
            Reply::Redirect(location) => {
                eprintln!("{} {}", "redirect".bold().yellow(), location);
            }
        }

        Ok(())
    }
}
