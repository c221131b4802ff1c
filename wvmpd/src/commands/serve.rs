use super::Options;
use crate::server;
use anyhow::Result;
use clap::Args;
use std::{net::SocketAddr, sync::Arc};

/// Serve rewritten manifests and the channel playlist over http.
#[derive(Debug, Clone, Args)]
pub struct Serve {
    /// Socket address to listen on.
    #[arg(short, long, default_value = "0.0.0.0:8080")]
    pub address: SocketAddr,

    /// Host used in playlist links.
    /// By default the host header of the playlist request is used.
    #[arg(long)]
    pub public_host: Option<String>,

    /// Clearkey license url written into the playlist, `{id}` is replaced by the channel id.
    #[arg(long)]
    pub license_url: Option<String>,

    #[command(flatten)]
    pub options: Options,
}

impl Serve {
    pub async fn execute(self) -> Result<()> {
        let state = self.options.state(self.public_host, self.license_url)?;
        server::serve(self.address, Arc::new(state)).await?;
        Ok(())
    }
}
