use crate::{
    filter::{self, FilterRule},
    handler::AppState,
};
use anyhow::Result;
use clap::Args;
use reqwest::{Client, Url};
use std::{path::PathBuf, time::Duration};

/// Upstream and rewrite options shared by every command.
#[derive(Debug, Clone, Args)]
pub struct Options {
    /// Url of the channel directory (json array of channel records).
    #[arg(
        long,
        help_heading = "Upstream Options",
        default_value = "https://raw.githubusercontent.com/ttoor5/tataplay_urls/main/origin.json"
    )]
    pub directory_url: Url,

    /// Only manifests whose url starts with this prefix are rewritten,
    /// every other channel is redirected to its upstream url.
    #[arg(long, help_heading = "Upstream Options", default_value = "https://bpprod")]
    pub upstream_prefix: String,

    /// Timeout in seconds for every upstream request.
    #[arg(long, help_heading = "Upstream Options", default_value_t = 10)]
    pub timeout: u64,

    /// User agent for upstream requests when the client does not send one.
    #[arg(long, help_heading = "Upstream Options", default_value = "third-party")]
    pub user_agent: String,

    /// Json file with per channel representation filters.
    /// By default streams above 720p are dropped for channels 244 and 599.
    #[arg(long, help_heading = "Rewrite Options")]
    pub filters: Option<PathBuf>,

    /// Max age in seconds advertised for rewritten manifests.
    #[arg(long, help_heading = "Rewrite Options", default_value_t = 20)]
    pub cache_max_age: u32,
}

impl Options {
    pub fn client(&self) -> Result<Client> {
        let client = Client::builder()
            .timeout(Duration::from_secs(self.timeout))
            .user_agent(&self.user_agent)
            .build()?;
        Ok(client)
    }

    pub fn filter_rules(&self) -> Result<Vec<FilterRule>> {
        match &self.filters {
            Some(path) => filter::load_rules(path),
            None => Ok(filter::default_rules()),
        }
    }

    pub fn state(&self, public_host: Option<String>, license_url: Option<String>) -> Result<AppState> {
        Ok(AppState {
            client: self.client()?,
            directory_url: self.directory_url.clone(),
            upstream_prefix: self.upstream_prefix.clone(),
            filters: self.filter_rules()?,
            cache_max_age: self.cache_max_age,
            public_host,
            license_url,
        })
    }
}
