use crate::{Error, Result};
use log::debug;
use reqwest::Client;
use serde::Deserialize;
use std::collections::HashMap;
use url::Url;

/// `streamData` key holding the DASH manifest url.
pub const DASH_STREAM: &str = "MPD=";

#[derive(Clone, Debug, Deserialize)]
pub struct Channel {
    pub id: String,
    pub channel_name: Option<String>,
    pub channel_logo: Option<String>,
    pub channel_genre: Option<Vec<String>>,
    #[serde(default, rename = "streamData")]
    pub stream_data: HashMap<String, Option<String>>,
}

impl Channel {
    pub fn manifest_url(&self) -> Option<&str> {
        self.stream_data
            .get(DASH_STREAM)
            .and_then(|x| x.as_deref())
            .filter(|x| !x.is_empty())
    }
}

/// Ordered channel records as published by the directory.
#[derive(Clone, Debug, Default)]
pub struct ChannelDirectory {
    channels: Vec<Channel>,
}

impl ChannelDirectory {
    pub async fn fetch(client: &Client, url: &Url) -> Result<Self> {
        debug!("Fetching channel directory {}", url);

        let response = client
            .get(url.as_str())
            .send()
            .await
            .map_err(|x| Error::upstream(url.as_str(), x))?;
        let status = response.status();

        if !status.is_success() {
            return Err(Error::upstream(url.as_str(), status));
        }

        let text = response
            .text()
            .await
            .map_err(|x| Error::upstream(url.as_str(), x))?;
        Self::from_json(&text).map_err(|x| Error::upstream(url.as_str(), x))
    }

    pub fn from_json(text: &str) -> serde_json::Result<Self> {
        Ok(Self {
            channels: serde_json::from_str(text)?,
        })
    }

    pub fn channels(&self) -> &[Channel] {
        &self.channels
    }

    /// First channel with exactly this id.
    pub fn find(&self, id: &str) -> Option<&Channel> {
        self.channels.iter().find(|x| x.id == id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const CHANNELS: &str = r#"[
        {
            "id": "244",
            "channel_name": "Sports HD",
            "channel_logo": "sports.png",
            "channel_genre": ["Sports"],
            "streamData": {
                "MPD=": "https://bpprod4linear.akamaized.net/bpk-tv/ch244/output/master.mpd",
                "M3U8=": null
            }
        },
        { "id": "12", "streamData": { "MPD=": null } },
        { "id": "13" }
    ]"#;

    #[test]
    fn test_find() {
        let directory = ChannelDirectory::from_json(CHANNELS).unwrap();
        let channel = directory.find("244").unwrap();

        assert_eq!(channel.channel_name.as_deref(), Some("Sports HD"));
        assert_eq!(
            channel.manifest_url(),
            Some("https://bpprod4linear.akamaized.net/bpk-tv/ch244/output/master.mpd")
        );
        assert!(directory.find("24").is_none());
        assert_eq!(directory.channels().len(), 3);
    }

    #[test]
    fn test_missing_dash_stream() {
        let directory = ChannelDirectory::from_json(CHANNELS).unwrap();
        assert!(directory.find("12").unwrap().manifest_url().is_none());
        assert!(directory.find("13").unwrap().manifest_url().is_none());
    }
}
