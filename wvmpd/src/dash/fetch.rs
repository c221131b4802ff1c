use super::init_segment_url;
use crate::{Error, Result};
use log::{debug, info, warn};
use reqwest::{Client, RequestBuilder, Response, header};
use url::Url;
use wvmpd_mp4::pssh::{self, WidevinePssh};

/// Upstream manifest text together with the url it was served from.
#[derive(Clone, Debug)]
pub struct Manifest {
    pub text: String,
    pub url: Url,
}

impl Manifest {
    /// `scheme://host[:port]` of the manifest url, used to anchor media paths.
    pub fn origin(&self) -> String {
        self.url.origin().ascii_serialization()
    }
}

pub async fn fetch_manifest(client: &Client, url: &Url, user_agent: Option<&str>) -> Result<Manifest> {
    debug!("Fetching manifest {}", url);
    let response = send(request(client, url, user_agent)).await?;
    let url = response.url().to_owned();
    let text = response
        .text()
        .await
        .map_err(|x| Error::upstream(url.as_str(), x))?;

    Ok(Manifest { text, url })
}

/// Fetch the audio segment referenced by `manifest` and build a Widevine `pssh`
/// box from its key id.
///
/// `Ok(None)` when the manifest has no usable audio segment reference, the
/// segment answers with an error status or has no readable `pssh` box.
/// Transport failures are returned as errors.
pub async fn fetch_key_id(
    client: &Client,
    manifest: &Manifest,
    user_agent: Option<&str>,
) -> Result<Option<WidevinePssh>> {
    let Some(url) = init_segment_url(manifest) else {
        return Ok(None);
    };

    debug!("Fetching init segment {}", url);
    let response = request(client, &url, user_agent)
        .send()
        .await
        .map_err(|x| Error::upstream(url.as_str(), x))?;
    let status = response.status();

    if !status.is_success() {
        warn!("Init segment {} answered {}, keeping original content protection", url, status);
        return Ok(None);
    }

    let data = response
        .bytes()
        .await
        .map_err(|x| Error::upstream(url.as_str(), x))?;

    match pssh::extract_key_id(&data) {
        Ok(key_id) => {
            info!("KeyId {} found in {}", key_id.uuid(), url);
            Ok(Some(WidevinePssh::new(key_id)))
        }
        Err(e) => {
            warn!("{} ({}), keeping original content protection", e, url);
            Ok(None)
        }
    }
}

fn request(client: &Client, url: &Url, user_agent: Option<&str>) -> RequestBuilder {
    let request = client.get(url.as_str());

    match user_agent {
        Some(user_agent) => request.header(header::USER_AGENT, user_agent),
        None => request,
    }
}

async fn send(request: RequestBuilder) -> Result<Response> {
    let response = request.send().await.map_err(|x| {
        let url = x.url().map(|y| y.to_string()).unwrap_or_default();
        Error::upstream(&url, x)
    })?;
    let status = response.status();

    if !status.is_success() {
        return Err(Error::upstream(response.url().as_str(), status));
    }

    Ok(response)
}
