use crate::{
    Error, Result,
    dash::{self, LiveWindow},
    directory::ChannelDirectory,
    filter::{self, FilterRule},
    playlist,
};
use axum::{
    http::{StatusCode, header},
    response::{IntoResponse, Response},
};
use log::{debug, info};
use percent_encoding::{AsciiSet, NON_ALPHANUMERIC, utf8_percent_encode};
use reqwest::Client;
use serde::Deserialize;
use url::Url;

// characters left alone by a uri component encoder
const COMPONENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'!')
    .remove(b'~')
    .remove(b'*')
    .remove(b'\'')
    .remove(b'(')
    .remove(b')');

/// Immutable configuration shared by every request.
#[derive(Clone, Debug)]
pub struct AppState {
    pub client: Client,
    pub directory_url: Url,
    /// Manifest urls not starting with this are redirected to, never rewritten.
    pub upstream_prefix: String,
    pub filters: Vec<FilterRule>,
    pub cache_max_age: u32,
    pub public_host: Option<String>,
    pub license_url: Option<String>,
}

#[derive(Clone, Debug, Default, Deserialize)]
pub struct ManifestRequest {
    pub id: Option<String>,
    #[serde(alias = "utc")]
    pub begin: Option<String>,
    #[serde(alias = "lutc")]
    pub end: Option<String>,
    /// Forwarded to every upstream fetch.
    #[serde(skip)]
    pub user_agent: Option<String>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Reply {
    Manifest {
        channel: String,
        body: String,
        cache_max_age: u32,
    },
    Redirect(String),
    Playlist {
        body: String,
    },
}

impl IntoResponse for Reply {
    fn into_response(self) -> Response {
        match self {
            Self::Manifest {
                channel,
                body,
                cache_max_age,
            } => {
                let filename = utf8_percent_encode(&channel, COMPONENT).to_string();
                (
                    [
                        (header::CONTENT_TYPE, "application/dash+xml".to_owned()),
                        (header::CACHE_CONTROL, format!("max-age={}, public", cache_max_age)),
                        (header::ACCESS_CONTROL_ALLOW_ORIGIN, "*".to_owned()),
                        (
                            header::CONTENT_DISPOSITION,
                            format!("attachment; filename=\"channel_{}.mpd\"", filename),
                        ),
                    ],
                    body,
                )
                    .into_response()
            }
            Self::Redirect(location) => (StatusCode::FOUND, [(header::LOCATION, location)]).into_response(),
            Self::Playlist { body } => (
                [
                    (header::CONTENT_TYPE, "audio/x-mpegurl"),
                    (header::CACHE_CONTROL, "max-age=84000, public"),
                    (header::CONTENT_DISPOSITION, "attachment; filename=\"playlist.m3u\""),
                ],
                body,
            )
                .into_response(),
        }
    }
}

/// Serve the rewritten manifest of one channel.
///
/// Parameters are validated before anything is fetched. A channel whose
/// upstream url is outside `upstream_prefix` is answered with a redirect.
pub async fn manifest(state: &AppState, request: ManifestRequest) -> Result<Reply> {
    let id = request
        .id
        .as_deref()
        .map(str::trim)
        .filter(|x| !x.is_empty())
        .ok_or(Error::MissingParameter("id"))?;
    let window = LiveWindow::from_query(request.begin.as_deref(), request.end.as_deref())?;
    let user_agent = request.user_agent.as_deref();

    let directory = ChannelDirectory::fetch(&state.client, &state.directory_url).await?;
    let upstream = directory
        .find(id)
        .and_then(|x| x.manifest_url())
        .ok_or_else(|| Error::ChannelNotFound(id.to_owned()))?;

    if !upstream.starts_with(&state.upstream_prefix) {
        info!("Redirecting channel {} to {}", id, upstream);
        return Ok(Reply::Redirect(upstream.to_owned()));
    }

    let url = Url::parse(upstream).map_err(|x| Error::upstream(upstream, x))?;
    let url = window.apply(&url);
    debug!("Resolved channel {} to {}", id, url);

    let manifest = dash::fetch_manifest(&state.client, &url, user_agent).await?;
    let pssh = dash::fetch_key_id(&state.client, &manifest, user_agent).await?;
    let body = dash::rewrite(&manifest, pssh.as_ref(), filter::find(&state.filters, id));

    info!(
        "Serving channel {} ({}, {})",
        id,
        if window.is_live_edge() { "live" } else { "catchup" },
        if pssh.is_some() { "widevine" } else { "unchanged protection" }
    );

    Ok(Reply::Manifest {
        channel: id.to_owned(),
        body,
        cache_max_age: state.cache_max_age,
    })
}

/// Serve the channel playlist with links back to `host`.
pub async fn playlist(state: &AppState, host: &str) -> Result<Reply> {
    let directory = ChannelDirectory::fetch(&state.client, &state.directory_url).await?;
    let host = state.public_host.as_deref().unwrap_or(host);
    let body = playlist::render(directory.channels(), host, state.license_url.as_deref());

    info!("Serving playlist of {} channels", directory.channels().len());
    Ok(Reply::Playlist { body })
}
