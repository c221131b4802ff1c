use crate::{
    Error, Result,
    handler::{self, AppState, ManifestRequest, Reply},
};
use axum::{
    Router,
    extract::{Path, Query, State},
    http::{HeaderMap, header},
    routing::get,
};
use log::info;
use std::{net::SocketAddr, sync::Arc};
use tokio::net::TcpListener;

pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/manifest.mpd", get(manifest))
        .route("/playlist.m3u", get(playlist))
        .route("/:file", get(channel_manifest))
        .with_state(state)
}

/// Bind `address` and serve until ctrl-c.
pub async fn serve(address: SocketAddr, state: Arc<AppState>) -> std::io::Result<()> {
    let listener = TcpListener::bind(address).await?;
    info!("Listening on http://{}", listener.local_addr()?);

    axum::serve(listener, router(state))
        .with_graceful_shutdown(async {
            let _ = tokio::signal::ctrl_c().await;
            info!("Shutting down");
        })
        .await
}

async fn manifest(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    Query(mut request): Query<ManifestRequest>,
) -> Result<Reply> {
    request.user_agent = user_agent(&headers);
    handler::manifest(&state, request).await
}

async fn channel_manifest(
    State(state): State<Arc<AppState>>,
    Path(file): Path<String>,
    headers: HeaderMap,
    Query(mut request): Query<ManifestRequest>,
) -> Result<Reply> {
    let id = file
        .strip_suffix(".mpd")
        .ok_or_else(|| Error::ChannelNotFound(file.clone()))?;

    request.id = Some(id.to_owned());
    request.user_agent = user_agent(&headers);
    handler::manifest(&state, request).await
}

async fn playlist(State(state): State<Arc<AppState>>, headers: HeaderMap) -> Result<Reply> {
    let host = headers
        .get(header::HOST)
        .and_then(|x| x.to_str().ok())
        .unwrap_or("localhost");
    handler::playlist(&state, host).await
}

fn user_agent(headers: &HeaderMap) -> Option<String> {
    headers
        .get(header::USER_AGENT)
        .and_then(|x| x.to_str().ok())
        .map(str::to_owned)
}
