use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use log::{error, warn};
use thiserror::Error;

/// Errors which end a request. DRM extraction failures never show up here,
/// those are recovered inside [`crate::dash::fetch_key_id`].
#[derive(Debug, Error)]
pub enum Error {
    #[error("{0} parameter is missing")]
    MissingParameter(&'static str),

    #[error("{name} parameter is invalid: '{value}'")]
    InvalidParameter { name: &'static str, value: String },

    #[error("channel {0} not found")]
    ChannelNotFound(String),

    #[error("failed to fetch {url}: {reason}")]
    UpstreamFetchFailed { url: String, reason: String },
}

impl Error {
    pub(crate) fn upstream<T: ToString>(url: &str, reason: T) -> Self {
        Self::UpstreamFetchFailed {
            url: url.to_owned(),
            reason: reason.to_string(),
        }
    }

    pub fn status(&self) -> StatusCode {
        match self {
            Self::MissingParameter(_) | Self::InvalidParameter { .. } => StatusCode::BAD_REQUEST,
            Self::ChannelNotFound(_) => StatusCode::NOT_FOUND,
            Self::UpstreamFetchFailed { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        let status = self.status();

        if status.is_server_error() {
            error!("{}", self);
        } else {
            warn!("{}", self);
        }

        (status, self.to_string()).into_response()
    }
}

pub type Result<T> = std::result::Result<T, Error>;
