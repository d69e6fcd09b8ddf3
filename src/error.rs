use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

use crate::football::TeamSide;

/// Anything that went wrong while talking to the upstream football API.
///
/// Timeouts, refused connections, non-2xx statuses and undecodable bodies all
/// land here; callers decide per call site whether that is fatal.
#[derive(Debug, Error)]
pub enum UpstreamError {
    #[error("request to {path} timed out")]
    Timeout { path: String },

    #[error("request to {path} failed: {source}")]
    Request {
        path: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("upstream returned HTTP {status} for {path}")]
    Status { status: u16, path: String },

    #[error("failed to decode response from {path}: {source}")]
    Decode {
        path: String,
        #[source]
        source: reqwest::Error,
    },
}

impl UpstreamError {
    /// Classify a reqwest failure for `path`.
    pub fn from_reqwest(path: &str, err: reqwest::Error) -> Self {
        let path = path.to_string();
        if err.is_timeout() {
            UpstreamError::Timeout { path }
        } else if err.is_decode() {
            UpstreamError::Decode { path, source: err }
        } else {
            UpstreamError::Request { path, source: err }
        }
    }
}

/// Errors surfaced to HTTP callers.
#[derive(Debug, Error)]
pub enum ProxyError {
    #[error("upstream unavailable: {0}")]
    UpstreamUnavailable(#[from] UpstreamError),

    #[error("match {fixture_id} not found")]
    MatchNotFound { fixture_id: String },

    #[error("match {fixture_id} has no {missing} team id")]
    IncompleteTeamData {
        fixture_id: String,
        missing: TeamSide,
    },

    #[error("internal error: {0}")]
    Internal(String),
}

impl ProxyError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            ProxyError::UpstreamUnavailable(_) | ProxyError::Internal(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
            ProxyError::MatchNotFound { .. } | ProxyError::IncompleteTeamData { .. } => {
                StatusCode::NOT_FOUND
            }
        }
    }

    /// Message placed in the `error` field of the response body. Upstream
    /// details stay in the logs.
    pub fn public_message(&self) -> &'static str {
        match self {
            ProxyError::UpstreamUnavailable(_) => "Error fetching data from API",
            ProxyError::MatchNotFound { .. } => "Match not found",
            ProxyError::IncompleteTeamData { .. } => "Incomplete team data for match",
            ProxyError::Internal(_) => "Error fetching match details",
        }
    }
}

impl IntoResponse for ProxyError {
    fn into_response(self) -> Response {
        (
            self.status_code(),
            Json(json!({ "error": self.public_message() })),
        )
            .into_response()
    }
}
