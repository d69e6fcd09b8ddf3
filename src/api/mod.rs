use axum::{
    extract::{Path, State},
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use chrono::{DateTime, Utc};
use serde::Serialize;
use serde_json::Value;
use std::sync::Arc;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::{debug, error};

use crate::error::ProxyError;
use crate::football::FixtureId;
use crate::live_matches::{LiveMatchCache, LiveMatches};
use crate::match_detail::{MatchDetailAggregator, MatchDetailBundle};

#[derive(Clone)]
pub struct AppState {
    pub live_matches: LiveMatchCache,
    pub match_detail: MatchDetailAggregator,
}

/// Build the Axum router for the public API.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/api/football", get(live_matches_handler))
        .route("/api/football/:id", get(match_detail_handler))
        .route("/health", get(health_handler))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(Arc::new(state))
}

/// Body served when the cache stands in for an empty upstream answer.
#[derive(Serialize)]
struct StaleBody<'a> {
    response: &'a [Value],
    message: &'a str,
}

/// GET /api/football
async fn live_matches_handler(State(state): State<Arc<AppState>>) -> Result<Response, ProxyError> {
    let live = state.live_matches.get_live_matches().await?;
    debug!(
        "Serving {} live matches ({:?})",
        live.matches().len(),
        live.freshness()
    );

    let response = match &live {
        LiveMatches::Fresh(payload) => Json(payload).into_response(),
        LiveMatches::Stale { snapshot, message } => Json(StaleBody {
            response: &snapshot.matches,
            message,
        })
        .into_response(),
    };
    Ok(response)
}

/// GET /api/football/:id
///
/// Aggregation runs in its own task so upstream calls already in flight
/// finish even if the client goes away.
async fn match_detail_handler(
    State(state): State<Arc<AppState>>,
    Path(raw_id): Path<String>,
) -> Result<Json<MatchDetailBundle>, ProxyError> {
    let id = FixtureId::parse(&raw_id).ok_or(ProxyError::MatchNotFound { fixture_id: raw_id })?;

    let aggregator = state.match_detail.clone();
    let task = tokio::spawn(async move { aggregator.get_match_detail(&id).await });

    match task.await {
        Ok(result) => result.map(Json),
        Err(e) => {
            error!("Error fetching match details: {}", e);
            Err(ProxyError::Internal(e.to_string()))
        }
    }
}

#[derive(Serialize)]
struct HealthBody {
    status: &'static str,
    cached_matches: usize,
    last_refreshed: Option<DateTime<Utc>>,
}

/// GET /health
async fn health_handler(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    let snapshot = state.live_matches.snapshot().await;
    Json(HealthBody {
        status: "ok",
        cached_matches: snapshot.matches.len(),
        last_refreshed: snapshot.refreshed_at,
    })
}
