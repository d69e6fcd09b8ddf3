//! Last-known-good list of live fixtures.
//!
//! Both the on-demand listing path and the background refresher write here.
//! The snapshot is held behind an `Arc` and swapped whole under the write
//! lock, so readers always see either the previous list or the new one.
//!
//! Fallback is deliberately asymmetric: an upstream that answers with no
//! usable records is served from the cache, while a transport failure on the
//! on-demand path is reported to the caller.

use chrono::{DateTime, Utc};
use serde_json::Value;
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::{debug, error, warn};

use crate::error::ProxyError;
use crate::football::{ApiResponse, FootballApiHandle};

pub const STALE_MESSAGE: &str = "No live data available from API, returning cached data";

/// One full replacement of the live-matches list.
#[derive(Debug, Default)]
pub struct Snapshot {
    pub matches: Vec<Value>,
    /// `None` until the first successful fetch.
    pub refreshed_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Freshness {
    Fresh,
    Stale,
}

/// Result of `get_live_matches`.
#[derive(Debug)]
pub enum LiveMatches {
    /// Upstream answered with records; the payload is passed through untouched.
    Fresh(ApiResponse),
    /// Upstream answered with nothing usable; the last good snapshot instead.
    Stale {
        snapshot: Arc<Snapshot>,
        message: &'static str,
    },
}

impl LiveMatches {
    pub fn freshness(&self) -> Freshness {
        match self {
            LiveMatches::Fresh(_) => Freshness::Fresh,
            LiveMatches::Stale { .. } => Freshness::Stale,
        }
    }

    pub fn matches(&self) -> &[Value] {
        match self {
            LiveMatches::Fresh(payload) => payload.records().unwrap_or_default(),
            LiveMatches::Stale { snapshot, .. } => &snapshot.matches,
        }
    }
}

/// What a background refresh did to the cache.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RefreshOutcome {
    Replaced(usize),
    Empty,
    Failed,
}

#[derive(Clone)]
pub struct LiveMatchCache {
    api: FootballApiHandle,
    current: Arc<RwLock<Arc<Snapshot>>>,
}

impl LiveMatchCache {
    pub fn new(api: FootballApiHandle) -> Self {
        LiveMatchCache {
            api,
            current: Arc::new(RwLock::new(Arc::new(Snapshot::default()))),
        }
    }

    /// The current snapshot without touching upstream.
    pub async fn snapshot(&self) -> Arc<Snapshot> {
        Arc::clone(&*self.current.read().await)
    }

    async fn replace(&self, matches: Vec<Value>) {
        let count = matches.len();
        let next = Arc::new(Snapshot {
            matches,
            refreshed_at: Some(Utc::now()),
        });
        *self.current.write().await = next;
        debug!("Live match cache replaced ({} matches)", count);
    }

    /// Fetch live fixtures now, falling back to the cached list when upstream
    /// has no records. Transport failures are returned as errors.
    pub async fn get_live_matches(&self) -> Result<LiveMatches, ProxyError> {
        let payload = self.api.live_fixtures().await.map_err(|e| {
            error!("Error fetching live matches: {}", e);
            ProxyError::UpstreamUnavailable(e)
        })?;

        match payload.records() {
            Some(records) if !records.is_empty() => {
                self.replace(records.to_vec()).await;
                Ok(LiveMatches::Fresh(payload))
            }
            _ => {
                let snapshot = self.snapshot().await;
                warn!(
                    "Upstream returned no live matches, serving {} cached",
                    snapshot.matches.len()
                );
                Ok(LiveMatches::Stale {
                    snapshot,
                    message: STALE_MESSAGE,
                })
            }
        }
    }

    /// Background refresh: replace on success, otherwise leave the cache alone.
    pub async fn refresh(&self) -> RefreshOutcome {
        match self.api.live_fixtures().await {
            Ok(payload) => {
                let records = payload.into_records();
                if records.is_empty() {
                    debug!("Background refresh: no live matches, keeping cache");
                    RefreshOutcome::Empty
                } else {
                    let count = records.len();
                    self.replace(records).await;
                    RefreshOutcome::Replaced(count)
                }
            }
            Err(e) => {
                warn!("Background refresh failed: {}", e);
                RefreshOutcome::Failed
            }
        }
    }
}
