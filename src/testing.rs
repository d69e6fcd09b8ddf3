//! Scripted in-memory `FootballApi` for unit tests.

use async_trait::async_trait;
use serde_json::{json, Value};
use std::collections::{HashMap, VecDeque};
use std::sync::{Arc, Mutex};

use crate::error::UpstreamError;
use crate::football::provider::FootballApi;
use crate::football::{ApiResponse, FixtureId};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Endpoint {
    Live,
    Fixture,
    Lineups,
    Statistics,
    HeadToHead,
}

/// What the fake upstream answers with.
#[derive(Debug, Clone)]
pub enum Reply {
    Records(Vec<Value>),
    /// 200 with a `response` that is not an array.
    Malformed,
    /// Transport-level failure.
    Fail,
}

impl Reply {
    fn into_result(self, path: &str) -> Result<ApiResponse, UpstreamError> {
        let body = match self {
            Reply::Records(records) => json!({
                "get": path,
                "errors": [],
                "results": records.len(),
                "response": records,
            }),
            Reply::Malformed => json!({"get": path, "errors": [], "response": null}),
            Reply::Fail => {
                return Err(UpstreamError::Status {
                    status: 503,
                    path: path.to_string(),
                })
            }
        };
        Ok(serde_json::from_value(body).expect("scripted body is a valid envelope"))
    }
}

/// Answers live-fixture calls from a queue (empty records once drained) and
/// every other endpoint with a fixed reply. Counts calls per endpoint.
#[derive(Default)]
pub struct ScriptedApi {
    live: Mutex<VecDeque<Reply>>,
    fixed: Mutex<HashMap<Endpoint, Reply>>,
    calls: Mutex<HashMap<Endpoint, usize>>,
    h2h_keys: Mutex<Vec<String>>,
}

impl ScriptedApi {
    pub fn new() -> Arc<Self> {
        Arc::new(ScriptedApi::default())
    }

    pub fn queue_live(&self, reply: Reply) {
        self.live.lock().unwrap().push_back(reply);
    }

    pub fn set(&self, endpoint: Endpoint, reply: Reply) {
        self.fixed.lock().unwrap().insert(endpoint, reply);
    }

    pub fn calls(&self, endpoint: Endpoint) -> usize {
        self.calls.lock().unwrap().get(&endpoint).copied().unwrap_or(0)
    }

    pub fn total_calls(&self) -> usize {
        self.calls.lock().unwrap().values().sum()
    }

    pub fn h2h_keys(&self) -> Vec<String> {
        self.h2h_keys.lock().unwrap().clone()
    }

    fn record(&self, endpoint: Endpoint) {
        *self.calls.lock().unwrap().entry(endpoint).or_default() += 1;
    }

    fn answer(&self, endpoint: Endpoint, path: &str) -> Result<ApiResponse, UpstreamError> {
        self.record(endpoint);
        let reply = self
            .fixed
            .lock()
            .unwrap()
            .get(&endpoint)
            .cloned()
            .unwrap_or(Reply::Records(vec![]));
        reply.into_result(path)
    }
}

#[async_trait]
impl FootballApi for ScriptedApi {
    async fn live_fixtures(&self) -> Result<ApiResponse, UpstreamError> {
        self.record(Endpoint::Live);
        let reply = self
            .live
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or(Reply::Records(vec![]));
        reply.into_result("fixtures")
    }

    async fn fixture(&self, _id: &FixtureId) -> Result<ApiResponse, UpstreamError> {
        self.answer(Endpoint::Fixture, "fixtures")
    }

    async fn lineups(&self, _id: &FixtureId) -> Result<ApiResponse, UpstreamError> {
        self.answer(Endpoint::Lineups, "fixtures/lineups")
    }

    async fn statistics(&self, _id: &FixtureId) -> Result<ApiResponse, UpstreamError> {
        self.answer(Endpoint::Statistics, "fixtures/statistics")
    }

    async fn head_to_head(
        &self,
        home_team_id: &str,
        away_team_id: &str,
    ) -> Result<ApiResponse, UpstreamError> {
        self.h2h_keys
            .lock()
            .unwrap()
            .push(format!("{}-{}", home_team_id, away_team_id));
        self.answer(Endpoint::HeadToHead, "fixtures/headtohead")
    }
}
