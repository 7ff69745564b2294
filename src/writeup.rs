//! Narrative-writeup cache lookup and dispatch.
//!
//! A generated markdown writeup for (league, year, week) lives in the object
//! store. On a miss the external summarization job is triggered with the
//! computed rankings as context — a one-way send with no return channel and
//! no retry — and the caller gets a pending result to re-poll later.

use serde::Serialize;

use crate::cli::types::{LeagueId, Season, Week};
use crate::core::store::{CacheKey, ObjectStore, WriteupKey};
use crate::error::Result;
use crate::rankings::RankedTeam;

/// Env var naming the summarization job's HTTP endpoint.
pub const WRITEUP_URL_ENV_VAR: &str = "FFL_ALMANAC_WRITEUP_URL";

/// Payload handed to the summarization job.
#[derive(Debug, Clone, Serialize)]
pub struct WriteupRequest {
    pub league_id: LeagueId,
    pub year: Season,
    pub week: Week,
    pub teams: Vec<RankedTeam>,
}

/// Outcome of a writeup lookup.
#[derive(Debug, Clone, PartialEq)]
pub enum WriteupStatus {
    /// The writeup exists and is returned synchronously.
    Found(String),
    /// No writeup yet; generation was triggered, re-poll later.
    Pending,
}

/// One-way trigger for the external summarization job.
///
/// Implementations must not block the caller and must not retry; redundant
/// concurrent triggers are tolerated downstream.
pub trait WriteupTrigger: Send + Sync {
    fn trigger(&self, request: WriteupRequest);
}

/// Fire-and-forget HTTP POST from a spawned task.
pub struct HttpTrigger {
    http: reqwest::Client,
    url: String,
}

impl HttpTrigger {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            http: reqwest::Client::new(),
            url: url.into(),
        }
    }

    /// Build from `FFL_ALMANAC_WRITEUP_URL`, if set.
    pub fn from_env() -> Option<Self> {
        std::env::var(WRITEUP_URL_ENV_VAR).ok().map(Self::new)
    }
}

impl WriteupTrigger for HttpTrigger {
    fn trigger(&self, request: WriteupRequest) {
        let http = self.http.clone();
        let url = self.url.clone();
        tokio::spawn(async move {
            if let Err(e) = http.post(&url).json(&request).send().await {
                tracing::warn!(%url, error = %e, "writeup trigger failed");
            }
        });
    }
}

/// Used when no endpoint is configured; lookups still work, misses stay
/// pending forever.
pub struct NoopTrigger;

impl WriteupTrigger for NoopTrigger {
    fn trigger(&self, request: WriteupRequest) {
        tracing::debug!(
            league_id = %request.league_id,
            week = %request.week,
            "no writeup endpoint configured, skipping trigger"
        );
    }
}

/// Look up the writeup for (league, year, week); trigger generation on miss.
///
/// A store fault other than a missing key propagates — it is not a pending
/// state.
pub fn get_or_trigger<S: ObjectStore>(
    store: &S,
    trigger: &dyn WriteupTrigger,
    league_id: LeagueId,
    year: Season,
    week: Week,
    teams: &[RankedTeam],
) -> Result<WriteupStatus> {
    let key = WriteupKey {
        league_id,
        season: year,
        week,
    }
    .object_key();

    match store.get(&key)? {
        Some(text) => Ok(WriteupStatus::Found(text)),
        None => {
            trigger.trigger(WriteupRequest {
                league_id,
                year,
                week,
                teams: teams.to_vec(),
            });
            Ok(WriteupStatus::Pending)
        }
    }
}
