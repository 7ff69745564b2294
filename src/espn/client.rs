//! Cache-fronted loader for upstream view documents.
//!
//! Reads go through the object store first; a miss triggers a live fetch,
//! legacy normalization, and — for historical seasons only — a cache write.
//! The current season's data changes during the week and is always fetched
//! live; every other season is immutable history with no expiry.

use reqwest::header::HeaderMap;
use reqwest::Client;
use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::cli::types::{LeagueId, Season, Week};
use crate::core::store::{CacheKey, ObjectStore, ViewKey};
use crate::error::{AlmanacError, Result};
use crate::espn::http::{is_legacy, request_headers, view_url, View, FFL_BASE_URL};
use crate::espn::types::{
    MatchupDocument, NavDocument, SettingsDocument, StandingsDocument, TeamsDocument,
};
use crate::util::current_year;

pub struct EspnClient<S: ObjectStore> {
    http: Client,
    headers: HeaderMap,
    store: S,
    base_url: String,
}

impl<S: ObjectStore> EspnClient<S> {
    pub fn new(store: S) -> Result<Self> {
        Self::with_base_url(store, FFL_BASE_URL)
    }

    /// Client pointed at an alternate upstream base URL.
    pub fn with_base_url(store: S, base_url: impl Into<String>) -> Result<Self> {
        Ok(Self {
            http: Client::new(),
            headers: request_headers()?,
            store,
            base_url: base_url.into(),
        })
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Load one view document, from cache when possible.
    ///
    /// Week-scoped requests bypass the cache entirely: the store key carries
    /// no week, so caching them would collide across weeks.
    pub async fn load_view(
        &self,
        league_id: LeagueId,
        season: Season,
        view: View,
        week: Option<Week>,
    ) -> Result<Value> {
        let key = ViewKey {
            league_id,
            season,
            view,
        }
        .object_key();

        if week.is_none() {
            if let Some(body) = self.store.get(&key)? {
                tracing::debug!(key, "cache hit");
                return Ok(serde_json::from_str(&body)?);
            }
        }

        let url = view_url(&self.base_url, league_id, season, view, week);
        tracing::debug!(%url, "fetching upstream view");
        let doc: Value = self
            .http
            .get(&url)
            .headers(self.headers.clone())
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;
        let doc = normalize_legacy(season, view, doc)?;

        // A not-found error document must not poison the key for a real
        // season fetched later, so it never gets written.
        if should_cache(season, week) && !is_not_found(&doc) {
            self.store.put(&key, &serde_json::to_string(&doc)?)?;
        } else {
            tracing::debug!(key, "skipping cache write");
        }

        Ok(doc)
    }

    pub async fn matchups(&self, league_id: LeagueId, season: Season) -> Result<MatchupDocument> {
        let doc = self
            .load_view(league_id, season, View::MatchupScore, None)
            .await?;
        decode(View::MatchupScore, doc)
    }

    pub async fn teams(&self, league_id: LeagueId, season: Season) -> Result<TeamsDocument> {
        let doc = self.load_view(league_id, season, View::Team, None).await?;
        decode(View::Team, doc)
    }

    pub async fn settings(&self, league_id: LeagueId, season: Season) -> Result<SettingsDocument> {
        let doc = self
            .load_view(league_id, season, View::Settings, None)
            .await?;
        decode(View::Settings, doc)
    }

    pub async fn nav(&self, league_id: LeagueId, season: Season) -> Result<NavDocument> {
        let doc = self.load_view(league_id, season, View::Nav, None).await?;
        decode(View::Nav, doc)
    }

    pub async fn standings_teams(
        &self,
        league_id: LeagueId,
        season: Season,
    ) -> Result<StandingsDocument> {
        let doc = self.load_view(league_id, season, View::Team, None).await?;
        decode(View::Team, doc)
    }
}

/// Validate a raw document into its typed projection; a missing expected
/// field is fatal for the request.
pub fn decode<T: DeserializeOwned>(view: View, doc: Value) -> Result<T> {
    serde_json::from_value(doc)
        .map_err(|e| AlmanacError::malformed(format!("{view} document: {e}")))
}

/// Unwrap the one-element array legacy seasons come wrapped in, so cached
/// and live results share one shape.
pub fn normalize_legacy(season: Season, view: View, doc: Value) -> Result<Value> {
    if !is_legacy(season) {
        return Ok(doc);
    }
    match doc {
        Value::Array(mut items) => {
            if items.is_empty() {
                Err(AlmanacError::malformed(format!(
                    "empty legacy wrapper for {view} in {season}"
                )))
            } else {
                Ok(items.remove(0))
            }
        }
        other => Err(AlmanacError::malformed(format!(
            "expected legacy array wrapper for {view} in {season}, got {}",
            json_kind(&other)
        ))),
    }
}

/// Historical seasons are cached; the in-progress calendar year is not.
pub fn should_cache(season: Season, week: Option<Week>) -> bool {
    week.is_none() && season.as_u16() != current_year()
}

/// ESPN answers requests for seasons a league never played with a 200 whose
/// body is an error document.
pub fn is_not_found(doc: &Value) -> bool {
    doc.get("details")
        .and_then(|d| d.get(0))
        .and_then(|e| e.get("type"))
        .and_then(|t| t.as_str())
        == Some("GENERAL_NOT_FOUND")
}

fn json_kind(v: &Value) -> &'static str {
    match v {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::store::FsStore;
    use serde_json::json;
    use tempfile::tempdir;
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::TcpListener;

    /// Serve one HTTP response on an ephemeral port, returning the base URL.
    async fn serve_once(body: String) -> String {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            let (mut socket, _) = listener.accept().await.unwrap();
            let mut buf = [0u8; 2048];
            let _ = socket.read(&mut buf).await;
            let response = format!(
                "HTTP/1.1 200 OK\r\ncontent-type: application/json\r\ncontent-length: {}\r\nconnection: close\r\n\r\n{}",
                body.len(),
                body
            );
            socket.write_all(response.as_bytes()).await.unwrap();
        });
        format!("http://{addr}")
    }

    #[test]
    fn test_normalize_legacy_unwraps_2015() {
        let wrapped = json!([{ "teams": [{ "id": 1, "name": "Team A" }] }]);
        let doc = normalize_legacy(Season::new(2015), View::Team, wrapped).unwrap();
        assert_eq!(doc["teams"][0]["name"], "Team A");
    }

    #[test]
    fn test_normalize_legacy_passes_modern_through() {
        let modern = json!({ "teams": [] });
        let doc = normalize_legacy(Season::new(2024), View::Team, modern.clone()).unwrap();
        assert_eq!(doc, modern);
    }

    #[test]
    fn test_normalize_legacy_empty_wrapper_is_malformed() {
        let result = normalize_legacy(Season::new(2015), View::Team, json!([]));
        assert!(matches!(result, Err(AlmanacError::Malformed { .. })));
    }

    #[test]
    fn test_normalize_legacy_non_array_is_malformed() {
        let result = normalize_legacy(Season::new(2015), View::Team, json!({"teams": []}));
        assert!(matches!(result, Err(AlmanacError::Malformed { .. })));
    }

    #[test]
    fn test_should_cache_skips_current_year() {
        let this_year = Season::new(current_year());
        assert!(!should_cache(this_year, None));
        assert!(should_cache(Season::new(2015), None));
    }

    #[test]
    fn test_should_cache_skips_week_scoped_requests() {
        assert!(!should_cache(Season::new(2015), Some(Week::new(3))));
    }

    #[test]
    fn test_decode_missing_field_reports_view() {
        let err = decode::<MatchupDocument>(View::MatchupScore, json!({ "scoringPeriodId": 1 }))
            .unwrap_err();
        assert!(err.to_string().contains("mMatchupScore"));
    }

    #[tokio::test]
    async fn test_cache_miss_stores_the_unwrapped_legacy_document() {
        let base = serve_once(r#"[{"teams":[{"id":1,"name":"Throwbacks"}]}]"#.to_string()).await;
        let dir = tempdir().unwrap();
        let client = EspnClient::with_base_url(FsStore::new(dir.path()), base).unwrap();

        let doc = client
            .load_view(LeagueId::new(1), Season::new(2015), View::Team, None)
            .await
            .unwrap();
        assert_eq!(doc["teams"][0]["name"], "Throwbacks");

        // What landed in the store is the unwrapped document, so later hits
        // decode identically to this live fetch.
        let key = ViewKey {
            league_id: LeagueId::new(1),
            season: Season::new(2015),
            view: View::Team,
        }
        .object_key();
        let stored: Value =
            serde_json::from_str(&client.store().get(&key).unwrap().unwrap()).unwrap();
        assert_eq!(stored, json!({ "teams": [{ "id": 1, "name": "Throwbacks" }] }));
    }

    #[tokio::test]
    async fn test_not_found_document_is_never_cached() {
        let base = serve_once(r#"{"details":[{"type":"GENERAL_NOT_FOUND"}]}"#.to_string()).await;
        let dir = tempdir().unwrap();
        let client = EspnClient::with_base_url(FsStore::new(dir.path()), base).unwrap();

        let doc = client
            .load_view(LeagueId::new(1), Season::new(2023), View::Status, None)
            .await
            .unwrap();
        assert!(is_not_found(&doc));

        let key = ViewKey {
            league_id: LeagueId::new(1),
            season: Season::new(2023),
            view: View::Status,
        }
        .object_key();
        assert_eq!(client.store().get(&key).unwrap(), None);
    }

    #[test]
    fn test_is_not_found_detects_details_payload() {
        let doc = json!({ "details": [{ "type": "GENERAL_NOT_FOUND" }] });
        assert!(is_not_found(&doc));
        assert!(!is_not_found(&json!({ "seasonId": 2024 })));
    }

    #[tokio::test]
    async fn test_load_view_returns_cached_document_without_network() {
        let dir = tempdir().unwrap();
        let store = FsStore::new(dir.path());
        let key = ViewKey {
            league_id: LeagueId::new(1),
            season: Season::new(2015),
            view: View::Team,
        }
        .object_key();
        store
            .put(&key, r#"{"teams":[{"id":3,"name":"Cached"}]}"#)
            .unwrap();

        let client = EspnClient::new(store).unwrap();
        let doc = client
            .load_view(LeagueId::new(1), Season::new(2015), View::Team, None)
            .await
            .unwrap();
        assert_eq!(doc["teams"][0]["name"], "Cached");
    }
}
