//! HTTP surface exposing the almanac reports.
//!
//! Every route takes the league ID as a `leagueId` query parameter. Record
//! routes additionally accept `startyear`, `endyear`, `count`, `playoffs`
//! ("true" to include playoff weeks) and `bestworst` ("best" or "worst").

use std::sync::Arc;

use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::{IntoResponse, Json, Response},
    routing::get,
    Router,
};
use serde::Deserialize;
use serde_json::json;
use tower::ServiceBuilder;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::cli::types::LeagueId;
use crate::core::store::FsStore;
use crate::error::{AlmanacError, Result};
use crate::espn::client::EspnClient;
use crate::reports;
use crate::writeup::{HttpTrigger, NoopTrigger, WriteupTrigger};

pub struct AppState {
    pub client: EspnClient<FsStore>,
    pub trigger: Box<dyn WriteupTrigger>,
}

impl AppState {
    pub fn from_env() -> Result<Self> {
        let trigger: Box<dyn WriteupTrigger> = match HttpTrigger::from_env() {
            Some(t) => Box::new(t),
            None => Box::new(NoopTrigger),
        };
        Ok(Self {
            client: EspnClient::new(FsStore::default())?,
            trigger,
        })
    }
}

pub async fn serve(port: u16) -> Result<()> {
    let state = Arc::new(AppState::from_env()?);
    let app = create_router().with_state(state);

    let listener = tokio::net::TcpListener::bind(format!("0.0.0.0:{port}")).await?;
    tracing::info!("almanac API listening on port {}", port);

    axum::serve(listener, app).await?;
    Ok(())
}

fn create_router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/", get(health))
        .route("/info", get(info_handler))
        .route("/standings", get(standings_handler))
        .route("/individual-weeks", get(weeks_handler))
        .route("/individual-seasons", get(seasons_handler))
        .route("/matchups", get(matchups_handler))
        .route("/power-rankings", get(power_rankings_handler))
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(CorsLayer::permissive()),
        )
}

async fn health() -> &'static str {
    "OK"
}

/// Almanac errors rendered as HTTP responses.
///
/// An empty season is a normal answer, not a fault: clients get a 200 with
/// an error message in the body, matching what the frontend expects early
/// in September. Upstream trouble maps to 502, everything else to 500.
struct ApiError(AlmanacError);

impl From<AlmanacError> for ApiError {
    fn from(err: AlmanacError) -> Self {
        Self(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match &self.0 {
            AlmanacError::SeasonNotStarted => {
                (StatusCode::OK, Json(json!({ "error": self.0.to_string() }))).into_response()
            }
            AlmanacError::Http(_) | AlmanacError::Malformed { .. } => {
                tracing::error!(error = %self.0, "upstream failure");
                (
                    StatusCode::BAD_GATEWAY,
                    Json(json!({ "error": self.0.to_string() })),
                )
                    .into_response()
            }
            _ => {
                tracing::error!(error = %self.0, "request failed");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(json!({ "error": self.0.to_string() })),
                )
                    .into_response()
            }
        }
    }
}

#[derive(Debug, Deserialize)]
struct LeagueQuery {
    #[serde(rename = "leagueId")]
    league_id: LeagueId,
}

#[derive(Debug, Deserialize)]
struct RecordQuery {
    #[serde(rename = "leagueId")]
    league_id: LeagueId,
    #[serde(rename = "startyear")]
    start_year: Option<crate::cli::types::Season>,
    #[serde(rename = "endyear")]
    end_year: Option<crate::cli::types::Season>,
    bestworst: Option<String>,
    playoffs: Option<String>,
    count: Option<usize>,
}

impl RecordQuery {
    /// Only an explicit `bestworst=best` selects the high end; anything
    /// else, including an absent param, reports the low end.
    fn best(&self) -> bool {
        self.bestworst.as_deref() == Some("best")
    }

    fn playoffs(&self) -> bool {
        self.playoffs.as_deref() == Some("true")
    }

    fn count(&self) -> usize {
        self.count.unwrap_or(10)
    }
}

async fn info_handler(
    State(state): State<Arc<AppState>>,
    Query(params): Query<LeagueQuery>,
) -> std::result::Result<Response, ApiError> {
    let info = reports::league_info::summary(&state.client, params.league_id).await?;
    Ok(Json(info).into_response())
}

async fn standings_handler(
    State(state): State<Arc<AppState>>,
    Query(params): Query<LeagueQuery>,
) -> std::result::Result<Response, ApiError> {
    let standings = reports::standings::all_time(&state.client, params.league_id).await?;
    Ok(Json(standings).into_response())
}

async fn weeks_handler(
    State(state): State<Arc<AppState>>,
    Query(params): Query<RecordQuery>,
) -> std::result::Result<Response, ApiError> {
    let weeks = reports::scores::best_and_worst_weeks(
        &state.client,
        params.league_id,
        params.start_year,
        params.end_year,
        params.playoffs(),
        params.count(),
        params.best(),
    )
    .await?;
    Ok(Json(weeks).into_response())
}

async fn seasons_handler(
    State(state): State<Arc<AppState>>,
    Query(params): Query<RecordQuery>,
) -> std::result::Result<Response, ApiError> {
    let seasons = reports::scores::best_and_worst_seasons(
        &state.client,
        params.league_id,
        params.start_year,
        params.end_year,
        params.count(),
        params.best(),
    )
    .await?;
    Ok(Json(seasons).into_response())
}

async fn matchups_handler(
    State(state): State<Arc<AppState>>,
    Query(params): Query<RecordQuery>,
) -> std::result::Result<Response, ApiError> {
    // "worst" margins are the blowouts; the default is nail-biters.
    let margins = reports::matchups::results(
        &state.client,
        params.league_id,
        params.start_year,
        params.end_year,
        params.playoffs(),
        params.count(),
        params.bestworst.as_deref() == Some("worst"),
    )
    .await?;
    Ok(Json(margins).into_response())
}

async fn power_rankings_handler(
    State(state): State<Arc<AppState>>,
    Query(params): Query<LeagueQuery>,
) -> std::result::Result<Response, ApiError> {
    let rankings =
        reports::power_rankings::current(&state.client, state.trigger.as_ref(), params.league_id)
            .await?;
    Ok(Json(rankings).into_response())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_query_defaults_to_worst() {
        let query: RecordQuery = serde_json::from_value(serde_json::json!({
            "leagueId": 111
        }))
        .unwrap();
        assert!(!query.best());
        assert!(!query.playoffs());
        assert_eq!(query.count(), 10);
    }

    #[test]
    fn test_record_query_explicit_best() {
        let query: RecordQuery = serde_json::from_value(serde_json::json!({
            "leagueId": 111,
            "bestworst": "best"
        }))
        .unwrap();
        assert!(query.best());
    }

    #[test]
    fn test_record_query_worst_and_playoffs() {
        let query: RecordQuery = serde_json::from_value(serde_json::json!({
            "leagueId": 111,
            "bestworst": "worst",
            "playoffs": "true",
            "count": 5
        }))
        .unwrap();
        assert!(!query.best());
        assert!(query.playoffs());
        assert_eq!(query.count(), 5);
    }
}
