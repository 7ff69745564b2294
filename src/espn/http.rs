//! URL templates and request headers for the ESPN Fantasy Football v3 API.

use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, COOKIE};
use std::fmt;

use crate::cli::types::{LeagueId, Season, Week};
use crate::error::Result;

/// Base path for ESPN Fantasy Football v3 API.
pub const FFL_BASE_URL: &str = "https://lm-api-reads.fantasy.espn.com/apis/v3/games/ffl";

/// Seasons at or before this year route through `leagueHistory` and wrap the
/// response in a one-element array.
pub const LEGACY_CUTOFF: u16 = 2019;

/// The upstream views this crate consumes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum View {
    /// Matchup schedule with weekly scores.
    MatchupScore,
    /// Team roster: ids, names, records, owners.
    Team,
    /// League settings incl. the scoring-period window.
    Settings,
    /// Navigation metadata: league name, previous seasons.
    Nav,
    /// Season status: current season id, draft state, matchup period.
    Status,
}

impl View {
    pub fn as_str(&self) -> &'static str {
        match self {
            View::MatchupScore => "mMatchupScore",
            View::Team => "mTeam",
            View::Settings => "mSettings",
            View::Nav => "mNav",
            View::Status => "mStatus",
        }
    }
}

impl fmt::Display for View {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Whether a season uses the legacy wire shape.
pub fn is_legacy(season: Season) -> bool {
    season.as_u16() <= LEGACY_CUTOFF
}

/// Build the request URL for one (league, season, view) triple.
pub fn view_url(
    base: &str,
    league_id: LeagueId,
    season: Season,
    view: View,
    week: Option<Week>,
) -> String {
    let mut url = if is_legacy(season) {
        format!(
            "{base}/leagueHistory/{}?seasonId={}&view={}",
            league_id, season, view
        )
    } else {
        format!(
            "{base}/seasons/{}/segments/0/leagues/{}?view={}",
            season, league_id, view
        )
    };
    if let Some(week) = week {
        url.push_str(&format!("&scoringPeriodId={}", week));
    }
    url
}

/// Request headers: JSON accept plus, when `ESPN_SWID` and `ESPN_S2` are both
/// set, the cookie pair private leagues require.
pub fn request_headers() -> Result<HeaderMap> {
    let mut h = HeaderMap::new();
    h.insert(ACCEPT, HeaderValue::from_static("application/json"));
    let swid = std::env::var("ESPN_SWID").ok();
    let s2 = std::env::var("ESPN_S2").ok();
    if let (Some(swid), Some(s2)) = (swid, s2) {
        let cookie = format!("SWID={}; espn_s2={}", swid, s2);
        h.insert(COOKIE, HeaderValue::from_str(&cookie)?);
    }
    Ok(h)
}
