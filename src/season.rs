//! Season Resolver: current season year, lifecycle phase, week counts, and
//! team-name mapping — the metadata every statistics computation uses to
//! bound its iteration ranges.

use std::collections::HashMap;

use serde::Serialize;
use serde_json::Value;

use crate::cli::types::{LeagueId, Season, TeamId};
use crate::core::store::ObjectStore;
use crate::error::{AlmanacError, Result};
use crate::espn::client::{decode, is_not_found, EspnClient};
use crate::espn::http::View;
use crate::espn::types::{SeasonWindow, StatusDocument};
use crate::util::current_year;

/// Lifecycle phase of the current fantasy season.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SeasonPhase {
    Preseason,
    Drafted,
    Active,
    Postseason,
}

#[derive(Debug, Clone, Copy, Serialize)]
pub struct SeasonStatus {
    pub season: Season,
    pub phase: SeasonPhase,
}

/// Probe a view at the current calendar year, falling back to the year
/// before — the season leaks into January.
async fn load_latest_view<S: ObjectStore>(
    client: &EspnClient<S>,
    league_id: LeagueId,
    view: View,
) -> Result<Value> {
    let year = Season::new(current_year());
    let doc = client.load_view(league_id, year, view, None).await?;
    if !is_not_found(&doc) {
        return Ok(doc);
    }
    let doc = client.load_view(league_id, year.prev(), view, None).await?;
    if is_not_found(&doc) {
        return Err(AlmanacError::malformed(format!(
            "league {league_id} not found for {view}"
        )));
    }
    Ok(doc)
}

/// Derive the lifecycle phase from the `mStatus` document.
pub fn derive_phase(doc: &StatusDocument) -> SeasonPhase {
    if !doc.draft_detail.drafted {
        SeasonPhase::Preseason
    } else if doc.status.current_matchup_period == 1 {
        SeasonPhase::Drafted
    } else if doc.status.current_matchup_period == doc.status.final_scoring_period {
        SeasonPhase::Postseason
    } else {
        SeasonPhase::Active
    }
}

/// Status of the current fantasy season.
pub async fn season_status<S: ObjectStore>(
    client: &EspnClient<S>,
    league_id: LeagueId,
) -> Result<SeasonStatus> {
    let doc = load_latest_view(client, league_id, View::Status).await?;
    let status: StatusDocument = decode(View::Status, doc)?;
    Ok(SeasonStatus {
        season: status.season_id,
        phase: derive_phase(&status),
    })
}

/// The latest completed or currently active season.
pub async fn latest_season<S: ObjectStore>(
    client: &EspnClient<S>,
    league_id: LeagueId,
) -> Result<Season> {
    let status = season_status(client, league_id).await?;
    Ok(match status.phase {
        SeasonPhase::Preseason => status.season.prev(),
        _ => status.season,
    })
}

/// Scored weeks in a season so far, bounded by the schedule.
///
/// `latest_scoring_period` is the in-progress week, so completed weeks are
/// one fewer until the relevant bound is reached.
pub fn weeks_in_season(window: &SeasonWindow, regular_season_weeks: u16, playoffs: bool) -> u16 {
    let current = window.latest_scoring_period;
    let total = window.final_scoring_period;
    if playoffs && current <= total {
        current.saturating_sub(1)
    } else if playoffs {
        total
    } else if current <= regular_season_weeks {
        current.saturating_sub(1)
    } else {
        regular_season_weeks
    }
}

/// Scored weeks in a season, fetched via `mSettings`.
pub async fn number_of_weeks<S: ObjectStore>(
    client: &EspnClient<S>,
    league_id: LeagueId,
    season: Season,
    playoffs: bool,
) -> Result<u16> {
    let doc = client.settings(league_id, season).await?;
    Ok(weeks_in_season(
        &doc.status,
        doc.settings.schedule_settings.matchup_period_count,
        playoffs,
    ))
}

/// Resolve a team id against a season's roster mapping; a missing id means
/// the upstream roster is incomplete.
pub fn resolve_team_name(names: &HashMap<TeamId, String>, id: TeamId) -> Result<String> {
    names
        .get(&id)
        .cloned()
        .ok_or_else(|| AlmanacError::malformed(format!("team {id} missing from mTeam roster")))
}

/// Team id → team name mapping for one season.
pub async fn team_names<S: ObjectStore>(
    client: &EspnClient<S>,
    league_id: LeagueId,
    season: Season,
) -> Result<HashMap<TeamId, String>> {
    let doc = client.teams(league_id, season).await?;
    Ok(doc.teams.into_iter().map(|t| (t.id, t.name)).collect())
}

/// The league's first season, from `mNav` previous-seasons history.
pub async fn first_season<S: ObjectStore>(
    client: &EspnClient<S>,
    league_id: LeagueId,
) -> Result<Season> {
    let doc = load_latest_view(client, league_id, View::Nav).await?;
    let nav: crate::espn::types::NavDocument = decode(View::Nav, doc)?;
    nav.status
        .previous_seasons
        .first()
        .copied()
        .map(Season::new)
        .ok_or_else(|| AlmanacError::malformed("mNav previousSeasons is empty"))
}

/// Bound a requested start year to no earlier than the first season.
pub async fn clamp_start_year<S: ObjectStore>(
    client: &EspnClient<S>,
    league_id: LeagueId,
    requested: Option<Season>,
) -> Result<Season> {
    let first = first_season(client, league_id).await?;
    Ok(match requested {
        Some(year) if year >= first => year,
        _ => first,
    })
}

/// Bound a requested end year to no later than the latest season.
pub async fn clamp_end_year<S: ObjectStore>(
    client: &EspnClient<S>,
    league_id: LeagueId,
    requested: Option<Season>,
) -> Result<Season> {
    let latest = latest_season(client, league_id).await?;
    Ok(match requested {
        Some(year) if year <= latest => year,
        _ => latest,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::espn::types::{DraftDetail, StatusWindow};

    fn status_doc(drafted: bool, current: u16, final_period: u16) -> StatusDocument {
        StatusDocument {
            season_id: Season::new(2024),
            status: StatusWindow {
                current_matchup_period: current,
                final_scoring_period: final_period,
            },
            draft_detail: DraftDetail { drafted },
        }
    }

    #[test]
    fn test_phase_preseason_when_not_drafted() {
        assert_eq!(derive_phase(&status_doc(false, 1, 17)), SeasonPhase::Preseason);
    }

    #[test]
    fn test_phase_drafted_at_week_one() {
        assert_eq!(derive_phase(&status_doc(true, 1, 17)), SeasonPhase::Drafted);
    }

    #[test]
    fn test_phase_active_mid_season() {
        assert_eq!(derive_phase(&status_doc(true, 8, 17)), SeasonPhase::Active);
    }

    #[test]
    fn test_phase_postseason_at_final_period() {
        assert_eq!(derive_phase(&status_doc(true, 17, 17)), SeasonPhase::Postseason);
    }

    fn window(latest: u16, final_period: u16) -> SeasonWindow {
        SeasonWindow {
            latest_scoring_period: latest,
            final_scoring_period: final_period,
        }
    }

    #[test]
    fn test_weeks_regular_season_in_progress() {
        // week 8 in progress, 14 regular-season weeks: 7 completed
        assert_eq!(weeks_in_season(&window(8, 17), 14, false), 7);
    }

    #[test]
    fn test_weeks_regular_season_finished() {
        // past the regular season: clamp to the matchup period count
        assert_eq!(weeks_in_season(&window(16, 17), 14, false), 14);
    }

    #[test]
    fn test_weeks_with_playoffs_in_progress() {
        assert_eq!(weeks_in_season(&window(16, 17), 14, true), 15);
    }

    #[test]
    fn test_weeks_with_playoffs_finished() {
        assert_eq!(weeks_in_season(&window(18, 17), 14, true), 17);
    }

    #[test]
    fn test_weeks_zero_before_season_starts() {
        assert_eq!(weeks_in_season(&window(0, 17), 14, false), 0);
        assert_eq!(weeks_in_season(&window(1, 17), 14, false), 0);
    }
}
