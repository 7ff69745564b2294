//! Basic league information summary.

use serde::Serialize;

use crate::cli::types::{LeagueId, Season};
use crate::core::store::ObjectStore;
use crate::error::{AlmanacError, Result};
use crate::espn::client::EspnClient;
use crate::season;

#[derive(Debug, Serialize)]
pub struct LeagueInfo {
    pub name: String,
    /// The league's first season.
    pub established: Season,
    pub teams: u16,
    pub year: Season,
    pub week: u16,
}

pub async fn summary<S: ObjectStore>(
    client: &EspnClient<S>,
    league_id: LeagueId,
) -> Result<LeagueInfo> {
    let status = season::season_status(client, league_id).await?;
    let nav = client.nav(league_id, status.season).await?;

    let established = nav
        .status
        .previous_seasons
        .first()
        .copied()
        .map(Season::new)
        .ok_or_else(|| AlmanacError::malformed("mNav previousSeasons is empty"))?;

    Ok(LeagueInfo {
        name: nav.settings.name,
        established,
        teams: nav.status.teams_joined,
        year: status.season,
        week: nav.status.current_matchup_period,
    })
}
