//! Current-season power rankings with the cached writeup, if any.

use serde::Serialize;

use crate::cli::types::LeagueId;
use crate::core::store::ObjectStore;
use crate::error::{AlmanacError, Result};
use crate::espn::client::EspnClient;
use crate::rankings::{self, RankedTeam};
use crate::season;
use crate::writeup::{self, WriteupStatus, WriteupTrigger};

#[derive(Debug, Serialize)]
pub struct PowerRankingsResponse {
    pub teams: Vec<RankedTeam>,
    /// Narrative summary, or `null` while generation is pending.
    pub writeup: Option<String>,
}

/// Resolve the latest season, rank its teams, and attach the writeup.
///
/// A writeup miss triggers the summarization job with the rankings as
/// payload; the response then carries no text and callers re-poll.
pub async fn current<S: ObjectStore>(
    client: &EspnClient<S>,
    trigger: &dyn WriteupTrigger,
    league_id: LeagueId,
) -> Result<PowerRankingsResponse> {
    let year = season::latest_season(client, league_id).await?;

    let doc = client.matchups(league_id, year).await?;
    let current_week = doc.scoring_period_id;

    let weeks = season::number_of_weeks(client, league_id, year, false).await?;
    if weeks == 0 {
        return Err(AlmanacError::SeasonNotStarted);
    }

    let names = season::team_names(client, league_id, year).await?;
    let teams = rankings::power_rankings(&doc.schedule, current_week, weeks, &names)?;

    let writeup = match writeup::get_or_trigger(
        client.store(),
        trigger,
        league_id,
        year,
        current_week,
        &teams,
    )? {
        WriteupStatus::Found(text) => Some(text),
        WriteupStatus::Pending => None,
    };

    Ok(PowerRankingsResponse { teams, writeup })
}
