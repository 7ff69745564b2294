//! Matchup margins command implementation.

use crate::cli::types::LeagueId;
use crate::cli::RangeFilters;
use crate::reports;
use crate::Result;

use super::common::{build_client, print_json, resolve_league_id};

pub async fn handle_matchups(
    league_id: Option<LeagueId>,
    range: RangeFilters,
    blowouts: bool,
    playoffs: bool,
    json: bool,
) -> Result<()> {
    let league_id = resolve_league_id(league_id)?;
    let client = build_client()?;

    let margins = reports::matchups::results(
        &client,
        league_id,
        range.start_year,
        range.end_year,
        playoffs,
        range.count,
        blowouts,
    )
    .await?;

    if json {
        return print_json(&margins);
    }

    for entry in &margins {
        println!(
            "{} week {:>2}: {} over {} by {:.2}",
            entry.year, entry.week, entry.winner, entry.loser, entry.difference
        );
    }

    Ok(())
}
