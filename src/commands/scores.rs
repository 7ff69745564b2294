//! Best/worst weeks and seasons command implementations.

use crate::cli::types::LeagueId;
use crate::cli::{Direction, RangeFilters};
use crate::reports;
use crate::Result;

use super::common::{build_client, print_json, resolve_league_id};

pub async fn handle_weeks(
    league_id: Option<LeagueId>,
    range: RangeFilters,
    direction: Direction,
    playoffs: bool,
    json: bool,
) -> Result<()> {
    let league_id = resolve_league_id(league_id)?;
    let client = build_client()?;

    let weeks = reports::scores::best_and_worst_weeks(
        &client,
        league_id,
        range.start_year,
        range.end_year,
        playoffs,
        range.count,
        direction == Direction::Best,
    )
    .await?;

    if json {
        return print_json(&weeks);
    }

    for entry in &weeks {
        println!(
            "{} week {:>2}: {:<30} {:>8.2}",
            entry.year, entry.week, entry.team_name, entry.score
        );
    }

    Ok(())
}

pub async fn handle_seasons(
    league_id: Option<LeagueId>,
    range: RangeFilters,
    direction: Direction,
    json: bool,
) -> Result<()> {
    let league_id = resolve_league_id(league_id)?;
    let client = build_client()?;

    let seasons = reports::scores::best_and_worst_seasons(
        &client,
        league_id,
        range.start_year,
        range.end_year,
        range.count,
        direction == Direction::Best,
    )
    .await?;

    if json {
        return print_json(&seasons);
    }

    for entry in &seasons {
        println!(
            "{}: {:<30} avg {:>7.2} (league {:>7.2}, {:+.2} sd)",
            entry.year, entry.team_name, entry.average, entry.league_average, entry.std_dev_away
        );
    }

    Ok(())
}
