//! All-time standings command implementation.

use crate::cli::types::LeagueId;
use crate::reports;
use crate::Result;

use super::common::{build_client, print_json, resolve_league_id};

pub async fn handle_standings(league_id: Option<LeagueId>, json: bool) -> Result<()> {
    let league_id = resolve_league_id(league_id)?;
    let client = build_client()?;

    let response = reports::standings::all_time(&client, league_id).await?;

    if json {
        return print_json(&response);
    }

    for owner in &response.teams {
        let wins: u16 = owner.seasons.iter().map(|s| s.wins).sum();
        let losses: u16 = owner.seasons.iter().map(|s| s.losses).sum();
        let ties: u16 = owner.seasons.iter().map(|s| s.ties).sum();
        let titles = owner.seasons.iter().filter(|s| s.playoff_champ).count();
        println!(
            "{:<25} {:>3}-{:<3}-{:<2} over {} seasons, {} title(s)",
            owner.name,
            wins,
            losses,
            ties,
            owner.seasons.len(),
            titles
        );
    }

    Ok(())
}
