//! Power rankings command implementation.

use crate::cli::types::LeagueId;
use crate::reports;
use crate::Result;

use super::common::{build_client, print_json, resolve_league_id, writeup_trigger};

pub async fn handle_power_rankings(league_id: Option<LeagueId>, json: bool) -> Result<()> {
    let league_id = resolve_league_id(league_id)?;
    let client = build_client()?;
    let trigger = writeup_trigger();

    let response = reports::power_rankings::current(&client, trigger.as_ref(), league_id).await?;

    if json {
        return print_json(&response);
    }

    for (position, team) in response.teams.iter().enumerate() {
        let losses = team.games.len() as u16 - team.wins;
        println!(
            "{:>2}. {:<30} {:>2}-{:<2} {:>8.2} pts  score {:.2}",
            position + 1,
            team.name,
            team.wins,
            losses,
            team.points,
            team.pr_score
        );
    }
    match &response.writeup {
        Some(text) => {
            println!();
            println!("{text}");
        }
        None => println!("(writeup pending)"),
    }

    Ok(())
}
