//! League info command implementation.

use crate::cli::types::LeagueId;
use crate::reports;
use crate::Result;

use super::common::{build_client, print_json, resolve_league_id};

pub async fn handle_info(league_id: Option<LeagueId>, json: bool) -> Result<()> {
    let league_id = resolve_league_id(league_id)?;
    let client = build_client()?;

    let info = reports::league_info::summary(&client, league_id).await?;

    if json {
        return print_json(&info);
    }

    println!("{}", info.name);
    println!("Established: {}", info.established);
    println!("Teams: {}", info.teams);
    println!("Season: {} (week {})", info.year, info.week);

    Ok(())
}
