use clap::Parser;

use ffl_almanac::cli::{Almanac, Commands, GetCmd};
use ffl_almanac::{api, commands};

#[tokio::main]
async fn main() -> ffl_almanac::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                tracing_subscriber::EnvFilter::new("ffl_almanac=info,tower_http=info")
            }),
        )
        .init();

    let app = Almanac::parse();

    match app.command {
        Commands::Serve { port } => api::serve(port).await,
        Commands::Get { cmd } => match cmd {
            GetCmd::PowerRankings { league_id, json } => {
                commands::power_rankings::handle_power_rankings(league_id, json).await
            }
            GetCmd::Standings { league_id, json } => {
                commands::standings::handle_standings(league_id, json).await
            }
            GetCmd::Weeks {
                league_id,
                range,
                direction,
                playoffs,
                json,
            } => commands::scores::handle_weeks(league_id, range, direction, playoffs, json).await,
            GetCmd::Seasons {
                league_id,
                range,
                direction,
                json,
            } => commands::scores::handle_seasons(league_id, range, direction, json).await,
            GetCmd::Matchups {
                league_id,
                range,
                blowouts,
                playoffs,
                json,
            } => commands::matchups::handle_matchups(league_id, range, blowouts, playoffs, json)
                .await,
            GetCmd::Info { league_id, json } => {
                commands::league_info::handle_info(league_id, json).await
            }
        },
    }
}
