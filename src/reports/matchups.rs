//! Biggest blowouts and closest nail-biters in league history.

use serde::Serialize;

use crate::cli::types::{LeagueId, Season, Week};
use crate::core::store::ObjectStore;
use crate::error::Result;
use crate::espn::client::EspnClient;
use crate::season::{self, resolve_team_name};
use crate::stats::round2;

/// Consolation-bracket games are noise and excluded from margin records.
const CONSOLATION_TIER: &str = "LOSERS_CONSOLATION_LADDER";

#[derive(Debug, Serialize)]
pub struct MatchupMargin {
    pub year: Season,
    pub week: Week,
    pub difference: f64,
    pub winner: String,
    pub loser: String,
}

/// Victory margins for every decided matchup in the range, sorted by margin,
/// truncated to `count`.
pub async fn results<S: ObjectStore>(
    client: &EspnClient<S>,
    league_id: LeagueId,
    start_year: Option<Season>,
    end_year: Option<Season>,
    playoffs: bool,
    count: usize,
    blowouts: bool,
) -> Result<Vec<MatchupMargin>> {
    let start = season::clamp_start_year(client, league_id, start_year).await?;
    let end = season::clamp_end_year(client, league_id, end_year).await?;

    let mut all_margins = Vec::new();
    for year in start.as_u16()..=end.as_u16() {
        let year = Season::new(year);
        let weeks = season::number_of_weeks(client, league_id, year, playoffs).await?;
        if weeks == 0 {
            continue;
        }
        let names = season::team_names(client, league_id, year).await?;
        let doc = client.matchups(league_id, year).await?;

        for matchup in &doc.schedule {
            if matchup.week.as_u16() > weeks {
                break;
            }
            let (Some(home), Some(away)) = (&matchup.home, &matchup.away) else {
                continue;
            };
            if matchup.playoff_tier_type.as_deref() == Some(CONSOLATION_TIER) {
                continue;
            }

            let (winner, loser) = if away.total_points > home.total_points {
                (away, home)
            } else {
                (home, away)
            };
            all_margins.push(MatchupMargin {
                year,
                week: matchup.week,
                difference: round2(winner.total_points - loser.total_points),
                winner: resolve_team_name(&names, winner.team_id)?,
                loser: resolve_team_name(&names, loser.team_id)?,
            });
        }
    }

    all_margins.sort_by(|a, b| {
        let ord = a
            .difference
            .partial_cmp(&b.difference)
            .unwrap_or(std::cmp::Ordering::Equal);
        if blowouts {
            ord.reverse()
        } else {
            ord
        }
    });
    all_margins.truncate(count);
    Ok(all_margins)
}
