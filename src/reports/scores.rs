//! Best/worst single weeks and team-seasons across league history.

use std::collections::BTreeMap;

use serde::Serialize;

use crate::cli::types::{LeagueId, Season, TeamId, Week};
use crate::core::store::ObjectStore;
use crate::error::Result;
use crate::espn::client::EspnClient;
use crate::season::{self, resolve_team_name};
use crate::stats::{round2, stdev};

#[derive(Debug, Serialize)]
pub struct WeekScore {
    pub year: Season,
    pub week: Week,
    pub team_name: String,
    pub score: f64,
}

#[derive(Debug, Serialize)]
pub struct SeasonAverage {
    pub year: Season,
    pub team_name: String,
    pub average: f64,
    pub league_average: f64,
    /// Standard deviations above/below that year's league average.
    pub std_dev_away: f64,
}

/// Every non-bye team-week in the range, sorted by score, truncated.
pub async fn best_and_worst_weeks<S: ObjectStore>(
    client: &EspnClient<S>,
    league_id: LeagueId,
    start_year: Option<Season>,
    end_year: Option<Season>,
    playoffs: bool,
    count: usize,
    highest: bool,
) -> Result<Vec<WeekScore>> {
    let start = season::clamp_start_year(client, league_id, start_year).await?;
    let end = season::clamp_end_year(client, league_id, end_year).await?;

    let mut all_scores = Vec::new();
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
            for side in [home, away] {
                all_scores.push(WeekScore {
                    year,
                    week: matchup.week,
                    team_name: resolve_team_name(&names, side.team_id)?,
                    score: side.total_points,
                });
            }
        }
    }

    Ok(rank_week_scores(all_scores, count, highest))
}

/// Sort by score (descending when `highest`) and keep the top `count`.
fn rank_week_scores(mut scores: Vec<WeekScore>, count: usize, highest: bool) -> Vec<WeekScore> {
    scores.sort_by(|a, b| {
        let ord = a
            .score
            .partial_cmp(&b.score)
            .unwrap_or(std::cmp::Ordering::Equal);
        if highest {
            ord.reverse()
        } else {
            ord
        }
    });
    scores.truncate(count);
    scores
}

/// Per-team season averages expressed in standard deviations from that
/// year's league mean, sorted, truncated.
pub async fn best_and_worst_seasons<S: ObjectStore>(
    client: &EspnClient<S>,
    league_id: LeagueId,
    start_year: Option<Season>,
    end_year: Option<Season>,
    count: usize,
    best: bool,
) -> Result<Vec<SeasonAverage>> {
    let start = season::clamp_start_year(client, league_id, start_year).await?;
    let end = season::clamp_end_year(client, league_id, end_year).await?;

    let mut all_seasons = Vec::new();
    for year in start.as_u16()..=end.as_u16() {
        let year = Season::new(year);
        let weeks = season::number_of_weeks(client, league_id, year, false).await?;
        if weeks == 0 {
            continue;
        }
        let names = season::team_names(client, league_id, year).await?;
        let doc = client.matchups(league_id, year).await?;

        let mut totals: BTreeMap<TeamId, f64> = BTreeMap::new();
        for matchup in &doc.schedule {
            if matchup.week.as_u16() > weeks {
                break;
            }
            let (Some(home), Some(away)) = (&matchup.home, &matchup.away) else {
                continue;
            };
            for side in [home, away] {
                *totals.entry(side.team_id).or_insert(0.0) += side.total_points;
            }
        }

        let averages: Vec<(TeamId, f64)> = totals
            .into_iter()
            .map(|(id, total)| (id, round2(total / weeks as f64)))
            .collect();
        let values: Vec<f64> = averages.iter().map(|(_, avg)| *avg).collect();
        let league_average = round2(values.iter().sum::<f64>() / values.len().max(1) as f64);
        let sd = stdev(&values);

        for (id, average) in averages {
            let std_dev_away = if sd == 0.0 {
                0.0
            } else {
                round2((average - league_average) / sd)
            };
            all_seasons.push(SeasonAverage {
                year,
                team_name: resolve_team_name(&names, id)?,
                average,
                league_average,
                std_dev_away,
            });
        }
    }

    Ok(rank_season_averages(all_seasons, count, best))
}

/// Sort by deviation from the league mean (descending when `best`) and keep
/// the top `count`.
fn rank_season_averages(
    mut seasons: Vec<SeasonAverage>,
    count: usize,
    best: bool,
) -> Vec<SeasonAverage> {
    seasons.sort_by(|a, b| {
        let ord = a
            .std_dev_away
            .partial_cmp(&b.std_dev_away)
            .unwrap_or(std::cmp::Ordering::Equal);
        if best {
            ord.reverse()
        } else {
            ord
        }
    });
    seasons.truncate(count);
    seasons
}
