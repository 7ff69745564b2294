//! Power-Ranking Engine.
//!
//! Consumes a season's matchup schedule and produces a ranked team list:
//! per-team aggregates, a weighted composite score over five metric
//! rankings, and per-matchup detail records for the writeup job.
//!
//! The schedule must be sorted by week ascending; the scan early-exits at
//! the first matchup beyond either week bound rather than filtering.

use std::collections::{BTreeMap, HashMap};

use serde::Serialize;

use crate::cli::types::{TeamId, Week};
use crate::error::{AlmanacError, Result};
use crate::espn::types::Matchup;
use crate::season::resolve_team_name;
use crate::stats::{mean, median, pstdev, round2};


/// Weekly score above this counts as a boom.
pub const BOOM_THRESHOLD: f64 = 140.0;
/// Weekly score below this counts as a bust.
pub const BUST_THRESHOLD: f64 = 90.0;

const WINS_WEIGHT: f64 = 3.0;
const LAST_FIVE_WEIGHT: f64 = 1.0;
const POINTS_WEIGHT: f64 = 2.0;
const CONSISTENCY_WEIGHT: f64 = 1.0;
const OVERALL_WINS_WEIGHT: f64 = 1.0;
const WEIGHT_SUM: f64 =
    WINS_WEIGHT + LAST_FIVE_WEIGHT + POINTS_WEIGHT + CONSISTENCY_WEIGHT + OVERALL_WINS_WEIGHT;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum MatchupResult {
    #[serde(rename = "w")]
    Win,
    #[serde(rename = "l")]
    Loss,
}

/// One played game from a team's point of view.
#[derive(Debug, Clone, Serialize)]
pub struct MatchupDetail {
    pub week: Week,
    pub score: f64,
    pub opponent_score: f64,
    pub opponent: String,
    pub result: MatchupResult,
}

/// A team's season record plus every derived ranking metric.
///
/// Field names follow the original wire contract consumed by the frontend
/// and the writeup job.
#[derive(Debug, Clone, Serialize)]
pub struct RankedTeam {
    pub name: String,
    pub team_id: TeamId,
    pub scores: Vec<f64>,
    pub against: Vec<f64>,
    /// true for a win, false for a loss, in week order.
    pub games: Vec<bool>,
    pub matchups: Vec<MatchupDetail>,
    pub wins: u16,
    #[serde(rename = "l5")]
    pub last_five_wins: u16,
    pub points: f64,
    /// Population standard deviation of weekly scores; lower is steadier.
    pub consistency: f64,
    pub overall_wins: u32,
    pub avg_score: f64,
    pub avg_against: f64,
    pub booms: u16,
    pub busts: u16,
    pub median_wins: u16,
    /// Weighted average of per-metric rank positions; lower is better.
    pub pr_score: f64,
}

/// Running per-team record built during the schedule scan.
struct TeamScan {
    name: String,
    team_id: TeamId,
    scores: Vec<f64>,
    against: Vec<f64>,
    games: Vec<bool>,
    matchups: Vec<MatchupDetail>,
}

/// Index of the first occurrence of `value`, 1-based. Ties take the rank of
/// their first occurrence in the sorted order, not an average.
fn first_rank<T: PartialEq>(sorted: &[T], value: &T) -> f64 {
    sorted.iter().position(|x| x == value).unwrap_or(0) as f64 + 1.0
}

/// Compute power rankings for one season.
///
/// `weeks` is the regular-season bound, `current_week` the most recent
/// scoring period; matchups beyond either are not scored. Zero eligible
/// weeks is reported as [`AlmanacError::SeasonNotStarted`] so callers can
/// tell "season not started" from "no teams".
pub fn power_rankings(
    schedule: &[Matchup],
    current_week: Week,
    weeks: u16,
    names: &HashMap<TeamId, String>,
) -> Result<Vec<RankedTeam>> {
    if weeks == 0 {
        return Err(AlmanacError::SeasonNotStarted);
    }

    let mut teams: Vec<TeamScan> = Vec::new();
    let mut week_scores: BTreeMap<Week, Vec<f64>> = BTreeMap::new();

    for matchup in schedule {
        if matchup.week.as_u16() > weeks || matchup.week > current_week {
            break;
        }
        let (Some(home), Some(away)) = (&matchup.home, &matchup.away) else {
            continue;
        };

        for (side, this, other) in [("home", home, away), ("away", away, home)] {
            week_scores
                .entry(matchup.week)
                .or_default()
                .push(this.total_points);

            let detail = MatchupDetail {
                week: matchup.week,
                score: this.total_points,
                opponent_score: other.total_points,
                opponent: resolve_team_name(names, other.team_id)?,
                result: if this.total_points > other.total_points {
                    MatchupResult::Win
                } else {
                    MatchupResult::Loss
                },
            };
            let won = matchup.side_won(side);

            match teams.iter_mut().find(|t| t.team_id == this.team_id) {
                Some(team) => {
                    team.scores.push(this.total_points);
                    team.against.push(other.total_points);
                    team.games.push(won);
                    team.matchups.push(detail);
                }
                None => teams.push(TeamScan {
                    name: resolve_team_name(names, this.team_id)?,
                    team_id: this.team_id,
                    scores: vec![this.total_points],
                    against: vec![other.total_points],
                    games: vec![won],
                    matchups: vec![detail],
                }),
            }
        }
    }

    let medians: BTreeMap<Week, f64> = week_scores
        .iter()
        .map(|(week, pts)| (*week, median(pts)))
        .collect();
    let sorted_week_scores: BTreeMap<Week, Vec<f64>> = week_scores
        .into_iter()
        .map(|(week, mut pts)| {
            pts.sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));
            (week, pts)
        })
        .collect();

    let mut ranked: Vec<RankedTeam> = teams
        .into_iter()
        .map(|t| summarize(t, &sorted_week_scores, &medians))
        .collect();

    apply_composite_scores(&mut ranked);
    ranked.sort_by(|a, b| {
        a.pr_score
            .partial_cmp(&b.pr_score)
            .unwrap_or(std::cmp::Ordering::Equal)
    });

    Ok(ranked)
}

fn summarize(
    team: TeamScan,
    sorted_week_scores: &BTreeMap<Week, Vec<f64>>,
    medians: &BTreeMap<Week, f64>,
) -> RankedTeam {
    let wins = team.games.iter().filter(|&&won| won).count() as u16;
    let recent = team.games.len().saturating_sub(5);
    let last_five_wins = team.games[recent..].iter().filter(|&&won| won).count() as u16;

    // "beaten-everyone" rank per played week: the score's index in that
    // week's ascending all-scores list, first occurrence on ties
    let overall_wins: u32 = team
        .matchups
        .iter()
        .map(|detail| {
            sorted_week_scores
                .get(&detail.week)
                .and_then(|pool| pool.iter().position(|&s| s == detail.score))
                .unwrap_or(0) as u32
        })
        .sum();

    let median_wins = team
        .matchups
        .iter()
        .filter(|detail| {
            medians
                .get(&detail.week)
                .map(|m| detail.score > *m)
                .unwrap_or(false)
        })
        .count() as u16;

    RankedTeam {
        wins,
        last_five_wins,
        points: round2(team.scores.iter().sum()),
        consistency: round2(pstdev(&team.scores)),
        overall_wins,
        avg_score: round2(mean(&team.scores)),
        avg_against: round2(mean(&team.against)),
        booms: team.scores.iter().filter(|&&s| s > BOOM_THRESHOLD).count() as u16,
        busts: team.scores.iter().filter(|&&s| s < BUST_THRESHOLD).count() as u16,
        median_wins,
        pr_score: 0.0,
        name: team.name,
        team_id: team.team_id,
        scores: team.scores,
        against: team.against,
        games: team.games,
        matchups: team.matchups,
    }
}

/// Composite score: per-metric rank positions (1 = best) weighted
/// {wins: 3, l5: 1, points: 2, consistency: 1, overall_wins: 1}.
fn apply_composite_scores(teams: &mut [RankedTeam]) {
    let mut wins_sorted: Vec<u16> = teams.iter().map(|t| t.wins).collect();
    wins_sorted.sort_unstable_by(|a, b| b.cmp(a));

    let mut l5_sorted: Vec<u16> = teams.iter().map(|t| t.last_five_wins).collect();
    l5_sorted.sort_unstable_by(|a, b| b.cmp(a));

    let mut points_sorted: Vec<f64> = teams.iter().map(|t| t.points).collect();
    points_sorted.sort_by(|a, b| b.partial_cmp(a).unwrap_or(std::cmp::Ordering::Equal));

    // consistency ranks ascending: steadier is better
    let mut consistency_sorted: Vec<f64> = teams.iter().map(|t| t.consistency).collect();
    consistency_sorted.sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));

    let mut overall_sorted: Vec<u32> = teams.iter().map(|t| t.overall_wins).collect();
    overall_sorted.sort_unstable_by(|a, b| b.cmp(a));

    for team in teams {
        let weighted = first_rank(&wins_sorted, &team.wins) * WINS_WEIGHT
            + first_rank(&l5_sorted, &team.last_five_wins) * LAST_FIVE_WEIGHT
            + first_rank(&points_sorted, &team.points) * POINTS_WEIGHT
            + first_rank(&consistency_sorted, &team.consistency) * CONSISTENCY_WEIGHT
            + first_rank(&overall_sorted, &team.overall_wins) * OVERALL_WINS_WEIGHT;
        team.pr_score = round2(weighted / WEIGHT_SUM);
    }
}
