//! Typed schemas for the slices of upstream documents this crate consumes.
//!
//! ESPN payloads carry far more than this; decoding happens immediately
//! after fetch so provider quirks never leak past the boundary.

use serde::{Deserialize, Serialize};

use crate::cli::types::{Season, TeamId, Week};

/// `mMatchupScore`: the season schedule plus the current scoring period.
#[derive(Debug, Clone, Deserialize)]
pub struct MatchupDocument {
    pub schedule: Vec<Matchup>,
    #[serde(rename = "scoringPeriodId")]
    pub scoring_period_id: Week,
}

/// One scheduled game. A side missing entirely marks a bye.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Matchup {
    #[serde(rename = "matchupPeriodId")]
    pub week: Week,
    #[serde(default)]
    pub home: Option<MatchupSide>,
    #[serde(default)]
    pub away: Option<MatchupSide>,
    #[serde(default)]
    pub winner: Option<String>,
    #[serde(rename = "playoffTierType", default)]
    pub playoff_tier_type: Option<String>,
}

impl Matchup {
    pub fn is_bye(&self) -> bool {
        self.home.is_none() || self.away.is_none()
    }

    /// Whether the named side (`"home"` / `"away"`) won this matchup.
    pub fn side_won(&self, side: &str) -> bool {
        self.winner
            .as_deref()
            .map(|w| w.eq_ignore_ascii_case(side))
            .unwrap_or(false)
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct MatchupSide {
    #[serde(rename = "teamId")]
    pub team_id: TeamId,
    #[serde(rename = "totalPoints")]
    pub total_points: f64,
}

/// Minimal `mTeam` projection: the id→name roster.
#[derive(Debug, Clone, Deserialize)]
pub struct TeamsDocument {
    pub teams: Vec<TeamEntry>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct TeamEntry {
    pub id: TeamId,
    pub name: String,
}

/// `mSettings`: the scoring-period window and schedule length.
#[derive(Debug, Clone, Deserialize)]
pub struct SettingsDocument {
    pub status: SeasonWindow,
    pub settings: SettingsBlock,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SeasonWindow {
    #[serde(rename = "latestScoringPeriod")]
    pub latest_scoring_period: u16,
    #[serde(rename = "finalScoringPeriod")]
    pub final_scoring_period: u16,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SettingsBlock {
    #[serde(rename = "scheduleSettings")]
    pub schedule_settings: ScheduleSettings,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ScheduleSettings {
    #[serde(rename = "matchupPeriodCount")]
    pub matchup_period_count: u16,
}

/// `mStatus`: which season is live and how far along it is.
#[derive(Debug, Clone, Deserialize)]
pub struct StatusDocument {
    #[serde(rename = "seasonId")]
    pub season_id: Season,
    pub status: StatusWindow,
    #[serde(rename = "draftDetail")]
    pub draft_detail: DraftDetail,
}

#[derive(Debug, Clone, Deserialize)]
pub struct StatusWindow {
    #[serde(rename = "currentMatchupPeriod")]
    pub current_matchup_period: u16,
    #[serde(rename = "finalScoringPeriod")]
    pub final_scoring_period: u16,
}

#[derive(Debug, Clone, Deserialize)]
pub struct DraftDetail {
    pub drafted: bool,
}

/// `mNav`: league identity and history.
#[derive(Debug, Clone, Deserialize)]
pub struct NavDocument {
    #[serde(rename = "seasonId")]
    pub season_id: Season,
    pub settings: NavSettings,
    pub status: NavStatus,
    #[serde(default)]
    pub teams: Vec<TeamEntry>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct NavSettings {
    pub name: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct NavStatus {
    #[serde(rename = "previousSeasons")]
    pub previous_seasons: Vec<u16>,
    #[serde(rename = "teamsJoined")]
    pub teams_joined: u16,
    #[serde(rename = "currentMatchupPeriod")]
    pub current_matchup_period: u16,
}

/// Full `mTeam` projection used by the standings report.
#[derive(Debug, Clone, Deserialize)]
pub struct StandingsDocument {
    pub teams: Vec<StandingsTeam>,
    pub members: Vec<Member>,
    pub status: StandingsStatus,
}

#[derive(Debug, Clone, Deserialize)]
pub struct StandingsStatus {
    #[serde(rename = "currentMatchupPeriod")]
    pub current_matchup_period: u16,
    #[serde(rename = "teamsJoined")]
    pub teams_joined: u16,
}

#[derive(Debug, Clone, Deserialize)]
pub struct StandingsTeam {
    pub id: TeamId,
    #[serde(rename = "playoffSeed")]
    pub playoff_seed: u16,
    #[serde(rename = "rankCalculatedFinal")]
    pub rank_calculated_final: u16,
    #[serde(rename = "primaryOwner")]
    pub primary_owner: String,
    pub record: TeamRecord,
}

#[derive(Debug, Clone, Deserialize)]
pub struct TeamRecord {
    pub overall: OverallRecord,
}

#[derive(Debug, Clone, Deserialize)]
pub struct OverallRecord {
    pub wins: u16,
    pub losses: u16,
    pub ties: u16,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Member {
    pub id: String,
    #[serde(rename = "firstName")]
    pub first_name: String,
    #[serde(rename = "lastName")]
    pub last_name: String,
}
