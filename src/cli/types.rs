//! Type-safe wrappers for league, team, season, and week identifiers.

use crate::error::{AlmanacError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Type-safe wrapper for ESPN Fantasy Football league IDs.
///
/// # Examples
///
/// ```rust
/// use ffl_almanac::LeagueId;
///
/// let league_id = LeagueId::new(123456);
/// assert_eq!(league_id.as_u32(), 123456);
/// assert_eq!(league_id.to_string(), "123456");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct LeagueId(pub u32);

impl LeagueId {
    pub fn new(id: u32) -> Self {
        Self(id)
    }

    pub fn as_u32(&self) -> u32 {
        self.0
    }
}

impl fmt::Display for LeagueId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for LeagueId {
    type Err = AlmanacError;

    fn from_str(s: &str) -> Result<Self> {
        Ok(Self(s.parse()?))
    }
}

/// Type-safe wrapper for fantasy team IDs within a league.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct TeamId(pub u32);

impl TeamId {
    pub fn new(id: u32) -> Self {
        Self(id)
    }

    pub fn as_u32(&self) -> u32 {
        self.0
    }
}

impl fmt::Display for TeamId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Type-safe wrapper for season years.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Season(pub u16);

impl Season {
    pub fn new(year: u16) -> Self {
        Self(year)
    }

    pub fn as_u16(&self) -> u16 {
        self.0
    }

    /// The season one year earlier (preseason reporting, January leak).
    pub fn prev(&self) -> Self {
        Self(self.0 - 1)
    }
}

impl fmt::Display for Season {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for Season {
    type Err = AlmanacError;

    fn from_str(s: &str) -> Result<Self> {
        Ok(Self(s.parse()?))
    }
}

/// Type-safe wrapper for scoring-week numbers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Week(pub u16);

impl Week {
    pub fn new(week: u16) -> Self {
        Self(week)
    }

    pub fn as_u16(&self) -> u16 {
        self.0
    }
}

impl fmt::Display for Week {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for Week {
    type Err = AlmanacError;

    fn from_str(s: &str) -> Result<Self> {
        Ok(Self(s.parse()?))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_league_id_round_trip() {
        let id: LeagueId = "123456".parse().unwrap();
        assert_eq!(id, LeagueId::new(123456));
        assert_eq!(id.to_string(), "123456");
    }

    #[test]
    fn test_league_id_parse_failure() {
        let err = "not-a-number".parse::<LeagueId>();
        assert!(matches!(err, Err(AlmanacError::InvalidLeagueId(_))));
    }

    #[test]
    fn test_season_prev() {
        assert_eq!(Season::new(2025).prev(), Season::new(2024));
    }

    #[test]
    fn test_week_ordering() {
        assert!(Week::new(3) < Week::new(14));
        assert!(Week::new(5) > Week::new(4));
    }

    #[test]
    fn test_team_id_serde_as_number() {
        let json = serde_json::to_value(TeamId::new(15)).unwrap();
        assert_eq!(json, serde_json::json!(15));
        let back: TeamId = serde_json::from_value(json).unwrap();
        assert_eq!(back, TeamId::new(15));
    }
}
