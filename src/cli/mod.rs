//! CLI argument definitions and parsing.

pub mod types;

use clap::{Args, Parser, Subcommand, ValueEnum};
use types::{LeagueId, Season};

/// Which end of a sorted record list to report.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Direction {
    Best,
    Worst,
}

/// Year-range and result-count filters shared by the record commands.
#[derive(Debug, Args)]
pub struct RangeFilters {
    /// First season to include (defaults to the league's first season).
    #[clap(long)]
    pub start_year: Option<Season>,

    /// Last season to include (defaults to the latest season).
    #[clap(long)]
    pub end_year: Option<Season>,

    /// How many records to report.
    #[clap(long, default_value_t = 10)]
    pub count: usize,
}

#[derive(Debug, Subcommand)]
pub enum GetCmd {
    /// Current-season power rankings with the cached writeup, if any.
    PowerRankings {
        /// League ID (or set `FFL_ALMANAC_LEAGUE_ID` env var).
        #[clap(long, short)]
        league_id: Option<LeagueId>,

        /// Output results as JSON instead of text lines.
        #[clap(long)]
        json: bool,
    },

    /// All-time standings for every owner across every season.
    Standings {
        /// League ID (or set `FFL_ALMANAC_LEAGUE_ID` env var).
        #[clap(long, short)]
        league_id: Option<LeagueId>,

        /// Output results as JSON instead of text lines.
        #[clap(long)]
        json: bool,
    },

    /// Highest or lowest single-week scores in league history.
    Weeks {
        /// League ID (or set `FFL_ALMANAC_LEAGUE_ID` env var).
        #[clap(long, short)]
        league_id: Option<LeagueId>,

        #[clap(flatten)]
        range: RangeFilters,

        /// Report best or worst weeks.
        #[clap(long, value_enum, default_value = "best")]
        direction: Direction,

        /// Include playoff weeks.
        #[clap(long)]
        playoffs: bool,

        /// Output results as JSON instead of text lines.
        #[clap(long)]
        json: bool,
    },

    /// Best or worst team-seasons relative to that year's league average.
    Seasons {
        /// League ID (or set `FFL_ALMANAC_LEAGUE_ID` env var).
        #[clap(long, short)]
        league_id: Option<LeagueId>,

        #[clap(flatten)]
        range: RangeFilters,

        /// Report best or worst seasons.
        #[clap(long, value_enum, default_value = "best")]
        direction: Direction,

        /// Output results as JSON instead of text lines.
        #[clap(long)]
        json: bool,
    },

    /// Biggest blowouts or closest nail-biters in league history.
    Matchups {
        /// League ID (or set `FFL_ALMANAC_LEAGUE_ID` env var).
        #[clap(long, short)]
        league_id: Option<LeagueId>,

        #[clap(flatten)]
        range: RangeFilters,

        /// Report biggest margins (blowouts) instead of smallest.
        #[clap(long)]
        blowouts: bool,

        /// Include playoff weeks.
        #[clap(long)]
        playoffs: bool,

        /// Output results as JSON instead of text lines.
        #[clap(long)]
        json: bool,
    },

    /// Basic league information (name, established year, team count).
    Info {
        /// League ID (or set `FFL_ALMANAC_LEAGUE_ID` env var).
        #[clap(long, short)]
        league_id: Option<LeagueId>,

        /// Output results as JSON instead of text lines.
        #[clap(long)]
        json: bool,
    },
}

#[derive(Debug, Parser)]
#[clap(name = "ffl-almanac", about = "Fantasy football league almanac")]
pub struct Almanac {
    #[clap(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Compute league statistics from ESPN data.
    Get {
        #[clap(subcommand)]
        cmd: GetCmd,
    },

    /// Serve the same statistics over HTTP.
    Serve {
        /// Port to listen on.
        #[clap(long, short, default_value_t = 3000)]
        port: u16,
    },
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_valid() {
        Almanac::command().debug_assert();
    }

    #[test]
    fn test_parse_power_rankings() {
        let app = Almanac::parse_from(["ffl-almanac", "get", "power-rankings", "-l", "111"]);
        match app.command {
            Commands::Get {
                cmd: GetCmd::PowerRankings { league_id, json },
            } => {
                assert_eq!(league_id, Some(types::LeagueId::new(111)));
                assert!(!json);
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_parse_weeks_defaults() {
        let app = Almanac::parse_from(["ffl-almanac", "get", "weeks", "-l", "111"]);
        match app.command {
            Commands::Get {
                cmd:
                    GetCmd::Weeks {
                        range,
                        direction,
                        playoffs,
                        ..
                    },
            } => {
                assert_eq!(range.count, 10);
                assert_eq!(direction, Direction::Best);
                assert!(!playoffs);
                assert!(range.start_year.is_none());
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_parse_serve_port() {
        let app = Almanac::parse_from(["ffl-almanac", "serve", "--port", "8080"]);
        match app.command {
            Commands::Serve { port } => assert_eq!(port, 8080),
            other => panic!("unexpected command: {:?}", other),
        }
    }
}
