//! Fantasy football league almanac built on ESPN's fantasy API.
//!
//! Fetches league data (with a filesystem read-through cache and legacy
//! endpoint normalization for pre-2020 seasons), computes power rankings and
//! historical records, and exposes them both as a CLI and over HTTP.

pub mod api;
pub mod cli;
pub mod commands;
pub mod core;
pub mod error;
pub mod espn;
pub mod rankings;
pub mod reports;
pub mod season;
pub mod stats;
pub mod util;
pub mod writeup;

pub use cli::types::{LeagueId, Season, TeamId, Week};
pub use error::{AlmanacError, Result};
pub use rankings::RankedTeam;

/// Env var consulted when no `--league-id` flag is given.
pub const LEAGUE_ID_ENV_VAR: &str = "FFL_ALMANAC_LEAGUE_ID";
