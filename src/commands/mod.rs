//! Command implementations for the FFL Almanac CLI.

pub mod common;
pub mod league_info;
pub mod matchups;
pub mod power_rankings;
pub mod scores;
pub mod standings;
