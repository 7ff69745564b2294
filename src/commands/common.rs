//! Shared plumbing for CLI command handlers.

use serde::Serialize;

use crate::cli::types::LeagueId;
use crate::core::store::FsStore;
use crate::error::{AlmanacError, Result};
use crate::espn::client::EspnClient;
use crate::writeup::{HttpTrigger, NoopTrigger, WriteupTrigger};
use crate::LEAGUE_ID_ENV_VAR;

/// Use the flag value, or fall back to `FFL_ALMANAC_LEAGUE_ID`.
pub fn resolve_league_id(league_id: Option<LeagueId>) -> Result<LeagueId> {
    match league_id {
        Some(id) => Ok(id),
        None => match std::env::var(LEAGUE_ID_ENV_VAR) {
            Ok(value) => value.parse(),
            Err(_) => Err(AlmanacError::MissingLeagueId {
                env_var: LEAGUE_ID_ENV_VAR.to_string(),
            }),
        },
    }
}

/// Client backed by the default filesystem store.
pub fn build_client() -> Result<EspnClient<FsStore>> {
    EspnClient::new(FsStore::default())
}

/// Writeup trigger from the environment, or a no-op when unconfigured.
pub fn writeup_trigger() -> Box<dyn WriteupTrigger> {
    match HttpTrigger::from_env() {
        Some(trigger) => Box::new(trigger),
        None => Box::new(NoopTrigger),
    }
}

pub fn print_json<T: Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
