//! Domain flows assembling serializable league statistics.
//!
//! Each report threads league id and year range explicitly — there is no
//! ambient session state. The CLI handlers and the HTTP surface both call
//! into these.

pub mod league_info;
pub mod matchups;
pub mod power_rankings;
pub mod scores;
pub mod standings;
