//! Small shared helpers.

use chrono::Datelike;

/// Current real-world calendar year, used for the cache-skip rule and for
/// probing the season status endpoint.
pub fn current_year() -> u16 {
    chrono::Local::now().year() as u16
}
