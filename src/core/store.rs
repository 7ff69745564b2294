//! Key-value object store for upstream responses and ranking writeups.
//!
//! The store is modeled after an external blob store: values are UTF-8 text
//! addressed by composite string keys. A missing key is not an error — it
//! signals the caller to fetch live and populate the store. Any other fault
//! surfaces as [`AlmanacError::Cache`].

use std::fs;
use std::io::ErrorKind;
use std::path::PathBuf;

use crate::cli::types::{LeagueId, Season, Week};
use crate::error::{AlmanacError, Result};
use crate::espn::http::View;

/// One-way key-value blob store.
pub trait ObjectStore: Send + Sync {
    /// Read a value. `Ok(None)` means the key does not exist.
    fn get(&self, key: &str) -> Result<Option<String>>;

    /// Write a value, overwriting any existing entry for the key.
    fn put(&self, key: &str, value: &str) -> Result<()>;
}

/// Composite key addressing one stored object.
pub trait CacheKey {
    fn object_key(&self) -> String;
}

/// Key for a raw upstream view document: `espn-cache/{league}/{year}/{view}.json`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ViewKey {
    pub league_id: LeagueId,
    pub season: Season,
    pub view: View,
}

impl CacheKey for ViewKey {
    fn object_key(&self) -> String {
        format!(
            "espn-cache/{}/{}/{}.json",
            self.league_id,
            self.season,
            self.view.as_str()
        )
    }
}

/// Key for a generated power-rankings writeup:
/// `power_rankings/league_{league}/{year}/week_{week}/rankings.md`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct WriteupKey {
    pub league_id: LeagueId,
    pub season: Season,
    pub week: Week,
}

impl CacheKey for WriteupKey {
    fn object_key(&self) -> String {
        format!(
            "power_rankings/league_{}/{}/week_{}/rankings.md",
            self.league_id, self.season, self.week
        )
    }
}

/// Filesystem-backed object store.
///
/// Keys map to paths relative to the store root; `/` separators in keys
/// become directories.
#[derive(Debug, Clone)]
pub struct FsStore {
    root: PathBuf,
}

impl FsStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Default root: `~/.cache/ffl-almanac`.
    pub fn default_root() -> PathBuf {
        let base = dirs::cache_dir().unwrap_or_else(|| {
            let mut home = dirs::home_dir().unwrap_or_else(|| PathBuf::from("."));
            home.push(".cache");
            home
        });
        base.join("ffl-almanac")
    }

    fn path_for(&self, key: &str) -> PathBuf {
        let mut path = self.root.clone();
        for part in key.split('/') {
            path.push(part);
        }
        path
    }
}

impl Default for FsStore {
    fn default() -> Self {
        Self::new(Self::default_root())
    }
}

impl ObjectStore for FsStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        match fs::read_to_string(self.path_for(key)) {
            Ok(s) => Ok(Some(s)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(AlmanacError::cache(format!("read {key}: {e}"))),
        }
    }

    fn put(&self, key: &str, value: &str) -> Result<()> {
        let path = self.path_for(key);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .map_err(|e| AlmanacError::cache(format!("mkdir for {key}: {e}")))?;
        }
        fs::write(&path, value).map_err(|e| AlmanacError::cache(format!("write {key}: {e}")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_view_key_format() {
        let key = ViewKey {
            league_id: LeagueId::new(1),
            season: Season::new(2015),
            view: View::Team,
        };
        assert_eq!(key.object_key(), "espn-cache/1/2015/mTeam.json");
    }

    #[test]
    fn test_writeup_key_format() {
        let key = WriteupKey {
            league_id: LeagueId::new(42),
            season: Season::new(2024),
            week: Week::new(9),
        };
        assert_eq!(
            key.object_key(),
            "power_rankings/league_42/2024/week_9/rankings.md"
        );
    }

    #[test]
    fn test_fs_store_miss_is_none() {
        let dir = tempdir().unwrap();
        let store = FsStore::new(dir.path());
        assert_eq!(store.get("espn-cache/1/2015/mTeam.json").unwrap(), None);
    }

    #[test]
    fn test_fs_store_put_then_get() {
        let dir = tempdir().unwrap();
        let store = FsStore::new(dir.path());
        store
            .put("espn-cache/1/2015/mTeam.json", r#"{"teams":[]}"#)
            .unwrap();
        assert_eq!(
            store.get("espn-cache/1/2015/mTeam.json").unwrap(),
            Some(r#"{"teams":[]}"#.to_string())
        );
    }

    #[test]
    fn test_fs_store_put_overwrites() {
        let dir = tempdir().unwrap();
        let store = FsStore::new(dir.path());
        store.put("k", "first").unwrap();
        store.put("k", "second").unwrap();
        assert_eq!(store.get("k").unwrap(), Some("second".to_string()));
    }

    #[test]
    fn test_fs_store_creates_nested_dirs() {
        let dir = tempdir().unwrap();
        let store = FsStore::new(dir.path());
        let key = WriteupKey {
            league_id: LeagueId::new(7),
            season: Season::new(2023),
            week: Week::new(3),
        }
        .object_key();
        store.put(&key, "# Rankings").unwrap();
        assert_eq!(store.get(&key).unwrap(), Some("# Rankings".to_string()));
    }
}
