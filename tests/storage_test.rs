//! Integration tests for the object store and the writeup cache flow.

use std::sync::{Arc, Mutex};

use ffl_almanac::core::store::{CacheKey, FsStore, ObjectStore, ViewKey, WriteupKey};
use ffl_almanac::espn::http::View;
use ffl_almanac::writeup::{get_or_trigger, WriteupRequest, WriteupStatus, WriteupTrigger};
use ffl_almanac::{LeagueId, Season, Week};
use tempfile::tempdir;

struct RecordingTrigger {
    requests: Arc<Mutex<Vec<WriteupRequest>>>,
}

impl WriteupTrigger for RecordingTrigger {
    fn trigger(&self, request: WriteupRequest) {
        self.requests.lock().unwrap().push(request);
    }
}

#[test]
fn test_keys_for_different_views_do_not_collide() {
    let dir = tempdir().unwrap();
    let store = FsStore::new(dir.path());

    let matchups = ViewKey {
        league_id: LeagueId::new(111),
        season: Season::new(2023),
        view: View::MatchupScore,
    };
    let teams = ViewKey {
        league_id: LeagueId::new(111),
        season: Season::new(2023),
        view: View::Team,
    };
    store.put(&matchups.object_key(), "a").unwrap();
    store.put(&teams.object_key(), "b").unwrap();

    assert_eq!(store.get(&matchups.object_key()).unwrap(), Some("a".into()));
    assert_eq!(store.get(&teams.object_key()).unwrap(), Some("b".into()));
}

#[test]
fn test_writeup_pending_until_stored_then_found() {
    let dir = tempdir().unwrap();
    let store = FsStore::new(dir.path());
    let requests = Arc::new(Mutex::new(Vec::new()));
    let trigger = RecordingTrigger {
        requests: requests.clone(),
    };

    let league = LeagueId::new(111);
    let year = Season::new(2024);
    let week = Week::new(6);

    // First poll: miss, generation gets kicked off.
    let status = get_or_trigger(&store, &trigger, league, year, week, &[]).unwrap();
    assert_eq!(status, WriteupStatus::Pending);
    assert_eq!(requests.lock().unwrap().len(), 1);

    // The external job lands its output under the writeup key.
    let key = WriteupKey {
        league_id: league,
        season: year,
        week,
    }
    .object_key();
    store.put(&key, "# Week 6\n\nBig shakeup at the top.").unwrap();

    // Second poll: served from the store, no second trigger.
    let status = get_or_trigger(&store, &trigger, league, year, week, &[]).unwrap();
    assert_eq!(
        status,
        WriteupStatus::Found("# Week 6\n\nBig shakeup at the top.".to_string())
    );
    assert_eq!(requests.lock().unwrap().len(), 1);
}

#[test]
fn test_writeup_keys_are_week_scoped() {
    let dir = tempdir().unwrap();
    let store = FsStore::new(dir.path());
    let requests = Arc::new(Mutex::new(Vec::new()));
    let trigger = RecordingTrigger {
        requests: requests.clone(),
    };

    let league = LeagueId::new(111);
    let year = Season::new(2024);
    let key = WriteupKey {
        league_id: league,
        season: year,
        week: Week::new(5),
    }
    .object_key();
    store.put(&key, "week five recap").unwrap();

    // Week 6 must not see week 5's writeup.
    let status = get_or_trigger(&store, &trigger, league, year, Week::new(6), &[]).unwrap();
    assert_eq!(status, WriteupStatus::Pending);
}
