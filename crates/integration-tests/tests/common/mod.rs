#![allow(dead_code)]

use std::sync::atomic::{AtomicI64, Ordering};
use std::sync::Arc;

use chrono::{DateTime, TimeZone, Utc};
use domains::{Clock, Game, RecordStore, Seed};
use services::ForumService;

/// A clock that moves forward one second every time it is read.
pub struct SteppingClock {
    next: AtomicI64,
}

impl SteppingClock {
    pub fn starting_at(at: DateTime<Utc>) -> Self {
        Self {
            next: AtomicI64::new(at.timestamp()),
        }
    }
}

impl Default for SteppingClock {
    fn default() -> Self {
        Self::starting_at(Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).unwrap())
    }
}

impl Clock for SteppingClock {
    fn now(&self) -> DateTime<Utc> {
        let secs = self.next.fetch_add(1, Ordering::SeqCst);
        Utc.timestamp_opt(secs, 0).unwrap()
    }
}

/// No users, one game: Chess.
pub fn chess_seed() -> Seed {
    Seed {
        games: Some(vec![Game {
            id: 1,
            title: "Chess".into(),
        }]),
        tags: vec!["chat".into(), "strategy".into()],
        ..Seed::default()
    }
}

pub async fn open_forum(store: Arc<dyn RecordStore>, seed: &Seed) -> ForumService {
    ForumService::open(store, Arc::new(SteppingClock::default()), seed)
        .await
        .unwrap()
}
