//! Record id generation.
//!
//! Ids stay close to the creation time in milliseconds, but every id handed
//! out is strictly greater than the previous one and than any id already
//! present in the target collection. Two records created in the same
//! millisecond therefore never collide.

use std::sync::atomic::{AtomicI64, Ordering};

use chrono::{DateTime, Utc};

#[derive(Debug, Default)]
pub struct IdGenerator {
    last: AtomicI64,
}

impl IdGenerator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Issues an id for a record created at `now`.
    ///
    /// `floor` is the largest id already stored in the collection the
    /// record is going into. Ids saturate at `i64::MAX`.
    pub fn next_id(&self, now: DateTime<Utc>, floor: i64) -> i64 {
        let millis = now.timestamp_millis();
        let candidate = |last: i64| {
            millis
                .max(last.saturating_add(1))
                .max(floor.saturating_add(1))
        };
        match self
            .last
            .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |last| Some(candidate(last)))
        {
            Ok(prev) | Err(prev) => candidate(prev),
        }
    }
}
