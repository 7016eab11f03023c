use std::sync::{Mutex, PoisonError};

use chrono::{DateTime, Duration, SecondsFormat, Utc};

/// Issues ISO-8601 timestamp ids (`2024-05-01T12:00:00.000Z`).
///
/// Ids are strictly increasing within a process: when the clock has not
/// advanced past the last issued millisecond, the next id is bumped by 1 ms.
#[derive(Debug, Default)]
pub struct IdGenerator {
    last: Mutex<Option<DateTime<Utc>>>,
}

impl IdGenerator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn next_id(&self) -> String {
        self.next_at(Utc::now())
    }

    fn next_at(&self, now: DateTime<Utc>) -> String {
        let now = DateTime::<Utc>::from_timestamp_millis(now.timestamp_millis()).unwrap_or(now);
        let mut last = self.last.lock().unwrap_or_else(PoisonError::into_inner);
        let issued = match *last {
            Some(prev) if now <= prev => prev + Duration::milliseconds(1),
            _ => now,
        };
        *last = Some(issued);
        format_id(issued)
    }
}

pub fn format_id(ts: DateTime<Utc>) -> String {
    ts.to_rfc3339_opts(SecondsFormat::Millis, true)
}
