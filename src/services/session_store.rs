use std::collections::HashMap;

use chrono::{DateTime, Duration, Utc};

use crate::services::booking_form::BookingFormController;

struct Entry {
    form: BookingFormController,
    last_touched: DateTime<Utc>,
}

#[derive(Debug, PartialEq, Eq, thiserror::Error)]
pub enum SessionStoreError {
    #[error("too many active booking sessions, try again later")]
    Full,
}

/// In-memory booking sessions. A session untouched for `idle_ttl` is gone,
/// and at most `max_sessions` live at once.
pub struct SessionStore {
    entries: HashMap<String, Entry>,
    idle_ttl: Duration,
    max_sessions: usize,
}

impl SessionStore {
    pub fn new(idle_ttl: Duration, max_sessions: usize) -> Self {
        Self {
            entries: HashMap::new(),
            idle_ttl,
            max_sessions,
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn insert(
        &mut self,
        id: String,
        form: BookingFormController,
        now: DateTime<Utc>,
    ) -> Result<(), SessionStoreError> {
        if self.entries.len() >= self.max_sessions {
            self.evict_idle(now);
        }
        if self.entries.len() >= self.max_sessions {
            tracing::warn!(max = self.max_sessions, "booking session limit reached");
            return Err(SessionStoreError::Full);
        }
        self.entries.insert(
            id,
            Entry {
                form,
                last_touched: now,
            },
        );
        Ok(())
    }

    /// Returns the session and marks it as used. An idle session is dropped
    /// here rather than returned.
    pub fn touch(&mut self, id: &str, now: DateTime<Utc>) -> Option<&mut BookingFormController> {
        if self.entries.get(id).is_some_and(|e| self.is_idle(e, now)) {
            self.entries.remove(id);
            tracing::info!(session = %id, "booking session expired");
            return None;
        }
        let entry = self.entries.get_mut(id)?;
        entry.last_touched = now;
        Some(&mut entry.form)
    }

    pub fn remove(&mut self, id: &str) -> Option<BookingFormController> {
        self.entries.remove(id).map(|e| e.form)
    }

    /// Drops every idle session and returns how many went.
    pub fn evict_idle(&mut self, now: DateTime<Utc>) -> usize {
        let before = self.entries.len();
        let ttl = self.idle_ttl;
        self.entries.retain(|_, e| now - e.last_touched < ttl);
        let evicted = before - self.entries.len();
        if evicted > 0 {
            tracing::info!(evicted, remaining = self.entries.len(), "evicted idle booking sessions");
        }
        evicted
    }

    fn is_idle(&self, entry: &Entry, now: DateTime<Utc>) -> bool {
        now - entry.last_touched >= self.idle_ttl
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use chrono::{NaiveDate, TimeZone};

    use super::*;
    use crate::models::Catalog;
    use crate::services::clock::FixedClock;

    fn form() -> BookingFormController {
        let today = NaiveDate::from_ymd_opt(2026, 10, 17).unwrap();
        BookingFormController::new(Arc::new(Catalog::default()), Arc::new(FixedClock(today)))
    }

    fn at(minute: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 10, 17, 10, minute, 0).unwrap()
    }

    fn store(max: usize) -> SessionStore {
        SessionStore::new(Duration::minutes(30), max)
    }

    #[test]
    fn test_touch_keeps_session_alive() {
        let mut sessions = store(10);
        sessions.insert("a".to_string(), form(), at(0)).unwrap();

        assert!(sessions.touch("a", at(20)).is_some());
        assert!(sessions.touch("a", at(45)).is_some());
        assert_eq!(sessions.evict_idle(at(59)), 0);
        assert_eq!(sessions.len(), 1);
    }

    #[test]
    fn test_idle_session_expires_on_touch() {
        let mut sessions = store(10);
        sessions.insert("a".to_string(), form(), at(0)).unwrap();

        assert!(sessions.touch("a", at(30)).is_none());
        assert!(sessions.is_empty());
    }

    #[test]
    fn test_evict_idle() {
        let mut sessions = store(10);
        sessions.insert("old".to_string(), form(), at(0)).unwrap();
        sessions.insert("new".to_string(), form(), at(20)).unwrap();

        assert_eq!(sessions.evict_idle(at(40)), 1);
        assert!(sessions.touch("new", at(40)).is_some());
        assert!(sessions.remove("old").is_none());
    }

    #[test]
    fn test_cap_rejects_when_all_active() {
        let mut sessions = store(2);
        sessions.insert("a".to_string(), form(), at(0)).unwrap();
        sessions.insert("b".to_string(), form(), at(1)).unwrap();

        let err = sessions.insert("c".to_string(), form(), at(2)).unwrap_err();
        assert_eq!(err, SessionStoreError::Full);
        assert_eq!(sessions.len(), 2);
    }

    #[test]
    fn test_cap_makes_room_by_evicting_idle() {
        let mut sessions = store(2);
        sessions.insert("a".to_string(), form(), at(0)).unwrap();
        sessions.insert("b".to_string(), form(), at(25)).unwrap();

        sessions.insert("c".to_string(), form(), at(40)).unwrap();
        assert_eq!(sessions.len(), 2);
        assert!(sessions.touch("a", at(40)).is_none());
        assert!(sessions.touch("b", at(40)).is_some());
    }
}
