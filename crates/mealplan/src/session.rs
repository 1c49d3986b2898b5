use std::{collections::HashMap, sync::Arc, time::Duration};

use mealweek_shared::Day;
use tokio::{sync::RwLock, time::Instant};

/// Label used when a day has ingredients but no generated meal.
pub const MISCELLANEOUS: &str = "Miscellaneous";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MealRecord {
    pub day: Day,
    pub title: String,
}

impl MealRecord {
    /// `"Mon: Lentil Stew"`
    pub fn label(&self) -> String {
        format!("{}: {}", self.day.label(), self.title)
    }
}

/// Meals generated during one planning session, in generation order.
///
/// Regenerating a day adds a new record rather than replacing the old one;
/// readers filter by day.
#[derive(Debug, Default, Clone)]
pub struct Session {
    records: Vec<MealRecord>,
}

impl Session {
    pub fn clear(&mut self) {
        self.records.clear();
    }

    pub fn record(&mut self, day: Day, title: impl Into<String>) {
        let record = MealRecord {
            day,
            title: title.into(),
        };

        if !self.records.contains(&record) {
            self.records.push(record);
        }
    }

    pub fn records(&self) -> &[MealRecord] {
        &self.records
    }

    /// Every record not belonging to `excluding`, as `"Day: Title"` joined
    /// with `", "`.
    pub fn other_meals(&self, excluding: Day) -> String {
        self.records
            .iter()
            .filter(|r| r.day != excluding)
            .map(MealRecord::label)
            .collect::<Vec<_>>()
            .join(", ")
    }

    /// Latest `"Day: Title"` recorded for `day`, or `"Day: Miscellaneous"`.
    pub fn lookup_title(&self, day: Day) -> String {
        self.records
            .iter()
            .rev()
            .find(|r| r.day == day)
            .map(MealRecord::label)
            .unwrap_or_else(|| format!("{}: {MISCELLANEOUS}", day.label()))
    }
}

/// How long a session may sit unused before it is dropped.
pub const DEFAULT_IDLE_TTL: Duration = Duration::from_secs(24 * 60 * 60);
pub const DEFAULT_MAX_SESSIONS: usize = 10_000;

#[derive(Debug)]
struct Entry {
    session: Session,
    last_seen: Instant,
}

/// Sessions keyed by the browser's session identifier.
///
/// Only [`SessionStore::reset`] creates a session, so unknown identifiers
/// never allocate. Sessions idle for longer than `idle_ttl` are dropped, and
/// once `max_sessions` are live the least recently used one makes room for a
/// new one.
#[derive(Debug, Clone)]
pub struct SessionStore {
    sessions: Arc<RwLock<HashMap<String, Entry>>>,
    idle_ttl: Duration,
    max_sessions: usize,
}

impl Default for SessionStore {
    fn default() -> Self {
        Self::with_limits(DEFAULT_IDLE_TTL, DEFAULT_MAX_SESSIONS)
    }
}

impl SessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_limits(idle_ttl: Duration, max_sessions: usize) -> Self {
        Self {
            sessions: Arc::default(),
            idle_ttl,
            max_sessions: max_sessions.max(1),
        }
    }

    /// Starts `id` over with an empty session.
    pub async fn reset(&self, id: &str) {
        let now = Instant::now();
        let mut sessions = self.sessions.write().await;

        let before = sessions.len();
        sessions.retain(|_, entry| now.duration_since(entry.last_seen) < self.idle_ttl);
        let expired = before - sessions.len();
        if expired > 0 {
            tracing::debug!(expired, "dropped idle sessions");
        }

        if !sessions.contains_key(id) && sessions.len() >= self.max_sessions {
            let oldest = sessions
                .iter()
                .min_by_key(|(_, entry)| entry.last_seen)
                .map(|(key, _)| key.to_owned());

            if let Some(oldest) = oldest {
                sessions.remove(&oldest);
                tracing::debug!(session = %oldest, "evicted least recently used session");
            }
        }

        sessions.insert(
            id.to_owned(),
            Entry {
                session: Session::default(),
                last_seen: now,
            },
        );
    }

    /// Adds a meal to a live session. Returns `false` when `id` is unknown or
    /// has expired, in which case nothing is stored.
    pub async fn record(&self, id: &str, day: Day, title: impl Into<String>) -> bool {
        let now = Instant::now();
        let mut sessions = self.sessions.write().await;

        let Some(entry) = sessions.get_mut(id) else {
            return false;
        };

        if now.duration_since(entry.last_seen) >= self.idle_ttl {
            sessions.remove(id);
            return false;
        }

        entry.session.record(day, title);
        entry.last_seen = now;

        true
    }

    /// Copy of the session, empty when `id` is unknown or expired.
    pub async fn snapshot(&self, id: &str) -> Session {
        let now = Instant::now();

        self.sessions
            .read()
            .await
            .get(id)
            .filter(|entry| now.duration_since(entry.last_seen) < self.idle_ttl)
            .map(|entry| entry.session.clone())
            .unwrap_or_default()
    }

    pub async fn len(&self) -> usize {
        self.sessions.read().await.len()
    }
}
