//! In-memory game session store
//!
//! Each session owns one game: a quiz run (either variant) or a memory-match
//! board. Sessions live until deleted, evicted after sitting idle, or the
//! process exits; nothing is persisted.

use chrono::{DateTime, Utc};
use duet_common::memory::MemoryGame;
use duet_common::{ChoiceScorer, QuizRun, TextScorer};
use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::error::{ApiError, ApiResult};

/// Game owned by a session
pub enum Game {
    ChoiceQuiz(QuizRun<ChoiceScorer>),
    TextQuiz(QuizRun<TextScorer>),
    Memory(MemoryGame),
}

impl Game {
    pub fn kind(&self) -> &'static str {
        match self {
            Game::ChoiceQuiz(_) => "choice_quiz",
            Game::TextQuiz(_) => "text_quiz",
            Game::Memory(_) => "memory",
        }
    }
}

pub struct Session {
    pub game: Game,
    pub created_at: DateTime<Utc>,
    pub last_active_at: DateTime<Utc>,
}

impl Session {
    /// Time since the last request touched this session
    fn idle_for(&self, now: DateTime<Utc>) -> Duration {
        // Negative spans (clock stepped back) count as not idle
        (now - self.last_active_at).to_std().unwrap_or(Duration::ZERO)
    }
}

/// Shared, bounded session map
#[derive(Clone)]
pub struct SessionStore {
    sessions: Arc<RwLock<HashMap<Uuid, Session>>>,
    max_sessions: usize,
    idle_timeout: Duration,
}

impl SessionStore {
    pub fn new(max_sessions: usize, idle_timeout: Duration) -> Self {
        Self {
            sessions: Arc::new(RwLock::new(HashMap::new())),
            max_sessions,
            idle_timeout,
        }
    }

    /// Store a new game, returning its session id
    ///
    /// Idle sessions are evicted first; fails with 409 when the store is
    /// still full.
    pub async fn insert(&self, game: Game) -> ApiResult<Uuid> {
        let mut sessions = self.sessions.write().await;
        Self::evict_idle_locked(&mut sessions, self.idle_timeout);
        if sessions.len() >= self.max_sessions {
            return Err(ApiError::Conflict(format!(
                "Session limit reached ({})",
                self.max_sessions
            )));
        }

        let id = Uuid::new_v4();
        let kind = game.kind();
        let now = Utc::now();
        sessions.insert(
            id,
            Session {
                game,
                created_at: now,
                last_active_at: now,
            },
        );
        tracing::info!(session_id = %id, kind, active = sessions.len(), "Session created");
        Ok(id)
    }

    /// Run `f` against the session with exclusive access
    pub async fn with_session<T>(
        &self,
        id: Uuid,
        f: impl FnOnce(&mut Session) -> ApiResult<T>,
    ) -> ApiResult<T> {
        let mut sessions = self.sessions.write().await;
        let session = sessions
            .get_mut(&id)
            .ok_or_else(|| ApiError::NotFound(format!("Session not found: {}", id)))?;
        session.last_active_at = Utc::now();
        f(session)
    }

    /// Drop every session idle for longer than the timeout
    ///
    /// Returns the number of sessions evicted.
    pub async fn evict_idle(&self) -> usize {
        let mut sessions = self.sessions.write().await;
        Self::evict_idle_locked(&mut sessions, self.idle_timeout)
    }

    fn evict_idle_locked(sessions: &mut HashMap<Uuid, Session>, idle_timeout: Duration) -> usize {
        let now = Utc::now();
        let before = sessions.len();
        sessions.retain(|id, session| {
            let idle = session.idle_for(now);
            if idle <= idle_timeout {
                return true;
            }
            tracing::info!(
                session_id = %id,
                kind = session.game.kind(),
                idle_secs = idle.as_secs(),
                age_secs = (now - session.created_at).num_seconds(),
                "Idle session evicted"
            );
            false
        });
        before - sessions.len()
    }

    pub async fn remove(&self, id: Uuid) -> ApiResult<()> {
        let mut sessions = self.sessions.write().await;
        match sessions.remove(&id) {
            Some(session) => {
                tracing::info!(session_id = %id, kind = session.game.kind(), "Session removed");
                Ok(())
            }
            None => Err(ApiError::NotFound(format!("Session not found: {}", id))),
        }
    }

    pub async fn len(&self) -> usize {
        self.sessions.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.sessions.read().await.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    const HOUR: Duration = Duration::from_secs(3600);

    fn memory_game() -> Game {
        Game::Memory(MemoryGame::new(2, &mut StdRng::seed_from_u64(5)).unwrap())
    }

    #[tokio::test]
    async fn test_insert_and_remove() {
        let store = SessionStore::new(4, HOUR);
        assert!(store.is_empty().await);

        let id = store.insert(memory_game()).await.unwrap();
        assert_eq!(store.len().await, 1);

        store.remove(id).await.unwrap();
        assert!(store.is_empty().await);
        assert!(matches!(store.remove(id).await, Err(ApiError::NotFound(_))));
    }

    #[tokio::test]
    async fn test_limit_enforced() {
        let store = SessionStore::new(1, HOUR);
        store.insert(memory_game()).await.unwrap();
        assert!(matches!(
            store.insert(memory_game()).await,
            Err(ApiError::Conflict(_))
        ));
    }

    #[tokio::test]
    async fn test_with_session_unknown_id() {
        let store = SessionStore::new(1, HOUR);
        let result = store.with_session(Uuid::new_v4(), |_| Ok(())).await;
        assert!(matches!(result, Err(ApiError::NotFound(_))));
    }

    async fn make_idle(store: &SessionStore, id: Uuid, idle: chrono::Duration) {
        store
            .with_session(id, |session| {
                session.last_active_at = Utc::now() - idle;
                Ok(())
            })
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn test_idle_session_evicted_to_make_room() {
        let store = SessionStore::new(1, HOUR);
        let stale = store.insert(memory_game()).await.unwrap();
        make_idle(&store, stale, chrono::Duration::hours(2)).await;

        let fresh = store.insert(memory_game()).await.unwrap();
        assert_eq!(store.len().await, 1);
        assert!(matches!(
            store.with_session(stale, |_| Ok(())).await,
            Err(ApiError::NotFound(_))
        ));
        assert!(store.with_session(fresh, |_| Ok(())).await.is_ok());
    }

    #[tokio::test]
    async fn test_evict_idle_keeps_active_sessions() {
        let store = SessionStore::new(4, HOUR);
        let stale = store.insert(memory_game()).await.unwrap();
        let active = store.insert(memory_game()).await.unwrap();
        make_idle(&store, stale, chrono::Duration::minutes(61)).await;
        make_idle(&store, active, chrono::Duration::minutes(59)).await;

        assert_eq!(store.evict_idle().await, 1);
        assert_eq!(store.len().await, 1);
        assert!(store.with_session(active, |_| Ok(())).await.is_ok());
    }

    #[tokio::test]
    async fn test_abandoned_sessions_do_not_lock_out_new_games() {
        let store = SessionStore::new(3, HOUR);
        for _ in 0..3 {
            let id = store.insert(memory_game()).await.unwrap();
            make_idle(&store, id, chrono::Duration::hours(3)).await;
        }

        for _ in 0..3 {
            store.insert(memory_game()).await.unwrap();
        }
        assert_eq!(store.len().await, 3);
    }
}
