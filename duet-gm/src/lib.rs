//! duet-gm library - Games module
//!
//! HTTP service hosting the couple games: the two compatibility quizzes,
//! truth-or-dare and memory-match. All game state is held in memory.

use axum::Router;
use chrono::{DateTime, Utc};
use duet_common::config::GamesConfig;
use std::sync::Arc;
use std::time::Duration;
use tower_http::trace::TraceLayer;

pub mod api;
pub mod error;
pub mod sessions;

pub use crate::error::{ApiError, ApiResult};
use crate::sessions::SessionStore;

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    /// Live game sessions
    pub sessions: SessionStore,
    /// Game limits from config
    pub games: Arc<GamesConfig>,
    /// Service startup timestamp for uptime tracking
    pub startup_time: DateTime<Utc>,
}

impl AppState {
    pub fn new(games: GamesConfig) -> Self {
        Self {
            sessions: SessionStore::new(
                games.max_sessions,
                Duration::from_secs(games.session_idle_secs),
            ),
            games: Arc::new(games),
            startup_time: Utc::now(),
        }
    }
}

/// Build application router
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .merge(api::health_routes())
        .merge(api::prompt_routes())
        .merge(api::quiz_routes())
        .merge(api::truth_or_dare_routes())
        .merge(api::memory_routes())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
