// SPDX-License-Identifier: MIT

pub mod config;
pub mod error;
pub mod gamification;
pub mod rest;
pub mod stats;
pub mod storage;

use std::sync::Arc;

use config::DaemonConfig;
use storage::{SessionLog, StateStore};

/// Shared application state passed to every HTTP handler.
#[derive(Clone)]
pub struct AppContext {
    pub config: Arc<DaemonConfig>,
    /// Append-only session event log, `{data_dir}/sessions.log`.
    pub session_log: Arc<SessionLog>,
    /// Gamification state document, `{data_dir}/gamification.json`.
    pub state_store: Arc<StateStore>,
    pub started_at: std::time::Instant,
}

impl AppContext {
    pub fn new(config: DaemonConfig) -> Self {
        let session_log = Arc::new(SessionLog::new(&config.data_dir));
        let state_store = Arc::new(StateStore::new(&config.data_dir));
        Self {
            config: Arc::new(config),
            session_log,
            state_store,
            started_at: std::time::Instant::now(),
        }
    }
}
