// SPDX-License-Identifier: MIT
//! File-backed stores: the append-only session log and the gamification
//! state document. Both live under the daemon data directory.

pub mod session_log;
pub mod state_store;

pub use session_log::{SessionEvent, SessionLog};
pub use state_store::StateStore;

use anyhow::{Context as _, Result};
use std::path::Path;

/// Create the data directory if it does not exist yet.
pub async fn init_data_dir(data_dir: &Path) -> Result<()> {
    tokio::fs::create_dir_all(data_dir)
        .await
        .with_context(|| format!("failed to create data dir {}", data_dir.display()))
}
