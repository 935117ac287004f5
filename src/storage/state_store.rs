// SPDX-License-Identifier: MIT
//! Gamification state store — one JSON document at `{data_dir}/gamification.json`.

use std::path::{Path, PathBuf};
use tracing::warn;

use crate::error::StorageError;
use crate::gamification::levels;
use crate::gamification::model::GamificationState;

/// Load/save layer for the single mutable [`GamificationState`] document.
///
/// Single-writer: mutating request handlers run sequentially, and a crash
/// between save calls loses at most the last update (last save wins).
pub struct StateStore {
    path: PathBuf,
}

impl StateStore {
    pub fn new(data_dir: &Path) -> Self {
        Self {
            path: data_dir.join("gamification.json"),
        }
    }

    /// Load the persisted state, or the default state when the file is
    /// missing or does not parse.
    ///
    /// `level` is never trusted from disk: it is recomputed from `xp` so a
    /// hand-edited or drifted file cannot make the two disagree.
    pub async fn load(&self) -> GamificationState {
        let mut state = match tokio::fs::read_to_string(&self.path).await {
            Ok(content) => match serde_json::from_str::<GamificationState>(&content) {
                Ok(state) => state,
                Err(e) => {
                    warn!(
                        "unparsable state file {} ({e}) — starting from defaults",
                        self.path.display()
                    );
                    GamificationState::default()
                }
            },
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => GamificationState::default(),
            Err(e) => {
                warn!(
                    "unreadable state file {} ({e}) — starting from defaults",
                    self.path.display()
                );
                GamificationState::default()
            }
        };
        state.level = levels::level_from_xp(state.xp);
        state
    }

    /// Persist the full state atomically: write a sibling temp file, then
    /// rename over the target so readers never observe a partial document.
    pub async fn save(&self, state: &GamificationState) -> Result<(), StorageError> {
        let write_err = |e: std::io::Error| StorageError::Write {
            path: self.path.clone(),
            source: e,
        };

        if let Some(parent) = self.path.parent() {
            tokio::fs::create_dir_all(parent).await.map_err(write_err)?;
        }

        let json = serde_json::to_string_pretty(state).map_err(|e| StorageError::Write {
            path: self.path.clone(),
            source: std::io::Error::new(std::io::ErrorKind::InvalidData, e),
        })?;

        let tmp = self.path.with_extension("json.tmp");
        tokio::fs::write(&tmp, json.as_bytes())
            .await
            .map_err(write_err)?;
        tokio::fs::rename(&tmp, &self.path).await.map_err(write_err)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

// ─── Tests ────────────────────────────────────────────────────────────────────
