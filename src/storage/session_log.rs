// SPDX-License-Identifier: MIT
//! Append-only session log — one JSON line per completed focus session.
//!
//! Wire format (stable, `jq`-friendly):
//! ```sh
//! jq 'select(.date == "2026-08-29") | .duration' ~/.local/share/focusd/sessions.log
//! ```

use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tokio::{fs::OpenOptions, io::AsyncWriteExt, sync::Mutex};

use crate::error::StorageError;

// ─── SessionEvent ─────────────────────────────────────────────────────────────

/// One completed focus-timer interval. Immutable once appended.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionEvent {
    /// Naive local timestamp of completion, e.g. `"2026-08-29T10:30:00"`.
    pub timestamp: NaiveDateTime,
    /// Session length in seconds. At least 1.
    pub duration: i64,
    /// Calendar date of `timestamp`, stored redundantly so log lines can be
    /// filtered by day without timestamp parsing.
    pub date: NaiveDate,
}

impl SessionEvent {
    pub fn new(timestamp: NaiveDateTime, duration: i64) -> Self {
        Self {
            timestamp,
            duration,
            date: timestamp.date(),
        }
    }

    /// Whole focus minutes this session contributes. Integer floor — a
    /// 90-second session counts 1 minute, 59 seconds count 0.
    pub fn minutes(&self) -> i64 {
        self.duration / 60
    }
}

// ─── SessionLog ───────────────────────────────────────────────────────────────

/// Append-only JSONL store at `{data_dir}/sessions.log`.
///
/// The file handle is cached for the process lifetime to avoid an `open()`
/// syscall per append. Single-writer: appends are serialised behind the
/// handle mutex, and one `write_all` of a full line keeps lines intact.
pub struct SessionLog {
    path: PathBuf,
    /// Cached, open append handle; `None` until the first write.
    file: Mutex<Option<tokio::fs::File>>,
}

impl SessionLog {
    pub fn new(data_dir: &Path) -> Self {
        Self {
            path: data_dir.join("sessions.log"),
            file: Mutex::new(None),
        }
    }

    /// Append one event as a JSON line.
    ///
    /// Unlike the read side, failures here are hard: a session the user
    /// completed must not vanish silently, so the error propagates to the
    /// caller.
    pub async fn append(&self, event: &SessionEvent) -> Result<(), StorageError> {
        let line = serde_json::to_string(event).map_err(|e| StorageError::Write {
            path: self.path.clone(),
            source: std::io::Error::new(std::io::ErrorKind::InvalidData, e),
        })? + "\n";

        let mut guard = self.file.lock().await;

        // Open lazily on first append.
        if guard.is_none() {
            if let Some(parent) = self.path.parent() {
                tokio::fs::create_dir_all(parent)
                    .await
                    .map_err(|e| StorageError::Write {
                        path: self.path.clone(),
                        source: e,
                    })?;
            }
            let f = OpenOptions::new()
                .create(true)
                .append(true)
                .open(&self.path)
                .await
                .map_err(|e| StorageError::Write {
                    path: self.path.clone(),
                    source: e,
                })?;
            *guard = Some(f);
        }

        let file = guard.as_mut().unwrap();
        file.write_all(line.as_bytes())
            .await
            .map_err(|e| StorageError::Write {
                path: self.path.clone(),
                source: e,
            })
    }

    /// Read every event, in append order.
    ///
    /// A missing file is an empty history, not an error. Any malformed line
    /// fails the whole read — aggregate consumers degrade to zero values
    /// rather than reporting partial data.
    pub async fn read_all(&self) -> Result<Vec<SessionEvent>, StorageError> {
        let content = match tokio::fs::read_to_string(&self.path).await {
            Ok(c) => c,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => {
                return Err(StorageError::Read {
                    path: self.path.clone(),
                    source: e,
                })
            }
        };

        let mut events = Vec::new();
        for (idx, line) in content.lines().enumerate() {
            let line = line.trim();
            if line.is_empty() {
                continue;
            }
            let event: SessionEvent =
                serde_json::from_str(line).map_err(|e| StorageError::MalformedRecord {
                    path: self.path.clone(),
                    line: idx + 1,
                    source: e,
                })?;
            events.push(event);
        }
        Ok(events)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

// ─── Tests ────────────────────────────────────────────────────────────────────
