// SPDX-License-Identifier: MIT

use serde::Deserialize;
use std::path::{Path, PathBuf};
use tracing::warn;

const DEFAULT_PORT: u16 = 4747;
const DEFAULT_MIN_SESSION_SECS: i64 = 30;
const DEFAULT_SESSION_SECS: i64 = 1500;

fn default_bind_address() -> String {
    "127.0.0.1".to_string()
}

fn default_data_dir() -> PathBuf {
    dirs_data_dir().join("focusd")
}

/// Platform data root: `$XDG_DATA_HOME` / `~/.local/share` on Unix,
/// `%LOCALAPPDATA%` on Windows. Falls back to the current directory when no
/// home can be determined.
fn dirs_data_dir() -> PathBuf {
    #[cfg(windows)]
    {
        if let Ok(dir) = std::env::var("LOCALAPPDATA") {
            return PathBuf::from(dir);
        }
    }
    if let Ok(dir) = std::env::var("XDG_DATA_HOME") {
        if !dir.is_empty() {
            return PathBuf::from(dir);
        }
    }
    if let Ok(home) = std::env::var("HOME") {
        if !home.is_empty() {
            return PathBuf::from(home).join(".local").join("share");
        }
    }
    PathBuf::from(".")
}

// ─── TOML layer ───────────────────────────────────────────────────────────────

/// Optional `{data_dir}/config.toml` overrides. Every field is optional so a
/// partial file works; unknown keys are ignored.
#[derive(Debug, Default, Deserialize)]
struct ConfigToml {
    port: Option<u16>,
    bind_address: Option<String>,
    log: Option<String>,
    log_format: Option<String>,
    /// Shortest session accepted by `POST /api/session`, in seconds.
    min_session_secs: Option<i64>,
    /// Default session length when the request omits `duration`, in seconds.
    default_session_secs: Option<i64>,
}

fn load_toml(data_dir: &Path) -> Option<ConfigToml> {
    let path = data_dir.join("config.toml");
    let content = std::fs::read_to_string(&path).ok()?;
    match toml::from_str(&content) {
        Ok(cfg) => Some(cfg),
        Err(e) => {
            warn!("ignoring invalid config.toml at {}: {e}", path.display());
            None
        }
    }
}

// ─── DaemonConfig ─────────────────────────────────────────────────────────────

/// Resolved daemon configuration, shared read-only via `AppContext`.
#[derive(Debug, Clone)]
pub struct DaemonConfig {
    pub port: u16,
    pub bind_address: String,
    pub data_dir: PathBuf,
    pub log: String,
    /// `"pretty"` (default) or `"json"`.
    pub log_format: String,
    pub min_session_secs: i64,
    pub default_session_secs: i64,
}

impl DaemonConfig {
    /// Build config from CLI/env args + optional TOML file.
    ///
    /// Priority (highest to lowest):
    ///   1. CLI / env — passed as `Some(value)` from clap
    ///   2. TOML file at `{data_dir}/config.toml`
    ///   3. Built-in defaults
    pub fn new(
        port: Option<u16>,
        data_dir: Option<PathBuf>,
        log: Option<String>,
        bind_address: Option<String>,
    ) -> Self {
        let data_dir = data_dir.unwrap_or_else(default_data_dir);

        // Load TOML as the lowest-priority override layer
        let toml = load_toml(&data_dir).unwrap_or_default();

        let port = port.or(toml.port).unwrap_or(DEFAULT_PORT);
        let log = log.or(toml.log).unwrap_or_else(|| "info".to_string());

        let bind_address = bind_address
            .or(std::env::var("FOCUSD_BIND").ok().filter(|s| !s.is_empty()))
            .or(toml.bind_address)
            .unwrap_or_else(default_bind_address);

        let log_format = std::env::var("FOCUSD_LOG_FORMAT")
            .ok()
            .filter(|s| !s.is_empty())
            .or(toml.log_format)
            .unwrap_or_else(|| "pretty".to_string());

        let min_session_secs = toml.min_session_secs.unwrap_or(DEFAULT_MIN_SESSION_SECS);
        let default_session_secs = toml
            .default_session_secs
            .unwrap_or(DEFAULT_SESSION_SECS);

        Self {
            port,
            bind_address,
            data_dir,
            log,
            log_format,
            min_session_secs,
            default_session_secs,
        }
    }

    /// Socket address string the REST server binds to.
    pub fn bind(&self) -> String {
        format!("{}:{}", self.bind_address, self.port)
    }
}

// ─── Tests ────────────────────────────────────────────────────────────────────
