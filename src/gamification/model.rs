// SPDX-License-Identifier: MIT
//! Gamification data models — the persisted state document and the
//! serialisable types returned by the gamification endpoints.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

// ─── GamificationState ────────────────────────────────────────────────────────

/// The single mutable gamification record, persisted as one JSON document.
///
/// Invariants after every mutation:
/// - `level == levels::level_from_xp(xp)` (recomputed on load, never trusted
///   from disk)
/// - `longest_streak >= current_streak`
/// - `achievements` only grows, in unlock order
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GamificationState {
    /// Total experience. Monotonically increasing, flat 25 per session.
    pub xp: u64,
    /// Current level, derived from `xp` via the threshold table.
    pub level: u32,
    /// Unlocked achievement ids, in unlock order. Never shrinks.
    #[serde(default)]
    pub achievements: Vec<String>,
    /// Consecutive calendar days (ending at `last_session_date`) with at
    /// least one session.
    pub current_streak: u32,
    /// Best streak ever reached.
    pub longest_streak: u32,
    /// Date of the most recently recorded session, e.g. `"2026-08-29"`.
    #[serde(default)]
    pub last_session_date: Option<NaiveDate>,
}

impl Default for GamificationState {
    fn default() -> Self {
        Self {
            xp: 0,
            level: 1,
            achievements: Vec::new(),
            current_streak: 0,
            longest_streak: 0,
            last_session_date: None,
        }
    }
}

impl GamificationState {
    pub fn has_achievement(&self, id: &str) -> bool {
        self.achievements.iter().any(|a| a == id)
    }
}

// ─── XpAward ──────────────────────────────────────────────────────────────────

/// Result of granting XP for one session. Embedded in the
/// `POST /api/session` response.
#[derive(Debug, Clone, Serialize)]
pub struct XpAward {
    pub xp_gained: u64,
    pub total_xp: u64,
    pub level: u32,
    pub leveled_up: bool,
}

// ─── Achievement catalog entry ────────────────────────────────────────────────

/// A static catalog entry. The catalog is fixed for the process lifetime;
/// only the unlock status varies per installation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AchievementDef {
    pub id: &'static str,
    pub name: &'static str,
    pub description: &'static str,
    pub icon: &'static str,
}

/// A catalog entry annotated with unlock status, as returned by
/// `GET /api/gamification`.
#[derive(Debug, Clone, Serialize)]
pub struct AchievementEntry {
    pub id: &'static str,
    pub name: &'static str,
    pub description: &'static str,
    pub icon: &'static str,
    pub unlocked: bool,
}

impl AchievementEntry {
    pub fn from_def(def: &AchievementDef, unlocked: bool) -> Self {
        Self {
            id: def.id,
            name: def.name,
            description: def.description,
            icon: def.icon,
            unlocked,
        }
    }
}

// ─── Snapshot ─────────────────────────────────────────────────────────────────

/// Full gamification view: current state plus derived display fields and the
/// annotated catalog.
#[derive(Debug, Clone, Serialize)]
pub struct GamificationSnapshot {
    pub xp: u64,
    pub level: u32,
    /// XP earned inside the current level band (above the level's floor).
    pub xp_progress: u64,
    /// Width of the current level band.
    pub xp_needed: u64,
    /// `xp_progress / xp_needed * 100`, 0 when the band is empty.
    pub xp_percentage: f64,
    pub current_streak: u32,
    pub longest_streak: u32,
    pub last_session_date: Option<NaiveDate>,
    /// The full catalog, each entry annotated with `unlocked`.
    pub achievements: Vec<AchievementEntry>,
    /// The unlocked subset, in catalog order.
    pub unlocked_achievements: Vec<AchievementEntry>,
    pub total_achievements: usize,
    pub unlocked_count: usize,
}

// ─── Tests ────────────────────────────────────────────────────────────────────
