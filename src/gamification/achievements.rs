// SPDX-License-Identifier: MIT
//! Achievement system — 7 pre-defined badges and the unlock evaluator.
//!
//! Achievement ids are stable snake_case strings (e.g. `"first_session"`)
//! and appear in the state file in unlock order.

use chrono::{Datelike, Days, NaiveDate};

use super::model::{AchievementDef, GamificationState};
use crate::storage::SessionEvent;

// ─── Achievement ID constants ─────────────────────────────────────────────────

pub const FIRST_SESSION: &str = "first_session";
pub const STREAK_3: &str = "streak_3";
pub const STREAK_7: &str = "streak_7";
pub const WEEK_10: &str = "week_10";
pub const WEEK_25: &str = "week_25";
pub const TOTAL_50: &str = "total_50";
pub const TOTAL_100: &str = "total_100";

// ─── Catalog ──────────────────────────────────────────────────────────────────

/// The canonical catalog, in declaration order. Declaration order decides
/// the order of simultaneous unlocks in the response.
pub const CATALOG: &[AchievementDef] = &[
    AchievementDef {
        id: FIRST_SESSION,
        name: "First Steps",
        description: "Completed your first focus session.",
        icon: "🌱",
    },
    AchievementDef {
        id: STREAK_3,
        name: "3-Day Warrior",
        description: "Kept a 3-day streak going.",
        icon: "🔥",
    },
    AchievementDef {
        id: STREAK_7,
        name: "Week Champion",
        description: "Kept a 7-day streak going.",
        icon: "🏆",
    },
    AchievementDef {
        id: WEEK_10,
        name: "Weekly Master",
        description: "Completed 10 sessions in a single week.",
        icon: "⚡",
    },
    AchievementDef {
        id: WEEK_25,
        name: "Weekly Legend",
        description: "Completed 25 sessions in a single week.",
        icon: "💎",
    },
    AchievementDef {
        id: TOTAL_50,
        name: "Half Century",
        description: "Completed 50 focus sessions in total.",
        icon: "🎯",
    },
    AchievementDef {
        id: TOTAL_100,
        name: "Centurion",
        description: "Completed 100 focus sessions in total.",
        icon: "👑",
    },
];

pub fn find(id: &str) -> Option<&'static AchievementDef> {
    CATALOG.iter().find(|d| d.id == id)
}

/// Monday of the week containing `date`.
pub fn week_start(date: NaiveDate) -> NaiveDate {
    let days_from_monday = date.weekday().num_days_from_monday() as u64;
    date.checked_sub_days(Days::new(days_from_monday))
        .unwrap_or(date)
}

// ─── Evaluator ────────────────────────────────────────────────────────────────

/// Evaluate every catalog predicate against the accumulated state and the
/// full event history, unlock anything newly met, and return the newly
/// unlocked definitions in catalog order.
///
/// Idempotent: already-unlocked badges are never returned again, and a call
/// that unlocks nothing returns an empty list. The caller persists the state
/// only when the list is non-empty; no achievement is ever revoked.
///
/// The streak badges read `state.current_streak`, so the write path must run
/// the streak update for the current event before calling this.
pub fn check(
    state: &mut GamificationState,
    events: &[SessionEvent],
    today: NaiveDate,
) -> Vec<&'static AchievementDef> {
    let total = events.len();
    let monday = week_start(today);
    let this_week = events.iter().filter(|e| e.date >= monday).count();

    let mut newly_unlocked = Vec::new();
    for def in CATALOG {
        let met = match def.id {
            FIRST_SESSION => total >= 1,
            STREAK_3 => state.current_streak >= 3,
            STREAK_7 => state.current_streak >= 7,
            WEEK_10 => this_week >= 10,
            WEEK_25 => this_week >= 25,
            TOTAL_50 => total >= 50,
            TOTAL_100 => total >= 100,
            _ => false,
        };
        if met && !state.has_achievement(def.id) {
            state.achievements.push(def.id.to_string());
            newly_unlocked.push(def);
        }
    }
    newly_unlocked
}

// ─── Tests ────────────────────────────────────────────────────────────────────
