// SPDX-License-Identifier: MIT
//! Experience and level progression.
//!
//! Levels come from a fixed cumulative-threshold table; XP keeps accumulating
//! past the last threshold but the level stops at the table's end.

use super::model::{GamificationState, XpAward};

/// Cumulative XP required to reach level N (1-indexed; level 1 requires 0).
pub const LEVEL_THRESHOLDS: [u64; 11] =
    [0, 100, 250, 450, 700, 1000, 1350, 1750, 2200, 2700, 3250];

/// Flat XP reward per completed session, regardless of duration.
pub const XP_PER_SESSION: u64 = 25;

/// Largest level whose threshold `xp` has reached. Capped at the table's
/// last level.
pub fn level_from_xp(xp: u64) -> u32 {
    let mut level = 1u32;
    for (idx, threshold) in LEVEL_THRESHOLDS.iter().enumerate() {
        if xp >= *threshold {
            level = idx as u32 + 1;
        }
    }
    level
}

/// Cumulative XP floor of the given level (the threshold that was crossed to
/// reach it).
pub fn xp_floor(level: u32) -> u64 {
    let idx = (level.max(1) as usize - 1).min(LEVEL_THRESHOLDS.len() - 1);
    LEVEL_THRESHOLDS[idx]
}

/// Cumulative XP required for the level after `level`.
///
/// Past the table's end there is no next level; the returned marker
/// (last threshold + 500) exists only so progress displays have a band width.
pub fn xp_for_next_level(level: u32) -> u64 {
    let idx = level as usize;
    if idx < LEVEL_THRESHOLDS.len() {
        LEVEL_THRESHOLDS[idx]
    } else {
        LEVEL_THRESHOLDS[LEVEL_THRESHOLDS.len() - 1] + 500
    }
}

/// Grant the flat per-session reward and recompute the level.
///
/// Pure state transition: the caller persists the updated state.
pub fn add_session_xp(state: &mut GamificationState) -> XpAward {
    let old_level = level_from_xp(state.xp);
    state.xp += XP_PER_SESSION;
    state.level = level_from_xp(state.xp);

    XpAward {
        xp_gained: XP_PER_SESSION,
        total_xp: state.xp,
        level: state.level,
        leveled_up: state.level > old_level,
    }
}

// ─── Tests ────────────────────────────────────────────────────────────────────
