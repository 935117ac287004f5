// SPDX-License-Identifier: MIT
//! Gamification engine — XP/levels, streaks, achievements, and the service
//! that sequences them on the write path.
//!
//! The engines themselves ([`levels`], [`streak`], [`achievements`]) are pure
//! functions over `(state, events, inputs)`; [`GamificationService`] owns the
//! injected stores and the ordering — XP, then streak, then achievements, so
//! the streak badges see the streak produced by the current event.

pub mod achievements;
pub mod levels;
pub mod model;
pub mod streak;

use chrono::{Local, NaiveDate, NaiveDateTime};
use std::sync::Arc;
use tracing::{debug, info, warn};

use crate::error::StorageError;
use crate::stats::{self, StatsReport, TodayProgress};
use crate::storage::{SessionEvent, SessionLog, StateStore};
use model::{AchievementDef, AchievementEntry, GamificationSnapshot, GamificationState, XpAward};

/// Everything `POST /api/session` needs to report back: the recorded event,
/// the XP award, and any badges it unlocked.
#[derive(Debug)]
pub struct SessionOutcome {
    pub event: SessionEvent,
    pub award: XpAward,
    pub new_achievements: Vec<&'static AchievementDef>,
}

/// Thin service over the two stores. Cheap to construct per call site.
pub struct GamificationService {
    log: Arc<SessionLog>,
    store: Arc<StateStore>,
}

impl GamificationService {
    pub fn new(log: Arc<SessionLog>, store: Arc<StateStore>) -> Self {
        Self { log, store }
    }

    /// Record one completed session and run the full write path:
    /// append → XP grant → streak update → achievement check.
    ///
    /// State is persisted after the XP grant, after the streak update, and
    /// after the achievement check only when something unlocked, so a repeat
    /// evaluation with nothing new performs no write. Append and save
    /// failures propagate; a failed append aborts before any state mutation.
    pub async fn record_session(
        &self,
        timestamp: Option<NaiveDateTime>,
        duration: i64,
    ) -> Result<SessionOutcome, StorageError> {
        let timestamp = timestamp.unwrap_or_else(|| Local::now().naive_local());
        let event = SessionEvent::new(timestamp, duration);

        self.log.append(&event).await?;
        info!(date = %event.date, duration = event.duration, "session logged");

        let mut state = self.store.load().await;

        let award = levels::add_session_xp(&mut state);
        self.store.save(&state).await?;
        if award.leveled_up {
            info!(level = award.level, total_xp = award.total_xp, "level up");
        }

        streak::update_streak(&mut state, event.date);
        self.store.save(&state).await?;

        // Achievement predicates need the full history. If it cannot be read
        // back, evaluate against an empty one — badges will unlock on a later
        // session instead.
        let events = match self.log.read_all().await {
            Ok(events) => events,
            Err(e) => {
                warn!("session log unreadable during achievement check: {e}");
                Vec::new()
            }
        };

        let today = Local::now().date_naive();
        let new_achievements = achievements::check(&mut state, &events, today);
        if !new_achievements.is_empty() {
            self.store.save(&state).await?;
            for def in &new_achievements {
                info!(id = def.id, "achievement unlocked");
            }
        }

        Ok(SessionOutcome {
            event,
            award,
            new_achievements,
        })
    }

    /// Today's session count and focus minutes. Read failures degrade to
    /// zeros — this path never errors.
    pub async fn today_progress(&self) -> TodayProgress {
        let events = self.read_events_soft().await;
        stats::today_progress(&events, Local::now().date_naive())
    }

    /// 7- and 30-day windowed statistics. Read failures degrade to
    /// zero-filled windows.
    pub async fn stats(&self) -> StatsReport {
        let events = self.read_events_soft().await;
        stats::report(&events, Local::now().date_naive())
    }

    /// Assemble the full gamification snapshot from the current state.
    /// Read-only; performs no writes.
    pub async fn snapshot(&self) -> GamificationSnapshot {
        let state = self.store.load().await;
        snapshot_from_state(&state)
    }

    async fn read_events_soft(&self) -> Vec<SessionEvent> {
        match self.log.read_all().await {
            Ok(events) => events,
            Err(e) => {
                debug!("session log unreadable, reporting zeros: {e}");
                Vec::new()
            }
        }
    }
}

/// Derive the display fields and annotated catalog for a state.
pub fn snapshot_from_state(state: &GamificationState) -> GamificationSnapshot {
    let floor = levels::xp_floor(state.level);
    let xp_progress = state.xp.saturating_sub(floor);
    let xp_needed = levels::xp_for_next_level(state.level).saturating_sub(floor);
    let xp_percentage = if xp_needed == 0 {
        0.0
    } else {
        xp_progress as f64 / xp_needed as f64 * 100.0
    };

    let entries: Vec<AchievementEntry> = achievements::CATALOG
        .iter()
        .map(|def| AchievementEntry::from_def(def, state.has_achievement(def.id)))
        .collect();
    let unlocked: Vec<AchievementEntry> =
        entries.iter().filter(|e| e.unlocked).cloned().collect();

    GamificationSnapshot {
        xp: state.xp,
        level: state.level,
        xp_progress,
        xp_needed,
        xp_percentage,
        current_streak: state.current_streak,
        longest_streak: state.longest_streak,
        last_session_date: state.last_session_date,
        unlocked_count: unlocked.len(),
        total_achievements: entries.len(),
        achievements: entries,
        unlocked_achievements: unlocked,
    }
}

/// Shared helper for handlers that accept an optional ISO timestamp string.
pub fn parse_timestamp(raw: &str) -> Option<NaiveDateTime> {
    if let Ok(ts) = raw.parse::<NaiveDateTime>() {
        return Some(ts);
    }
    // A bare date is accepted as midnight of that day.
    raw.parse::<NaiveDate>()
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
}

// ─── Tests ────────────────────────────────────────────────────────────────────
