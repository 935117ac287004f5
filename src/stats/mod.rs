// SPDX-License-Identifier: MIT
//! Progress aggregation — same-day totals and dense trailing-window
//! day-bucketed session counts.
//!
//! Pure functions over `(events, today)`; "today" is injected so the
//! arithmetic is testable without the wall clock.

use chrono::{Days, NaiveDate};
use serde::Serialize;
use std::collections::BTreeMap;

use crate::storage::SessionEvent;

pub const WEEK_WINDOW_DAYS: u32 = 7;
pub const MONTH_WINDOW_DAYS: u32 = 30;

// ─── TodayProgress ────────────────────────────────────────────────────────────

/// Today's totals, as returned by `GET /api/progress`.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct TodayProgress {
    /// Sessions completed today.
    pub count: u64,
    /// Focus minutes today, each session contributing `floor(duration / 60)`.
    pub minutes: u64,
}

/// Count and sum today's sessions. Empty input gives zeros.
pub fn today_progress(events: &[SessionEvent], today: NaiveDate) -> TodayProgress {
    let mut progress = TodayProgress::default();
    for event in events.iter().filter(|e| e.date == today) {
        progress.count += 1;
        progress.minutes += event.minutes().max(0) as u64;
    }
    progress
}

// ─── Windowed stats ───────────────────────────────────────────────────────────

/// Day-bucketed counts over one trailing window.
#[derive(Debug, Clone, Serialize)]
pub struct WindowStats {
    /// ISO date → session count for each of the last `window_days` days,
    /// today inclusive. Days without sessions are present with 0; ISO dates
    /// sort chronologically so the map iterates oldest-first.
    pub data: BTreeMap<String, u64>,
    pub total: u64,
    /// `total / window_days`.
    pub average: f64,
    /// Percentage of window days with at least one session.
    pub completion_rate: f64,
}

/// Dense stats over the `window_days` calendar dates ending at `today`.
/// Sessions dated outside the window are ignored.
pub fn windowed_stats(events: &[SessionEvent], today: NaiveDate, window_days: u32) -> WindowStats {
    debug_assert!(window_days > 0);

    let mut counts: BTreeMap<NaiveDate, u64> = (0..window_days)
        .filter_map(|offset| today.checked_sub_days(Days::new(offset as u64)))
        .map(|day| (day, 0))
        .collect();

    for event in events {
        if let Some(count) = counts.get_mut(&event.date) {
            *count += 1;
        }
    }

    let total: u64 = counts.values().sum();
    let active_days = counts.values().filter(|c| **c > 0).count();
    let data: BTreeMap<String, u64> = counts
        .iter()
        .map(|(day, count)| (day.format("%Y-%m-%d").to_string(), *count))
        .collect();

    WindowStats {
        total,
        average: total as f64 / window_days as f64,
        completion_rate: active_days as f64 / window_days as f64 * 100.0,
        data,
    }
}

// ─── Report ───────────────────────────────────────────────────────────────────

/// The `GET /api/stats` payload: weekly and monthly windows side by side.
#[derive(Debug, Clone, Serialize)]
pub struct StatsReport {
    pub weekly: WindowStats,
    pub monthly: WindowStats,
}

pub fn report(events: &[SessionEvent], today: NaiveDate) -> StatsReport {
    StatsReport {
        weekly: windowed_stats(events, today, WEEK_WINDOW_DAYS),
        monthly: windowed_stats(events, today, MONTH_WINDOW_DAYS),
    }
}

// ─── Tests ────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDateTime;

    fn d(s: &str) -> NaiveDate {
        s.parse().unwrap()
    }

    fn event(date: &str, duration: i64) -> SessionEvent {
        let ts: NaiveDateTime = format!("{date}T10:00:00").parse().unwrap();
        SessionEvent::new(ts, duration)
    }

    #[test]
    fn today_progress_empty() {
        assert_eq!(
            today_progress(&[], d("2026-08-29")),
            TodayProgress { count: 0, minutes: 0 }
        );
    }

    #[test]
    fn today_progress_sums_same_day_minutes() {
        let events = vec![event("2026-08-29", 1500), event("2026-08-29", 1800)];
        let p = today_progress(&events, d("2026-08-29"));
        assert_eq!(p.count, 2);
        assert_eq!(p.minutes, 55);
    }

    #[test]
    fn today_progress_ignores_other_days() {
        let events = vec![event("2026-08-28", 1500), event("2026-08-29", 1500)];
        let p = today_progress(&events, d("2026-08-29"));
        assert_eq!(p.count, 1);
        assert_eq!(p.minutes, 25);
    }

    #[test]
    fn minute_boundaries_floor() {
        let p = today_progress(&[event("2026-08-29", 60)], d("2026-08-29"));
        assert_eq!(p.minutes, 1);
        let p = today_progress(&[event("2026-08-29", 59)], d("2026-08-29"));
        assert_eq!(p.minutes, 0);
        let p = today_progress(&[event("2026-08-29", 90)], d("2026-08-29"));
        assert_eq!(p.minutes, 1);
    }

    #[test]
    fn window_is_dense_and_zero_filled() {
        let stats = windowed_stats(&[], d("2026-08-29"), 7);
        assert_eq!(stats.data.len(), 7);
        assert!(stats.data.values().all(|c| *c == 0));
        assert_eq!(stats.total, 0);
        assert_eq!(stats.average, 0.0);
        assert_eq!(stats.completion_rate, 0.0);
        // First key is the oldest day, last is today.
        assert_eq!(stats.data.keys().next().unwrap(), "2026-08-23");
        assert_eq!(stats.data.keys().last().unwrap(), "2026-08-29");
    }

    #[test]
    fn one_session_per_day_fills_the_week() {
        let events: Vec<SessionEvent> = (23..=29)
            .map(|day| event(&format!("2026-08-{day:02}"), 1500))
            .collect();
        let stats = windowed_stats(&events, d("2026-08-29"), 7);
        assert_eq!(stats.total, 7);
        assert_eq!(stats.average, 1.0);
        assert_eq!(stats.completion_rate, 100.0);
    }

    #[test]
    fn every_other_day_over_a_month() {
        // 15 sessions on alternating days ending today.
        let today = d("2026-08-29");
        let events: Vec<SessionEvent> = (0..15)
            .map(|i| {
                let day = today.checked_sub_days(Days::new(i * 2)).unwrap();
                event(&day.format("%Y-%m-%d").to_string(), 1500)
            })
            .collect();
        let stats = windowed_stats(&events, today, 30);
        assert_eq!(stats.total, 15);
        assert_eq!(stats.average, 0.5);
        assert_eq!(stats.completion_rate, 50.0);
    }

    #[test]
    fn sessions_outside_window_are_ignored() {
        let events = vec![event("2026-08-01", 1500), event("2026-08-29", 1500)];
        let stats = windowed_stats(&events, d("2026-08-29"), 7);
        assert_eq!(stats.total, 1);
    }

    #[test]
    fn multiple_sessions_bucket_on_one_day() {
        let events = vec![
            event("2026-08-29", 1500),
            event("2026-08-29", 1500),
            event("2026-08-29", 1500),
        ];
        let stats = windowed_stats(&events, d("2026-08-29"), 7);
        assert_eq!(stats.data["2026-08-29"], 3);
        assert_eq!(stats.total, 3);
        assert!((stats.completion_rate - 100.0 / 7.0).abs() < 1e-9);
    }

    #[test]
    fn report_carries_both_windows() {
        let r = report(&[event("2026-08-29", 1500)], d("2026-08-29"));
        assert_eq!(r.weekly.data.len(), 7);
        assert_eq!(r.monthly.data.len(), 30);
        assert_eq!(r.weekly.total, 1);
        assert_eq!(r.monthly.total, 1);
    }
}
