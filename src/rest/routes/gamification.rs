// rest/routes/gamification.rs — GET /api/gamification.

use axum::{extract::State, Json};
use serde_json::{json, Value};
use std::sync::Arc;

use crate::gamification::GamificationService;
use crate::AppContext;

/// Full gamification snapshot: XP band progress, streaks, and the annotated
/// achievement catalog. Read-only.
pub async fn get_gamification(State(ctx): State<Arc<AppContext>>) -> Json<Value> {
    let service = GamificationService::new(ctx.session_log.clone(), ctx.state_store.clone());
    let snap = service.snapshot().await;

    Json(json!({
        "xp": snap.xp,
        "level": snap.level,
        "xp_progress": snap.xp_progress,
        "xp_needed": snap.xp_needed,
        "xp_percentage": snap.xp_percentage,
        "current_streak": snap.current_streak,
        "longest_streak": snap.longest_streak,
        "last_session_date": snap.last_session_date,
        "achievements": snap.achievements,
        "unlocked_achievements": snap.unlocked_achievements,
        "total_achievements": snap.total_achievements,
        "unlocked_count": snap.unlocked_count,
    }))
}
