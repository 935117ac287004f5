// rest/routes/progress.rs — GET /api/progress.

use axum::{extract::State, Json};
use serde_json::{json, Value};
use std::sync::Arc;

use crate::gamification::GamificationService;
use crate::AppContext;

/// Today's session count and focus minutes. Never fails: an unreadable log
/// reports zeros.
pub async fn get_progress(State(ctx): State<Arc<AppContext>>) -> Json<Value> {
    let service = GamificationService::new(ctx.session_log.clone(), ctx.state_store.clone());
    let progress = service.today_progress().await;
    Json(json!({
        "count": progress.count,
        "minutes": progress.minutes,
    }))
}
