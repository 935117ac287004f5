// rest/routes/stats.rs — GET /api/stats.

use axum::{extract::State, Json};
use serde_json::{json, Value};
use std::sync::Arc;

use crate::gamification::GamificationService;
use crate::AppContext;

/// Weekly (7-day) and monthly (30-day) windowed statistics. An unreadable
/// log yields zero-filled windows.
pub async fn get_stats(State(ctx): State<Arc<AppContext>>) -> Json<Value> {
    let service = GamificationService::new(ctx.session_log.clone(), ctx.state_store.clone());
    let report = service.stats().await;
    Json(json!({
        "weekly": report.weekly,
        "monthly": report.monthly,
    }))
}
