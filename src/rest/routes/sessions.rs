// rest/routes/sessions.rs — POST /api/session.

use axum::{body::Bytes, extract::State, http::StatusCode, Json};
use serde::Deserialize;
use serde_json::{json, Value};
use std::sync::Arc;
use tracing::error;

use crate::gamification::{parse_timestamp, GamificationService};
use crate::AppContext;

#[derive(Deserialize, Default)]
pub struct LogSessionRequest {
    /// ISO naive datetime, e.g. `"2026-08-29T10:30:00"`. Defaults to now.
    pub timestamp: Option<String>,
    /// Seconds. Defaults to the configured session length (25 minutes).
    pub duration: Option<i64>,
}

/// Record a completed session and run the gamification write path.
///
/// Returns 201 with the XP award and any newly unlocked achievements, 400 on
/// invalid input, 500 when the log append or state save fails.
pub async fn log_session(
    State(ctx): State<Arc<AppContext>>,
    body: Bytes,
) -> Result<(StatusCode, Json<Value>), (StatusCode, Json<Value>)> {
    // Lenient body handling: an absent, non-JSON, or unparsable body logs a
    // default session instead of being rejected by the extractor.
    let body: LogSessionRequest = serde_json::from_slice(&body).unwrap_or_default();

    let duration = body.duration.unwrap_or(ctx.config.default_session_secs);
    if duration < ctx.config.min_session_secs {
        return Err((
            StatusCode::BAD_REQUEST,
            Json(json!({
                "error": format!(
                    "Duration must be at least {} seconds",
                    ctx.config.min_session_secs
                )
            })),
        ));
    }

    let timestamp = match body.timestamp.as_deref() {
        None => None,
        Some(raw) => match parse_timestamp(raw) {
            Some(ts) => Some(ts),
            None => {
                return Err((
                    StatusCode::BAD_REQUEST,
                    Json(json!({ "error": "Invalid timestamp" })),
                ))
            }
        },
    };

    let service = GamificationService::new(ctx.session_log.clone(), ctx.state_store.clone());
    match service.record_session(timestamp, duration).await {
        Ok(outcome) => {
            let new_achievements: Vec<Value> = outcome
                .new_achievements
                .iter()
                .map(|a| {
                    json!({
                        "id": a.id,
                        "name": a.name,
                        "description": a.description,
                        "icon": a.icon,
                    })
                })
                .collect();

            Ok((
                StatusCode::CREATED,
                Json(json!({
                    "success": true,
                    "message": "Session logged successfully",
                    "gamification": {
                        "xp_gained": outcome.award.xp_gained,
                        "total_xp": outcome.award.total_xp,
                        "level": outcome.award.level,
                        "leveled_up": outcome.award.leveled_up,
                        "new_achievements": new_achievements,
                    },
                })),
            ))
        }
        Err(e) => {
            error!("failed to log session: {e}");
            Err((
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({ "error": "Failed to log session" })),
            ))
        }
    }
}
