// rest/mod.rs — HTTP API server and the timer page.
//
// Axum server on 127.0.0.1:4747 by default.
//
// Endpoints:
//   GET  /                  timer page
//   POST /api/session       record a completed session
//   GET  /api/progress      today's count + minutes
//   GET  /api/gamification  XP/level/streak/achievement snapshot
//   GET  /api/stats         weekly + monthly windowed stats
//   GET  /api/health        liveness

pub mod page;
pub mod routes;

use anyhow::Result;
use axum::{
    routing::get,
    Router,
};
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use tracing::info;

use crate::AppContext;

pub async fn start_rest_server(ctx: Arc<AppContext>) -> Result<()> {
    let bind = ctx.config.bind();
    let router = build_router(ctx);

    let listener = tokio::net::TcpListener::bind(&bind).await?;
    info!("focusd listening on http://{}", bind);
    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    Ok(())
}

pub fn build_router(ctx: Arc<AppContext>) -> Router {
    Router::new()
        .route("/", get(page::index))
        .route(
            "/api/session",
            axum::routing::post(routes::sessions::log_session),
        )
        .route("/api/progress", get(routes::progress::get_progress))
        .route(
            "/api/gamification",
            get(routes::gamification::get_gamification),
        )
        .route("/api/stats", get(routes::stats::get_stats))
        .route("/api/health", get(routes::health::health))
        .layer(CorsLayer::permissive())
        .with_state(ctx)
}

async fn shutdown_signal() {
    let _ = tokio::signal::ctrl_c().await;
    info!("shutdown signal received");
}
