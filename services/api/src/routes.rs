use crate::infra::{AppState, Services};
use axum::http::{header, StatusCode};
use axum::response::IntoResponse;
use axum::routing::get;
use axum::{Extension, Json, Router};
use serde_json::json;
use volunteer_hub::workflows::dashboard::dashboard_router;
use volunteer_hub::workflows::events::event_router;
use volunteer_hub::workflows::ideas::idea_router;
use volunteer_hub::workflows::roster::roster_router;
use volunteer_hub::workflows::tasks::task_router;

pub(crate) fn app_router(services: &Services) -> Router {
    Router::new()
        .merge(roster_router(services.roster.clone()))
        .merge(task_router(services.tasks.clone()))
        .merge(event_router(services.events.clone()))
        .merge(idea_router(services.ideas.clone()))
        .merge(dashboard_router(services.dashboard.clone()))
        .route("/health", get(healthcheck))
        .route("/ready", get(readiness_endpoint))
        .route("/metrics", get(metrics_endpoint))
}

pub(crate) async fn healthcheck() -> Json<serde_json::Value> {
    Json(json!({ "status": "ok" }))
}

pub(crate) async fn readiness_endpoint(Extension(state): Extension<AppState>) -> impl IntoResponse {
    let ready = state.readiness.load(std::sync::atomic::Ordering::Relaxed);
    let status = if ready {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    let payload = if ready {
        json!({ "status": "ready" })
    } else {
        json!({ "status": "initializing" })
    };

    (status, Json(payload))
}

pub(crate) async fn metrics_endpoint(Extension(state): Extension<AppState>) -> impl IntoResponse {
    (
        StatusCode::OK,
        [(header::CONTENT_TYPE, "text/plain; version=0.0.4")],
        state.metrics.render(),
    )
}
