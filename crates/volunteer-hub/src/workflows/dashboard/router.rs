use std::sync::Arc;

use axum::{
    extract::State,
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};

use super::service::{DashboardError, DashboardService};
use crate::access::RequestContext;
use crate::error::json_error;
use crate::workflows::events::repository::EventRepository;
use crate::workflows::ideas::repository::IdeaRepository;
use crate::workflows::roster::repository::MemberRepository;
use crate::workflows::tasks::repository::TaskRepository;

pub fn dashboard_router<M, T, E, I>(service: Arc<DashboardService<M, T, E, I>>) -> Router
where
    M: MemberRepository + 'static,
    T: TaskRepository + 'static,
    E: EventRepository + 'static,
    I: IdeaRepository + 'static,
{
    Router::new()
        .route("/api/v1/dashboard", get(summary_handler::<M, T, E, I>))
        .route("/api/v1/analytics", get(analytics_handler::<M, T, E, I>))
        .with_state(service)
}

impl IntoResponse for DashboardError {
    fn into_response(self) -> Response {
        json_error(self.status_code(), self)
    }
}

pub(crate) async fn summary_handler<M, T, E, I>(
    State(service): State<Arc<DashboardService<M, T, E, I>>>,
    headers: HeaderMap,
) -> Response
where
    M: MemberRepository + 'static,
    T: TaskRepository + 'static,
    E: EventRepository + 'static,
    I: IdeaRepository + 'static,
{
    match RequestContext::from_request(&headers)
        .map_err(DashboardError::from)
        .and_then(|context| service.summary(&context))
    {
        Ok(summary) => (StatusCode::OK, Json(summary)).into_response(),
        Err(err) => err.into_response(),
    }
}

pub(crate) async fn analytics_handler<M, T, E, I>(
    State(service): State<Arc<DashboardService<M, T, E, I>>>,
    headers: HeaderMap,
) -> Response
where
    M: MemberRepository + 'static,
    T: TaskRepository + 'static,
    E: EventRepository + 'static,
    I: IdeaRepository + 'static,
{
    match RequestContext::from_request(&headers)
        .map_err(DashboardError::from)
        .and_then(|context| service.analytics(&context))
    {
        Ok(analytics) => (StatusCode::OK, Json(analytics)).into_response(),
        Err(err) => err.into_response(),
    }
}
