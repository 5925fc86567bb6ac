use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    routing::{get, post, put},
    Json, Router,
};
use chrono::Local;

use super::domain::{AttendanceMark, EventDraft, EventId, EventQuery, ParticipantsUpdate};
use super::repository::EventRepository;
use super::service::{EventService, EventServiceError};
use crate::access::RequestContext;
use crate::error::json_error;
use crate::workflows::roster::repository::MemberRepository;

/// Router builder exposing event and attendance endpoints.
pub fn event_router<M, E>(service: Arc<EventService<M, E>>) -> Router
where
    M: MemberRepository + 'static,
    E: EventRepository + 'static,
{
    Router::new()
        .route(
            "/api/v1/events",
            get(list_handler::<M, E>).post(create_handler::<M, E>),
        )
        .route(
            "/api/v1/events/:event_id/status",
            post(toggle_status_handler::<M, E>),
        )
        .route(
            "/api/v1/events/:event_id/cancel",
            post(cancel_handler::<M, E>),
        )
        .route(
            "/api/v1/events/:event_id/participants",
            put(participants_handler::<M, E>),
        )
        .route(
            "/api/v1/events/:event_id/registrations",
            post(register_handler::<M, E>),
        )
        .route(
            "/api/v1/events/:event_id/check-in",
            post(check_in_handler::<M, E>),
        )
        .route(
            "/api/v1/events/:event_id/check-out",
            post(check_out_handler::<M, E>),
        )
        .route(
            "/api/v1/events/:event_id/attendance",
            get(attendance_handler::<M, E>),
        )
        .with_state(service)
}

impl IntoResponse for EventServiceError {
    fn into_response(self) -> Response {
        json_error(self.status_code(), self)
    }
}

fn respond<T: serde::Serialize>(
    status: StatusCode,
    result: Result<T, EventServiceError>,
) -> Response {
    match result {
        Ok(body) => (status, Json(body)).into_response(),
        Err(err) => err.into_response(),
    }
}

pub(crate) async fn create_handler<M, E>(
    State(service): State<Arc<EventService<M, E>>>,
    headers: HeaderMap,
    Json(draft): Json<EventDraft>,
) -> Response
where
    M: MemberRepository + 'static,
    E: EventRepository + 'static,
{
    let result = RequestContext::from_request(&headers)
        .map_err(EventServiceError::from)
        .and_then(|context| service.create(&context, draft));
    respond(StatusCode::CREATED, result)
}

pub(crate) async fn list_handler<M, E>(
    State(service): State<Arc<EventService<M, E>>>,
    headers: HeaderMap,
    Query(query): Query<EventQuery>,
) -> Response
where
    M: MemberRepository + 'static,
    E: EventRepository + 'static,
{
    let result = RequestContext::from_request(&headers)
        .map_err(EventServiceError::from)
        .and_then(|context| service.list(&context, &query));
    respond(StatusCode::OK, result)
}

pub(crate) async fn toggle_status_handler<M, E>(
    State(service): State<Arc<EventService<M, E>>>,
    headers: HeaderMap,
    Path(event_id): Path<String>,
) -> Response
where
    M: MemberRepository + 'static,
    E: EventRepository + 'static,
{
    let id = EventId(event_id);
    let result = RequestContext::from_request(&headers)
        .map_err(EventServiceError::from)
        .and_then(|context| service.toggle_status(&context, &id));
    respond(StatusCode::OK, result)
}

pub(crate) async fn cancel_handler<M, E>(
    State(service): State<Arc<EventService<M, E>>>,
    headers: HeaderMap,
    Path(event_id): Path<String>,
) -> Response
where
    M: MemberRepository + 'static,
    E: EventRepository + 'static,
{
    let id = EventId(event_id);
    let result = RequestContext::from_request(&headers)
        .map_err(EventServiceError::from)
        .and_then(|context| service.cancel(&context, &id));
    respond(StatusCode::OK, result)
}

pub(crate) async fn participants_handler<M, E>(
    State(service): State<Arc<EventService<M, E>>>,
    headers: HeaderMap,
    Path(event_id): Path<String>,
    Json(update): Json<ParticipantsUpdate>,
) -> Response
where
    M: MemberRepository + 'static,
    E: EventRepository + 'static,
{
    let id = EventId(event_id);
    let result = RequestContext::from_request(&headers)
        .map_err(EventServiceError::from)
        .and_then(|context| service.set_participants(&context, &id, &update.participants));
    respond(StatusCode::OK, result)
}

pub(crate) async fn register_handler<M, E>(
    State(service): State<Arc<EventService<M, E>>>,
    headers: HeaderMap,
    Path(event_id): Path<String>,
) -> Response
where
    M: MemberRepository + 'static,
    E: EventRepository + 'static,
{
    let id = EventId(event_id);
    let result = RequestContext::from_request(&headers)
        .map_err(EventServiceError::from)
        .and_then(|context| service.register(&context, &id));
    respond(StatusCode::OK, result)
}

pub(crate) async fn check_in_handler<M, E>(
    State(service): State<Arc<EventService<M, E>>>,
    headers: HeaderMap,
    Path(event_id): Path<String>,
    Json(mark): Json<AttendanceMark>,
) -> Response
where
    M: MemberRepository + 'static,
    E: EventRepository + 'static,
{
    let id = EventId(event_id);
    let at = mark.at.unwrap_or_else(|| Local::now().naive_local());
    let result = RequestContext::from_request(&headers)
        .map_err(EventServiceError::from)
        .and_then(|context| service.check_in(&context, &id, &mark.member_id, at));
    respond(StatusCode::OK, result)
}

pub(crate) async fn check_out_handler<M, E>(
    State(service): State<Arc<EventService<M, E>>>,
    headers: HeaderMap,
    Path(event_id): Path<String>,
    Json(mark): Json<AttendanceMark>,
) -> Response
where
    M: MemberRepository + 'static,
    E: EventRepository + 'static,
{
    let id = EventId(event_id);
    let at = mark.at.unwrap_or_else(|| Local::now().naive_local());
    let result = RequestContext::from_request(&headers)
        .map_err(EventServiceError::from)
        .and_then(|context| service.check_out(&context, &id, &mark.member_id, at));
    respond(StatusCode::OK, result)
}

pub(crate) async fn attendance_handler<M, E>(
    State(service): State<Arc<EventService<M, E>>>,
    headers: HeaderMap,
    Path(event_id): Path<String>,
) -> Response
where
    M: MemberRepository + 'static,
    E: EventRepository + 'static,
{
    let id = EventId(event_id);
    let result = RequestContext::from_request(&headers)
        .map_err(EventServiceError::from)
        .and_then(|context| service.attendance(&context, &id));
    respond(StatusCode::OK, result)
}
