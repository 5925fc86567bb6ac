use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    routing::{get, post, put},
    Json, Router,
};
use chrono::Local;

use super::domain::{MemberFilter, MemberId, NewMember, ProfileUpdate, Registration};
use super::repository::MemberRepository;
use super::service::{RosterError, RosterService};
use crate::access::RequestContext;
use crate::error::json_error;

/// Router builder exposing roster management endpoints.
pub fn roster_router<M>(service: Arc<RosterService<M>>) -> Router
where
    M: MemberRepository + 'static,
{
    Router::new()
        .route("/api/v1/register", post(register_handler::<M>))
        .route(
            "/api/v1/members",
            get(list_handler::<M>).post(add_handler::<M>),
        )
        .route(
            "/api/v1/members/:member_id",
            put(update_member_handler::<M>).delete(remove_handler::<M>),
        )
        .route(
            "/api/v1/members/:member_id/status",
            post(toggle_status_handler::<M>),
        )
        .route(
            "/api/v1/members/:member_id/verify",
            post(verify_handler::<M>),
        )
        .route("/api/v1/verifications", get(verifications_handler::<M>))
        .route(
            "/api/v1/me",
            get(profile_handler::<M>).put(update_profile_handler::<M>),
        )
        .with_state(service)
}

impl IntoResponse for RosterError {
    fn into_response(self) -> Response {
        json_error(self.status_code(), self)
    }
}

fn respond<T: serde::Serialize>(status: StatusCode, result: Result<T, RosterError>) -> Response {
    match result {
        Ok(body) => (status, Json(body)).into_response(),
        Err(err) => err.into_response(),
    }
}

pub(crate) async fn register_handler<M>(
    State(service): State<Arc<RosterService<M>>>,
    Json(registration): Json<Registration>,
) -> Response
where
    M: MemberRepository + 'static,
{
    let result = service.register(registration, Local::now().date_naive());
    respond(StatusCode::CREATED, result)
}

pub(crate) async fn add_handler<M>(
    State(service): State<Arc<RosterService<M>>>,
    headers: HeaderMap,
    Json(new_member): Json<NewMember>,
) -> Response
where
    M: MemberRepository + 'static,
{
    let result = RequestContext::from_request(&headers)
        .map_err(RosterError::from)
        .and_then(|context| service.add_member(&context, new_member));
    respond(StatusCode::CREATED, result)
}

pub(crate) async fn list_handler<M>(
    State(service): State<Arc<RosterService<M>>>,
    headers: HeaderMap,
    Query(filter): Query<MemberFilter>,
) -> Response
where
    M: MemberRepository + 'static,
{
    let result = RequestContext::from_request(&headers)
        .map_err(RosterError::from)
        .and_then(|context| service.list(&context, &filter));
    respond(StatusCode::OK, result)
}

pub(crate) async fn update_member_handler<M>(
    State(service): State<Arc<RosterService<M>>>,
    headers: HeaderMap,
    Path(member_id): Path<String>,
    Json(update): Json<ProfileUpdate>,
) -> Response
where
    M: MemberRepository + 'static,
{
    let id = MemberId(member_id);
    let result = RequestContext::from_request(&headers)
        .map_err(RosterError::from)
        .and_then(|context| service.update_member(&context, &id, &update));
    respond(StatusCode::OK, result)
}

pub(crate) async fn remove_handler<M>(
    State(service): State<Arc<RosterService<M>>>,
    headers: HeaderMap,
    Path(member_id): Path<String>,
) -> Response
where
    M: MemberRepository + 'static,
{
    let id = MemberId(member_id);
    let result = RequestContext::from_request(&headers)
        .map_err(RosterError::from)
        .and_then(|context| service.remove(&context, &id));
    respond(StatusCode::OK, result)
}

pub(crate) async fn toggle_status_handler<M>(
    State(service): State<Arc<RosterService<M>>>,
    headers: HeaderMap,
    Path(member_id): Path<String>,
) -> Response
where
    M: MemberRepository + 'static,
{
    let id = MemberId(member_id);
    let result = RequestContext::from_request(&headers)
        .map_err(RosterError::from)
        .and_then(|context| service.toggle_status(&context, &id));
    respond(StatusCode::OK, result)
}

pub(crate) async fn verify_handler<M>(
    State(service): State<Arc<RosterService<M>>>,
    headers: HeaderMap,
    Path(member_id): Path<String>,
) -> Response
where
    M: MemberRepository + 'static,
{
    let id = MemberId(member_id);
    let result = RequestContext::from_request(&headers)
        .map_err(RosterError::from)
        .and_then(|context| service.verify(&context, &id));
    respond(StatusCode::OK, result)
}

pub(crate) async fn verifications_handler<M>(
    State(service): State<Arc<RosterService<M>>>,
    headers: HeaderMap,
) -> Response
where
    M: MemberRepository + 'static,
{
    let result = RequestContext::from_request(&headers)
        .map_err(RosterError::from)
        .and_then(|context| service.pending_verifications(&context));
    respond(StatusCode::OK, result)
}

pub(crate) async fn profile_handler<M>(
    State(service): State<Arc<RosterService<M>>>,
    headers: HeaderMap,
) -> Response
where
    M: MemberRepository + 'static,
{
    let result = RequestContext::from_request(&headers)
        .map_err(RosterError::from)
        .and_then(|context| service.profile(&context));
    respond(StatusCode::OK, result)
}

pub(crate) async fn update_profile_handler<M>(
    State(service): State<Arc<RosterService<M>>>,
    headers: HeaderMap,
    Json(update): Json<ProfileUpdate>,
) -> Response
where
    M: MemberRepository + 'static,
{
    let result = RequestContext::from_request(&headers)
        .map_err(RosterError::from)
        .and_then(|context| service.update_profile(&context, &update));
    respond(StatusCode::OK, result)
}
