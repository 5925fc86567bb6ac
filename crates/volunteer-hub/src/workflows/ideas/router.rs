use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};

use super::domain::{IdeaDraft, IdeaId, IdeaReview};
use super::repository::IdeaRepository;
use super::service::{IdeaService, IdeaServiceError};
use crate::access::RequestContext;
use crate::error::json_error;
use crate::workflows::roster::repository::MemberRepository;

pub fn idea_router<M, I>(service: Arc<IdeaService<M, I>>) -> Router
where
    M: MemberRepository + 'static,
    I: IdeaRepository + 'static,
{
    Router::new()
        .route(
            "/api/v1/ideas",
            get(list_handler::<M, I>).post(submit_handler::<M, I>),
        )
        .route(
            "/api/v1/ideas/:idea_id/review",
            post(review_handler::<M, I>),
        )
        .route(
            "/api/v1/ideas/:idea_id/upvote",
            post(upvote_handler::<M, I>),
        )
        .route("/api/v1/me/ideas", get(mine_handler::<M, I>))
        .with_state(service)
}

impl IntoResponse for IdeaServiceError {
    fn into_response(self) -> Response {
        json_error(self.status_code(), self)
    }
}

fn respond<T: serde::Serialize>(
    status: StatusCode,
    result: Result<T, IdeaServiceError>,
) -> Response {
    match result {
        Ok(body) => (status, Json(body)).into_response(),
        Err(err) => err.into_response(),
    }
}

pub(crate) async fn submit_handler<M, I>(
    State(service): State<Arc<IdeaService<M, I>>>,
    headers: HeaderMap,
    Json(draft): Json<IdeaDraft>,
) -> Response
where
    M: MemberRepository + 'static,
    I: IdeaRepository + 'static,
{
    let result = RequestContext::from_request(&headers)
        .map_err(IdeaServiceError::from)
        .and_then(|context| service.submit(&context, draft));
    respond(StatusCode::CREATED, result)
}

pub(crate) async fn list_handler<M, I>(
    State(service): State<Arc<IdeaService<M, I>>>,
    headers: HeaderMap,
) -> Response
where
    M: MemberRepository + 'static,
    I: IdeaRepository + 'static,
{
    let result = RequestContext::from_request(&headers)
        .map_err(IdeaServiceError::from)
        .and_then(|context| service.list(&context));
    respond(StatusCode::OK, result)
}

pub(crate) async fn mine_handler<M, I>(
    State(service): State<Arc<IdeaService<M, I>>>,
    headers: HeaderMap,
) -> Response
where
    M: MemberRepository + 'static,
    I: IdeaRepository + 'static,
{
    let result = RequestContext::from_request(&headers)
        .map_err(IdeaServiceError::from)
        .and_then(|context| service.mine(&context));
    respond(StatusCode::OK, result)
}

pub(crate) async fn review_handler<M, I>(
    State(service): State<Arc<IdeaService<M, I>>>,
    headers: HeaderMap,
    Path(idea_id): Path<String>,
    Json(review): Json<IdeaReview>,
) -> Response
where
    M: MemberRepository + 'static,
    I: IdeaRepository + 'static,
{
    let id = IdeaId(idea_id);
    let result = RequestContext::from_request(&headers)
        .map_err(IdeaServiceError::from)
        .and_then(|context| service.review(&context, &id, review));
    respond(StatusCode::OK, result)
}

pub(crate) async fn upvote_handler<M, I>(
    State(service): State<Arc<IdeaService<M, I>>>,
    headers: HeaderMap,
    Path(idea_id): Path<String>,
) -> Response
where
    M: MemberRepository + 'static,
    I: IdeaRepository + 'static,
{
    let id = IdeaId(idea_id);
    let result = RequestContext::from_request(&headers)
        .map_err(IdeaServiceError::from)
        .and_then(|context| service.upvote(&context, &id));
    respond(StatusCode::OK, result)
}
