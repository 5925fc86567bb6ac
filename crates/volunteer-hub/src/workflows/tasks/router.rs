use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    routing::{delete, get, post, put},
    Json, Router,
};

use super::domain::{MyTasksQuery, Reassignment, TaskDraft, TaskFilter, TaskId};
use super::repository::TaskRepository;
use super::service::{TaskService, TaskServiceError};
use crate::access::RequestContext;
use crate::error::json_error;
use crate::workflows::roster::repository::MemberRepository;

/// Router builder exposing task assignment endpoints.
pub fn task_router<M, T>(service: Arc<TaskService<M, T>>) -> Router
where
    M: MemberRepository + 'static,
    T: TaskRepository + 'static,
{
    Router::new()
        .route(
            "/api/v1/tasks",
            get(list_handler::<M, T>).post(create_handler::<M, T>),
        )
        .route("/api/v1/tasks/:task_id", delete(remove_handler::<M, T>))
        .route(
            "/api/v1/tasks/:task_id/recommendations",
            get(recommendations_handler::<M, T>),
        )
        .route(
            "/api/v1/tasks/:task_id/advance",
            post(advance_handler::<M, T>),
        )
        .route(
            "/api/v1/tasks/:task_id/assignee",
            put(reassign_handler::<M, T>),
        )
        .route("/api/v1/me/tasks", get(my_tasks_handler::<M, T>))
        .with_state(service)
}

impl IntoResponse for TaskServiceError {
    fn into_response(self) -> Response {
        json_error(self.status_code(), self)
    }
}

fn respond<T: serde::Serialize>(
    status: StatusCode,
    result: Result<T, TaskServiceError>,
) -> Response {
    match result {
        Ok(body) => (status, Json(body)).into_response(),
        Err(err) => err.into_response(),
    }
}

pub(crate) async fn create_handler<M, T>(
    State(service): State<Arc<TaskService<M, T>>>,
    headers: HeaderMap,
    Json(draft): Json<TaskDraft>,
) -> Response
where
    M: MemberRepository + 'static,
    T: TaskRepository + 'static,
{
    let result = RequestContext::from_request(&headers)
        .map_err(TaskServiceError::from)
        .and_then(|context| service.create(&context, draft));
    respond(StatusCode::CREATED, result)
}

pub(crate) async fn list_handler<M, T>(
    State(service): State<Arc<TaskService<M, T>>>,
    headers: HeaderMap,
    Query(filter): Query<TaskFilter>,
) -> Response
where
    M: MemberRepository + 'static,
    T: TaskRepository + 'static,
{
    let result = RequestContext::from_request(&headers)
        .map_err(TaskServiceError::from)
        .and_then(|context| service.list(&context, &filter));
    respond(StatusCode::OK, result)
}

pub(crate) async fn recommendations_handler<M, T>(
    State(service): State<Arc<TaskService<M, T>>>,
    headers: HeaderMap,
    Path(task_id): Path<String>,
) -> Response
where
    M: MemberRepository + 'static,
    T: TaskRepository + 'static,
{
    let id = TaskId(task_id);
    let result = RequestContext::from_request(&headers)
        .map_err(TaskServiceError::from)
        .and_then(|context| service.recommendations(&context, &id));
    respond(StatusCode::OK, result)
}

pub(crate) async fn advance_handler<M, T>(
    State(service): State<Arc<TaskService<M, T>>>,
    headers: HeaderMap,
    Path(task_id): Path<String>,
) -> Response
where
    M: MemberRepository + 'static,
    T: TaskRepository + 'static,
{
    let id = TaskId(task_id);
    let result = RequestContext::from_request(&headers)
        .map_err(TaskServiceError::from)
        .and_then(|context| service.advance(&context, &id));
    respond(StatusCode::OK, result)
}

pub(crate) async fn reassign_handler<M, T>(
    State(service): State<Arc<TaskService<M, T>>>,
    headers: HeaderMap,
    Path(task_id): Path<String>,
    Json(reassignment): Json<Reassignment>,
) -> Response
where
    M: MemberRepository + 'static,
    T: TaskRepository + 'static,
{
    let id = TaskId(task_id);
    let result = RequestContext::from_request(&headers)
        .map_err(TaskServiceError::from)
        .and_then(|context| {
            service.reassign(&context, &id, reassignment.volunteer_id.as_ref())
        });
    respond(StatusCode::OK, result)
}

pub(crate) async fn remove_handler<M, T>(
    State(service): State<Arc<TaskService<M, T>>>,
    headers: HeaderMap,
    Path(task_id): Path<String>,
) -> Response
where
    M: MemberRepository + 'static,
    T: TaskRepository + 'static,
{
    let id = TaskId(task_id);
    let result = RequestContext::from_request(&headers)
        .map_err(TaskServiceError::from)
        .and_then(|context| service.remove(&context, &id));
    respond(StatusCode::OK, result)
}

pub(crate) async fn my_tasks_handler<M, T>(
    State(service): State<Arc<TaskService<M, T>>>,
    headers: HeaderMap,
    Query(query): Query<MyTasksQuery>,
) -> Response
where
    M: MemberRepository + 'static,
    T: TaskRepository + 'static,
{
    let result = RequestContext::from_request(&headers)
        .map_err(TaskServiceError::from)
        .and_then(|context| service.my_tasks(&context, query.status));
    respond(StatusCode::OK, result)
}
