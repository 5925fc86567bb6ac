use std::sync::Arc;

use axum::extract::State;
use axum::http::{Method, StatusCode};
use serde_json::json;
use tower::ServiceExt;

use super::common::*;
use crate::workflows::roster::RosterService;

#[tokio::test]
async fn register_route_creates_volunteer_without_actor() {
    let response = router()
        .oneshot(request(
            Method::POST,
            "/api/v1/register",
            None,
            Some(json!({
                "username": "meera",
                "name": "Meera Iyer",
                "email": "meera@example.com",
                "phone": "9876500000",
                "domains": ["Technology"]
            })),
        ))
        .await
        .expect("route executes");

    assert_eq!(response.status(), StatusCode::CREATED);
    let payload = read_json_body(response).await;
    assert_eq!(payload["role"], json!("volunteer"));
    assert_eq!(payload["domains"], json!(["technology"]));
}

#[tokio::test]
async fn member_list_requires_actor_header() {
    let response = router()
        .oneshot(request(Method::GET, "/api/v1/members", None, None))
        .await
        .expect("route executes");

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    let payload = read_json_body(response).await;
    assert!(payload["error"]
        .as_str()
        .unwrap_or_default()
        .contains("x-actor-id"));
}

#[tokio::test]
async fn member_list_filters_by_query() {
    let response = router()
        .oneshot(request(
            Method::GET,
            "/api/v1/members?domain=creative",
            Some("admin001"),
            None,
        ))
        .await
        .expect("route executes");

    assert_eq!(response.status(), StatusCode::OK);
    let payload = read_json_body(response).await;
    let ids: Vec<&str> = payload
        .as_array()
        .expect("array payload")
        .iter()
        .filter_map(|member| member["id"].as_str())
        .collect();
    assert_eq!(ids, vec!["vol002"]);
}

#[tokio::test]
async fn volunteers_are_forbidden_from_verification_queue() {
    let response = router()
        .oneshot(request(
            Method::GET,
            "/api/v1/verifications",
            Some("vol001"),
            None,
        ))
        .await
        .expect("route executes");

    assert_eq!(response.status(), StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn self_removal_is_a_bad_request() {
    let response = router()
        .oneshot(request(
            Method::DELETE,
            "/api/v1/members/admin001",
            Some("admin001"),
            None,
        ))
        .await
        .expect("route executes");

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn status_toggle_on_missing_member_is_not_found() {
    let response = router()
        .oneshot(request(
            Method::POST,
            "/api/v1/members/vol999/status",
            Some("admin001"),
            None,
        ))
        .await
        .expect("route executes");

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn profile_handler_reports_storage_failures() {
    let service = Arc::new(RosterService::new(Arc::new(UnavailableMembers)));
    let mut headers = axum::http::HeaderMap::new();
    headers.insert(
        crate::access::ACTOR_HEADER,
        axum::http::HeaderValue::from_static("vol001"),
    );

    let response =
        crate::workflows::roster::router::profile_handler::<UnavailableMembers>(
            State(service),
            headers,
        )
        .await;

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
}
