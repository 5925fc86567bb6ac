//! Fixtures shared by the workflow test modules.

use std::sync::Arc;

use axum::body::{to_bytes, Body};
use axum::http::{header, Method, Request};
use axum::response::Response;
use chrono::NaiveDate;
use serde_json::Value;

use crate::access::{RequestContext, ACTOR_HEADER};
use crate::storage::{InMemoryMemberRepository, RepositoryError};
use crate::workflows::roster::domain::{Member, MemberId, MemberStatus, Role};
use crate::workflows::roster::repository::MemberRepository;

pub(crate) fn date(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).expect("valid date")
}

pub(crate) fn today() -> NaiveDate {
    date(2025, 4, 1)
}

pub(crate) fn context(actor: &str) -> RequestContext {
    RequestContext::new(actor, today())
}

pub(crate) fn id(value: &str) -> MemberId {
    MemberId(value.to_string())
}

fn tags(values: &[&str]) -> Vec<String> {
    values.iter().map(|value| value.to_string()).collect()
}

pub(crate) fn admin(member_id: &str) -> Member {
    Member {
        id: id(member_id),
        username: member_id.to_string(),
        name: "Admin User".to_string(),
        email: format!("{member_id}@ngo.org"),
        phone: "9876543210".to_string(),
        role: Role::Admin,
        skills: tags(&["management"]),
        domains: tags(&["management"]),
        availability: tags(&["weekdays"]),
        verified: true,
        status: MemberStatus::Active,
        join_date: date(2023, 1, 1),
        birthday: Some(date(1990, 5, 15)),
    }
}

pub(crate) fn volunteer(
    member_id: &str,
    name: &str,
    domains: &[&str],
    skills: &[&str],
    verified: bool,
) -> Member {
    Member {
        id: id(member_id),
        username: name.to_lowercase().replace(' ', "_"),
        name: name.to_string(),
        email: format!("{}@example.com", name.to_lowercase().replace(' ', ".")),
        phone: "9876543211".to_string(),
        role: Role::Volunteer,
        skills: tags(skills),
        domains: tags(domains),
        availability: tags(&["weekends"]),
        verified,
        status: MemberStatus::Active,
        join_date: date(2023, 2, 15),
        birthday: None,
    }
}

/// `admin001` plus two volunteers: `vol001` (education and technology, teaches and codes,
/// unverified) and `vol002` (creative and social media, designs, verified).
pub(crate) fn sample_members() -> Vec<Member> {
    vec![
        admin("admin001"),
        volunteer(
            "vol001",
            "John Doe",
            &["education", "technology"],
            &["teaching", "coding"],
            false,
        ),
        volunteer(
            "vol002",
            "Jane Smith",
            &["creative", "social media"],
            &["design", "social media"],
            true,
        ),
    ]
}

pub(crate) fn member_repository() -> Arc<InMemoryMemberRepository> {
    Arc::new(InMemoryMemberRepository::with_members(sample_members()))
}

pub(crate) fn request(
    method: Method,
    uri: &str,
    actor: Option<&str>,
    body: Option<Value>,
) -> Request<Body> {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(actor) = actor {
        builder = builder.header(ACTOR_HEADER, actor);
    }
    let body = match body {
        Some(value) => {
            builder = builder.header(header::CONTENT_TYPE, "application/json");
            Body::from(serde_json::to_vec(&value).expect("serialize body"))
        }
        None => Body::empty(),
    };
    builder.body(body).expect("request builds")
}

pub(crate) async fn read_json_body(response: Response) -> Value {
    let bytes = to_bytes(response.into_body(), 64 * 1024)
        .await
        .expect("body readable");
    serde_json::from_slice(&bytes).expect("valid json")
}

/// Member store whose every call fails as if the backing storage were down.
pub(crate) struct UnavailableMembers;

impl MemberRepository for UnavailableMembers {
    fn insert(&self, _member: Member) -> Result<Member, RepositoryError> {
        Err(RepositoryError::Unavailable("offline".to_string()))
    }

    fn update(&self, _member: Member) -> Result<(), RepositoryError> {
        Err(RepositoryError::Unavailable("offline".to_string()))
    }

    fn fetch(&self, _id: &MemberId) -> Result<Option<Member>, RepositoryError> {
        Err(RepositoryError::Unavailable("offline".to_string()))
    }

    fn find_by_username(&self, _username: &str) -> Result<Option<Member>, RepositoryError> {
        Err(RepositoryError::Unavailable("offline".to_string()))
    }

    fn list(&self) -> Result<Vec<Member>, RepositoryError> {
        Err(RepositoryError::Unavailable("offline".to_string()))
    }

    fn remove(&self, _id: &MemberId) -> Result<Member, RepositoryError> {
        Err(RepositoryError::Unavailable("offline".to_string()))
    }
}
