use std::sync::Arc;

use axum::Router;

pub(super) use crate::test_support::*;
use crate::storage::InMemoryMemberRepository;
use crate::workflows::roster::{roster_router, Registration, RosterService};

pub(super) fn build_service() -> (
    RosterService<InMemoryMemberRepository>,
    Arc<InMemoryMemberRepository>,
) {
    let members = member_repository();
    (RosterService::new(members.clone()), members)
}

pub(super) fn router() -> Router {
    let (service, _) = build_service();
    roster_router(Arc::new(service))
}

pub(super) fn registration(username: &str) -> Registration {
    Registration {
        username: username.to_string(),
        name: "Asha Rao".to_string(),
        email: "asha@example.com".to_string(),
        phone: "9876543219".to_string(),
        skills: vec!["Writing".to_string(), " teaching ".to_string()],
        domains: vec!["Education".to_string()],
        availability: vec!["weekends".to_string()],
        birthday: Some(date(1998, 4, 1)),
    }
}
