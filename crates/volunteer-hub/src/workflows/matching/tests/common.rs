use std::collections::BTreeSet;

use crate::workflows::matching::{MatchEngine, MatchRequest, VolunteerProfile};
use crate::workflows::roster::domain::{MemberId, MemberStatus};
use crate::workflows::tasks::domain::TaskPriority;

fn set(values: &[&str]) -> BTreeSet<String> {
    values.iter().map(|value| value.to_string()).collect()
}

pub(super) fn volunteer(id: &str) -> VolunteerProfile {
    VolunteerProfile {
        id: MemberId(id.to_string()),
        domains: BTreeSet::new(),
        skills: BTreeSet::new(),
        availability: BTreeSet::new(),
        status: MemberStatus::Active,
        verified: false,
    }
}

/// Active, verified technology volunteer who codes on weekdays.
pub(super) fn technologist(id: &str) -> VolunteerProfile {
    VolunteerProfile {
        domains: set(&["technology"]),
        skills: set(&["coding"]),
        availability: set(&["weekdays"]),
        verified: true,
        ..volunteer(id)
    }
}

pub(super) fn with_skills(mut profile: VolunteerProfile, skills: &[&str]) -> VolunteerProfile {
    profile.skills = set(skills);
    profile
}

pub(super) fn with_availability(
    mut profile: VolunteerProfile,
    availability: &[&str],
) -> VolunteerProfile {
    profile.availability = set(availability);
    profile
}

pub(super) fn request(domain: &str) -> MatchRequest {
    MatchRequest::new(domain, TaskPriority::Medium)
}

pub(super) fn engine() -> MatchEngine {
    MatchEngine::default()
}

pub(super) fn id(value: &str) -> MemberId {
    MemberId(value.to_string())
}
