use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::workflows::normalizer::normalize_key;
use crate::workflows::roster::domain::{MemberId, MemberStatus};
use crate::workflows::tasks::domain::TaskPriority;

/// Read-only snapshot of a volunteer as seen by the matcher.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VolunteerProfile {
    pub id: MemberId,
    pub domains: BTreeSet<String>,
    pub skills: BTreeSet<String>,
    pub availability: BTreeSet<String>,
    pub status: MemberStatus,
    pub verified: bool,
}

/// Task parameters fed to the matcher.
///
/// `priority` is carried for callers and reported back in the outcome, but it does not
/// influence scoring. Product intent for priority-aware matching has not been settled.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchRequest {
    pub domain: String,
    pub priority: TaskPriority,
}

impl MatchRequest {
    pub fn new(domain: &str, priority: TaskPriority) -> Self {
        Self {
            domain: normalize_key(domain),
            priority,
        }
    }
}
