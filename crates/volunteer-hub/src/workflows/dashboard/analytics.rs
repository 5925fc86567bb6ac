use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::snapshot::Snapshot;
use crate::workflows::events::domain::AttendanceStatus;

const TOP_DOMAIN_LIMIT: usize = 5;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DomainCount {
    pub domain: String,
    pub volunteers: usize,
}

/// Admin analytics over the whole organization.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Analytics {
    pub members_by_status: BTreeMap<String, usize>,
    pub total_volunteers: usize,
    pub active_volunteers: usize,
    pub tasks_by_status: BTreeMap<String, usize>,
    pub tasks_by_domain: BTreeMap<String, usize>,
    pub top_volunteer_domains: Vec<DomainCount>,
    pub ideas_by_status: BTreeMap<String, usize>,
    pub confirmed_attendance: usize,
}

fn tally<'a, I>(labels: I) -> BTreeMap<String, usize>
where
    I: IntoIterator<Item = &'a str>,
{
    let mut counts = BTreeMap::new();
    for label in labels {
        *counts.entry(label.to_string()).or_insert(0) += 1;
    }
    counts
}

impl Analytics {
    pub fn build(snapshot: &Snapshot) -> Self {
        let volunteers: Vec<_> = snapshot
            .members
            .iter()
            .filter(|member| member.is_volunteer())
            .collect();

        let domain_counts = tally(
            volunteers
                .iter()
                .flat_map(|member| member.domains.iter().map(String::as_str)),
        );
        let mut top_volunteer_domains: Vec<DomainCount> = domain_counts
            .into_iter()
            .map(|(domain, volunteers)| DomainCount { domain, volunteers })
            .collect();
        // BTreeMap order makes the alphabetical tie-break implicit.
        top_volunteer_domains.sort_by(|left, right| right.volunteers.cmp(&left.volunteers));
        top_volunteer_domains.truncate(TOP_DOMAIN_LIMIT);

        Self {
            members_by_status: tally(snapshot.members.iter().map(|member| member.status.label())),
            total_volunteers: volunteers.len(),
            active_volunteers: volunteers.iter().filter(|member| member.is_active()).count(),
            tasks_by_status: tally(snapshot.tasks.iter().map(|task| task.status.label())),
            tasks_by_domain: tally(snapshot.tasks.iter().map(|task| task.domain.as_str())),
            top_volunteer_domains,
            ideas_by_status: tally(snapshot.ideas.iter().map(|idea| idea.status.label())),
            confirmed_attendance: snapshot
                .attendance
                .iter()
                .filter(|record| record.status == AttendanceStatus::Confirmed)
                .count(),
        }
    }
}
