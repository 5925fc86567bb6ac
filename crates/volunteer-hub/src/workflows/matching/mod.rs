//! Volunteer matcher: ranks volunteers against a task's domain and recommends one.
//!
//! Scoring is a pure function of the volunteer snapshot, the request, the configuration
//! and the injected [`WorkloadLookup`]. Identical inputs always produce the same outcome.

mod config;
mod domain;
mod relevance;
mod rules;
mod workload;

#[cfg(test)]
mod tests;

pub use config::{MatchConfig, MatchWeights};
pub use domain::{MatchRequest, VolunteerProfile};
pub use relevance::RelevanceTable;
pub use workload::{NoWorkload, OpenTaskCounts, WorkloadLookup};

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::workflows::roster::domain::MemberId;
use crate::workflows::tasks::domain::TaskPriority;

/// Factor contributing to a volunteer's match score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchFactor {
    DomainMatch,
    SkillRelevance,
    Availability,
    Workload,
    StatusGate,
    Verification,
}

/// Discrete contribution to a candidate's score, kept for auditing recommendations.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreComponent {
    pub factor: MatchFactor,
    pub score: i32,
    pub notes: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CandidateScore {
    pub volunteer_id: MemberId,
    pub total_score: i32,
    pub components: Vec<ScoreComponent>,
}

/// Ranked candidates plus the recommended volunteer, if any scored above the floor.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchOutcome {
    pub domain: String,
    pub priority: TaskPriority,
    pub recommended: Option<MemberId>,
    pub candidates: Vec<CandidateScore>,
}

/// Stateless matcher applying a [`MatchConfig`] to volunteer snapshots.
#[derive(Debug, Clone, Default)]
pub struct MatchEngine {
    config: MatchConfig,
}

impl MatchEngine {
    pub fn new(config: MatchConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &MatchConfig {
        &self.config
    }

    pub fn score<W>(
        &self,
        volunteer: &VolunteerProfile,
        request: &MatchRequest,
        workload: &W,
    ) -> CandidateScore
    where
        W: WorkloadLookup + ?Sized,
    {
        let open_tasks = workload.open_assignments(&volunteer.id);
        let (components, total_score) =
            rules::score_volunteer(volunteer, request, &self.config, open_tasks);

        CandidateScore {
            volunteer_id: volunteer.id.clone(),
            total_score,
            components,
        }
    }

    /// Score every volunteer and order them best first. Equal scores keep input order.
    pub fn rank<W>(
        &self,
        volunteers: &[VolunteerProfile],
        request: &MatchRequest,
        workload: &W,
    ) -> Vec<CandidateScore>
    where
        W: WorkloadLookup + ?Sized,
    {
        let mut candidates: Vec<CandidateScore> = volunteers
            .iter()
            .map(|volunteer| self.score(volunteer, request, workload))
            .collect();
        candidates.sort_by(|left, right| right.total_score.cmp(&left.total_score));
        candidates
    }

    pub fn select<W>(
        &self,
        volunteers: &[VolunteerProfile],
        request: &MatchRequest,
        workload: &W,
    ) -> MatchOutcome
    where
        W: WorkloadLookup + ?Sized,
    {
        let candidates = self.rank(volunteers, request, workload);
        let recommended = candidates
            .first()
            .filter(|top| top.total_score > self.config.weights.minimum_score)
            .map(|top| top.volunteer_id.clone());

        debug!(
            domain = %request.domain,
            priority = request.priority.label(),
            candidates = candidates.len(),
            recommended = recommended.as_ref().map(MemberId::as_str).unwrap_or("none"),
            "volunteer match evaluated"
        );

        MatchOutcome {
            domain: request.domain.clone(),
            priority: request.priority,
            recommended,
            candidates,
        }
    }

    pub fn recommend<W>(
        &self,
        volunteers: &[VolunteerProfile],
        request: &MatchRequest,
        workload: &W,
    ) -> Option<MemberId>
    where
        W: WorkloadLookup + ?Sized,
    {
        self.select(volunteers, request, workload).recommended
    }
}

/// Recommend a volunteer for a task using the standard weights and relevance table.
///
/// `priority` is accepted for callers but has no effect on the result.
pub fn match_volunteer<W>(
    volunteers: &[VolunteerProfile],
    domain: &str,
    priority: TaskPriority,
    workload: &W,
) -> Option<MemberId>
where
    W: WorkloadLookup + ?Sized,
{
    MatchEngine::default().recommend(volunteers, &MatchRequest::new(domain, priority), workload)
}
