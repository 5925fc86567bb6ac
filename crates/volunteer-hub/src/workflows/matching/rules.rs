use super::config::MatchConfig;
use super::domain::{MatchRequest, VolunteerProfile};
use super::{MatchFactor, ScoreComponent};
use crate::workflows::roster::domain::MemberStatus;

pub(crate) fn score_volunteer(
    volunteer: &VolunteerProfile,
    request: &MatchRequest,
    config: &MatchConfig,
    open_tasks: u32,
) -> (Vec<ScoreComponent>, i32) {
    let weights = &config.weights;
    let mut components = Vec::new();
    let mut total_score: i32 = 0;

    if volunteer.domains.contains(&request.domain) {
        components.push(ScoreComponent {
            factor: MatchFactor::DomainMatch,
            score: weights.domain_match,
            notes: format!("works in {}", request.domain),
        });
        total_score += weights.domain_match;
    }

    let relevant: Vec<&str> = config
        .relevance
        .relevant_skills(&request.domain)
        .map(|skills| {
            skills
                .iter()
                .filter(|skill| volunteer.skills.contains(*skill))
                .map(String::as_str)
                .collect()
        })
        .unwrap_or_default();
    if !relevant.is_empty() {
        let count = i32::try_from(relevant.len()).unwrap_or(i32::MAX);
        let score = weights.relevant_skill.saturating_mul(count);
        components.push(ScoreComponent {
            factor: MatchFactor::SkillRelevance,
            score,
            notes: format!("relevant skills: {}", relevant.join(", ")),
        });
        total_score += score;
    }

    if !volunteer.availability.is_empty() {
        components.push(ScoreComponent {
            factor: MatchFactor::Availability,
            score: weights.availability,
            notes: format!("{} availability slot(s) listed", volunteer.availability.len()),
        });
        total_score += weights.availability;
    }

    let penalty = weights.workload_penalty(open_tasks);
    if penalty > 0 {
        components.push(ScoreComponent {
            factor: MatchFactor::Workload,
            score: -penalty,
            notes: format!("{open_tasks} open task(s) already assigned"),
        });
        total_score -= penalty;
    }

    if volunteer.status != MemberStatus::Active {
        let adjustment = weights.inactive_score - total_score;
        components.push(ScoreComponent {
            factor: MatchFactor::StatusGate,
            score: adjustment,
            notes: format!("status {} disqualifies", volunteer.status.label()),
        });
        total_score = weights.inactive_score;
    }

    if volunteer.verified {
        components.push(ScoreComponent {
            factor: MatchFactor::Verification,
            score: weights.verified,
            notes: "identity verified".to_string(),
        });
        total_score += weights.verified;
    }

    (components, total_score)
}
