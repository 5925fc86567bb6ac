use serde::{Deserialize, Serialize};

use super::relevance::RelevanceTable;

/// Scoring weights for the volunteer matcher.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchWeights {
    pub domain_match: i32,
    pub relevant_skill: i32,
    pub availability: i32,
    pub workload_per_open_task: i32,
    pub workload_cap: u32,
    pub inactive_score: i32,
    pub verified: i32,
    /// Candidates must score strictly above this to be recommended.
    pub minimum_score: i32,
}

impl MatchWeights {
    pub fn workload_penalty(&self, open_tasks: u32) -> i32 {
        let counted = open_tasks.min(self.workload_cap);
        i32::try_from(counted)
            .unwrap_or(i32::MAX)
            .saturating_mul(self.workload_per_open_task)
    }
}

impl Default for MatchWeights {
    fn default() -> Self {
        Self {
            domain_match: 10,
            relevant_skill: 2,
            availability: 3,
            workload_per_open_task: 1,
            workload_cap: 4,
            inactive_score: -100,
            verified: 2,
            minimum_score: 0,
        }
    }
}

/// Matcher configuration: weights plus the domain relevance table.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct MatchConfig {
    pub weights: MatchWeights,
    pub relevance: RelevanceTable,
}
