use std::fmt;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::workflows::normalizer::normalize_key;
use crate::workflows::roster::domain::MemberId;

#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct IdeaId(pub String);

impl fmt::Display for IdeaId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IdeaStatus {
    UnderReview,
    Approved,
    Rejected,
    Implemented,
}

impl IdeaStatus {
    pub const fn label(self) -> &'static str {
        match self {
            IdeaStatus::UnderReview => "under_review",
            IdeaStatus::Approved => "approved",
            IdeaStatus::Rejected => "rejected",
            IdeaStatus::Implemented => "implemented",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match normalize_key(value).replace(' ', "_").as_str() {
            "under_review" => Some(IdeaStatus::UnderReview),
            "approved" => Some(IdeaStatus::Approved),
            "rejected" => Some(IdeaStatus::Rejected),
            "implemented" => Some(IdeaStatus::Implemented),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Idea {
    pub id: IdeaId,
    pub title: String,
    pub description: String,
    pub submitted_by: MemberId,
    pub status: IdeaStatus,
    pub submission_date: NaiveDate,
    pub comments: Option<String>,
    pub upvotes: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IdeaDraft {
    pub title: String,
    pub description: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IdeaReview {
    pub status: IdeaStatus,
    #[serde(default)]
    pub comment: Option<String>,
}

/// Newest first. Ideas from the same day keep reverse submission order.
pub fn sort_newest_first(ideas: &mut [Idea]) {
    ideas.reverse();
    ideas.sort_by(|left, right| right.submission_date.cmp(&left.submission_date));
}
