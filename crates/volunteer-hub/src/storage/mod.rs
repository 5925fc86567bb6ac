//! Storage seams shared by the workflow repositories.

pub mod memory;

use axum::http::StatusCode;
use std::sync::atomic::{AtomicU64, Ordering};

pub use memory::{
    InMemoryEventRepository, InMemoryIdeaRepository, InMemoryMemberRepository,
    InMemoryTaskRepository,
};

/// Error enumeration for repository failures.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RepositoryError {
    #[error("record already exists")]
    Conflict,
    #[error("record not found")]
    NotFound,
    #[error("repository unavailable: {0}")]
    Unavailable(String),
}

impl RepositoryError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            RepositoryError::Conflict => StatusCode::CONFLICT,
            RepositoryError::NotFound => StatusCode::NOT_FOUND,
            RepositoryError::Unavailable(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

/// Process-wide identifier sequence producing ids such as `task-000042`.
pub(crate) struct IdSequence {
    prefix: &'static str,
    next: AtomicU64,
}

impl IdSequence {
    pub(crate) const fn new(prefix: &'static str) -> Self {
        Self {
            prefix,
            next: AtomicU64::new(1),
        }
    }

    pub(crate) fn next_id(&self) -> String {
        let id = self.next.fetch_add(1, Ordering::Relaxed);
        format!("{}-{id:06}", self.prefix)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sequence_formats_with_prefix_and_padding() {
        let sequence = IdSequence::new("idea");
        assert_eq!(sequence.next_id(), "idea-000001");
        assert_eq!(sequence.next_id(), "idea-000002");
    }
}
