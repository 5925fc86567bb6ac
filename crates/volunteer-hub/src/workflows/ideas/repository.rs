use super::domain::{Idea, IdeaId};
use crate::storage::RepositoryError;

/// Storage abstraction for submitted ideas. `list` returns them in submission order.
pub trait IdeaRepository: Send + Sync {
    fn insert(&self, idea: Idea) -> Result<Idea, RepositoryError>;
    fn update(&self, idea: Idea) -> Result<(), RepositoryError>;
    fn fetch(&self, id: &IdeaId) -> Result<Option<Idea>, RepositoryError>;
    fn list(&self) -> Result<Vec<Idea>, RepositoryError>;
}
