use super::domain::{Task, TaskId};
use crate::storage::RepositoryError;

/// Storage abstraction for tasks. `list` returns tasks in creation order.
pub trait TaskRepository: Send + Sync {
    fn insert(&self, task: Task) -> Result<Task, RepositoryError>;
    fn update(&self, task: Task) -> Result<(), RepositoryError>;
    fn fetch(&self, id: &TaskId) -> Result<Option<Task>, RepositoryError>;
    fn list(&self) -> Result<Vec<Task>, RepositoryError>;
    fn remove(&self, id: &TaskId) -> Result<Task, RepositoryError>;
}
