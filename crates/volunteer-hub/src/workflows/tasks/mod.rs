//! Task intake, smart-match assignment, and the per-role status workflows.

pub mod domain;
pub mod repository;
pub mod router;
pub mod service;

#[cfg(test)]
mod tests;

pub use domain::{
    sort_by_due, AssignmentMethod, DueState, MyTasksQuery, Reassignment, Task, TaskCreation,
    TaskDraft, TaskDueView, TaskFilter, TaskId, TaskPriority, TaskStatus,
};
pub use repository::TaskRepository;
pub use router::task_router;
pub use service::{TaskService, TaskServiceError};
