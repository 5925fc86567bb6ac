use std::sync::Arc;

use chrono::NaiveDate;

pub(super) use crate::test_support::*;
use crate::storage::{InMemoryMemberRepository, InMemoryTaskRepository};
use crate::workflows::matching::MatchEngine;
use crate::workflows::roster::domain::Member;
use crate::workflows::tasks::{
    AssignmentMethod, Task, TaskDraft, TaskId, TaskPriority, TaskService, TaskStatus,
};

pub(super) type Service = TaskService<InMemoryMemberRepository, InMemoryTaskRepository>;

pub(super) fn build_service_with(
    members: Vec<Member>,
    tasks: Vec<Task>,
) -> (Service, Arc<InMemoryTaskRepository>) {
    let members = Arc::new(InMemoryMemberRepository::with_members(members));
    let tasks = Arc::new(InMemoryTaskRepository::with_tasks(tasks));
    (
        TaskService::new(members, tasks.clone(), MatchEngine::default()),
        tasks,
    )
}

pub(super) fn build_service() -> (Service, Arc<InMemoryTaskRepository>) {
    build_service_with(sample_members(), Vec::new())
}

pub(super) fn task(
    task_id: &str,
    assigned_to: Option<&str>,
    status: TaskStatus,
    due_date: NaiveDate,
    priority: TaskPriority,
) -> Task {
    Task {
        id: TaskId(task_id.to_string()),
        title: format!("Task {task_id}"),
        description: "Seeded task".to_string(),
        domain: "technology".to_string(),
        priority,
        assigned_to: assigned_to.map(id),
        status,
        due_date,
        created_by: id("admin001"),
        created_date: date(2025, 3, 20),
    }
}

pub(super) fn draft(domain: &str, assignment: AssignmentMethod) -> TaskDraft {
    TaskDraft {
        title: "Website Update".to_string(),
        description: "Update the website with recent activities".to_string(),
        domain: domain.to_string(),
        priority: TaskPriority::Medium,
        due_date: None,
        assignment,
    }
}
