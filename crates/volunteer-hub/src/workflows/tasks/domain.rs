use std::cmp::Ordering;
use std::fmt;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::workflows::matching::MatchOutcome;
use crate::workflows::normalizer::normalize_key;
use crate::workflows::roster::domain::MemberId;

/// Identifier wrapper for tasks.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct TaskId(pub String);

impl fmt::Display for TaskId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TaskStatus {
    Unassigned,
    Pending,
    InProgress,
    Completed,
}

impl TaskStatus {
    pub const fn label(self) -> &'static str {
        match self {
            TaskStatus::Unassigned => "unassigned",
            TaskStatus::Pending => "pending",
            TaskStatus::InProgress => "in_progress",
            TaskStatus::Completed => "completed",
        }
    }

    /// Accepts both `in progress` (roster exports) and `in_progress`.
    pub fn parse(value: &str) -> Option<Self> {
        match normalize_key(value).replace(' ', "_").as_str() {
            "unassigned" => Some(TaskStatus::Unassigned),
            "pending" => Some(TaskStatus::Pending),
            "in_progress" => Some(TaskStatus::InProgress),
            "completed" => Some(TaskStatus::Completed),
            _ => None,
        }
    }

    /// Anything not yet completed counts toward a volunteer's workload.
    pub const fn is_open(self) -> bool {
        !matches!(self, TaskStatus::Completed)
    }

    /// Admin status cycle. Completed tasks reopen as pending.
    pub const fn admin_next(self) -> Self {
        match self {
            TaskStatus::Unassigned => TaskStatus::Pending,
            TaskStatus::Pending => TaskStatus::InProgress,
            TaskStatus::InProgress => TaskStatus::Completed,
            TaskStatus::Completed => TaskStatus::Pending,
        }
    }

    pub const fn volunteer_next(self) -> Option<Self> {
        match self {
            TaskStatus::Pending => Some(TaskStatus::InProgress),
            TaskStatus::InProgress => Some(TaskStatus::Completed),
            TaskStatus::Unassigned | TaskStatus::Completed => None,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TaskPriority {
    Low,
    #[default]
    Medium,
    High,
}

impl TaskPriority {
    pub const fn label(self) -> &'static str {
        match self {
            TaskPriority::Low => "low",
            TaskPriority::Medium => "medium",
            TaskPriority::High => "high",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match normalize_key(value).as_str() {
            "low" => Some(TaskPriority::Low),
            "medium" => Some(TaskPriority::Medium),
            "high" => Some(TaskPriority::High),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    pub id: TaskId,
    pub title: String,
    pub description: String,
    pub domain: String,
    pub priority: TaskPriority,
    pub assigned_to: Option<MemberId>,
    pub status: TaskStatus,
    pub due_date: NaiveDate,
    pub created_by: MemberId,
    pub created_date: NaiveDate,
}

impl Task {
    pub fn is_assigned_to(&self, member: &MemberId) -> bool {
        self.assigned_to.as_ref() == Some(member)
    }

    pub fn due_state(&self, today: NaiveDate) -> DueState {
        DueState::between(self.due_date, today)
    }
}

/// How far a task's due date sits from today.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum DueState {
    Overdue { days: i64 },
    DueToday,
    DueIn { days: i64 },
}

impl DueState {
    pub fn between(due_date: NaiveDate, today: NaiveDate) -> Self {
        let remaining = (due_date - today).num_days();
        match remaining.cmp(&0) {
            Ordering::Less => DueState::Overdue { days: -remaining },
            Ordering::Equal => DueState::DueToday,
            Ordering::Greater => DueState::DueIn { days: remaining },
        }
    }
}

/// Assignment strategy chosen when a task is created.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "method", rename_all = "snake_case")]
pub enum AssignmentMethod {
    #[default]
    SmartMatch,
    Manual {
        volunteer_id: MemberId,
    },
    Unassigned,
}

/// Admin task creation payload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskDraft {
    pub title: String,
    pub description: String,
    pub domain: String,
    #[serde(default)]
    pub priority: TaskPriority,
    /// Defaults to a week from the creation day.
    #[serde(default)]
    pub due_date: Option<NaiveDate>,
    #[serde(default)]
    pub assignment: AssignmentMethod,
}

impl TaskDraft {
    pub(crate) fn missing_field(&self) -> Option<&'static str> {
        [("title", &self.title), ("description", &self.description)]
            .into_iter()
            .find(|(_, value)| value.trim().is_empty())
            .map(|(field, _)| field)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskFilter {
    #[serde(default)]
    pub status: Option<TaskStatus>,
    #[serde(default)]
    pub domain: Option<String>,
    #[serde(default)]
    pub priority: Option<TaskPriority>,
}

impl TaskFilter {
    pub fn matches(&self, task: &Task) -> bool {
        match self.status {
            Some(TaskStatus::Unassigned) if task.assigned_to.is_some() => return false,
            Some(TaskStatus::Unassigned) | None => {}
            Some(status) if task.status != status => return false,
            Some(_) => {}
        }

        if let Some(domain) = self.domain.as_deref().map(normalize_key) {
            if !domain.is_empty() && task.domain != domain {
                return false;
            }
        }

        self.priority.map_or(true, |priority| task.priority == priority)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MyTasksQuery {
    #[serde(default)]
    pub status: Option<TaskStatus>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Reassignment {
    #[serde(default)]
    pub volunteer_id: Option<MemberId>,
}

/// A task as shown to its assignee.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskDueView {
    #[serde(flatten)]
    pub task: Task,
    pub due: DueState,
}

/// Result of creating a task; `match_outcome` is present when smart matching ran.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskCreation {
    pub task: Task,
    pub match_outcome: Option<MatchOutcome>,
}

/// Sort by due date, earliest first, then by priority from high to low.
pub fn sort_by_due(tasks: &mut [Task]) {
    tasks.sort_by(|left, right| {
        left.due_date
            .cmp(&right.due_date)
            .then_with(|| right.priority.cmp(&left.priority))
    });
}
