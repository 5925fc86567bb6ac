use std::sync::Arc;

use axum::http::StatusCode;
use chrono::Duration;
use tracing::info;

use super::domain::{
    sort_by_due, AssignmentMethod, Task, TaskCreation, TaskDraft, TaskDueView, TaskFilter,
    TaskId, TaskStatus,
};
use super::repository::TaskRepository;
use crate::access::{resolve_actor, AccessError, Actor, RequestContext};
use crate::storage::{IdSequence, RepositoryError};
use crate::workflows::matching::{
    MatchEngine, MatchOutcome, MatchRequest, OpenTaskCounts, VolunteerProfile,
};
use crate::workflows::normalizer::normalize_key;
use crate::workflows::roster::domain::MemberId;
use crate::workflows::roster::repository::MemberRepository;

static TASK_SEQUENCE: IdSequence = IdSequence::new("task");

const DEFAULT_DUE_IN_DAYS: i64 = 7;

/// Service coordinating task creation, assignment, and status transitions.
pub struct TaskService<M, T> {
    members: Arc<M>,
    tasks: Arc<T>,
    engine: MatchEngine,
}

impl<M, T> TaskService<M, T>
where
    M: MemberRepository + 'static,
    T: TaskRepository + 'static,
{
    pub fn new(members: Arc<M>, tasks: Arc<T>, engine: MatchEngine) -> Self {
        Self {
            members,
            tasks,
            engine,
        }
    }

    fn actor(&self, context: &RequestContext) -> Result<Actor, TaskServiceError> {
        resolve_actor(self.members.as_ref(), context)
    }

    fn existing(&self, id: &TaskId) -> Result<Task, TaskServiceError> {
        Ok(self.tasks.fetch(id)?.ok_or(RepositoryError::NotFound)?)
    }

    fn volunteer(&self, id: &MemberId) -> Result<MemberId, TaskServiceError> {
        match self.members.fetch(id)? {
            Some(member) if member.is_volunteer() => Ok(member.id),
            _ => Err(TaskServiceError::UnknownVolunteer(id.clone())),
        }
    }

    /// Run the matcher over the volunteer roster, weighting by current open assignments.
    fn match_for(&self, request: &MatchRequest) -> Result<MatchOutcome, TaskServiceError> {
        let volunteers: Vec<VolunteerProfile> = self
            .members
            .list()?
            .iter()
            .filter(|member| member.is_volunteer())
            .map(|member| member.volunteer_profile())
            .collect();
        let tasks = self.tasks.list()?;
        let workload = OpenTaskCounts::from_tasks(&tasks);
        Ok(self.engine.select(&volunteers, request, &workload))
    }

    pub fn create(
        &self,
        context: &RequestContext,
        draft: TaskDraft,
    ) -> Result<TaskCreation, TaskServiceError> {
        let actor = self.actor(context)?;
        actor.require_admin("creating tasks")?;
        if let Some(field) = draft.missing_field() {
            return Err(TaskServiceError::MissingField(field));
        }

        let domain = normalize_key(&draft.domain);
        let (assigned_to, match_outcome) = match &draft.assignment {
            AssignmentMethod::SmartMatch => {
                let outcome = self.match_for(&MatchRequest::new(&domain, draft.priority))?;
                (outcome.recommended.clone(), Some(outcome))
            }
            AssignmentMethod::Manual { volunteer_id } => {
                (Some(self.volunteer(volunteer_id)?), None)
            }
            AssignmentMethod::Unassigned => (None, None),
        };

        let status = if assigned_to.is_some() {
            TaskStatus::Pending
        } else {
            TaskStatus::Unassigned
        };
        let task = Task {
            id: TaskId(TASK_SEQUENCE.next_id()),
            title: draft.title.trim().to_string(),
            description: draft.description.trim().to_string(),
            domain,
            priority: draft.priority,
            assigned_to,
            status,
            due_date: draft
                .due_date
                .unwrap_or(context.today + Duration::days(DEFAULT_DUE_IN_DAYS)),
            created_by: actor.id,
            created_date: context.today,
        };

        let stored = self.tasks.insert(task)?;
        info!(
            task = %stored.id,
            domain = %stored.domain,
            status = stored.status.label(),
            assignee = stored.assigned_to.as_ref().map(MemberId::as_str).unwrap_or("none"),
            "task created"
        );

        Ok(TaskCreation {
            task: stored,
            match_outcome,
        })
    }

    /// Ranked candidates for an existing task. Nothing is persisted.
    pub fn recommendations(
        &self,
        context: &RequestContext,
        id: &TaskId,
    ) -> Result<MatchOutcome, TaskServiceError> {
        self.actor(context)?.require_admin("reviewing recommendations")?;
        let task = self.existing(id)?;
        self.match_for(&MatchRequest::new(&task.domain, task.priority))
    }

    pub fn list(
        &self,
        context: &RequestContext,
        filter: &TaskFilter,
    ) -> Result<Vec<Task>, TaskServiceError> {
        self.actor(context)?.require_admin("listing tasks")?;
        let mut tasks: Vec<Task> = self
            .tasks
            .list()?
            .into_iter()
            .filter(|task| filter.matches(task))
            .collect();
        sort_by_due(&mut tasks);
        Ok(tasks)
    }

    pub fn my_tasks(
        &self,
        context: &RequestContext,
        status: Option<TaskStatus>,
    ) -> Result<Vec<TaskDueView>, TaskServiceError> {
        let actor = self.actor(context)?;
        let mut tasks: Vec<Task> = self
            .tasks
            .list()?
            .into_iter()
            .filter(|task| task.is_assigned_to(&actor.id))
            .filter(|task| status.map_or(true, |status| task.status == status))
            .collect();
        sort_by_due(&mut tasks);

        Ok(tasks
            .into_iter()
            .map(|task| TaskDueView {
                due: task.due_state(actor.today),
                task,
            })
            .collect())
    }

    pub fn advance(&self, context: &RequestContext, id: &TaskId) -> Result<Task, TaskServiceError> {
        let actor = self.actor(context)?;
        let mut task = self.existing(id)?;

        let next = if actor.is_admin() {
            task.status.admin_next()
        } else if task.is_assigned_to(&actor.id) {
            task.status
                .volunteer_next()
                .ok_or(TaskServiceError::InvalidTransition { from: task.status })?
        } else {
            return Err(AccessError::Forbidden {
                action: "updating another member's task",
            }
            .into());
        };

        let previous = task.status;
        task.status = next;
        self.tasks.update(task.clone())?;
        info!(
            task = %task.id,
            from = previous.label(),
            to = next.label(),
            actor = %actor.id,
            "task status advanced"
        );
        Ok(task)
    }

    pub fn reassign(
        &self,
        context: &RequestContext,
        id: &TaskId,
        volunteer: Option<&MemberId>,
    ) -> Result<Task, TaskServiceError> {
        self.actor(context)?.require_admin("reassigning tasks")?;
        let mut task = self.existing(id)?;

        match volunteer {
            Some(volunteer) => {
                task.assigned_to = Some(self.volunteer(volunteer)?);
                if task.status == TaskStatus::Unassigned {
                    task.status = TaskStatus::Pending;
                }
            }
            None => {
                task.assigned_to = None;
                task.status = TaskStatus::Unassigned;
            }
        }

        self.tasks.update(task.clone())?;
        info!(
            task = %task.id,
            assignee = task.assigned_to.as_ref().map(MemberId::as_str).unwrap_or("none"),
            "task reassigned"
        );
        Ok(task)
    }

    pub fn remove(&self, context: &RequestContext, id: &TaskId) -> Result<Task, TaskServiceError> {
        self.actor(context)?.require_admin("removing tasks")?;
        let removed = self.tasks.remove(id)?;
        info!(task = %removed.id, "task removed");
        Ok(removed)
    }
}

/// Error raised by the task service.
#[derive(Debug, thiserror::Error)]
pub enum TaskServiceError {
    #[error("missing required field: {0}")]
    MissingField(&'static str),
    #[error("{0} is not a registered volunteer")]
    UnknownVolunteer(MemberId),
    #[error("task cannot advance from {}", .from.label())]
    InvalidTransition { from: TaskStatus },
    #[error(transparent)]
    Access(#[from] AccessError),
    #[error(transparent)]
    Repository(#[from] RepositoryError),
}

impl TaskServiceError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            TaskServiceError::MissingField(_) | TaskServiceError::UnknownVolunteer(_) => {
                StatusCode::BAD_REQUEST
            }
            TaskServiceError::InvalidTransition { .. } => StatusCode::CONFLICT,
            TaskServiceError::Access(err) => err.status_code(),
            TaskServiceError::Repository(err) => err.status_code(),
        }
    }
}
