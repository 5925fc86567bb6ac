use std::sync::Arc;

use axum::http::StatusCode;

use super::analytics::Analytics;
use super::snapshot::Snapshot;
use super::summary::DashboardSummary;
use crate::access::{resolve_actor, AccessError, Actor, RequestContext};
use crate::storage::RepositoryError;
use crate::workflows::events::repository::EventRepository;
use crate::workflows::ideas::repository::IdeaRepository;
use crate::workflows::roster::repository::MemberRepository;
use crate::workflows::tasks::repository::TaskRepository;

/// Read-only service assembling dashboard views across every store.
pub struct DashboardService<M, T, E, I> {
    members: Arc<M>,
    tasks: Arc<T>,
    events: Arc<E>,
    ideas: Arc<I>,
}

impl<M, T, E, I> DashboardService<M, T, E, I>
where
    M: MemberRepository + 'static,
    T: TaskRepository + 'static,
    E: EventRepository + 'static,
    I: IdeaRepository + 'static,
{
    pub fn new(members: Arc<M>, tasks: Arc<T>, events: Arc<E>, ideas: Arc<I>) -> Self {
        Self {
            members,
            tasks,
            events,
            ideas,
        }
    }

    fn actor(&self, context: &RequestContext) -> Result<Actor, DashboardError> {
        resolve_actor(self.members.as_ref(), context)
    }

    fn snapshot(&self) -> Result<Snapshot, DashboardError> {
        Ok(Snapshot {
            members: self.members.list()?,
            tasks: self.tasks.list()?,
            events: self.events.list()?,
            attendance: self.events.attendance(None)?,
            ideas: self.ideas.list()?,
        })
    }

    pub fn summary(&self, context: &RequestContext) -> Result<DashboardSummary, DashboardError> {
        let actor = self.actor(context)?;
        Ok(DashboardSummary::build(&actor, &self.snapshot()?))
    }

    pub fn analytics(&self, context: &RequestContext) -> Result<Analytics, DashboardError> {
        self.actor(context)?.require_admin("viewing analytics")?;
        Ok(Analytics::build(&self.snapshot()?))
    }
}

#[derive(Debug, thiserror::Error)]
pub enum DashboardError {
    #[error(transparent)]
    Access(#[from] AccessError),
    #[error(transparent)]
    Repository(#[from] RepositoryError),
}

impl DashboardError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            DashboardError::Access(err) => err.status_code(),
            DashboardError::Repository(err) => err.status_code(),
        }
    }
}
