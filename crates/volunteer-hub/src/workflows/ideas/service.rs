use std::sync::Arc;

use axum::http::StatusCode;
use tracing::info;

use super::domain::{sort_newest_first, Idea, IdeaDraft, IdeaId, IdeaReview, IdeaStatus};
use super::repository::IdeaRepository;
use crate::access::{resolve_actor, AccessError, Actor, RequestContext};
use crate::storage::{IdSequence, RepositoryError};
use crate::workflows::roster::repository::MemberRepository;

static IDEA_SEQUENCE: IdSequence = IdSequence::new("idea");

pub struct IdeaService<M, I> {
    members: Arc<M>,
    ideas: Arc<I>,
}

impl<M, I> IdeaService<M, I>
where
    M: MemberRepository + 'static,
    I: IdeaRepository + 'static,
{
    pub fn new(members: Arc<M>, ideas: Arc<I>) -> Self {
        Self { members, ideas }
    }

    fn actor(&self, context: &RequestContext) -> Result<Actor, IdeaServiceError> {
        resolve_actor(self.members.as_ref(), context)
    }

    fn existing(&self, id: &IdeaId) -> Result<Idea, IdeaServiceError> {
        Ok(self.ideas.fetch(id)?.ok_or(RepositoryError::NotFound)?)
    }

    pub fn submit(
        &self,
        context: &RequestContext,
        draft: IdeaDraft,
    ) -> Result<Idea, IdeaServiceError> {
        let actor = self.actor(context)?;
        if draft.title.trim().is_empty() {
            return Err(IdeaServiceError::MissingField("title"));
        }
        if draft.description.trim().is_empty() {
            return Err(IdeaServiceError::MissingField("description"));
        }

        let idea = self.ideas.insert(Idea {
            id: IdeaId(IDEA_SEQUENCE.next_id()),
            title: draft.title.trim().to_string(),
            description: draft.description.trim().to_string(),
            submitted_by: actor.id,
            status: IdeaStatus::UnderReview,
            submission_date: context.today,
            comments: None,
            upvotes: 0,
        })?;
        info!(idea = %idea.id, member = %idea.submitted_by, "idea submitted");
        Ok(idea)
    }

    pub fn list(&self, context: &RequestContext) -> Result<Vec<Idea>, IdeaServiceError> {
        self.actor(context)?.require_admin("reviewing all ideas")?;
        let mut ideas = self.ideas.list()?;
        sort_newest_first(&mut ideas);
        Ok(ideas)
    }

    pub fn mine(&self, context: &RequestContext) -> Result<Vec<Idea>, IdeaServiceError> {
        let actor = self.actor(context)?;
        let mut ideas: Vec<Idea> = self
            .ideas
            .list()?
            .into_iter()
            .filter(|idea| idea.submitted_by == actor.id)
            .collect();
        sort_newest_first(&mut ideas);
        Ok(ideas)
    }

    pub fn review(
        &self,
        context: &RequestContext,
        id: &IdeaId,
        review: IdeaReview,
    ) -> Result<Idea, IdeaServiceError> {
        self.actor(context)?.require_admin("reviewing ideas")?;
        let mut idea = self.existing(id)?;
        idea.status = review.status;
        if let Some(comment) = review
            .comment
            .map(|comment| comment.trim().to_string())
            .filter(|comment| !comment.is_empty())
        {
            idea.comments = Some(comment);
        }
        self.ideas.update(idea.clone())?;
        info!(idea = %idea.id, status = idea.status.label(), "idea reviewed");
        Ok(idea)
    }

    pub fn upvote(&self, context: &RequestContext, id: &IdeaId) -> Result<Idea, IdeaServiceError> {
        self.actor(context)?;
        let mut idea = self.existing(id)?;
        idea.upvotes = idea.upvotes.saturating_add(1);
        self.ideas.update(idea.clone())?;
        Ok(idea)
    }
}

#[derive(Debug, thiserror::Error)]
pub enum IdeaServiceError {
    #[error("missing required field: {0}")]
    MissingField(&'static str),
    #[error(transparent)]
    Access(#[from] AccessError),
    #[error(transparent)]
    Repository(#[from] RepositoryError),
}

impl IdeaServiceError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            IdeaServiceError::MissingField(_) => StatusCode::BAD_REQUEST,
            IdeaServiceError::Access(err) => err.status_code(),
            IdeaServiceError::Repository(err) => err.status_code(),
        }
    }
}
