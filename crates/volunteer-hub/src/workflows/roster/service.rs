use std::sync::Arc;

use axum::http::StatusCode;
use chrono::NaiveDate;
use tracing::info;

use super::domain::{
    Member, MemberFilter, MemberId, NewMember, ProfileUpdate, Registration, Role,
};
use super::repository::MemberRepository;
use crate::access::{resolve_actor, AccessError, Actor, RequestContext};
use crate::storage::{IdSequence, RepositoryError};

static VOLUNTEER_SEQUENCE: IdSequence = IdSequence::new("vol");
static ADMIN_SEQUENCE: IdSequence = IdSequence::new("adm");

fn next_member_id(role: Role) -> MemberId {
    let id = match role {
        Role::Volunteer => VOLUNTEER_SEQUENCE.next_id(),
        Role::Admin => ADMIN_SEQUENCE.next_id(),
    };
    MemberId(id)
}

/// Service owning roster reads and writes.
pub struct RosterService<M> {
    members: Arc<M>,
}

impl<M> RosterService<M>
where
    M: MemberRepository + 'static,
{
    pub fn new(members: Arc<M>) -> Self {
        Self { members }
    }

    fn actor(&self, context: &RequestContext) -> Result<Actor, RosterError> {
        resolve_actor(self.members.as_ref(), context)
    }

    fn existing(&self, id: &MemberId) -> Result<Member, RosterError> {
        Ok(self
            .members
            .fetch(id)?
            .ok_or(RepositoryError::NotFound)?)
    }

    fn create(
        &self,
        registration: Registration,
        role: Role,
        today: NaiveDate,
    ) -> Result<Member, RosterError> {
        if let Some(field) = registration.missing_field() {
            return Err(RosterError::MissingField(field));
        }

        let username = registration.username.trim().to_string();
        if self.members.find_by_username(&username)?.is_some() {
            return Err(RosterError::UsernameTaken(username));
        }

        let member = registration.into_member(next_member_id(role), role, today);
        let stored = self.members.insert(member)?;
        info!(member = %stored.id, role = stored.role.label(), "member added to roster");
        Ok(stored)
    }

    /// Self-service volunteer sign-up; no actor is required.
    pub fn register(
        &self,
        registration: Registration,
        today: NaiveDate,
    ) -> Result<Member, RosterError> {
        self.create(registration, Role::Volunteer, today)
    }

    pub fn add_member(
        &self,
        context: &RequestContext,
        new_member: NewMember,
    ) -> Result<Member, RosterError> {
        self.actor(context)?.require_admin("adding members")?;
        self.create(new_member.registration, new_member.role, context.today)
    }

    pub fn list(
        &self,
        context: &RequestContext,
        filter: &MemberFilter,
    ) -> Result<Vec<Member>, RosterError> {
        self.actor(context)?.require_admin("listing members")?;
        Ok(self
            .members
            .list()?
            .into_iter()
            .filter(|member| filter.matches(member))
            .collect())
    }

    pub fn profile(&self, context: &RequestContext) -> Result<Member, RosterError> {
        let actor = self.actor(context)?;
        self.existing(&actor.id)
    }

    pub fn update_profile(
        &self,
        context: &RequestContext,
        update: &ProfileUpdate,
    ) -> Result<Member, RosterError> {
        let actor = self.actor(context)?;
        // Roles change only through `update_member`, even for admins.
        if update.role.is_some() {
            return Err(AccessError::Forbidden {
                action: "changing your own role",
            }
            .into());
        }
        let member = self.existing(&actor.id)?.with_update(update);
        self.members.update(member.clone())?;
        Ok(member)
    }

    pub fn update_member(
        &self,
        context: &RequestContext,
        id: &MemberId,
        update: &ProfileUpdate,
    ) -> Result<Member, RosterError> {
        self.actor(context)?.require_admin("editing members")?;
        let member = self.existing(id)?.with_update(update);
        self.members.update(member.clone())?;
        Ok(member)
    }

    pub fn toggle_status(
        &self,
        context: &RequestContext,
        id: &MemberId,
    ) -> Result<Member, RosterError> {
        self.actor(context)?.require_admin("changing member status")?;
        let mut member = self.existing(id)?;
        member.status = member.status.toggled();
        self.members.update(member.clone())?;
        info!(member = %member.id, status = member.status.label(), "member status changed");
        Ok(member)
    }

    pub fn pending_verifications(
        &self,
        context: &RequestContext,
    ) -> Result<Vec<Member>, RosterError> {
        self.actor(context)?.require_admin("reviewing verifications")?;
        Ok(self
            .members
            .list()?
            .into_iter()
            .filter(|member| !member.verified)
            .collect())
    }

    pub fn verify(&self, context: &RequestContext, id: &MemberId) -> Result<Member, RosterError> {
        self.actor(context)?.require_admin("verifying members")?;
        let mut member = self.existing(id)?;
        member.verified = true;
        self.members.update(member.clone())?;
        info!(member = %member.id, "member identity verified");
        Ok(member)
    }

    pub fn remove(&self, context: &RequestContext, id: &MemberId) -> Result<Member, RosterError> {
        let actor = self.actor(context)?;
        actor.require_admin("removing members")?;
        if &actor.id == id {
            return Err(RosterError::SelfRemoval);
        }
        let removed = self.members.remove(id)?;
        info!(member = %removed.id, "member removed from roster");
        Ok(removed)
    }
}

/// Error raised by the roster service.
#[derive(Debug, thiserror::Error)]
pub enum RosterError {
    #[error("missing required field: {0}")]
    MissingField(&'static str),
    #[error("username {0} is already taken")]
    UsernameTaken(String),
    #[error("members cannot remove their own account")]
    SelfRemoval,
    #[error(transparent)]
    Access(#[from] AccessError),
    #[error(transparent)]
    Repository(#[from] RepositoryError),
}

impl RosterError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            RosterError::MissingField(_) | RosterError::SelfRemoval => StatusCode::BAD_REQUEST,
            RosterError::UsernameTaken(_) => StatusCode::CONFLICT,
            RosterError::Access(err) => err.status_code(),
            RosterError::Repository(err) => err.status_code(),
        }
    }
}
