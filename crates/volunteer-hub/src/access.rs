//! Per-request identity and role gating.
//!
//! Authentication happens upstream; requests arrive with the member id in the
//! [`ACTOR_HEADER`] header. The role is never taken from the client: services resolve the id
//! against the roster and gate on the stored role.

use axum::http::{HeaderMap, StatusCode};
use chrono::{Local, NaiveDate};

use crate::storage::RepositoryError;
use crate::workflows::roster::domain::{Member, MemberId, Role};
use crate::workflows::roster::repository::MemberRepository;

pub const ACTOR_HEADER: &str = "x-actor-id";

/// Explicit request context replacing any process-wide "current user" state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestContext {
    pub actor_id: MemberId,
    pub today: NaiveDate,
}

impl RequestContext {
    pub fn new(actor_id: impl Into<String>, today: NaiveDate) -> Self {
        Self {
            actor_id: MemberId(actor_id.into()),
            today,
        }
    }

    pub fn from_headers(headers: &HeaderMap, today: NaiveDate) -> Result<Self, AccessError> {
        let actor = headers
            .get(ACTOR_HEADER)
            .and_then(|value| value.to_str().ok())
            .map(str::trim)
            .filter(|value| !value.is_empty())
            .ok_or(AccessError::MissingActor)?;

        Ok(Self::new(actor, today))
    }

    /// Build a context dated with the server's local calendar day.
    pub fn from_request(headers: &HeaderMap) -> Result<Self, AccessError> {
        Self::from_headers(headers, Local::now().date_naive())
    }
}

/// A resolved member acting on the current request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Actor {
    pub id: MemberId,
    pub role: Role,
    pub today: NaiveDate,
}

impl Actor {
    pub fn from_member(member: &Member, today: NaiveDate) -> Self {
        Self {
            id: member.id.clone(),
            role: member.role,
            today,
        }
    }

    pub fn is_admin(&self) -> bool {
        self.role == Role::Admin
    }

    pub fn require_admin(&self, action: &'static str) -> Result<(), AccessError> {
        if self.is_admin() {
            Ok(())
        } else {
            Err(AccessError::Forbidden { action })
        }
    }

    /// Admins may act on anyone; everyone else only on themselves.
    pub fn require_self_or_admin(
        &self,
        subject: &MemberId,
        action: &'static str,
    ) -> Result<(), AccessError> {
        if self.is_admin() || &self.id == subject {
            Ok(())
        } else {
            Err(AccessError::Forbidden { action })
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AccessError {
    #[error("request is missing the x-actor-id header")]
    MissingActor,
    #[error("actor {0} is not a registered member")]
    UnknownActor(MemberId),
    #[error("{action} is not permitted for this member")]
    Forbidden { action: &'static str },
}

impl AccessError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            AccessError::MissingActor | AccessError::UnknownActor(_) => StatusCode::UNAUTHORIZED,
            AccessError::Forbidden { .. } => StatusCode::FORBIDDEN,
        }
    }
}

/// Resolve the context's actor against the roster.
pub fn resolve_actor<M, E>(members: &M, context: &RequestContext) -> Result<Actor, E>
where
    M: MemberRepository + ?Sized,
    E: From<AccessError> + From<RepositoryError>,
{
    let member = members
        .fetch(&context.actor_id)?
        .ok_or_else(|| AccessError::UnknownActor(context.actor_id.clone()))?;
    Ok(Actor::from_member(&member, context.today))
}
