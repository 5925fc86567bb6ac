use std::sync::Arc;

use axum::http::StatusCode;
use chrono::{Duration, NaiveDateTime, NaiveTime};
use tracing::info;

use super::domain::{
    AttendanceId, AttendanceRecord, AttendanceStatus, Event, EventDraft, EventId, EventQuery,
    EventStatus,
};
use super::repository::EventRepository;
use crate::access::{resolve_actor, AccessError, Actor, RequestContext};
use crate::storage::{IdSequence, RepositoryError};
use crate::workflows::normalizer::normalize_tags;
use crate::workflows::roster::domain::MemberId;
use crate::workflows::roster::repository::MemberRepository;

static EVENT_SEQUENCE: IdSequence = IdSequence::new("evt");
static ATTENDANCE_SEQUENCE: IdSequence = IdSequence::new("att");

const DEFAULT_LEAD_DAYS: i64 = 14;
const DEFAULT_START_HOUR: u32 = 9;

/// Service owning events, participation, and attendance tracking.
pub struct EventService<M, E> {
    members: Arc<M>,
    events: Arc<E>,
}

impl<M, E> EventService<M, E>
where
    M: MemberRepository + 'static,
    E: EventRepository + 'static,
{
    pub fn new(members: Arc<M>, events: Arc<E>) -> Self {
        Self { members, events }
    }

    fn actor(&self, context: &RequestContext) -> Result<Actor, EventServiceError> {
        resolve_actor(self.members.as_ref(), context)
    }

    fn existing(&self, id: &EventId) -> Result<Event, EventServiceError> {
        Ok(self.events.fetch(id)?.ok_or(RepositoryError::NotFound)?)
    }

    /// Deduplicate participants, keeping first-seen order, and require each be a volunteer.
    fn volunteers(&self, participants: &[MemberId]) -> Result<Vec<MemberId>, EventServiceError> {
        let mut accepted: Vec<MemberId> = Vec::with_capacity(participants.len());
        for id in participants {
            if accepted.contains(id) {
                continue;
            }
            match self.members.fetch(id)? {
                Some(member) if member.is_volunteer() => accepted.push(member.id),
                _ => return Err(EventServiceError::UnknownVolunteer(id.clone())),
            }
        }
        Ok(accepted)
    }

    fn confirm(
        &self,
        event: &EventId,
        member: &MemberId,
        duties: &[String],
    ) -> Result<(), EventServiceError> {
        if self.events.find_attendance(event, member)?.is_some() {
            return Ok(());
        }
        self.events.insert_attendance(AttendanceRecord {
            id: AttendanceId(ATTENDANCE_SEQUENCE.next_id()),
            event_id: event.clone(),
            member_id: member.clone(),
            status: AttendanceStatus::Confirmed,
            check_in: None,
            check_out: None,
            duties: duties.to_vec(),
        })?;
        Ok(())
    }

    pub fn create(
        &self,
        context: &RequestContext,
        draft: EventDraft,
    ) -> Result<Event, EventServiceError> {
        let actor = self.actor(context)?;
        actor.require_admin("creating events")?;
        if let Some(field) = draft.missing_field() {
            return Err(EventServiceError::MissingField(field));
        }

        let coordinator = match draft.coordinator {
            Some(id) => self
                .members
                .fetch(&id)?
                .map(|member| member.id)
                .ok_or(EventServiceError::UnknownMember(id))?,
            None => actor.id.clone(),
        };
        let participants = self.volunteers(&draft.participants)?;
        let duties = normalize_tags(&draft.duties);

        let event = Event {
            id: EventId(EVENT_SEQUENCE.next_id()),
            title: draft.title.trim().to_string(),
            description: draft.description.trim().to_string(),
            date: draft
                .date
                .unwrap_or(context.today + Duration::days(DEFAULT_LEAD_DAYS)),
            time: draft
                .time
                .or_else(|| NaiveTime::from_hms_opt(DEFAULT_START_HOUR, 0, 0))
                .unwrap_or(NaiveTime::MIN),
            location: draft.location.trim().to_string(),
            coordinator,
            participants,
            capacity: draft.capacity,
            status: EventStatus::Upcoming,
            created_by: actor.id,
            created_date: context.today,
        };
        if event.exceeds_capacity(event.participants.len()) {
            return Err(EventServiceError::EventFull);
        }

        let stored = self.events.insert(event)?;
        for participant in &stored.participants {
            self.confirm(&stored.id, participant, &duties)?;
        }
        info!(
            event = %stored.id,
            date = %stored.date,
            participants = stored.participants.len(),
            "event created"
        );
        Ok(stored)
    }

    /// Admins see every event. Volunteers see events they take part in or coordinate,
    /// plus any upcoming event from today on.
    pub fn list(
        &self,
        context: &RequestContext,
        query: &EventQuery,
    ) -> Result<Vec<Event>, EventServiceError> {
        let actor = self.actor(context)?;
        let today = actor.today;
        let mut events: Vec<Event> = self
            .events
            .list()?
            .into_iter()
            .filter(|event| {
                actor.is_admin()
                    || event.involves(&actor.id)
                    || (event.status == EventStatus::Upcoming && event.date >= today)
            })
            .filter(|event| query.matches(event, today))
            .collect();
        events.sort_by(|left, right| {
            left.date
                .cmp(&right.date)
                .then_with(|| left.time.cmp(&right.time))
        });
        Ok(events)
    }

    pub fn toggle_status(
        &self,
        context: &RequestContext,
        id: &EventId,
    ) -> Result<Event, EventServiceError> {
        self.actor(context)?.require_admin("changing event status")?;
        let mut event = self.existing(id)?;
        event.status = event.status.toggled();
        self.events.update(event.clone())?;
        info!(event = %event.id, status = event.status.label(), "event status changed");
        Ok(event)
    }

    pub fn cancel(
        &self,
        context: &RequestContext,
        id: &EventId,
    ) -> Result<Event, EventServiceError> {
        self.actor(context)?.require_admin("cancelling events")?;
        let mut event = self.existing(id)?;
        event.status = EventStatus::Cancelled;
        self.events.update(event.clone())?;
        info!(event = %event.id, "event cancelled");
        Ok(event)
    }

    /// Replace the participant list. Newly added volunteers receive confirmed attendance;
    /// removed ones lose their attendance record.
    pub fn set_participants(
        &self,
        context: &RequestContext,
        id: &EventId,
        participants: &[MemberId],
    ) -> Result<Event, EventServiceError> {
        self.actor(context)?.require_admin("editing event participants")?;
        let mut event = self.existing(id)?;
        let participants = self.volunteers(participants)?;
        if event.exceeds_capacity(participants.len()) {
            return Err(EventServiceError::EventFull);
        }

        let added: Vec<MemberId> = participants
            .iter()
            .filter(|member| !event.has_participant(member))
            .cloned()
            .collect();
        let dropped: Vec<MemberId> = event
            .participants
            .iter()
            .filter(|member| !participants.contains(member))
            .cloned()
            .collect();
        event.participants = participants;
        self.events.update(event.clone())?;
        for member in &dropped {
            self.events.remove_attendance(&event.id, member)?;
        }
        for member in &added {
            self.confirm(&event.id, member, &[])?;
        }
        if !dropped.is_empty() {
            info!(event = %event.id, removed = dropped.len(), "participants removed from event");
        }
        Ok(event)
    }

    /// A member joins an upcoming event with spare capacity.
    pub fn register(
        &self,
        context: &RequestContext,
        id: &EventId,
    ) -> Result<Event, EventServiceError> {
        let actor = self.actor(context)?;
        let mut event = self.existing(id)?;

        if event.status != EventStatus::Upcoming {
            return Err(EventServiceError::Closed);
        }
        if event.has_participant(&actor.id) {
            return Err(EventServiceError::AlreadyRegistered);
        }
        if event.is_full() {
            return Err(EventServiceError::EventFull);
        }

        event.participants.push(actor.id.clone());
        self.events.update(event.clone())?;
        self.confirm(&event.id, &actor.id, &[])?;
        info!(event = %event.id, member = %actor.id, "member registered for event");
        Ok(event)
    }

    fn attendance_of(
        &self,
        actor: &Actor,
        event: &EventId,
        member: &MemberId,
    ) -> Result<AttendanceRecord, EventServiceError> {
        actor.require_self_or_admin(member, "recording attendance for another member")?;
        if !self.existing(event)?.has_participant(member) {
            return Err(EventServiceError::NotRegistered(member.clone()));
        }
        self.events
            .find_attendance(event, member)?
            .ok_or_else(|| EventServiceError::NotRegistered(member.clone()))
    }

    pub fn check_in(
        &self,
        context: &RequestContext,
        id: &EventId,
        member: &MemberId,
        at: NaiveDateTime,
    ) -> Result<AttendanceRecord, EventServiceError> {
        let actor = self.actor(context)?;
        let mut record = self.attendance_of(&actor, id, member)?;
        if record.check_in.is_some() {
            return Err(EventServiceError::AttendanceOrder("member already checked in"));
        }

        record.status = AttendanceStatus::CheckedIn;
        record.check_in = Some(at);
        self.events.update_attendance(record.clone())?;
        info!(event = %id, member = %member, "member checked in");
        Ok(record)
    }

    pub fn check_out(
        &self,
        context: &RequestContext,
        id: &EventId,
        member: &MemberId,
        at: NaiveDateTime,
    ) -> Result<AttendanceRecord, EventServiceError> {
        let actor = self.actor(context)?;
        let mut record = self.attendance_of(&actor, id, member)?;
        match (record.check_in, record.check_out) {
            (None, _) => {
                return Err(EventServiceError::AttendanceOrder(
                    "check-out requires a prior check-in",
                ))
            }
            (Some(_), Some(_)) => {
                return Err(EventServiceError::AttendanceOrder("member already checked out"))
            }
            (Some(check_in), None) if at < check_in => {
                return Err(EventServiceError::AttendanceOrder(
                    "check-out cannot precede check-in",
                ))
            }
            (Some(_), None) => {}
        }

        record.status = AttendanceStatus::CheckedOut;
        record.check_out = Some(at);
        self.events.update_attendance(record.clone())?;
        info!(event = %id, member = %member, "member checked out");
        Ok(record)
    }

    pub fn attendance(
        &self,
        context: &RequestContext,
        id: &EventId,
    ) -> Result<Vec<AttendanceRecord>, EventServiceError> {
        self.actor(context)?.require_admin("reviewing attendance")?;
        self.existing(id)?;
        Ok(self.events.attendance(Some(id))?)
    }
}

/// Error raised by the event service.
#[derive(Debug, thiserror::Error)]
pub enum EventServiceError {
    #[error("missing required field: {0}")]
    MissingField(&'static str),
    #[error("{0} is not a registered member")]
    UnknownMember(MemberId),
    #[error("{0} is not a registered volunteer")]
    UnknownVolunteer(MemberId),
    #[error("member is already registered for this event")]
    AlreadyRegistered,
    #[error("event is at capacity")]
    EventFull,
    #[error("event is not open for registration")]
    Closed,
    #[error("{0} has no attendance record for this event")]
    NotRegistered(MemberId),
    #[error("{0}")]
    AttendanceOrder(&'static str),
    #[error(transparent)]
    Access(#[from] AccessError),
    #[error(transparent)]
    Repository(#[from] RepositoryError),
}

impl EventServiceError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            EventServiceError::MissingField(_)
            | EventServiceError::UnknownMember(_)
            | EventServiceError::UnknownVolunteer(_) => StatusCode::BAD_REQUEST,
            EventServiceError::AlreadyRegistered
            | EventServiceError::EventFull
            | EventServiceError::Closed
            | EventServiceError::NotRegistered(_)
            | EventServiceError::AttendanceOrder(_) => StatusCode::CONFLICT,
            EventServiceError::Access(err) => err.status_code(),
            EventServiceError::Repository(err) => err.status_code(),
        }
    }
}
