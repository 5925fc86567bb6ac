//! Mutex-guarded in-memory repositories.
//!
//! Each store keeps records in insertion order and serializes every write through one
//! lock. Callers receive cloned snapshots, never references into the store.

use std::sync::{Arc, Mutex, MutexGuard};

use super::RepositoryError;
use crate::workflows::events::domain::{AttendanceRecord, Event, EventId};
use crate::workflows::events::repository::EventRepository;
use crate::workflows::ideas::domain::{Idea, IdeaId};
use crate::workflows::ideas::repository::IdeaRepository;
use crate::workflows::roster::domain::{Member, MemberId};
use crate::workflows::roster::repository::MemberRepository;
use crate::workflows::tasks::domain::{Task, TaskId};
use crate::workflows::tasks::repository::TaskRepository;

fn lock<'a, T>(mutex: &'a Mutex<T>, store: &str) -> Result<MutexGuard<'a, T>, RepositoryError> {
    mutex
        .lock()
        .map_err(|_| RepositoryError::Unavailable(format!("{store} store lock poisoned")))
}

fn replace<T, F>(records: &mut [T], record: T, same: F) -> Result<(), RepositoryError>
where
    F: Fn(&T, &T) -> bool,
{
    let slot = records
        .iter_mut()
        .find(|existing| same(existing, &record))
        .ok_or(RepositoryError::NotFound)?;
    *slot = record;
    Ok(())
}

#[derive(Debug, Default, Clone)]
pub struct InMemoryMemberRepository {
    members: Arc<Mutex<Vec<Member>>>,
}

impl InMemoryMemberRepository {
    pub fn with_members(members: Vec<Member>) -> Self {
        Self {
            members: Arc::new(Mutex::new(members)),
        }
    }
}

impl MemberRepository for InMemoryMemberRepository {
    fn insert(&self, member: Member) -> Result<Member, RepositoryError> {
        let mut guard = lock(&self.members, "member")?;
        if guard
            .iter()
            .any(|existing| existing.id == member.id || existing.username == member.username)
        {
            return Err(RepositoryError::Conflict);
        }
        guard.push(member.clone());
        Ok(member)
    }

    fn update(&self, member: Member) -> Result<(), RepositoryError> {
        let mut guard = lock(&self.members, "member")?;
        replace(guard.as_mut_slice(), member, |left, right| left.id == right.id)
    }

    fn fetch(&self, id: &MemberId) -> Result<Option<Member>, RepositoryError> {
        let guard = lock(&self.members, "member")?;
        Ok(guard.iter().find(|member| &member.id == id).cloned())
    }

    fn find_by_username(&self, username: &str) -> Result<Option<Member>, RepositoryError> {
        let guard = lock(&self.members, "member")?;
        Ok(guard
            .iter()
            .find(|member| member.username == username)
            .cloned())
    }

    fn list(&self) -> Result<Vec<Member>, RepositoryError> {
        Ok(lock(&self.members, "member")?.clone())
    }

    fn remove(&self, id: &MemberId) -> Result<Member, RepositoryError> {
        let mut guard = lock(&self.members, "member")?;
        let index = guard
            .iter()
            .position(|member| &member.id == id)
            .ok_or(RepositoryError::NotFound)?;
        Ok(guard.remove(index))
    }
}

#[derive(Debug, Default, Clone)]
pub struct InMemoryTaskRepository {
    tasks: Arc<Mutex<Vec<Task>>>,
}

impl InMemoryTaskRepository {
    pub fn with_tasks(tasks: Vec<Task>) -> Self {
        Self {
            tasks: Arc::new(Mutex::new(tasks)),
        }
    }
}

impl TaskRepository for InMemoryTaskRepository {
    fn insert(&self, task: Task) -> Result<Task, RepositoryError> {
        let mut guard = lock(&self.tasks, "task")?;
        if guard.iter().any(|existing| existing.id == task.id) {
            return Err(RepositoryError::Conflict);
        }
        guard.push(task.clone());
        Ok(task)
    }

    fn update(&self, task: Task) -> Result<(), RepositoryError> {
        let mut guard = lock(&self.tasks, "task")?;
        replace(guard.as_mut_slice(), task, |left, right| left.id == right.id)
    }

    fn fetch(&self, id: &TaskId) -> Result<Option<Task>, RepositoryError> {
        let guard = lock(&self.tasks, "task")?;
        Ok(guard.iter().find(|task| &task.id == id).cloned())
    }

    fn list(&self) -> Result<Vec<Task>, RepositoryError> {
        Ok(lock(&self.tasks, "task")?.clone())
    }

    fn remove(&self, id: &TaskId) -> Result<Task, RepositoryError> {
        let mut guard = lock(&self.tasks, "task")?;
        let index = guard
            .iter()
            .position(|task| &task.id == id)
            .ok_or(RepositoryError::NotFound)?;
        Ok(guard.remove(index))
    }
}

#[derive(Debug, Default)]
struct EventStore {
    events: Vec<Event>,
    attendance: Vec<AttendanceRecord>,
}

#[derive(Debug, Default, Clone)]
pub struct InMemoryEventRepository {
    store: Arc<Mutex<EventStore>>,
}

impl InMemoryEventRepository {
    pub fn with_events(events: Vec<Event>, attendance: Vec<AttendanceRecord>) -> Self {
        Self {
            store: Arc::new(Mutex::new(EventStore { events, attendance })),
        }
    }
}

impl EventRepository for InMemoryEventRepository {
    fn insert(&self, event: Event) -> Result<Event, RepositoryError> {
        let mut guard = lock(&self.store, "event")?;
        if guard.events.iter().any(|existing| existing.id == event.id) {
            return Err(RepositoryError::Conflict);
        }
        guard.events.push(event.clone());
        Ok(event)
    }

    fn update(&self, event: Event) -> Result<(), RepositoryError> {
        let mut guard = lock(&self.store, "event")?;
        replace(guard.events.as_mut_slice(), event, |left, right| left.id == right.id)
    }

    fn fetch(&self, id: &EventId) -> Result<Option<Event>, RepositoryError> {
        let guard = lock(&self.store, "event")?;
        Ok(guard.events.iter().find(|event| &event.id == id).cloned())
    }

    fn list(&self) -> Result<Vec<Event>, RepositoryError> {
        Ok(lock(&self.store, "event")?.events.clone())
    }

    fn insert_attendance(
        &self,
        record: AttendanceRecord,
    ) -> Result<AttendanceRecord, RepositoryError> {
        let mut guard = lock(&self.store, "event")?;
        if guard.attendance.iter().any(|existing| {
            existing.id == record.id
                || (existing.event_id == record.event_id && existing.member_id == record.member_id)
        }) {
            return Err(RepositoryError::Conflict);
        }
        guard.attendance.push(record.clone());
        Ok(record)
    }

    fn update_attendance(&self, record: AttendanceRecord) -> Result<(), RepositoryError> {
        let mut guard = lock(&self.store, "event")?;
        replace(guard.attendance.as_mut_slice(), record, |left, right| left.id == right.id)
    }

    fn find_attendance(
        &self,
        event: &EventId,
        member: &MemberId,
    ) -> Result<Option<AttendanceRecord>, RepositoryError> {
        let guard = lock(&self.store, "event")?;
        Ok(guard
            .attendance
            .iter()
            .find(|record| &record.event_id == event && &record.member_id == member)
            .cloned())
    }

    fn remove_attendance(
        &self,
        event: &EventId,
        member: &MemberId,
    ) -> Result<Option<AttendanceRecord>, RepositoryError> {
        let mut guard = lock(&self.store, "event")?;
        let position = guard
            .attendance
            .iter()
            .position(|record| &record.event_id == event && &record.member_id == member);
        Ok(position.map(|index| guard.attendance.remove(index)))
    }

    fn attendance(
        &self,
        event: Option<&EventId>,
    ) -> Result<Vec<AttendanceRecord>, RepositoryError> {
        let guard = lock(&self.store, "event")?;
        Ok(guard
            .attendance
            .iter()
            .filter(|record| event.map_or(true, |event| &record.event_id == event))
            .cloned()
            .collect())
    }
}

#[derive(Debug, Default, Clone)]
pub struct InMemoryIdeaRepository {
    ideas: Arc<Mutex<Vec<Idea>>>,
}

impl InMemoryIdeaRepository {
    pub fn with_ideas(ideas: Vec<Idea>) -> Self {
        Self {
            ideas: Arc::new(Mutex::new(ideas)),
        }
    }
}

impl IdeaRepository for InMemoryIdeaRepository {
    fn insert(&self, idea: Idea) -> Result<Idea, RepositoryError> {
        let mut guard = lock(&self.ideas, "idea")?;
        if guard.iter().any(|existing| existing.id == idea.id) {
            return Err(RepositoryError::Conflict);
        }
        guard.push(idea.clone());
        Ok(idea)
    }

    fn update(&self, idea: Idea) -> Result<(), RepositoryError> {
        let mut guard = lock(&self.ideas, "idea")?;
        replace(guard.as_mut_slice(), idea, |left, right| left.id == right.id)
    }

    fn fetch(&self, id: &IdeaId) -> Result<Option<Idea>, RepositoryError> {
        let guard = lock(&self.ideas, "idea")?;
        Ok(guard.iter().find(|idea| &idea.id == id).cloned())
    }

    fn list(&self) -> Result<Vec<Idea>, RepositoryError> {
        Ok(lock(&self.ideas, "idea")?.clone())
    }
}
