use std::sync::Arc;

use chrono::{NaiveDate, NaiveDateTime, NaiveTime};

pub(super) use crate::test_support::*;
use crate::storage::{InMemoryEventRepository, InMemoryMemberRepository};
use crate::workflows::events::{Event, EventDraft, EventId, EventService, EventStatus};

pub(super) type Service = EventService<InMemoryMemberRepository, InMemoryEventRepository>;

pub(super) fn build_service_with(events: Vec<Event>) -> (Service, Arc<InMemoryEventRepository>) {
    let repository = Arc::new(InMemoryEventRepository::with_events(events, Vec::new()));
    (
        EventService::new(member_repository(), repository.clone()),
        repository,
    )
}

pub(super) fn build_service() -> (Service, Arc<InMemoryEventRepository>) {
    build_service_with(Vec::new())
}

pub(super) fn event_id(value: &str) -> EventId {
    EventId(value.to_string())
}

pub(super) fn event(value: &str, day: NaiveDate, participants: &[&str]) -> Event {
    Event {
        id: event_id(value),
        title: format!("Event {value}"),
        description: "Community session".to_string(),
        date: day,
        time: NaiveTime::from_hms_opt(10, 0, 0).expect("valid time"),
        location: "Community Center".to_string(),
        coordinator: id("admin001"),
        participants: participants.iter().map(|member| id(member)).collect(),
        capacity: None,
        status: EventStatus::Upcoming,
        created_by: id("admin001"),
        created_date: date(2025, 3, 1),
    }
}

pub(super) fn draft(participants: &[&str]) -> EventDraft {
    EventDraft {
        title: "Beach Cleanup".to_string(),
        description: "Cleaning the local beach".to_string(),
        location: "City Beach".to_string(),
        date: None,
        time: None,
        coordinator: None,
        participants: participants.iter().map(|member| id(member)).collect(),
        capacity: None,
        duties: vec!["Cleaning".to_string()],
    }
}

pub(super) fn at(day: NaiveDate, hour: u32, minute: u32) -> NaiveDateTime {
    day.and_hms_opt(hour, minute, 0).expect("valid time")
}
