//! Events: scheduling, participation, and attendance.

pub mod domain;
pub mod repository;
pub mod router;
pub mod service;

#[cfg(test)]
mod tests;

pub use domain::{
    AttendanceId, AttendanceMark, AttendanceRecord, AttendanceStatus, Event, EventDraft, EventId,
    EventPeriod, EventQuery, EventStatus, EventTimeline, ParticipantsUpdate,
};
pub use repository::EventRepository;
pub use router::event_router;
pub use service::{EventService, EventServiceError};
