use super::domain::{AttendanceRecord, Event, EventId};
use crate::storage::RepositoryError;
use crate::workflows::roster::domain::MemberId;

/// Storage abstraction for events and their attendance records.
pub trait EventRepository: Send + Sync {
    fn insert(&self, event: Event) -> Result<Event, RepositoryError>;
    fn update(&self, event: Event) -> Result<(), RepositoryError>;
    fn fetch(&self, id: &EventId) -> Result<Option<Event>, RepositoryError>;
    fn list(&self) -> Result<Vec<Event>, RepositoryError>;

    fn insert_attendance(
        &self,
        record: AttendanceRecord,
    ) -> Result<AttendanceRecord, RepositoryError>;
    fn update_attendance(&self, record: AttendanceRecord) -> Result<(), RepositoryError>;
    fn find_attendance(
        &self,
        event: &EventId,
        member: &MemberId,
    ) -> Result<Option<AttendanceRecord>, RepositoryError>;
    /// Drop a member's attendance for an event, returning the removed record if any.
    fn remove_attendance(
        &self,
        event: &EventId,
        member: &MemberId,
    ) -> Result<Option<AttendanceRecord>, RepositoryError>;
    /// Attendance for one event, or every record when `event` is `None`.
    fn attendance(&self, event: Option<&EventId>) -> Result<Vec<AttendanceRecord>, RepositoryError>;
}
