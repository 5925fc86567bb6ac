use crate::workflows::events::domain::{AttendanceRecord, Event};
use crate::workflows::ideas::domain::Idea;
use crate::workflows::roster::domain::{Member, MemberId};
use crate::workflows::tasks::domain::Task;

/// Point-in-time copy of every store, taken once per dashboard request.
#[derive(Debug, Clone, Default)]
pub struct Snapshot {
    pub members: Vec<Member>,
    pub tasks: Vec<Task>,
    pub events: Vec<Event>,
    pub attendance: Vec<AttendanceRecord>,
    pub ideas: Vec<Idea>,
}

impl Snapshot {
    pub fn member_name(&self, id: &MemberId) -> Option<&str> {
        self.members
            .iter()
            .find(|member| &member.id == id)
            .map(|member| member.name.as_str())
    }
}
