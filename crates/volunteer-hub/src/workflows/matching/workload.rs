use std::collections::HashMap;

use crate::workflows::roster::domain::MemberId;
use crate::workflows::tasks::domain::Task;

/// Capability reporting how many open assignments a volunteer already carries.
pub trait WorkloadLookup {
    fn open_assignments(&self, volunteer: &MemberId) -> u32;
}

/// Lookup that treats every volunteer as idle.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoWorkload;

impl WorkloadLookup for NoWorkload {
    fn open_assignments(&self, _volunteer: &MemberId) -> u32 {
        0
    }
}

/// Counts of non-completed tasks per assignee.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OpenTaskCounts {
    counts: HashMap<MemberId, u32>,
}

impl OpenTaskCounts {
    pub fn from_tasks<'a, I>(tasks: I) -> Self
    where
        I: IntoIterator<Item = &'a Task>,
    {
        let mut counts = HashMap::new();
        for task in tasks {
            if !task.status.is_open() {
                continue;
            }
            if let Some(assignee) = &task.assigned_to {
                *counts.entry(assignee.clone()).or_insert(0) += 1;
            }
        }
        Self { counts }
    }

    pub fn set(&mut self, volunteer: MemberId, open: u32) {
        self.counts.insert(volunteer, open);
    }
}

impl WorkloadLookup for OpenTaskCounts {
    fn open_assignments(&self, volunteer: &MemberId) -> u32 {
        self.counts.get(volunteer).copied().unwrap_or(0)
    }
}

impl WorkloadLookup for HashMap<MemberId, u32> {
    fn open_assignments(&self, volunteer: &MemberId) -> u32 {
        self.get(volunteer).copied().unwrap_or(0)
    }
}
