use serde::{Deserialize, Serialize};

use super::snapshot::Snapshot;
use crate::access::Actor;
use crate::workflows::events::domain::{Event, EventStatus};
use crate::workflows::ideas::domain::{sort_newest_first, Idea};
use crate::workflows::roster::domain::MemberId;
use crate::workflows::tasks::domain::{sort_by_due, Task, TaskDueView};

const RECENT_LIMIT: usize = 3;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DashboardTotals {
    pub total_members: usize,
    pub active_tasks: usize,
    pub upcoming_events: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BirthdayEntry {
    pub member_id: MemberId,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IdeaDigest {
    #[serde(flatten)]
    pub idea: Idea,
    pub submitter: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AdminView {
    pub birthdays_today: Vec<BirthdayEntry>,
    pub recent_tasks: Vec<Task>,
    pub recent_ideas: Vec<IdeaDigest>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VolunteerView {
    pub open_tasks: Vec<TaskDueView>,
    pub upcoming_events: Vec<Event>,
    pub ideas: Vec<Idea>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "role", rename_all = "snake_case")]
pub enum RoleView {
    Admin(AdminView),
    Volunteer(VolunteerView),
}

/// Landing-page summary: shared totals plus a role-specific panel.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DashboardSummary {
    pub totals: DashboardTotals,
    #[serde(flatten)]
    pub view: RoleView,
}

impl DashboardSummary {
    pub fn build(actor: &Actor, snapshot: &Snapshot) -> Self {
        let totals = DashboardTotals {
            total_members: snapshot.members.len(),
            active_tasks: snapshot
                .tasks
                .iter()
                .filter(|task| task.status.is_open())
                .count(),
            upcoming_events: snapshot
                .events
                .iter()
                .filter(|event| event.status == EventStatus::Upcoming)
                .count(),
        };

        let view = if actor.is_admin() {
            RoleView::Admin(admin_view(actor, snapshot))
        } else {
            RoleView::Volunteer(volunteer_view(actor, snapshot))
        };

        Self { totals, view }
    }
}

fn admin_view(actor: &Actor, snapshot: &Snapshot) -> AdminView {
    let birthdays_today = snapshot
        .members
        .iter()
        .filter(|member| member.has_birthday_on(actor.today))
        .map(|member| BirthdayEntry {
            member_id: member.id.clone(),
            name: member.name.clone(),
        })
        .collect();

    let mut recent_tasks = snapshot.tasks.clone();
    recent_tasks.reverse();
    recent_tasks.sort_by(|left, right| right.created_date.cmp(&left.created_date));
    recent_tasks.truncate(RECENT_LIMIT);

    let mut ideas = snapshot.ideas.clone();
    sort_newest_first(&mut ideas);
    let recent_ideas = ideas
        .into_iter()
        .take(RECENT_LIMIT)
        .map(|idea| IdeaDigest {
            submitter: snapshot.member_name(&idea.submitted_by).map(str::to_string),
            idea,
        })
        .collect();

    AdminView {
        birthdays_today,
        recent_tasks,
        recent_ideas,
    }
}

fn volunteer_view(actor: &Actor, snapshot: &Snapshot) -> VolunteerView {
    let mut tasks: Vec<Task> = snapshot
        .tasks
        .iter()
        .filter(|task| task.is_assigned_to(&actor.id) && task.status.is_open())
        .cloned()
        .collect();
    sort_by_due(&mut tasks);
    let open_tasks = tasks
        .into_iter()
        .map(|task| TaskDueView {
            due: task.due_state(actor.today),
            task,
        })
        .collect();

    let mut upcoming_events: Vec<Event> = snapshot
        .events
        .iter()
        .filter(|event| event.date >= actor.today && event.has_participant(&actor.id))
        .cloned()
        .collect();
    upcoming_events.sort_by(|left, right| left.date.cmp(&right.date));

    let mut ideas: Vec<Idea> = snapshot
        .ideas
        .iter()
        .filter(|idea| idea.submitted_by == actor.id)
        .cloned()
        .collect();
    sort_newest_first(&mut ideas);

    VolunteerView {
        open_tasks,
        upcoming_events,
        ideas,
    }
}
