use crate::infra::{load_match_config, Services, Stores};
use chrono::{Local, NaiveDate, NaiveTime};
use clap::Args;
use std::path::PathBuf;
use volunteer_hub::access::RequestContext;
use volunteer_hub::config::MatchingConfig;
use volunteer_hub::error::AppError;
use volunteer_hub::workflows::dashboard::RoleView;
use volunteer_hub::workflows::events::{
    AttendanceId, AttendanceRecord, AttendanceStatus, Event, EventId, EventStatus,
};
use volunteer_hub::workflows::ideas::{Idea, IdeaId, IdeaStatus};
use volunteer_hub::workflows::import::{RosterImporter, TaskImporter};
use volunteer_hub::workflows::matching::{
    MatchEngine, MatchOutcome, MatchRequest, OpenTaskCounts, VolunteerProfile,
};
use volunteer_hub::workflows::roster::{Member, MemberId, MemberStatus, Role};
use volunteer_hub::workflows::tasks::{
    AssignmentMethod, Task, TaskDraft, TaskId, TaskPriority, TaskStatus,
};

#[derive(Args, Debug)]
pub(crate) struct MatchArgs {
    /// Member export (users.csv) to rank volunteers from
    #[arg(long)]
    pub(crate) roster: PathBuf,
    /// Optional task export used to weigh each volunteer's open workload
    #[arg(long)]
    pub(crate) tasks: Option<PathBuf>,
    /// Task domain to match against
    #[arg(long)]
    pub(crate) domain: String,
    /// Task priority (low, medium, high). Recorded only; it does not change the ranking.
    #[arg(long, value_parser = crate::infra::parse_priority, default_value = "medium")]
    pub(crate) priority: TaskPriority,
    /// Optional `domain,skill` CSV replacing the standard relevance table
    #[arg(long)]
    pub(crate) relevance_csv: Option<PathBuf>,
    /// Cap on open tasks counted against a volunteer
    #[arg(long, default_value_t = MatchingConfig::DEFAULT_WORKLOAD_CAP)]
    pub(crate) workload_cap: u32,
}

#[derive(Args, Debug)]
pub(crate) struct DemoArgs {
    /// Override the demo date (YYYY-MM-DD). Defaults to today.
    #[arg(long, value_parser = crate::infra::parse_date)]
    pub(crate) today: Option<NaiveDate>,
    /// Domain of the task created during the demo.
    #[arg(long, default_value = "social media")]
    pub(crate) domain: String,
}

pub(crate) fn run_match(args: MatchArgs) -> Result<(), AppError> {
    let MatchArgs {
        roster,
        tasks,
        domain,
        priority,
        relevance_csv,
        workload_cap,
    } = args;

    let members = RosterImporter::from_path(roster)?;
    let tasks = match tasks {
        Some(path) => TaskImporter::from_path(path)?,
        None => Vec::new(),
    };
    let config = load_match_config(&MatchingConfig {
        relevance_csv,
        workload_cap,
    })?;

    let volunteers: Vec<VolunteerProfile> = members
        .iter()
        .filter(|member| member.is_volunteer())
        .map(Member::volunteer_profile)
        .collect();
    let workload = OpenTaskCounts::from_tasks(&tasks);
    let outcome = MatchEngine::new(config).select(
        &volunteers,
        &MatchRequest::new(&domain, priority),
        &workload,
    );

    render_outcome(&outcome, &members);
    Ok(())
}

pub(crate) fn run_demo(args: DemoArgs) -> Result<(), AppError> {
    let today = args.today.unwrap_or_else(|| Local::now().date_naive());
    let stores = sample_stores();
    let services = Services::new(&stores, MatchEngine::default());
    let admin = RequestContext::new("admin001", today);

    println!("Volunteer hub demo ({today})");

    match services.dashboard.summary(&admin) {
        Ok(summary) => {
            println!(
                "- {} members | {} active tasks | {} upcoming events",
                summary.totals.total_members,
                summary.totals.active_tasks,
                summary.totals.upcoming_events
            );
            if let RoleView::Admin(view) = summary.view {
                for entry in view.birthdays_today {
                    println!("  Birthday today: {}", entry.name);
                }
            }
        }
        Err(err) => println!("  Dashboard unavailable: {err}"),
    }

    let draft = TaskDraft {
        title: "Beach Cleanup Promotion".to_string(),
        description: "Spread the word about the weekend beach cleanup".to_string(),
        domain: args.domain,
        priority: TaskPriority::High,
        due_date: None,
        assignment: AssignmentMethod::SmartMatch,
    };
    let creation = match services.tasks.create(&admin, draft) {
        Ok(creation) => creation,
        Err(err) => {
            println!("  Task creation rejected: {err}");
            return Ok(());
        }
    };

    println!(
        "\nCreated {} '{}' (due {}) -> status {}",
        creation.task.id,
        creation.task.title,
        creation.task.due_date,
        creation.task.status.label()
    );
    let members = match roster_snapshot(&services, &admin) {
        Some(members) => members,
        None => return Ok(()),
    };
    if let Some(outcome) = &creation.match_outcome {
        render_outcome(outcome, &members);
    }

    if let Some(assignee) = &creation.task.assigned_to {
        let volunteer = RequestContext::new(assignee.as_str(), today);
        match services.tasks.my_tasks(&volunteer, None) {
            Ok(views) => {
                println!("\nOpen tasks for {assignee}");
                for view in views {
                    println!(
                        "- {} [{}] {:?}",
                        view.task.title,
                        view.task.status.label(),
                        view.due
                    );
                }
            }
            Err(err) => println!("  Task list unavailable: {err}"),
        }
    }

    Ok(())
}

fn roster_snapshot(services: &Services, admin: &RequestContext) -> Option<Vec<Member>> {
    match services.roster.list(admin, &Default::default()) {
        Ok(members) => Some(members),
        Err(err) => {
            println!("  Roster unavailable: {err}");
            None
        }
    }
}

fn render_outcome(outcome: &MatchOutcome, members: &[Member]) {
    let name_of = |id: &MemberId| {
        members
            .iter()
            .find(|member| &member.id == id)
            .map(|member| member.name.as_str())
            .unwrap_or("unknown")
    };

    println!(
        "\nMatch for domain '{}' (priority {})",
        outcome.domain,
        outcome.priority.label()
    );
    if outcome.candidates.is_empty() {
        println!("Candidates: none");
    }
    for candidate in &outcome.candidates {
        println!(
            "- {} {}: {}",
            candidate.volunteer_id,
            name_of(&candidate.volunteer_id),
            candidate.total_score
        );
        for component in &candidate.components {
            println!(
                "    - {:?}: {:+} ({})",
                component.factor, component.score, component.notes
            );
        }
    }

    match &outcome.recommended {
        Some(id) => println!("Recommended: {} ({})", id, name_of(id)),
        None => println!("Recommended: none (no candidate scored above zero)"),
    }
}

fn day(year: i32, month: u32, day_of_month: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day_of_month).unwrap_or_default()
}

fn at(hour: u32) -> NaiveTime {
    NaiveTime::from_hms_opt(hour, 0, 0).unwrap_or(NaiveTime::MIN)
}

fn tags(values: &[&str]) -> Vec<String> {
    values.iter().map(|value| value.to_string()).collect()
}

fn member_id(value: &str) -> MemberId {
    MemberId(value.to_string())
}

struct SampleMember {
    id: &'static str,
    username: &'static str,
    role: Role,
    name: &'static str,
    email: &'static str,
    phone: &'static str,
    skills: &'static [&'static str],
    domains: &'static [&'static str],
    availability: &'static [&'static str],
    verified: bool,
    joined: (i32, u32, u32),
    birthday: (i32, u32, u32),
}

const SAMPLE_MEMBERS: [SampleMember; 3] = [
    SampleMember {
        id: "admin001",
        username: "admin",
        role: Role::Admin,
        name: "Admin User",
        email: "admin@ngo.org",
        phone: "9876543210",
        skills: &["management"],
        domains: &["management"],
        availability: &["weekdays"],
        verified: true,
        joined: (2023, 1, 1),
        birthday: (1990, 5, 15),
    },
    SampleMember {
        id: "vol001",
        username: "john_doe",
        role: Role::Volunteer,
        name: "John Doe",
        email: "john@example.com",
        phone: "9876543211",
        skills: &["teaching", "coding"],
        domains: &["education", "technology"],
        availability: &["weekends"],
        verified: false,
        joined: (2023, 2, 15),
        birthday: (1995, 7, 22),
    },
    SampleMember {
        id: "vol002",
        username: "jane_smith",
        role: Role::Volunteer,
        name: "Jane Smith",
        email: "jane@example.com",
        phone: "9876543212",
        skills: &["design", "social media"],
        domains: &["creative", "social media"],
        availability: &["evenings"],
        verified: true,
        joined: (2023, 3, 20),
        birthday: (1992, 11, 30),
    },
];

fn sample_members() -> Vec<Member> {
    SAMPLE_MEMBERS
        .iter()
        .map(|sample| Member {
            id: member_id(sample.id),
            username: sample.username.to_string(),
            name: sample.name.to_string(),
            email: sample.email.to_string(),
            phone: sample.phone.to_string(),
            role: sample.role,
            skills: tags(sample.skills),
            domains: tags(sample.domains),
            availability: tags(sample.availability),
            verified: sample.verified,
            status: MemberStatus::Active,
            join_date: day(sample.joined.0, sample.joined.1, sample.joined.2),
            birthday: Some(day(sample.birthday.0, sample.birthday.1, sample.birthday.2)),
        })
        .collect()
}

fn sample_tasks() -> Vec<Task> {
    [
        (
            "task001",
            "Website Update",
            "Update the NGO website with recent activities",
            Some("vol001"),
            TaskStatus::InProgress,
            day(2025, 4, 15),
            "technology",
            TaskPriority::Medium,
            day(2025, 3, 20),
        ),
        (
            "task002",
            "Social Media Campaign",
            "Create posts for Facebook and Instagram",
            Some("vol002"),
            TaskStatus::Pending,
            day(2025, 4, 10),
            "social media",
            TaskPriority::High,
            day(2025, 3, 22),
        ),
        (
            "task003",
            "Community Outreach",
            "Organize community awareness program",
            None,
            TaskStatus::Unassigned,
            day(2025, 4, 20),
            "on-ground",
            TaskPriority::Low,
            day(2025, 3, 23),
        ),
    ]
    .into_iter()
    .map(
        |(id, title, description, assigned_to, status, due_date, domain, priority, created)| Task {
            id: TaskId(id.to_string()),
            title: title.to_string(),
            description: description.to_string(),
            domain: domain.to_string(),
            priority,
            assigned_to: assigned_to.map(member_id),
            status,
            due_date,
            created_by: member_id("admin001"),
            created_date: created,
        },
    )
    .collect()
}

fn sample_events() -> Vec<Event> {
    vec![
        Event {
            id: EventId("evt001".to_string()),
            title: "Annual Fundraiser".to_string(),
            description: "Annual fundraising event for the NGO".to_string(),
            date: day(2025, 5, 15),
            time: at(18),
            location: "Community Hall, City Center".to_string(),
            coordinator: member_id("admin001"),
            participants: vec![member_id("vol001"), member_id("vol002")],
            capacity: None,
            status: EventStatus::Upcoming,
            created_by: member_id("admin001"),
            created_date: day(2025, 3, 15),
        },
        Event {
            id: EventId("evt002".to_string()),
            title: "Community Workshop".to_string(),
            description: "Workshop on environmental awareness".to_string(),
            date: day(2025, 4, 25),
            time: at(10),
            location: "Public Park, West Side".to_string(),
            coordinator: member_id("vol002"),
            participants: vec![member_id("vol001")],
            capacity: None,
            status: EventStatus::Upcoming,
            created_by: member_id("admin001"),
            created_date: day(2025, 3, 18),
        },
    ]
}

fn sample_attendance() -> Vec<AttendanceRecord> {
    [
        ("att001", "vol001", &["registration", "setup"][..]),
        ("att002", "vol002", &["social media coverage"][..]),
    ]
    .into_iter()
    .map(|(id, member, duties)| AttendanceRecord {
        id: AttendanceId(id.to_string()),
        event_id: EventId("evt001".to_string()),
        member_id: member_id(member),
        status: AttendanceStatus::Confirmed,
        check_in: None,
        check_out: None,
        duties: tags(duties),
    })
    .collect()
}

fn sample_ideas() -> Vec<Idea> {
    vec![
        Idea {
            id: IdeaId("idea001".to_string()),
            title: "Online Donation Platform".to_string(),
            description: "Create an online platform for donations".to_string(),
            submitted_by: member_id("vol001"),
            status: IdeaStatus::UnderReview,
            submission_date: day(2025, 3, 10),
            comments: Some("Sounds promising".to_string()),
            upvotes: 0,
        },
        Idea {
            id: IdeaId("idea002".to_string()),
            title: "Monthly Newsletter".to_string(),
            description: "Start a monthly newsletter for supporters".to_string(),
            submitted_by: member_id("vol002"),
            status: IdeaStatus::Approved,
            submission_date: day(2025, 3, 5),
            comments: Some("Great idea, will implement".to_string()),
            upvotes: 0,
        },
    ]
}

/// Stores seeded with the sample organization: one admin, two volunteers, and their
/// tasks, events, attendance and ideas.
pub(crate) fn sample_stores() -> Stores {
    Stores::from_records(
        sample_members(),
        sample_tasks(),
        sample_events(),
        sample_attendance(),
        sample_ideas(),
    )
}
