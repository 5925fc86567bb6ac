use chrono::Duration;

use super::common::*;
use crate::access::AccessError;
use crate::workflows::roster::domain::MemberStatus;
use crate::workflows::tasks::repository::TaskRepository;
use crate::workflows::tasks::{
    AssignmentMethod, DueState, TaskFilter, TaskId, TaskPriority, TaskServiceError, TaskStatus,
};

#[test]
fn smart_match_assigns_top_volunteer_and_marks_pending() {
    let (service, _) = build_service();

    let creation = service
        .create(&context("admin001"), draft("Technology", AssignmentMethod::SmartMatch))
        .expect("task created");

    assert_eq!(creation.task.assigned_to, Some(id("vol001")));
    assert_eq!(creation.task.status, TaskStatus::Pending);
    assert_eq!(creation.task.domain, "technology");
    assert_eq!(creation.task.due_date, today() + Duration::days(7));
    assert_eq!(creation.task.created_by, id("admin001"));

    let outcome = creation.match_outcome.expect("smart match ran");
    assert_eq!(outcome.candidates.len(), 2, "admins are never candidates");
    assert_eq!(outcome.candidates[0].total_score, 17);
    assert_eq!(outcome.candidates[1].volunteer_id, id("vol002"));
    assert_eq!(outcome.candidates[1].total_score, 5);
}

#[test]
fn smart_match_without_positive_score_leaves_task_unassigned() {
    let mut members = sample_members();
    for member in members.iter_mut().filter(|member| member.is_volunteer()) {
        member.status = MemberStatus::Inactive;
    }
    let (service, _) = build_service_with(members, Vec::new());

    let creation = service
        .create(&context("admin001"), draft("technology", AssignmentMethod::SmartMatch))
        .expect("task created");

    assert_eq!(creation.task.assigned_to, None);
    assert_eq!(creation.task.status, TaskStatus::Unassigned);
    assert!(creation
        .match_outcome
        .expect("smart match ran")
        .candidates
        .iter()
        .all(|candidate| candidate.total_score <= -98));
}

#[test]
fn open_workload_steers_assignment_to_less_loaded_volunteer() {
    let mut members = sample_members();
    members.push(volunteer(
        "vol003",
        "Ravi Kumar",
        &["technology"],
        &["coding", "teaching"],
        false,
    ));
    let due = date(2025, 4, 20);
    let seeded = vec![
        task("task-a", Some("vol001"), TaskStatus::Pending, due, TaskPriority::Low),
        task("task-b", Some("vol001"), TaskStatus::InProgress, due, TaskPriority::Low),
        task("task-c", Some("vol003"), TaskStatus::Completed, due, TaskPriority::Low),
    ];
    let (service, _) = build_service_with(members, seeded);

    let creation = service
        .create(&context("admin001"), draft("technology", AssignmentMethod::SmartMatch))
        .expect("task created");

    assert_eq!(creation.task.assigned_to, Some(id("vol003")));
}

#[test]
fn manual_assignment_requires_a_volunteer() {
    let (service, _) = build_service();
    let admin = context("admin001");

    match service.create(
        &admin,
        draft(
            "management",
            AssignmentMethod::Manual {
                volunteer_id: id("admin001"),
            },
        ),
    ) {
        Err(TaskServiceError::UnknownVolunteer(member)) => assert_eq!(member, id("admin001")),
        other => panic!("expected unknown volunteer, got {other:?}"),
    }

    let creation = service
        .create(
            &admin,
            draft(
                "management",
                AssignmentMethod::Manual {
                    volunteer_id: id("vol002"),
                },
            ),
        )
        .expect("manual assignment succeeds");
    assert_eq!(creation.task.assigned_to, Some(id("vol002")));
    assert_eq!(creation.task.status, TaskStatus::Pending);
    assert!(creation.match_outcome.is_none());
}

#[test]
fn task_creation_validates_role_and_fields() {
    let (service, _) = build_service();

    match service.create(&context("vol001"), draft("technology", AssignmentMethod::Unassigned)) {
        Err(TaskServiceError::Access(AccessError::Forbidden { .. })) => {}
        other => panic!("expected forbidden, got {other:?}"),
    }

    let mut untitled = draft("technology", AssignmentMethod::Unassigned);
    untitled.title = String::new();
    match service.create(&context("admin001"), untitled) {
        Err(TaskServiceError::MissingField("title")) => {}
        other => panic!("expected missing title, got {other:?}"),
    }
}

#[test]
fn volunteers_advance_their_own_tasks_until_completed() {
    let seeded = vec![task(
        "task-1",
        Some("vol001"),
        TaskStatus::Pending,
        date(2025, 4, 10),
        TaskPriority::High,
    )];
    let (service, tasks) = build_service_with(sample_members(), seeded);
    let volunteer = context("vol001");
    let task_id = TaskId("task-1".to_string());

    let started = service.advance(&volunteer, &task_id).expect("start task");
    assert_eq!(started.status, TaskStatus::InProgress);
    let finished = service.advance(&volunteer, &task_id).expect("finish task");
    assert_eq!(finished.status, TaskStatus::Completed);

    let error = service
        .advance(&volunteer, &task_id)
        .expect_err("completed tasks stay completed for volunteers");
    assert_eq!(error.status_code(), axum::http::StatusCode::CONFLICT);
    assert_eq!(
        tasks.fetch(&task_id).expect("fetch").map(|task| task.status),
        Some(TaskStatus::Completed)
    );

    match service.advance(&context("vol002"), &task_id) {
        Err(TaskServiceError::Access(AccessError::Forbidden { .. })) => {}
        other => panic!("expected forbidden, got {other:?}"),
    }
}

#[test]
fn admin_cycle_reopens_completed_tasks() {
    let seeded = vec![task(
        "task-1",
        None,
        TaskStatus::Unassigned,
        date(2025, 4, 10),
        TaskPriority::Low,
    )];
    let (service, _) = build_service_with(sample_members(), seeded);
    let admin = context("admin001");
    let task_id = TaskId("task-1".to_string());

    let statuses: Vec<TaskStatus> = (0..5)
        .map(|_| service.advance(&admin, &task_id).expect("advance").status)
        .collect();

    assert_eq!(
        statuses,
        vec![
            TaskStatus::Pending,
            TaskStatus::InProgress,
            TaskStatus::Completed,
            TaskStatus::Pending,
            TaskStatus::InProgress,
        ]
    );
}

#[test]
fn reassignment_moves_between_unassigned_and_pending() {
    let seeded = vec![
        task("task-1", None, TaskStatus::Unassigned, date(2025, 4, 10), TaskPriority::Low),
        task(
            "task-2",
            Some("vol001"),
            TaskStatus::InProgress,
            date(2025, 4, 10),
            TaskPriority::Low,
        ),
    ];
    let (service, _) = build_service_with(sample_members(), seeded);
    let admin = context("admin001");

    let assigned = service
        .reassign(&admin, &TaskId("task-1".to_string()), Some(&id("vol002")))
        .expect("assign");
    assert_eq!(assigned.status, TaskStatus::Pending);

    let handed_over = service
        .reassign(&admin, &TaskId("task-2".to_string()), Some(&id("vol002")))
        .expect("hand over");
    assert_eq!(handed_over.status, TaskStatus::InProgress);
    assert_eq!(handed_over.assigned_to, Some(id("vol002")));

    let cleared = service
        .reassign(&admin, &TaskId("task-2".to_string()), None)
        .expect("clear");
    assert_eq!(cleared.status, TaskStatus::Unassigned);
    assert_eq!(cleared.assigned_to, None);
}

#[test]
fn list_sorts_by_due_date_then_priority() {
    let seeded = vec![
        task("late-low", None, TaskStatus::Unassigned, date(2025, 4, 20), TaskPriority::Low),
        task("soon-low", Some("vol001"), TaskStatus::Pending, date(2025, 4, 5), TaskPriority::Low),
        task(
            "soon-high",
            Some("vol002"),
            TaskStatus::Pending,
            date(2025, 4, 5),
            TaskPriority::High,
        ),
        task("mid-med", None, TaskStatus::Unassigned, date(2025, 4, 10), TaskPriority::Medium),
    ];
    let (service, _) = build_service_with(sample_members(), seeded);
    let admin = context("admin001");

    let all: Vec<String> = service
        .list(&admin, &TaskFilter::default())
        .expect("list")
        .into_iter()
        .map(|task| task.id.0)
        .collect();
    assert_eq!(all, vec!["soon-high", "soon-low", "mid-med", "late-low"]);

    let unassigned = service
        .list(
            &admin,
            &TaskFilter {
                status: Some(TaskStatus::Unassigned),
                ..TaskFilter::default()
            },
        )
        .expect("list");
    assert_eq!(unassigned.len(), 2);
    assert!(unassigned.iter().all(|task| task.assigned_to.is_none()));

    let high = service
        .list(
            &admin,
            &TaskFilter {
                priority: Some(TaskPriority::High),
                ..TaskFilter::default()
            },
        )
        .expect("list");
    assert_eq!(high.len(), 1);
}

#[test]
fn my_tasks_report_due_state() {
    let seeded = vec![
        task("overdue", Some("vol001"), TaskStatus::Pending, date(2025, 3, 29), TaskPriority::Low),
        task("today", Some("vol001"), TaskStatus::InProgress, today(), TaskPriority::Low),
        task("later", Some("vol001"), TaskStatus::Pending, date(2025, 4, 6), TaskPriority::Low),
        task("theirs", Some("vol002"), TaskStatus::Pending, today(), TaskPriority::Low),
    ];
    let (service, _) = build_service_with(sample_members(), seeded);

    let views = service.my_tasks(&context("vol001"), None).expect("my tasks");
    let states: Vec<DueState> = views.iter().map(|view| view.due).collect();
    assert_eq!(
        states,
        vec![
            DueState::Overdue { days: 3 },
            DueState::DueToday,
            DueState::DueIn { days: 5 },
        ]
    );

    let pending = service
        .my_tasks(&context("vol001"), Some(TaskStatus::Pending))
        .expect("my tasks");
    assert_eq!(pending.len(), 2);
}

#[test]
fn recommendations_do_not_persist_assignments() {
    let seeded = vec![task(
        "task-1",
        None,
        TaskStatus::Unassigned,
        date(2025, 4, 10),
        TaskPriority::Low,
    )];
    let (service, tasks) = build_service_with(sample_members(), seeded);
    let task_id = TaskId("task-1".to_string());

    let outcome = service
        .recommendations(&context("admin001"), &task_id)
        .expect("recommendations");

    assert_eq!(outcome.recommended, Some(id("vol001")));
    assert_eq!(
        tasks.fetch(&task_id).expect("fetch").and_then(|task| task.assigned_to),
        None
    );
}
