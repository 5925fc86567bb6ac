use chrono::{Duration, NaiveTime};

use super::common::*;
use crate::access::AccessError;
use crate::workflows::events::repository::EventRepository;
use crate::workflows::events::{
    AttendanceStatus, EventPeriod, EventQuery, EventServiceError, EventStatus, EventTimeline,
};

#[test]
fn create_applies_defaults_and_confirms_participants() {
    let (service, repository) = build_service();

    let created = service
        .create(&context("admin001"), draft(&["vol001", "vol002", "vol001"]))
        .expect("event created");

    assert_eq!(created.date, today() + Duration::days(14));
    assert_eq!(created.time, NaiveTime::from_hms_opt(9, 0, 0).expect("valid time"));
    assert_eq!(created.coordinator, id("admin001"));
    assert_eq!(created.participants, vec![id("vol001"), id("vol002")]);
    assert_eq!(created.status, EventStatus::Upcoming);

    let attendance = repository.attendance(Some(&created.id)).expect("attendance");
    assert_eq!(attendance.len(), 2);
    assert!(attendance
        .iter()
        .all(|record| record.status == AttendanceStatus::Confirmed
            && record.duties == vec!["cleaning".to_string()]));
}

#[test]
fn create_rejects_admin_participants_and_overbooking() {
    let (service, _) = build_service();
    let admin = context("admin001");

    match service.create(&admin, draft(&["admin001"])) {
        Err(EventServiceError::UnknownVolunteer(member)) => assert_eq!(member, id("admin001")),
        other => panic!("expected unknown volunteer, got {other:?}"),
    }

    let mut tight = draft(&["vol001", "vol002"]);
    tight.capacity = Some(1);
    match service.create(&admin, tight) {
        Err(EventServiceError::EventFull) => {}
        other => panic!("expected full event, got {other:?}"),
    }

    match service.create(&context("vol001"), draft(&[])) {
        Err(EventServiceError::Access(AccessError::Forbidden { .. })) => {}
        other => panic!("expected forbidden, got {other:?}"),
    }
}

#[test]
fn volunteers_see_their_events_plus_open_upcoming_ones() {
    let mut cancelled = event("evt-cancelled", date(2025, 4, 20), &[]);
    cancelled.status = EventStatus::Cancelled;
    let mut coordinated = event("evt-coordinated", date(2025, 3, 2), &[]);
    coordinated.coordinator = id("vol001");
    let events = vec![
        event("evt-past-joined", date(2025, 3, 10), &["vol001"]),
        event("evt-past-other", date(2025, 3, 11), &["vol002"]),
        event("evt-upcoming", date(2025, 4, 15), &[]),
        cancelled,
        coordinated,
    ];
    let (service, _) = build_service_with(events);

    let visible: Vec<String> = service
        .list(&context("vol001"), &EventQuery::default())
        .expect("list")
        .into_iter()
        .map(|event| event.id.0)
        .collect();
    assert_eq!(
        visible,
        vec!["evt-coordinated", "evt-past-joined", "evt-upcoming"]
    );

    let everything = service
        .list(&context("admin001"), &EventQuery::default())
        .expect("list");
    assert_eq!(everything.len(), 5);
}

#[test]
fn list_filters_by_timeline_and_period() {
    let events = vec![
        event("evt-yesterday", date(2025, 3, 31), &[]),
        event("evt-today", today(), &[]),
        event("evt-this-week", date(2025, 4, 6), &[]),
        event("evt-next-month", date(2025, 5, 3), &[]),
    ];
    let (service, _) = build_service_with(events);
    let admin = context("admin001");

    let ids = |query: EventQuery| -> Vec<String> {
        service
            .list(&admin, &query)
            .expect("list")
            .into_iter()
            .map(|event| event.id.0)
            .collect()
    };

    assert_eq!(
        ids(EventQuery {
            timeline: Some(EventTimeline::Past),
            period: None,
        }),
        vec!["evt-yesterday"]
    );
    assert_eq!(
        ids(EventQuery {
            timeline: Some(EventTimeline::Ongoing),
            period: None,
        }),
        vec!["evt-today"]
    );
    // 2025-04-01 is a Tuesday, so this week spans March 31 to April 6.
    assert_eq!(
        ids(EventQuery {
            timeline: None,
            period: Some(EventPeriod::ThisWeek),
        }),
        vec!["evt-yesterday", "evt-today", "evt-this-week"]
    );
    assert_eq!(
        ids(EventQuery {
            timeline: Some(EventTimeline::Upcoming),
            period: Some(EventPeriod::NextMonth),
        }),
        vec!["evt-next-month"]
    );
}

#[test]
fn registration_guards_status_duplicates_and_capacity() {
    let mut closed = event("evt-closed", date(2025, 4, 10), &[]);
    closed.status = EventStatus::Completed;
    let mut small = event("evt-small", date(2025, 4, 10), &["vol002"]);
    small.capacity = Some(1);
    let events = vec![event("evt-open", date(2025, 4, 10), &[]), closed, small];
    let (service, repository) = build_service_with(events);
    let volunteer = context("vol001");

    let joined = service
        .register(&volunteer, &event_id("evt-open"))
        .expect("registration succeeds");
    assert_eq!(joined.participants, vec![id("vol001")]);
    assert!(repository
        .find_attendance(&event_id("evt-open"), &id("vol001"))
        .expect("lookup")
        .is_some());

    assert!(matches!(
        service.register(&volunteer, &event_id("evt-open")),
        Err(EventServiceError::AlreadyRegistered)
    ));
    assert!(matches!(
        service.register(&volunteer, &event_id("evt-closed")),
        Err(EventServiceError::Closed)
    ));
    assert!(matches!(
        service.register(&volunteer, &event_id("evt-small")),
        Err(EventServiceError::EventFull)
    ));
}

#[test]
fn attendance_moves_from_confirmed_through_check_out() {
    let (service, _) = build_service();
    let admin = context("admin001");
    let created = service
        .create(&admin, draft(&["vol001"]))
        .expect("event created");
    let volunteer = context("vol001");
    let day = created.date;

    match service.check_out(&volunteer, &created.id, &id("vol001"), at(day, 12, 0)) {
        Err(EventServiceError::AttendanceOrder(_)) => {}
        other => panic!("expected ordering error, got {other:?}"),
    }

    let checked_in = service
        .check_in(&volunteer, &created.id, &id("vol001"), at(day, 9, 5))
        .expect("check in");
    assert_eq!(checked_in.status, AttendanceStatus::CheckedIn);

    assert!(matches!(
        service.check_in(&volunteer, &created.id, &id("vol001"), at(day, 9, 10)),
        Err(EventServiceError::AttendanceOrder(_))
    ));
    assert!(matches!(
        service.check_out(&volunteer, &created.id, &id("vol001"), at(day, 8, 0)),
        Err(EventServiceError::AttendanceOrder(_))
    ));

    let checked_out = service
        .check_out(&volunteer, &created.id, &id("vol001"), at(day, 13, 30))
        .expect("check out");
    assert_eq!(checked_out.status, AttendanceStatus::CheckedOut);
    assert_eq!(checked_out.check_in, Some(at(day, 9, 5)));
    assert_eq!(checked_out.check_out, Some(at(day, 13, 30)));
}

#[test]
fn attendance_is_scoped_to_self_or_admin() {
    let (service, _) = build_service();
    let created = service
        .create(&context("admin001"), draft(&["vol001"]))
        .expect("event created");
    let day = created.date;

    match service.check_in(&context("vol002"), &created.id, &id("vol001"), at(day, 9, 0)) {
        Err(EventServiceError::Access(AccessError::Forbidden { .. })) => {}
        other => panic!("expected forbidden, got {other:?}"),
    }
    match service.check_in(&context("vol002"), &created.id, &id("vol002"), at(day, 9, 0)) {
        Err(EventServiceError::NotRegistered(member)) => assert_eq!(member, id("vol002")),
        other => panic!("expected not registered, got {other:?}"),
    }

    service
        .check_in(&context("admin001"), &created.id, &id("vol001"), at(day, 9, 0))
        .expect("admins record attendance for volunteers");
}

#[test]
fn replacing_participants_confirms_new_and_drops_removed_members() {
    let (service, repository) = build_service();
    let admin = context("admin001");
    let created = service
        .create(&admin, draft(&["vol001"]))
        .expect("event created");

    let updated = service
        .set_participants(&admin, &created.id, &[id("vol002")])
        .expect("participants replaced");
    assert_eq!(updated.participants, vec![id("vol002")]);

    let records = repository.attendance(Some(&created.id)).expect("attendance");
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].member_id, id("vol002"));
    assert_eq!(records[0].status, AttendanceStatus::Confirmed);
    assert!(records[0].duties.is_empty());

    match service.check_in(
        &context("vol001"),
        &created.id,
        &id("vol001"),
        at(created.date, 9, 0),
    ) {
        Err(EventServiceError::NotRegistered(member)) => assert_eq!(member, id("vol001")),
        other => panic!("expected removed participant to be unregistered, got {other:?}"),
    }
}

#[test]
fn clearing_participants_blocks_attendance() {
    let (service, repository) = build_service();
    let admin = context("admin001");
    let created = service
        .create(&admin, draft(&["vol001"]))
        .expect("event created");

    let cleared = service
        .set_participants(&admin, &created.id, &[])
        .expect("participants cleared");
    assert!(cleared.participants.is_empty());
    assert!(repository
        .attendance(Some(&created.id))
        .expect("attendance")
        .is_empty());

    assert!(matches!(
        service.check_in(&admin, &created.id, &id("vol001"), at(created.date, 9, 0)),
        Err(EventServiceError::NotRegistered(_))
    ));
}

#[test]
fn cancel_and_toggle_update_status() {
    let (service, _) = build_service_with(vec![event("evt-1", date(2025, 4, 10), &[])]);
    let admin = context("admin001");

    let completed = service
        .toggle_status(&admin, &event_id("evt-1"))
        .expect("toggle");
    assert_eq!(completed.status, EventStatus::Completed);

    let cancelled = service.cancel(&admin, &event_id("evt-1")).expect("cancel");
    assert_eq!(cancelled.status, EventStatus::Cancelled);

    let reopened = service
        .toggle_status(&admin, &event_id("evt-1"))
        .expect("toggle");
    assert_eq!(reopened.status, EventStatus::Upcoming);
}
