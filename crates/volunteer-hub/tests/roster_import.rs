use chrono::NaiveDate;
use volunteer_hub::workflows::import::{ImportError, RosterImporter, TaskImporter};
use volunteer_hub::workflows::matching::{
    match_volunteer, MatchEngine, MatchFactor, MatchRequest, NoWorkload, OpenTaskCounts,
    VolunteerProfile,
};
use volunteer_hub::workflows::roster::{Member, MemberId, MemberStatus};
use volunteer_hub::workflows::tasks::{TaskPriority, TaskStatus};

fn roster() -> Vec<Member> {
    let data = include_bytes!("../data/users.csv");
    RosterImporter::from_reader(&data[..]).expect("roster export imports")
}

fn volunteers(members: &[Member]) -> Vec<VolunteerProfile> {
    members
        .iter()
        .filter(|member| member.is_volunteer())
        .map(Member::volunteer_profile)
        .collect()
}

fn workload() -> OpenTaskCounts {
    let data = include_bytes!("../data/tasks.csv");
    let tasks = TaskImporter::from_reader(&data[..]).expect("task export imports");
    OpenTaskCounts::from_tasks(&tasks)
}

fn id(value: &str) -> MemberId {
    MemberId(value.to_string())
}

#[test]
fn roster_export_maps_flags_tags_and_dates() {
    let members = roster();
    assert_eq!(members.len(), 6);

    let arjun = members
        .iter()
        .find(|member| member.id == id("vol005"))
        .expect("vol005 present");
    assert!(arjun.verified, "'yes' counts as verified");
    assert_eq!(arjun.availability, vec!["weekdays", "evenings"]);
    assert!(arjun.birthday.is_none());

    let meera = members
        .iter()
        .find(|member| member.id == id("vol004"))
        .expect("vol004 present");
    assert_eq!(meera.status, MemberStatus::Inactive);
    assert!(meera.availability.is_empty());
    assert_eq!(
        meera.join_date,
        NaiveDate::from_ymd_opt(2023, 5, 11).expect("valid date")
    );
}

#[test]
fn task_export_normalizes_domain_and_status() {
    let data = include_bytes!("../data/tasks.csv");
    let tasks = TaskImporter::from_reader(&data[..]).expect("task export imports");

    let portal = tasks
        .iter()
        .find(|task| task.id.0 == "task005")
        .expect("task005 present");
    assert_eq!(portal.domain, "technology");
    assert_eq!(portal.priority, TaskPriority::High);
    assert_eq!(tasks[0].status, TaskStatus::InProgress);
    assert!(tasks[2].assigned_to.is_none());
}

#[test]
fn open_workload_breaks_the_technology_tie() {
    let members = roster();
    let volunteers = volunteers(&members);

    // vol001 and vol005 both score 17 on an idle roster; first seen wins.
    assert_eq!(
        match_volunteer(&volunteers, "technology", TaskPriority::Medium, &NoWorkload),
        Some(id("vol001"))
    );
    // vol001 carries two open tasks, vol005 only a completed one.
    assert_eq!(
        match_volunteer(&volunteers, "technology", TaskPriority::Medium, &workload()),
        Some(id("vol005"))
    );
}

#[test]
fn on_ground_work_goes_to_the_event_organizer() {
    let members = roster();
    let outcome = MatchEngine::default().select(
        &volunteers(&members),
        &MatchRequest::new("On-Ground", TaskPriority::Low),
        &workload(),
    );

    assert_eq!(outcome.recommended, Some(id("vol003")));
    assert_eq!(outcome.candidates[0].total_score, 19);
}

#[test]
fn inactive_volunteers_sink_to_the_bottom() {
    let members = roster();
    let outcome = MatchEngine::default().select(
        &volunteers(&members),
        &MatchRequest::new("fundraising", TaskPriority::High),
        &workload(),
    );

    let last = outcome.candidates.last().expect("candidates ranked");
    assert_eq!(last.volunteer_id, id("vol004"));
    assert_eq!(last.total_score, -100);
    assert!(last
        .components
        .iter()
        .any(|component| component.factor == MatchFactor::StatusGate));
    assert_eq!(outcome.recommended, Some(id("vol003")));
}

#[test]
fn malformed_rows_report_their_record_number() {
    let csv = "user_id,username,role,name\nvol001,john,volunteer,John\nvol002,jane,guest,Jane\n";

    match RosterImporter::from_reader(csv.as_bytes()) {
        Err(ImportError::InvalidRow { record, message }) => {
            assert_eq!(record, 2);
            assert!(message.contains("guest"));
        }
        other => panic!("expected invalid row, got {other:?}"),
    }
}
