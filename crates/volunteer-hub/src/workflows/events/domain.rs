use std::fmt;

use chrono::{Datelike, Duration, NaiveDate, NaiveDateTime, NaiveTime};
use serde::{Deserialize, Serialize};

use crate::workflows::normalizer::normalize_key;
use crate::workflows::roster::domain::MemberId;

#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct EventId(pub String);

impl fmt::Display for EventId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct AttendanceId(pub String);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EventStatus {
    Upcoming,
    Completed,
    Cancelled,
}

impl EventStatus {
    pub const fn label(self) -> &'static str {
        match self {
            EventStatus::Upcoming => "upcoming",
            EventStatus::Completed => "completed",
            EventStatus::Cancelled => "cancelled",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match normalize_key(value).as_str() {
            "upcoming" => Some(EventStatus::Upcoming),
            "completed" => Some(EventStatus::Completed),
            "cancelled" | "canceled" => Some(EventStatus::Cancelled),
            _ => None,
        }
    }

    /// Admin toggle: upcoming events complete, anything else reopens.
    pub const fn toggled(self) -> Self {
        match self {
            EventStatus::Upcoming => EventStatus::Completed,
            EventStatus::Completed | EventStatus::Cancelled => EventStatus::Upcoming,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Event {
    pub id: EventId,
    pub title: String,
    pub description: String,
    pub date: NaiveDate,
    pub time: NaiveTime,
    pub location: String,
    pub coordinator: MemberId,
    pub participants: Vec<MemberId>,
    pub capacity: Option<u32>,
    pub status: EventStatus,
    pub created_by: MemberId,
    pub created_date: NaiveDate,
}

impl Event {
    pub fn has_participant(&self, member: &MemberId) -> bool {
        self.participants.contains(member)
    }

    /// Participant or coordinator.
    pub fn involves(&self, member: &MemberId) -> bool {
        self.has_participant(member) || &self.coordinator == member
    }

    pub fn is_full(&self) -> bool {
        self.capacity
            .map_or(false, |capacity| self.participants.len() >= capacity as usize)
    }

    pub(crate) fn exceeds_capacity(&self, participants: usize) -> bool {
        self.capacity
            .map_or(false, |capacity| participants > capacity as usize)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AttendanceStatus {
    Confirmed,
    CheckedIn,
    CheckedOut,
}

impl AttendanceStatus {
    pub const fn label(self) -> &'static str {
        match self {
            AttendanceStatus::Confirmed => "confirmed",
            AttendanceStatus::CheckedIn => "checked_in",
            AttendanceStatus::CheckedOut => "checked_out",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttendanceRecord {
    pub id: AttendanceId,
    pub event_id: EventId,
    pub member_id: MemberId,
    pub status: AttendanceStatus,
    pub check_in: Option<NaiveDateTime>,
    pub check_out: Option<NaiveDateTime>,
    pub duties: Vec<String>,
}

/// Admin event creation payload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventDraft {
    pub title: String,
    pub description: String,
    pub location: String,
    /// Defaults to two weeks from the creation day.
    #[serde(default)]
    pub date: Option<NaiveDate>,
    #[serde(default)]
    pub time: Option<NaiveTime>,
    /// Defaults to the creating admin.
    #[serde(default)]
    pub coordinator: Option<MemberId>,
    #[serde(default)]
    pub participants: Vec<MemberId>,
    #[serde(default)]
    pub capacity: Option<u32>,
    #[serde(default)]
    pub duties: Vec<String>,
}

impl EventDraft {
    pub(crate) fn missing_field(&self) -> Option<&'static str> {
        [
            ("title", &self.title),
            ("description", &self.description),
            ("location", &self.location),
        ]
        .into_iter()
        .find(|(_, value)| value.trim().is_empty())
        .map(|(field, _)| field)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EventTimeline {
    Past,
    Ongoing,
    Upcoming,
}

impl EventTimeline {
    pub fn matches(self, date: NaiveDate, today: NaiveDate) -> bool {
        match self {
            EventTimeline::Past => date < today,
            EventTimeline::Ongoing => date == today,
            EventTimeline::Upcoming => date > today,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EventPeriod {
    ThisWeek,
    ThisMonth,
    NextMonth,
}

impl EventPeriod {
    /// Inclusive date bounds of the period around `today`. Weeks run Monday to Sunday.
    pub fn bounds(self, today: NaiveDate) -> (NaiveDate, NaiveDate) {
        match self {
            EventPeriod::ThisWeek => {
                let start =
                    today - Duration::days(i64::from(today.weekday().num_days_from_monday()));
                (start, start + Duration::days(6))
            }
            EventPeriod::ThisMonth => month_bounds(today.year(), today.month()),
            EventPeriod::NextMonth => {
                if today.month() == 12 {
                    month_bounds(today.year() + 1, 1)
                } else {
                    month_bounds(today.year(), today.month() + 1)
                }
            }
        }
    }

    pub fn contains(self, date: NaiveDate, today: NaiveDate) -> bool {
        let (start, end) = self.bounds(today);
        start <= date && date <= end
    }
}

fn month_bounds(year: i32, month: u32) -> (NaiveDate, NaiveDate) {
    let first = NaiveDate::from_ymd_opt(year, month, 1).unwrap_or(NaiveDate::MIN);
    let next_first = if month == 12 {
        NaiveDate::from_ymd_opt(year + 1, 1, 1)
    } else {
        NaiveDate::from_ymd_opt(year, month + 1, 1)
    }
    .unwrap_or(NaiveDate::MAX);
    (first, next_first - Duration::days(1))
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventQuery {
    #[serde(default)]
    pub timeline: Option<EventTimeline>,
    #[serde(default)]
    pub period: Option<EventPeriod>,
}

impl EventQuery {
    pub fn matches(&self, event: &Event, today: NaiveDate) -> bool {
        self.timeline
            .map_or(true, |timeline| timeline.matches(event.date, today))
            && self
                .period
                .map_or(true, |period| period.contains(event.date, today))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParticipantsUpdate {
    pub participants: Vec<MemberId>,
}

/// Check-in or check-out request. `at` defaults to the server's local time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttendanceMark {
    pub member_id: MemberId,
    #[serde(default)]
    pub at: Option<NaiveDateTime>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(year: i32, month: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(year, month, day).expect("valid date")
    }

    #[test]
    fn week_runs_monday_to_sunday() {
        // 2025-04-10 is a Thursday.
        assert_eq!(
            EventPeriod::ThisWeek.bounds(date(2025, 4, 10)),
            (date(2025, 4, 7), date(2025, 4, 13))
        );
        assert_eq!(
            EventPeriod::ThisWeek.bounds(date(2025, 4, 7)),
            (date(2025, 4, 7), date(2025, 4, 13))
        );
    }

    #[test]
    fn month_bounds_roll_over_the_year() {
        assert_eq!(
            EventPeriod::ThisMonth.bounds(date(2024, 2, 10)),
            (date(2024, 2, 1), date(2024, 2, 29))
        );
        assert_eq!(
            EventPeriod::NextMonth.bounds(date(2025, 12, 5)),
            (date(2026, 1, 1), date(2026, 1, 31))
        );
        assert_eq!(
            EventPeriod::ThisMonth.bounds(date(2025, 12, 31)),
            (date(2025, 12, 1), date(2025, 12, 31))
        );
    }

    #[test]
    fn status_toggle_reopens_closed_events() {
        assert_eq!(EventStatus::Upcoming.toggled(), EventStatus::Completed);
        assert_eq!(EventStatus::Completed.toggled(), EventStatus::Upcoming);
        assert_eq!(EventStatus::Cancelled.toggled(), EventStatus::Upcoming);
    }
}
