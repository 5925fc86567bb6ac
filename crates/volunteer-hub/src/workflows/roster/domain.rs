use std::collections::BTreeSet;
use std::fmt;

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::workflows::matching::VolunteerProfile;
use crate::workflows::normalizer::{normalize_key, normalize_tags};

/// Identifier wrapper for organization members.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct MemberId(pub String);

impl MemberId {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for MemberId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    Admin,
    Volunteer,
}

impl Role {
    pub const fn label(self) -> &'static str {
        match self {
            Role::Admin => "admin",
            Role::Volunteer => "volunteer",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match normalize_key(value).as_str() {
            "admin" => Some(Role::Admin),
            "volunteer" => Some(Role::Volunteer),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MemberStatus {
    Active,
    Inactive,
}

impl MemberStatus {
    pub const fn label(self) -> &'static str {
        match self {
            MemberStatus::Active => "active",
            MemberStatus::Inactive => "inactive",
        }
    }

    pub const fn toggled(self) -> Self {
        match self {
            MemberStatus::Active => MemberStatus::Inactive,
            MemberStatus::Inactive => MemberStatus::Active,
        }
    }

    /// Anything other than `active` counts as inactive, matching the roster exports.
    pub fn parse(value: &str) -> Self {
        if normalize_key(value) == "active" {
            MemberStatus::Active
        } else {
            MemberStatus::Inactive
        }
    }
}

/// Roster entry for an admin or volunteer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Member {
    pub id: MemberId,
    pub username: String,
    pub name: String,
    pub email: String,
    pub phone: String,
    pub role: Role,
    pub skills: Vec<String>,
    pub domains: Vec<String>,
    pub availability: Vec<String>,
    pub verified: bool,
    pub status: MemberStatus,
    pub join_date: NaiveDate,
    pub birthday: Option<NaiveDate>,
}

impl Member {
    pub fn is_volunteer(&self) -> bool {
        self.role == Role::Volunteer
    }

    pub fn is_active(&self) -> bool {
        self.status == MemberStatus::Active
    }

    /// Project the member into the read-only view consumed by the matcher.
    pub fn volunteer_profile(&self) -> VolunteerProfile {
        VolunteerProfile {
            id: self.id.clone(),
            domains: self.domains.iter().cloned().collect::<BTreeSet<_>>(),
            skills: self.skills.iter().cloned().collect::<BTreeSet<_>>(),
            availability: self.availability.iter().cloned().collect::<BTreeSet<_>>(),
            status: self.status,
            verified: self.verified,
        }
    }

    pub fn has_birthday_on(&self, day: NaiveDate) -> bool {
        self.birthday
            .map(|birthday| birthday.month() == day.month() && birthday.day() == day.day())
            .unwrap_or(false)
    }

    fn apply(&mut self, update: &ProfileUpdate) {
        if let Some(name) = non_blank(update.name.as_deref()) {
            self.name = name;
        }
        if let Some(email) = non_blank(update.email.as_deref()) {
            self.email = email;
        }
        if let Some(phone) = non_blank(update.phone.as_deref()) {
            self.phone = phone;
        }
        if let Some(skills) = &update.skills {
            self.skills = normalize_tags(skills);
        }
        if let Some(domains) = &update.domains {
            self.domains = normalize_tags(domains);
        }
        if let Some(availability) = &update.availability {
            self.availability = normalize_tags(availability);
        }
        if update.birthday.is_some() {
            self.birthday = update.birthday;
        }
        if let Some(role) = update.role {
            self.role = role;
        }
    }

    pub(crate) fn with_update(mut self, update: &ProfileUpdate) -> Self {
        self.apply(update);
        self
    }
}

fn non_blank(value: Option<&str>) -> Option<String> {
    value
        .map(str::trim)
        .filter(|value| !value.is_empty())
        .map(str::to_string)
}

/// Self-service sign-up payload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Registration {
    pub username: String,
    pub name: String,
    pub email: String,
    pub phone: String,
    #[serde(default)]
    pub skills: Vec<String>,
    #[serde(default)]
    pub domains: Vec<String>,
    #[serde(default)]
    pub availability: Vec<String>,
    #[serde(default)]
    pub birthday: Option<NaiveDate>,
}

impl Registration {
    pub(crate) fn missing_field(&self) -> Option<&'static str> {
        [
            ("name", &self.name),
            ("email", &self.email),
            ("phone", &self.phone),
            ("username", &self.username),
        ]
        .into_iter()
        .find(|(_, value)| value.trim().is_empty())
        .map(|(field, _)| field)
    }

    pub(crate) fn into_member(self, id: MemberId, role: Role, join_date: NaiveDate) -> Member {
        Member {
            id,
            username: self.username.trim().to_string(),
            name: self.name.trim().to_string(),
            email: self.email.trim().to_string(),
            phone: self.phone.trim().to_string(),
            role,
            skills: normalize_tags(&self.skills),
            domains: normalize_tags(&self.domains),
            availability: normalize_tags(&self.availability),
            verified: false,
            status: MemberStatus::Active,
            join_date,
            birthday: self.birthday,
        }
    }
}

/// Admin-created member; identical to a registration plus an explicit role.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewMember {
    #[serde(flatten)]
    pub registration: Registration,
    pub role: Role,
}

/// Partial profile edit. Absent fields are left untouched.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProfileUpdate {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub skills: Option<Vec<String>>,
    #[serde(default)]
    pub domains: Option<Vec<String>>,
    #[serde(default)]
    pub availability: Option<Vec<String>>,
    #[serde(default)]
    pub birthday: Option<NaiveDate>,
    /// Only honored by `update_member`; profile edits carrying a role are refused.
    #[serde(default)]
    pub role: Option<Role>,
}

/// Member list filters used by the admin roster view.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MemberFilter {
    #[serde(default)]
    pub status: Option<MemberStatus>,
    #[serde(default)]
    pub domain: Option<String>,
    #[serde(default)]
    pub search: Option<String>,
}

impl MemberFilter {
    pub fn matches(&self, member: &Member) -> bool {
        if let Some(status) = self.status {
            if member.status != status {
                return false;
            }
        }

        if let Some(domain) = self.domain.as_deref().map(normalize_key) {
            if !domain.is_empty() && !member.domains.iter().any(|entry| entry == &domain) {
                return false;
            }
        }

        if let Some(term) = self.search.as_deref().map(|term| term.trim().to_lowercase()) {
            if !term.is_empty()
                && !member.name.to_lowercase().contains(&term)
                && !member.email.to_lowercase().contains(&term)
            {
                return false;
            }
        }

        true
    }
}
