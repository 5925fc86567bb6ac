use chrono::NaiveDate;
use serde::{Deserialize, Deserializer};

use crate::workflows::normalizer::normalize_key;

/// One row of the organization's member export. Unknown columns are ignored.
#[derive(Debug, Deserialize)]
pub(crate) struct MemberRow {
    pub(crate) user_id: String,
    pub(crate) username: String,
    pub(crate) role: String,
    pub(crate) name: String,
    #[serde(default)]
    pub(crate) email: String,
    #[serde(default)]
    pub(crate) phone: String,
    #[serde(default)]
    pub(crate) skills: String,
    #[serde(default)]
    pub(crate) domains: String,
    #[serde(default)]
    pub(crate) availability: String,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    pub(crate) aadhar_verified: Option<String>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    pub(crate) status: Option<String>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    pub(crate) join_date: Option<String>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    pub(crate) birthday: Option<String>,
}

/// One row of the task export.
#[derive(Debug, Deserialize)]
pub(crate) struct TaskRow {
    pub(crate) task_id: String,
    pub(crate) title: String,
    #[serde(default)]
    pub(crate) description: String,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    pub(crate) assigned_to: Option<String>,
    pub(crate) status: String,
    pub(crate) due_date: String,
    pub(crate) domain: String,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    pub(crate) priority: Option<String>,
    pub(crate) created_by: String,
    pub(crate) created_date: String,
}

fn empty_string_as_none<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let opt = Option::<String>::deserialize(deserializer)?;
    Ok(opt.filter(|value| !value.trim().is_empty()))
}

pub(crate) fn parse_date(value: &str) -> Result<NaiveDate, String> {
    NaiveDate::parse_from_str(value.trim(), "%Y-%m-%d")
        .map_err(|err| format!("failed to parse '{value}' as YYYY-MM-DD ({err})"))
}

pub(crate) fn parse_flag(value: &str) -> Result<bool, String> {
    match normalize_key(value).as_str() {
        "true" | "1" | "yes" => Ok(true),
        "false" | "0" | "no" => Ok(false),
        _ => Err(format!("'{value}' is not a boolean")),
    }
}
