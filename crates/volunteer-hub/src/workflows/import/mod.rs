//! CSV import of the organization's member and task exports.

mod parser;

use std::io::Read;
use std::path::Path;

use crate::workflows::normalizer::{normalize_key, split_tags};
use crate::workflows::roster::domain::{Member, MemberId, MemberStatus, Role};
use crate::workflows::tasks::domain::{Task, TaskId, TaskPriority, TaskStatus};
use parser::{parse_date, parse_flag, MemberRow, TaskRow};

#[derive(Debug)]
pub enum ImportError {
    Io(std::io::Error),
    Csv(csv::Error),
    InvalidRow { record: usize, message: String },
}

impl std::fmt::Display for ImportError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ImportError::Io(err) => write!(f, "failed to read export: {}", err),
            ImportError::Csv(err) => write!(f, "invalid CSV data: {}", err),
            ImportError::InvalidRow { record, message } => {
                write!(f, "record {} is invalid: {}", record, message)
            }
        }
    }
}

impl std::error::Error for ImportError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ImportError::Io(err) => Some(err),
            ImportError::Csv(err) => Some(err),
            ImportError::InvalidRow { .. } => None,
        }
    }
}

impl From<std::io::Error> for ImportError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err)
    }
}

impl From<csv::Error> for ImportError {
    fn from(err: csv::Error) -> Self {
        Self::Csv(err)
    }
}

fn csv_reader<R: Read>(reader: R) -> csv::Reader<R> {
    csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(reader)
}

fn invalid(record: usize) -> impl Fn(String) -> ImportError {
    move |message| ImportError::InvalidRow { record, message }
}

/// Reads the member export (`users.csv`) into roster entries, preserving file order.
pub struct RosterImporter;

impl RosterImporter {
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Vec<Member>, ImportError> {
        let file = std::fs::File::open(path)?;
        Self::from_reader(file)
    }

    /// Rows without a join date fall back to `1970-01-01`.
    pub fn from_reader<R: Read>(reader: R) -> Result<Vec<Member>, ImportError> {
        let mut members = Vec::new();

        for (index, row) in csv_reader(reader).deserialize::<MemberRow>().enumerate() {
            let record = index + 1;
            members.push(member_from_row(row?, record)?);
        }

        Ok(members)
    }
}

fn member_from_row(row: MemberRow, record: usize) -> Result<Member, ImportError> {
    let role = Role::parse(&row.role)
        .ok_or_else(|| invalid(record)(format!("unknown role '{}'", row.role)))?;
    let verified = row
        .aadhar_verified
        .as_deref()
        .map(parse_flag)
        .transpose()
        .map_err(invalid(record))?
        .unwrap_or(false);
    let join_date = row
        .join_date
        .as_deref()
        .map(parse_date)
        .transpose()
        .map_err(invalid(record))?
        .unwrap_or_default();
    let birthday = row
        .birthday
        .as_deref()
        .map(parse_date)
        .transpose()
        .map_err(invalid(record))?;

    Ok(Member {
        id: MemberId(row.user_id),
        username: row.username,
        name: row.name,
        email: row.email,
        phone: row.phone,
        role,
        skills: split_tags(&row.skills),
        domains: split_tags(&row.domains),
        availability: split_tags(&row.availability),
        verified,
        status: row
            .status
            .as_deref()
            .map_or(MemberStatus::Active, MemberStatus::parse),
        join_date,
        birthday,
    })
}

/// Reads the task export (`tasks.csv`).
pub struct TaskImporter;

impl TaskImporter {
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Vec<Task>, ImportError> {
        let file = std::fs::File::open(path)?;
        Self::from_reader(file)
    }

    pub fn from_reader<R: Read>(reader: R) -> Result<Vec<Task>, ImportError> {
        let mut tasks = Vec::new();

        for (index, row) in csv_reader(reader).deserialize::<TaskRow>().enumerate() {
            let record = index + 1;
            tasks.push(task_from_row(row?, record)?);
        }

        Ok(tasks)
    }
}

fn task_from_row(row: TaskRow, record: usize) -> Result<Task, ImportError> {
    let status = TaskStatus::parse(&row.status)
        .ok_or_else(|| invalid(record)(format!("unknown status '{}'", row.status)))?;
    let priority = match row.priority.as_deref() {
        Some(raw) => TaskPriority::parse(raw)
            .ok_or_else(|| invalid(record)(format!("unknown priority '{raw}'")))?,
        None => TaskPriority::default(),
    };

    Ok(Task {
        id: TaskId(row.task_id),
        title: row.title,
        description: row.description,
        domain: normalize_key(&row.domain),
        priority,
        assigned_to: row.assigned_to.map(MemberId),
        status,
        due_date: parse_date(&row.due_date).map_err(invalid(record))?,
        created_by: MemberId(row.created_by),
        created_date: parse_date(&row.created_date).map_err(invalid(record))?,
    })
}
