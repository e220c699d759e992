//! Time log model
//!
//! One block of hours worked on a project on a given day.

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;

use super::ids::{ProjectId, TimeLogId};

/// Kind of work recorded in a time entry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum TaskType {
    #[default]
    Development,
    Design,
    Meetings,
    Support,
    Documentation,
    Other,
}

impl TaskType {
    pub fn all() -> &'static [TaskType] {
        &[
            Self::Development,
            Self::Design,
            Self::Meetings,
            Self::Support,
            Self::Documentation,
            Self::Other,
        ]
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "development" | "dev" => Some(Self::Development),
            "design" => Some(Self::Design),
            "meetings" | "meeting" => Some(Self::Meetings),
            "support" => Some(Self::Support),
            "documentation" | "docs" => Some(Self::Documentation),
            "other" => Some(Self::Other),
            _ => None,
        }
    }
}

impl fmt::Display for TaskType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Development => write!(f, "Development"),
            Self::Design => write!(f, "Design"),
            Self::Meetings => write!(f, "Meetings"),
            Self::Support => write!(f, "Support"),
            Self::Documentation => write!(f, "Documentation"),
            Self::Other => write!(f, "Other"),
        }
    }
}

/// Hours worked on a project
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimeLog {
    pub id: TimeLogId,

    pub project_id: ProjectId,

    #[serde(default)]
    pub description: String,

    /// Validated to [0.25, 24] before the entry is stored
    pub hours: Decimal,

    pub date: NaiveDate,

    #[serde(default)]
    pub task_type: TaskType,

    pub created_at: DateTime<Utc>,
}

impl TimeLog {
    pub fn new(project_id: ProjectId, date: NaiveDate, hours: Decimal) -> Self {
        Self {
            id: TimeLogId::new(),
            project_id,
            description: String::new(),
            hours,
            date,
            task_type: TaskType::default(),
            created_at: Utc::now(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_default_task_type() {
        let log = TimeLog::new(
            ProjectId::new(),
            NaiveDate::from_ymd_opt(2025, 1, 15).unwrap(),
            dec!(2.5),
        );
        assert_eq!(log.task_type, TaskType::Development);
    }

    #[test]
    fn test_task_type_parsing() {
        assert_eq!(TaskType::parse("Docs"), Some(TaskType::Documentation));
        assert_eq!(TaskType::parse("meeting"), Some(TaskType::Meetings));
        assert_eq!(TaskType::parse("gardening"), None);
    }
}
