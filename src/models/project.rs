//! Project model
//!
//! Work carried out for a client, with an optional budget and date range.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use super::ids::{ClientId, ProjectId};
use super::money::Money;

/// Lifecycle stage of a project
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "kebab-case")]
pub enum ProjectStatus {
    /// Not yet agreed
    #[default]
    Prospect,
    InProgress,
    Completed,
    OnHold,
}

impl ProjectStatus {
    pub fn all() -> &'static [ProjectStatus] {
        &[
            Self::Prospect,
            Self::InProgress,
            Self::Completed,
            Self::OnHold,
        ]
    }

    /// Parse a status from user input
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().replace('_', "-").as_str() {
            "prospect" => Some(Self::Prospect),
            "in-progress" | "inprogress" | "active" => Some(Self::InProgress),
            "completed" | "done" => Some(Self::Completed),
            "on-hold" | "onhold" | "paused" => Some(Self::OnHold),
            _ => None,
        }
    }
}

impl fmt::Display for ProjectStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Prospect => write!(f, "Prospect"),
            Self::InProgress => write!(f, "In progress"),
            Self::Completed => write!(f, "Completed"),
            Self::OnHold => write!(f, "On hold"),
        }
    }
}

/// A client project
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Project {
    pub id: ProjectId,

    pub name: String,

    /// Owning client (weak reference)
    pub client_id: Option<ClientId>,

    #[serde(default)]
    pub status: ProjectStatus,

    /// Agreed budget, if any
    #[serde(default)]
    pub budget: Option<Money>,

    #[serde(default)]
    pub start_date: Option<NaiveDate>,

    #[serde(default)]
    pub end_date: Option<NaiveDate>,

    #[serde(default)]
    pub description: String,

    pub created_at: DateTime<Utc>,
}

impl Project {
    /// Create a new project in the prospect stage
    pub fn new(name: impl Into<String>, client_id: Option<ClientId>) -> Self {
        Self {
            id: ProjectId::new(),
            name: name.into(),
            client_id,
            status: ProjectStatus::Prospect,
            budget: None,
            start_date: None,
            end_date: None,
            description: String::new(),
            created_at: Utc::now(),
        }
    }

    pub fn validate(&self) -> Result<(), ProjectValidationError> {
        if self.name.trim().is_empty() {
            return Err(ProjectValidationError::EmptyName);
        }

        if let (Some(start), Some(end)) = (self.start_date, self.end_date) {
            if end < start {
                return Err(ProjectValidationError::EndBeforeStart { start, end });
            }
        }

        Ok(())
    }
}

impl fmt::Display for Project {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} [{}]", self.name, self.status)
    }
}

/// Validation errors for projects
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProjectValidationError {
    EmptyName,
    EndBeforeStart { start: NaiveDate, end: NaiveDate },
}

impl fmt::Display for ProjectValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyName => write!(f, "Project name cannot be empty"),
            Self::EndBeforeStart { start, end } => {
                write!(f, "Project end date {} is before its start date {}", end, start)
            }
        }
    }
}

impl std::error::Error for ProjectValidationError {}
