//! Project service
//!
//! Provides business logic for projects: CRUD, status changes, budget
//! validation and hours logged against each project.

use chrono::NaiveDate;
use rust_decimal::Decimal;

use crate::error::{FreelanceError, FreelanceResult};
use crate::models::{ClientId, Money, Project, ProjectId, ProjectStatus};
use crate::storage::Storage;
use crate::validation::{validate_amount, FieldValue};

use super::filter::ProjectFilter;

/// Service for project management
pub struct ProjectService<'a> {
    storage: &'a Storage,
}

/// Optional details for a new project
#[derive(Debug, Clone, Default)]
pub struct ProjectDetails {
    pub status: Option<ProjectStatus>,
    /// Raw budget input; validated as an amount
    pub budget: Option<FieldValue>,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub description: String,
}

/// A partial project change; `None` leaves a field untouched
#[derive(Debug, Clone, Default)]
pub struct ProjectUpdate {
    pub name: Option<String>,
    pub client_id: Option<ClientId>,
    pub status: Option<ProjectStatus>,
    pub budget: Option<FieldValue>,
    pub clear_budget: bool,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub description: Option<String>,
}

/// A project with the hours logged against it
#[derive(Debug, Clone)]
pub struct ProjectSummary {
    pub project: Project,
    pub hours: Decimal,
    pub client_name: Option<String>,
}

impl<'a> ProjectService<'a> {
    /// Create a new project service
    pub fn new(storage: &'a Storage) -> Self {
        Self { storage }
    }

    fn ensure_client(&self, client_id: ClientId) -> FreelanceResult<()> {
        if self.storage.clients.get(client_id)?.is_none() {
            return Err(FreelanceError::client_not_found(client_id.to_string()));
        }
        Ok(())
    }

    fn parse_budget(budget: FieldValue) -> FreelanceResult<Money> {
        Ok(Money::new(validate_amount(budget, Some("Budget"))?))
    }

    /// Create a new project
    pub fn create(
        &self,
        name: &str,
        client_id: Option<ClientId>,
        details: ProjectDetails,
    ) -> FreelanceResult<Project> {
        if let Some(client_id) = client_id {
            self.ensure_client(client_id)?;
        }

        let mut project = Project::new(name.trim(), client_id);
        if let Some(status) = details.status {
            project.status = status;
        }
        project.budget = details.budget.map(Self::parse_budget).transpose()?;
        project.start_date = details.start_date;
        project.end_date = details.end_date;
        project.description = details.description;

        project
            .validate()
            .map_err(|e| FreelanceError::InvalidInput(e.to_string()))?;

        self.storage.projects.insert(project.clone())?;
        self.storage.projects.save()?;

        tracing::info!(project = %project.id, name = %project.name, "created project");
        Ok(project)
    }

    /// Get a project by ID
    pub fn get(&self, id: ProjectId) -> FreelanceResult<Option<Project>> {
        self.storage.projects.get(id)
    }

    /// Find a project by ID (full or short form) or case-insensitive name
    pub fn find(&self, identifier: &str) -> FreelanceResult<Option<Project>> {
        let identifier = identifier.trim();

        if let Some(project) = self.storage.projects.find(|p| p.id.matches(identifier))? {
            return Ok(Some(project));
        }

        let name_lower = identifier.to_lowercase();
        self.storage
            .projects
            .find(|p| p.name.to_lowercase() == name_lower)
    }

    /// Find a project or fail with a not-found error
    pub fn require(&self, identifier: &str) -> FreelanceResult<Project> {
        self.find(identifier)?
            .ok_or_else(|| FreelanceError::project_not_found(identifier))
    }

    /// List projects matching a filter, in creation order
    pub fn list(&self, filter: &ProjectFilter) -> FreelanceResult<Vec<Project>> {
        self.storage.projects.filter(|p| filter.matches(p))
    }

    /// List projects with logged hours and client names
    pub fn list_with_summaries(&self, filter: &ProjectFilter) -> FreelanceResult<Vec<ProjectSummary>> {
        let projects = self.list(filter)?;
        let mut summaries = Vec::with_capacity(projects.len());

        for project in projects {
            summaries.push(self.summary(project)?);
        }

        Ok(summaries)
    }

    /// Logged hours and client name for one project
    pub fn summary(&self, project: Project) -> FreelanceResult<ProjectSummary> {
        let hours = self.total_hours(project.id)?;
        let client_name = match project.client_id {
            Some(id) => self.storage.clients.get(id)?.map(|c| c.display_name()),
            None => None,
        };

        Ok(ProjectSummary {
            project,
            hours,
            client_name,
        })
    }

    /// Apply a partial update to a project
    pub fn update(&self, id: ProjectId, changes: ProjectUpdate) -> FreelanceResult<Project> {
        let mut project = self
            .storage
            .projects
            .get(id)?
            .ok_or_else(|| FreelanceError::project_not_found(id.to_string()))?;

        if let Some(name) = changes.name {
            project.name = name.trim().to_string();
        }
        if let Some(client_id) = changes.client_id {
            self.ensure_client(client_id)?;
            project.client_id = Some(client_id);
        }
        if let Some(status) = changes.status {
            project.status = status;
        }
        if changes.clear_budget {
            project.budget = None;
        } else if let Some(budget) = changes.budget {
            project.budget = Some(Self::parse_budget(budget)?);
        }
        if let Some(start) = changes.start_date {
            project.start_date = Some(start);
        }
        if let Some(end) = changes.end_date {
            project.end_date = Some(end);
        }
        if let Some(description) = changes.description {
            project.description = description;
        }

        project
            .validate()
            .map_err(|e| FreelanceError::InvalidInput(e.to_string()))?;

        self.storage.projects.update(project.clone())?;
        self.storage.projects.save()?;

        tracing::info!(project = %project.id, "updated project");
        Ok(project)
    }

    /// Move a project to another lifecycle stage
    pub fn set_status(&self, id: ProjectId, status: ProjectStatus) -> FreelanceResult<Project> {
        self.update(
            id,
            ProjectUpdate {
                status: Some(status),
                ..Default::default()
            },
        )
    }

    /// Delete a project
    ///
    /// Time entries logged against the project are kept.
    pub fn delete(&self, id: ProjectId) -> FreelanceResult<Project> {
        let project = self
            .storage
            .projects
            .remove(id)?
            .ok_or_else(|| FreelanceError::project_not_found(id.to_string()))?;
        self.storage.projects.save()?;

        tracing::info!(project = %id, name = %project.name, "deleted project");
        Ok(project)
    }

    /// Total hours logged against a project
    pub fn total_hours(&self, id: ProjectId) -> FreelanceResult<Decimal> {
        let logs = self.storage.time_logs.filter(|l| l.project_id == id)?;
        Ok(logs.iter().map(|l| l.hours).sum())
    }

    pub fn count(&self) -> FreelanceResult<usize> {
        self.storage.projects.count()
    }
}
