//! Project CLI commands
//!
//! Implements CLI commands for project management.

use clap::Subcommand;

use super::parse_optional_date;
use crate::config::Settings;
use crate::display::{format_project_details, format_project_list};
use crate::error::{FreelanceError, FreelanceResult};
use crate::models::{ClientId, ProjectStatus};
use crate::services::{ClientService, ProjectDetails, ProjectFilter, ProjectService, ProjectUpdate};
use crate::storage::Storage;
use crate::validation::FieldValue;

/// Project subcommands
#[derive(Subcommand)]
pub enum ProjectCommands {
    /// Add a new project
    Add {
        /// Project name
        name: String,
        /// Client name or ID
        #[arg(short, long)]
        client: Option<String>,
        /// Status (prospect, in-progress, completed, on-hold)
        #[arg(short, long)]
        status: Option<String>,
        /// Budget amount (e.g., "2500" or "2500.00")
        #[arg(short, long)]
        budget: Option<String>,
        /// Start date (YYYY-MM-DD)
        #[arg(long)]
        start: Option<String>,
        /// End date (YYYY-MM-DD)
        #[arg(long)]
        end: Option<String>,
        /// Description
        #[arg(short, long, default_value = "")]
        description: String,
    },
    /// List projects
    List {
        /// Only show projects with this status
        #[arg(short, long)]
        status: Option<String>,
        /// Only show projects for this client (name or ID)
        #[arg(short, long)]
        client: Option<String>,
        /// Only show projects whose name or description contains this text
        #[arg(long)]
        search: Option<String>,
    },
    /// Show project details
    Show {
        /// Project name or ID
        project: String,
    },
    /// Edit a project
    Edit {
        /// Project name or ID
        project: String,
        /// New name
        #[arg(short, long)]
        name: Option<String>,
        /// New client (name or ID)
        #[arg(short, long)]
        client: Option<String>,
        /// New budget amount
        #[arg(short, long)]
        budget: Option<String>,
        /// Remove the budget
        #[arg(long, conflicts_with = "budget")]
        clear_budget: bool,
        /// New start date (YYYY-MM-DD)
        #[arg(long)]
        start: Option<String>,
        /// New end date (YYYY-MM-DD)
        #[arg(long)]
        end: Option<String>,
        /// New description
        #[arg(short, long)]
        description: Option<String>,
    },
    /// Change a project's status
    Status {
        /// Project name or ID
        project: String,
        /// New status (prospect, in-progress, completed, on-hold)
        status: String,
    },
    /// Delete a project
    Delete {
        /// Project name or ID
        project: String,
    },
}

fn parse_status(input: &str) -> FreelanceResult<ProjectStatus> {
    ProjectStatus::parse(input).ok_or_else(|| {
        FreelanceError::InvalidInput(format!(
            "Invalid project status: '{}'. Valid statuses: prospect, in-progress, completed, on-hold",
            input
        ))
    })
}

fn resolve_client(storage: &Storage, client: Option<&str>) -> FreelanceResult<Option<ClientId>> {
    match client {
        Some(identifier) => Ok(Some(ClientService::new(storage).require(identifier)?.id)),
        None => Ok(None),
    }
}

/// Handle a project command
pub fn handle_project_command(
    storage: &Storage,
    settings: &Settings,
    cmd: ProjectCommands,
) -> FreelanceResult<()> {
    let service = ProjectService::new(storage);

    match cmd {
        ProjectCommands::Add {
            name,
            client,
            status,
            budget,
            start,
            end,
            description,
        } => {
            let client_id = resolve_client(storage, client.as_deref())?;
            let details = ProjectDetails {
                status: status.as_deref().map(parse_status).transpose()?,
                budget: budget.map(|b| FieldValue::from(b).normalized()),
                start_date: parse_optional_date(start.as_deref())?,
                end_date: parse_optional_date(end.as_deref())?,
                description,
            };

            let project = service.create(&name, client_id, details)?;

            println!("Created project: {}", project.name);
            println!("  Status: {}", project.status);
            if let Some(budget) = project.budget {
                println!("  Budget: {}", budget.format_with_currency(&settings.currency));
            }
            println!("  ID: {}", project.id);
        }

        ProjectCommands::List {
            status,
            client,
            search,
        } => {
            let filter = ProjectFilter {
                status: status.as_deref().map(parse_status).transpose()?,
                client_id: resolve_client(storage, client.as_deref())?,
                search,
            };
            let summaries = service.list_with_summaries(&filter)?;
            println!("{}", format_project_list(&summaries, &settings.currency));
        }

        ProjectCommands::Show { project } => {
            let found = service.require(&project)?;
            let summary = service.summary(found)?;
            print!(
                "{}",
                format_project_details(&summary, &settings.currency, &settings.date_format)
            );
        }

        ProjectCommands::Edit {
            project,
            name,
            client,
            budget,
            clear_budget,
            start,
            end,
            description,
        } => {
            let found = service.require(&project)?;
            let changes = ProjectUpdate {
                name,
                client_id: resolve_client(storage, client.as_deref())?,
                status: None,
                budget: budget.map(|b| FieldValue::from(b).normalized()),
                clear_budget,
                start_date: parse_optional_date(start.as_deref())?,
                end_date: parse_optional_date(end.as_deref())?,
                description,
            };

            let updated = service.update(found.id, changes)?;
            println!("Updated project: {}", updated.name);
        }

        ProjectCommands::Status { project, status } => {
            let found = service.require(&project)?;
            let updated = service.set_status(found.id, parse_status(&status)?)?;
            println!("Project '{}' is now {}", updated.name, updated.status);
        }

        ProjectCommands::Delete { project } => {
            let found = service.require(&project)?;
            let deleted = service.delete(found.id)?;
            println!("Deleted project: {}", deleted.name);
        }
    }

    Ok(())
}
