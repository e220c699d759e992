//! Time tracking CLI commands
//!
//! Implements CLI commands for logging hours against projects.

use std::collections::HashMap;

use clap::Subcommand;

use super::{parse_date, parse_optional_date};
use crate::config::Settings;
use crate::display::format::format_hours;
use crate::display::format_time_log_list;
use crate::error::{FreelanceError, FreelanceResult};
use crate::models::{ProjectId, TaskType};
use crate::services::{NewTimeLog, ProjectService, TimeLogService, TimeLogUpdate};
use crate::storage::Storage;
use crate::validation::FieldValue;

/// Time tracking subcommands
#[derive(Subcommand)]
pub enum TimeCommands {
    /// Log hours against a project
    Log {
        /// Project name or ID
        project: String,
        /// Hours worked (e.g., "2.5")
        hours: String,
        /// Date worked (YYYY-MM-DD, defaults to today)
        #[arg(short, long, default_value = "today")]
        date: String,
        /// Task type (development, design, meetings, support, documentation, other)
        #[arg(short, long, default_value = "development")]
        task: String,
        /// What was done
        #[arg(short = 'm', long, default_value = "")]
        description: String,
    },
    /// List time entries
    List {
        /// Only show entries for this project (name or ID)
        #[arg(short, long)]
        project: Option<String>,
    },
    /// Edit a time entry
    Edit {
        /// Time entry ID
        entry: String,
        /// New project (name or ID)
        #[arg(short, long)]
        project: Option<String>,
        /// New hours
        #[arg(long)]
        hours: Option<String>,
        /// New date (YYYY-MM-DD)
        #[arg(short, long)]
        date: Option<String>,
        /// New task type
        #[arg(short, long)]
        task: Option<String>,
        /// New description
        #[arg(short = 'm', long)]
        description: Option<String>,
    },
    /// Delete a time entry
    Delete {
        /// Time entry ID
        entry: String,
    },
    /// Show hours per task type
    Summary {
        /// Only count entries for this project (name or ID)
        #[arg(short, long)]
        project: Option<String>,
    },
}

fn parse_task(input: &str) -> FreelanceResult<TaskType> {
    TaskType::parse(input).ok_or_else(|| {
        FreelanceError::InvalidInput(format!(
            "Invalid task type: '{}'. Valid types: development, design, meetings, support, documentation, other",
            input
        ))
    })
}

fn resolve_project(storage: &Storage, project: Option<&str>) -> FreelanceResult<Option<ProjectId>> {
    match project {
        Some(identifier) => Ok(Some(ProjectService::new(storage).require(identifier)?.id)),
        None => Ok(None),
    }
}

fn project_names(storage: &Storage) -> FreelanceResult<HashMap<ProjectId, String>> {
    Ok(storage
        .projects
        .all()?
        .into_iter()
        .map(|p| (p.id, p.name))
        .collect())
}

/// Handle a time tracking command
pub fn handle_time_command(
    storage: &Storage,
    settings: &Settings,
    cmd: TimeCommands,
) -> FreelanceResult<()> {
    let service = TimeLogService::new(storage);

    match cmd {
        TimeCommands::Log {
            project,
            hours,
            date,
            task,
            description,
        } => {
            let project = ProjectService::new(storage).require(&project)?;
            let entry = service.log(NewTimeLog {
                project_id: project.id,
                date: parse_date(&date)?,
                hours: FieldValue::from(hours).normalized(),
                task_type: parse_task(&task)?,
                description,
            })?;

            println!(
                "Logged {} of {} on {}",
                format_hours(entry.hours),
                entry.task_type,
                project.name
            );
            println!("  ID: {}", entry.id);
        }

        TimeCommands::List { project } => {
            let project_id = resolve_project(storage, project.as_deref())?;
            let logs = service.list(project_id)?;
            println!(
                "{}",
                format_time_log_list(&logs, &project_names(storage)?, &settings.date_format)
            );
        }

        TimeCommands::Edit {
            entry,
            project,
            hours,
            date,
            task,
            description,
        } => {
            let found = service.require(&entry)?;
            let changes = TimeLogUpdate {
                project_id: resolve_project(storage, project.as_deref())?,
                date: parse_optional_date(date.as_deref())?,
                hours: hours.map(|h| FieldValue::from(h).normalized()),
                task_type: task.as_deref().map(parse_task).transpose()?,
                description,
            };

            let updated = service.update(found.id, changes)?;
            println!("Updated time entry {} ({})", updated.id, format_hours(updated.hours));
        }

        TimeCommands::Delete { entry } => {
            let found = service.require(&entry)?;
            let deleted = service.delete(found.id)?;
            println!(
                "Deleted time entry {} ({})",
                deleted.id,
                format_hours(deleted.hours)
            );
        }

        TimeCommands::Summary { project } => {
            let project_id = resolve_project(storage, project.as_deref())?;
            let by_task = service.hours_by_task(project_id)?;

            if by_task.is_empty() {
                println!("No time logged.");
                return Ok(());
            }

            for (task, hours) in &by_task {
                println!("  {:<16} {:>10}", task.to_string(), format_hours(*hours));
            }
            println!(
                "  {:<16} {:>10}",
                "Total",
                format_hours(service.total_hours(project_id)?)
            );
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_task() {
        assert_eq!(parse_task("docs").unwrap(), TaskType::Documentation);
        assert_eq!(parse_task("Meeting").unwrap(), TaskType::Meetings);
        assert!(parse_task("coding")
            .unwrap_err()
            .to_string()
            .contains("Valid types"));
    }
}
