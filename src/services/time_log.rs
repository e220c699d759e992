//! Time log service
//!
//! Records hours worked against projects. Hours are validated to
//! [0.25, 24] per entry and the project must exist.

use chrono::NaiveDate;
use rust_decimal::Decimal;

use crate::error::{FreelanceError, FreelanceResult};
use crate::models::{ProjectId, TaskType, TimeLog, TimeLogId};
use crate::storage::Storage;
use crate::validation::{validate_hours, FieldValue};

/// Service for time tracking
pub struct TimeLogService<'a> {
    storage: &'a Storage,
}

/// A new block of work to record
#[derive(Debug, Clone)]
pub struct NewTimeLog {
    pub project_id: ProjectId,
    pub date: NaiveDate,
    /// Raw hours input
    pub hours: FieldValue,
    pub task_type: TaskType,
    pub description: String,
}

/// A partial time entry change; `None` leaves a field untouched
#[derive(Debug, Clone, Default)]
pub struct TimeLogUpdate {
    pub project_id: Option<ProjectId>,
    pub date: Option<NaiveDate>,
    pub hours: Option<FieldValue>,
    pub task_type: Option<TaskType>,
    pub description: Option<String>,
}

impl<'a> TimeLogService<'a> {
    /// Create a new time log service
    pub fn new(storage: &'a Storage) -> Self {
        Self { storage }
    }

    fn ensure_project(&self, project_id: ProjectId) -> FreelanceResult<()> {
        if self.storage.projects.get(project_id)?.is_none() {
            return Err(FreelanceError::project_not_found(project_id.to_string()));
        }
        Ok(())
    }

    /// Record hours against a project
    pub fn log(&self, entry: NewTimeLog) -> FreelanceResult<TimeLog> {
        let hours = validate_hours(entry.hours, None).inspect_err(|e| {
            tracing::warn!(error = %e, "rejected time entry");
        })?;
        self.ensure_project(entry.project_id)?;

        let mut log = TimeLog::new(entry.project_id, entry.date, hours);
        log.task_type = entry.task_type;
        log.description = entry.description.trim().to_string();

        self.storage.time_logs.insert(log.clone())?;
        self.storage.time_logs.save()?;

        tracing::info!(entry = %log.id, project = %log.project_id, hours = %log.hours, "logged time");
        Ok(log)
    }

    /// Get a time entry by ID
    pub fn get(&self, id: TimeLogId) -> FreelanceResult<Option<TimeLog>> {
        self.storage.time_logs.get(id)
    }

    /// Find a time entry by full or short ID
    pub fn find(&self, identifier: &str) -> FreelanceResult<Option<TimeLog>> {
        self.storage.time_logs.find(|l| l.id.matches(identifier))
    }

    /// Find a time entry or fail with a not-found error
    pub fn require(&self, identifier: &str) -> FreelanceResult<TimeLog> {
        self.find(identifier)?
            .ok_or_else(|| FreelanceError::time_log_not_found(identifier))
    }

    /// List entries, optionally for a single project, most recent day first
    pub fn list(&self, project_id: Option<ProjectId>) -> FreelanceResult<Vec<TimeLog>> {
        let mut logs = match project_id {
            Some(id) => self.storage.time_logs.filter(|l| l.project_id == id)?,
            None => self.storage.time_logs.all()?,
        };
        logs.sort_by(|a, b| b.date.cmp(&a.date));
        Ok(logs)
    }

    /// Apply a partial update to a time entry
    pub fn update(&self, id: TimeLogId, changes: TimeLogUpdate) -> FreelanceResult<TimeLog> {
        let mut log = self
            .storage
            .time_logs
            .get(id)?
            .ok_or_else(|| FreelanceError::time_log_not_found(id.to_string()))?;

        if let Some(hours) = changes.hours {
            log.hours = validate_hours(hours, None)?;
        }
        if let Some(project_id) = changes.project_id {
            self.ensure_project(project_id)?;
            log.project_id = project_id;
        }
        if let Some(date) = changes.date {
            log.date = date;
        }
        if let Some(task_type) = changes.task_type {
            log.task_type = task_type;
        }
        if let Some(description) = changes.description {
            log.description = description.trim().to_string();
        }

        self.storage.time_logs.update(log.clone())?;
        self.storage.time_logs.save()?;

        tracing::info!(entry = %log.id, "updated time entry");
        Ok(log)
    }

    /// Delete a time entry
    pub fn delete(&self, id: TimeLogId) -> FreelanceResult<TimeLog> {
        let log = self
            .storage
            .time_logs
            .remove(id)?
            .ok_or_else(|| FreelanceError::time_log_not_found(id.to_string()))?;
        self.storage.time_logs.save()?;

        tracing::info!(entry = %id, "deleted time entry");
        Ok(log)
    }

    /// Total hours, optionally for a single project
    pub fn total_hours(&self, project_id: Option<ProjectId>) -> FreelanceResult<Decimal> {
        Ok(self.list(project_id)?.iter().map(|l| l.hours).sum())
    }

    /// Hours per task type, skipping types with no time logged
    pub fn hours_by_task(&self, project_id: Option<ProjectId>) -> FreelanceResult<Vec<(TaskType, Decimal)>> {
        let logs = self.list(project_id)?;

        Ok(TaskType::all()
            .iter()
            .map(|task| {
                let hours = logs
                    .iter()
                    .filter(|l| l.task_type == *task)
                    .map(|l| l.hours)
                    .sum::<Decimal>();
                (*task, hours)
            })
            .filter(|(_, hours)| !hours.is_zero())
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::paths::FreelancePaths;
    use crate::models::Project;
    use crate::validation::ValidationError;
    use rust_decimal_macros::dec;
    use tempfile::TempDir;

    fn setup() -> (TempDir, Storage, ProjectId) {
        let temp_dir = TempDir::new().unwrap();
        let paths = FreelancePaths::with_base_dir(temp_dir.path().to_path_buf());
        let mut storage = Storage::new(paths).unwrap();
        storage.load_all().unwrap();

        let project = Project::new("Website", None);
        let project_id = project.id;
        storage.projects.insert(project).unwrap();
        (temp_dir, storage, project_id)
    }

    fn entry(project_id: ProjectId, day: u32, hours: &str, task_type: TaskType) -> NewTimeLog {
        NewTimeLog {
            project_id,
            date: NaiveDate::from_ymd_opt(2025, 2, day).unwrap(),
            hours: hours.into(),
            task_type,
            description: String::new(),
        }
    }

    #[test]
    fn test_log_time() {
        let (_temp_dir, storage, project_id) = setup();
        let service = TimeLogService::new(&storage);

        let log = service
            .log(entry(project_id, 3, "1.5", TaskType::Design))
            .unwrap();

        assert_eq!(log.hours, dec!(1.5));
        assert_eq!(service.list(Some(project_id)).unwrap().len(), 1);
    }

    #[test]
    fn test_hours_bounds() {
        let (_temp_dir, storage, project_id) = setup();
        let service = TimeLogService::new(&storage);

        let err = service
            .log(entry(project_id, 3, "0.1", TaskType::Design))
            .unwrap_err();
        assert!(matches!(
            err,
            FreelanceError::Validation(ValidationError::BelowMinimum { .. })
        ));

        let err = service
            .log(entry(project_id, 3, "25", TaskType::Design))
            .unwrap_err();
        assert_eq!(err.to_string(), "Hours exceeds the maximum of 24");

        assert!(service.log(entry(project_id, 3, "24", TaskType::Design)).is_ok());
    }

    #[test]
    fn test_unknown_project() {
        let (_temp_dir, storage, _project_id) = setup();
        let service = TimeLogService::new(&storage);

        let err = service
            .log(entry(ProjectId::new(), 3, "2", TaskType::Support))
            .unwrap_err();
        assert!(err.is_not_found());
    }

    #[test]
    fn test_list_most_recent_first() {
        let (_temp_dir, storage, project_id) = setup();
        let service = TimeLogService::new(&storage);

        service.log(entry(project_id, 1, "2", TaskType::Development)).unwrap();
        service.log(entry(project_id, 9, "3", TaskType::Development)).unwrap();

        let logs = service.list(None).unwrap();
        assert_eq!(logs[0].date.format("%d").to_string(), "09");
    }

    #[test]
    fn test_totals() {
        let (_temp_dir, storage, project_id) = setup();
        let service = TimeLogService::new(&storage);

        service.log(entry(project_id, 1, "2", TaskType::Development)).unwrap();
        service.log(entry(project_id, 2, "1.25", TaskType::Meetings)).unwrap();
        service.log(entry(project_id, 3, "3", TaskType::Development)).unwrap();

        assert_eq!(service.total_hours(None).unwrap(), dec!(6.25));
        assert_eq!(
            service.hours_by_task(Some(project_id)).unwrap(),
            vec![
                (TaskType::Development, dec!(5)),
                (TaskType::Meetings, dec!(1.25)),
            ]
        );
    }

    #[test]
    fn test_update_and_delete() {
        let (_temp_dir, storage, project_id) = setup();
        let service = TimeLogService::new(&storage);
        let log = service.log(entry(project_id, 1, "2", TaskType::Development)).unwrap();

        let updated = service
            .update(
                log.id,
                TimeLogUpdate {
                    hours: Some("4".into()),
                    ..Default::default()
                },
            )
            .unwrap();
        assert_eq!(updated.hours, dec!(4));

        service.delete(log.id).unwrap();
        assert!(service.get(log.id).unwrap().is_none());
    }
}
