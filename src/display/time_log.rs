//! Time log display formatting

use std::collections::HashMap;

use tabled::Tabled;

use super::format::{format_date, format_hours, truncate};
use super::render_table;
use crate::models::{ProjectId, TimeLog};

#[derive(Tabled)]
struct TimeLogRow {
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "Date")]
    date: String,
    #[tabled(rename = "Project")]
    project: String,
    #[tabled(rename = "Task")]
    task: String,
    #[tabled(rename = "Description")]
    description: String,
    #[tabled(rename = "Hours")]
    hours: String,
}

/// Format time entries as a table followed by the total
///
/// `project_names` maps project IDs to names; unknown projects show their ID.
pub fn format_time_log_list(
    logs: &[TimeLog],
    project_names: &HashMap<ProjectId, String>,
    date_format: &str,
) -> String {
    if logs.is_empty() {
        return "No time entries found.".to_string();
    }

    let rows = logs
        .iter()
        .map(|log| TimeLogRow {
            id: log.id.to_string(),
            date: format_date(log.date, date_format),
            project: project_names
                .get(&log.project_id)
                .map(|name| truncate(name, 24))
                .unwrap_or_else(|| log.project_id.to_string()),
            task: log.task_type.to_string(),
            description: truncate(&log.description, 40),
            hours: format_hours(log.hours),
        })
        .collect();

    let total: rust_decimal::Decimal = logs.iter().map(|l| l.hours).sum();
    format!(
        "{}\nTotal: {} across {} entries",
        render_table(rows, 5),
        format_hours(total),
        logs.len()
    )
}
