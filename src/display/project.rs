//! Project display formatting

use tabled::Tabled;

use super::format::{format_date, format_hours, format_money, truncate};
use super::render_table;
use crate::services::project::ProjectSummary;

#[derive(Tabled)]
struct ProjectRow {
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "Client")]
    client: String,
    #[tabled(rename = "Status")]
    status: String,
    #[tabled(rename = "Hours")]
    hours: String,
    #[tabled(rename = "Budget")]
    budget: String,
}

/// Format a list of projects with logged hours as a table
pub fn format_project_list(summaries: &[ProjectSummary], currency: &str) -> String {
    if summaries.is_empty() {
        return "No projects found.".to_string();
    }

    let rows = summaries
        .iter()
        .map(|s| ProjectRow {
            id: s.project.id.to_string(),
            name: truncate(&s.project.name, 32),
            client: s.client_name.clone().unwrap_or_else(|| "-".to_string()),
            status: s.project.status.to_string(),
            hours: format_hours(s.hours),
            budget: s
                .project
                .budget
                .map(|b| format_money(b, currency))
                .unwrap_or_else(|| "-".to_string()),
        })
        .collect();

    render_table(rows, 4)
}

/// Format a single project's details
pub fn format_project_details(summary: &ProjectSummary, currency: &str, date_format: &str) -> String {
    let project = &summary.project;
    let mut output = String::new();

    output.push_str(&format!("Project: {}\n", project.name));
    output.push_str(&format!("  ID:       {}\n", project.id));
    output.push_str(&format!("  Status:   {}\n", project.status));
    output.push_str(&format!(
        "  Client:   {}\n",
        summary.client_name.as_deref().unwrap_or("(none)")
    ));
    if let Some(budget) = project.budget {
        output.push_str(&format!("  Budget:   {}\n", format_money(budget, currency)));
    }
    if let Some(start) = project.start_date {
        output.push_str(&format!("  Start:    {}\n", format_date(start, date_format)));
    }
    if let Some(end) = project.end_date {
        output.push_str(&format!("  End:      {}\n", format_date(end, date_format)));
    }
    output.push_str(&format!("  Logged:   {}\n", format_hours(summary.hours)));

    if !project.description.is_empty() {
        output.push('\n');
        output.push_str(&format!("  {}\n", project.description));
    }

    output
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Money, Project, ProjectStatus};
    use chrono::NaiveDate;
    use rust_decimal_macros::dec;

    fn summary() -> ProjectSummary {
        let mut project = Project::new("Website", None);
        project.status = ProjectStatus::InProgress;
        project.budget = Some(Money::new(dec!(4500)));
        project.start_date = NaiveDate::from_ymd_opt(2025, 1, 6);
        ProjectSummary {
            project,
            hours: dec!(12.5),
            client_name: Some("Ada".into()),
        }
    }

    #[test]
    fn test_format_project_list() {
        let output = format_project_list(&[summary()], "EUR");
        assert!(output.contains("Website"));
        assert!(output.contains("In progress"));
        assert!(output.contains("12.5h"));
        assert!(output.contains("4500.00 EUR"));
        assert_eq!(format_project_list(&[], "EUR"), "No projects found.");
    }

    #[test]
    fn test_format_project_details() {
        let output = format_project_details(&summary(), "EUR", "%d.%m.%Y");
        assert!(output.contains("Client:   Ada"));
        assert!(output.contains("Start:    06.01.2025"));
        assert!(!output.contains("End:"));
    }
}
