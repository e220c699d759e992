//! List filtering and free-text search
//!
//! Searches are case-insensitive substring matches. A blank query matches
//! everything.

use chrono::NaiveDate;

use crate::models::{Client, ClientId, Invoice, InvoiceStatus, Project, ProjectStatus};

/// Check whether any of `fields` contains `query`, ignoring case
pub fn search_matches(query: &str, fields: &[&str]) -> bool {
    let query = query.trim().to_lowercase();
    if query.is_empty() {
        return true;
    }

    fields
        .iter()
        .any(|field| field.to_lowercase().contains(&query))
}

/// Client search over name, company, email and phone
pub fn client_matches(client: &Client, query: &str) -> bool {
    search_matches(
        query,
        &[
            client.name.as_str(),
            client.company.as_str(),
            client.email.as_str(),
            client.phone.as_str(),
        ],
    )
}

/// Criteria for listing invoices
#[derive(Debug, Clone, Default)]
pub struct InvoiceFilter {
    pub status: Option<InvoiceStatus>,
    pub client_id: Option<ClientId>,
    /// First creation day included
    pub date_from: Option<NaiveDate>,
    /// Last creation day included
    pub date_to: Option<NaiveDate>,
    /// Matched against number and notes
    pub search: Option<String>,
}

impl InvoiceFilter {
    pub fn matches(&self, invoice: &Invoice) -> bool {
        if self.status.is_some_and(|s| s != invoice.status) {
            return false;
        }

        if self.client_id.is_some_and(|id| id != invoice.client_id) {
            return false;
        }

        let created = invoice.created_at.date_naive();
        if self.date_from.is_some_and(|from| created < from) {
            return false;
        }
        if self.date_to.is_some_and(|to| created > to) {
            return false;
        }

        match &self.search {
            Some(query) => {
                search_matches(query, &[invoice.number.as_str(), invoice.notes.as_str()])
            }
            None => true,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.status.is_none()
            && self.client_id.is_none()
            && self.date_from.is_none()
            && self.date_to.is_none()
            && self.search.as_deref().map_or(true, |s| s.trim().is_empty())
    }
}

/// Criteria for listing projects
#[derive(Debug, Clone, Default)]
pub struct ProjectFilter {
    pub status: Option<ProjectStatus>,
    pub client_id: Option<ClientId>,
    /// Matched against name and description
    pub search: Option<String>,
}

impl ProjectFilter {
    pub fn matches(&self, project: &Project) -> bool {
        if self.status.is_some_and(|s| s != project.status) {
            return false;
        }

        if self.client_id.is_some() && self.client_id != project.client_id {
            return false;
        }

        match &self.search {
            Some(query) => search_matches(
                query,
                &[project.name.as_str(), project.description.as_str()],
            ),
            None => true,
        }
    }
}
