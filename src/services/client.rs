//! Client service
//!
//! Provides business logic for client management including CRUD operations,
//! lookup by ID or name, and per-client billing statistics.

use crate::error::{FreelanceError, FreelanceResult};
use crate::models::{Client, ClientId, Money};
use crate::storage::Storage;

use super::filter::client_matches;

/// Service for client management
pub struct ClientService<'a> {
    storage: &'a Storage,
}

/// Contact details for a new client
#[derive(Debug, Clone, Default)]
pub struct ContactInfo {
    pub email: String,
    pub phone: String,
    pub company: String,
    pub address: String,
    pub notes: String,
}

/// A partial client change; `None` leaves a field untouched
#[derive(Debug, Clone, Default)]
pub struct ClientUpdate {
    pub name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub company: Option<String>,
    pub address: Option<String>,
    pub notes: Option<String>,
}

impl ClientUpdate {
    pub fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.email.is_none()
            && self.phone.is_none()
            && self.company.is_none()
            && self.address.is_none()
            && self.notes.is_none()
    }
}

/// A client with computed billing figures
#[derive(Debug, Clone)]
pub struct ClientSummary {
    pub client: Client,
    pub project_count: usize,
    pub invoice_count: usize,
    /// Sum of all invoice totals regardless of status
    pub total_invoiced: Money,
}

impl<'a> ClientService<'a> {
    /// Create a new client service
    pub fn new(storage: &'a Storage) -> Self {
        Self { storage }
    }

    /// Create a new client
    pub fn create(&self, name: &str, contact: ContactInfo) -> FreelanceResult<Client> {
        let mut client = Client::new(name.trim());
        client.email = contact.email.trim().to_string();
        client.phone = contact.phone.trim().to_string();
        client.company = contact.company.trim().to_string();
        client.address = contact.address;
        client.notes = contact.notes;

        client
            .validate()
            .map_err(|e| FreelanceError::InvalidInput(e.to_string()))?;

        self.storage.clients.insert(client.clone())?;
        self.storage.clients.save()?;

        tracing::info!(client = %client.id, name = %client.name, "created client");
        Ok(client)
    }

    /// Get a client by ID
    pub fn get(&self, id: ClientId) -> FreelanceResult<Option<Client>> {
        self.storage.clients.get(id)
    }

    /// Find a client by ID (full or short form) or case-insensitive name
    pub fn find(&self, identifier: &str) -> FreelanceResult<Option<Client>> {
        let identifier = identifier.trim();

        if let Some(client) = self.storage.clients.find(|c| c.id.matches(identifier))? {
            return Ok(Some(client));
        }

        let name_lower = identifier.to_lowercase();
        self.storage
            .clients
            .find(|c| c.name.to_lowercase() == name_lower)
    }

    /// Find a client or fail with a not-found error
    pub fn require(&self, identifier: &str) -> FreelanceResult<Client> {
        self.find(identifier)?
            .ok_or_else(|| FreelanceError::client_not_found(identifier))
    }

    /// List clients, optionally narrowed by a search query
    pub fn list(&self, search: Option<&str>) -> FreelanceResult<Vec<Client>> {
        match search {
            Some(query) => self.storage.clients.filter(|c| client_matches(c, query)),
            None => self.storage.clients.all(),
        }
    }

    /// Apply a partial update to a client
    pub fn update(&self, id: ClientId, changes: ClientUpdate) -> FreelanceResult<Client> {
        let mut client = self
            .storage
            .clients
            .get(id)?
            .ok_or_else(|| FreelanceError::client_not_found(id.to_string()))?;

        if let Some(name) = changes.name {
            client.name = name.trim().to_string();
        }
        if let Some(email) = changes.email {
            client.email = email.trim().to_string();
        }
        if let Some(phone) = changes.phone {
            client.phone = phone.trim().to_string();
        }
        if let Some(company) = changes.company {
            client.company = company.trim().to_string();
        }
        if let Some(address) = changes.address {
            client.address = address;
        }
        if let Some(notes) = changes.notes {
            client.notes = notes;
        }

        client
            .validate()
            .map_err(|e| FreelanceError::InvalidInput(e.to_string()))?;

        self.storage.clients.update(client.clone())?;
        self.storage.clients.save()?;

        tracing::info!(client = %client.id, "updated client");
        Ok(client)
    }

    /// Delete a client
    ///
    /// Projects and invoices that refer to the client are kept as they are.
    pub fn delete(&self, id: ClientId) -> FreelanceResult<Client> {
        let client = self
            .storage
            .clients
            .remove(id)?
            .ok_or_else(|| FreelanceError::client_not_found(id.to_string()))?;
        self.storage.clients.save()?;

        let orphaned = self
            .storage
            .invoices
            .filter(|i| i.client_id == id)?
            .len();
        if orphaned > 0 {
            tracing::warn!(client = %id, invoices = orphaned, "deleted client still has invoices");
        }

        tracing::info!(client = %id, name = %client.name, "deleted client");
        Ok(client)
    }

    /// Computed figures for one client
    pub fn summary(&self, client: &Client) -> FreelanceResult<ClientSummary> {
        let project_count = self
            .storage
            .projects
            .filter(|p| p.client_id == Some(client.id))?
            .len();
        let invoices = self.storage.invoices.filter(|i| i.client_id == client.id)?;

        Ok(ClientSummary {
            client: client.clone(),
            project_count,
            invoice_count: invoices.len(),
            total_invoiced: invoices.iter().map(|i| i.total).sum(),
        })
    }

    /// List clients with their computed figures
    pub fn list_with_summaries(&self, search: Option<&str>) -> FreelanceResult<Vec<ClientSummary>> {
        let clients = self.list(search)?;
        let mut summaries = Vec::with_capacity(clients.len());

        for client in &clients {
            summaries.push(self.summary(client)?);
        }

        Ok(summaries)
    }

    pub fn count(&self) -> FreelanceResult<usize> {
        self.storage.clients.count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::billing::calculate_invoice_total;
    use crate::config::paths::FreelancePaths;
    use crate::models::{Invoice, LineItem, Project};
    use rust_decimal_macros::dec;
    use tempfile::TempDir;

    fn create_test_storage() -> (TempDir, Storage) {
        let temp_dir = TempDir::new().unwrap();
        let paths = FreelancePaths::with_base_dir(temp_dir.path().to_path_buf());
        let mut storage = Storage::new(paths).unwrap();
        storage.load_all().unwrap();
        (temp_dir, storage)
    }

    #[test]
    fn test_create_client() {
        let (_temp_dir, storage) = create_test_storage();
        let service = ClientService::new(&storage);

        let client = service
            .create(
                "  Ada Lovelace ",
                ContactInfo {
                    email: "ada@example.com".into(),
                    ..Default::default()
                },
            )
            .unwrap();

        assert_eq!(client.name, "Ada Lovelace");
        assert_eq!(service.count().unwrap(), 1);
    }

    #[test]
    fn test_create_requires_name() {
        let (_temp_dir, storage) = create_test_storage();
        let service = ClientService::new(&storage);

        let err = service.create("   ", ContactInfo::default()).unwrap_err();
        assert!(err.is_validation());
        assert_eq!(service.count().unwrap(), 0);
    }

    #[test]
    fn test_find_by_name_or_id() {
        let (_temp_dir, storage) = create_test_storage();
        let service = ClientService::new(&storage);
        let client = service.create("Grace Hopper", ContactInfo::default()).unwrap();

        assert_eq!(service.find("grace hopper").unwrap().unwrap().id, client.id);
        assert_eq!(service.find(&client.id.to_string()).unwrap().unwrap().id, client.id);
        assert!(service.find("nobody").unwrap().is_none());
        assert!(service.require("nobody").unwrap_err().is_not_found());
    }

    #[test]
    fn test_search() {
        let (_temp_dir, storage) = create_test_storage();
        let service = ClientService::new(&storage);
        service
            .create(
                "Ada",
                ContactInfo {
                    company: "Analytical Engines".into(),
                    ..Default::default()
                },
            )
            .unwrap();
        service.create("Grace", ContactInfo::default()).unwrap();

        assert_eq!(service.list(Some("engines")).unwrap().len(), 1);
        assert_eq!(service.list(Some("")).unwrap().len(), 2);
        assert_eq!(service.list(None).unwrap().len(), 2);
    }

    #[test]
    fn test_update() {
        let (_temp_dir, storage) = create_test_storage();
        let service = ClientService::new(&storage);
        let client = service.create("Ada", ContactInfo::default()).unwrap();

        let updated = service
            .update(
                client.id,
                ClientUpdate {
                    company: Some("Engines Ltd".into()),
                    ..Default::default()
                },
            )
            .unwrap();
        assert_eq!(updated.company, "Engines Ltd");
        assert_eq!(updated.name, "Ada");

        let err = service
            .update(
                client.id,
                ClientUpdate {
                    email: Some("broken".into()),
                    ..Default::default()
                },
            )
            .unwrap_err();
        assert!(err.is_validation());
    }

    #[test]
    fn test_delete_does_not_cascade() {
        let (_temp_dir, storage) = create_test_storage();
        let service = ClientService::new(&storage);
        let client = service.create("Ada", ContactInfo::default()).unwrap();

        let items = vec![LineItem::new("Work", 1, 100)];
        let totals = calculate_invoice_total(&items, dec!(0)).unwrap();
        storage
            .invoices
            .insert(Invoice::new("INV-001", client.id, items, dec!(0), totals))
            .unwrap();

        service.delete(client.id).unwrap();

        assert_eq!(service.count().unwrap(), 0);
        assert_eq!(storage.invoices.count().unwrap(), 1);
        assert!(service.delete(client.id).unwrap_err().is_not_found());
    }

    #[test]
    fn test_summary() {
        let (_temp_dir, storage) = create_test_storage();
        let service = ClientService::new(&storage);
        let client = service.create("Ada", ContactInfo::default()).unwrap();

        storage
            .projects
            .insert(Project::new("Website", Some(client.id)))
            .unwrap();
        for price in [100, 250] {
            let items = vec![LineItem::new("Work", 1, price)];
            let totals = calculate_invoice_total(&items, dec!(20)).unwrap();
            storage
                .invoices
                .insert(Invoice::new("INV", client.id, items, dec!(20), totals))
                .unwrap();
        }

        let summary = service.summary(&client).unwrap();
        assert_eq!(summary.project_count, 1);
        assert_eq!(summary.invoice_count, 2);
        assert_eq!(summary.total_invoiced, Money::new(dec!(420)));
    }
}
