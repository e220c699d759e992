//! Client model
//!
//! A customer the freelancer bills. Projects and invoices refer to clients by
//! ID; those references are not enforced when a client is removed.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use super::ids::ClientId;

/// A client of the business
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Client {
    pub id: ClientId,

    /// Contact name
    pub name: String,

    #[serde(default)]
    pub email: String,

    #[serde(default)]
    pub phone: String,

    /// Company the contact belongs to, if any
    #[serde(default)]
    pub company: String,

    /// Postal address as printed on invoices
    #[serde(default)]
    pub address: String,

    #[serde(default)]
    pub notes: String,

    pub created_at: DateTime<Utc>,
}

impl Client {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: ClientId::new(),
            name: name.into(),
            email: String::new(),
            phone: String::new(),
            company: String::new(),
            address: String::new(),
            notes: String::new(),
            created_at: Utc::now(),
        }
    }

    /// Name to show in listings: "Name (Company)" when a company is set
    pub fn display_name(&self) -> String {
        if self.company.trim().is_empty() {
            self.name.clone()
        } else {
            format!("{} ({})", self.name, self.company)
        }
    }

    pub fn validate(&self) -> Result<(), ClientValidationError> {
        if self.name.trim().is_empty() {
            return Err(ClientValidationError::EmptyName);
        }

        if self.name.len() > 200 {
            return Err(ClientValidationError::NameTooLong(self.name.len()));
        }

        if !self.email.is_empty() && !self.email.contains('@') {
            return Err(ClientValidationError::InvalidEmail(self.email.clone()));
        }

        Ok(())
    }
}

impl fmt::Display for Client {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

/// Validation errors for clients
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ClientValidationError {
    EmptyName,
    NameTooLong(usize),
    InvalidEmail(String),
}

impl fmt::Display for ClientValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyName => write!(f, "Client name cannot be empty"),
            Self::NameTooLong(len) => {
                write!(f, "Client name too long ({} chars, max 200)", len)
            }
            Self::InvalidEmail(email) => write!(f, "Invalid email address: {}", email),
        }
    }
}

impl std::error::Error for ClientValidationError {}
