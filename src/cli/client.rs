//! Client CLI commands
//!
//! Implements CLI commands for client management.

use clap::Subcommand;

use crate::config::Settings;
use crate::display::{format_client_details, format_client_list};
use crate::error::FreelanceResult;
use crate::services::{ClientService, ClientUpdate, ContactInfo};
use crate::storage::Storage;

/// Client subcommands
#[derive(Subcommand)]
pub enum ClientCommands {
    /// Add a new client
    Add {
        /// Client name
        name: String,
        /// Email address
        #[arg(short, long, default_value = "")]
        email: String,
        /// Phone number
        #[arg(short, long, default_value = "")]
        phone: String,
        /// Company name
        #[arg(short, long, default_value = "")]
        company: String,
        /// Postal address
        #[arg(short, long, default_value = "")]
        address: String,
        /// Free-form notes
        #[arg(short, long, default_value = "")]
        notes: String,
    },
    /// List clients
    List {
        /// Only show clients whose name, company, email or phone contains this text
        #[arg(short, long)]
        search: Option<String>,
    },
    /// Show client details
    Show {
        /// Client name or ID
        client: String,
    },
    /// Edit a client
    Edit {
        /// Client name or ID
        client: String,
        /// New name
        #[arg(long)]
        name: Option<String>,
        /// New email address
        #[arg(short, long)]
        email: Option<String>,
        /// New phone number
        #[arg(short, long)]
        phone: Option<String>,
        /// New company name
        #[arg(short, long)]
        company: Option<String>,
        /// New postal address
        #[arg(short, long)]
        address: Option<String>,
        /// New notes
        #[arg(short, long)]
        notes: Option<String>,
    },
    /// Delete a client
    Delete {
        /// Client name or ID
        client: String,
    },
}

/// Handle a client command
pub fn handle_client_command(
    storage: &Storage,
    settings: &Settings,
    cmd: ClientCommands,
) -> FreelanceResult<()> {
    let service = ClientService::new(storage);

    match cmd {
        ClientCommands::Add {
            name,
            email,
            phone,
            company,
            address,
            notes,
        } => {
            let client = service.create(
                &name,
                ContactInfo {
                    email,
                    phone,
                    company,
                    address,
                    notes,
                },
            )?;

            println!("Created client: {}", client.display_name());
            if !client.email.is_empty() {
                println!("  Email: {}", client.email);
            }
            println!("  ID: {}", client.id);
        }

        ClientCommands::List { search } => {
            let summaries = service.list_with_summaries(search.as_deref())?;
            println!("{}", format_client_list(&summaries, &settings.currency));
        }

        ClientCommands::Show { client } => {
            let found = service.require(&client)?;
            let summary = service.summary(&found)?;
            print!("{}", format_client_details(&summary, &settings.currency));
        }

        ClientCommands::Edit {
            client,
            name,
            email,
            phone,
            company,
            address,
            notes,
        } => {
            let found = service.require(&client)?;
            let changes = ClientUpdate {
                name,
                email,
                phone,
                company,
                address,
                notes,
            };

            if changes.is_empty() {
                println!("No changes specified. Use --name, --email, --phone, --company, --address or --notes.");
                return Ok(());
            }

            let updated = service.update(found.id, changes)?;
            println!("Updated client: {}", updated.display_name());
        }

        ClientCommands::Delete { client } => {
            let found = service.require(&client)?;
            let deleted = service.delete(found.id)?;
            println!("Deleted client: {}", deleted.display_name());
        }
    }

    Ok(())
}
