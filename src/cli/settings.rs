//! Settings CLI commands
//!
//! Shows and changes the business details printed on invoices.

use std::path::PathBuf;

use clap::Subcommand;

use crate::billing::NumberingStrategy;
use crate::config::{FreelancePaths, Settings, SettingsUpdate};
use crate::display::format::format_rate;
use crate::error::{FreelanceError, FreelanceResult};

/// Settings subcommands
#[derive(Subcommand)]
pub enum SettingsCommands {
    /// Show the current settings
    Show,
    /// Change one or more settings
    Set {
        /// Business name
        #[arg(long)]
        business_name: Option<String>,
        /// Business email address
        #[arg(long)]
        email: Option<String>,
        /// Business phone number
        #[arg(long)]
        phone: Option<String>,
        /// Business postal address
        #[arg(long)]
        address: Option<String>,
        /// Currency code (e.g., EUR, USD)
        #[arg(long)]
        currency: Option<String>,
        /// Default tax rate in percent
        #[arg(long)]
        tax_rate: Option<String>,
        /// Note printed at the bottom of every invoice
        #[arg(long)]
        invoice_note: Option<String>,
        /// Bank details printed on invoices
        #[arg(long)]
        bank_details: Option<String>,
        /// Invoice numbering (last-inserted, highest-suffix)
        #[arg(long)]
        numbering: Option<String>,
        /// Date format as a strftime pattern (e.g., "%d/%m/%Y")
        #[arg(long)]
        date_format: Option<String>,
    },
    /// Set or remove the invoice logo
    Logo {
        /// PNG, JPEG, GIF or WebP image of at most 2 MB
        #[arg(required_unless_present = "clear")]
        path: Option<PathBuf>,
        /// Remove the current logo
        #[arg(long, conflicts_with = "path")]
        clear: bool,
    },
}

fn parse_numbering(input: &str) -> FreelanceResult<NumberingStrategy> {
    NumberingStrategy::parse(input).ok_or_else(|| {
        FreelanceError::InvalidInput(format!(
            "Invalid numbering strategy: '{}'. Valid strategies: last-inserted, highest-suffix",
            input
        ))
    })
}

fn print_settings(settings: &Settings, paths: &FreelancePaths) {
    let or_dash = |s: &str| {
        if s.trim().is_empty() {
            "-".to_string()
        } else {
            s.replace('\n', ", ")
        }
    };

    println!("Business");
    println!("  Name:         {}", settings.business_name);
    println!("  Email:        {}", or_dash(&settings.business_email));
    println!("  Phone:        {}", or_dash(&settings.business_phone));
    println!("  Address:      {}", or_dash(&settings.business_address));
    println!(
        "  Logo:         {}",
        settings.logo_media_type().unwrap_or("-")
    );
    println!();
    println!("Invoicing");
    println!("  Currency:     {}", settings.currency);
    println!("  Tax rate:     {}", format_rate(settings.tax_rate));
    println!("  Numbering:    {}", settings.numbering);
    println!("  Date format:  {}", settings.date_format);
    println!("  Note:         {}", or_dash(&settings.invoice_note));
    println!("  Bank details: {}", or_dash(&settings.bank_details));
    println!();
    println!("Stored in {}", paths.settings_file().display());
}

/// Handle a settings command
pub fn handle_settings_command(
    paths: &FreelancePaths,
    settings: &mut Settings,
    cmd: SettingsCommands,
) -> FreelanceResult<()> {
    match cmd {
        SettingsCommands::Show => print_settings(settings, paths),

        SettingsCommands::Set {
            business_name,
            email,
            phone,
            address,
            currency,
            tax_rate,
            invoice_note,
            bank_details,
            numbering,
            date_format,
        } => {
            let update = SettingsUpdate {
                business_name,
                business_email: email,
                business_phone: phone,
                business_address: address,
                currency,
                tax_rate,
                invoice_note,
                bank_details,
                numbering: numbering.as_deref().map(parse_numbering).transpose()?,
                date_format,
            };

            if update.is_empty() {
                println!("No changes specified. Run 'freelance settings set --help' for options.");
                return Ok(());
            }

            settings.apply(update)?;
            settings.save(paths)?;
            println!("Settings updated.");
        }

        SettingsCommands::Logo { path, clear } => {
            if clear {
                settings.clear_logo();
                settings.save(paths)?;
                println!("Logo removed.");
            } else if let Some(path) = path {
                settings.set_logo_from_path(&path)?;
                settings.save(paths)?;
                println!(
                    "Logo set from {} ({})",
                    path.display(),
                    settings.logo_media_type().unwrap_or("image")
                );
            }
        }
    }

    Ok(())
}
