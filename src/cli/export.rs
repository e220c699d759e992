//! CLI commands for data export
//!
//! Provides commands for exporting data in various formats.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use clap::{Subcommand, ValueEnum};

use crate::config::Settings;
use crate::display::format::format_money;
use crate::error::{FreelanceError, FreelanceResult};
use crate::export::{export_full_json, export_invoices_csv, FullExport};
use crate::storage::Storage;

/// Export format options
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum ExportFormat {
    /// CSV format (invoices only)
    Csv,
    /// JSON format (full database)
    Json,
}

/// Export subcommands
#[derive(Subcommand, Debug)]
pub enum ExportCommands {
    /// Export all data to a file
    All {
        /// Output file path
        output: PathBuf,

        /// Export format
        #[arg(short, long, value_enum, default_value = "json")]
        format: ExportFormat,

        /// Pretty-print JSON output
        #[arg(long)]
        pretty: bool,
    },

    /// Export invoices to CSV
    Invoices {
        /// Output file path
        output: PathBuf,
    },

    /// Show export information without writing files
    Info,
}

fn create_output(output: &Path) -> FreelanceResult<BufWriter<File>> {
    let file = File::create(output).map_err(|e| {
        FreelanceError::Export(format!(
            "Failed to create file {}: {}",
            output.display(),
            e
        ))
    })?;
    Ok(BufWriter::new(file))
}

/// Handle export commands
pub fn handle_export_command(
    storage: &Storage,
    settings: &Settings,
    cmd: ExportCommands,
) -> FreelanceResult<()> {
    match cmd {
        ExportCommands::All {
            output,
            format,
            pretty,
        } => handle_export_all(storage, settings, &output, format, pretty),
        ExportCommands::Invoices { output } => handle_export_invoices(storage, settings, &output),
        ExportCommands::Info => handle_export_info(storage, settings),
    }
}

/// Handle full export
fn handle_export_all(
    storage: &Storage,
    settings: &Settings,
    output: &Path,
    format: ExportFormat,
    pretty: bool,
) -> FreelanceResult<()> {
    let mut writer = create_output(output)?;

    match format {
        ExportFormat::Csv => {
            export_invoices_csv(storage, settings, &mut writer)?;
            writer.flush()?;
            println!("Invoices exported to: {}", output.display());
            println!("Note: CSV format exports invoices only. Use JSON for a full database export.");
        }
        ExportFormat::Json => {
            export_full_json(storage, settings, &mut writer, pretty)?;
            writer.flush()?;
            println!("Full database exported to: {}", output.display());
        }
    }

    Ok(())
}

/// Handle invoices export
fn handle_export_invoices(
    storage: &Storage,
    settings: &Settings,
    output: &Path,
) -> FreelanceResult<()> {
    let mut writer = create_output(output)?;
    let count = export_invoices_csv(storage, settings, &mut writer)?;
    writer.flush()?;

    println!("Exported {} invoices to: {}", count, output.display());
    Ok(())
}

/// Show export information
fn handle_export_info(storage: &Storage, settings: &Settings) -> FreelanceResult<()> {
    let export = FullExport::from_storage(storage, settings)?;

    println!("Export Information");
    println!("==================\n");

    println!("Schema Version: {}", export.schema_version);
    println!("App Version:    {}", export.app_version);
    println!();

    println!("Data Summary:");
    println!("  Clients:       {}", export.metadata.client_count);
    println!("  Projects:      {}", export.metadata.project_count);
    println!("  Time entries:  {}", export.metadata.time_log_count);
    println!("  Invoices:      {}", export.metadata.invoice_count);
    println!(
        "  Invoiced:      {}",
        format_money(export.metadata.total_invoiced, &settings.currency)
    );
    println!();

    if let Some(earliest) = &export.metadata.earliest_invoice {
        println!("Invoice Date Range:");
        println!("  Earliest: {}", earliest);
    }
    if let Some(latest) = &export.metadata.latest_invoice {
        println!("  Latest:   {}", latest);
    }

    println!("\nAvailable Export Formats:");
    println!("  csv  - CSV format (invoices)");
    println!("  json - JSON format (full database, machine-readable)");

    println!("\nExamples:");
    println!("  freelance export all backup.json --format json --pretty");
    println!("  freelance export invoices invoices.csv");

    Ok(())
}
