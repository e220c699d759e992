use anyhow::Result;
use clap::{Parser, Subcommand};

use freelance::cli::{
    handle_client_command, handle_export_command, handle_invoice_command, handle_project_command,
    handle_settings_command, handle_time_command,
};
use freelance::config::{FreelancePaths, Settings};
use freelance::display::format_dashboard;
use freelance::services::DashboardService;
use freelance::storage::Storage;

#[derive(Parser)]
#[command(
    name = "freelance",
    version,
    about = "Clients, projects, time tracking and invoicing for freelancers",
    long_about = "Freelance CLI keeps track of clients, projects and hours worked, \
                  and turns them into sequentially numbered invoices with \
                  validated line items, tax and totals."
)]
struct Cli {
    /// Log debug output to stderr
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Initialize the data directory
    Init,

    /// Show current configuration and paths
    Config,

    /// Show the business overview
    #[command(alias = "dash")]
    Dashboard,

    /// Client management commands
    #[command(subcommand)]
    Client(freelance::cli::ClientCommands),

    /// Project management commands
    #[command(subcommand)]
    Project(freelance::cli::ProjectCommands),

    /// Time tracking commands
    #[command(subcommand)]
    Time(freelance::cli::TimeCommands),

    /// Invoice commands
    #[command(subcommand, alias = "inv")]
    Invoice(freelance::cli::InvoiceCommands),

    /// Business settings
    #[command(subcommand)]
    Settings(freelance::cli::SettingsCommands),

    /// Export data
    #[command(subcommand)]
    Export(freelance::cli::ExportCommands),
}

fn init_tracing(verbose: bool) -> Result<()> {
    let level = if verbose { "debug" } else { "warn" };

    let filter = tracing_subscriber::EnvFilter::try_from_env("FREELANCE_LOG")
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init()
        .map_err(|error| anyhow::anyhow!("failed to initialize tracing subscriber: {error}"))?;

    Ok(())
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose)?;

    // Initialize paths and settings
    let paths = FreelancePaths::new()?;
    let mut settings = Settings::load_or_create(&paths)?;

    // Initialize storage
    let mut storage = Storage::new(paths.clone())?;
    storage.load_all()?;

    match cli.command {
        Some(Commands::Init) => {
            println!("Initializing Freelance CLI at: {}", paths.base_dir().display());
            freelance::storage::initialize_storage(&paths)?;
            println!("Initialization complete!");
            println!();
            println!("Next steps:");
            println!("  freelance settings set --business-name \"Your Business\"");
            println!("  freelance client add \"Client Name\" --email client@example.com");
            println!("  freelance invoice create \"Client Name\" --item \"Design:2:150\"");
        }
        Some(Commands::Config) => {
            println!("Freelance CLI Configuration");
            println!("===========================");
            println!("Base directory: {}", paths.base_dir().display());
            println!("Data directory: {}", paths.data_dir().display());
            println!("Settings file:  {}", paths.settings_file().display());
            println!("Initialized:    {}", if paths.is_initialized() { "yes" } else { "no" });
            println!();
            println!("Settings:");
            println!("  Business:  {}", settings.business_name);
            println!("  Currency:  {}", settings.currency);
            println!("  Tax rate:  {}%", settings.tax_rate.normalize());
            println!("  Numbering: {}", settings.numbering);
        }
        Some(Commands::Dashboard) => {
            let service = DashboardService::new(&storage);
            let summary = service.summary()?;
            print!(
                "{}",
                format_dashboard(
                    &summary,
                    &service.monthly_revenue()?,
                    &service.invoice_status_counts()?,
                    &service.top_clients()?,
                    &settings.currency
                )
            );
        }
        Some(Commands::Client(cmd)) => {
            handle_client_command(&storage, &settings, cmd)?;
        }
        Some(Commands::Project(cmd)) => {
            handle_project_command(&storage, &settings, cmd)?;
        }
        Some(Commands::Time(cmd)) => {
            handle_time_command(&storage, &settings, cmd)?;
        }
        Some(Commands::Invoice(cmd)) => {
            handle_invoice_command(&storage, &settings, cmd)?;
        }
        Some(Commands::Settings(cmd)) => {
            handle_settings_command(&paths, &mut settings, cmd)?;
        }
        Some(Commands::Export(cmd)) => {
            handle_export_command(&storage, &settings, cmd)?;
        }
        None => {
            println!("Freelance CLI - clients, time tracking and invoicing");
            println!();
            println!("Run 'freelance --help' for usage information.");
            println!("Run 'freelance init' to set up the data directory.");
        }
    }

    Ok(())
}
