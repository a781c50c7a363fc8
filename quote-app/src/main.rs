use std::path::PathBuf;

use anyhow::Context;
use clap::{Args, Parser, Subcommand};
use quote_core::{AgencyApi, DeliveryMode, FollowupStatus, LeadField, LeadStats};
use rust_decimal::Decimal;
use tracing::{debug, info};

use quote_app::app::{self, EstimateReport, LeadReport};
use quote_app::{AppSettings, ContactForm, EstimateController, logging, utils};

// ─── CLI definition ──────────────────────────────────────────────────────────

/// Project cost calculator for the agency's website.
///
/// Loads the published price list (falling back to the bundled copy when the
/// lead service is unreachable), prices a project and optionally sends it to
/// the agency as a lead.
#[derive(Debug, Parser)]
#[command(name = "cost-estimator", version)]
struct Cli {
    /// Settings file (TOML). Defaults to $COST_ESTIMATOR_SETTINGS or
    /// ./cost-estimator.toml.
    #[arg(long, global = true)]
    settings: Option<PathBuf>,

    /// Client backend (`http` or `memory`).
    #[arg(long, global = true)]
    backend: Option<String>,

    /// Base URL of the lead service.
    #[arg(long, global = true)]
    base_url: Option<String>,

    /// Log level or filter directive.
    #[arg(long, global = true)]
    log_level: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Price a project and optionally submit it as a lead.
    Estimate(EstimateArgs),
    /// Send a contact request without an estimate.
    Contact(ContactArgs),
    /// Review and update submitted leads.
    #[command(subcommand)]
    Leads(LeadsCommand),
}

#[derive(Debug, Args)]
struct EstimateArgs {
    /// Project type id (e.g. `web`, `mobile`, `both`).
    #[arg(long = "type", value_name = "ID")]
    project_type: String,

    /// Complexity id (e.g. `mvp`, `standard`, `enterprise`).
    #[arg(long, value_name = "ID")]
    complexity: String,

    /// Power-up or sub-option ids, comma separated (e.g. `ai,ai-chat`).
    #[arg(long = "addon", value_name = "ID", value_delimiter = ',')]
    addons: Vec<String>,

    /// Delivery mode: standard, express or custom.
    #[arg(long, default_value = "standard", value_parser = parse_delivery_mode)]
    delivery: DeliveryMode,

    /// Target months for custom delivery.
    #[arg(long)]
    months: Option<u32>,

    /// Installment plan length in years (e.g. `1.5`).
    #[arg(long, value_parser = parse_years)]
    tenure: Option<Decimal>,

    /// Pay the whole project upfront.
    #[arg(long)]
    upfront: bool,

    /// Price from a local `.toml` or `.json` file instead of the service.
    #[arg(long)]
    pricing: Option<PathBuf>,

    #[command(flatten)]
    contact: LeadArgs,

    /// Send the estimate to the agency (requires name, email and phone).
    #[arg(long)]
    submit: bool,
}

#[derive(Debug, Args)]
struct LeadArgs {
    #[arg(long)]
    name: Option<String>,

    #[arg(long)]
    email: Option<String>,

    #[arg(long)]
    phone: Option<String>,
}

impl LeadArgs {
    fn fields(&self) -> [(LeadField, &str); 3] {
        [
            (LeadField::Name, self.name.as_deref().unwrap_or_default()),
            (LeadField::Email, self.email.as_deref().unwrap_or_default()),
            (LeadField::Phone, self.phone.as_deref().unwrap_or_default()),
        ]
    }
}

#[derive(Debug, Args)]
struct ContactArgs {
    #[command(flatten)]
    contact: LeadArgs,
}

#[derive(Debug, Subcommand)]
enum LeadsCommand {
    /// List leads with summary statistics.
    List {
        /// Only leads whose name or email contains this text.
        #[arg(long)]
        search: Option<String>,

        /// Only leads in this follow-up status.
        #[arg(long, value_parser = parse_status)]
        status: Option<FollowupStatus>,
    },
    /// Change the follow-up status of a lead.
    SetStatus {
        id: String,

        /// Pending, Contacted, "In Progress", Converted or Lost.
        #[arg(value_parser = parse_status)]
        status: FollowupStatus,
    },
}

fn parse_delivery_mode(s: &str) -> Result<DeliveryMode, String> {
    DeliveryMode::parse(s).ok_or_else(|| format!("unknown delivery mode '{s}'"))
}

fn parse_years(s: &str) -> Result<Decimal, String> {
    utils::parse_decimal(s).map_err(|e| e.to_string())
}

fn parse_status(s: &str) -> Result<FollowupStatus, String> {
    FollowupStatus::parse(s).ok_or_else(|| format!("unknown status '{s}'"))
}

// ─── settings and tracing ────────────────────────────────────────────────────

/// Settings file, environment and flags, in increasing precedence.
fn resolve_settings(cli: &Cli) -> anyhow::Result<AppSettings> {
    let (mut settings, path) = AppSettings::load(cli.settings.as_deref())?;
    if let Some(backend) = &cli.backend {
        settings.api.backend = backend.clone();
    }
    if let Some(url) = &cli.base_url {
        settings.api.base_url = url.clone();
    }
    if let Some(level) = &cli.log_level {
        settings.logging.level = level.clone();
    }

    logging::init_from_settings(&settings.logging).context("Failed to set up logging")?;
    debug!(app = logging::app_name(), settings = ?path, "settings loaded");
    Ok(settings)
}

// ─── commands ────────────────────────────────────────────────────────────────

async fn run_estimate(
    api: &dyn AgencyApi,
    args: EstimateArgs,
) -> anyhow::Result<()> {
    let loaded = app::load_pricing(api, args.pricing.as_deref()).await?;
    let mut controller = EstimateController::new(loaded.config);

    controller.select_project_type(&args.project_type)?;
    controller.next()?;
    controller.select_complexity(&args.complexity)?;
    controller.next()?;
    controller.select_addons(args.addons.iter().map(String::as_str))?;
    controller.next()?;
    controller.set_delivery_mode(args.delivery)?;
    if let Some(months) = args.months {
        controller.set_custom_months(months)?;
    }
    controller.next()?;
    controller.set_pay_upfront(args.upfront)?;
    if let Some(years) = args.tenure {
        controller.set_tenure(years)?;
    }

    let quotation = controller.quotation();
    println!(
        "{}",
        EstimateReport {
            config: controller.config(),
            selection: controller.selection(),
            quotation: &quotation,
        }
    );

    if args.submit {
        for (field, value) in args.contact.fields() {
            controller.set_lead_field(field, value)?;
        }
        controller
            .submit(api)
            .await
            .context("Estimate was not submitted")?;
        println!("\nThanks! The agency will be in touch shortly.");
    }

    Ok(())
}

async fn run_contact(
    api: &dyn AgencyApi,
    args: ContactArgs,
) -> anyhow::Result<()> {
    let mut form = ContactForm::new();
    for (field, value) in args.contact.fields() {
        form.set_field(field, value)?;
    }
    form.submit(api)
        .await
        .context("Contact request was not sent")?;
    println!("Message sent. The agency will get back to you soon.");
    Ok(())
}

async fn run_leads(
    api: &dyn AgencyApi,
    command: LeadsCommand,
) -> anyhow::Result<()> {
    match command {
        LeadsCommand::List { search, status } => {
            let leads = api.list_leads().await.context("Failed to fetch leads")?;
            let shown = app::select_leads(&leads, search.as_deref(), status);

            info!("Fetched {} leads, showing {}", leads.len(), shown.len());
            println!(
                "{}",
                LeadReport {
                    leads: &shown,
                    stats: LeadStats::from_leads(&leads),
                }
            );
        }
        LeadsCommand::SetStatus { id, status } => {
            api.update_lead_status(&id, status)
                .await
                .with_context(|| format!("Failed to update lead {id}"))?;
            println!("Lead {id} is now {status}.");
        }
    }
    Ok(())
}

// ─── entry point ─────────────────────────────────────────────────────────────

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let settings = resolve_settings(&cli)?;

    let api = app::connect(&settings.api_config()).await?;

    match cli.command {
        Command::Estimate(args) => run_estimate(&*api, args).await,
        Command::Contact(args) => run_contact(&*api, args).await,
        Command::Leads(command) => run_leads(&*api, command).await,
    }
}
