use std::fs::File;
use std::io;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use quote_core::{ApiConfig, filter_leads};
use quote_core::api::factory::DEFAULT_BASE_URL;
use quote_data::LeadCsvExporter;
use tracing::info;
use tracing_subscriber::EnvFilter;

/// Export the agency's leads to CSV.
///
/// Columns: id, created_at, form_type, status, connected, name, email,
/// phone, project_type, complexity, total_project_value,
/// monthly_subscription, delivery_time.
#[derive(Parser, Debug)]
#[command(name = "leads-export")]
#[command(version, about, long_about = None)]
struct Args {
    /// Write to this file instead of stdout
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Only export leads whose name or email contains this text
    #[arg(short, long)]
    search: Option<String>,

    /// Client backend (`http` or `memory`)
    #[arg(short, long, default_value = "http")]
    backend: String,

    /// Base URL of the lead service
    #[arg(long, env = "COST_ESTIMATOR_API_URL", default_value = DEFAULT_BASE_URL)]
    base_url: String,

    /// Request timeout in seconds
    #[arg(long, default_value_t = 10)]
    timeout: u64,
}

#[tokio::main]
async fn main() -> Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::from("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .without_time()
        .with_target(false)
        .init();

    let args = Args::parse();

    let config = ApiConfig {
        backend: args.backend,
        base_url: args.base_url,
        timeout_secs: args.timeout,
    };
    let api = quote_http::default_registry()
        .create(&config)
        .await
        .with_context(|| format!("Failed to create '{}' client", config.backend))?;

    let leads = api
        .list_leads()
        .await
        .with_context(|| format!("Failed to fetch leads from {}", config.base_url))?;
    let selected = filter_leads(&leads, args.search.as_deref().unwrap_or_default());

    info!("Fetched {} leads, exporting {}", leads.len(), selected.len());

    let written = match &args.output {
        Some(path) => {
            let file = File::create(path)
                .with_context(|| format!("Failed to create: {}", path.display()))?;
            LeadCsvExporter::write(file, selected)
                .with_context(|| format!("Failed to write CSV: {}", path.display()))?
        }
        None => LeadCsvExporter::write(io::stdout().lock(), selected)
            .context("Failed to write CSV to stdout")?,
    };

    info!("Exported {} leads.", written);

    Ok(())
}
