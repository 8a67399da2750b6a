//! Définition et implémentation des commandes CLI

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Subcommand;
use tracing::info;

use alberta_legal::{MunicipalityRegistry, PropertyDescriptor};
use landuse_feasibility::config::{self, ServerConfig};
use landuse_feasibility::server::{self, AppState};
use landuse_feasibility::{analyze_property, FeasibilityReport, PropertyAnalysis};

#[derive(Subcommand)]
pub enum Commands {
    /// Run the HTTP API server
    Serve {
        /// Listen address (overrides LANDUSE_HOST)
        #[arg(long)]
        host: Option<String>,

        /// Listen port (overrides LANDUSE_PORT)
        #[arg(short, long)]
        port: Option<u16>,

        /// Reports output directory (overrides LANDUSE_REPORTS_DIR)
        #[arg(long)]
        reports_dir: Option<PathBuf>,
    },

    /// Analyze a single property and print the result
    Analyze {
        /// Civic or rural address
        #[arg(short, long, default_value = "")]
        address: String,

        /// Legal description (e.g. "NE 12-45-26-W4M")
        #[arg(short, long, default_value = "")]
        legal: String,

        /// Additional information (acreage, intentions, services)
        #[arg(short, long, default_value = "")]
        info: String,

        /// Latitude of the property (requires --lon)
        #[arg(long, requires = "lon", allow_hyphen_values = true)]
        lat: Option<f64>,

        /// Longitude of the property (requires --lat)
        #[arg(long, requires = "lat", allow_hyphen_values = true)]
        lon: Option<f64>,

        /// Print the analysis as JSON
        #[arg(long)]
        json: bool,

        /// Also write the report files
        #[arg(long)]
        report: bool,

        /// Reports output directory (overrides LANDUSE_REPORTS_DIR)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// List supported municipalities
    Municipalities {
        /// Print as JSON
        #[arg(long)]
        json: bool,
    },

    /// Render a stored analysis (JSON) as a report
    Report {
        /// Analysis JSON file (output of `analyze --json`)
        #[arg(short, long)]
        input: PathBuf,

        /// Reports output directory (overrides LANDUSE_REPORTS_DIR)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

/// Configuration d'environnement + surcharge éventuelle du registre
fn base_config(municipalities: Option<PathBuf>) -> ServerConfig {
    let mut config = ServerConfig::from_env();
    if municipalities.is_some() {
        config.municipalities = municipalities;
    }
    config
}

pub async fn cmd_serve(
    municipalities: Option<PathBuf>,
    host: Option<String>,
    port: Option<u16>,
    reports_dir: Option<PathBuf>,
) -> Result<()> {
    let mut config = base_config(municipalities);
    if let Some(host) = host {
        config.host = host;
    }
    if let Some(port) = port {
        config.port = port;
    }
    if let Some(dir) = reports_dir {
        config.reports_dir = dir;
    }

    let registry = config.load_registry()?;
    info!(
        address = %config.bind_address(),
        reports_dir = %config.reports_dir.display(),
        "Starting server"
    );
    server::serve(AppState::new(registry, config)).await
}

#[allow(clippy::too_many_arguments)]
pub fn cmd_analyze(
    municipalities: Option<PathBuf>,
    address: String,
    legal: String,
    info_text: String,
    coordinates: Option<(f64, f64)>,
    json: bool,
    save_report: bool,
    output: Option<PathBuf>,
) -> Result<()> {
    let config = base_config(municipalities);
    let registry = config.load_registry()?;

    let mut descriptor = PropertyDescriptor::new(address, legal, info_text);
    if let Some((lat, lon)) = coordinates {
        descriptor = descriptor.with_coordinates(lat, lon);
    }
    if descriptor.is_blank() {
        anyhow::bail!("Nothing to analyze: provide --address, --legal or --info");
    }

    let analysis = analyze_property(&descriptor, &registry);

    if json {
        println!("{}", serde_json::to_string_pretty(&analysis)?);
    }

    let report = FeasibilityReport::new(analysis);
    if !json {
        report.display();
    }

    if save_report {
        let dir = output.unwrap_or(config.reports_dir);
        report.save(&dir)?;
    }

    info!("{}", report.summary());
    Ok(())
}

pub fn cmd_municipalities(municipalities: Option<PathBuf>, json: bool) -> Result<()> {
    let registry: MunicipalityRegistry = config::load_registry(municipalities.as_deref())?;
    let sorted = registry.sorted_by_name();

    if json {
        println!("{}", serde_json::to_string_pretty(&sorted)?);
        return Ok(());
    }

    println!("{:<22} {:<8} {:>10}  {}", "NAME", "TYPE", "POPULATION", "WEBSITE");
    for record in sorted {
        let population = record
            .population
            .map(|p| p.to_string())
            .unwrap_or_else(|| "-".into());
        println!(
            "{:<22} {:<8} {:>10}  {}",
            record.name,
            record.kind.to_string(),
            population,
            record.website
        );
    }
    Ok(())
}

pub fn cmd_report(input: &Path, output: Option<PathBuf>) -> Result<()> {
    let content = std::fs::read_to_string(input)
        .context(format!("Failed to read analysis file: {}", input.display()))?;
    let analysis: PropertyAnalysis =
        serde_json::from_str(&content).context("Failed to parse analysis JSON")?;

    let report = FeasibilityReport::new(analysis);
    let dir = output.unwrap_or_else(|| ServerConfig::from_env().reports_dir);
    let files = report.save(&dir)?;

    info!(json = %files.json.display(), text = %files.text.display(), "{}", report.summary());
    Ok(())
}
