//! Point d'entrée CLI pour landuse-feasibility

use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;
use tracing::Level;
use tracing_subscriber::{fmt, EnvFilter};

// Charger .env au démarrage
fn load_env() {
    // Chercher .env dans le répertoire courant ou parent
    if dotenvy::dotenv().is_err() {
        // Essayer depuis le répertoire du binaire
        if let Ok(exe) = std::env::current_exe() {
            if let Some(dir) = exe.parent() {
                let _ = dotenvy::from_path(dir.join(".env"));
            }
        }
    }
}

mod cli;

use cli::Commands;

/// Étude de faisabilité d'utilisation du sol pour les propriétés albertaines
#[derive(Parser)]
#[command(name = "landuse-feasibility")]
#[command(author, version)]
#[command(about = "Preliminary land use feasibility analysis for Alberta properties")]
#[command(long_about = "Parses Alberta legal descriptions and addresses, resolves the municipality and produces a preliminary feasibility report.\n\nRun 'serve' for the HTTP API or 'analyze' for a one-off analysis.")]
struct Cli {
    /// Augmenter la verbosité (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Mode silencieux
    #[arg(short, long, global = true)]
    quiet: bool,

    /// Municipality registry JSON (overrides LANDUSE_MUNICIPALITIES)
    #[arg(long, global = true)]
    municipalities: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Charger .env avant tout
    load_env();

    let cli = Cli::parse();

    // Configurer le logging
    init_logging(cli.verbose, cli.quiet);

    match cli.command {
        Commands::Serve {
            host,
            port,
            reports_dir,
        } => {
            cli::cmd_serve(cli.municipalities, host, port, reports_dir).await?;
        }
        Commands::Analyze {
            address,
            legal,
            info,
            lat,
            lon,
            json,
            report,
            output,
        } => {
            let coordinates = lat.zip(lon);
            cli::cmd_analyze(
                cli.municipalities,
                address,
                legal,
                info,
                coordinates,
                json,
                report,
                output,
            )?;
        }
        Commands::Municipalities { json } => {
            cli::cmd_municipalities(cli.municipalities, json)?;
        }
        Commands::Report { input, output } => {
            cli::cmd_report(&input, output)?;
        }
    }

    Ok(())
}

fn init_logging(verbose: u8, quiet: bool) {
    let level = match (quiet, verbose) {
        (true, _) => Level::WARN,
        (_, 0) => Level::INFO,
        (_, 1) => Level::DEBUG,
        (_, _) => Level::TRACE,
    };

    let filter = EnvFilter::from_default_env().add_directive(level.into());

    fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_file(false)
        .with_line_number(false)
        .with_writer(std::io::stderr)
        .init();
}
