//! Point d'entrée CLI pour safe-signal

use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;
use tracing::{debug, Level};
use tracing_subscriber::{fmt, EnvFilter};

use safe_signal::cli::{self, Commands};
use safe_signal::Config;

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

/// Calculer des zones de danger à partir de signalements géolocalisés
#[derive(Parser)]
#[command(name = "safe-signal")]
#[command(author, version)]
#[command(about = "Calculer des zones de danger à partir de signalements géolocalisés")]
#[command(long_about = "Regroupe les marqueurs proches (seuil de distance) et renvoie le contour convexe de chaque groupe.\n\nL'entrée est un snapshot de marqueurs `lat&long&type&date&heure`, terminé par `end`.")]
struct Cli {
    /// Augmenter la verbosité (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Mode silencieux
    #[arg(short, long, global = true)]
    quiet: bool,

    /// Fichier de configuration JSON (défaut : env SAFE_SIGNAL_CONFIG / preset embarqué)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

fn main() -> Result<()> {
    // Charger .env avant tout
    load_env();

    let cli = Cli::parse();

    // Configurer le logging
    init_logging(cli.verbose, cli.quiet);

    let config = Config::resolve(cli.config.as_deref())?;
    debug!(
        threshold = config.threshold,
        kinds = config.marker_kinds.len(),
        "Configuration loaded"
    );

    match &cli.command {
        Commands::Zones(args) => cli::cmd_zones(&config, args)?,
        Commands::Markers(args) => cli::cmd_markers(&config, args)?,
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

    // stdout est réservé aux données
    fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(true)
        .with_file(false)
        .with_line_number(false)
        .init();
}
