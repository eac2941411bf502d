//! Snowdash
//!
//! Run with: cargo run -- [serve|fetch-font|export|init-config]
//!
//! # Configuration
//!
//! Read from `--config`, else the default locations, then overridden by:
//! - `SNOWDASH_HOST`, `SNOWDASH_PORT`: Address to bind (default: 0.0.0.0:8501)
//! - `SNOWDASH_FONT_PATH`, `SNOWDASH_FONT_URL`: Where the font lives and comes from
//! - `SNOWDASH_FONT_FALLBACK`: `fail` or `system`
//! - `SNOWDASH_LOG_LEVEL`, `SNOWDASH_LOG_FORMAT`: Logging (`RUST_LOG` wins over the level)

use anyhow::Context;
use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use snowdash::api::{serve, AppState};
use snowdash::config::{generate_default_config, Config, LoggingConfig};
use snowdash::data::DatasetCache;
use snowdash::font::{FontBootstrapper, FontHandle};
use snowdash::page::{font_file_url, DashboardRenderer};

#[derive(Parser)]
#[command(name = "snowdash")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Snowboarding statistics dashboard")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Config file (default: search the usual locations)
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Bootstrap the font and serve the dashboard
    Serve,

    /// Download the font if it is missing, then exit
    FetchFont,

    /// Render the dashboard once into a static HTML file
    Export {
        /// Output file
        #[arg(short, long, default_value = "dashboard.html")]
        output: PathBuf,
    },

    /// Print a default config file
    InitConfig,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    if let Some(Commands::InitConfig) = cli.command {
        print!("{}", generate_default_config());
        return Ok(());
    }

    let config = match &cli.config {
        Some(path) => Config::load_with_env(path)?,
        None => Config::load_default(),
    };

    init_tracing(&config.logging);

    match cli.command.unwrap_or(Commands::Serve) {
        Commands::Serve => run_server(config).await,
        Commands::FetchFont => fetch_font(config).await,
        Commands::Export { output } => export(config, &output).await,
        Commands::InitConfig => Ok(()),
    }
}

fn init_tracing(logging: &LoggingConfig) {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&logging.level));

    let registry = tracing_subscriber::registry().with(filter);

    if logging.format == "json" {
        registry.with(tracing_subscriber::fmt::layer().json()).init();
    } else {
        registry.with(tracing_subscriber::fmt::layer()).init();
    }
}

async fn bootstrap_font(config: &Config) -> anyhow::Result<FontHandle> {
    let bootstrapper = FontBootstrapper::new(config.font.clone())?;
    let font = bootstrapper
        .ensure_font()
        .await
        .context("Font bootstrap failed")?;
    Ok(font)
}

async fn run_server(config: Config) -> anyhow::Result<()> {
    tracing::info!("Starting snowdash v{}", env!("CARGO_PKG_VERSION"));

    let font = bootstrap_font(&config).await?;

    let datasets = DatasetCache::builtin();
    let loaded = datasets.get();
    tracing::info!(
        trend_rows = loaded.trend.len(),
        resorts = loaded.resorts.len(),
        countries = loaded.ranking.len(),
        "Datasets ready"
    );

    let server_config = config.server.clone();
    let state = AppState::new(datasets, font, config.server);
    serve(state, &server_config).await?;

    Ok(())
}

async fn fetch_font(config: Config) -> anyhow::Result<()> {
    let font = bootstrap_font(&config).await?;

    match font.path() {
        Some(path) => println!("{} -> {}", font.family(), path.display()),
        None => println!("{} (system default)", font.family()),
    }
    Ok(())
}

async fn export(config: Config, output: &Path) -> anyhow::Result<()> {
    let font = bootstrap_font(&config).await?;

    let font_url = font.path().and_then(font_file_url).unwrap_or_default();
    let renderer = DashboardRenderer::new(&font, font_url);

    let datasets = DatasetCache::builtin();
    let html = renderer.render(&datasets.get())?;

    tokio::fs::write(output, html)
        .await
        .with_context(|| format!("Failed to write {}", output.display()))?;

    tracing::info!(output = ?output, "Dashboard exported");
    println!("Exported dashboard to {}", output.display());
    Ok(())
}
