//! Server entrypoint for vantage
//!
//! Wires together all layers using dependency injection: configuration
//! decides the generation mode once at startup, SQLite adapters implement the
//! repository ports, and the axum router serves the HTTP API.

use anyhow::{Context, Result};
use clap::Parser;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;
use vantage_application::{GeneratePerspectivesUseCase, PerspectiveGenerator};
use vantage_infrastructure::config::ConfigLoader;
use vantage_infrastructure::providers::OpenAiGateway;
use vantage_infrastructure::store::{
    Database, SqliteArticleRepository, SqlitePersonaRepository, SqlitePerspectiveRepository,
};
use vantage_infrastructure::seed;
use vantage_presentation::{build_router, AppState};

#[derive(Parser, Debug)]
#[command(name = "vantage-server", about = "News commentary server", version)]
struct Cli {
    /// Path to a config file (merged over ./vantage.toml and the global config)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Override the configured bind address
    #[arg(short, long)]
    bind: Option<String>,

    /// Load the built-in personas and sample articles, then continue serving
    #[arg(long)]
    seed: bool,

    /// Increase log verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let filter = match cli.verbose {
        0 => EnvFilter::new("warn"),
        1 => EnvFilter::new("info"),
        2 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"),
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();

    let config = ConfigLoader::load(cli.config.as_ref())
        .map_err(|e| anyhow::anyhow!(e))
        .context("failed to load configuration")?;

    // === Storage ===
    let db = Database::open(&config.database.path)
        .with_context(|| format!("failed to open database at {}", config.database.path))?;
    let articles = Arc::new(SqliteArticleRepository::new(db.pool()));
    let personas = Arc::new(SqlitePersonaRepository::new(db.pool()));
    let perspectives = Arc::new(SqlitePerspectiveRepository::new(db.pool()));

    if cli.seed {
        let report = seed::load(personas.as_ref(), articles.as_ref()).await?;
        info!(
            personas = report.personas_created,
            articles = report.articles_created,
            "seed data loaded"
        );
    }

    // === Generation mode, decided once for the process lifetime ===
    let generator = match config.live_credential() {
        Some(key) => {
            let gateway = OpenAiGateway::new(key, &config.model)?;
            info!(model = %config.model.name, "live generation enabled");
            PerspectiveGenerator::live(Arc::new(gateway))
        }
        None => {
            info!("no model credential configured, using demo generation");
            PerspectiveGenerator::demo()
        }
    };

    if config.admin.token.is_none() {
        warn!("no admin token configured; all write endpoints will reject requests");
    }

    let generate = Arc::new(GeneratePerspectivesUseCase::new(
        generator,
        articles.clone(),
        personas.clone(),
        perspectives.clone(),
    ));

    let state = AppState {
        articles,
        personas,
        perspectives,
        generate,
        admin_token: config.admin.token.clone(),
    };
    let router = build_router(state);

    let bind = cli.bind.unwrap_or(config.server.bind);
    let listener = tokio::net::TcpListener::bind(&bind)
        .await
        .with_context(|| format!("failed to bind {}", bind))?;
    info!(%bind, "vantage server listening");

    axum::serve(listener, router).await?;
    Ok(())
}
