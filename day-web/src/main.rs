//! day-web - site backend service
//!
//! Zero-config startup: every setting has a default, and a missing config
//! file only produces a warning.

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;
use day_common::config::{database_path, default_config_path, resolve_root_folder, TomlConfig};
use day_common::db::init_database;
use day_web::search::{HostedSearchIndex, InMemoryIndex, SearchIndex};
use day_web::{build_router, AppState};
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

/// Command-line arguments
#[derive(Debug, Parser)]
#[command(name = "day-web", version, about = "Site backend service")]
struct Cli {
    /// Path to config.toml
    #[arg(long)]
    config: Option<PathBuf>,

    /// Folder holding the database
    #[arg(long)]
    root_folder: Option<PathBuf>,

    /// HTTP port (overrides config)
    #[arg(long)]
    port: Option<u16>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let config_path = cli.config.clone().or_else(default_config_path);
    let loaded = config_path.as_deref().map(TomlConfig::load_optional);
    let config = match &loaded {
        Some(Ok(Some(config))) => config.clone(),
        _ => TomlConfig::default(),
    };

    // RUST_LOG wins over the configured level
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.logging.level));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    info!("Starting day-web v{}", env!("CARGO_PKG_VERSION"));

    match (&config_path, &loaded) {
        (Some(path), Some(Ok(Some(_)))) => info!("Loaded config: {}", path.display()),
        (Some(path), Some(Ok(None))) => {
            warn!("Config file not found: {}, using defaults", path.display())
        }
        (Some(path), Some(Err(e))) => {
            warn!("Failed to load {}: {}, using defaults", path.display(), e)
        }
        _ => warn!("Could not determine config directory, using defaults"),
    }

    let root_folder = resolve_root_folder(cli.root_folder.as_deref(), &config);
    let db_path = database_path(&root_folder);
    info!("Database path: {}", db_path.display());

    let pool = match init_database(&db_path).await {
        Ok(pool) => {
            info!("✓ Connected to database");
            pool
        }
        Err(e) => {
            error!("Failed to open database: {}", e);
            return Err(e.into());
        }
    };

    let backend_secret = config.backend_secret();
    if backend_secret.is_none() {
        warn!("No backend secret configured; sketch routes will reject all requests");
    }

    let search: Arc<dyn SearchIndex> = match (&config.search.app_id, &config.search.api_key) {
        (Some(app_id), Some(api_key)) => {
            let index = HostedSearchIndex::new(app_id, api_key, &config.search.index_name)
                .context("Failed to build search client")?;
            info!("Using hosted search index '{}'", config.search.index_name);
            Arc::new(index)
        }
        _ => {
            warn!("Search index not configured; event listing will be empty");
            Arc::new(InMemoryIndex::new(&config.search.index_name, Vec::new()))
        }
    };

    let state = AppState::new(pool, backend_secret, search)
        .with_hits_per_page(config.search.hits_per_page);
    let app = build_router(state);

    let port = cli.port.unwrap_or(config.port);
    let addr = format!("{}:{}", config.host, port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;
    info!("day-web listening on http://{}", addr);
    info!("Health check: http://{}/health", addr);

    axum::serve(listener, app).await?;

    Ok(())
}
