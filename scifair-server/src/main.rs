//! scifair-server - science fair project service
//!
//! Resolves the root folder, opens (or creates) the database, wires the
//! advisor and blob store into the router and serves until Ctrl+C.

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;
use scifair_common::config::{
    default_config_path, resolve_advisor_api_key, CompiledDefaults, RootFolderInitializer,
    RootFolderResolver, TomlConfig, ROOT_FOLDER_ENV,
};
use scifair_common::db::accounts::purge_expired_sessions;
use scifair_common::db::{get_setting_i64, init_database};
use scifair_server::advisor::OpenAiAdvisor;
use scifair_server::blobs::BlobStore;
use scifair_server::{build_router, AppState, DEFAULT_MAX_UPLOAD_BYTES};
use tokio::signal;
use tracing::{error, info, warn};

/// Command-line arguments for scifair-server
#[derive(Parser, Debug)]
#[command(name = "scifair-server")]
#[command(about = "Science fair project service")]
#[command(version)]
struct Args {
    /// Port to listen on (overrides the config file)
    #[arg(short, long, env = "SCIFAIR_PORT")]
    port: Option<u16>,

    /// Folder holding the database and uploaded files
    #[arg(short, long, env = ROOT_FOLDER_ENV)]
    root_folder: Option<PathBuf>,

    /// Config file (default: <config dir>/scifair/scifair.toml)
    #[arg(short, long)]
    config: Option<PathBuf>,
}

fn init_tracing(config_path: Option<&std::path::Path>) {
    // The subscriber must exist before the config is loaded for real,
    // so only the log level is read here.
    let level = config_path
        .and_then(|path| TomlConfig::load(path).ok())
        .map(|config| config.logging.level)
        .unwrap_or_else(|| CompiledDefaults::for_current_platform().log_level);

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(level)),
        )
        .init();
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    init_tracing(args.config.clone().or_else(default_config_path).as_deref());
    info!("Starting scifair-server v{}", env!("CARGO_PKG_VERSION"));

    let mut config = TomlConfig::load_or_default(args.config.as_deref());
    if let Some(port) = args.port {
        config.port = port;
    }

    let root_folder = RootFolderResolver::new()
        .with_cli_arg(args.root_folder)
        .with_toml(&config)
        .resolve();
    let initializer = RootFolderInitializer::new(root_folder);
    initializer.ensure_directory_exists()?;
    info!("Root folder: {}", initializer.root_folder().display());

    let db_path = initializer.database_path();
    let pool = match init_database(&db_path).await {
        Ok(pool) => {
            info!("Database ready at {}", db_path.display());
            pool
        }
        Err(e) => {
            error!("Failed to open database {}: {}", db_path.display(), e);
            return Err(e.into());
        }
    };

    match purge_expired_sessions(&pool).await {
        Ok(0) => {}
        Ok(purged) => info!("Removed {} expired sessions", purged),
        Err(e) => warn!("Failed to purge expired sessions: {}", e),
    }

    let api_key = match resolve_advisor_api_key(&config) {
        Ok(key) => Some(key),
        Err(e) => {
            warn!("{} - AI features will return errors until a key is set", e);
            None
        }
    };
    let advisor = OpenAiAdvisor::new(&config.advisor, api_key)
        .context("Failed to create advisor HTTP client")?;
    info!(model = %config.advisor.model, "Advisor endpoint: {}", advisor.endpoint());

    let max_upload_bytes =
        get_setting_i64(&pool, "max_upload_bytes", DEFAULT_MAX_UPLOAD_BYTES as i64).await?;
    let max_upload_bytes = usize::try_from(max_upload_bytes).unwrap_or(DEFAULT_MAX_UPLOAD_BYTES);

    let client_api_key = config.client_api_key();
    if client_api_key.is_some() {
        info!("Client API key required on all API requests");
    }

    let blobs = BlobStore::new(initializer.blob_dir(), config.public_base_url());
    let state = AppState::new(pool, Arc::new(advisor), blobs)
        .with_client_api_key(client_api_key)
        .with_max_upload_bytes(max_upload_bytes);
    let app = build_router(state);

    let addr = format!("{}:{}", config.bind_address, config.port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind to {}", addr))?;
    info!("scifair-server listening on http://{}", addr);
    info!("Health check: http://{}/health", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server error")?;

    info!("Server shutdown complete");
    Ok(())
}

/// Resolves on Ctrl+C or SIGTERM
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            error!("Failed to listen for Ctrl+C: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                error!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    info!("Shutdown signal received");
}
