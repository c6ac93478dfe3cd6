mod config;

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use axum::routing::get;
use axum::{Json, Router};
use clap::{Parser, Subcommand};
use sea_orm::{ConnectOptions, Database, DatabaseConnection};
use sea_orm_migration::MigratorTrait;
use tokio::net::TcpListener;
use tower_http::cors::CorsLayer;
use tower_http::limit::RequestBodyLimitLayer;
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;
use tracing::info;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::EnvFilter;
use utoipa::OpenApi;

use aquaserve_auth::{SessionResolver, StaticSessionResolver};
use aquaserve_erp::api::rest::openapi::ApiDoc;
use aquaserve_erp::infra::storage::migrations::Migrator;
use aquaserve_erp::ErpModule;

use crate::config::{AppConfig, DatabaseConfig, LoggingConfig, ServerConfig};

/// AquaServe - ERP backend for a water purifier service business
#[derive(Parser)]
#[command(name = "aquaserve-server")]
#[command(about = "AquaServe - ERP backend for a water purifier service business")]
#[command(version)]
struct Cli {
    /// Path to configuration file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Port override for the HTTP server (overrides config)
    #[arg(short, long)]
    port: Option<u16>,

    /// Print effective configuration (JSON, secrets redacted) and exit
    #[arg(long)]
    print_config: bool,

    /// Log verbosity level (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the server
    Run,
    /// Validate configuration and exit
    Check,
    /// Apply migrations and load the demo dataset
    Seed,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    if let Some(path) = cli.config.as_deref() {
        if !path.is_file() {
            anyhow::bail!("config file does not exist: {}", path.display());
        }
    }

    let mut config = AppConfig::load(cli.config.as_deref())?;
    if let Some(port) = cli.port {
        config.server.set_port(port)?;
    }

    // Before logging init, so stdout stays parseable.
    if cli.print_config {
        println!("{}", serde_json::to_string_pretty(&config.redacted())?);
        return Ok(());
    }

    init_logging(&config.logging, cli.verbose);

    match cli.command.unwrap_or(Commands::Run) {
        Commands::Run => run_server(config).await,
        Commands::Check => check_config(&config),
        Commands::Seed => seed_demo_data(&config).await,
    }
}

fn init_logging(cfg: &LoggingConfig, verbosity: u8) {
    let default_filter = match verbosity {
        0 => cfg.level.clone(),
        1 => "info".to_owned(),
        2 => "debug".to_owned(),
        _ => "trace".to_owned(),
    };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));
    if cfg.json {
        tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer().json())
            .init();
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer())
            .init();
    }
}

fn check_config(config: &AppConfig) -> Result<()> {
    config
        .server
        .bind_addr
        .parse::<std::net::SocketAddr>()
        .with_context(|| format!("invalid bind address: {}", config.server.bind_addr))?;
    println!("Configuration is valid");
    println!("{}", serde_json::to_string_pretty(&config.redacted())?);
    Ok(())
}

async fn connect_db(cfg: &DatabaseConfig) -> Result<DatabaseConnection> {
    let mut opts = ConnectOptions::new(&cfg.url);
    opts.max_connections(cfg.max_connections);
    Database::connect(opts)
        .await
        .with_context(|| format!("connecting to {}", config::redact_db_url(&cfg.url)))
}

async fn seed_demo_data(config: &AppConfig) -> Result<()> {
    let db = connect_db(&config.database).await?;
    Migrator::up(&db, None).await.context("applying migrations")?;
    aquaserve_erp::seed::run(&db).await.context("seeding demo data")?;
    println!("Demo dataset ready");
    Ok(())
}

async fn run_server(config: AppConfig) -> Result<()> {
    info!("AquaServe server starting");

    let db = connect_db(&config.database).await?;
    Migrator::up(&db, None).await.context("applying migrations")?;

    if config.auth.tokens.is_empty() {
        tracing::warn!("auth.tokens is empty; every request will be rejected with 401");
    }
    let resolver = StaticSessionResolver::new(config.auth.tokens).into_shared();

    let module = ErpModule::new(db);
    let app = build_app(&module, resolver, &config.server);

    let listener = TcpListener::bind(&config.server.bind_addr)
        .await
        .with_context(|| format!("binding {}", config.server.bind_addr))?;
    info!(addr = %config.server.bind_addr, "listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("server failed")?;

    info!("server stopped");
    Ok(())
}

/// Assemble the application router: the ERP module under `/api`, liveness
/// and the OpenAPI document at the top level, shared middleware around
/// everything.
fn build_app(
    module: &ErpModule,
    resolver: Arc<dyn SessionResolver>,
    server: &ServerConfig,
) -> Router {
    let mut app = Router::new()
        .nest("/api", module.router(resolver))
        .route(
            "/healthz",
            get(|| async { Json(serde_json::json!({"status": "ok"})) }),
        )
        .route(
            "/api-docs/openapi.json",
            get(|| async { Json(ApiDoc::openapi()) }),
        )
        .layer(RequestBodyLimitLayer::new(server.body_limit_bytes))
        .layer(TimeoutLayer::new(Duration::from_secs(
            server.request_timeout_secs,
        )));
    if let Some(cors) = cors_layer(server) {
        app = app.layer(cors);
    }
    app.layer(TraceLayer::new_for_http())
}

/// Build a CORS layer from config. Returns `None` when no origins are
/// configured.
fn cors_layer(server: &ServerConfig) -> Option<CorsLayer> {
    if server.cors_allowed_origins.is_empty() {
        return None;
    }

    let mut layer = CorsLayer::new()
        .allow_methods(tower_http::cors::Any)
        .allow_headers(tower_http::cors::Any);

    if server.cors_allowed_origins.iter().any(|o| o == "*") {
        layer = layer.allow_origin(tower_http::cors::Any);
    } else {
        let origins: Vec<axum::http::HeaderValue> = server
            .cors_allowed_origins
            .iter()
            .filter_map(|s| axum::http::HeaderValue::from_str(s).ok())
            .collect();
        layer = layer.allow_origin(origins);
    }
    Some(layer)
}

async fn shutdown_signal() {
    #[cfg(unix)]
    {
        use tokio::signal::unix::{signal, SignalKind};
        let Ok(mut sigterm) = signal(SignalKind::terminate()) else {
            let _ = tokio::signal::ctrl_c().await;
            info!("shutdown signal received");
            return;
        };
        tokio::select! {
            _ = sigterm.recv() => {}
            _ = tokio::signal::ctrl_c() => {}
        }
    }
    #[cfg(not(unix))]
    {
        let _ = tokio::signal::ctrl_c().await;
    }
    info!("shutdown signal received");
}
