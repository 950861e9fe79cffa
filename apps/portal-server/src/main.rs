//! Portal server binary.
//!
//! Connects to the database, applies migrations and serves the portal REST API.
//!
//! # Usage
//!
//! ```bash
//! portal-server --config portal.yaml
//!
//! # Environment variables override the file
//! PORTAL__DATABASE__URL=postgres://localhost/portal \
//! PORTAL__PORTAL__SESSION_SECRET=change-me \
//! portal-server
//! ```

mod config;
mod shutdown;

use std::{io::IsTerminal, sync::Arc, time::Duration};

use anyhow::Context;
use clap::Parser;
use config::{AppConfig, Cli, DatabaseConfig, LogFormat, LoggingConfig};
use portal_service::PortalServiceModule;
use sea_orm::{ConnectOptions, Database, DatabaseConnection};
use tower_http::{timeout::TimeoutLayer, trace::TraceLayer};
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let mut config = AppConfig::load(cli.config.as_ref()).context("failed to load configuration")?;
    if let Some(listen) = cli.listen {
        config.server.listen_addr = listen;
    }

    init_logging(&config.logging);
    tracing::info!(listen_addr = %config.server.listen_addr, "Starting portal server");

    let db = connect(&config.database).await?;

    let module = PortalServiceModule::new(config.portal.clone());
    module.migrate(&db).await?;
    module.init(Arc::new(db))?;

    let app = module
        .register_rest(axum::Router::new())?
        .layer(TimeoutLayer::new(config.server.request_timeout))
        .layer(TraceLayer::new_for_http());

    let listener = tokio::net::TcpListener::bind(config.server.listen_addr)
        .await
        .with_context(|| format!("failed to bind {}", config.server.listen_addr))?;

    tracing::info!("Server ready, accepting connections");
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown::shutdown_signal())
        .await?;

    tracing::info!("Server shutdown complete");
    Ok(())
}

/// Initializes the logging system.
///
/// `RUST_LOG` wins over the configured level; `Auto` picks JSON for non-TTY stdout.
fn init_logging(config: &LoggingConfig) {
    let default_level = config.level.as_deref().unwrap_or("info");
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    let use_json = match config.format {
        LogFormat::Json => true,
        LogFormat::Text => false,
        LogFormat::Auto => !std::io::stdout().is_terminal(),
    };

    if use_json {
        tracing_subscriber::registry()
            .with(env_filter)
            .with(fmt::layer().json().flatten_event(true).with_current_span(false))
            .init();
    } else {
        tracing_subscriber::registry().with(env_filter).with(fmt::layer()).init();
    }
}

async fn connect(config: &DatabaseConfig) -> anyhow::Result<DatabaseConnection> {
    let mut opt = ConnectOptions::new(config.url.clone());
    opt.max_connections(config.max_connections)
        .connect_timeout(config.connect_timeout)
        .idle_timeout(Duration::from_secs(600))
        .sqlx_logging(false);

    let db = Database::connect(opt)
        .await
        .context("failed to connect to database")?;
    db.ping().await.context("database ping failed")?;
    tracing::info!("Database connection established");
    Ok(db)
}
