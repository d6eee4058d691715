// crates/server/src/main.rs
//! liftlog server binary.
//!
//! Settings resolve in order: command-line flags, environment
//! (`LIFTLOG_PORT`, `LIFTLOG_DB`), the TOML config file, built-in defaults.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use liftlog_core::{Config, LogFormat};
use liftlog_db::Database;
use liftlog_server::{create_app, metrics::init_metrics};

#[derive(Debug, Parser)]
#[command(name = "liftlog", version, about = "Workout log with effort charts")]
struct Cli {
    /// Config file. Defaults to <config_dir>/liftlog/config.toml when present.
    #[arg(long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Address to bind.
    #[arg(long)]
    host: Option<String>,

    #[arg(long, env = "LIFTLOG_PORT")]
    port: Option<u16>,

    /// SQLite database file.
    #[arg(long, env = "LIFTLOG_DB", value_name = "FILE")]
    db: Option<PathBuf>,

    /// Log filter directive, e.g. `liftlog=debug,info`. `RUST_LOG` wins over it.
    #[arg(long)]
    log_filter: Option<String>,

    /// Emit logs as JSON lines.
    #[arg(long)]
    json_logs: bool,

    /// Don't install the Prometheus recorder; /api/metrics answers 503.
    #[arg(long)]
    no_metrics: bool,
}

impl Cli {
    /// Overlay flags (and their env fallbacks) on the loaded file config.
    fn apply(self, mut config: Config) -> Config {
        if let Some(host) = self.host {
            config.server.host = host;
        }
        if let Some(port) = self.port {
            config.server.port = port;
        }
        if let Some(db) = self.db {
            config.database.path = Some(db);
        }
        if let Some(filter) = self.log_filter {
            config.logging.filter = filter;
        }
        if self.json_logs {
            config.logging.format = LogFormat::Json;
        }
        config
    }
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "Failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutting down");
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let no_metrics = cli.no_metrics;
    let config = Config::load_or_default(cli.config.as_deref()).context("loading config")?;
    let config = cli.apply(config);

    // Held for the life of the process so buffered file logs get flushed.
    let _tracing = liftlog_observability::init_tracing(&config.logging)?;

    if !no_metrics {
        init_metrics();
    }

    let db_path = config
        .database_path()
        .context("could not determine a database location; pass --db")?;
    let db = Database::new(&db_path)
        .await
        .with_context(|| format!("opening database at {}", db_path.display()))?;

    let app = create_app(db);

    let (host, port) = (config.server.host.as_str(), config.server.port);
    let listener = tokio::net::TcpListener::bind((host, port))
        .await
        .with_context(|| format!("binding {host}:{port}"))?;
    let addr = listener.local_addr()?;

    tracing::info!(
        version = env!("CARGO_PKG_VERSION"),
        %addr,
        db = %db_path.display(),
        "liftlog listening"
    );
    eprintln!("\n  liftlog v{}  \u{2192} http://{}\n", env!("CARGO_PKG_VERSION"), addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}
