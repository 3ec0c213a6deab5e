//! locale-router
//!
//! Serves, develops or pre-renders a multi-language site through the locale
//! routing resolver.
//!
//! # Architecture Overview
//!
//! ```text
//!                  ┌────────────────────────────────────────────────────┐
//!                  │                   LOCALE ROUTER                     │
//!                  │                                                     │
//!   Request        │  ┌─────────┐   ┌──────────────┐   ┌─────────────┐  │
//!   ───────────────┼─▶│  http   │──▶│   routing    │──▶│  response   │──┼──▶ Page / 30x / 404
//!                  │  │ server  │   │   resolver   │   │  (page/)    │  │
//!                  │  └─────────┘   └──────┬───────┘   └─────────────┘  │
//!                  │                       │ content check               │
//!                  │                       ▼                             │
//!                  │                ┌──────────────┐                     │
//!                  │                │   content    │                     │
//!                  │                │  PageTable   │                     │
//!                  │                └──────────────┘                     │
//!                  │                                                     │
//!   build ─────────┼─▶ prerender: same resolver, every candidate URL ────┼──▶ out_dir/
//!                  │                                                     │
//!                  │  config · lifecycle · observability                 │
//!                  └────────────────────────────────────────────────────┘
//! ```

use std::path::PathBuf;
use std::sync::Arc;

use clap::{Parser, Subcommand};
use tokio::net::TcpListener;

use locale_router::build;
use locale_router::config::schema::ObservabilityConfig;
use locale_router::config::watcher::SiteWatcher;
use locale_router::http::{HttpServer, ServerMode};
use locale_router::lifecycle::{load_site, signals, Shutdown};
use locale_router::observability::{logging, metrics};

#[derive(Parser)]
#[command(name = "locale-router")]
#[command(about = "Locale-aware server and static builder for multi-language sites", long_about = None)]
struct Cli {
    /// Path to the TOML configuration file.
    #[arg(short, long, default_value = "locale-router.toml")]
    config: PathBuf,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Serve pages, resolving every request on demand
    Serve {
        /// Override the configured bind address
        #[arg(short, long)]
        bind: Option<String>,
    },
    /// Like serve, reloading config and content on change
    Dev {
        #[arg(short, long)]
        bind: Option<String>,
    },
    /// Pre-render every page and redirect to static files
    Build {
        /// Override the configured output directory
        #[arg(short, long)]
        out_dir: Option<PathBuf>,
    },
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let site = match load_site(&cli.config) {
        Ok(site) => site,
        Err(e) => {
            logging::init_logging(&ObservabilityConfig::default());
            tracing::error!(config = %cli.config.display(), error = %e, "Failed to load site");
            return Err(e.into());
        }
    };

    logging::init_logging(&site.config.observability);
    tracing::info!(config = %cli.config.display(), "locale-router v{} starting", env!("CARGO_PKG_VERSION"));

    if site.config.observability.metrics_enabled {
        match site.config.observability.metrics_address.parse() {
            Ok(addr) => metrics::init_metrics(addr),
            Err(_) => tracing::error!(
                metrics_address = %site.config.observability.metrics_address,
                "Failed to parse metrics address"
            ),
        }
    }

    match cli.command {
        Commands::Build { out_dir } => {
            let out_dir = out_dir.unwrap_or_else(|| site.out_dir());
            let report = build::build(&site, &out_dir)?;
            println!("{}", serde_json::to_string_pretty(&report)?);
        }
        Commands::Serve { bind } => {
            let bind = bind.unwrap_or_else(|| site.config.server.bind_address.clone());
            let listener = TcpListener::bind(&bind).await?;
            let shutdown = Arc::new(Shutdown::new());
            signals::spawn_signal_handler(shutdown.clone());

            HttpServer::new(site, ServerMode::Production)
                .run(listener, None, shutdown.subscribe())
                .await?;
        }
        Commands::Dev { bind } => {
            let bind = bind.unwrap_or_else(|| site.config.server.bind_address.clone());
            let listener = TcpListener::bind(&bind).await?;
            let shutdown = Arc::new(Shutdown::new());
            signals::spawn_signal_handler(shutdown.clone());

            let (watcher, updates) = SiteWatcher::new(&cli.config, &site.content_dir());
            shutdown.hold_watcher(watcher.run()?);

            HttpServer::new(site, ServerMode::Dev)
                .run(listener, Some(updates), shutdown.subscribe())
                .await?;
        }
    }

    tracing::info!("Shutdown complete");
    Ok(())
}
