//! Polymarket events server entry point.

use std::net::SocketAddr;

use clap::{Parser, Subcommand};
use tokio::net::TcpListener;
use tracing::{error, info};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use polymarket_events::api::{create_router, AppState};
use polymarket_events::config::Config;
use polymarket_events::market::{FetchOptions, GammaClient};
use polymarket_events::metrics;
use polymarket_events::utils::shutdown_signal;
use polymarket_events::Result;

/// HTTP server proxying active Polymarket events.
#[derive(Parser, Debug)]
#[command(name = "polymarket-events")]
#[command(about = "Serve active Polymarket events from the Gamma API over HTTP")]
#[command(version)]
struct Args {
    /// Enable verbose logging.
    #[arg(short, long, global = true)]
    verbose: bool,

    /// HTTP server port (overrides PORT).
    #[arg(short, long, global = true)]
    port: Option<u16>,

    /// Gamma API base URL (overrides GAMMA_API_URL).
    #[arg(long, global = true)]
    gamma_url: Option<String>,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Run the HTTP server (default).
    Serve,

    /// Check configuration validity.
    CheckConfig,

    /// Fetch active events once and print them as JSON (diagnostic).
    FetchEvents {
        /// Maximum number of events to request (0 = upstream default).
        #[arg(short, long, default_value_t = 0)]
        limit: u64,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Parse CLI arguments
    let args = Args::parse();

    // Load configuration, then apply CLI overrides
    let mut config = Config::load()?;
    if let Some(port) = args.port {
        config.port = port;
    }
    if let Some(url) = args.gamma_url {
        config.gamma_api_url = url;
    }
    config.verbose |= args.verbose;

    // Initialize logging
    let filter = if config.verbose {
        EnvFilter::new("polymarket_events=debug,info")
    } else {
        EnvFilter::try_new(&config.rust_log).unwrap_or_else(|_| EnvFilter::new("info"))
    };

    tracing_subscriber::registry()
        .with(fmt::layer())
        .with(filter)
        .init();

    // Handle subcommands
    match args.command {
        Some(Command::CheckConfig) => cmd_check_config(&config),
        Some(Command::FetchEvents { limit }) => cmd_fetch_events(&config, limit).await,
        Some(Command::Serve) | None => Ok(cmd_serve(config).await?),
    }
}

/// Check configuration validity.
fn cmd_check_config(config: &Config) -> anyhow::Result<()> {
    println!("======================================================================");
    println!("POLYMARKET EVENTS - CONFIGURATION CHECK");
    println!("======================================================================");

    print!("Validating configuration... ");
    match config.validate() {
        Ok(()) => println!("OK"),
        Err(e) => {
            println!("FAILED");
            println!("  Error: {}", e);
            return Err(anyhow::anyhow!("Configuration validation failed"));
        }
    }

    println!("----------------------------------------------------------------------");
    println!("Configuration Summary:");
    println!("  Gamma API URL: {}", config.gamma_api_url);
    println!("  Port: {}", config.port);
    match config.http_timeout_ms {
        Some(ms) => println!("  HTTP Timeout: {}ms", ms),
        None => println!("  HTTP Timeout: transport default"),
    }
    println!("  Metrics: {}", if config.metrics_enabled { "Enabled" } else { "Disabled" });
    println!("======================================================================");
    println!("CONFIGURATION CHECK PASSED");
    println!("======================================================================");

    Ok(())
}

/// Fetch active events once and print them.
async fn cmd_fetch_events(config: &Config, limit: u64) -> anyhow::Result<()> {
    config.ensure_valid()?;

    let client = GammaClient::with_timeout(config.gamma_api_url.clone(), config.http_timeout())?;
    let options = FetchOptions::with_limit(limit);

    let events = client.fetch_active_events(Some(&options)).await?;
    info!(count = events.len(), "Fetched active events");

    println!("{}", serde_json::to_string_pretty(&events)?);

    Ok(())
}

/// Run the HTTP server until a shutdown signal arrives.
async fn cmd_serve(config: Config) -> Result<()> {
    // Validate configuration
    if let Err(e) = config.ensure_valid() {
        error!("{}", e);
        return Err(e);
    }

    info!("Upstream: {}", config.gamma_api_url);

    // Create app state
    let mut app_state = AppState::new(&config)?;
    if config.metrics_enabled {
        app_state = app_state.with_metrics(metrics::init_metrics()?);
        info!("Metrics enabled at /metrics");
    }

    // Start HTTP server
    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    let listener = TcpListener::bind(addr).await?;
    info!("Server starting on {}", addr);

    let router = create_router(app_state);

    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server stopped");
    Ok(())
}
