use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

use clap::{Parser, Subcommand};
use tokio_util::sync::CancellationToken;
use tracing::{error, info, warn};

use dropgate_server::api::{AppState, router};
use dropgate_server::backend_factory::create_coordinator;
use dropgate_server::config::DropgateConfig;

/// Dropgate upload URL server.
#[derive(Parser, Debug)]
#[command(name = "dropgate-server", about = "Issues presigned upload URLs")]
struct Cli {
    /// Path to the TOML configuration file.
    #[arg(short, long, default_value = "dropgate.toml")]
    config: String,

    /// Override the bind host.
    #[arg(long)]
    host: Option<String>,

    /// Override the bind port.
    #[arg(long)]
    port: Option<u16>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Validate the configuration, print it with secrets redacted, then exit.
    CheckConfig,
}

fn load_config(path: &str) -> Result<DropgateConfig, Box<dyn std::error::Error>> {
    let config = if Path::new(path).exists() {
        let contents = std::fs::read_to_string(path)?;
        toml::from_str(&contents).map_err(|e| format!("failed to parse {path}: {e}"))?
    } else {
        toml::from_str("")?
    };
    Ok(config)
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let config = load_config(&cli.config)?;

    if let Some(Commands::CheckConfig) = cli.command {
        dropgate_server::telemetry::init_fmt_only();
        return run_check_config(&cli.config, &config);
    }

    let telemetry_guard = dropgate_server::telemetry::init(&config.telemetry);

    if !Path::new(&cli.config).exists() {
        info!(path = %cli.config, "config file not found, using defaults");
    }

    config.validate()?;
    let coordinator = Arc::new(create_coordinator(&config).await?);
    let app = router(AppState::new(coordinator, config.errors.policy));

    // CLI overrides take precedence.
    let host = cli.host.unwrap_or_else(|| config.server.host.clone());
    let port = cli.port.unwrap_or(config.server.port);
    let addr = format!("{host}:{port}");

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    info!(address = %addr, error_policy = ?config.errors.policy, "dropgate-server listening");

    let shutdown = CancellationToken::new();
    let server = tokio::spawn({
        let shutdown = shutdown.clone();
        async move {
            axum::serve(listener, app)
                .with_graceful_shutdown(shutdown.cancelled_owned())
                .await
        }
    });

    shutdown_signal().await;
    shutdown.cancel();

    let shutdown_timeout = Duration::from_secs(config.server.shutdown_timeout_seconds);
    info!(
        timeout_secs = config.server.shutdown_timeout_seconds,
        "waiting for in-flight requests..."
    );
    match tokio::time::timeout(shutdown_timeout, server).await {
        Ok(Ok(Ok(()))) => {}
        Ok(Ok(Err(e))) => error!(error = %e, "server exited with an error"),
        Ok(Err(e)) => error!(error = %e, "server task failed"),
        Err(_) => warn!(
            timeout_secs = config.server.shutdown_timeout_seconds,
            "shutdown timeout exceeded, abandoning in-flight requests"
        ),
    }

    telemetry_guard.shutdown();

    info!("dropgate-server shut down");
    Ok(())
}

fn run_check_config(path: &str, config: &DropgateConfig) -> Result<(), Box<dyn std::error::Error>> {
    if !Path::new(path).exists() {
        info!(path = %path, "config file not found, checking defaults");
    }
    config.validate()?;
    println!("{config:#?}");
    info!(backend = %config.backend.kind, "configuration is valid");
    Ok(())
}

/// Wait for SIGINT (Ctrl+C) or SIGTERM.
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            error!(error = %e, "failed to listen for Ctrl+C");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                error!(error = %e, "failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => { info!("received SIGINT"); }
        () = terminate => { info!("received SIGTERM"); }
    }
}
