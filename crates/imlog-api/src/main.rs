//! imlog CLI and HTTP server entry point.
//!
//! Binary name: `imlog`
//!
//! Parses CLI arguments, initializes tracing, the store and the service, then
//! dispatches to the command handler or starts the HTTP server.

mod cli;
mod http;
mod state;

use clap::Parser;
use clap_complete::generate;

use cli::{Cli, Commands};
use state::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Shell completions don't need app state or logging
    if let Commands::Completions { shell } = &cli.command {
        let mut cmd = <Cli as clap::CommandFactory>::command();
        generate(*shell, &mut cmd, "imlog", &mut std::io::stdout());
        return Ok(());
    }

    let filter = match cli.verbose {
        0 if cli.quiet => "error",
        0 => "warn",
        1 => "info,imlog=debug",
        _ => "trace",
    };

    let result = run(cli, filter).await;
    imlog_observe::tracing_setup::shutdown_tracing();
    result
}

async fn run(cli: Cli, filter: &str) -> anyhow::Result<()> {
    // Tracing comes first so state initialization is logged; config.toml
    // decides whether OTel export is on.
    let (data_dir, config) = AppState::load_config().await;
    init_tracing(filter, config.enable_otel)?;
    tracing::debug!(data_dir = %data_dir.display(), "Config loaded");

    match cli.command {
        Commands::Serve {
            port,
            host,
            in_memory,
        } => {
            let state = if in_memory {
                AppState::in_memory(data_dir, config)
            } else {
                AppState::init(data_dir, config).await?
            };

            let host = host.unwrap_or_else(|| state.config.host.clone());
            let port = port.unwrap_or(state.config.port);
            let addr = format!("{host}:{port}");
            let listener = tokio::net::TcpListener::bind(&addr).await?;

            tracing::info!(
                %addr,
                in_memory,
                data_dir = %state.data_dir.display(),
                "imlog listening"
            );
            if !cli.quiet {
                println!(
                    "  {} imlog listening on {}",
                    console::style("⚡").bold(),
                    console::style(format!("http://{addr}")).cyan()
                );
                if !in_memory {
                    println!(
                        "  {} {}",
                        console::style("Data:").dim(),
                        state.data_dir.display()
                    );
                }
                println!("  {}", console::style("Press Ctrl+C to stop").dim());
            }

            let router = http::router::build_router(state);

            axum::serve(listener, router)
                .with_graceful_shutdown(shutdown_signal())
                .await?;

            tracing::info!("Server stopped");
        }

        Commands::Send {
            chat,
            sender,
            text,
            send_time,
        } => {
            let state = AppState::init(data_dir, config).await?;
            cli::message::send_message(&state, chat, sender, text, send_time, cli.json).await?;
        }

        Commands::Pull {
            chat,
            cursor,
            limit,
            reverse,
        } => {
            let state = AppState::init(data_dir, config).await?;
            cli::message::pull_messages(&state, chat, cursor, limit, reverse, cli.json).await?;
        }

        Commands::Completions { .. } => unreachable!("handled in main"),
    }

    Ok(())
}

fn init_tracing(filter: &str, enable_otel: bool) -> anyhow::Result<()> {
    imlog_observe::tracing_setup::init_tracing(filter, enable_otel)
        .map_err(|e| anyhow::anyhow!("failed to initialize tracing: {e}"))
}

/// Wait for Ctrl+C or SIGTERM for graceful shutdown.
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "failed to install Ctrl+C handler");
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
                tracing::error!(error = %e, "failed to install SIGTERM handler");
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
}
