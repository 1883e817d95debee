use crate::exit_codes::{EXIT_ERROR, EXIT_SUCCESS};
use crate::signal_handler::spawn_shutdown_listener;
use anyhow::Context;
use quicknote::{Config, NoteServer};
use tokio::net::TcpListener;

/// Run the server on the transport chosen on the command line
pub async fn run_serve(config: &Config, stdio: bool) -> i32 {
    let result = if stdio {
        run_stdio(config).await
    } else {
        run_http(config).await
    };

    match result {
        Ok(()) => EXIT_SUCCESS,
        Err(e) => {
            tracing::error!("MCP server error: {:#}", e);
            eprintln!("Error: {e:#}");
            EXIT_ERROR
        }
    }
}

async fn run_stdio(config: &Config) -> anyhow::Result<()> {
    let server = NoteServer::from_config(config).context("Failed to open note store")?;
    tracing::info!(
        "Starting MCP server on stdio with {} storage",
        server.store().backend_name()
    );

    server.serve_stdio().await.context("MCP stdio server failed")?;
    tracing::info!("MCP server exited successfully");
    Ok(())
}

async fn run_http(config: &Config) -> anyhow::Result<()> {
    let server = NoteServer::from_config(config).context("Failed to open note store")?;
    let listener = TcpListener::bind(&config.bind_addr)
        .await
        .with_context(|| format!("Failed to bind {}", config.bind_addr))?;
    tracing::info!(
        "Starting MCP server with {} storage, widgets at {}",
        server.store().backend_name(),
        config.base_url
    );

    let shutdown = spawn_shutdown_listener();
    quicknote::http::serve(listener, server, shutdown.cancelled_owned())
        .await
        .context("HTTP server failed")?;
    Ok(())
}
