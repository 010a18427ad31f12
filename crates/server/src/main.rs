//! snipbox server entry point.
//!
//! Loads configuration, opens the snippet store and compiles the template
//! cache before binding. A template that fails to compile stops the process
//! here, so the server never runs with a partial cache.

use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;
use snipbox_core::{AppConfig, SnippetDb, TemplateCache};
use tracing_subscriber::EnvFilter;

mod cli;
mod error;
mod handler;
mod routes;

use handler::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .json()
        .init();

    let config = cli::Cli::parse().apply(AppConfig::load()?);
    config.validate()?;

    let snippets = SnippetDb::open(&config.db_path)
        .await
        .with_context(|| format!("opening database {}", config.db_path.display()))?;

    let templates = TemplateCache::build(&config.template_dir)
        .with_context(|| format!("building template cache from {}", config.template_dir.display()))?;
    tracing::info!(pages = ?templates.page_names(), "template cache ready");

    let state = AppState { snippets, templates: Arc::new(templates), recent_limit: config.recent_limit };
    let app = routes::router(state, &config.static_dir, config.request_timeout());

    let listener = tokio::net::TcpListener::bind(&config.addr)
        .await
        .with_context(|| format!("binding {}", config.addr))?;
    tracing::info!(addr = %config.addr, "Starting snipbox on http://{}", config.addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("snipbox stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::warn!(error = %e, "failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutdown signal received");
}
