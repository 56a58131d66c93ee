//! `foodprint serve` — launch the dashboard API server.

use std::net::SocketAddr;
use std::path::Path;
use std::sync::Arc;

use anyhow::{Context, Result};

use foodprint_charts::DashboardContext;
use foodprint_data::Dataset;

use crate::config::FoodprintConfig;

/// Start the server. Flag values override `foodprint.toml`, which
/// overrides the built-in defaults.
pub fn run(
    project_dir: &Path,
    config: &FoodprintConfig,
    host: Option<&str>,
    port: Option<u16>,
    debug: bool,
) -> Result<()> {
    let debug = debug || config.server.debug;
    init_tracing(debug);

    let data_dir = project_dir.join(&config.data.dir);
    let dataset = Dataset::load(&data_dir)
        .with_context(|| format!("loading dataset from {}", data_dir.display()))?;
    let ctx = Arc::new(DashboardContext::new(dataset, config.charts));

    let host = host.unwrap_or(&config.server.host);
    let port = port.unwrap_or(config.server.port);
    let addr: SocketAddr = format!("{host}:{port}")
        .parse()
        .with_context(|| format!("invalid listen address {host}:{port}"))?;

    println!("Serving dashboard API on http://{addr}");
    foodprint_server::serve(ctx, addr).context("running server")?;
    Ok(())
}

fn init_tracing(debug: bool) {
    let level = if debug { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(level)),
        )
        .init();
}
