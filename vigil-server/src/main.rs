//! Service entry point: wire up the index, pipeline, and ledger, then
//! serve the HTTP boundary.

use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

use anyhow::Context;
use tracing::info;
use tracing_subscriber::EnvFilter;

use vigil_core::config::{IndexConfig, PipelineConfig, ServerConfig};
use vigil_index::{EventIndex, HashingEncoder};
use vigil_ledger::RunLedger;
use vigil_pipeline::{AnalysisPipeline, HeuristicModel};
use vigil_server::{router, AppState};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config = ServerConfig::from_env();
    let index_config = IndexConfig::default();
    let encoder = Arc::new(HashingEncoder::new(index_config.dimensions));

    let index = EventIndex::open(Path::new(&config.index_path), encoder, index_config)
        .context("open event index")?;
    // Provisioning is a startup dependency: refuse to serve without it.
    index.ensure_collection().context("provision event index")?;
    info!(
        collection = index.collection_name(),
        events = index.count(),
        "event index ready"
    );

    let ledger = RunLedger::open(Path::new(&config.ledger_path)).context("open run ledger")?;

    let pipeline = AnalysisPipeline::new(
        Arc::new(index),
        Arc::new(HeuristicModel::new()),
        PipelineConfig::default(),
    );

    let state = AppState::new(
        Arc::new(pipeline),
        Arc::new(ledger),
        Duration::from_secs(config.request_timeout_secs),
    );

    let listener = tokio::net::TcpListener::bind(&config.bind_addr)
        .await
        .with_context(|| format!("bind {}", config.bind_addr))?;
    info!(addr = %config.bind_addr, "intelligence service listening");

    axum::serve(listener, router(state))
        .await
        .context("serve")?;
    Ok(())
}
