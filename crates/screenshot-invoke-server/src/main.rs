//! screenshot-invoke: screenshot capture served over `POST /invoke`

use anyhow::{Context, Result};
use clap::Parser;
use screenshot_core::{
    capture::{CaptureOrchestrator, SettleDelays, create_default_backend},
    util::naming::FileNamer,
};
use screenshot_invoke_server::{config::ServerArgs, handler::AppState, server::InvokeServer};
use tracing::info;
use tracing_subscriber::{EnvFilter, fmt};

#[tokio::main]
async fn main() -> Result<()> {
    // Respects RUST_LOG; logs go to stderr
    fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new("screenshot_invoke_server=info,screenshot_core=info,tower_http=info")
        }))
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();

    let args = ServerArgs::parse();

    let backend = create_default_backend().map_err(|e| {
        anyhow::anyhow!("{e}. {}", e.remediation_hint())
    })?;
    let namer = match &args.output_root {
        Some(root) => FileNamer::new(root),
        None => FileNamer::from_home().context("Failed to resolve the default output root")?,
    };
    let delays = SettleDelays::from_env();

    let orchestrator = CaptureOrchestrator::new(backend, namer, delays);
    info!(
        backend = orchestrator.backend_name(),
        output_root = %orchestrator.namer().root().display(),
        ?delays,
        "screenshot-invoke starting"
    );

    InvokeServer::new(args, AppState::new(orchestrator)).run().await
}
