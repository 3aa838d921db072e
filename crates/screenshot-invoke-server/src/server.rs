//! Server lifecycle: bind, announce, serve until Ctrl-C

use anyhow::{Context, Result};
use tokio::net::TcpListener;
use tracing::{info, warn};

use crate::{
    config::ServerArgs,
    handler::{AppState, router},
    network::{access_urls, curl_example, external_ipv4_addresses},
};

/// The `/invoke` HTTP server
pub struct InvokeServer {
    args:  ServerArgs,
    state: AppState,
}

impl InvokeServer {
    /// Creates a server; nothing is bound until [`InvokeServer::run`].
    pub fn new(args: ServerArgs, state: AppState) -> Self {
        Self { args, state }
    }

    /// Binds the listener and serves requests until Ctrl-C.
    pub async fn run(self) -> Result<()> {
        let bind_addr = self.args.bind_addr();
        let listener = TcpListener::bind(&bind_addr)
            .await
            .with_context(|| format!("Failed to bind to {bind_addr}"))?;
        let port = listener
            .local_addr()
            .context("Failed to read bound address")?
            .port();

        info!(addr = %bind_addr, "screenshot tool server running on port {port}");
        for url in access_urls(port, &external_ipv4_addresses()) {
            info!("access URL: {url}");
        }
        info!("to test, use: {}", curl_example(port));

        axum::serve(listener, router(self.state))
            .with_graceful_shutdown(shutdown_signal())
            .await
            .context("HTTP server error")?;

        info!("screenshot tool server shut down");
        Ok(())
    }
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!(error = %e, "failed to listen for Ctrl-C, serving until killed");
        std::future::pending::<()>().await;
    }
    info!("Ctrl-C received, shutting down");
}
