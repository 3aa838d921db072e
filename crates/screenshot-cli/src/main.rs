//! screenshot-cli: Command-line tool for screenshot capture debugging
//!
//! Runs the capture sequence directly, without the HTTP layer, and shows
//! where screenshots land.

use std::path::PathBuf;

use anyhow::{Context, Result};
use chrono::Local;
use clap::{Parser, Subcommand};
use screenshot_core::{
    capture::{CaptureOrchestrator, SettleDelays, create_default_backend},
    model::CaptureRequest,
    util::naming::FileNamer,
};
use tracing::{error, info};

#[derive(Parser)]
#[command(name = "screenshot-cli")]
#[command(about = "CLI tool for screenshot capture debugging and testing")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Take one screenshot and print where it was saved
    Capture {
        /// Application to bring forward
        #[arg(long)]
        window_name: Option<String>,
        /// Activate the application and capture it fullscreen
        #[arg(long, requires = "window_name")]
        switch_to_window: bool,
        /// Key pressed with Command after activation to pick a sub-view
        #[arg(long, requires = "switch_to_window")]
        subwindow_key: Option<String>,
        /// Directory holding the dated folders [default: ~/Downloads]
        #[arg(long)]
        output_root: Option<PathBuf>,
    },
    /// Print today's output directory
    Where {
        /// Directory holding the dated folders [default: ~/Downloads]
        #[arg(long)]
        output_root: Option<PathBuf>,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("screenshot_cli=info".parse()?)
                .add_directive("screenshot_core=info".parse()?),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Capture {
            window_name,
            switch_to_window,
            subwindow_key,
            output_root,
        } => {
            let request = build_request(window_name, switch_to_window, subwindow_key);
            capture(request, output_root).await?;
        }
        Commands::Where { output_root } => {
            let namer = namer(output_root)?;
            println!("{}", namer.dated_directory(Local::now().date_naive()).display());
        }
    }

    Ok(())
}

fn namer(output_root: Option<PathBuf>) -> Result<FileNamer> {
    match output_root {
        Some(root) => Ok(FileNamer::new(root)),
        None => FileNamer::from_home().context("Failed to resolve the default output root"),
    }
}

fn build_request(
    window_name: Option<String>,
    switch_to_window: bool,
    subwindow_key: Option<String>,
) -> CaptureRequest {
    let mut request = CaptureRequest::default()
        .switch_to_window(switch_to_window)
        .include_base64(false);
    if let Some(name) = window_name {
        request = request.with_window(name);
    }
    if let Some(key) = subwindow_key {
        request = request.with_subwindow_key(key);
    }
    request
}

async fn capture(request: CaptureRequest, output_root: Option<PathBuf>) -> Result<()> {
    let backend = create_default_backend()
        .map_err(|e| anyhow::anyhow!("{e}. {}", e.remediation_hint()))?;
    let orchestrator =
        CaptureOrchestrator::new(backend, namer(output_root)?, SettleDelays::from_env());
    info!(
        backend = orchestrator.backend_name(),
        output_root = %orchestrator.namer().root().display(),
        "capturing"
    );

    match orchestrator.capture(&request).await {
        Ok(path) => {
            println!("✓ Screenshot saved to {}", path.display());
            Ok(())
        }
        Err(e) => {
            error!(step = ?e.step(), hint = e.remediation_hint(), "capture failed");
            Err(e.into())
        }
    }
}
