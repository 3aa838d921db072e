//! Command-line configuration of the server

use std::path::PathBuf;

use clap::Parser;

/// Default TCP port
pub const DEFAULT_PORT: u16 = 8000;

/// JSON-over-HTTP screenshot tool server
#[derive(Debug, Clone, Parser)]
#[command(name = "screenshot-invoke")]
#[command(about = "Serve screenshot capture as a tool over POST /invoke")]
pub struct ServerArgs {
    /// Address to bind
    #[arg(long, default_value = "0.0.0.0")]
    pub host: String,

    /// Port to listen on
    #[arg(short, long, default_value_t = DEFAULT_PORT)]
    pub port: u16,

    /// Directory holding the dated screenshot folders [default: ~/Downloads]
    #[arg(long)]
    pub output_root: Option<PathBuf>,
}

impl ServerArgs {
    /// `host:port` to bind
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}
