//! screenshot-invoke-server: JSON-over-HTTP protocol layer for screenshot capture
//!
//! A single endpoint, `POST /invoke`, accepts `listTools` and `callTool`
//! requests. Capture itself lives in `screenshot-core`; this crate maps the
//! wire format onto a [`CaptureOrchestrator`] and back.
//!
//! # Modules
//!
//! - [`protocol`] - request and response wire types, parameter normalization
//! - [`tools`] - the `capture` tool descriptor and its arguments
//! - [`handler`] - the axum router
//! - [`error`] - mapping failures to HTTP status codes
//! - [`network`] - access URLs shown at startup
//! - [`config`] / [`server`] - command line and lifecycle
//!
//! [`CaptureOrchestrator`]: screenshot_core::capture::CaptureOrchestrator

pub mod config;
pub mod error;
pub mod handler;
pub mod network;
pub mod protocol;
pub mod server;
pub mod tools;
