//! Shared harness for `/invoke` integration tests
//!
//! [`InvokeTestContext`] wires the router to a [`MockBackend`] writing into a
//! temporary output root, with settle delays disabled.

#![allow(dead_code)]

use std::{
    net::SocketAddr,
    path::{Path, PathBuf},
};

use axum::{
    Router,
    body::{Body, to_bytes},
    http::{Request, StatusCode, header},
};
use chrono::Local;
use screenshot_core::{
    capture::{CaptureOrchestrator, MockBackend, SettleDelays},
    util::naming::FileNamer,
};
use screenshot_invoke_server::handler::{AppState, router};
use serde_json::Value;
use tempfile::TempDir;
use tokio::{net::TcpListener, task::JoinHandle};
use tower::ServiceExt;

/// Router plus the mock backend and output root behind it
pub struct InvokeTestContext {
    pub backend: MockBackend,
    router:      Router,
    output_root: TempDir,
}

impl InvokeTestContext {
    /// Context with a well-behaved mock backend
    pub fn new() -> Self {
        Self::with_backend(MockBackend::new())
    }

    /// Context around a preconfigured mock backend
    pub fn with_backend(backend: MockBackend) -> Self {
        Self::with_delays(backend, SettleDelays::none())
    }

    /// Context with explicit settle delays
    pub fn with_delays(backend: MockBackend, delays: SettleDelays) -> Self {
        let output_root = tempfile::tempdir().expect("create temp output root");
        let orchestrator = CaptureOrchestrator::new(
            std::sync::Arc::new(backend.clone()),
            FileNamer::new(output_root.path()),
            delays,
        );

        Self {
            backend,
            router: router(AppState::new(orchestrator)),
            output_root,
        }
    }

    pub fn output_root(&self) -> &Path {
        self.output_root.path()
    }

    /// `<root>/<YYYYMMDD>` for today's local date
    pub fn today_dir(&self) -> PathBuf {
        self.output_root
            .path()
            .join(Local::now().format("%Y%m%d").to_string())
    }

    /// Every file under the output root
    pub fn saved_files(&self) -> Vec<PathBuf> {
        let mut files = Vec::new();
        let Ok(days) = std::fs::read_dir(self.output_root.path()) else {
            return files;
        };
        for day in days.flatten() {
            if let Ok(entries) = std::fs::read_dir(day.path()) {
                files.extend(entries.flatten().map(|e| e.path()));
            }
        }
        files.sort();
        files
    }

    /// Serves the router on an ephemeral local port
    pub async fn serve(&self) -> (SocketAddr, JoinHandle<std::io::Result<()>>) {
        let listener = TcpListener::bind("127.0.0.1:0")
            .await
            .expect("bind local listener");
        let addr = listener.local_addr().expect("read local address");
        let router = self.router.clone();
        let server = tokio::spawn(async move { axum::serve(listener, router).await });
        (addr, server)
    }

    /// POSTs a raw body to `/invoke`
    pub async fn post_raw(&self, body: impl Into<Body>) -> (StatusCode, Value) {
        let request = Request::builder()
            .method("POST")
            .uri("/invoke")
            .header(header::CONTENT_TYPE, "application/json")
            .body(body.into())
            .expect("build request");

        let response = self
            .router
            .clone()
            .oneshot(request)
            .await
            .expect("router is infallible");
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX)
            .await
            .expect("read body");
        let body = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).expect("response is JSON")
        };
        (status, body)
    }

    /// Sends an arbitrary request and returns only the status
    pub async fn send(&self, request: Request<Body>) -> StatusCode {
        self.router
            .clone()
            .oneshot(request)
            .await
            .expect("router is infallible")
            .status()
    }

    /// POSTs a JSON body to `/invoke`
    pub async fn post(&self, body: Value) -> (StatusCode, Value) {
        self.post_raw(body.to_string()).await
    }

    /// `callTool` for `capture` with the given arguments
    pub async fn capture(&self, arguments: Value) -> (StatusCode, Value) {
        self.post(serde_json::json!({
            "method": "callTool",
            "params": { "name": "capture", "arguments": arguments }
        }))
        .await
    }
}

/// The path reported in the text content element
pub fn saved_path(body: &Value) -> PathBuf {
    let text = body["content"][0]["text"]
        .as_str()
        .expect("first content element is text");
    PathBuf::from(
        text.strip_prefix("Screenshot saved to: ")
            .expect("text names the saved path"),
    )
}
