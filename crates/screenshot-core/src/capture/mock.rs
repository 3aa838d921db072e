//! Mock automation backend for testing
//!
//! [`MockBackend`] implements [`DesktopAutomation`] without touching the
//! desktop. It records every call in order, writes a tiny PNG when asked to
//! capture, and can be told to fail at a given kind of call.
//!
//! # Examples
//!
//! ```
//! use screenshot_core::capture::{DesktopAutomation, MockBackend, MockCall};
//! use screenshot_core::model::Keystroke;
//!
//! #[tokio::main]
//! async fn main() {
//!     let backend = MockBackend::new();
//!
//!     backend.activate_application("Calendar").await.unwrap();
//!     backend.send_keystroke(&Keystroke::toggle_fullscreen()).await.unwrap();
//!
//!     assert_eq!(
//!         backend.calls(),
//!         vec![
//!             MockCall::Activate("Calendar".to_string()),
//!             MockCall::Keystroke(Keystroke::toggle_fullscreen()),
//!         ]
//!     );
//! }
//! ```

use std::{
    path::{Path, PathBuf},
    sync::{Arc, Mutex},
};

use async_trait::async_trait;

use super::DesktopAutomation;
use crate::{
    error::{CaptureError, CaptureResult},
    model::Keystroke,
};

/// A 1x1 PNG written by mock captures
pub const MOCK_PNG: &[u8] = &[
    0x89, 0x50, 0x4e, 0x47, 0x0d, 0x0a, 0x1a, 0x0a, 0x00, 0x00, 0x00, 0x0d, 0x49, 0x48, 0x44,
    0x52, 0x00, 0x00, 0x00, 0x01, 0x00, 0x00, 0x00, 0x01, 0x08, 0x06, 0x00, 0x00, 0x00, 0x1f,
    0x15, 0xc4, 0x89, 0x00, 0x00, 0x00, 0x0d, 0x49, 0x44, 0x41, 0x54, 0x78, 0x9c, 0x63, 0x00,
    0x01, 0x00, 0x00, 0x05, 0x00, 0x01, 0x0d, 0x0a, 0x2d, 0xb4, 0x00, 0x00, 0x00, 0x00, 0x49,
    0x45, 0x4e, 0x44, 0xae, 0x42, 0x60, 0x82,
];

/// A call recorded by [`MockBackend`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MockCall {
    /// `activate_application(name)`
    Activate(String),
    /// `send_keystroke(keystroke)`
    Keystroke(Keystroke),
    /// `capture_screen_to_file(path)`
    Capture(PathBuf),
}

/// Kind of call to fail in [`MockBackend::fail_on`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MockFailure {
    /// Fail application activation
    Activate,
    /// Fail the keystroke matching this one
    Keystroke(Keystroke),
    /// Fail screen capture
    Capture,
}

/// Mock automation backend for testing and development
///
/// Cloning shares the call log, so a test can keep a handle after passing
/// the backend to an orchestrator.
#[derive(Debug, Clone, Default)]
pub struct MockBackend {
    /// Optional call kind that should fail
    failure:    Option<MockFailure>,
    /// Record captures without writing the image file
    skip_write: bool,
    /// Calls in the order they were made
    calls:      Arc<Mutex<Vec<MockCall>>>,
}

impl MockBackend {
    /// Creates a new MockBackend that succeeds at everything
    pub fn new() -> Self {
        Self::default()
    }

    /// Makes captures succeed without writing anything to disk
    ///
    /// Reading the image back afterwards fails, as it would if the file
    /// vanished between capture and encoding.
    pub fn without_image_file(mut self) -> Self {
        self.skip_write = true;
        self
    }

    /// Makes calls of the given kind fail with `CommandFailed`
    ///
    /// The failing call is still recorded.
    pub fn fail_on(mut self, failure: MockFailure) -> Self {
        self.failure = Some(failure);
        self
    }

    /// Returns a snapshot of recorded calls
    pub fn calls(&self) -> Vec<MockCall> {
        self.calls.lock().map(|calls| calls.clone()).unwrap_or_default()
    }

    /// Returns the paths of every capture made so far
    pub fn captured_paths(&self) -> Vec<PathBuf> {
        self.calls()
            .into_iter()
            .filter_map(|call| match call {
                MockCall::Capture(path) => Some(path),
                _ => None,
            })
            .collect()
    }

    async fn record(&self, call: MockCall) -> CaptureResult<()> {
        let should_fail = match (&self.failure, &call) {
            (Some(MockFailure::Activate), MockCall::Activate(_)) => true,
            (Some(MockFailure::Capture), MockCall::Capture(_)) => true,
            (Some(MockFailure::Keystroke(expected)), MockCall::Keystroke(actual)) => {
                expected == actual
            }
            _ => false,
        };

        if let Ok(mut calls) = self.calls.lock() {
            calls.push(call);
        }

        if should_fail {
            return Err(CaptureError::CommandFailed {
                program: "mock".to_string(),
                status:  "exit status: 1".to_string(),
                stderr:  "injected failure".to_string(),
            });
        }
        Ok(())
    }
}

#[async_trait]
impl DesktopAutomation for MockBackend {
    async fn activate_application(&self, name: &str) -> CaptureResult<()> {
        self.record(MockCall::Activate(name.to_string())).await
    }

    async fn send_keystroke(&self, keystroke: &Keystroke) -> CaptureResult<()> {
        self.record(MockCall::Keystroke(keystroke.clone())).await
    }

    async fn capture_screen_to_file(&self, path: &Path) -> CaptureResult<()> {
        self.record(MockCall::Capture(path.to_path_buf())).await?;
        if self.skip_write {
            return Ok(());
        }
        tokio::fs::write(path, MOCK_PNG)
            .await
            .map_err(|e| CaptureError::CommandFailed {
                program: "mock".to_string(),
                status:  "io error".to_string(),
                stderr:  e.to_string(),
            })
    }

    fn name(&self) -> &'static str {
        "mock"
    }
}
