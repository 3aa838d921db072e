//! Capture backends and sequencing
//!
//! # Architecture
//!
//! - [`DesktopAutomation`] - the OS capability: activate an app, send a
//!   keystroke, capture the screen to a file
//! - [`CaptureOrchestrator`] - runs the capture sequence against a backend
//! - [`SettleDelays`] - fixed waits between UI-affecting steps
//!
//! ## Backends
//!
//! | Backend | Platform | Used by |
//! |---------|----------|---------|
//! | [`AppleScriptBackend`] | macOS | the server and CLI |
//! | [`MockBackend`] | any | tests |
//!
//! ```rust,ignore
//! use screenshot_core::capture::{create_default_backend, CaptureOrchestrator, SettleDelays};
//! use screenshot_core::util::naming::FileNamer;
//!
//! let backend = create_default_backend()?;
//! let orchestrator = CaptureOrchestrator::new(backend, FileNamer::from_home()?, SettleDelays::from_env());
//! let path = orchestrator.capture(&request).await?;
//! ```

use std::sync::Arc;

use crate::error::CaptureResult;

pub mod applescript_backend;
pub mod constants;
pub mod mock;
pub mod orchestrator;
pub mod traits;

pub use applescript_backend::AppleScriptBackend;
pub use constants::SettleDelays;
pub use mock::{MockBackend, MockCall, MockFailure};
pub use orchestrator::CaptureOrchestrator;
pub use traits::DesktopAutomation;

/// Creates the automation backend for the current platform.
///
/// - **macOS**: [`AppleScriptBackend`]
/// - **Other**: a structured `BackendNotAvailable` error
pub fn create_default_backend() -> CaptureResult<Arc<dyn DesktopAutomation>> {
    #[cfg(target_os = "macos")]
    {
        Ok(Arc::new(AppleScriptBackend::new()))
    }

    #[cfg(not(target_os = "macos"))]
    {
        Err(crate::error::CaptureError::BackendNotAvailable {
            platform: std::env::consts::OS.to_string(),
        })
    }
}
