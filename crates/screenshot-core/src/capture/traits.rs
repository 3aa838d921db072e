//! Desktop automation capability trait
//!
//! The capture sequence needs three things from the operating system:
//! bring an application forward, type a shortcut into it, and write the
//! screen to a file. [`DesktopAutomation`] names exactly those, so the
//! sequencing in [`super::orchestrator`] never touches a process directly.

use std::path::Path;

use async_trait::async_trait;

use crate::error::CaptureResult;
use crate::model::Keystroke;

/// Capability: drive the desktop on behalf of a capture request.
///
/// Every method blocks (asynchronously) until the OS primitive completes.
/// There is no timeout; a hung primitive hangs the caller.
///
/// # Implementations
///
/// - [`AppleScriptBackend`](super::AppleScriptBackend): `osascript` and
///   `screencapture` on macOS
/// - [`MockBackend`](super::MockBackend): records calls, for tests
#[async_trait]
pub trait DesktopAutomation: Send + Sync {
    /// Brings the named application to the foreground.
    async fn activate_application(&self, name: &str) -> CaptureResult<()>;

    /// Sends a keystroke to whichever application is in the foreground.
    async fn send_keystroke(&self, keystroke: &Keystroke) -> CaptureResult<()>;

    /// Captures the whole screen into `path` as PNG.
    async fn capture_screen_to_file(&self, path: &Path) -> CaptureResult<()>;

    /// Short backend name for logs.
    fn name(&self) -> &'static str;
}
