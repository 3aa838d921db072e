//! Screenshot capture sequencing
//!
//! [`CaptureOrchestrator`] runs one capture request as a straight line of
//! steps:
//!
//! 1. create the dated output directory
//! 2. activate the target application (when `window_name` and `switch_to_window`)
//! 3. send the sub-view shortcut (when also `switch_to_subwindow` with a key)
//! 4. toggle fullscreen on
//! 5. capture the screen to the computed path (always)
//! 6. toggle fullscreen off
//!
//! Steps 2, 4 and 6 share one condition. The first failing step aborts the
//! sequence and nothing already done is undone, so a failed capture leaves
//! the window in fullscreen.

use std::{path::PathBuf, sync::Arc, time::Duration};

use chrono::Utc;
use tokio::time::sleep;
use tracing::{debug, info, warn};

use super::{DesktopAutomation, SettleDelays};
use crate::{
    error::CaptureResult,
    model::{CaptureArtifact, CaptureRequest, CaptureStep, Keystroke},
    util::{encode::encode_file_base64, naming::FileNamer},
};

/// Runs capture requests against a [`DesktopAutomation`] backend.
///
/// Holds no per-request state; one instance serves every request.
#[derive(Clone)]
pub struct CaptureOrchestrator {
    backend: Arc<dyn DesktopAutomation>,
    namer:   FileNamer,
    delays:  SettleDelays,
}

impl CaptureOrchestrator {
    /// Creates an orchestrator
    pub fn new(
        backend: Arc<dyn DesktopAutomation>,
        namer: FileNamer,
        delays: SettleDelays,
    ) -> Self {
        Self {
            backend,
            namer,
            delays,
        }
    }

    /// The file namer in use
    pub fn namer(&self) -> &FileNamer {
        &self.namer
    }

    /// Name of the backend, for logs
    pub fn backend_name(&self) -> &'static str {
        self.backend.name()
    }

    /// Runs the capture sequence and returns the saved file's path.
    pub async fn capture(&self, request: &CaptureRequest) -> CaptureResult<PathBuf> {
        let now = Utc::now();
        let window = request.window_name.as_deref();
        info!(
            region = %request.region,
            format = %request.format,
            window = window.unwrap_or("current"),
            backend = self.backend.name(),
            "starting screenshot capture"
        );

        let dir = self
            .namer
            .ensure_dated_directory(now)
            .await
            .map_err(|e| e.at_step(CaptureStep::PrepareDirectory))?;
        let path = self.namer.file_path(&dir, window, now);

        let switch_target = window.filter(|_| request.switch_to_window);

        if let Some(name) = switch_target {
            self.backend
                .activate_application(name)
                .await
                .map_err(|e| e.at_step(CaptureStep::ActivateWindow))?;
            debug!(window = name, "activated window");
            self.settle(CaptureStep::ActivateWindow, self.delays.activate).await;

            if let Some(key) = request.subview_key() {
                self.backend
                    .send_keystroke(&Keystroke::command(key))
                    .await
                    .map_err(|e| e.at_step(CaptureStep::SwitchSubview))?;
                debug!(window = name, key, "switched subview");
                self.settle(CaptureStep::SwitchSubview, self.delays.subview).await;
            } else if request.switch_to_subwindow {
                warn!(window = name, "subview switch requested without a key, skipping");
            }

            self.backend
                .send_keystroke(&Keystroke::toggle_fullscreen())
                .await
                .map_err(|e| e.at_step(CaptureStep::EnterFullscreen))?;
            debug!(window = name, "entered fullscreen");
            self.settle(CaptureStep::EnterFullscreen, self.delays.fullscreen)
                .await;
        }

        self.backend
            .capture_screen_to_file(&path)
            .await
            .map_err(|e| e.at_step(CaptureStep::Capture))?;
        debug!(path = %path.display(), "screenshot taken");

        if let Some(name) = switch_target {
            self.backend
                .send_keystroke(&Keystroke::toggle_fullscreen())
                .await
                .map_err(|e| e.at_step(CaptureStep::ExitFullscreen))?;
            debug!(window = name, "exited fullscreen");
        }

        info!(path = %path.display(), "screenshot saved");
        Ok(path)
    }

    /// Runs the capture and, if requested, reads the file back as base64.
    pub async fn capture_artifact(
        &self,
        request: &CaptureRequest,
    ) -> CaptureResult<CaptureArtifact> {
        let file_path = self.capture(request).await?;

        let image_base64 = if request.include_base64 {
            let encoded = encode_file_base64(&file_path).await?;
            debug!(bytes = encoded.len(), "image converted to base64");
            Some(encoded)
        } else {
            None
        };

        Ok(CaptureArtifact {
            file_path,
            image_base64,
        })
    }

    async fn settle(&self, step: CaptureStep, delay: Duration) {
        if delay.is_zero() {
            return;
        }
        debug!(%step, delay_ms = delay.as_millis() as u64, "waiting for UI to settle");
        sleep(delay).await;
    }
}
