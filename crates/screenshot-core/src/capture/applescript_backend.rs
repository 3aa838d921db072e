//! macOS automation backend built on `osascript` and `screencapture`
//!
//! Window activation and keystrokes are AppleScript snippets run through
//! `osascript -e`; keystrokes go through System Events, which requires the
//! Accessibility permission. Captures call `screencapture <path>`, which
//! requires the Screen Recording permission.
//!
//! Nothing is parsed from stdout; a zero exit status means success.

use std::path::Path;

use async_trait::async_trait;
use tokio::process::Command;
use tracing::{debug, warn};

use super::DesktopAutomation;
use crate::{
    error::{CaptureError, CaptureResult},
    model::Keystroke,
};

const OSASCRIPT: &str = "osascript";
const SCREENCAPTURE: &str = "screencapture";

/// Desktop automation through AppleScript and the `screencapture` tool.
#[derive(Debug, Clone, Default)]
pub struct AppleScriptBackend;

impl AppleScriptBackend {
    /// Creates a new AppleScriptBackend
    pub fn new() -> Self {
        Self
    }

    async fn run_osascript(&self, script: &str) -> CaptureResult<()> {
        debug!(script = %script, "running osascript");
        run_command(Command::new(OSASCRIPT).arg("-e").arg(script), OSASCRIPT).await
    }
}

#[async_trait]
impl DesktopAutomation for AppleScriptBackend {
    async fn activate_application(&self, name: &str) -> CaptureResult<()> {
        self.run_osascript(&activate_script(name)).await
    }

    async fn send_keystroke(&self, keystroke: &Keystroke) -> CaptureResult<()> {
        self.run_osascript(&keystroke_script(keystroke)).await
    }

    async fn capture_screen_to_file(&self, path: &Path) -> CaptureResult<()> {
        run_command(Command::new(SCREENCAPTURE).arg(path), SCREENCAPTURE).await
    }

    fn name(&self) -> &'static str {
        "applescript"
    }
}

async fn run_command(command: &mut Command, program: &str) -> CaptureResult<()> {
    let output = command
        .output()
        .await
        .map_err(|source| CaptureError::Spawn {
            program: program.to_string(),
            source,
        })?;

    if output.status.success() {
        return Ok(());
    }

    let stderr = String::from_utf8_lossy(&output.stderr).trim().to_string();
    warn!(program, status = %output.status, stderr = %stderr, "automation command failed");
    Err(CaptureError::CommandFailed {
        program: program.to_string(),
        status: output.status.to_string(),
        stderr,
    })
}

/// Escapes a value for use inside an AppleScript string literal.
pub(crate) fn escape_applescript(value: &str) -> String {
    value.replace('\\', "\\\\").replace('"', "\\\"")
}

/// Script that brings `name` to the foreground.
pub(crate) fn activate_script(name: &str) -> String {
    format!(
        "tell application \"{}\"\n    activate\nend tell",
        escape_applescript(name)
    )
}

/// Script that types `keystroke` into the foreground application.
pub(crate) fn keystroke_script(keystroke: &Keystroke) -> String {
    let key = escape_applescript(&keystroke.key);
    if keystroke.modifiers.is_empty() {
        return format!(
            "tell application \"System Events\"\n    keystroke \"{}\"\nend tell",
            key
        );
    }

    let modifiers = keystroke
        .modifiers
        .iter()
        .map(|m| m.applescript_term())
        .collect::<Vec<_>>()
        .join(", ");
    format!(
        "tell application \"System Events\"\n    keystroke \"{}\" using {{{}}}\nend tell",
        key, modifiers
    )
}
