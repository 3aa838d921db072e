//! Error types for screenshot capture operations
//!
//! Every failure in the capture sequence surfaces as a [`CaptureError`].
//! Each variant carries enough context for the operator log, and
//! [`CaptureError::remediation_hint`] gives a short next step.

use std::path::PathBuf;

use crate::model::CaptureStep;

/// Result type alias for capture operations
pub type CaptureResult<T> = Result<T, CaptureError>;

/// Comprehensive error type for screenshot capture operations
#[derive(Debug, thiserror::Error)]
pub enum CaptureError {
    /// The user's home directory could not be resolved
    #[error("Could not determine the user's home directory")]
    HomeDirUnavailable,

    /// The dated output directory could not be created
    #[error("Failed to create output directory {}: {source}", path.display())]
    DirectoryCreate {
        /// Directory that failed to be created
        path:   PathBuf,
        /// Underlying I/O error
        #[source]
        source: std::io::Error,
    },

    /// An external automation program could not be started
    #[error("Failed to launch {program}: {source}")]
    Spawn {
        /// Program name (e.g. "osascript")
        program: String,
        /// Underlying I/O error
        #[source]
        source:  std::io::Error,
    },

    /// An external automation program exited unsuccessfully
    #[error("{program} exited with {status}: {stderr}")]
    CommandFailed {
        /// Program name (e.g. "screencapture")
        program: String,
        /// Exit status as reported by the OS
        status:  String,
        /// Trimmed standard error output
        stderr:  String,
    },

    /// A step of the capture sequence failed
    #[error("{step} failed: {source}")]
    StepFailed {
        /// Step that aborted the sequence
        step:   CaptureStep,
        /// Error raised by the step
        #[source]
        source: Box<CaptureError>,
    },

    /// The captured file could not be read back for encoding
    #[error("Failed to read captured image {}: {source}", path.display())]
    ReadImage {
        /// Path of the captured image
        path:   PathBuf,
        /// Underlying I/O error
        #[source]
        source: std::io::Error,
    },

    /// Invalid parameter provided
    #[error("Invalid parameter '{parameter}': {reason}")]
    InvalidParameter {
        /// Name of the invalid parameter
        parameter: String,
        /// Reason why it's invalid
        reason:    String,
    },

    /// No automation backend exists for the running platform
    #[error("Desktop automation is not available on {platform}")]
    BackendNotAvailable {
        /// Operating system name
        platform: String,
    },
}

impl CaptureError {
    /// Wraps this error with the step that raised it.
    ///
    /// Already wrapped errors are returned unchanged so the innermost step
    /// is the one reported.
    pub fn at_step(self, step: CaptureStep) -> Self {
        match self {
            CaptureError::StepFailed { .. } => self,
            other => CaptureError::StepFailed {
                step,
                source: Box::new(other),
            },
        }
    }

    /// Returns the step that failed, if this error came from the sequence.
    pub fn step(&self) -> Option<CaptureStep> {
        match self {
            CaptureError::StepFailed { step, .. } => Some(*step),
            _ => None,
        }
    }

    /// Returns an actionable remediation hint for this error
    ///
    /// # Examples
    ///
    /// ```
    /// use screenshot_core::error::CaptureError;
    ///
    /// let error = CaptureError::HomeDirUnavailable;
    /// assert!(error.remediation_hint().contains("HOME"));
    /// ```
    pub fn remediation_hint(&self) -> &str {
        match self {
            CaptureError::HomeDirUnavailable => {
                "Set the HOME environment variable or start the server with --output-root."
            }
            CaptureError::DirectoryCreate { .. } => {
                "Check that the output root exists and is writable, and that the disk is not full."
            }
            CaptureError::Spawn { program, .. } => match program.as_str() {
                "osascript" => "osascript ships with macOS. Make sure the server runs on macOS.",
                "screencapture" => {
                    "screencapture ships with macOS. Make sure the server runs on macOS."
                }
                _ => "Make sure the program is installed and on PATH.",
            },
            CaptureError::CommandFailed { program, .. } => match program.as_str() {
                "osascript" => {
                    "Grant Accessibility permission to the terminal running the server in System \
                     Settings > Privacy & Security > Accessibility, and check the application \
                     name is spelled as it appears in the Dock."
                }
                "screencapture" => {
                    "Grant Screen Recording permission to the terminal running the server in \
                     System Settings > Privacy & Security > Screen Recording."
                }
                _ => "The external command failed. Check its stderr output above.",
            },
            CaptureError::StepFailed { source, .. } => source.remediation_hint(),
            CaptureError::ReadImage { .. } => {
                "The screenshot file disappeared or is unreadable. Check disk permissions."
            }
            CaptureError::InvalidParameter { parameter, .. } => match parameter.as_str() {
                "region" => "Only the 'full' region is supported.",
                _ => "Check the parameter value against the tool description.",
            },
            CaptureError::BackendNotAvailable { .. } => {
                "Window activation and capture rely on osascript and screencapture, which are \
                 only available on macOS."
            }
        }
    }
}
