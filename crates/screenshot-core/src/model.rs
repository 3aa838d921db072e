//! Data models for screenshot capture
//!
//! This module defines the core types used throughout the capture pipeline:
//! - [`CaptureRequest`]: the normalized, validated request
//! - [`CaptureArtifact`]: what a successful capture produces
//! - [`CaptureStep`]: the stages of the capture sequence
//! - [`Keystroke`] / [`Modifier`]: keyboard shortcuts sent to the foreground app

use std::{fmt, path::PathBuf, str::FromStr};

use crate::error::CaptureError;

/// Default value of the informational `format` argument
pub const DEFAULT_FORMAT: &str = "markdown";

/// Screen region to capture
///
/// Only the full screen is supported.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum CaptureRegion {
    /// The whole screen
    #[default]
    Full,
}

impl CaptureRegion {
    /// Returns the wire name of the region
    pub fn as_str(&self) -> &'static str {
        match self {
            CaptureRegion::Full => "full",
        }
    }
}

impl fmt::Display for CaptureRegion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for CaptureRegion {
    type Err = CaptureError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "full" => Ok(CaptureRegion::Full),
            other => Err(CaptureError::InvalidParameter {
                parameter: "region".to_string(),
                reason:    format!("'{}' is not supported, only 'full' is", other),
            }),
        }
    }
}

/// A validated screenshot request
///
/// # Examples
///
/// ```
/// use screenshot_core::model::CaptureRequest;
///
/// let request = CaptureRequest::default()
///     .with_window("Calendar")
///     .switch_to_window(true)
///     .with_subwindow_key("2");
///
/// assert!(request.should_switch_window());
/// assert_eq!(request.subview_key(), Some("2"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CaptureRequest {
    /// Region to capture
    pub region:              CaptureRegion,
    /// Output format hint; accepted for compatibility, does not change the capture
    pub format:              String,
    /// Application to bring forward before capturing
    pub window_name:         Option<String>,
    /// Whether to activate `window_name` and toggle fullscreen around the capture
    pub switch_to_window:    bool,
    /// Whether to send the sub-view shortcut after activation
    pub switch_to_subwindow: bool,
    /// Key pressed together with Command to switch sub-view
    pub subwindow_key:       String,
    /// Whether the response should carry the image inline
    pub include_base64:      bool,
}

impl Default for CaptureRequest {
    fn default() -> Self {
        Self {
            region:              CaptureRegion::Full,
            format:              DEFAULT_FORMAT.to_string(),
            window_name:         None,
            switch_to_window:    false,
            switch_to_subwindow: false,
            subwindow_key:       String::new(),
            include_base64:      true,
        }
    }
}

impl CaptureRequest {
    /// Sets the target application name
    pub fn with_window(mut self, name: impl Into<String>) -> Self {
        self.window_name = Some(name.into());
        self
    }

    /// Sets whether the target application is activated
    pub fn switch_to_window(mut self, switch: bool) -> Self {
        self.switch_to_window = switch;
        self
    }

    /// Enables the sub-view switch with the given key
    pub fn with_subwindow_key(mut self, key: impl Into<String>) -> Self {
        self.switch_to_subwindow = true;
        self.subwindow_key = key.into();
        self
    }

    /// Sets whether the image is returned inline
    pub fn include_base64(mut self, include: bool) -> Self {
        self.include_base64 = include;
        self
    }

    /// True when activation and the fullscreen bracket should run
    pub fn should_switch_window(&self) -> bool {
        self.window_name.is_some() && self.switch_to_window
    }

    /// Key for the sub-view shortcut, when that step should run
    pub fn subview_key(&self) -> Option<&str> {
        if self.should_switch_window()
            && self.switch_to_subwindow
            && !self.subwindow_key.is_empty()
        {
            Some(self.subwindow_key.as_str())
        } else {
            None
        }
    }
}

/// Result of a successful capture
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CaptureArtifact {
    /// Absolute path of the saved PNG
    pub file_path:    PathBuf,
    /// Raw base64 of the file contents, present iff requested
    pub image_base64: Option<String>,
}

/// Stages of the capture sequence, in execution order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CaptureStep {
    /// Create the dated output directory
    PrepareDirectory,
    /// Bring the target application forward
    ActivateWindow,
    /// Send the sub-view shortcut
    SwitchSubview,
    /// Toggle fullscreen on
    EnterFullscreen,
    /// Write the screen to disk
    Capture,
    /// Toggle fullscreen back off
    ExitFullscreen,
}

impl CaptureStep {
    /// Returns the step name used in logs and error messages
    pub fn as_str(&self) -> &'static str {
        match self {
            CaptureStep::PrepareDirectory => "prepare directory",
            CaptureStep::ActivateWindow => "activate window",
            CaptureStep::SwitchSubview => "switch subview",
            CaptureStep::EnterFullscreen => "enter fullscreen",
            CaptureStep::Capture => "capture",
            CaptureStep::ExitFullscreen => "exit fullscreen",
        }
    }
}

impl fmt::Display for CaptureStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Keyboard modifier held while a key is pressed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Modifier {
    /// ⌘
    Command,
    /// ⌃
    Control,
    /// ⌥
    Option,
    /// ⇧
    Shift,
}

impl Modifier {
    /// AppleScript `using {...}` term for this modifier
    pub fn applescript_term(&self) -> &'static str {
        match self {
            Modifier::Command => "command down",
            Modifier::Control => "control down",
            Modifier::Option => "option down",
            Modifier::Shift => "shift down",
        }
    }
}

/// A key press with modifiers, sent to the foreground application
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Keystroke {
    /// Key to press
    pub key:       String,
    /// Modifiers held during the press
    pub modifiers: Vec<Modifier>,
}

impl Keystroke {
    /// Creates a keystroke with explicit modifiers
    pub fn new(key: impl Into<String>, modifiers: Vec<Modifier>) -> Self {
        Self {
            key: key.into(),
            modifiers,
        }
    }

    /// Command + `key`
    pub fn command(key: impl Into<String>) -> Self {
        Self::new(key, vec![Modifier::Command])
    }

    /// Command + Control + F, the macOS fullscreen toggle
    pub fn toggle_fullscreen() -> Self {
        Self::new("f", vec![Modifier::Command, Modifier::Control])
    }
}

impl fmt::Display for Keystroke {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for modifier in &self.modifiers {
            let symbol = match modifier {
                Modifier::Command => "cmd",
                Modifier::Control => "ctrl",
                Modifier::Option => "opt",
                Modifier::Shift => "shift",
            };
            write!(f, "{}+", symbol)?;
        }
        f.write_str(&self.key)
    }
}
