//! Centralized settle delays for the capture sequence.
//!
//! After a UI-affecting action the target application gets a fixed amount of
//! time to finish redrawing before the next step runs. There is no readiness
//! signal from the application, so these are plain waits.
//!
//! # Runtime Configuration
//!
//! All delays can be overridden at runtime via environment variables:
//!
//! | Environment Variable | Default | Description |
//! |---------------------|---------|-------------|
//! | `SCREENSHOT_ACTIVATE_SETTLE_MS` | 1000 | Wait after activating the window |
//! | `SCREENSHOT_SUBVIEW_SETTLE_MS` | 2000 | Wait after the sub-view shortcut |
//! | `SCREENSHOT_FULLSCREEN_SETTLE_MS` | 2000 | Wait after entering fullscreen |

use std::time::Duration;

/// Wait after bringing the target application to the foreground.
pub const ACTIVATE_SETTLE_MS: u64 = 1000;

/// Wait after sending the sub-view shortcut.
///
/// Sub-view switches (e.g. Calendar's day/week/month views) may animate.
pub const SUBVIEW_SETTLE_MS: u64 = 2000;

/// Wait after toggling fullscreen on.
///
/// The macOS fullscreen transition animates into a new Space; capturing
/// earlier records the transition instead of the window.
pub const FULLSCREEN_SETTLE_MS: u64 = 2000;

// =============================================================================
// Environment Variable Overrides
// =============================================================================

fn get_delay_from_env(env_var: &str, default: u64) -> u64 {
    std::env::var(env_var)
        .ok()
        .and_then(|s| s.parse().ok())
        .unwrap_or(default)
}

/// Get the activation settle delay, checking environment variable override.
///
/// Override with: `SCREENSHOT_ACTIVATE_SETTLE_MS`
pub fn activate_settle_ms() -> u64 {
    get_delay_from_env("SCREENSHOT_ACTIVATE_SETTLE_MS", ACTIVATE_SETTLE_MS)
}

/// Get the sub-view settle delay, checking environment variable override.
///
/// Override with: `SCREENSHOT_SUBVIEW_SETTLE_MS`
///
/// # Example
///
/// ```bash
/// # Give a slow app more time to switch panes
/// export SCREENSHOT_SUBVIEW_SETTLE_MS=3500
/// ```
pub fn subview_settle_ms() -> u64 {
    get_delay_from_env("SCREENSHOT_SUBVIEW_SETTLE_MS", SUBVIEW_SETTLE_MS)
}

/// Get the fullscreen settle delay, checking environment variable override.
///
/// Override with: `SCREENSHOT_FULLSCREEN_SETTLE_MS`
pub fn fullscreen_settle_ms() -> u64 {
    get_delay_from_env("SCREENSHOT_FULLSCREEN_SETTLE_MS", FULLSCREEN_SETTLE_MS)
}

/// The full set of settle delays used by one orchestrator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SettleDelays {
    /// After activation
    pub activate:   Duration,
    /// After the sub-view shortcut
    pub subview:    Duration,
    /// After entering fullscreen
    pub fullscreen: Duration,
}

impl SettleDelays {
    /// Reads delays from the environment, falling back to the defaults.
    pub fn from_env() -> Self {
        Self {
            activate:   Duration::from_millis(activate_settle_ms()),
            subview:    Duration::from_millis(subview_settle_ms()),
            fullscreen: Duration::from_millis(fullscreen_settle_ms()),
        }
    }

    /// No waiting at all. Only useful against a mock backend.
    pub fn none() -> Self {
        Self {
            activate:   Duration::ZERO,
            subview:    Duration::ZERO,
            fullscreen: Duration::ZERO,
        }
    }
}

impl Default for SettleDelays {
    fn default() -> Self {
        Self {
            activate:   Duration::from_millis(ACTIVATE_SETTLE_MS),
            subview:    Duration::from_millis(SUBVIEW_SETTLE_MS),
            fullscreen: Duration::from_millis(FULLSCREEN_SETTLE_MS),
        }
    }
}
