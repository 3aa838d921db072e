//! Output file naming for screenshots
//!
//! Screenshots land in a per-day directory under the user's Downloads
//! folder:
//!
//! ```text
//! ~/Downloads/20261016/screenshot-Calendar-2026-10-16T08-15-30-123Z.png
//! ```
//!
//! The day comes from the local clock; the timestamp is UTC with millisecond
//! precision and `:`/`.` swapped for `-`. Window names are reduced to
//! `[A-Za-z0-9_]`.

use std::path::{Path, PathBuf};

use chrono::{DateTime, Local, NaiveDate, SecondsFormat, Utc};
use tracing::debug;

use crate::error::{CaptureError, CaptureResult};

/// Prefix of every screenshot filename
pub const FILE_PREFIX: &str = "screenshot";

/// Extension of every screenshot filename
pub const FILE_EXTENSION: &str = "png";

/// Computes dated directories and filenames under an output root.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileNamer {
    root: PathBuf,
}

impl FileNamer {
    /// Creates a namer rooted at `root`
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Creates a namer rooted at `<home>/Downloads`
    pub fn from_home() -> CaptureResult<Self> {
        let home = dirs::home_dir().ok_or(CaptureError::HomeDirUnavailable)?;
        Ok(Self::new(home.join("Downloads")))
    }

    /// The output root
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Directory for a given local date, e.g. `<root>/20261016`
    pub fn dated_directory(&self, date: NaiveDate) -> PathBuf {
        self.root.join(date.format("%Y%m%d").to_string())
    }

    /// Creates the dated directory for `now` if it does not exist.
    ///
    /// Creation is recursive; an existing directory is not an error.
    pub async fn ensure_dated_directory(&self, now: DateTime<Utc>) -> CaptureResult<PathBuf> {
        let dir = self.dated_directory(now.with_timezone(&Local).date_naive());
        tokio::fs::create_dir_all(&dir)
            .await
            .map_err(|source| CaptureError::DirectoryCreate {
                path: dir.clone(),
                source,
            })?;
        debug!(dir = %dir.display(), "output directory ready");
        Ok(dir)
    }

    /// Full path of the screenshot taken at `now`
    pub fn file_path(&self, dir: &Path, window_name: Option<&str>, now: DateTime<Utc>) -> PathBuf {
        dir.join(file_name(window_name, now))
    }
}

/// Replaces every character outside `[A-Za-z0-9]` with `_`.
///
/// # Examples
///
/// ```
/// use screenshot_core::util::naming::sanitize_window_name;
///
/// assert_eq!(sanitize_window_name("Google Chrome"), "Google_Chrome");
/// ```
pub fn sanitize_window_name(name: &str) -> String {
    name.chars()
        .map(|c| if c.is_ascii_alphanumeric() { c } else { '_' })
        .collect()
}

/// ISO 8601 UTC timestamp with millisecond precision and `:`/`.` replaced by `-`.
pub fn file_timestamp(now: DateTime<Utc>) -> String {
    now.to_rfc3339_opts(SecondsFormat::Millis, true)
        .replace([':', '.'], "-")
}

/// `screenshot[-{window}]-{timestamp}.png`
pub fn file_name(window_name: Option<&str>, now: DateTime<Utc>) -> String {
    match window_name {
        Some(name) => format!(
            "{}-{}-{}.{}",
            FILE_PREFIX,
            sanitize_window_name(name),
            file_timestamp(now),
            FILE_EXTENSION
        ),
        None => format!("{}-{}.{}", FILE_PREFIX, file_timestamp(now), FILE_EXTENSION),
    }
}
