//! Mapping records and the window identifier newtype.
//!
//! JSON field names follow the on-disk documents this tool has always
//! written (`windowID`, `folderPath`, `lastUsed`, ...), so existing data
//! files keep loading.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;

/// Opaque identifier Terminal.app assigns to an open window.
///
/// Valid only while that window and the owning application session exist;
/// it is not stable across Terminal restarts. Restricted to ASCII digits so
/// an identifier can be spliced into a `window id N` clause without any
/// quoting.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct WindowId(String);

impl WindowId {
    /// Parse an identifier, typically from osascript output.
    ///
    /// Rejects empty strings and anything containing a non-digit.
    pub fn new(raw: impl Into<String>) -> Result<Self, InvalidWindowId> {
        let raw = raw.into();
        if raw.is_empty() || !raw.bytes().all(|b| b.is_ascii_digit()) {
            return Err(InvalidWindowId(raw));
        }
        Ok(Self(raw))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for WindowId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl<'de> Deserialize<'de> for WindowId {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        Self::new(raw).map_err(serde::de::Error::custom)
    }
}

/// Error for a window identifier that is empty or not all digits.
#[derive(Debug, Clone, thiserror::Error)]
#[error("not a valid window identifier: {0:?}")]
pub struct InvalidWindowId(pub String);

/// Durable record associating a project name and folder path with
/// most-recently-used ordering, independent of any live window.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectMapping {
    pub name: String,
    pub path: String,
    pub last_used: DateTime<Utc>,
}

impl ProjectMapping {
    pub fn new(name: impl Into<String>, path: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            path: path.into(),
            last_used: Utc::now(),
        }
    }
}

/// Durable record associating a window identifier with the name and folder
/// it was created for.
///
/// Meaningful only while the window still exists; the store is not
/// reconciled against live windows on its own, so entries can go stale
/// after a window is closed elsewhere.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TerminalMapping {
    #[serde(rename = "windowID")]
    pub window_id: WindowId,
    pub name: String,
    pub folder_path: String,
    pub created: DateTime<Utc>,
    pub last_used: DateTime<Utc>,
    /// Set once an operation targeting this window reported it missing.
    #[serde(default)]
    pub dangling: bool,
}

impl TerminalMapping {
    pub fn new(window_id: WindowId, name: impl Into<String>, folder_path: impl Into<String>) -> Self {
        let now = Utc::now();
        Self {
            window_id,
            name: name.into(),
            folder_path: folder_path.into(),
            created: now,
            last_used: now,
            dangling: false,
        }
    }
}

/// One open window as reported by the terminal application.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WindowInfo {
    pub id: WindowId,
    /// Custom title, or the application-side fallback `Terminal <id>` when
    /// no custom title was ever set.
    pub title: String,
}

/// How a created window's custom title is derived.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TitleStyle {
    /// Just the project name.
    #[default]
    Plain,
    /// `[name] <last folder segment>`.
    Bracketed,
}
