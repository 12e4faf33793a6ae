//! Integration with an optional companion automation binary.
//!
//! The companion is only probed for liveness and invoked with fixed flags
//! for screenshot/file-transfer/output-capture side effects; none of its
//! output feeds back into the mapping subsystem.

use std::ffi::OsStr;
use std::path::{Path, PathBuf};

use tokio::process::Command;

#[derive(Debug, thiserror::Error)]
pub enum CompanionError {
    #[error("failed to launch {binary}: {source}")]
    Launch {
        binary: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Handle to the companion binary.
#[derive(Debug, Clone)]
pub struct CompanionTool {
    binary: PathBuf,
}

impl CompanionTool {
    pub fn new(binary: impl Into<PathBuf>) -> Self {
        Self {
            binary: binary.into(),
        }
    }

    pub fn binary(&self) -> &Path {
        &self.binary
    }

    /// Whether a companion process is currently running (`pgrep -f` on the
    /// binary name).
    pub async fn is_running(&self) -> bool {
        let Some(name) = self.binary.file_name().and_then(OsStr::to_str) else {
            return false;
        };
        Command::new("pgrep")
            .arg("-f")
            .arg(name)
            .output()
            .await
            .map(|output| output.status.success() && !output.stdout.is_empty())
            .unwrap_or(false)
    }

    pub fn screenshot_to_terminal(&self) -> Result<(), CompanionError> {
        self.fire(&[OsStr::new("--screenshot-to-terminal")])
    }

    pub fn send_file(&self, path: &Path) -> Result<(), CompanionError> {
        self.fire(&[OsStr::new("--send-file"), path.as_os_str()])
    }

    pub fn capture_output(&self) -> Result<(), CompanionError> {
        self.fire(&[OsStr::new("--capture-output")])
    }

    pub fn toggle_focus_indicators(&self) -> Result<(), CompanionError> {
        self.fire(&[OsStr::new("--toggle-focus")])
    }

    /// Fire-and-forget: the spawned process is never awaited.
    fn fire(&self, args: &[&OsStr]) -> Result<(), CompanionError> {
        Command::new(&self.binary)
            .args(args)
            .spawn()
            .map_err(|source| CompanionError::Launch {
                binary: self.binary.clone(),
                source,
            })?;
        Ok(())
    }
}
