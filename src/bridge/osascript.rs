//! Production bridge: `/usr/bin/osascript -e <script>`.

use std::process::Stdio;
use std::time::Duration;

use async_trait::async_trait;
use tokio::process::Command;
use tokio::time::timeout;

use super::{BridgeError, ScriptRunner};

/// Default bound on a single osascript invocation.
///
/// Terminal.app can stall on permission prompts and modal dialogs; without
/// a deadline a hung interpreter would hang the calling operation forever.
const DEFAULT_TIMEOUT: Duration = Duration::from_secs(15);

/// Runs scripts through the osascript interpreter with a bounded wait.
#[derive(Debug, Clone)]
pub struct OsascriptBridge {
    timeout: Duration,
}

impl OsascriptBridge {
    pub fn new() -> Self {
        Self {
            timeout: DEFAULT_TIMEOUT,
        }
    }

    pub fn with_timeout(timeout: Duration) -> Self {
        Self { timeout }
    }
}

impl Default for OsascriptBridge {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ScriptRunner for OsascriptBridge {
    async fn run(&self, script: &str) -> Result<String, BridgeError> {
        tracing::debug!(bytes = script.len(), "running osascript");

        let child = Command::new("osascript")
            .arg("-e")
            .arg(script)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true)
            .spawn()
            .map_err(BridgeError::Launch)?;

        let output = match timeout(self.timeout, child.wait_with_output()).await {
            Ok(result) => result.map_err(BridgeError::Launch)?,
            // Dropping the wait future reaps the child via kill_on_drop
            Err(_) => {
                return Err(BridgeError::TimedOut {
                    timeout_secs: self.timeout.as_secs(),
                });
            }
        };

        let mut text = String::from_utf8_lossy(&output.stdout).trim().to_string();

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            let stderr = stderr.trim();
            if !stderr.is_empty() {
                if !text.is_empty() {
                    text.push('\n');
                }
                text.push_str(stderr);
            }
            return Err(BridgeError::CommandFailed {
                code: output.status.code().unwrap_or(-1),
                output: text,
            });
        }

        Ok(text)
    }
}
