//! AppleScript automation bridge for Terminal.app.
//!
//! The sole channel through which the crate observes or mutates real
//! terminal windows: scripts are generated by [`script`] and executed by an
//! implementation of [`ScriptRunner`].

mod osascript;
pub mod script;

pub use osascript::OsascriptBridge;

use async_trait::async_trait;

/// Errors from launching or running the scripting interpreter.
#[derive(Debug, thiserror::Error)]
pub enum BridgeError {
    #[error("failed to launch osascript: {0}")]
    Launch(#[source] std::io::Error),

    #[error("osascript exited with status {code}: {output}")]
    CommandFailed { code: i32, output: String },

    #[error("osascript did not finish within {timeout_secs}s")]
    TimedOut { timeout_secs: u64 },
}

/// Executes an automation script and returns its textual result.
///
/// Implemented by [`OsascriptBridge`] in production and by stubs in tests.
#[async_trait]
pub trait ScriptRunner: Send + Sync {
    /// Run `script`, returning trimmed standard output on exit 0.
    async fn run(&self, script: &str) -> Result<String, BridgeError>;
}
