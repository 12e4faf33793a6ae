//! Shared test utilities: a scripted bridge stub and a temp-backed manager

use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use tempfile::TempDir;

use termtag::bridge::script::FIELD_SEP;
use termtag::bridge::{BridgeError, ScriptRunner};
use termtag::manager::WindowManager;
use termtag::store::MappingStore;

/// Bridge stub replaying canned replies and recording every script it was
/// asked to run.
#[derive(Default)]
pub struct StubBridge {
    replies: Mutex<VecDeque<Result<String, BridgeError>>>,
    scripts: Mutex<Vec<String>>,
}

impl StubBridge {
    pub fn with_replies(replies: Vec<Result<String, BridgeError>>) -> Arc<Self> {
        Arc::new(Self {
            replies: Mutex::new(replies.into()),
            scripts: Mutex::new(Vec::new()),
        })
    }

    pub fn scripts(&self) -> Vec<String> {
        self.scripts.lock().unwrap().clone()
    }
}

#[async_trait]
impl ScriptRunner for StubBridge {
    async fn run(&self, script: &str) -> Result<String, BridgeError> {
        self.scripts.lock().unwrap().push(script.to_string());
        self.replies
            .lock()
            .unwrap()
            .pop_front()
            .expect("stub bridge ran out of replies")
    }
}

/// Manager wired to a stub bridge and a store in a fresh temp directory.
pub fn manager_with(
    replies: Vec<Result<String, BridgeError>>,
) -> (WindowManager, Arc<StubBridge>, TempDir) {
    let dir = TempDir::new().expect("Failed to create temp dir");
    let bridge = StubBridge::with_replies(replies);
    let manager = WindowManager::new(bridge.clone(), MappingStore::new(dir.path()));
    (manager, bridge, dir)
}

/// Build a list-windows reply for the given (id, title) pairs.
pub fn list_reply(windows: &[(&str, &str)]) -> String {
    windows
        .iter()
        .map(|(id, title)| format!("{id}{FIELD_SEP}{title}"))
        .collect::<Vec<_>>()
        .join("\n")
}

/// The bridge error osascript produces for a `window id N` that names no
/// open window.
pub fn missing_window_error() -> BridgeError {
    BridgeError::CommandFailed {
        code: 1,
        output: "execution error: Terminal got an error: Invalid index. (-1719)".to_string(),
    }
}
