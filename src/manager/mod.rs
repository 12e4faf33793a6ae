//! Orchestration of window creation, lookup, and bulk renaming.
//!
//! [`WindowManager`] is the boundary where bridge and persistence failures
//! are turned into results for the caller; nothing here panics or exits the
//! process on an external failure.

use std::sync::Arc;

use crate::bridge::{BridgeError, ScriptRunner, script};
use crate::domain::{NamingScheme, TerminalMapping, TitleStyle, WindowId, WindowInfo};
use crate::store::{MappingStore, StoreError};

#[derive(Debug, thiserror::Error)]
pub enum ManagerError {
    #[error(transparent)]
    Bridge(#[from] BridgeError),

    /// An id-targeted command found no such open window. The stored
    /// mapping, if any, has been flagged dangling.
    #[error("no open window with id {0}")]
    WindowNotFound(WindowId),

    #[error("could not parse automation reply: {0}")]
    MalformedReply(String),

    #[error(transparent)]
    Store(#[from] StoreError),
}

/// Creates, finds, and renames terminal windows, keeping the persistent
/// name → window mapping consistent with what the bridge reports.
pub struct WindowManager {
    bridge: Arc<dyn ScriptRunner>,
    store: MappingStore,
    title_style: TitleStyle,
}

impl WindowManager {
    pub fn new(bridge: Arc<dyn ScriptRunner>, store: MappingStore) -> Self {
        Self {
            bridge,
            store,
            title_style: TitleStyle::default(),
        }
    }

    pub fn with_title_style(mut self, style: TitleStyle) -> Self {
        self.title_style = style;
        self
    }

    pub fn store(&self) -> &MappingStore {
        &self.store
    }

    /// Open a new Terminal window at `folder`, title it after `name`, and
    /// persist both the terminal mapping and a recent-project entry.
    ///
    /// The folder is not validated first: a path the shell cannot `cd` into
    /// still produces (and maps) a window, it just sits in the shell's
    /// default directory. Nothing is persisted unless the bridge returned a
    /// usable window id.
    pub async fn create_window(&self, name: &str, folder: &str) -> Result<WindowId, ManagerError> {
        let reply = self
            .bridge
            .run(&script::create_window(name, folder, self.title_style))
            .await?;

        let id = WindowId::new(reply.trim())
            .map_err(|e| ManagerError::MalformedReply(format!("window id reply {:?}", e.0)))?;

        self.store
            .record_window(TerminalMapping::new(id.clone(), name, folder))?;
        self.store.upsert_project(name, folder)?;

        tracing::info!(window = %id, name, folder, "created terminal window");
        Ok(id)
    }

    /// All currently open windows, in the terminal application's listing
    /// order.
    pub async fn list_windows(&self) -> Result<Vec<WindowInfo>, ManagerError> {
        let reply = self.bridge.run(&script::list_windows()).await?;
        parse_window_list(&reply)
    }

    /// Bring a window to the front.
    pub async fn focus(&self, id: &WindowId) -> Result<(), ManagerError> {
        self.targeted(id, script::focus_window(id)).await
    }

    /// Retitle a window and update its stored mapping's name and last-used
    /// time.
    pub async fn rename(&self, id: &WindowId, new_name: &str) -> Result<(), ManagerError> {
        self.targeted(id, script::rename_window(id, new_name))
            .await?;
        self.store.rename_window(id, new_name)?;
        Ok(())
    }

    /// Close a window. The stored mapping is kept; use
    /// [`forget`](Self::forget) to drop it.
    pub async fn close(&self, id: &WindowId) -> Result<(), ManagerError> {
        self.targeted(id, script::close_window(id)).await
    }

    /// Drop the stored mapping (and its mirror entry) without touching the
    /// window itself. Returns `false` when nothing was stored for `id`.
    pub fn forget(&self, id: &WindowId) -> Result<bool, ManagerError> {
        Ok(self.store.forget_window(id)?)
    }

    /// Prune stored mappings whose window no longer exists, returning the
    /// pruned ids.
    pub async fn reconcile(&self) -> Result<Vec<WindowId>, ManagerError> {
        let live: Vec<WindowId> = self
            .list_windows()
            .await?
            .into_iter()
            .map(|window| window.id)
            .collect();
        Ok(self.store.prune_missing(&live)?)
    }

    /// Rename every open window in listing order per `scheme`, returning
    /// the applied (id, label) pairs. Windows that vanish mid-pass are
    /// skipped; any other failure aborts.
    pub async fn apply_naming_scheme(
        &self,
        scheme: NamingScheme,
    ) -> Result<Vec<(WindowId, String)>, ManagerError> {
        let windows = self.list_windows().await?;
        let labels = scheme.labels(windows.len());

        let mut applied = Vec::with_capacity(windows.len());
        for (window, label) in windows.into_iter().zip(labels) {
            match self.rename(&window.id, &label).await {
                Ok(()) => applied.push((window.id, label)),
                Err(ManagerError::WindowNotFound(id)) => {
                    tracing::debug!(window = %id, "window closed during bulk rename");
                }
                Err(error) => return Err(error),
            }
        }
        Ok(applied)
    }

    /// Run one id-targeted command, mapping a missing-window failure to
    /// [`ManagerError::WindowNotFound`] and flagging the stored mapping.
    async fn targeted(&self, id: &WindowId, script_text: String) -> Result<(), ManagerError> {
        match self.bridge.run(&script_text).await {
            Ok(_) => Ok(()),
            Err(BridgeError::CommandFailed { output, .. }) if is_missing_window(&output) => {
                self.store.mark_dangling(id)?;
                Err(ManagerError::WindowNotFound(id.clone()))
            }
            Err(error) => Err(error.into()),
        }
    }
}

/// Parse the list-windows reply: one `<id><US><title>` record per line.
fn parse_window_list(reply: &str) -> Result<Vec<WindowInfo>, ManagerError> {
    let mut windows = Vec::new();
    for line in reply.lines() {
        if line.is_empty() {
            continue;
        }
        let mut fields = line.split(script::FIELD_SEP);
        let (Some(raw_id), Some(title), None) = (fields.next(), fields.next(), fields.next())
        else {
            return Err(ManagerError::MalformedReply(format!(
                "window record {line:?}"
            )));
        };
        let id = WindowId::new(raw_id)
            .map_err(|e| ManagerError::MalformedReply(format!("window id {:?}", e.0)))?;
        windows.push(WindowInfo {
            id,
            title: title.to_string(),
        });
    }
    Ok(windows)
}

/// osascript reports AppleScript error -1719 ("Invalid index") when a
/// `window id N` clause names no open window.
fn is_missing_window(output: &str) -> bool {
    output.contains("Invalid index") || output.contains("-1719")
}
