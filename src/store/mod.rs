//! JSON persistence for project and terminal mappings.
//!
//! Three documents live under one data directory: `projects.json` (recent
//! project list, capped), `terminals.json` (window id → mapping), and
//! `window_names.json` (flat id → name mirror consumed by external
//! tooling). Every mutation is a read-modify-write executed under an
//! exclusive file lock, and every write goes through a temp file plus
//! atomic rename, so two concurrent operations compose instead of losing
//! each other's update. Unreadable or corrupt documents degrade to empty.

use std::collections::BTreeMap;
use std::fs::{self, File, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};

use chrono::Utc;
use fs2::FileExt;
use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::domain::{ProjectMapping, TerminalMapping, WindowId};

/// Most-recently-used entries kept in the project list.
pub const PROJECT_CAP: usize = 10;

/// Write-side persistence failures. Read failures never surface here:
/// an unreadable or corrupt document loads as empty.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("failed to write {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to serialize {path}: {source}")]
    Serialize {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

/// File-backed store for the mapping documents.
#[derive(Debug, Clone)]
pub struct MappingStore {
    base_dir: PathBuf,
}

impl MappingStore {
    /// Create a store rooted at an explicit data directory.
    pub fn new(base_dir: impl Into<PathBuf>) -> Self {
        Self {
            base_dir: base_dir.into(),
        }
    }

    /// Default data directory (~/.termtag).
    pub fn default_dir() -> PathBuf {
        dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(".termtag")
    }

    pub fn base_dir(&self) -> &Path {
        &self.base_dir
    }

    fn projects_path(&self) -> PathBuf {
        self.base_dir.join("projects.json")
    }

    fn windows_path(&self) -> PathBuf {
        self.base_dir.join("terminals.json")
    }

    fn mirror_path(&self) -> PathBuf {
        self.base_dir.join("window_names.json")
    }

    // ─── projects ────────────────────────────────────────────────────────

    /// Recent projects, most recently used first. Missing or corrupt
    /// documents load as empty.
    pub fn load_projects(&self) -> Vec<ProjectMapping> {
        let mut projects: Vec<ProjectMapping> = Self::load_json(&self.projects_path());
        projects.sort_by(|a, b| b.last_used.cmp(&a.last_used));
        projects
    }

    /// Write the project list, truncated to the [`PROJECT_CAP`] most recent.
    pub fn save_projects(&self, projects: &[ProjectMapping]) -> Result<(), StoreError> {
        let _lock = self.lock()?;
        let mut sorted = projects.to_vec();
        sorted.sort_by(|a, b| b.last_used.cmp(&a.last_used));
        sorted.truncate(PROJECT_CAP);
        self.write_json(&self.projects_path(), &sorted)
    }

    /// Record a project use. Entries colliding on name or path are evicted,
    /// the fresh entry goes to the front, and the list is capped.
    pub fn upsert_project(&self, name: &str, path: &str) -> Result<Vec<ProjectMapping>, StoreError> {
        let _lock = self.lock()?;
        let mut projects = self.load_projects();
        projects.retain(|p| p.name != name && p.path != path);
        projects.insert(0, ProjectMapping::new(name, path));
        projects.truncate(PROJECT_CAP);
        self.write_json(&self.projects_path(), &projects)?;
        Ok(projects)
    }

    // ─── terminal mappings ───────────────────────────────────────────────

    /// All stored window mappings, keyed by window id. Missing or corrupt
    /// documents load as empty.
    pub fn load_windows(&self) -> BTreeMap<String, TerminalMapping> {
        Self::load_json(&self.windows_path())
    }

    /// Insert or replace the mapping for a window.
    pub fn record_window(&self, mapping: TerminalMapping) -> Result<(), StoreError> {
        let _lock = self.lock()?;
        let mut windows = self.load_windows();
        windows.insert(mapping.window_id.as_str().to_string(), mapping);
        self.write_json(&self.windows_path(), &windows)?;
        self.sync_mirror(&windows);
        Ok(())
    }

    /// Update the stored name (and last-used time) for a window. Returns
    /// `false` when no mapping exists for `id`.
    pub fn rename_window(&self, id: &WindowId, name: &str) -> Result<bool, StoreError> {
        let _lock = self.lock()?;
        let mut windows = self.load_windows();
        let Some(mapping) = windows.get_mut(id.as_str()) else {
            return Ok(false);
        };
        mapping.name = name.to_string();
        mapping.last_used = Utc::now();
        self.write_json(&self.windows_path(), &windows)?;
        self.sync_mirror(&windows);
        Ok(true)
    }

    /// Flag a mapping whose window an operation reported missing.
    pub fn mark_dangling(&self, id: &WindowId) -> Result<bool, StoreError> {
        let _lock = self.lock()?;
        let mut windows = self.load_windows();
        let Some(mapping) = windows.get_mut(id.as_str()) else {
            return Ok(false);
        };
        mapping.dangling = true;
        self.write_json(&self.windows_path(), &windows)
            .map(|()| true)
    }

    /// Remove a mapping (and its mirror entry). Returns `false` when
    /// nothing was stored for `id`.
    pub fn forget_window(&self, id: &WindowId) -> Result<bool, StoreError> {
        let _lock = self.lock()?;
        let mut windows = self.load_windows();
        if windows.remove(id.as_str()).is_none() {
            return Ok(false);
        }
        self.write_json(&self.windows_path(), &windows)?;
        self.sync_mirror(&windows);
        Ok(true)
    }

    /// Remove every mapping whose window id is not in `live`. Returns the
    /// ids that were dropped.
    pub fn prune_missing(&self, live: &[WindowId]) -> Result<Vec<WindowId>, StoreError> {
        let _lock = self.lock()?;
        let mut windows = self.load_windows();
        let stale: Vec<String> = windows
            .keys()
            .filter(|id| !live.iter().any(|l| l.as_str() == id.as_str()))
            .cloned()
            .collect();

        if stale.is_empty() {
            return Ok(Vec::new());
        }

        let mut pruned = Vec::with_capacity(stale.len());
        for id in &stale {
            if let Some(mapping) = windows.remove(id) {
                pruned.push(mapping.window_id);
            }
        }
        self.write_json(&self.windows_path(), &windows)?;
        self.sync_mirror(&windows);
        Ok(pruned)
    }

    // ─── internals ───────────────────────────────────────────────────────

    /// Rewrite the flat id → name mirror from the full mapping document.
    ///
    /// The mirror is kept in sync opportunistically, not transactionally:
    /// failures are logged and never propagated.
    fn sync_mirror(&self, windows: &BTreeMap<String, TerminalMapping>) {
        let flat: BTreeMap<&str, &str> = windows
            .iter()
            .map(|(id, mapping)| (id.as_str(), mapping.name.as_str()))
            .collect();
        if let Err(error) = self.write_json(&self.mirror_path(), &flat) {
            tracing::warn!(%error, "failed to update window-name mirror");
        }
    }

    /// Take the store-wide lock for the duration of a read-modify-write.
    fn lock(&self) -> Result<File, StoreError> {
        fs::create_dir_all(&self.base_dir).map_err(|source| StoreError::Write {
            path: self.base_dir.clone(),
            source,
        })?;

        let path = self.base_dir.join(".lock");
        let file = OpenOptions::new()
            .write(true)
            .create(true)
            .truncate(false)
            .open(&path)
            .map_err(|source| StoreError::Write {
                path: path.clone(),
                source,
            })?;

        // Blocks until any concurrent mutation finishes; released on drop
        file.lock_exclusive()
            .map_err(|source| StoreError::Write { path, source })?;

        Ok(file)
    }

    fn load_json<T: DeserializeOwned + Default>(path: &Path) -> T {
        if !path.exists() {
            return T::default();
        }
        match fs::read_to_string(path) {
            Ok(content) => match serde_json::from_str(&content) {
                Ok(value) => value,
                Err(error) => {
                    tracing::warn!(path = %path.display(), %error, "ignoring corrupt store document");
                    T::default()
                }
            },
            Err(error) => {
                tracing::warn!(path = %path.display(), %error, "ignoring unreadable store document");
                T::default()
            }
        }
    }

    /// Pretty-printed JSON write via temp file and atomic rename.
    fn write_json<T: Serialize>(&self, path: &Path, value: &T) -> Result<(), StoreError> {
        fs::create_dir_all(&self.base_dir).map_err(|source| StoreError::Write {
            path: self.base_dir.clone(),
            source,
        })?;

        let content =
            serde_json::to_string_pretty(value).map_err(|source| StoreError::Serialize {
                path: path.to_path_buf(),
                source,
            })?;

        let temp_path = path.with_extension("json.tmp");
        let write_err = |source| StoreError::Write {
            path: temp_path.clone(),
            source,
        };

        let mut temp = OpenOptions::new()
            .write(true)
            .create(true)
            .truncate(true)
            .open(&temp_path)
            .map_err(write_err)?;
        temp.write_all(content.as_bytes()).map_err(write_err)?;
        temp.sync_all().map_err(write_err)?;

        fs::rename(&temp_path, path).map_err(|source| StoreError::Write {
            path: path.to_path_buf(),
            source,
        })
    }
}
