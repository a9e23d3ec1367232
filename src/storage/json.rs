//! JSON file-based task store.
//!
//! The whole task set lives in memory and is written back on every mutation
//! using an atomic write (temp file + rename), so a crash never leaves a
//! half-written `todos.json` behind.

use crate::domain::error::{Result, TodoError};
use crate::storage::backend::{not_found, TodoStore};
use crate::storage::models::TodoRecord;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

/// Current on-disk format version.
const STORAGE_VERSION: u32 = 1;

/// Top-level structure serialized to disk.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct StorageData {
    version: u32,

    /// Next id to hand out. Only ever grows, so ids of deleted tasks are
    /// never reused.
    #[serde(default = "first_id")]
    next_id: u64,

    #[serde(default)]
    todos: BTreeMap<u64, TodoRecord>,
}

const fn first_id() -> u64 {
    1
}

impl Default for StorageData {
    fn default() -> Self {
        Self {
            version: STORAGE_VERSION,
            next_id: first_id(),
            todos: BTreeMap::new(),
        }
    }
}

/// JSON file task store.
///
/// `Send` but not `Sync`; owned by the plugin worker.
///
/// # File Format
///
/// ```json
/// {
///   "version": 1,
///   "next_id": 3,
///   "todos": {
///     "1": { "id": 1, "title": "Buy milk", "completed": false, "created_at": 1700000000 },
///     "2": { "id": 2, "title": "Call mom", "description": "Sunday", "completed": true,
///            "created_at": 1700000100, "updated_at": 1700000200 }
///   }
/// }
/// ```
pub struct JsonStorage {
    file_path: PathBuf,
    data: StorageData,
    dirty: bool,
}

impl JsonStorage {
    /// Creates or opens a JSON task store. Parent directories are created.
    ///
    /// # Errors
    ///
    /// Returns an error if the parent directory cannot be created, or the file
    /// exists but cannot be read or parsed.
    ///
    /// # Examples
    ///
    /// ```no_run
    /// use zodo::storage::JsonStorage;
    /// use std::path::PathBuf;
    ///
    /// let storage = JsonStorage::new(PathBuf::from("/tmp/todos.json"))?;
    /// # Ok::<(), Box<dyn std::error::Error>>(())
    /// ```
    pub fn new(file_path: PathBuf) -> Result<Self> {
        tracing::debug!(path = ?file_path, "opening JSON task store");

        if let Some(parent) = file_path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let data = if file_path.exists() {
            Self::load_from_file(&file_path)?
        } else {
            tracing::debug!("initializing new empty store");
            StorageData::default()
        };

        tracing::debug!(
            todo_count = data.todos.len(),
            next_id = data.next_id,
            "task store opened"
        );

        Ok(Self {
            file_path,
            data,
            dirty: false,
        })
    }

    /// Returns the backing file path.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.file_path
    }

    /// Number of stored tasks.
    #[must_use]
    pub fn len(&self) -> usize {
        self.data.todos.len()
    }

    /// Returns `true` if the store holds no tasks.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.data.todos.is_empty()
    }

    fn load_from_file(path: &Path) -> Result<StorageData> {
        let contents = std::fs::read_to_string(path)?;
        let mut data: StorageData = serde_json::from_str(&contents)
            .map_err(|e| TodoError::Storage(format!("failed to parse JSON: {e}")))?;

        // A hand-edited file may carry a stale counter.
        let max_id = data.todos.keys().next_back().copied().unwrap_or(0);
        if data.next_id <= max_id {
            tracing::warn!(next_id = data.next_id, max_id, "repairing id counter");
            data.next_id = max_id + 1;
        }

        tracing::debug!(
            version = data.version,
            todos = data.todos.len(),
            "loaded task data"
        );

        Ok(data)
    }

    fn save_to_file(&mut self) -> Result<()> {
        if !self.dirty {
            tracing::trace!("skipping save, no changes");
            return Ok(());
        }

        let json = serde_json::to_string_pretty(&self.data)
            .map_err(|e| TodoError::Storage(format!("failed to serialize JSON: {e}")))?;

        let tmp_path = self.file_path.with_extension("tmp");
        std::fs::write(&tmp_path, json)?;
        std::fs::rename(&tmp_path, &self.file_path)?;

        self.dirty = false;
        tracing::debug!(path = ?self.file_path, "task store saved");
        Ok(())
    }

    /// Persists the current data. On failure the in-memory data goes back to
    /// `previous`, so a failed write leaves nothing behind to be saved later.
    fn commit(&mut self, previous: StorageData) -> Result<()> {
        self.dirty = true;
        if let Err(e) = self.save_to_file() {
            tracing::warn!(error = %e, "write failed, rolling back");
            self.data = previous;
            self.dirty = false;
            return Err(e);
        }
        Ok(())
    }
}

impl TodoStore for JsonStorage {
    fn create_item(&mut self, title: &str, description: Option<&str>) -> Result<TodoRecord> {
        let _span = tracing::debug_span!("json_create_item", title = %title).entered();

        let id = self.data.next_id;
        let description = description
            .map(str::trim)
            .filter(|d| !d.is_empty())
            .map(String::from);
        let record = TodoRecord::new(id, title.trim(), description);

        let previous = self.data.clone();
        self.data.next_id = id + 1;
        self.data.todos.insert(id, record.clone());
        self.commit(previous)?;

        tracing::debug!(todo_id = id, "task created");
        Ok(record)
    }

    fn list_items(&self) -> Result<Vec<TodoRecord>> {
        let todos: Vec<TodoRecord> = self.data.todos.values().cloned().collect();
        tracing::debug!(count = todos.len(), "retrieved tasks");
        Ok(todos)
    }

    fn get_item(&self, id: u64) -> Result<TodoRecord> {
        self.data.todos.get(&id).cloned().ok_or_else(|| not_found(id))
    }

    fn update_item(&mut self, record: &TodoRecord) -> Result<()> {
        let _span = tracing::debug_span!("json_update_item", todo_id = record.id).entered();

        let previous = self.data.clone();
        let existing = self
            .data
            .todos
            .get_mut(&record.id)
            .ok_or_else(|| not_found(record.id))?;

        let created_at = existing.created_at;
        *existing = record.clone();
        existing.created_at = created_at;
        existing.updated_at = Some(chrono::Utc::now().timestamp());

        self.commit(previous)
    }

    fn delete_item(&mut self, id: u64) -> Result<bool> {
        let _span = tracing::debug_span!("json_delete_item", todo_id = id).entered();

        let previous = self.data.clone();
        if self.data.todos.remove(&id).is_none() {
            tracing::debug!("task already absent");
            return Ok(false);
        }

        self.commit(previous)?;
        Ok(true)
    }
}

impl Drop for JsonStorage {
    fn drop(&mut self) {
        if self.dirty {
            tracing::debug!("saving dirty data on drop");
            if let Err(e) = self.save_to_file() {
                tracing::error!(error = %e, "failed to save on drop");
            }
        }
    }
}
