//! Snapshot persistence contract.
//!
//! The store calls `load` once when it opens and `save` after every applied
//! operation. Both are best-effort from the engine's point of view: errors are
//! logged by the store and never surface to callers of `apply`.

use std::sync::{Arc, Mutex};

use crate::error::{CoreError, Result};
use crate::model::AppState;

/// Load/save boundary for the full `AppState` snapshot.
pub trait SnapshotStore: Send {
    /// The persisted snapshot, or `None` if nothing has been saved yet.
    fn load(&self) -> Result<Option<AppState>>;

    fn save(&self, state: &AppState) -> Result<()>;
}

#[derive(Debug, Default)]
struct MemoryInner {
    json: Option<String>,
    saves: usize,
    fail_load: bool,
    fail_save: bool,
}

/// In-memory snapshot store.
///
/// Keeps the serialized JSON so loads go through the same decode path as the
/// database. Clones share the same slot, which lets tests inspect what the
/// store saved. Failures can be injected for error-path tests.
#[derive(Debug, Clone, Default)]
pub struct MemorySnapshotStore {
    inner: Arc<Mutex<MemoryInner>>,
}

impl MemorySnapshotStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// A store that already holds `state`.
    pub fn with_state(state: &AppState) -> Result<Self> {
        let store = Self::new();
        store.save(state)?;
        store.lock().saves = 0;
        Ok(store)
    }

    /// A store holding raw, possibly corrupt, JSON.
    pub fn with_raw(json: &str) -> Self {
        let store = Self::new();
        store.lock().json = Some(json.to_string());
        store
    }

    pub fn fail_loads(&self, fail: bool) {
        self.lock().fail_load = fail;
    }

    pub fn fail_saves(&self, fail: bool) {
        self.lock().fail_save = fail;
    }

    /// Number of successful saves.
    pub fn save_count(&self) -> usize {
        self.lock().saves
    }

    /// Decode the last saved snapshot.
    pub fn saved(&self) -> Option<AppState> {
        self.lock()
            .json
            .as_deref()
            .and_then(|json| serde_json::from_str(json).ok())
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, MemoryInner> {
        self.inner.lock().unwrap_or_else(|e| e.into_inner())
    }
}

impl SnapshotStore for MemorySnapshotStore {
    fn load(&self) -> Result<Option<AppState>> {
        let inner = self.lock();
        if inner.fail_load {
            return Err(CoreError::Custom("injected load failure".into()));
        }
        match inner.json.as_deref() {
            Some(json) => Ok(Some(serde_json::from_str(json)?)),
            None => Ok(None),
        }
    }

    fn save(&self, state: &AppState) -> Result<()> {
        let mut inner = self.lock();
        if inner.fail_save {
            return Err(CoreError::Custom("injected save failure".into()));
        }
        inner.json = Some(serde_json::to_string(state)?);
        inner.saves += 1;
        Ok(())
    }
}
