//! # Storage Backend
//!
//! The persistence port every store writes through, plus its two
//! implementations.
//!
//! ## Why a Port?
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────┐
//! │                     Storage Port Layout                             │
//! │                                                                     │
//! │  InventoryStore ──┐                                                 │
//! │  OrderLedger ─────┼──► StorageBackend (trait)                       │
//! │  MovementLog ─────┤        │                                        │
//! │  SessionStore ────┘        ├── JsonFileBackend  <dir>/<key>.json    │
//! │                            └── MemoryBackend    (tests)             │
//! │                                                                     │
//! │  Keys: products │ pedidos │ movements │ session                     │
//! └─────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The stores never see paths or files - only string records under string
//! keys. Swapping the backend swaps the host without touching store logic.

use std::collections::HashMap;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use crate::error::{StoreError, StoreResult};

// =============================================================================
// Keys and Limits
// =============================================================================

/// Storage key for the product catalog (JSON array of Product).
pub const PRODUCTS_KEY: &str = "products";

/// Storage key for pending orders (JSON map order_id → Order).
pub const PEDIDOS_KEY: &str = "pedidos";

/// Storage key for the movement log (JSON array of Movement).
pub const MOVEMENTS_KEY: &str = "movements";

/// Storage key for the operator session.
pub const SESSION_KEY: &str = "session";

/// Maximum size of a single record, mirroring the host storage quota.
pub const MAX_RECORD_BYTES: usize = 5 * 1024 * 1024;

// =============================================================================
// Port
// =============================================================================

/// Synchronous key-value persistence port.
///
/// `load` returns `Ok(None)` when the key has never been written. Both
/// operations fail with [`StoreError::Persistence`] on I/O problems and
/// `save` fails with [`StoreError::RecordTooLarge`] past the quota.
pub trait StorageBackend: std::fmt::Debug {
    /// Reads the record stored under `key`, if any.
    fn load(&self, key: &str) -> StoreResult<Option<String>>;

    /// Writes `payload` under `key`, replacing any previous record.
    fn save(&mut self, key: &str, payload: &str) -> StoreResult<()>;
}

// =============================================================================
// File Backend
// =============================================================================

/// Stores each key as a JSON file in a directory.
///
/// Writes go through a temp file and a rename, so a crash mid-write leaves
/// the previous record intact rather than a truncated one.
#[derive(Debug, Clone)]
pub struct JsonFileBackend {
    dir: PathBuf,
}

impl JsonFileBackend {
    /// Opens (creating if needed) the storage directory.
    pub fn open(dir: impl AsRef<Path>) -> StoreResult<Self> {
        let dir = dir.as_ref().to_path_buf();
        fs::create_dir_all(&dir)
            .map_err(|e| StoreError::persistence(dir.display().to_string(), e))?;
        Ok(JsonFileBackend { dir })
    }

    fn path_for(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{}.json", key))
    }
}

impl StorageBackend for JsonFileBackend {
    fn load(&self, key: &str) -> StoreResult<Option<String>> {
        match fs::read_to_string(self.path_for(key)) {
            Ok(payload) => Ok(Some(payload)),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(StoreError::persistence(key, e)),
        }
    }

    fn save(&mut self, key: &str, payload: &str) -> StoreResult<()> {
        if payload.len() > MAX_RECORD_BYTES {
            return Err(StoreError::RecordTooLarge {
                key: key.to_string(),
                size: payload.len(),
                limit: MAX_RECORD_BYTES,
            });
        }

        let path = self.path_for(key);
        let tmp = self.dir.join(format!("{}.json.tmp", key));
        fs::write(&tmp, payload).map_err(|e| StoreError::persistence(key, e))?;
        fs::rename(&tmp, &path).map_err(|e| StoreError::persistence(key, e))?;
        Ok(())
    }
}

// =============================================================================
// Memory Backend
// =============================================================================

/// In-memory backend for tests and ephemeral sessions.
///
/// Clones share the same record map, so a store reopened on a clone sees
/// everything written through the original - the in-memory equivalent of
/// reopening a file-backed host.
#[derive(Debug, Clone, Default)]
pub struct MemoryBackend {
    records: Arc<Mutex<HashMap<String, String>>>,
}

impl MemoryBackend {
    /// Creates an empty backend.
    pub fn new() -> Self {
        MemoryBackend::default()
    }

    /// Creates a backend pre-seeded with records (for load-path tests).
    pub fn with_records(records: impl IntoIterator<Item = (String, String)>) -> Self {
        MemoryBackend {
            records: Arc::new(Mutex::new(records.into_iter().collect())),
        }
    }

    /// Raw record under a key, if any (test inspection).
    pub fn record(&self, key: &str) -> Option<String> {
        self.records
            .lock()
            .expect("Backend mutex poisoned")
            .get(key)
            .cloned()
    }
}

impl StorageBackend for MemoryBackend {
    fn load(&self, key: &str) -> StoreResult<Option<String>> {
        Ok(self
            .records
            .lock()
            .expect("Backend mutex poisoned")
            .get(key)
            .cloned())
    }

    fn save(&mut self, key: &str, payload: &str) -> StoreResult<()> {
        if payload.len() > MAX_RECORD_BYTES {
            return Err(StoreError::RecordTooLarge {
                key: key.to_string(),
                size: payload.len(),
                limit: MAX_RECORD_BYTES,
            });
        }
        self.records
            .lock()
            .expect("Backend mutex poisoned")
            .insert(key.to_string(), payload.to_string());
        Ok(())
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
