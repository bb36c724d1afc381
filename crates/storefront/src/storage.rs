//! Durable client-side key-value storage.
//!
//! The wishlist and the customer session persist small string values under
//! fixed keys, the way a browser app would use local storage. The surface is
//! deliberately infallible: writes that fail are logged and dropped, reads
//! that fail degrade to "no persisted data". Containers never crash because
//! the disk is unhappy.

use std::collections::HashMap;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::{Mutex, PoisonError};

/// Fixed storage keys.
///
/// The wishlist key and the two session keys are independent; no container
/// reads another container's keys.
pub mod keys {
    /// Wishlist product identifiers, JSON-encoded string array.
    pub const WISHLIST: &str = "boldtype_wishlist";

    /// Customer access token for authenticated gateway calls.
    pub const AUTH_TOKEN: &str = "shopify_customer_token";

    /// ISO-8601 expiry of the customer access token. Written and cleared
    /// together with [`AUTH_TOKEN`], never independently.
    pub const AUTH_TOKEN_EXPIRY: &str = "shopify_customer_token_expiry";
}

/// String key-value storage with local-storage semantics.
pub trait KeyValueStore: Send + Sync {
    /// Read a value. Absent or unreadable keys return `None`.
    fn get(&self, key: &str) -> Option<String>;

    /// Write a value, overwriting any previous one.
    fn set(&self, key: &str, value: &str);

    /// Remove a key. No-op if absent.
    fn remove(&self, key: &str);
}

// =============================================================================
// MemoryStore
// =============================================================================

/// In-memory store. The default collaborator in tests.
#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: Mutex<HashMap<String, String>>,
}

impl MemoryStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Option<String> {
        self.entries
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .get(key)
            .cloned()
    }

    fn set(&self, key: &str, value: &str) {
        self.entries
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(key.to_string(), value.to_string());
    }

    fn remove(&self, key: &str) {
        self.entries
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .remove(key);
    }
}

// =============================================================================
// FileStore
// =============================================================================

const STORE_FILE: &str = "local_storage.json";

/// File-backed store: one JSON object under the configured data directory,
/// loaded once at open and rewritten on every mutation.
#[derive(Debug)]
pub struct FileStore {
    path: PathBuf,
    entries: Mutex<HashMap<String, String>>,
}

impl FileStore {
    /// Open (or create) the store under `dir`.
    ///
    /// A malformed store file is treated as empty rather than an error, so a
    /// corrupted write never locks the visitor out of the storefront.
    ///
    /// # Errors
    ///
    /// Returns an error only when the directory cannot be created.
    pub fn open(dir: impl AsRef<Path>) -> io::Result<Self> {
        let dir = dir.as_ref();
        fs::create_dir_all(dir)?;
        let path = dir.join(STORE_FILE);

        let entries = match fs::read_to_string(&path) {
            Ok(raw) => match serde_json::from_str::<HashMap<String, String>>(&raw) {
                Ok(map) => map,
                Err(e) => {
                    tracing::warn!(path = %path.display(), error = %e, "Discarding malformed storage file");
                    HashMap::new()
                }
            },
            Err(_) => HashMap::new(),
        };

        Ok(Self {
            path,
            entries: Mutex::new(entries),
        })
    }

    fn flush(&self, entries: &HashMap<String, String>) {
        match serde_json::to_string_pretty(entries) {
            Ok(json) => {
                if let Err(e) = fs::write(&self.path, json) {
                    tracing::error!(path = %self.path.display(), error = %e, "Failed to write storage file");
                }
            }
            Err(e) => {
                tracing::error!(error = %e, "Failed to serialize storage entries");
            }
        }
    }
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> Option<String> {
        self.entries
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .get(key)
            .cloned()
    }

    fn set(&self, key: &str, value: &str) {
        let mut entries = self.entries.lock().unwrap_or_else(PoisonError::into_inner);
        entries.insert(key.to_string(), value.to_string());
        self.flush(&entries);
    }

    fn remove(&self, key: &str) {
        let mut entries = self.entries.lock().unwrap_or_else(PoisonError::into_inner);
        if entries.remove(key).is_some() {
            self.flush(&entries);
        }
    }
}
