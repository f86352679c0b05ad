//! Key/value persistence surface the answer store writes through.

use crate::error::StorageError;
use std::collections::HashMap;
use std::sync::Mutex;

/// Result type for persistence operations.
pub type StorageResult<T> = std::result::Result<T, StorageError>;

/// Synchronous, origin-scoped string storage.
///
/// Implementations may fail on any call (storage disabled, quota reached);
/// callers are expected to tolerate that.
pub trait PersistenceSurface {
    /// Read the value stored under `key`.
    fn get(&self, key: &str) -> StorageResult<Option<String>>;

    /// Store `value` under `key`, replacing any previous value.
    fn set(&self, key: &str, value: &str) -> StorageResult<()>;

    /// Remove `key`. Removing a missing key is not an error.
    fn remove(&self, key: &str) -> StorageResult<()>;
}

impl<T: PersistenceSurface + ?Sized> PersistenceSurface for &T {
    fn get(&self, key: &str) -> StorageResult<Option<String>> {
        (**self).get(key)
    }

    fn set(&self, key: &str, value: &str) -> StorageResult<()> {
        (**self).set(key, value)
    }

    fn remove(&self, key: &str) -> StorageResult<()> {
        (**self).remove(key)
    }
}

/// In-memory persistence surface with an optional byte quota.
#[derive(Debug)]
pub struct MemoryStorage {
    entries: Mutex<HashMap<String, String>>,
    quota: Option<usize>,
    available: bool,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self {
            entries: Mutex::new(HashMap::new()),
            quota: None,
            available: true,
        }
    }

    /// Storage that rejects writes once keys and values exceed `bytes`.
    pub fn with_quota(bytes: usize) -> Self {
        Self {
            quota: Some(bytes),
            ..Self::new()
        }
    }

    /// Storage that fails every call, as when storage is disabled.
    pub fn unavailable() -> Self {
        Self {
            available: false,
            ..Self::new()
        }
    }

    /// Number of stored keys.
    pub fn len(&self) -> usize {
        self.entries.lock().expect("storage lock").len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn check_available(&self) -> StorageResult<()> {
        if self.available {
            Ok(())
        } else {
            Err(StorageError::Unavailable("storage is disabled".to_string()))
        }
    }
}

impl Default for MemoryStorage {
    fn default() -> Self {
        Self::new()
    }
}

impl PersistenceSurface for MemoryStorage {
    fn get(&self, key: &str) -> StorageResult<Option<String>> {
        self.check_available()?;
        let entries = self.entries.lock().expect("storage lock");
        Ok(entries.get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> StorageResult<()> {
        self.check_available()?;
        let mut entries = self.entries.lock().expect("storage lock");

        if let Some(limit) = self.quota {
            let used: usize = entries
                .iter()
                .filter(|(k, _)| k.as_str() != key)
                .map(|(k, v)| k.len() + v.len())
                .sum();
            let needed = used + key.len() + value.len();
            if needed > limit {
                return Err(StorageError::QuotaExceeded { needed, limit });
            }
        }

        entries.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> StorageResult<()> {
        self.check_available()?;
        self.entries.lock().expect("storage lock").remove(key);
        Ok(())
    }
}
