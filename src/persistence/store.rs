//! Key-value byte stores
//!
//! The sheet treats storage as an external byte store that may fail at any
//! call. Stores report failures; the [`Persistence`](super::Persistence)
//! adapter decides to swallow them.

use std::collections::HashMap;

use thiserror::Error;

/// Failure reported by a byte store
#[derive(Debug, Error)]
pub enum StoreError {
    /// No backing storage (e.g. LocalStorage disabled by the browser)
    #[error("storage unavailable")]
    Unavailable,

    /// The backend refused the operation (quota exceeded, security error...)
    #[error("storage rejected {op} of {key}: {reason}")]
    Rejected {
        op: &'static str,
        key: String,
        reason: String,
    },

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

/// A key-value store of raw bytes
pub trait ByteStore {
    fn get(&self, key: &str) -> Result<Option<Vec<u8>>, StoreError>;
    fn set(&mut self, key: &str, bytes: &[u8]) -> Result<(), StoreError>;
    fn delete(&mut self, key: &str) -> Result<(), StoreError>;
}

/// In-process store, used headless and in tests.
///
/// Reads and writes can be made to fail to exercise the adapter's
/// tolerance.
#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: HashMap<String, Vec<u8>>,
    /// Every `set`/`delete` fails while true
    pub fail_writes: bool,
    /// Every `get` fails while true
    pub fail_reads: bool,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    fn rejected(op: &'static str, key: &str) -> StoreError {
        StoreError::Rejected {
            op,
            key: key.to_string(),
            reason: "quota exceeded".to_string(),
        }
    }
}

impl ByteStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<Vec<u8>>, StoreError> {
        if self.fail_reads {
            return Err(StoreError::Unavailable);
        }
        Ok(self.entries.get(key).cloned())
    }

    fn set(&mut self, key: &str, bytes: &[u8]) -> Result<(), StoreError> {
        if self.fail_writes {
            return Err(Self::rejected("set", key));
        }
        self.entries.insert(key.to_string(), bytes.to_vec());
        Ok(())
    }

    fn delete(&mut self, key: &str) -> Result<(), StoreError> {
        if self.fail_writes {
            return Err(Self::rejected("delete", key));
        }
        self.entries.remove(key);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_memory_store_basic() {
        let mut store = MemoryStore::new();
        assert!(store.get("a").unwrap().is_none());
        store.set("a", b"one").unwrap();
        assert_eq!(store.get("a").unwrap().as_deref(), Some(&b"one"[..]));
        store.delete("a").unwrap();
        assert!(store.is_empty());
        // Deleting a missing key is fine
        store.delete("a").unwrap();
    }

    #[test]
    fn test_memory_store_failures() {
        let mut store = MemoryStore::new();
        store.set("a", b"one").unwrap();
        store.fail_writes = true;
        let err = store.set("a", b"two").unwrap_err();
        assert!(err.to_string().contains("quota exceeded"));
        assert!(store.delete("a").is_err());

        store.fail_reads = true;
        assert!(matches!(store.get("a"), Err(StoreError::Unavailable)));

        store.fail_reads = false;
        assert_eq!(store.get("a").unwrap().as_deref(), Some(&b"one"[..]));
    }
}
