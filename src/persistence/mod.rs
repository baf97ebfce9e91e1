//! Best-effort persistence of the character record
//!
//! Features:
//! - Versioned storage key (`worldstriders.charlist.v<schema>`)
//! - JSON envelope, normalized on load
//! - Store failures are logged and swallowed; the in-memory record stays
//!   authoritative for the session
//! - Separate bare language-preference key

pub mod store;

#[cfg(not(target_arch = "wasm32"))]
pub mod file;
#[cfg(target_arch = "wasm32")]
pub mod local_storage;

#[cfg(not(target_arch = "wasm32"))]
pub use file::FileStore;
#[cfg(target_arch = "wasm32")]
pub use local_storage::LocalStorageStore;
pub use store::{ByteStore, MemoryStore, StoreError};

use serde_json::Value;
use thiserror::Error;

use crate::consts::{LANGUAGE_KEY, STORAGE_PREFIX};
use crate::format::{self, FormatError};
use crate::normalize::{Deviation, deviations, normalize};
use crate::schema::{Character, Lang, SCHEMA_VERSION};

/// Why a stored record could not be read back
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("storage read failed: {0}")]
    Store(#[from] StoreError),

    #[error("stored record is unreadable: {0}")]
    Format(#[from] FormatError),
}

/// Outcome of a save, for the "Saved / Not saved" indicator
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SaveStatus {
    Saved,
    NotSaved,
}

impl SaveStatus {
    /// Label key in the `i18n` dictionary
    pub fn label_key(&self) -> &'static str {
        match self {
            SaveStatus::Saved => "saved",
            SaveStatus::NotSaved => "notSaved",
        }
    }
}

/// Storage key of the record for the current schema version
pub fn record_key() -> String {
    format!("{}.charlist.v{}", STORAGE_PREFIX, SCHEMA_VERSION)
}

/// Load/save/clear of one character record against a byte store
#[derive(Debug)]
pub struct Persistence<S: ByteStore> {
    store: S,
    key: String,
}

impl<S: ByteStore> Persistence<S> {
    pub fn new(store: S) -> Self {
        Self {
            store,
            key: record_key(),
        }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn store_mut(&mut self) -> &mut S {
        &mut self.store
    }

    pub fn into_store(self) -> S {
        self.store
    }

    /// Stored document as written, before normalization
    pub fn load_raw(&self) -> Result<Option<Value>, LoadError> {
        match self.store.get(&self.key)? {
            Some(bytes) => Ok(Some(format::from_json(&bytes)?)),
            None => Ok(None),
        }
    }

    /// Stored record, if there is a readable one
    pub fn load(&self) -> Option<Character> {
        match self.load_raw() {
            Ok(Some(value)) => {
                log::info!("Loaded character from storage");
                Some(normalize(&value))
            }
            Ok(None) => {
                log::info!("No saved character found");
                None
            }
            Err(e) => {
                log::warn!("Ignoring saved character: {}", e);
                None
            }
        }
    }

    /// Fields of the stored document that loading would correct.
    /// `Ok(None)` when nothing is stored.
    pub fn audit(&self) -> Result<Option<Vec<Deviation>>, LoadError> {
        Ok(self.load_raw()?.map(|value| deviations(&value)))
    }

    /// Write the record. Never fails; the status only drives the UI.
    pub fn save(&mut self, character: &Character) -> SaveStatus {
        let json = match format::to_json(character) {
            Ok(json) => json,
            Err(e) => {
                log::warn!("Failed to encode character: {}", e);
                return SaveStatus::NotSaved;
            }
        };

        match self.store.set(&self.key, json.as_bytes()) {
            Ok(()) => {
                log::debug!("Character saved ({} bytes)", json.len());
                SaveStatus::Saved
            }
            Err(e) => {
                log::warn!("Character not saved: {}", e);
                SaveStatus::NotSaved
            }
        }
    }

    /// Remove the stored record; failures are ignored
    pub fn clear(&mut self) {
        match self.store.delete(&self.key) {
            Ok(()) => log::info!("Saved character cleared"),
            Err(e) => log::warn!("Failed to clear saved character: {}", e),
        }
    }

    /// Stored language preference; missing or unknown values are `None`
    pub fn load_language(&self) -> Option<Lang> {
        match self.store.get(LANGUAGE_KEY) {
            Ok(Some(bytes)) => std::str::from_utf8(&bytes)
                .ok()
                .and_then(|s| Lang::from_wire(s.trim())),
            Ok(None) => None,
            Err(e) => {
                log::warn!("Failed to read language preference: {}", e);
                None
            }
        }
    }

    pub fn save_language(&mut self, lang: Lang) {
        if let Err(e) = self.store.set(LANGUAGE_KEY, lang.as_str().as_bytes()) {
            log::warn!("Language preference not saved: {}", e);
        }
    }
}
