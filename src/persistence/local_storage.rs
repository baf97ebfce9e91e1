//! Browser LocalStorage as a byte store (WASM only)

use super::store::{ByteStore, StoreError};

/// LocalStorage holds strings; bytes are stored as UTF-8 text.
pub struct LocalStorageStore {
    storage: Option<web_sys::Storage>,
}

impl LocalStorageStore {
    pub fn new() -> Self {
        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten();

        if storage.is_none() {
            log::warn!("LocalStorage unavailable, changes will not be remembered");
        }
        Self { storage }
    }

    fn storage(&self) -> Result<&web_sys::Storage, StoreError> {
        self.storage.as_ref().ok_or(StoreError::Unavailable)
    }
}

impl Default for LocalStorageStore {
    fn default() -> Self {
        Self::new()
    }
}

fn rejected(op: &'static str, key: &str, err: wasm_bindgen::JsValue) -> StoreError {
    StoreError::Rejected {
        op,
        key: key.to_string(),
        reason: format!("{:?}", err),
    }
}

impl ByteStore for LocalStorageStore {
    fn get(&self, key: &str) -> Result<Option<Vec<u8>>, StoreError> {
        let value = self
            .storage()?
            .get_item(key)
            .map_err(|e| rejected("get", key, e))?;
        Ok(value.map(String::into_bytes))
    }

    fn set(&mut self, key: &str, bytes: &[u8]) -> Result<(), StoreError> {
        let text = String::from_utf8_lossy(bytes);
        self.storage()?
            .set_item(key, &text)
            .map_err(|e| rejected("set", key, e))
    }

    fn delete(&mut self, key: &str) -> Result<(), StoreError> {
        self.storage()?
            .remove_item(key)
            .map_err(|e| rejected("delete", key, e))
    }
}
