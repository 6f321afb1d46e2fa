//! # Browser `localStorage` token store
//!
//! [`LocalStorageStore`] is the [`TokenStore`] used on the web platform. The
//! token is kept under a single key (default [`DEFAULT_TOKEN_KEY`]).
//!
//! All methods swallow errors. Private browsing modes can make `localStorage`
//! unavailable; the app then behaves as if nobody is logged in.

use crate::token::{TokenStore, DEFAULT_TOKEN_KEY};

/// `window.localStorage`-backed TokenStore.
#[derive(Clone, Debug)]
pub struct LocalStorageStore {
    key: String,
}

impl Default for LocalStorageStore {
    fn default() -> Self {
        Self::new()
    }
}

impl LocalStorageStore {
    pub fn new() -> Self {
        Self::with_key(DEFAULT_TOKEN_KEY)
    }

    pub fn with_key(key: &str) -> Self {
        Self {
            key: key.to_string(),
        }
    }

    fn storage() -> Option<web_sys::Storage> {
        web_sys::window()?.local_storage().ok().flatten()
    }
}

impl TokenStore for LocalStorageStore {
    fn load(&self) -> Option<String> {
        Self::storage()?
            .get_item(&self.key)
            .ok()
            .flatten()
            .filter(|t| !t.trim().is_empty())
    }

    fn save(&self, token: &str) {
        match Self::storage() {
            Some(storage) => {
                if storage.set_item(&self.key, token).is_err() {
                    tracing::warn!("localStorage rejected session token");
                }
            }
            None => tracing::warn!("localStorage unavailable, session will not persist"),
        }
    }

    fn clear(&self) {
        if let Some(storage) = Self::storage() {
            let _ = storage.remove_item(&self.key);
        }
    }
}
