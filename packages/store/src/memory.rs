use std::sync::{Arc, Mutex};

use crate::token::TokenStore;

/// In-memory TokenStore for testing and native fallback.
#[derive(Clone, Debug, Default)]
pub struct MemoryStore {
    token: Arc<Mutex<Option<String>>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store that already holds `token`.
    pub fn with_token(token: &str) -> Self {
        let store = Self::new();
        store.save(token);
        store
    }
}

impl TokenStore for MemoryStore {
    fn load(&self) -> Option<String> {
        self.token.lock().ok()?.clone()
    }

    fn save(&self, token: &str) {
        if let Ok(mut slot) = self.token.lock() {
            *slot = Some(token.to_string());
        }
    }

    fn clear(&self) {
        if let Ok(mut slot) = self.token.lock() {
            *slot = None;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_store_has_no_token() {
        let store = MemoryStore::new();
        assert!(store.load().is_none());
    }

    #[test]
    fn test_save_and_load() {
        let store = MemoryStore::new();
        store.save("abc.def.ghi");
        assert_eq!(store.load().as_deref(), Some("abc.def.ghi"));

        // Saving again replaces the previous token
        store.save("second");
        assert_eq!(store.load().as_deref(), Some("second"));
    }

    #[test]
    fn test_clear() {
        let store = MemoryStore::with_token("abc");
        store.clear();
        assert!(store.load().is_none());
    }

    #[test]
    fn test_clones_share_state() {
        let store = MemoryStore::new();
        let other = store.clone();
        store.save("shared");
        assert_eq!(other.load().as_deref(), Some("shared"));
    }
}
