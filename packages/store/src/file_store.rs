//! # Filesystem-backed token store
//!
//! [`FileStore`] keeps the session token in a single file so native builds
//! stay logged in across restarts.
//!
//! ```text
//! <base_dir>/
//! └── session          # raw token text
//! ```
//!
//! Use [`dirs::data_dir()`] to obtain a platform-appropriate base:
//!
//! | Platform | Path |
//! |----------|------|
//! | macOS | `~/Library/Application Support/mercado/` |
//! | Linux | `~/.local/share/mercado/` |
//! | Windows | `C:\Users\<user>\AppData\Roaming\mercado\` |

use std::path::PathBuf;

use crate::token::TokenStore;

const SESSION_FILE: &str = "session";

/// Filesystem-backed TokenStore for native builds.
#[derive(Clone, Debug)]
pub struct FileStore {
    base: PathBuf,
}

impl FileStore {
    pub fn new(base: PathBuf) -> Self {
        Self { base }
    }

    /// Store rooted at `<data_dir>/mercado`, or `./mercado` when the platform
    /// has no data directory.
    pub fn default_location() -> Self {
        let base = dirs::data_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("mercado");
        Self::new(base)
    }

    fn session_path(&self) -> PathBuf {
        self.base.join(SESSION_FILE)
    }
}

impl TokenStore for FileStore {
    fn load(&self) -> Option<String> {
        let content = std::fs::read_to_string(self.session_path()).ok()?;
        let token = content.trim();
        if token.is_empty() {
            None
        } else {
            Some(token.to_string())
        }
    }

    fn save(&self, token: &str) {
        if let Err(e) = std::fs::create_dir_all(&self.base) {
            tracing::warn!("Failed to create session dir {}: {}", self.base.display(), e);
            return;
        }
        if let Err(e) = std::fs::write(self.session_path(), token) {
            tracing::warn!("Failed to persist session: {}", e);
        }
    }

    fn clear(&self) {
        let _ = std::fs::remove_file(self.session_path());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_file_store_roundtrip() {
        let dir = std::env::temp_dir().join(format!("mercado_test_{}", std::process::id()));
        let _ = std::fs::remove_dir_all(&dir);

        let store = FileStore::new(dir.clone());
        assert!(store.load().is_none());
        store.save("token-123");

        // Re-open from same directory
        let reopened = FileStore::new(dir.clone());
        assert_eq!(reopened.load().as_deref(), Some("token-123"));

        reopened.clear();
        assert!(store.load().is_none());

        // Cleanup
        let _ = std::fs::remove_dir_all(&dir);
    }

    #[test]
    fn test_blank_file_is_no_token() {
        let dir = std::env::temp_dir().join(format!("mercado_blank_{}", std::process::id()));
        let _ = std::fs::remove_dir_all(&dir);
        std::fs::create_dir_all(&dir).unwrap();
        std::fs::write(dir.join(SESSION_FILE), "  \n").unwrap();

        assert!(FileStore::new(dir.clone()).load().is_none());

        let _ = std::fs::remove_dir_all(&dir);
    }
}
