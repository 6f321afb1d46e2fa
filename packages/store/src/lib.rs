//! Session persistence for the Mercado client.
//!
//! The only thing the client keeps between page loads is the bearer token
//! issued by the backend. [`TokenStore`] abstracts where it lives.

mod token;
pub use token::{TokenStore, DEFAULT_TOKEN_KEY};

mod memory;
pub use memory::MemoryStore;

#[cfg(not(target_arch = "wasm32"))]
mod file_store;
#[cfg(not(target_arch = "wasm32"))]
pub use file_store::FileStore;

#[cfg(all(target_arch = "wasm32", feature = "web"))]
mod local_storage;
#[cfg(all(target_arch = "wasm32", feature = "web"))]
pub use local_storage::LocalStorageStore;
