//! Platform token store.
//!
//! - **Web** (WASM + `web` feature): `localStorage` via [`store::LocalStorageStore`]
//! - **Native**: a file under the data dir via [`store::FileStore`]
//! - anything else keeps the token in memory for the lifetime of the page

pub fn make_token_store() -> impl store::TokenStore {
    #[cfg(all(target_arch = "wasm32", feature = "web"))]
    {
        store::LocalStorageStore::new()
    }
    #[cfg(not(target_arch = "wasm32"))]
    {
        store::FileStore::default_location()
    }
    #[cfg(all(target_arch = "wasm32", not(feature = "web")))]
    {
        store::MemoryStore::new()
    }
}
