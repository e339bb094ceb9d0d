//! `localStorage` token persistence.
//!
//! SYSTEM CONTEXT
//! ==============
//! Centralizes csr-only web-sys glue so the session survives page reloads.
//! Storage being unavailable (private mode, SSR-less native tests) degrades
//! to "no token", which the dashboard treats as signed out.

use fleet::TokenStorage;

/// Zero-sized handle onto `window.localStorage`.
#[derive(Clone, Copy, Debug, Default)]
pub struct BrowserStorage;

#[cfg(feature = "csr")]
fn local_storage() -> Option<web_sys::Storage> {
    web_sys::window().and_then(|w| w.local_storage().ok().flatten())
}

impl TokenStorage for BrowserStorage {
    fn load(&self, key: &str) -> Option<String> {
        #[cfg(feature = "csr")]
        {
            local_storage()?.get_item(key).ok().flatten()
        }
        #[cfg(not(feature = "csr"))]
        {
            let _ = key;
            None
        }
    }

    fn store(&self, key: &str, value: &str) {
        #[cfg(feature = "csr")]
        {
            let Some(storage) = local_storage() else {
                tracing::warn!(key, "localStorage unavailable; token not persisted");
                return;
            };
            if storage.set_item(key, value).is_err() {
                tracing::warn!(key, "localStorage write failed");
            }
        }
        #[cfg(not(feature = "csr"))]
        {
            let _ = (key, value);
        }
    }

    fn remove(&self, key: &str) {
        #[cfg(feature = "csr")]
        {
            if let Some(storage) = local_storage() {
                let _ = storage.remove_item(key);
            }
        }
        #[cfg(not(feature = "csr"))]
        {
            let _ = key;
        }
    }
}
