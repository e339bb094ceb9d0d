//! Bearer-token session over pluggable storage.
//!
//! SYSTEM CONTEXT
//! ==============
//! The browser client stores the token in `localStorage`, the CLI in a JSON
//! file, and tests in memory. `Session` only tracks presence: it never decodes
//! the token or checks its expiry. The server decides, and a 401 tears the
//! session down (see `api`).

#[cfg(test)]
#[path = "session_test.rs"]
mod session_test;

use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

/// Storage key holding the bearer token.
pub const TOKEN_KEY: &str = "token";

/// Key/value persistence backing a [`Session`].
///
/// Methods take `&self`; implementations use interior mutability or external
/// stores. Write failures are swallowed by the implementation and logged.
pub trait TokenStorage {
    fn load(&self, key: &str) -> Option<String>;
    fn store(&self, key: &str, value: &str);
    fn remove(&self, key: &str);
}

/// Process-local storage. Clones share the same map.
#[derive(Clone, Debug, Default)]
pub struct MemoryStorage {
    entries: Rc<RefCell<HashMap<String, String>>>,
}

impl TokenStorage for MemoryStorage {
    fn load(&self, key: &str) -> Option<String> {
        self.entries.borrow().get(key).cloned()
    }

    fn store(&self, key: &str, value: &str) {
        self.entries.borrow_mut().insert(key.to_owned(), value.to_owned());
    }

    fn remove(&self, key: &str) {
        self.entries.borrow_mut().remove(key);
    }
}

/// The signed-in state of one operator.
#[derive(Clone, Debug, Default)]
pub struct Session<S> {
    storage: S,
}

impl<S: TokenStorage> Session<S> {
    pub fn new(storage: S) -> Self {
        Self { storage }
    }

    /// Current bearer token, if any. Blank values count as absent.
    pub fn token(&self) -> Option<String> {
        self.storage.load(TOKEN_KEY).filter(|token| !token.trim().is_empty())
    }

    pub fn is_authenticated(&self) -> bool {
        self.token().is_some()
    }

    pub fn set_token(&self, token: &str) {
        self.storage.store(TOKEN_KEY, token);
        tracing::debug!("session token stored");
    }

    pub fn clear(&self) {
        self.storage.remove(TOKEN_KEY);
        tracing::debug!("session token cleared");
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }
}
