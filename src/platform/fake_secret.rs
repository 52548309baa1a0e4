//! Fake secret store for testing.
//!
//! Pre-loaded with secret values via `add_secret()`. Every `get()` key is
//! recorded so tests can assert exactly which lookups happened (or that none
//! did). `set_unavailable(true)` makes every call fail like an unreachable
//! backend.

use std::cell::{Cell, RefCell};
use std::collections::HashMap;

use super::SecretStore;
use crate::error::StoreError;

/// In-memory secret store, no keyring access.
pub struct FakeSecretStore {
    secrets: RefCell<HashMap<String, String>>,
    lookups: RefCell<Vec<String>>,
    unavailable: Cell<bool>,
}

impl FakeSecretStore {
    pub fn new() -> Self {
        Self {
            secrets: RefCell::new(HashMap::new()),
            lookups: RefCell::new(Vec::new()),
            unavailable: Cell::new(false),
        }
    }

    /// Register a secret that `get()` will return.
    /// Returns the previous value if one was already registered for this key.
    pub fn add_secret(&self, key: &str, value: &str) -> Option<String> {
        self.secrets
            .borrow_mut()
            .insert(key.to_string(), value.to_string())
    }

    /// Current value stored under `key`, without recording a lookup.
    pub fn peek(&self, key: &str) -> Option<String> {
        self.secrets.borrow().get(key).cloned()
    }

    /// Keys passed to `get()`, in call order.
    pub fn lookups(&self) -> Vec<String> {
        self.lookups.borrow().clone()
    }

    pub fn set_unavailable(&self, unavailable: bool) {
        self.unavailable.set(unavailable);
    }

    fn check_available(&self) -> Result<(), StoreError> {
        if self.unavailable.get() {
            return Err(StoreError::Unavailable("FakeSecretStore offline".to_string()));
        }
        Ok(())
    }
}

impl SecretStore for FakeSecretStore {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        self.lookups.borrow_mut().push(key.to_string());
        self.check_available()?;
        Ok(self.secrets.borrow().get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StoreError> {
        self.check_available()?;
        self.add_secret(key, value);
        Ok(())
    }

    fn delete(&self, key: &str) -> Result<bool, StoreError> {
        self.check_available()?;
        Ok(self.secrets.borrow_mut().remove(key).is_some())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_get_registered_secret() {
        let store = FakeSecretStore::new();
        store.add_secret("dev:OS_PASSWORD", "s3cret");
        assert_eq!(
            store.get("dev:OS_PASSWORD").unwrap(),
            Some("s3cret".to_string())
        );
        assert_eq!(store.lookups(), vec!["dev:OS_PASSWORD".to_string()]);
    }

    #[test]
    fn test_missing_secret_is_none() {
        let store = FakeSecretStore::new();
        assert_eq!(store.get("dev:OS_PASSWORD").unwrap(), None);
    }

    #[test]
    fn test_unavailable_store_errors() {
        let store = FakeSecretStore::new();
        store.add_secret("dev:OS_PASSWORD", "s3cret");
        store.set_unavailable(true);
        assert!(store.get("dev:OS_PASSWORD").is_err());
        assert!(store.set("dev:OS_PASSWORD", "x").is_err());
        assert_eq!(store.peek("dev:OS_PASSWORD"), Some("s3cret".to_string()));
    }

    #[test]
    fn test_delete_reports_presence() {
        let store = FakeSecretStore::new();
        store.set("global:shared", "v").unwrap();
        assert!(store.delete("global:shared").unwrap());
        assert!(!store.delete("global:shared").unwrap());
    }
}
