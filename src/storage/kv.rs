//! The key-value storage trait and its in-memory backend.

use std::collections::HashMap;

use crate::error::FitError;

/// String-valued durable storage, addressed by key.
#[cfg_attr(test, mockall::automock)]
pub trait KeyValueStore {
    /// Read the value stored under `key`, if any.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend cannot be read.
    fn get(&self, key: &str) -> Result<Option<String>, FitError>;

    /// Replace the value stored under `key`.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend cannot be written.
    fn set(&mut self, key: &str, value: &str) -> Result<(), FitError>;

    /// Remove `key`. Removing a missing key is not an error.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend cannot be written.
    fn remove(&mut self, key: &str) -> Result<(), FitError>;
}

impl<T: KeyValueStore + ?Sized> KeyValueStore for Box<T> {
    fn get(&self, key: &str) -> Result<Option<String>, FitError> {
        (**self).get(key)
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), FitError> {
        (**self).set(key, value)
    }

    fn remove(&mut self, key: &str) -> Result<(), FitError> {
        (**self).remove(key)
    }
}

impl<T: KeyValueStore + ?Sized> KeyValueStore for &mut T {
    fn get(&self, key: &str) -> Result<Option<String>, FitError> {
        (**self).get(key)
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), FitError> {
        (**self).set(key, value)
    }

    fn remove(&mut self, key: &str) -> Result<(), FitError> {
        (**self).remove(key)
    }
}

/// Storage that lives only as long as the value.
#[derive(Debug, Default, Clone)]
pub struct MemoryStore {
    values: HashMap<String, String>,
}

impl MemoryStore {
    /// Create an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of keys currently held.
    #[must_use]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Whether no keys are held.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>, FitError> {
        Ok(self.values.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), FitError> {
        self.values.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&mut self, key: &str) -> Result<(), FitError> {
        self.values.remove(key);
        Ok(())
    }
}
