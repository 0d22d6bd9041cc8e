//! AttributeDirectory trait for abstracting the per-device property store.
//!
//! The handoff protocol records which file holds a job's link data in a
//! named-value store owned by the printing device. This trait captures the
//! five operations the protocol needs, so the store can be the real
//! platform one, a directory of small files, or an in-memory fake in
//! tests.

use std::collections::HashMap;
use std::fmt::Debug;
use std::sync::RwLock;
use thiserror::Error;

/// Error type for directory access.
#[derive(Error, Debug, Clone)]
pub enum DirectoryError {
    #[error("Directory access failed for '{name}': {message}")]
    AccessFailed { name: String, message: String },

    #[error("I/O error: {0}")]
    Io(String),
}

impl From<std::io::Error> for DirectoryError {
    fn from(err: std::io::Error) -> Self {
        DirectoryError::Io(err.to_string())
    }
}

/// A named-value store scoped to one printing device.
///
/// Values are either 32-bit unsigned integers or strings; a read through
/// the wrong accessor yields `None` rather than an error. Individual
/// get/set/remove calls are assumed atomic per name by the backing store;
/// the protocol layer builds its all-or-nothing sequences on top of that.
///
/// # Implementations
///
/// - `InMemoryAttributeDirectory`: process-local storage (always available)
/// - `FilesystemAttributeDirectory`: one value file per name (platform crate)
pub trait AttributeDirectory: Send + Sync + Debug {
    /// Reads an integer value, `None` if absent or not an integer.
    fn get_u32(&self, name: &str) -> Result<Option<u32>, DirectoryError>;

    /// Writes an integer value, replacing any previous value.
    fn set_u32(&self, name: &str, value: u32) -> Result<(), DirectoryError>;

    /// Reads a string value, `None` if absent or not a string.
    fn get_string(&self, name: &str) -> Result<Option<String>, DirectoryError>;

    /// Writes a string value, replacing any previous value.
    fn set_string(&self, name: &str, value: &str) -> Result<(), DirectoryError>;

    /// Removes a value. Removing an absent name succeeds.
    fn remove(&self, name: &str) -> Result<(), DirectoryError>;

    /// All value names starting with `prefix`, in no particular order.
    fn names_with_prefix(&self, prefix: &str) -> Result<Vec<String>, DirectoryError>;

    /// Returns a human-readable name for this directory (for logging).
    fn name(&self) -> &'static str;
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum AttrValue {
    Number(u32),
    Text(String),
}

/// An in-memory attribute directory.
///
/// Values live in a process-local map; useful for tests and for
/// single-process pipelines that never cross a process boundary.
#[derive(Debug, Default)]
pub struct InMemoryAttributeDirectory {
    values: RwLock<HashMap<String, AttrValue>>,
}

impl InMemoryAttributeDirectory {
    pub fn new() -> Self {
        Self::default()
    }

    fn read(
        &self,
        name: &str,
    ) -> Result<std::sync::RwLockReadGuard<'_, HashMap<String, AttrValue>>, DirectoryError> {
        self.values.read().map_err(|_| DirectoryError::AccessFailed {
            name: name.to_string(),
            message: "attribute store lock poisoned".to_string(),
        })
    }

    fn write(
        &self,
        name: &str,
    ) -> Result<std::sync::RwLockWriteGuard<'_, HashMap<String, AttrValue>>, DirectoryError> {
        self.values.write().map_err(|_| DirectoryError::AccessFailed {
            name: name.to_string(),
            message: "attribute store lock poisoned".to_string(),
        })
    }
}

impl AttributeDirectory for InMemoryAttributeDirectory {
    fn get_u32(&self, name: &str) -> Result<Option<u32>, DirectoryError> {
        Ok(match self.read(name)?.get(name) {
            Some(AttrValue::Number(value)) => Some(*value),
            _ => None,
        })
    }

    fn set_u32(&self, name: &str, value: u32) -> Result<(), DirectoryError> {
        self.write(name)?
            .insert(name.to_string(), AttrValue::Number(value));
        Ok(())
    }

    fn get_string(&self, name: &str) -> Result<Option<String>, DirectoryError> {
        Ok(match self.read(name)?.get(name) {
            Some(AttrValue::Text(value)) => Some(value.clone()),
            _ => None,
        })
    }

    fn set_string(&self, name: &str, value: &str) -> Result<(), DirectoryError> {
        self.write(name)?
            .insert(name.to_string(), AttrValue::Text(value.to_string()));
        Ok(())
    }

    fn remove(&self, name: &str) -> Result<(), DirectoryError> {
        self.write(name)?.remove(name);
        Ok(())
    }

    fn names_with_prefix(&self, prefix: &str) -> Result<Vec<String>, DirectoryError> {
        Ok(self
            .read(prefix)?
            .keys()
            .filter(|key| key.starts_with(prefix))
            .cloned()
            .collect())
    }

    fn name(&self) -> &'static str {
        "InMemoryAttributeDirectory"
    }
}
