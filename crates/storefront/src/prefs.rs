//! Durable local preferences.
//!
//! A [`LocalStore`] is a key-to-string slot store that survives process
//! restarts. Two slots are in use: the theme preference and the
//! remembered session name. [`FileStore`] keeps the slots in a small
//! JSON file; [`MemoryStore`] backs tests.

use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::{Mutex, PoisonError};
use std::{fs, io};

use thiserror::Error;

/// Slot holding the theme preference, `"dark"` or `"light"`.
pub const THEME_KEY: &str = "velora.theme";

/// Slot holding the remembered session's user name.
pub const SESSION_KEY: &str = "velora.user";

/// Errors raised by a [`LocalStore`] implementation.
#[derive(Debug, Error)]
pub enum LocalStoreError {
    /// Underlying I/O failed.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// The backing file holds something other than a string map.
    #[error("preference store is corrupt: {0}")]
    Parse(#[from] serde_json::Error),
}

/// A durable key-to-string slot store.
pub trait LocalStore: Send + Sync {
    /// Read the value stored under `key`, if any.
    ///
    /// # Errors
    ///
    /// Returns an error if the backing storage cannot be read.
    fn get(&self, key: &str) -> Result<Option<String>, LocalStoreError>;

    /// Write `value` under `key`, replacing any previous value.
    ///
    /// # Errors
    ///
    /// Returns an error if the backing storage cannot be written.
    fn set(&self, key: &str, value: &str) -> Result<(), LocalStoreError>;

    /// Remove the slot under `key`. Removing an absent slot is a no-op.
    ///
    /// # Errors
    ///
    /// Returns an error if the backing storage cannot be written.
    fn remove(&self, key: &str) -> Result<(), LocalStoreError>;
}

/// UI color scheme preference.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

impl Theme {
    /// The stored string form of this theme.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Light => "light",
            Self::Dark => "dark",
        }
    }

    /// Load the theme from its slot. Anything other than a stored
    /// `"dark"` reads as [`Theme::Light`].
    ///
    /// # Errors
    ///
    /// Returns an error if the store cannot be read.
    pub fn load(store: &dyn LocalStore) -> Result<Self, LocalStoreError> {
        let theme = match store.get(THEME_KEY)?.as_deref() {
            Some("dark") => Self::Dark,
            _ => Self::Light,
        };
        Ok(theme)
    }

    /// Persist this theme to its slot.
    ///
    /// # Errors
    ///
    /// Returns an error if the store cannot be written.
    pub fn persist(self, store: &dyn LocalStore) -> Result<(), LocalStoreError> {
        store.set(THEME_KEY, self.as_str())
    }
}

impl std::fmt::Display for Theme {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// File-backed slot store: one flat JSON object of string slots.
///
/// Every operation reads and rewrites the whole file; the slot count is
/// tiny and the file is private to one process, so this stays simple.
pub struct FileStore {
    path: PathBuf,
    lock: Mutex<()>,
}

impl FileStore {
    /// Create a store over `path`. The file is created on first write.
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            lock: Mutex::new(()),
        }
    }

    fn load(&self) -> Result<HashMap<String, String>, LocalStoreError> {
        match fs::read_to_string(&self.path) {
            Ok(text) => Ok(serde_json::from_str(&text)?),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(HashMap::new()),
            Err(e) => Err(e.into()),
        }
    }

    fn store(&self, slots: &HashMap<String, String>) -> Result<(), LocalStoreError> {
        let text = serde_json::to_string_pretty(slots)?;
        fs::write(&self.path, text)?;
        Ok(())
    }
}

impl LocalStore for FileStore {
    fn get(&self, key: &str) -> Result<Option<String>, LocalStoreError> {
        let _guard = self.lock.lock().unwrap_or_else(PoisonError::into_inner);
        Ok(self.load()?.remove(key))
    }

    fn set(&self, key: &str, value: &str) -> Result<(), LocalStoreError> {
        let _guard = self.lock.lock().unwrap_or_else(PoisonError::into_inner);
        let mut slots = self.load()?;
        slots.insert(key.to_owned(), value.to_owned());
        self.store(&slots)
    }

    fn remove(&self, key: &str) -> Result<(), LocalStoreError> {
        let _guard = self.lock.lock().unwrap_or_else(PoisonError::into_inner);
        let mut slots = self.load()?;
        if slots.remove(key).is_some() {
            self.store(&slots)?;
        }
        Ok(())
    }
}

/// In-memory slot store for tests and ephemeral sessions.
#[derive(Default)]
pub struct MemoryStore {
    slots: Mutex<HashMap<String, String>>,
}

impl MemoryStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl LocalStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>, LocalStoreError> {
        let slots = self.slots.lock().unwrap_or_else(PoisonError::into_inner);
        Ok(slots.get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<(), LocalStoreError> {
        let mut slots = self.slots.lock().unwrap_or_else(PoisonError::into_inner);
        slots.insert(key.to_owned(), value.to_owned());
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), LocalStoreError> {
        let mut slots = self.slots.lock().unwrap_or_else(PoisonError::into_inner);
        slots.remove(key);
        Ok(())
    }
}
