//! Light/dark preference persisted independently of the session
//!
//! The preference is read once at startup and written through on every
//! toggle. It shares the storage adapter with the session manager but never
//! touches the session keys; the two restore paths are independent.

use std::sync::{Arc, Mutex};

use crate::constants::THEME_KEY;
use crate::storage::Storage;

/// The two supported UI themes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ThemeMode {
    Light,
    /// Default when nothing (or anything unrecognized) is persisted.
    #[default]
    Dark,
}

impl ThemeMode {
    /// The value persisted for this mode.
    pub fn as_str(self) -> &'static str {
        match self {
            ThemeMode::Light => "light",
            ThemeMode::Dark => "dark",
        }
    }

    /// The opposite mode.
    pub fn toggled(self) -> Self {
        match self {
            ThemeMode::Light => ThemeMode::Dark,
            ThemeMode::Dark => ThemeMode::Light,
        }
    }

    fn from_stored(stored: Option<&str>) -> Self {
        // Only the exact marker selects light; anything else is dark.
        match stored {
            Some("light") => ThemeMode::Light,
            _ => ThemeMode::Dark,
        }
    }
}

/// Theme preference slice over a [`Storage`] adapter.
pub struct ThemePreference {
    storage: Arc<dyn Storage>,
    mode: Mutex<ThemeMode>,
}

impl ThemePreference {
    /// Loads the persisted preference, defaulting to dark.
    ///
    /// A storage read failure also falls back to dark; theme restore never
    /// fails and never blocks session restore.
    pub fn load(storage: Arc<dyn Storage>) -> Self {
        let stored = storage.get(THEME_KEY).unwrap_or_else(|err| {
            tracing::warn!(%err, "failed to read theme preference, defaulting to dark");
            None
        });
        let mode = ThemeMode::from_stored(stored.as_deref());
        Self {
            storage,
            mode: Mutex::new(mode),
        }
    }

    /// Currently selected mode.
    pub fn mode(&self) -> ThemeMode {
        *self.mode.lock().unwrap()
    }

    /// Flips the mode and writes it through synchronously.
    ///
    /// The in-memory mode follows the user's choice even when the write
    /// fails; a failure only costs persistence across restarts and is
    /// logged.
    pub fn toggle(&self) -> ThemeMode {
        let mut mode = self.mode.lock().unwrap();
        *mode = mode.toggled();
        if let Err(err) = self.storage.set(THEME_KEY, mode.as_str()) {
            tracing::warn!(%err, "failed to persist theme preference");
        }
        *mode
    }
}

impl std::fmt::Debug for ThemePreference {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ThemePreference")
            .field("storage", &"<dyn Storage>")
            .field("mode", &self.mode.lock().unwrap())
            .finish()
    }
}
