//! Persisted theme preference.
//!
//! One slot (`theme-storage`) holding the light/dark/system choice. The
//! `System` preference resolves to a concrete theme from a caller-supplied
//! hint, since the client itself has no way to observe the OS preference.

use serde::{Deserialize, Serialize};

use crate::domain::error::Result;
use crate::storage::slot::JsonSlot;

const SLOT_NAME: &str = "theme-storage";

/// The three theme preferences.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    Light,
    Dark,
    #[default]
    System,
}

impl Theme {
    /// Parses a preference name; unknown names fall back to `System`.
    #[must_use]
    pub fn from_name(name: &str) -> Self {
        match name {
            "light" => Self::Light,
            "dark" => Self::Dark,
            _ => Self::System,
        }
    }
}

impl std::fmt::Display for Theme {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Light => write!(f, "light"),
            Self::Dark => write!(f, "dark"),
            Self::System => write!(f, "system"),
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
struct ThemeSnapshot {
    version: u32,
    #[serde(default)]
    theme: Theme,
}

/// Store for the theme preference singleton.
pub struct ThemeStore {
    slot: JsonSlot,
    theme: Theme,
}

impl ThemeStore {
    /// Opens the store and hydrates the preference from its slot.
    ///
    /// # Errors
    ///
    /// Returns an error if the slot cannot be opened or holds a corrupt
    /// snapshot.
    pub fn open(data_dir: impl AsRef<std::path::Path>) -> Result<Self> {
        let slot = JsonSlot::open(data_dir, SLOT_NAME)?;
        let snapshot: ThemeSnapshot = slot.read()?.unwrap_or_default();
        Ok(Self {
            slot,
            theme: snapshot.theme,
        })
    }

    /// The stored preference.
    #[must_use]
    pub fn theme(&self) -> Theme {
        self.theme
    }

    /// Replaces the preference and persists.
    ///
    /// # Errors
    ///
    /// Returns an error if persisting fails.
    pub fn set_theme(&mut self, theme: Theme) -> Result<()> {
        self.theme = theme;
        self.slot.write(&ThemeSnapshot { version: 1, theme })
    }

    /// Resolves the preference to a concrete light/dark theme.
    ///
    /// `system_prefers_dark` is the caller's hint for the `System`
    /// preference; `Light` and `Dark` ignore it.
    #[must_use]
    pub fn effective_theme(&self, system_prefers_dark: bool) -> Theme {
        match self.theme {
            Theme::System => {
                if system_prefers_dark {
                    Theme::Dark
                } else {
                    Theme::Light
                }
            }
            explicit => explicit,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn defaults_to_system() {
        let dir = TempDir::new().unwrap();
        let store = ThemeStore::open(dir.path()).unwrap();
        assert_eq!(store.theme(), Theme::System);
        assert_eq!(store.effective_theme(true), Theme::Dark);
        assert_eq!(store.effective_theme(false), Theme::Light);
    }

    #[test]
    fn explicit_preference_ignores_system_hint() {
        let dir = TempDir::new().unwrap();
        let mut store = ThemeStore::open(dir.path()).unwrap();
        store.set_theme(Theme::Light).unwrap();
        assert_eq!(store.effective_theme(true), Theme::Light);
    }

    #[test]
    fn preference_survives_reopen() {
        let dir = TempDir::new().unwrap();
        {
            let mut store = ThemeStore::open(dir.path()).unwrap();
            store.set_theme(Theme::Dark).unwrap();
        }
        let reopened = ThemeStore::open(dir.path()).unwrap();
        assert_eq!(reopened.theme(), Theme::Dark);
    }

    #[test]
    fn unknown_names_fall_back_to_system() {
        assert_eq!(Theme::from_name("dark"), Theme::Dark);
        assert_eq!(Theme::from_name("solarized"), Theme::System);
    }
}
