use serde::{Deserialize, Serialize};
use std::fmt;

use super::{KeyValueStore, StorageResult, THEME_KEY};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ThemePreference {
    #[default]
    Light,
    Dark,
}

impl ThemePreference {
    pub fn as_str(self) -> &'static str {
        match self {
            ThemePreference::Light => "light",
            ThemePreference::Dark => "dark",
        }
    }

    /// Anything other than a stored `dark` reads as light.
    pub fn from_stored(value: Option<&str>) -> Self {
        match value.map(str::trim) {
            Some("dark") => ThemePreference::Dark,
            _ => ThemePreference::Light,
        }
    }

    pub fn toggled(self) -> Self {
        match self {
            ThemePreference::Light => ThemePreference::Dark,
            ThemePreference::Dark => ThemePreference::Light,
        }
    }

    /// Caption for the theme toggle button.
    pub fn label(self) -> &'static str {
        match self {
            ThemePreference::Light => "☀️ Light Mode",
            ThemePreference::Dark => "🌙 Dark Mode",
        }
    }

    pub fn load(store: &dyn KeyValueStore) -> StorageResult<Self> {
        Ok(Self::from_stored(store.get(THEME_KEY)?.as_deref()))
    }

    pub fn save(self, store: &dyn KeyValueStore) -> StorageResult<()> {
        store.set(THEME_KEY, self.as_str())
    }
}

impl fmt::Display for ThemePreference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
