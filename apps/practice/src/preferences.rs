//! Display preferences chosen in the language, theme and font panels.

use exam_core::{PersistenceSurface, StoreError};
use serde::{Deserialize, Serialize};

/// Storage key holding the preferences blob.
pub const PREFERENCES_KEY: &str = "preferences";

/// Interface language.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Language {
    Bg,
    En,
    De,
}

impl Default for Language {
    fn default() -> Self {
        Self::En
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Theme {
    Light,
    Dark,
    System,
}

impl Default for Theme {
    fn default() -> Self {
        Self::System
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FontSize {
    Small,
    Medium,
    Large,
    ExtraLarge,
}

impl Default for FontSize {
    fn default() -> Self {
        Self::Medium
    }
}

/// Persisted display preferences. Missing fields fall back to defaults.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Preferences {
    pub language: Language,
    pub theme: Theme,
    pub font_size: FontSize,
}

/// Load preferences, falling back to defaults when absent or unreadable.
pub fn load_preferences<S: PersistenceSurface>(surface: &S) -> Preferences {
    let raw = match surface.get(PREFERENCES_KEY) {
        Ok(Some(raw)) => raw,
        Ok(None) => return Preferences::default(),
        Err(e) => {
            tracing::warn!(error = %e, "preferences unavailable, using defaults");
            return Preferences::default();
        }
    };

    serde_json::from_str(&raw).unwrap_or_else(|e| {
        tracing::warn!(error = %e, "discarding malformed preferences");
        Preferences::default()
    })
}

/// Save preferences.
pub fn save_preferences<S: PersistenceSurface>(
    surface: &S,
    preferences: &Preferences,
) -> Result<(), StoreError> {
    let raw = serde_json::to_string(preferences)?;
    surface.set(PREFERENCES_KEY, &raw)?;
    Ok(())
}

/// Remove saved preferences and return the defaults.
pub fn reset_preferences<S: PersistenceSurface>(surface: &S) -> Preferences {
    if let Err(e) = surface.remove(PREFERENCES_KEY) {
        tracing::warn!(error = %e, "saved preferences not removed");
    }
    Preferences::default()
}
