//! Preference panel commands.

use crate::preferences::{self, Preferences};
use crate::state::AppState;

use super::CommandError;

/// Get the saved display preferences.
pub fn get_preferences(state: &AppState) -> Result<Preferences, CommandError> {
    let store = state.store.lock().expect("store lock");
    Ok(preferences::load_preferences(store.surface()))
}

/// Save display preferences.
pub fn save_preferences(
    state: &AppState,
    prefs: Preferences,
) -> Result<Preferences, CommandError> {
    let store = state.store.lock().expect("store lock");
    preferences::save_preferences(store.surface(), &prefs)?;
    Ok(prefs)
}

/// Revert to default preferences.
pub fn reset_preferences(state: &AppState) -> Result<Preferences, CommandError> {
    let store = state.store.lock().expect("store lock");
    Ok(preferences::reset_preferences(store.surface()))
}
