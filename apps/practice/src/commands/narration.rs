//! Read-aloud commands.

use crate::preferences::{load_preferences, Language};
use crate::state::AppState;

use super::CommandError;

/// Read `text` aloud, replacing whatever is being read.
///
/// Without an explicit language the interface language is used.
pub fn narrate(
    state: &AppState,
    text: &str,
    language: Option<Language>,
) -> Result<(), CommandError> {
    if text.trim().is_empty() {
        return Err(CommandError::new("nothing to narrate"));
    }

    let language = match language {
        Some(language) => language,
        None => {
            let store = state.store.lock().expect("store lock");
            load_preferences(store.surface()).language
        }
    };
    state.narration.speak(text, language);
    Ok(())
}

/// Stop any narration in progress.
pub fn stop_narration(state: &AppState) -> Result<(), CommandError> {
    state.narration.stop();
    Ok(())
}
