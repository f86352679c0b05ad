//! Podcast "listened" marker commands.

use crate::podcast::{load_listened, set_listened};
use crate::state::AppState;

use super::CommandError;

/// Mark an episode as listened.
pub fn mark_listened(state: &AppState, episode_id: &str) -> Result<Vec<String>, CommandError> {
    let store = state.store.lock().expect("store lock");
    let episodes = set_listened(store.surface(), episode_id, true);
    Ok(episodes.iter().map(str::to_string).collect())
}

/// Clear an episode's listened marker.
pub fn unmark_listened(state: &AppState, episode_id: &str) -> Result<Vec<String>, CommandError> {
    let store = state.store.lock().expect("store lock");
    let episodes = set_listened(store.surface(), episode_id, false);
    Ok(episodes.iter().map(str::to_string).collect())
}

pub fn is_listened(state: &AppState, episode_id: &str) -> Result<bool, CommandError> {
    let store = state.store.lock().expect("store lock");
    Ok(load_listened(store.surface()).contains(episode_id))
}

/// All listened episode IDs in sorted order.
pub fn list_listened(state: &AppState) -> Result<Vec<String>, CommandError> {
    let store = state.store.lock().expect("store lock");
    Ok(load_listened(store.surface()).iter().map(str::to_string).collect())
}
