//! "Listened" markers for podcast episodes.

use exam_core::{PersistenceSurface, StoreError};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Storage key holding the listened episode IDs.
pub const LISTENED_KEY: &str = "podcast-listened";

/// Set of episode IDs the learner has marked as listened.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ListenedEpisodes(BTreeSet<String>);

impl ListenedEpisodes {
    pub fn contains(&self, episode_id: &str) -> bool {
        self.0.contains(episode_id)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(String::as_str)
    }
}

/// Load the listened set; unreadable data counts as nothing listened.
pub fn load_listened<S: PersistenceSurface>(surface: &S) -> ListenedEpisodes {
    match surface.get(LISTENED_KEY) {
        Ok(Some(raw)) => serde_json::from_str(&raw).unwrap_or_else(|e| {
            tracing::warn!(error = %e, "discarding malformed listened markers");
            ListenedEpisodes::default()
        }),
        Ok(None) => ListenedEpisodes::default(),
        Err(e) => {
            tracing::warn!(error = %e, "listened markers unavailable");
            ListenedEpisodes::default()
        }
    }
}

/// Mark or unmark an episode and save the result on a best-effort basis.
pub fn set_listened<S: PersistenceSurface>(
    surface: &S,
    episode_id: &str,
    listened: bool,
) -> ListenedEpisodes {
    let mut episodes = load_listened(surface);
    let changed = if listened {
        episodes.0.insert(episode_id.to_string())
    } else {
        episodes.0.remove(episode_id)
    };

    if changed {
        if let Err(e) = save_listened(surface, &episodes) {
            tracing::warn!(episode = episode_id, error = %e, "listened marker not saved");
        }
    }

    episodes
}

fn save_listened<S: PersistenceSurface>(
    surface: &S,
    episodes: &ListenedEpisodes,
) -> Result<(), StoreError> {
    let raw = serde_json::to_string(episodes)?;
    surface.set(LISTENED_KEY, &raw)?;
    Ok(())
}
