// src/application/commands/episode_commands.rs

use crate::application::{dto::*, state::AppState};
use crate::domain::EpisodeKey;
use crate::error::AppResult;
use crate::services::MarkOutcome;

/// Stored episodes of a title, optionally only the watched ones
pub fn list_episodes(
    state: &AppState,
    title_id: &str,
    watched_only: bool,
) -> AppResult<Vec<EpisodeDto>> {
    let episodes = if watched_only {
        state.watch_service.list_watched(title_id)?
    } else {
        state.library_service.episodes(title_id)?
    };

    Ok(episodes.into_iter().map(EpisodeDto::from).collect())
}

/// Mark an episode watched. `episode` is a key such as `"naruto-tv 12"`.
pub fn mark_watched(state: &AppState, episode: &str) -> AppResult<MarkOutcome> {
    let key: EpisodeKey = episode.parse()?;
    state.watch_service.mark_watched(&key)
}

pub fn get_progress(state: &AppState, title_id: &str) -> AppResult<ProgressDto> {
    let progress = state.watch_service.progress(title_id)?;
    Ok(ProgressDto::new(title_id, progress))
}

/// Percentage only, failing with `DivisionUndefined` while nothing is imported
pub fn get_percent_watched(state: &AppState, title_id: &str) -> AppResult<f64> {
    state.watch_service.percent_watched(title_id)
}
