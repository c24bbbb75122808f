// src/services/watch_service.rs
//
// Watch Service - watched flags and derived progress
//
// - Marking never creates rows; an unknown key is a named no-op
// - Percentages are always recomputed from the episode rows

use serde::Serialize;
use std::sync::Arc;

use crate::domain::episode::{Episode, EpisodeKey};
use crate::domain::statistics::{LibraryStatistics, WatchProgress};
use crate::error::{AppError, AppResult};
use crate::repositories::{EpisodeRepository, TitleRepository};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum MarkOutcome {
    Marked,
    /// No stored episode has this key, nothing changed
    UnknownEpisode,
}

pub struct WatchService {
    episode_repo: Arc<dyn EpisodeRepository>,
    title_repo: Arc<dyn TitleRepository>,
}

impl WatchService {
    pub fn new(
        episode_repo: Arc<dyn EpisodeRepository>,
        title_repo: Arc<dyn TitleRepository>,
    ) -> Self {
        Self {
            episode_repo,
            title_repo,
        }
    }

    pub fn mark_watched(&self, key: &EpisodeKey) -> AppResult<MarkOutcome> {
        if self.episode_repo.mark_watched(key)? {
            log::debug!("Marked {} as watched", key);
            Ok(MarkOutcome::Marked)
        } else {
            log::debug!("Ignoring watch mark for unknown episode {}", key);
            Ok(MarkOutcome::UnknownEpisode)
        }
    }

    /// Same as `mark_watched`, addressed by title and catalog episode number
    pub fn mark_watched_number(&self, title_id: &str, number: u32) -> AppResult<MarkOutcome> {
        self.mark_watched(&EpisodeKey::new(title_id, number))
    }

    /// `NotFound` for a title that was never registered
    pub fn progress(&self, title_id: &str) -> AppResult<WatchProgress> {
        if !self.title_repo.exists(title_id)? {
            return Err(AppError::NotFound);
        }
        self.episode_repo.progress(title_id)
    }

    /// Percentage of imported episodes watched, rounded to two decimals.
    ///
    /// A title with no imported episodes yields `DivisionUndefined`, never 0.
    pub fn percent_watched(&self, title_id: &str) -> AppResult<f64> {
        self.progress(title_id)?
            .percent()
            .ok_or_else(|| AppError::DivisionUndefined {
                title_id: title_id.to_string(),
            })
    }

    pub fn list_episodes(&self, title_id: &str) -> AppResult<Vec<Episode>> {
        self.episode_repo.list_by_title(title_id)
    }

    pub fn list_watched(&self, title_id: &str) -> AppResult<Vec<Episode>> {
        self.episode_repo.list_watched(title_id)
    }

    pub fn library_statistics(&self) -> AppResult<LibraryStatistics> {
        let titles = self.title_repo.list_all()?;
        let mut stats = LibraryStatistics {
            total_titles: titles.len() as u32,
            ..LibraryStatistics::default()
        };

        for title in &titles {
            let progress = self.episode_repo.progress(&title.id)?;
            stats.total_episodes += progress.total;
            stats.watched_episodes += progress.watched;
            if progress.is_complete() {
                stats.completed_titles += 1;
            }
            if title.rating.is_rated() {
                stats.rated_titles += 1;
            }
        }

        Ok(stats)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::test_support::setup_test_pool;
    use crate::domain::{Rating, Title};
    use crate::repositories::{SqliteEpisodeRepository, SqliteTitleRepository};

    struct Fixture {
        service: WatchService,
        titles: Arc<SqliteTitleRepository>,
        episodes: Arc<SqliteEpisodeRepository>,
        _temp: tempfile::TempDir,
    }

    fn fixture() -> Fixture {
        let (pool, temp) = setup_test_pool();
        let titles = Arc::new(SqliteTitleRepository::new(pool.clone()));
        let episodes = Arc::new(SqliteEpisodeRepository::new(pool));
        Fixture {
            service: WatchService::new(episodes.clone(), titles.clone()),
            titles,
            episodes,
            _temp: temp,
        }
    }

    fn seed(f: &Fixture, title_id: &str, count: u32) {
        f.titles.insert(&Title::new(title_id, title_id)).unwrap();
        for number in 1..=count {
            f.episodes
                .insert(&Episode::new(
                    EpisodeKey::new(title_id, number),
                    format!("u{number}"),
                ))
                .unwrap();
        }
    }

    #[test]
    fn test_half_watched_scenario() {
        let f = fixture();
        f.titles.insert(&Title::new("a1", "Naruto")).unwrap();
        f.episodes
            .insert(&Episode::new(EpisodeKey::new("a1", 1), "u1"))
            .unwrap();
        let mut second = Episode::new(EpisodeKey::new("a1", 2), "u2");
        second.mark_watched();
        f.episodes.insert(&second).unwrap();

        assert_eq!(f.service.percent_watched("a1").unwrap(), 50.00);
    }

    #[test]
    fn test_no_episodes_is_division_undefined() {
        let f = fixture();
        seed(&f, "a1", 0);

        let err = f.service.percent_watched("a1").unwrap_err();

        assert!(matches!(err, AppError::DivisionUndefined { ref title_id } if title_id == "a1"));
    }

    #[test]
    fn test_unregistered_title_is_not_found() {
        let f = fixture();

        assert!(matches!(f.service.progress("ghost"), Err(AppError::NotFound)));
        assert!(matches!(f.service.percent_watched("ghost"), Err(AppError::NotFound)));
    }

    #[test]
    fn test_nothing_watched_is_zero_not_undefined() {
        let f = fixture();
        seed(&f, "a1", 3);

        assert_eq!(f.service.percent_watched("a1").unwrap(), 0.0);
    }

    #[test]
    fn test_percentage_is_monotonic_while_marking() {
        let f = fixture();
        seed(&f, "a1", 7);

        let mut last = f.service.percent_watched("a1").unwrap();
        for number in [3, 3, 1, 7, 2, 4, 5, 6] {
            f.service.mark_watched_number("a1", number).unwrap();
            let now = f.service.percent_watched("a1").unwrap();
            assert!(now >= last, "{} dropped to {}", last, now);
            last = now;
        }

        assert_eq!(last, 100.0);
        assert_eq!(f.service.progress("a1").unwrap(), WatchProgress::new(7, 7));
    }

    #[test]
    fn test_rounding_matches_formula() {
        let f = fixture();
        seed(&f, "a1", 3);
        f.service.mark_watched_number("a1", 1).unwrap();

        assert_eq!(f.service.percent_watched("a1").unwrap(), 33.33);
    }

    #[test]
    fn test_unknown_episode_is_a_named_no_op() {
        let f = fixture();
        seed(&f, "a1", 1);

        let outcome = f.service.mark_watched(&EpisodeKey::new("a1", 99)).unwrap();

        assert_eq!(outcome, MarkOutcome::UnknownEpisode);
        assert_eq!(f.service.progress("a1").unwrap(), WatchProgress::new(0, 1));
    }

    #[test]
    fn test_mark_watched_by_key() {
        let f = fixture();
        seed(&f, "a1", 2);

        let key: EpisodeKey = "a1 2".parse().unwrap();
        assert_eq!(f.service.mark_watched(&key).unwrap(), MarkOutcome::Marked);

        let watched = f.service.list_watched("a1").unwrap();
        assert_eq!(watched.len(), 1);
        assert_eq!(watched[0].id, key);
        assert_eq!(f.service.list_episodes("a1").unwrap().len(), 2);
    }

    #[test]
    fn test_library_statistics() {
        let f = fixture();
        seed(&f, "a1", 2);
        seed(&f, "b2", 1);
        seed(&f, "c3", 0);
        f.titles.set_rating("b2", Rating::new(5).unwrap()).unwrap();
        f.service.mark_watched_number("b2", 1).unwrap();
        f.service.mark_watched_number("a1", 1).unwrap();

        let stats = f.service.library_statistics().unwrap();

        assert_eq!(
            stats,
            LibraryStatistics {
                total_titles: 3,
                rated_titles: 1,
                total_episodes: 3,
                watched_episodes: 2,
                completed_titles: 1,
            }
        );
    }
}
