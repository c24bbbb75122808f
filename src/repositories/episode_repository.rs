// src/repositories/episode_repository.rs
//
// Episode persistence
//
// Episodes are listed in storage order. The importer writes them in
// ascending episode order, and the text key would sort "10" before "2".

use rusqlite::{params, Row};
use std::sync::Arc;

use crate::db::ConnectionPool;
use crate::domain::episode::{Episode, EpisodeKey};
use crate::domain::statistics::WatchProgress;
use crate::error::{AppError, AppResult};

pub struct SqliteEpisodeRepository {
    pool: Arc<ConnectionPool>,
}

impl SqliteEpisodeRepository {
    pub fn new(pool: Arc<ConnectionPool>) -> Self {
        Self { pool }
    }

    /// Convert a database row to an Episode entity.
    ///
    /// A malformed key is an explicit error, not a silent default.
    fn row_to_episode(row: &Row) -> rusqlite::Result<Episode> {
        let id_str: String = row.get("id")?;
        let id = id_str.parse::<EpisodeKey>().map_err(|e| {
            rusqlite::Error::FromSqlConversionFailure(0, rusqlite::types::Type::Text, Box::new(e))
        })?;

        let watched: i64 = row.get("watched")?;

        Ok(Episode {
            id,
            watched: watched != 0,
            link: row.get("link")?,
        })
    }
}

// ---------------------------------------------------------------------
// Repository contract
// ---------------------------------------------------------------------
pub trait EpisodeRepository: Send + Sync {
    /// Fails with `DuplicateKey` on a known key and `IntegrityViolation`
    /// when the owning title does not exist.
    fn insert(&self, episode: &Episode) -> AppResult<()>;

    fn get_by_id(&self, id: &EpisodeKey) -> AppResult<Option<Episode>>;

    fn list_by_title(&self, title_id: &str) -> AppResult<Vec<Episode>>;

    fn list_watched(&self, title_id: &str) -> AppResult<Vec<Episode>>;

    /// Returns false when no row matched
    fn mark_watched(&self, id: &EpisodeKey) -> AppResult<bool>;

    fn delete_by_title(&self, title_id: &str) -> AppResult<usize>;

    fn progress(&self, title_id: &str) -> AppResult<WatchProgress>;
}

// ---------------------------------------------------------------------
// SQLite Implementation
// ---------------------------------------------------------------------
impl EpisodeRepository for SqliteEpisodeRepository {
    fn insert(&self, episode: &Episode) -> AppResult<()> {
        let conn = self.pool.get()?;
        let key = episode.id.to_string();

        conn.execute(
            "INSERT INTO episodes (id, title_id, watched, link) VALUES (?1, ?2, ?3, ?4)",
            params![key, episode.title_id(), episode.watched, episode.link],
        )
        .map_err(|e| AppError::from_write(e, &key))?;

        Ok(())
    }

    fn get_by_id(&self, id: &EpisodeKey) -> AppResult<Option<Episode>> {
        let conn = self.pool.get()?;
        let mut stmt =
            conn.prepare("SELECT id, title_id, watched, link FROM episodes WHERE id = ?1")?;

        match stmt.query_row(params![id.to_string()], Self::row_to_episode) {
            Ok(episode) => Ok(Some(episode)),
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(AppError::Database(e)),
        }
    }

    fn list_by_title(&self, title_id: &str) -> AppResult<Vec<Episode>> {
        let conn = self.pool.get()?;
        let mut stmt = conn.prepare(
            "SELECT id, title_id, watched, link FROM episodes
             WHERE title_id = ?1
             ORDER BY rowid",
        )?;

        let episodes = stmt
            .query_map(params![title_id], Self::row_to_episode)?
            .collect::<Result<Vec<_>, _>>()?;

        Ok(episodes)
    }

    fn list_watched(&self, title_id: &str) -> AppResult<Vec<Episode>> {
        let conn = self.pool.get()?;
        let mut stmt = conn.prepare(
            "SELECT id, title_id, watched, link FROM episodes
             WHERE title_id = ?1 AND watched = 1
             ORDER BY rowid",
        )?;

        let episodes = stmt
            .query_map(params![title_id], Self::row_to_episode)?
            .collect::<Result<Vec<_>, _>>()?;

        Ok(episodes)
    }

    fn mark_watched(&self, id: &EpisodeKey) -> AppResult<bool> {
        let conn = self.pool.get()?;
        let rows_affected = conn.execute(
            "UPDATE episodes SET watched = 1 WHERE id = ?1",
            params![id.to_string()],
        )?;
        Ok(rows_affected > 0)
    }

    fn delete_by_title(&self, title_id: &str) -> AppResult<usize> {
        let conn = self.pool.get()?;
        let rows_affected =
            conn.execute("DELETE FROM episodes WHERE title_id = ?1", params![title_id])?;
        Ok(rows_affected)
    }

    fn progress(&self, title_id: &str) -> AppResult<WatchProgress> {
        let conn = self.pool.get()?;
        let (total, watched): (i64, i64) = conn.query_row(
            "SELECT COUNT(*), COALESCE(SUM(watched), 0) FROM episodes WHERE title_id = ?1",
            params![title_id],
            |row| Ok((row.get(0)?, row.get(1)?)),
        )?;

        Ok(WatchProgress::new(watched as u32, total as u32))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::test_support::setup_test_pool;
    use crate::domain::Title;
    use crate::repositories::{SqliteTitleRepository, TitleRepository};

    fn setup_with_title(title_id: &str) -> (SqliteEpisodeRepository, tempfile::TempDir) {
        let (pool, temp) = setup_test_pool();
        SqliteTitleRepository::new(pool.clone())
            .insert(&Title::new(title_id, "Naruto"))
            .unwrap();
        (SqliteEpisodeRepository::new(pool), temp)
    }

    fn episode(title_id: &str, number: u32) -> Episode {
        Episode::new(EpisodeKey::new(title_id, number), format!("https://cdn.example/{number}"))
    }

    #[test]
    fn test_insert_and_get() {
        let (repo, _temp) = setup_with_title("a1");
        repo.insert(&episode("a1", 1)).unwrap();

        let stored = repo.get_by_id(&EpisodeKey::new("a1", 1)).unwrap().unwrap();
        assert_eq!(stored, episode("a1", 1));
        assert!(repo.get_by_id(&EpisodeKey::new("a1", 2)).unwrap().is_none());
    }

    #[test]
    fn test_insert_without_title_is_integrity_violation() {
        let (repo, _temp) = setup_with_title("a1");

        let err = repo.insert(&episode("ghost", 1)).unwrap_err();

        assert!(matches!(err, AppError::IntegrityViolation(_)));
    }

    #[test]
    fn test_duplicate_episode_is_duplicate_key() {
        let (repo, _temp) = setup_with_title("a1");
        repo.insert(&episode("a1", 1)).unwrap();

        let err = repo.insert(&episode("a1", 1)).unwrap_err();

        assert!(matches!(err, AppError::DuplicateKey(ref k) if k == "a1 1"));
    }

    #[test]
    fn test_list_keeps_import_order() {
        let (repo, _temp) = setup_with_title("a1");
        for number in [1, 2, 10, 11] {
            repo.insert(&episode("a1", number)).unwrap();
        }

        let numbers: Vec<u32> = repo
            .list_by_title("a1")
            .unwrap()
            .iter()
            .map(Episode::number)
            .collect();
        assert_eq!(numbers, vec![1, 2, 10, 11]);
    }

    #[test]
    fn test_mark_watched_and_progress() {
        let (repo, _temp) = setup_with_title("a1");
        repo.insert(&episode("a1", 1)).unwrap();
        repo.insert(&episode("a1", 2)).unwrap();

        assert_eq!(repo.progress("a1").unwrap(), WatchProgress::new(0, 2));
        assert!(repo.mark_watched(&EpisodeKey::new("a1", 2)).unwrap());
        assert!(!repo.mark_watched(&EpisodeKey::new("a1", 3)).unwrap());

        assert_eq!(repo.progress("a1").unwrap(), WatchProgress::new(1, 2));
        let watched = repo.list_watched("a1").unwrap();
        assert_eq!(watched.len(), 1);
        assert_eq!(watched[0].number(), 2);
    }

    #[test]
    fn test_progress_for_title_without_episodes() {
        let (repo, _temp) = setup_with_title("a1");
        assert_eq!(repo.progress("a1").unwrap(), WatchProgress::new(0, 0));
    }

    #[test]
    fn test_delete_by_title() {
        let (repo, _temp) = setup_with_title("a1");
        repo.insert(&episode("a1", 1)).unwrap();
        repo.insert(&episode("a1", 2)).unwrap();

        assert_eq!(repo.delete_by_title("a1").unwrap(), 2);
        assert!(repo.list_by_title("a1").unwrap().is_empty());
    }
}
