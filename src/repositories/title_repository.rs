// src/repositories/title_repository.rs
//
// Title persistence

use rusqlite::{params, Row};
use std::sync::Arc;

use crate::db::ConnectionPool;
use crate::domain::title::{Rating, Title};
use crate::error::{AppError, AppResult};

pub trait TitleRepository: Send + Sync {
    /// Fails with `DuplicateKey` when the id is taken. Never overwrites.
    fn insert(&self, title: &Title) -> AppResult<()>;
    fn get_by_id(&self, id: &str) -> AppResult<Option<Title>>;
    fn find_by_name(&self, name: &str) -> AppResult<Vec<Title>>;
    /// Storage order
    fn list_all(&self) -> AppResult<Vec<Title>>;
    /// Returns false when no row matched
    fn set_rating(&self, id: &str, rating: Rating) -> AppResult<bool>;
    /// Removes the title row only. Rejected with `IntegrityViolation` while episodes still reference it.
    fn delete(&self, id: &str) -> AppResult<bool>;
    /// Removes the title and all its episodes in one transaction. Returns the episode rows removed.
    fn delete_with_episodes(&self, id: &str) -> AppResult<usize>;
    fn exists(&self, id: &str) -> AppResult<bool>;
}

pub struct SqliteTitleRepository {
    pool: Arc<ConnectionPool>,
}

impl SqliteTitleRepository {
    pub fn new(pool: Arc<ConnectionPool>) -> Self {
        Self { pool }
    }

    /// Map database row to Title - returns rusqlite::Error for query_map compatibility
    fn row_to_title(row: &Row) -> Result<Title, rusqlite::Error> {
        let stars: i64 = row.get("rating")?;
        let rating = Rating::new(stars).map_err(|e| {
            rusqlite::Error::FromSqlConversionFailure(
                1,
                rusqlite::types::Type::Integer,
                Box::new(e),
            )
        })?;

        Ok(Title {
            id: row.get("id")?,
            name: row.get("name")?,
            rating,
        })
    }
}

impl TitleRepository for SqliteTitleRepository {
    fn insert(&self, title: &Title) -> AppResult<()> {
        let conn = self.pool.get()?;

        conn.execute(
            "INSERT INTO titles (id, rating, name) VALUES (?1, ?2, ?3)",
            params![title.id, title.rating.stars(), title.name],
        )
        .map_err(|e| AppError::from_write(e, &title.id))?;

        Ok(())
    }

    fn get_by_id(&self, id: &str) -> AppResult<Option<Title>> {
        let conn = self.pool.get()?;

        let mut stmt = conn.prepare("SELECT id, rating, name FROM titles WHERE id = ?1")?;

        match stmt.query_row(params![id], Self::row_to_title) {
            Ok(title) => Ok(Some(title)),
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(AppError::Database(e)),
        }
    }

    fn find_by_name(&self, name: &str) -> AppResult<Vec<Title>> {
        let conn = self.pool.get()?;

        let mut stmt = conn.prepare(
            "SELECT id, rating, name FROM titles
             WHERE name = ?1
             ORDER BY rowid",
        )?;

        let titles = stmt
            .query_map(params![name], Self::row_to_title)?
            .collect::<Result<Vec<_>, _>>()?;

        Ok(titles)
    }

    fn list_all(&self) -> AppResult<Vec<Title>> {
        let conn = self.pool.get()?;

        let mut stmt = conn.prepare("SELECT id, rating, name FROM titles ORDER BY rowid")?;

        let titles = stmt
            .query_map([], Self::row_to_title)?
            .collect::<Result<Vec<_>, _>>()?;

        Ok(titles)
    }

    fn set_rating(&self, id: &str, rating: Rating) -> AppResult<bool> {
        let conn = self.pool.get()?;

        let rows_affected = conn.execute(
            "UPDATE titles SET rating = ?1 WHERE id = ?2",
            params![rating.stars(), id],
        )?;

        Ok(rows_affected > 0)
    }

    fn delete(&self, id: &str) -> AppResult<bool> {
        let conn = self.pool.get()?;

        let rows_affected = conn
            .execute("DELETE FROM titles WHERE id = ?1", params![id])
            .map_err(|e| AppError::from_write(e, id))?;

        Ok(rows_affected > 0)
    }

    fn delete_with_episodes(&self, id: &str) -> AppResult<usize> {
        let mut conn = self.pool.get()?;
        let tx = conn.transaction()?;

        // Children first, foreign keys are checked per statement
        let episodes_removed =
            tx.execute("DELETE FROM episodes WHERE title_id = ?1", params![id])?;
        let titles_removed = tx.execute("DELETE FROM titles WHERE id = ?1", params![id])?;

        if titles_removed == 0 {
            // Dropping the transaction rolls it back
            return Err(AppError::NotFound);
        }

        tx.commit()?;
        Ok(episodes_removed)
    }

    fn exists(&self, id: &str) -> AppResult<bool> {
        let conn = self.pool.get()?;

        let count: i64 = conn.query_row(
            "SELECT COUNT(*) FROM titles WHERE id = ?1",
            params![id],
            |row| row.get(0),
        )?;

        Ok(count > 0)
    }
}
