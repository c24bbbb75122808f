// src/services/title_service.rs
//
// Title Service - the Title Registry boundary
//
// - Validates titles and ratings before they reach storage
// - Deletion always takes the episodes with it, in one transaction

use std::sync::Arc;

use crate::domain::title::{validate_title, Rating, Title};
use crate::error::{AppError, AppResult};
use crate::repositories::TitleRepository;

pub struct TitleService {
    title_repo: Arc<dyn TitleRepository>,
}

impl TitleService {
    pub fn new(title_repo: Arc<dyn TitleRepository>) -> Self {
        Self { title_repo }
    }

    /// Register a title first seen in the remote catalog.
    ///
    /// Fails with `DuplicateKey` if the id is already registered; the stored
    /// row is left untouched.
    pub fn register_title(&self, id: &str, name: &str) -> AppResult<Title> {
        let title = Title::new(id, name);
        validate_title(&title)?;

        self.title_repo.insert(&title)?;
        log::info!("Registered title {} ({})", title.id, title.name);

        Ok(title)
    }

    pub fn title_exists(&self, id: &str) -> AppResult<bool> {
        self.title_repo.exists(id)
    }

    pub fn get_title(&self, id: &str) -> AppResult<Option<Title>> {
        self.title_repo.get_by_id(id)
    }

    /// Exact-name lookup. Empty means "ask the remote catalog", not an error.
    pub fn find_by_name(&self, name: &str) -> AppResult<Vec<Title>> {
        self.title_repo.find_by_name(name)
    }

    pub fn list_titles(&self) -> AppResult<Vec<Title>> {
        self.title_repo.list_all()
    }

    /// Record a user vote. Anything outside 0..=5 is rejected here and never
    /// reaches storage.
    pub fn rate_title(&self, id: &str, stars: i64) -> AppResult<Rating> {
        let rating = Rating::new(stars)?;

        if !self.title_repo.set_rating(id, rating)? {
            return Err(AppError::NotFound);
        }

        log::debug!("Rated title {} with {}", id, rating);
        Ok(rating)
    }

    /// Delete a title together with every episode it owns.
    ///
    /// Returns how many episodes were removed.
    pub fn remove_title(&self, id: &str) -> AppResult<usize> {
        let removed = self.title_repo.delete_with_episodes(id)?;
        log::info!("Removed title {} and {} episodes", id, removed);
        Ok(removed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::test_support::setup_test_pool;
    use crate::domain::DomainError;
    use crate::repositories::SqliteTitleRepository;

    fn service() -> (TitleService, tempfile::TempDir) {
        let (pool, temp) = setup_test_pool();
        (
            TitleService::new(Arc::new(SqliteTitleRepository::new(pool))),
            temp,
        )
    }

    #[test]
    fn test_register_then_lookup() {
        let (service, _temp) = service();

        let title = service.register_title("a1", "Naruto").unwrap();

        assert!(service.title_exists("a1").unwrap());
        assert!(service.find_by_name("Naruto").unwrap().contains(&title));
    }

    #[test]
    fn test_register_blank_name_is_rejected() {
        let (service, _temp) = service();

        let err = service.register_title("a1", " ").unwrap_err();

        assert!(matches!(err, AppError::Domain(DomainError::InvariantViolation(_))));
        assert!(!service.title_exists("a1").unwrap());
    }

    #[test]
    fn test_register_twice_is_duplicate() {
        let (service, _temp) = service();
        service.register_title("a1", "Naruto").unwrap();

        let err = service.register_title("a1", "Naruto (dub)").unwrap_err();

        assert!(err.is_duplicate_key());
        assert_eq!(service.get_title("a1").unwrap().unwrap().name, "Naruto");
    }

    #[test]
    fn test_rating_round_trip_through_list() {
        let (service, _temp) = service();
        service.register_title("a1", "Naruto").unwrap();

        service.rate_title("a1", 3).unwrap();

        let listed = service.list_titles().unwrap();
        assert_eq!(listed[0].rating.stars(), 3);
    }

    #[test]
    fn test_out_of_range_rating_never_persisted() {
        let (service, _temp) = service();
        service.register_title("a1", "Naruto").unwrap();
        service.rate_title("a1", 2).unwrap();

        let err = service.rate_title("a1", 6).unwrap_err();

        assert!(matches!(err, AppError::Domain(DomainError::RatingOutOfRange(6))));
        assert_eq!(service.get_title("a1").unwrap().unwrap().rating.stars(), 2);
    }

    #[test]
    fn test_rating_unknown_title() {
        let (service, _temp) = service();

        assert!(matches!(service.rate_title("ghost", 4), Err(AppError::NotFound)));
    }

    #[test]
    fn test_remove_title() {
        let (service, _temp) = service();
        service.register_title("a1", "Naruto").unwrap();

        assert_eq!(service.remove_title("a1").unwrap(), 0);
        assert!(!service.title_exists("a1").unwrap());
        assert!(matches!(service.remove_title("a1"), Err(AppError::NotFound)));
    }
}
