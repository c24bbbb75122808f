// src/application/state.rs

use std::sync::Arc;

use crate::db::ConnectionPool;
use crate::repositories::{
    EpisodeRepository, SqliteEpisodeRepository, SqliteTitleRepository, TitleRepository,
};
use crate::services::{ImportService, LibraryService, TitleService, WatchService};

/// Everything a command needs, wired once at startup.
/// All fields are Arc-wrapped so commands can share them freely.
pub struct AppState {
    pub pool: Arc<ConnectionPool>,
    pub title_service: Arc<TitleService>,
    pub import_service: Arc<ImportService>,
    pub watch_service: Arc<WatchService>,
    pub library_service: Arc<LibraryService>,
}

impl AppState {
    pub fn new(pool: Arc<ConnectionPool>) -> Self {
        // REPOSITORIES
        let title_repo: Arc<dyn TitleRepository> =
            Arc::new(SqliteTitleRepository::new(pool.clone()));
        let episode_repo: Arc<dyn EpisodeRepository> =
            Arc::new(SqliteEpisodeRepository::new(pool.clone()));

        // SERVICES
        let title_service = Arc::new(TitleService::new(title_repo.clone()));
        let import_service = Arc::new(ImportService::new(
            title_repo.clone(),
            episode_repo.clone(),
        ));
        let watch_service = Arc::new(WatchService::new(
            episode_repo.clone(),
            title_repo.clone(),
        ));
        let library_service = Arc::new(LibraryService::new(
            title_repo,
            episode_repo,
            import_service.clone(),
        ));

        Self {
            pool,
            title_service,
            import_service,
            watch_service,
            library_service,
        }
    }
}
