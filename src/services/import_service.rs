// src/services/import_service.rs
//
// Import Service - one-time episode import for a newly discovered title
//
// RULES:
// - The owning title must already be registered
// - Exactly one link per episode: the first candidate the catalog returns
// - Per-item isolation: every episode commits on its own, and a failed link
//   lookup only affects that episode
// - Any other storage failure stops the batch; rows already written stay

use serde::Serialize;
use std::sync::Arc;

use crate::domain::episode::{validate_episode, Episode, EpisodeKey};
use crate::error::{AppError, AppResult};
use crate::integrations::{EpisodeStub, RemoteCatalog};
use crate::repositories::{EpisodeRepository, TitleRepository};

/// What happened to a single catalog episode during import
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case", tag = "outcome", content = "reason")]
pub enum EpisodeImport {
    Imported,
    /// The catalog offered no link, so nothing was stored
    NoLink,
    /// Already stored by an earlier import
    AlreadyImported,
    /// Link lookup failed for this episode only
    ResolveFailed(String),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EpisodeImportRecord {
    pub number: u32,
    pub outcome: EpisodeImport,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ImportReport {
    pub title_id: String,
    pub records: Vec<EpisodeImportRecord>,
}

impl ImportReport {
    fn new(title_id: &str) -> Self {
        Self {
            title_id: title_id.to_string(),
            records: Vec::new(),
        }
    }

    fn count(&self, wanted: fn(&EpisodeImport) -> bool) -> usize {
        self.records.iter().filter(|r| wanted(&r.outcome)).count()
    }

    pub fn imported(&self) -> usize {
        self.count(|o| matches!(o, EpisodeImport::Imported))
    }

    pub fn without_link(&self) -> usize {
        self.count(|o| matches!(o, EpisodeImport::NoLink))
    }

    pub fn already_imported(&self) -> usize {
        self.count(|o| matches!(o, EpisodeImport::AlreadyImported))
    }

    pub fn failed(&self) -> usize {
        self.count(|o| matches!(o, EpisodeImport::ResolveFailed(_)))
    }
}

pub struct ImportService {
    title_repo: Arc<dyn TitleRepository>,
    episode_repo: Arc<dyn EpisodeRepository>,
}

impl ImportService {
    pub fn new(
        title_repo: Arc<dyn TitleRepository>,
        episode_repo: Arc<dyn EpisodeRepository>,
    ) -> Self {
        Self {
            title_repo,
            episode_repo,
        }
    }

    /// Import `episodes` (ascending order) for `title_id`, resolving one link
    /// per episode through `catalog`.
    ///
    /// One catalog call per episode not yet stored. Storage order follows the
    /// order of `episodes`.
    pub fn import(
        &self,
        title_id: &str,
        episodes: &[EpisodeStub],
        catalog: &dyn RemoteCatalog,
    ) -> AppResult<ImportReport> {
        if !self.title_repo.exists(title_id)? {
            return Err(AppError::IntegrityViolation(format!(
                "cannot import episodes for unregistered title {}",
                title_id
            )));
        }

        let mut report = ImportReport::new(title_id);

        for stub in episodes {
            let key = EpisodeKey::new(title_id, stub.number);
            let outcome = self.import_one(key, catalog)?;
            report.records.push(EpisodeImportRecord {
                number: stub.number,
                outcome,
            });
        }

        log::info!(
            "Imported {} of {} episodes for {} ({} without link, {} already stored, {} failed)",
            report.imported(),
            report.records.len(),
            title_id,
            report.without_link(),
            report.already_imported(),
            report.failed(),
        );

        Ok(report)
    }

    fn import_one(&self, key: EpisodeKey, catalog: &dyn RemoteCatalog) -> AppResult<EpisodeImport> {
        if self.episode_repo.get_by_id(&key)?.is_some() {
            log::debug!("Episode {} already stored, skipping link lookup", key);
            return Ok(EpisodeImport::AlreadyImported);
        }

        let links = match catalog.get_links(&key.title_id, key.number) {
            Ok(links) => links,
            Err(e) => {
                log::warn!("Link lookup failed for {}: {}", key, e);
                return Ok(EpisodeImport::ResolveFailed(e.to_string()));
            }
        };

        let Some(first) = links.into_iter().next() else {
            log::debug!("No links for {}, skipping", key);
            return Ok(EpisodeImport::NoLink);
        };

        let episode = Episode::new(key, first.url);
        if let Err(e) = validate_episode(&episode) {
            log::warn!("Rejected link for {}: {}", episode.id, e);
            return Ok(EpisodeImport::ResolveFailed(e.to_string()));
        }

        match self.episode_repo.insert(&episode) {
            Ok(()) => Ok(EpisodeImport::Imported),
            Err(AppError::DuplicateKey(existing)) => {
                log::warn!("Episode {} was already imported", existing);
                Ok(EpisodeImport::AlreadyImported)
            }
            Err(e) => {
                log::error!("Aborting import at {}: {}", episode.id, e);
                Err(e)
            }
        }
    }
}
