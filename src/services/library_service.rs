// src/services/library_service.rs
//
// Library Service - decides between the local library and the remote catalog
//
// Flow for one lookup by name:
//   local rows found  -> LocalHit, no remote call
//   nothing local     -> RemoteRequired; the caller searches the catalog and
//                        hands the chosen title to `adopt`, which imports its
//                        episodes at most once per title id

use serde::Serialize;
use std::sync::Arc;

use crate::domain::episode::Episode;
use crate::domain::title::{validate_title, Title};
use crate::error::{AppError, AppResult};
use crate::integrations::{CatalogInfo, RemoteCatalog, Selector, TitleStub};
use crate::repositories::{EpisodeRepository, TitleRepository};
use crate::services::import_service::{ImportReport, ImportService};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case", tag = "state")]
pub enum Lookup {
    /// Titles stored under exactly this name, for the caller to pick from
    LocalHit { titles: Vec<Title> },
    /// Nothing stored under this name; go to the remote catalog
    RemoteRequired { query: String },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case", tag = "adoption")]
pub enum Adoption {
    /// First sighting of this id: title registered and episodes imported
    Imported { title: Title, report: ImportReport },
    /// The id was already registered, possibly under another search string
    AlreadyKnown { title: Title },
}

impl Adoption {
    pub fn title(&self) -> &Title {
        match self {
            Adoption::Imported { title, .. } | Adoption::AlreadyKnown { title } => title,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case", tag = "discovery")]
pub enum Discovery {
    Local { titles: Vec<Title> },
    Remote { adoption: Adoption },
    /// The selector gave up before a title was chosen
    Cancelled,
}

pub struct LibraryService {
    title_repo: Arc<dyn TitleRepository>,
    episode_repo: Arc<dyn EpisodeRepository>,
    importer: Arc<ImportService>,
}

impl LibraryService {
    pub fn new(
        title_repo: Arc<dyn TitleRepository>,
        episode_repo: Arc<dyn EpisodeRepository>,
        importer: Arc<ImportService>,
    ) -> Self {
        Self {
            title_repo,
            episode_repo,
            importer,
        }
    }

    pub fn lookup(&self, name: &str) -> AppResult<Lookup> {
        let titles = self.title_repo.find_by_name(name)?;

        if titles.is_empty() {
            log::debug!("No local title named {:?}", name);
            Ok(Lookup::RemoteRequired {
                query: name.to_string(),
            })
        } else {
            log::debug!("{} local titles named {:?}", titles.len(), name);
            Ok(Lookup::LocalHit { titles })
        }
    }

    /// Bring a catalog title into the library.
    ///
    /// `info.episodes` is taken as the catalog returns it (newest first) and
    /// imported oldest first. A title id that is already registered is
    /// returned as-is and nothing is imported again. When the import aborts,
    /// the title and its partial episodes are removed again.
    pub fn adopt(
        &self,
        stub: &TitleStub,
        info: CatalogInfo,
        catalog: &dyn RemoteCatalog,
    ) -> AppResult<Adoption> {
        if let Some(title) = self.title_repo.get_by_id(&stub.id)? {
            log::info!("Title {} already in library, skipping import", stub.id);
            return Ok(Adoption::AlreadyKnown { title });
        }

        let title = Title::new(stub.id.as_str(), stub.title.as_str());
        validate_title(&title)?;

        if let Err(e) = self.title_repo.insert(&title) {
            return match e {
                AppError::DuplicateKey(_) => {
                    let title = self.title_repo.get_by_id(&stub.id)?.ok_or(AppError::NotFound)?;
                    Ok(Adoption::AlreadyKnown { title })
                }
                other => Err(other),
            };
        }

        let mut episodes = info.episodes;
        episodes.reverse();

        match self.importer.import(&title.id, &episodes, catalog) {
            Ok(report) => Ok(Adoption::Imported { title, report }),
            Err(e) => {
                // Unregister so the next discover starts from scratch
                log::warn!("Import for {} aborted, unregistering title: {}", title.id, e);
                if let Err(rollback) = self.title_repo.delete_with_episodes(&title.id) {
                    log::error!("Could not unregister {}: {}", title.id, rollback);
                }
                Err(e)
            }
        }
    }

    /// Full lookup: local library first, then search, pick and adopt.
    pub fn discover(
        &self,
        query: &str,
        catalog: &dyn RemoteCatalog,
        selector: &dyn Selector,
    ) -> AppResult<Discovery> {
        if let Lookup::LocalHit { titles } = self.lookup(query)? {
            return Ok(Discovery::Local { titles });
        }

        let candidates = catalog.search(query)?;
        if candidates.is_empty() {
            return Err(AppError::RemoteEmpty(format!("no titles match {:?}", query)));
        }

        let labels: Vec<String> = candidates.iter().map(|c| c.title.clone()).collect();
        let Some(index) = selector.choose(&labels) else {
            return Ok(Discovery::Cancelled);
        };
        let stub = candidates.get(index).ok_or_else(|| {
            AppError::Other(format!(
                "selection {} is out of range for {} candidates",
                index,
                candidates.len()
            ))
        })?;

        let info = catalog.get_info(&stub.id)?;
        if info.episodes.is_empty() && !self.title_repo.exists(&stub.id)? {
            return Err(AppError::RemoteEmpty(format!(
                "catalog lists no episodes for {}",
                stub.title
            )));
        }

        let adoption = self.adopt(stub, info, catalog)?;
        Ok(Discovery::Remote { adoption })
    }

    /// Stored episodes of a title, in import order
    pub fn episodes(&self, title_id: &str) -> AppResult<Vec<Episode>> {
        self.episode_repo.list_by_title(title_id)
    }
}
