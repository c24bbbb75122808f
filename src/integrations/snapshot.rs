// src/integrations/snapshot.rs
//
// Catalog snapshot: a RemoteCatalog served from a JSON file
//
// Lets the command line adopt titles without a network client.
// Format:
//   { "titles": [ { "id": "...", "title": "...",
//                   "episodes": [3, 2, 1],
//                   "links": { "1": [ { "server": "...", "url": "..." } ] } } ] }

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;

use crate::error::{AppError, AppResult};
use crate::integrations::catalog::{CatalogInfo, EpisodeStub, Link, RemoteCatalog, TitleStub};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CatalogSnapshot {
    #[serde(default)]
    pub titles: Vec<SnapshotTitle>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SnapshotTitle {
    pub id: String,
    pub title: String,
    /// Newest first, as a live catalog would list them
    #[serde(default)]
    pub episodes: Vec<u32>,
    #[serde(default)]
    pub links: BTreeMap<u32, Vec<Link>>,
}

impl CatalogSnapshot {
    pub fn load(path: &Path) -> AppResult<Self> {
        let raw = std::fs::read_to_string(path).map_err(|e| {
            AppError::RemoteUnavailable(format!("cannot read {}: {}", path.display(), e))
        })?;
        Self::from_json(&raw)
    }

    pub fn from_json(raw: &str) -> AppResult<Self> {
        let snapshot: CatalogSnapshot = serde_json::from_str(raw)?;
        log::debug!("Loaded catalog snapshot with {} titles", snapshot.titles.len());
        Ok(snapshot)
    }

    fn title(&self, id: &str) -> Option<&SnapshotTitle> {
        self.titles.iter().find(|t| t.id == id)
    }
}

impl RemoteCatalog for CatalogSnapshot {
    /// Case-insensitive substring match on the title
    fn search(&self, query: &str) -> AppResult<Vec<TitleStub>> {
        let needle = query.to_lowercase();
        Ok(self
            .titles
            .iter()
            .filter(|t| t.title.to_lowercase().contains(&needle))
            .map(|t| TitleStub {
                id: t.id.clone(),
                title: t.title.clone(),
            })
            .collect())
    }

    fn get_info(&self, id: &str) -> AppResult<CatalogInfo> {
        Ok(self
            .title(id)
            .map(|t| CatalogInfo {
                episodes: t.episodes.iter().map(|&number| EpisodeStub { number }).collect(),
            })
            .unwrap_or_default())
    }

    fn get_links(&self, title_id: &str, episode: u32) -> AppResult<Vec<Link>> {
        Ok(self
            .title(title_id)
            .and_then(|t| t.links.get(&episode))
            .cloned()
            .unwrap_or_default())
    }
}
