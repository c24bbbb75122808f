// src/integrations/catalog.rs
//
// Remote catalog contract
//
// - Every call may return an empty result; callers never assume success
// - Returns DTOs, never domain entities
// - Transport failures surface as AppError::RemoteUnavailable

use serde::{Deserialize, Serialize};

use crate::error::AppResult;

/// Search hit from the catalog
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TitleStub {
    pub id: String,
    pub title: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct EpisodeStub {
    pub number: u32,
}

/// Title metadata. The catalog lists episodes newest first.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogInfo {
    pub episodes: Vec<EpisodeStub>,
}

/// One playable candidate for an episode
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Link {
    pub server: String,
    pub url: String,
}

#[cfg_attr(test, mockall::automock)]
pub trait RemoteCatalog {
    fn search(&self, query: &str) -> AppResult<Vec<TitleStub>>;

    fn get_info(&self, id: &str) -> AppResult<CatalogInfo>;

    /// Candidate links for one episode, in the catalog's preference order
    fn get_links(&self, title_id: &str, episode: u32) -> AppResult<Vec<Link>>;
}
