// src/application/dto/mod.rs
//
// Data Transfer Objects
//
// PRINCIPLES:
// - DTOs are output-friendly representations
// - DTOs are simple, serializable structs
// - Conversion FROM domain entities only (never TO)

use serde::Serialize;

use crate::db::DatabaseStats;
use crate::domain::{Episode, LibraryStatistics, Title, WatchProgress};
use crate::services::{Adoption, ImportReport};

// ============================================================================
// TITLE DTOs
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TitleDto {
    pub id: String,
    pub name: String,
    pub rating: u8,
    /// `None` while no episodes are imported
    pub watched_percent: Option<f64>,
}

impl TitleDto {
    pub fn new(title: Title, progress: WatchProgress) -> Self {
        Self {
            id: title.id,
            name: title.name,
            rating: title.rating.stars(),
            watched_percent: progress.percent(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RemovalDto {
    pub title_id: String,
    pub episodes_removed: usize,
}

/// Result of a find-or-add by name
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "snake_case", tag = "source")]
pub enum DiscoveryDto {
    /// Already in the library, nothing fetched
    Library { titles: Vec<TitleDto> },
    /// Fetched from the catalog and imported now
    Imported {
        title: TitleDto,
        import: ImportSummaryDto,
    },
    /// Catalog pick turned out to be in the library already
    AlreadyKnown { title: TitleDto },
    Cancelled,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ImportSummaryDto {
    pub imported: usize,
    pub without_link: usize,
    pub already_imported: usize,
    pub failed: usize,
}

impl From<&ImportReport> for ImportSummaryDto {
    fn from(report: &ImportReport) -> Self {
        Self {
            imported: report.imported(),
            without_link: report.without_link(),
            already_imported: report.already_imported(),
            failed: report.failed(),
        }
    }
}

impl DiscoveryDto {
    pub fn from_adoption(adoption: Adoption, progress: WatchProgress) -> Self {
        match adoption {
            Adoption::Imported { title, report } => DiscoveryDto::Imported {
                import: ImportSummaryDto::from(&report),
                title: TitleDto::new(title, progress),
            },
            Adoption::AlreadyKnown { title } => DiscoveryDto::AlreadyKnown {
                title: TitleDto::new(title, progress),
            },
        }
    }
}

// ============================================================================
// EPISODE DTOs
// ============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EpisodeDto {
    pub id: String,
    pub title_id: String,
    pub number: u32,
    pub watched: bool,
    pub link: String,
}

impl From<Episode> for EpisodeDto {
    fn from(episode: Episode) -> Self {
        Self {
            id: episode.id.to_string(),
            number: episode.number(),
            title_id: episode.id.title_id,
            watched: episode.watched,
            link: episode.link,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProgressDto {
    pub title_id: String,
    pub watched: u32,
    pub total: u32,
    pub percent: Option<f64>,
}

impl ProgressDto {
    pub fn new(title_id: &str, progress: WatchProgress) -> Self {
        Self {
            title_id: title_id.to_string(),
            watched: progress.watched,
            total: progress.total,
            percent: progress.percent(),
        }
    }
}

// ============================================================================
// MAINTENANCE DTOs
// ============================================================================

#[derive(Debug, Clone, Serialize)]
pub struct HealthDto {
    pub integrity_ok: bool,
    pub database: DatabaseStats,
    pub library: LibraryStatistics,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{EpisodeKey, Rating};

    #[test]
    fn test_title_dto_without_episodes_has_no_percent() {
        let mut title = Title::new("a1", "Naruto");
        title.rating = Rating::new(4).unwrap();

        let dto = TitleDto::new(title, WatchProgress::new(0, 0));

        assert_eq!(dto.rating, 4);
        assert_eq!(dto.watched_percent, None);
    }

    #[test]
    fn test_episode_dto_from_episode() {
        let dto = EpisodeDto::from(Episode::new(EpisodeKey::new("a1", 7), "https://x/7"));

        assert_eq!(dto.id, "a1 7");
        assert_eq!(dto.title_id, "a1");
        assert_eq!(dto.number, 7);
        assert!(!dto.watched);
    }

    #[test]
    fn test_progress_dto_serialization() {
        let json = serde_json::to_value(ProgressDto::new("a1", WatchProgress::new(1, 2))).unwrap();

        assert_eq!(json["percent"], 50.0);
        assert_eq!(json["total"], 2);
    }
}
