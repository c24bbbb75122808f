use serde::{Deserialize, Serialize};

/// Watched vs imported episode counts for one title.
/// Derived data: always recomputed from the episode rows, never stored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct WatchProgress {
    pub watched: u32,
    pub total: u32,
}

impl WatchProgress {
    pub fn new(watched: u32, total: u32) -> Self {
        Self { watched, total }
    }

    /// Percentage watched, rounded to two decimals.
    ///
    /// `None` when nothing is imported yet, which is not the same as 0%.
    pub fn percent(&self) -> Option<f64> {
        if self.total == 0 {
            return None;
        }
        let raw = 100.0 * f64::from(self.watched) / f64::from(self.total);
        Some((raw * 100.0).round() / 100.0)
    }

    pub fn is_complete(&self) -> bool {
        self.total > 0 && self.watched == self.total
    }
}

/// Library-wide counters
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LibraryStatistics {
    pub total_titles: u32,
    pub rated_titles: u32,
    pub total_episodes: u32,
    pub watched_episodes: u32,
    pub completed_titles: u32,
}
