use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::domain::DomainError;

/// Composite episode identity: the owning title plus the catalog episode number.
///
/// Rendered as `"<title_id> <number>"`, which is also the stored primary key.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct EpisodeKey {
    pub title_id: String,
    pub number: u32,
}

impl EpisodeKey {
    pub fn new(title_id: impl Into<String>, number: u32) -> Self {
        Self {
            title_id: title_id.into(),
            number,
        }
    }
}

impl fmt::Display for EpisodeKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.title_id, self.number)
    }
}

impl FromStr for EpisodeKey {
    type Err = DomainError;

    /// Splits on the last space, so title ids containing spaces still parse.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (title_id, number) = s
            .rsplit_once(' ')
            .ok_or_else(|| DomainError::InvalidEpisodeKey(s.to_string()))?;

        if title_id.is_empty() {
            return Err(DomainError::InvalidEpisodeKey(s.to_string()));
        }

        let number = number
            .parse::<u32>()
            .map_err(|_| DomainError::InvalidEpisodeKey(s.to_string()))?;

        Ok(Self::new(title_id, number))
    }
}

impl TryFrom<String> for EpisodeKey {
    type Error = DomainError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<EpisodeKey> for String {
    fn from(key: EpisodeKey) -> Self {
        key.to_string()
    }
}

/// A single imported episode with the one playable link chosen for it
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Episode {
    /// Composite identity, also carries the parent title id
    pub id: EpisodeKey,

    pub watched: bool,

    /// First link the catalog resolved for this episode
    pub link: String,
}

impl Episode {
    /// Create a new, unwatched Episode
    /// The owning title MUST exist (checked by caller)
    pub fn new(id: EpisodeKey, link: impl Into<String>) -> Self {
        Self {
            id,
            watched: false,
            link: link.into(),
        }
    }

    pub fn title_id(&self) -> &str {
        &self.id.title_id
    }

    pub fn number(&self) -> u32 {
        self.id.number
    }

    pub fn mark_watched(&mut self) {
        self.watched = true;
    }
}
