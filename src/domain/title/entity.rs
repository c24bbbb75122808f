use serde::{Deserialize, Serialize};
use std::fmt;

use crate::domain::{DomainError, DomainResult};

/// A series known to the remote catalog and tracked locally.
/// This is the root entity: it owns its episodes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Title {
    /// Identifier assigned by the remote catalog, immutable
    pub id: String,

    /// Display name as first seen in the catalog
    pub name: String,

    /// User vote, `Rating::UNRATED` until the user votes
    pub rating: Rating,
}

impl Title {
    /// Create a new, unrated Title
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            rating: Rating::UNRATED,
        }
    }
}

/// Star rating in `0..=5`, where 0 means unrated.
///
/// The only way to build one from user input is `Rating::new`, so an
/// out-of-range value never reaches storage.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default, Serialize, Deserialize)]
#[serde(try_from = "i64", into = "u8")]
pub struct Rating(u8);

impl Rating {
    pub const MAX: u8 = 5;
    pub const UNRATED: Rating = Rating(0);

    pub fn new(stars: i64) -> DomainResult<Self> {
        if (0..=i64::from(Self::MAX)).contains(&stars) {
            Ok(Self(stars as u8))
        } else {
            Err(DomainError::RatingOutOfRange(stars))
        }
    }

    pub fn stars(self) -> u8 {
        self.0
    }

    pub fn is_rated(self) -> bool {
        self.0 > 0
    }
}

impl TryFrom<i64> for Rating {
    type Error = DomainError;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        Rating::new(value)
    }
}

impl From<Rating> for u8 {
    fn from(rating: Rating) -> Self {
        rating.0
    }
}

impl fmt::Display for Rating {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.0, Self::MAX)
    }
}
