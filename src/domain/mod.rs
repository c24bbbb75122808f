// src/domain/mod.rs
//
// Domain Root - The Single Source of Truth for Domain API
//
// All other modules import from `crate::domain::*`

// ============================================================================
// MODULE DECLARATIONS
// ============================================================================

pub mod episode;
pub mod statistics;
pub mod title;

// ============================================================================
// PUBLIC API RE-EXPORTS
// ============================================================================

// Title Domain
pub use title::{validate_title, Rating, Title};

// Episode Domain
pub use episode::{validate_episode, Episode, EpisodeKey};

// Statistics Domain (Derived Data)
pub use statistics::{LibraryStatistics, WatchProgress};

// ============================================================================
// DOMAIN ERROR TYPES
// ============================================================================

use thiserror::Error;

/// Domain-level errors
/// These represent violations of business rules and invariants
#[derive(Debug, Error, PartialEq, Eq)]
pub enum DomainError {
    #[error("Invariant violation: {0}")]
    InvariantViolation(String),

    #[error("Rating {0} is outside 0..=5")]
    RatingOutOfRange(i64),

    #[error("Invalid episode key: {0:?}")]
    InvalidEpisodeKey(String),
}

/// Domain result type
pub type DomainResult<T> = Result<T, DomainError>;
