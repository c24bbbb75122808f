// src/lib.rs
// animeshelf - local watch tracker for anime series
//
// Architecture:
// - Domain-centric: titles, episodes and their invariants live in `domain`
// - Repositories are dumb data mappers over one SQLite file
// - Services own the rules: import once, mark watched, reconcile with the catalog
// - Application layer: command-line boundary
// - The remote catalog is a trait; the core never does network I/O itself

// ============================================================================
// FOUNDATION
// ============================================================================

pub mod config;
pub mod db;
pub mod domain;
pub mod error;
pub mod repositories;
pub mod services;

// ============================================================================
// APPLICATION LAYER
// ============================================================================

pub mod application;
pub mod integrations;

// ============================================================================
// PUBLIC API - Domain Entities
// ============================================================================

pub use domain::{
    validate_episode,
    validate_title,
    // Episode
    Episode,
    EpisodeKey,
    // Statistics
    LibraryStatistics,
    // Title
    Rating,
    Title,
    WatchProgress,
};

// ============================================================================
// PUBLIC API - Error Types
// ============================================================================

pub use domain::DomainError;
pub use error::{AppError, AppResult};

// ============================================================================
// PUBLIC API - Database
// ============================================================================

pub use config::Config;
pub use db::{create_connection_pool, initialize_database, ConnectionPool};

// ============================================================================
// PUBLIC API - Repositories
// ============================================================================

pub use repositories::{
    EpisodeRepository, SqliteEpisodeRepository, SqliteTitleRepository, TitleRepository,
};

// ============================================================================
// PUBLIC API - Services
// ============================================================================

pub use services::{
    Adoption,
    Discovery,
    // Import Service
    EpisodeImport,
    EpisodeImportRecord,
    ImportReport,
    ImportService,
    // Library Service
    LibraryService,
    Lookup,
    // Watch Service
    MarkOutcome,
    // Title Service
    TitleService,
    WatchService,
};

// ============================================================================
// PUBLIC API - Application Layer
// ============================================================================

pub use application::AppState;

// Re-export application submodules
pub use application::commands;
pub use application::dto;

// ============================================================================
// PUBLIC API - Integrations
// ============================================================================

pub use integrations::{CatalogSnapshot, IndexSelector, RemoteCatalog, Selector};
